use anyhow::Result;
use clap::Parser;
use dataviz_dashboard::{apply_log_level, init_logging, load_config, run, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let pinned = init_logging(cli.debug);
    let config = load_config(cli.config.as_deref())?;
    apply_log_level(&config, pinned);

    let output = run(cli.command, config).await?;
    println!("{output}");

    Ok(())
}
