//! Command-line front end for the dashboard stores

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use dataviz_config::{ConfigParser, ConfigValidator, DashboardConfig};
use dataviz_shared::Credentials;
use dataviz_store::{DashboardStore, DevIdentityProvider};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "dataviz")]
#[command(about = "Dashboard state core: variables, chart data and session", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path (yaml, json or toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Build the dashboard, restore the session and print everything as JSON
    Snapshot,
    /// Sign in through the development provider and print the session
    SignIn {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Parse and validate a config file
    CheckConfig {
        file: PathBuf,
    },
}

/// Load and validate the config at `path`, or the defaults when none is given
pub fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    let config = match path {
        Some(path) => ConfigParser::parse_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    ConfigValidator::validate(&config).context("invalid configuration")?;
    Ok(config)
}

/// Start logging before the config is read so parser and validator output
/// is kept. Returns `true` when `RUST_LOG` or `--debug` fixed the level.
pub fn init_logging(debug: bool) -> bool {
    let pinned = debug || std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some();
    let fallback = if debug { "debug" } else { "trace" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(fallback))
        .try_init();

    if !pinned {
        log::set_max_level(LevelFilter::Info);
    }
    pinned
}

/// Level the config asks for, `None` when `RUST_LOG` or `--debug` wins
pub fn configured_level(config: &DashboardConfig, pinned: bool) -> Option<LevelFilter> {
    if pinned {
        return None;
    }
    config.logging.level.parse().ok()
}

/// Narrow or widen logging to the configured level
pub fn apply_log_level(config: &DashboardConfig, pinned: bool) {
    if let Some(level) = configured_level(config, pinned) {
        log::set_max_level(level);
    }
}

fn build_dashboard(config: &DashboardConfig) -> DashboardStore {
    let provider = DevIdentityProvider::new(&config.session.dev_provider);
    DashboardStore::from_config(config, Arc::new(provider))
}

/// Run one command and return what it prints
pub async fn run(command: Commands, config: DashboardConfig) -> Result<String> {
    match command {
        Commands::Snapshot => {
            let dashboard = build_dashboard(&config);
            dashboard.session().restore().await?;
            Ok(serde_json::to_string_pretty(&dashboard.snapshot())?)
        }
        Commands::SignIn { email, password } => {
            let dashboard = build_dashboard(&config);
            let state = dashboard
                .session()
                .sign_in(Credentials::email_password(email, password))
                .await?;
            if let Some(error) = &state.error {
                log::warn!("Sign-in failed: {}", error);
            }
            Ok(serde_json::to_string_pretty(&state)?)
        }
        Commands::CheckConfig { file } => {
            let checked = load_config(Some(&file))?;
            log::info!("{} is valid (version {})", file.display(), checked.version);
            Ok(format!("{}: ok", file.display()))
        }
    }
}
