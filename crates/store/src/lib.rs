//! State stores for the DataViz dashboard
//!
//! Three independent stores hold everything the dashboard shows:
//!
//! - [`VariablesStore`]: grouped variables, the editing selection
//! - [`DataStore`]: data points and the chart projection derived from them
//! - [`SessionStore`]: the signed-in user, driven by an [`IdentityProvider`]
//!
//! [`DashboardStore`] owns one of each and is handed to whoever renders the
//! dashboard. No store reads another's internals.

pub mod dashboard;
pub mod data;
pub mod identity;
pub mod seed;
pub mod session;
pub mod variables;

pub use dashboard::{DashboardSnapshot, DashboardStore};
pub use data::DataStore;
pub use identity::{AuthError, DevIdentityProvider, IdentityProvider};
pub use session::{SessionStore, SessionTransition};
pub use variables::VariablesStore;

use dataviz_config::MutationPolicy;
use dataviz_shared::{DashboardError, DashboardResult};

/// Outcome of a store mutation: `Ok(true)` when state changed, `Ok(false)`
/// when the operation was skipped under the lenient policy.
pub type Applied = DashboardResult<bool>;

/// Resolve a missing-id or invalid-value case according to `policy`
pub(crate) fn skip(policy: MutationPolicy, component: &str, error: DashboardError) -> Applied {
    match policy {
        MutationPolicy::Lenient => {
            log::debug!("[{}] Skipped: {}", component, error);
            Ok(false)
        }
        MutationPolicy::Strict => Err(error),
    }
}
