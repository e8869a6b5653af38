//! Shared types for the DataViz dashboard
//!
//! This crate contains the entity types that are shared between the
//! configuration system, the stores and the dashboard binary: variables and
//! their groups, data points and the chart projection derived from them,
//! users and session phases, plus the common error taxonomy.

pub mod data_types;
pub mod errors;
pub mod session;
pub mod store_state;
pub mod variables;

pub use data_types::{ChartSeries, DataPoint, Metadata, Series, SeriesStyle, DEFAULT_SERIES_NAME};
pub use errors::{DashboardError, DashboardResult};
pub use session::{Credentials, SessionPhase, User};
pub use store_state::{DataState, SessionState, VariablesState};
pub use variables::{Variable, VariableGroup, VariableKind, VariableOption, VariableValue};
