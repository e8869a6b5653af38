//! Common error types used across all DataViz crates

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base error type for store and session operations
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum DashboardError {
    /// A value does not fit the variable it is assigned to
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// An operation referenced an id that is not in the store
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("An authentication request is already in flight")]
    SessionInFlight,
}

impl DashboardError {
    pub fn not_found(kind: &str, id: &str) -> Self {
        DashboardError::NotFound {
            resource: format!("{kind} {id}"),
        }
    }
}

/// Result type alias for store operations
pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_serialization() {
        let json = serde_json::to_value(&DashboardError::SessionInFlight).unwrap();
        assert_eq!(json["type"], "SessionInFlight");
        assert_eq!(
            serde_json::from_value::<DashboardError>(json).unwrap(),
            DashboardError::SessionInFlight
        );
    }

    #[test]
    fn test_error_serialization() {
        let err = DashboardError::not_found("variable", "variable42");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("NotFound"));
        assert!(json.contains("variable variable42"));
    }
}
