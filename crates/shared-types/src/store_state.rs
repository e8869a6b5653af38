// Store state structures read by the rendering layer.
// Field names serialize in camelCase to match what the UI consumes.

use crate::data_types::{ChartSeries, DataPoint};
use crate::session::{SessionPhase, User};
use crate::variables::VariableGroup;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VariablesState {
    pub groups: Vec<VariableGroup>,
    /// Weak reference; resolved by lookup and may dangle
    pub selected_variable_id: Option<String>,
    pub is_editing: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DataState {
    pub points: Vec<DataPoint>,
    pub derived_chart: ChartSeries,
    /// Weak reference; resolved by lookup and may dangle
    pub selected_point_id: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub phase: SessionPhase,
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Anonymous,
            user: None,
            loading: false,
            error: None,
        }
    }
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.phase == SessionPhase::Authenticated && self.user.is_some()
    }
}
