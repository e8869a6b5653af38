//! Application root owning the three stores

use crate::data::DataStore;
use crate::identity::IdentityProvider;
use crate::seed::{sample_data_points, sample_variable_groups};
use crate::session::SessionStore;
use crate::variables::VariablesStore;
use dataviz_config::DashboardConfig;
use dataviz_shared::{DataState, SessionState, VariablesState};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Read-only copy of everything the dashboard renders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    pub variables: VariablesState,
    pub data: DataState,
    pub session: SessionState,
}

/// The dashboard's state, created once by the application root and passed
/// to whatever renders or drives it
pub struct DashboardStore {
    variables: VariablesStore,
    data: DataStore,
    session: SessionStore,
}

impl DashboardStore {
    pub fn new(variables: VariablesStore, data: DataStore, session: SessionStore) -> Self {
        Self {
            variables,
            data,
            session,
        }
    }

    /// Build every store from configuration
    pub fn from_config(config: &DashboardConfig, provider: Arc<dyn IdentityProvider>) -> Self {
        let policy = config.store.mutation_policy;
        let (groups, points) = if config.store.seed_sample_data {
            (sample_variable_groups(), sample_data_points())
        } else {
            (Vec::new(), Vec::new())
        };

        log::info!(
            "[DashboardStore] Starting with {} variable groups and {} data points ({:?} mutations)",
            groups.len(),
            points.len(),
            policy
        );

        Self {
            variables: VariablesStore::new(groups, policy),
            data: DataStore::new(points, &config.chart, policy),
            session: SessionStore::new(provider, config.session.in_flight_policy),
        }
    }

    pub fn variables(&self) -> &VariablesStore {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut VariablesStore {
        &mut self.variables
    }

    pub fn data(&self) -> &DataStore {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut DataStore {
        &mut self.data
    }

    /// Session handle; clones share state
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            variables: self.variables.state().clone(),
            data: self.data.state().clone(),
            session: self.session.state(),
        }
    }

    /// Tooltip for the point drawn at chart position `index`: its value
    /// followed by every active variable
    pub fn tooltip_lines(&self, index: usize) -> Vec<String> {
        let Some(point) = self.data.points().get(index) else {
            return Vec::new();
        };

        std::iter::once(format!("Value: {}", point.value))
            .chain(self.variables.active_variables().map(|v| v.summary()))
            .collect()
    }
}
