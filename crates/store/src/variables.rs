//! Variables store: grouped dashboard variables and the editing selection

use crate::{skip, Applied};
use dataviz_config::MutationPolicy;
use dataviz_shared::{DashboardError, Variable, VariableGroup, VariableValue, VariablesState};

const COMPONENT: &str = "VariablesStore";

/// Owner of the dashboard's variable groups
///
/// Every lookup walks groups in stored order, then variables in stored
/// order, and stops at the first match. Ids are expected to be unique but
/// the store does not enforce it.
#[derive(Debug, Clone)]
pub struct VariablesStore {
    state: VariablesState,
    policy: MutationPolicy,
    generation: u64,
}

impl VariablesStore {
    pub fn new(groups: Vec<VariableGroup>, policy: MutationPolicy) -> Self {
        Self {
            state: VariablesState {
                groups,
                ..VariablesState::default()
            },
            policy,
            generation: 0,
        }
    }

    pub fn state(&self) -> &VariablesState {
        &self.state
    }

    pub fn groups(&self) -> &[VariableGroup] {
        &self.state.groups
    }

    pub fn group(&self, group_id: &str) -> Option<&VariableGroup> {
        self.state.groups.iter().find(|g| g.id == group_id)
    }

    /// Mutation counter; bumps whenever state actually changes
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// First variable with `variable_id`
    pub fn find(&self, variable_id: &str) -> Option<&Variable> {
        self.state
            .groups
            .iter()
            .find_map(|g| g.variables.iter().find(|v| v.id == variable_id))
    }

    fn find_mut(&mut self, variable_id: &str) -> Option<&mut Variable> {
        self.state
            .groups
            .iter_mut()
            .find_map(|g| g.variables.iter_mut().find(|v| v.id == variable_id))
    }

    fn touch(&mut self) -> Applied {
        self.generation += 1;
        Ok(true)
    }

    pub fn toggle_active(&mut self, variable_id: &str) -> Applied {
        let policy = self.policy;
        match self.find_mut(variable_id) {
            Some(variable) => {
                variable.active = !variable.active;
                log::debug!(
                    "[{}] {} is now {}",
                    COMPONENT,
                    variable_id,
                    if variable.active { "active" } else { "inactive" }
                );
                self.touch()
            }
            None => skip(
                policy,
                COMPONENT,
                DashboardError::not_found("variable", variable_id),
            ),
        }
    }

    /// Assign a new value. No coercion happens; the caller keeps the value
    /// consistent with the variable's kind.
    pub fn set_value(&mut self, variable_id: &str, value: VariableValue) -> Applied {
        let policy = self.policy;
        let Some(variable) = self.find_mut(variable_id) else {
            return skip(policy, COMPONENT, DashboardError::not_found("variable", variable_id));
        };

        if let Err(err) = variable.check_value(&value) {
            if policy == MutationPolicy::Strict {
                return Err(err);
            }
            log::warn!("[{}] Applying unchecked value: {}", COMPONENT, err);
        }

        variable.value = value;
        self.touch()
    }

    /// Replace the first variable with the same id
    pub fn replace_variable(&mut self, variable: Variable) -> Applied {
        let policy = self.policy;
        if policy == MutationPolicy::Strict {
            variable.check_value(&variable.value)?;
        }

        match self.find_mut(&variable.id) {
            Some(slot) => {
                *slot = variable;
                self.touch()
            }
            None => skip(policy, COMPONENT, DashboardError::not_found("variable", &variable.id)),
        }
    }

    /// Set the weak selection; the id is not checked against the store
    pub fn select(&mut self, variable_id: Option<&str>) {
        self.state.selected_variable_id = variable_id.map(str::to_string);
        self.generation += 1;
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.state.is_editing = editing;
        self.generation += 1;
    }

    /// Open the editor on a variable
    pub fn begin_edit(&mut self, variable_id: &str) {
        self.select(Some(variable_id));
        self.set_editing(true);
    }

    /// Close the editor and drop the selection
    pub fn end_edit(&mut self) {
        self.set_editing(false);
        self.select(None);
    }

    /// Resolve the selection; `None` once the variable is gone
    pub fn selected_variable(&self) -> Option<&Variable> {
        self.state
            .selected_variable_id
            .as_deref()
            .and_then(|id| self.find(id))
    }

    pub fn active_variables(&self) -> impl Iterator<Item = &Variable> {
        self.state
            .groups
            .iter()
            .flat_map(|g| g.variables.iter())
            .filter(|v| v.active)
    }

    /// Append to the named group. Duplicate ids are accepted.
    pub fn add_variable(&mut self, group_id: &str, variable: Variable) -> Applied {
        let policy = self.policy;
        if policy == MutationPolicy::Strict {
            variable.check_value(&variable.value)?;
        }

        match self.state.groups.iter_mut().find(|g| g.id == group_id) {
            Some(group) => {
                group.variables.push(variable);
                self.touch()
            }
            None => skip(policy, COMPONENT, DashboardError::not_found("group", group_id)),
        }
    }

    /// Remove the first variable with `variable_id`
    pub fn remove_variable(&mut self, variable_id: &str) -> Applied {
        let found = self
            .state
            .groups
            .iter()
            .enumerate()
            .find_map(|(gi, g)| g.position_of(variable_id).map(|vi| (gi, vi)));

        match found {
            Some((gi, vi)) => {
                self.state.groups[gi].variables.remove(vi);
                self.touch()
            }
            None => skip(
                self.policy,
                COMPONENT,
                DashboardError::not_found("variable", variable_id),
            ),
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.state.loading = loading;
        self.generation += 1;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.state.error = error;
        self.generation += 1;
    }
}
