//! Workflow engine service.
//!
//! Orchestrates definition creation, instance startup, and action execution
//! on top of a [`WorkflowStore`]. All rules live in
//! [`crate::workflow::validator`] and [`crate::workflow::transition`]; this
//! service sequences them against the store and guarantees that an instance
//! is only ever mutated after every check has passed.

use chrono::Utc;
use statewright_types::error::WorkflowError;
use statewright_types::workflow::{
    Action, CreateDefinitionRequest, InstanceId, WorkflowDefinition, WorkflowInstance,
};
use tracing::{debug, info, warn};

use crate::repository::workflow::WorkflowStore;
use crate::workflow::transition::{available_actions, evaluate_transition};
use crate::workflow::validator::validate_definition;

/// Service exposing the workflow engine operations.
///
/// Generic over the store trait -- statewright-core never depends on
/// statewright-infra.
pub struct WorkflowService<S: WorkflowStore> {
    store: S,
}

impl<S: WorkflowStore> WorkflowService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and store a new definition.
    ///
    /// Fails with `ValidationFailed` listing every issue, or `AlreadyExists`
    /// if the id is taken. Nothing is stored on failure.
    pub fn create_definition(
        &self,
        request: CreateDefinitionRequest,
    ) -> Result<WorkflowDefinition, WorkflowError> {
        let errors = validate_definition(&request);
        if !errors.is_empty() {
            debug!(definition_id = %request.id, issues = errors.len(), "definition rejected");
            return Err(WorkflowError::ValidationFailed(errors));
        }

        let definition = request.into_definition();
        if !self.store.insert_definition_if_absent(definition.clone())? {
            return Err(WorkflowError::AlreadyExists(definition.id));
        }

        info!(
            definition_id = %definition.id,
            states = definition.states.len(),
            actions = definition.actions.len(),
            "workflow definition created"
        );
        Ok(definition)
    }

    /// Start a new instance of a stored definition, positioned on its initial state.
    pub fn start_instance(&self, definition_id: &str) -> Result<WorkflowInstance, WorkflowError> {
        if definition_id.trim().is_empty() {
            return Err(WorkflowError::InvalidInput(
                "definition id cannot be empty".to_string(),
            ));
        }

        let definition = self
            .store
            .get_definition(definition_id)?
            .ok_or_else(|| WorkflowError::DefinitionNotFound(definition_id.to_string()))?;

        // Unreachable for validated definitions, but the store may have been
        // written to directly.
        let initial = definition.initial_state().ok_or_else(|| {
            warn!(%definition_id, "stored definition lacks a single initial state");
            WorkflowError::InvalidDefinition(format!(
                "definition '{definition_id}' does not have exactly one initial state"
            ))
        })?;

        let instance = WorkflowInstance::new(definition.id.clone(), initial.id.clone());
        self.store.put_instance(instance.clone())?;

        info!(
            instance_id = %instance.id,
            %definition_id,
            state = %instance.current_state,
            "workflow instance started"
        );
        Ok(instance)
    }

    /// Execute `action_id` on an instance and return the updated instance.
    ///
    /// The whole read-evaluate-apply sequence runs under the store's
    /// per-instance exclusive access, so concurrent executions on the same
    /// instance are serialized. On any error the instance is left unchanged.
    pub fn execute_action(
        &self,
        instance_id: &InstanceId,
        action_id: &str,
    ) -> Result<WorkflowInstance, WorkflowError> {
        if action_id.trim().is_empty() {
            return Err(WorkflowError::InvalidInput(
                "action id cannot be empty".to_string(),
            ));
        }
        if instance_id.is_nil() {
            return Err(WorkflowError::InvalidInput(
                "instance id cannot be empty".to_string(),
            ));
        }

        let outcome = self
            .store
            .with_instance_mut(instance_id, |instance| {
                let definition = self
                    .store
                    .get_definition(&instance.definition_id)?
                    .ok_or_else(|| {
                        WorkflowError::InvalidState(format!(
                            "underlying workflow definition '{}' for this instance not found",
                            instance.definition_id
                        ))
                    })?;

                let change = evaluate_transition(&definition, instance, action_id, Utc::now())?;
                instance.apply(change);
                Ok::<_, WorkflowError>(instance.clone())
            })?
            .ok_or(WorkflowError::InstanceNotFound(*instance_id))?;

        match &outcome {
            Ok(instance) => info!(
                %instance_id,
                %action_id,
                state = %instance.current_state,
                history = instance.history.len(),
                "action executed"
            ),
            Err(e) => debug!(%instance_id, %action_id, error = %e, "action rejected"),
        }

        outcome
    }

    /// Get a definition by id.
    pub fn get_definition(&self, id: &str) -> Result<WorkflowDefinition, WorkflowError> {
        self.store
            .get_definition(id)?
            .ok_or_else(|| WorkflowError::DefinitionNotFound(id.to_string()))
    }

    /// List all definitions, ordered by id.
    pub fn list_definitions(&self) -> Result<Vec<WorkflowDefinition>, WorkflowError> {
        Ok(self.store.list_definitions()?)
    }

    /// Get an instance by id.
    pub fn get_instance(&self, id: &InstanceId) -> Result<WorkflowInstance, WorkflowError> {
        self.store
            .get_instance(id)?
            .ok_or(WorkflowError::InstanceNotFound(*id))
    }

    /// List all instances, oldest first.
    pub fn list_instances(&self) -> Result<Vec<WorkflowInstance>, WorkflowError> {
        Ok(self.store.list_instances()?)
    }

    /// Actions that could currently fire on an instance.
    pub fn available_actions(&self, id: &InstanceId) -> Result<Vec<Action>, WorkflowError> {
        let instance = self.get_instance(id)?;
        let definition = self
            .store
            .get_definition(&instance.definition_id)?
            .ok_or_else(|| {
                WorkflowError::InvalidState(format!(
                    "underlying workflow definition '{}' for this instance not found",
                    instance.definition_id
                ))
            })?;

        Ok(available_actions(&definition, &instance)
            .into_iter()
            .cloned()
            .collect())
    }
}
