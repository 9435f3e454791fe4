//! In-memory workflow store.
//!
//! Implements `WorkflowStore` from `statewright-core` on two `DashMap`s.
//! Nothing survives process exit.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use statewright_core::repository::workflow::WorkflowStore;
use statewright_types::error::RepositoryError;
use statewright_types::workflow::{InstanceId, WorkflowDefinition, WorkflowInstance};
use tracing::debug;

/// `DashMap`-backed implementation of `WorkflowStore`.
///
/// Per-key operations are atomic. `with_instance_mut` holds the shard write
/// guard of the instance entry for the duration of the closure, which
/// serializes concurrent transitions on one instance.
#[derive(Default)]
pub struct InMemoryWorkflowStore {
    definitions: DashMap<String, WorkflowDefinition>,
    instances: DashMap<InstanceId, WorkflowInstance>,
}

impl InMemoryWorkflowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored definitions.
    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    /// Number of stored instances.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}

impl WorkflowStore for InMemoryWorkflowStore {
    fn get_definition(&self, id: &str) -> Result<Option<WorkflowDefinition>, RepositoryError> {
        Ok(self.definitions.get(id).map(|d| d.value().clone()))
    }

    fn put_definition(&self, def: WorkflowDefinition) -> Result<(), RepositoryError> {
        if self.definitions.insert(def.id.clone(), def).is_some() {
            debug!("overwrote existing workflow definition");
        }
        Ok(())
    }

    fn insert_definition_if_absent(
        &self,
        def: WorkflowDefinition,
    ) -> Result<bool, RepositoryError> {
        match self.definitions.entry(def.id.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(def);
                Ok(true)
            }
        }
    }

    fn contains_definition(&self, id: &str) -> Result<bool, RepositoryError> {
        Ok(self.definitions.contains_key(id))
    }

    fn list_definitions(&self) -> Result<Vec<WorkflowDefinition>, RepositoryError> {
        let mut defs: Vec<WorkflowDefinition> =
            self.definitions.iter().map(|d| d.value().clone()).collect();
        defs.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(defs)
    }

    fn get_instance(&self, id: &InstanceId) -> Result<Option<WorkflowInstance>, RepositoryError> {
        Ok(self.instances.get(id).map(|i| i.value().clone()))
    }

    fn put_instance(&self, instance: WorkflowInstance) -> Result<(), RepositoryError> {
        self.instances.insert(instance.id, instance);
        Ok(())
    }

    fn list_instances(&self) -> Result<Vec<WorkflowInstance>, RepositoryError> {
        let mut all: Vec<WorkflowInstance> =
            self.instances.iter().map(|i| i.value().clone()).collect();
        all.sort_by_key(|i| i.id);
        Ok(all)
    }

    fn with_instance_mut<T, F>(&self, id: &InstanceId, f: F) -> Result<Option<T>, RepositoryError>
    where
        F: FnOnce(&mut WorkflowInstance) -> T,
    {
        Ok(self.instances.get_mut(id).map(|mut guard| f(guard.value_mut())))
    }
}
