//! Application state wiring the workflow service to its store.
//!
//! `WorkflowService` is generic over the store trait; AppState pins it to the
//! in-memory implementation from statewright-infra.

use std::sync::Arc;

use statewright_core::service::workflow::WorkflowService;
use statewright_infra::memory::store::InMemoryWorkflowStore;

/// Concrete service type pinned to the infra store.
pub type ConcreteWorkflowService = WorkflowService<InMemoryWorkflowStore>;

/// Shared application state handed to every REST handler.
#[derive(Clone)]
pub struct AppState {
    pub workflow_service: Arc<ConcreteWorkflowService>,
}

impl AppState {
    /// Wire a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::with_service(WorkflowService::new(InMemoryWorkflowStore::new()))
    }

    pub fn with_service(service: ConcreteWorkflowService) -> Self {
        Self {
            workflow_service: Arc::new(service),
        }
    }
}
