//! Workflow store trait definition.
//!
//! Defines the storage interface for workflow definitions and instances.
//! The infrastructure layer (statewright-infra) implements this trait with
//! concurrent in-memory maps.

use statewright_types::error::RepositoryError;
use statewright_types::workflow::{InstanceId, WorkflowDefinition, WorkflowInstance};

/// Store trait for workflow definitions and instances.
///
/// Covers two entity families:
/// - **Definitions:** keyed by their caller-supplied string id, write-once.
/// - **Instances:** keyed by their generated [`InstanceId`].
///
/// All operations are synchronous and in-memory; implementations must be
/// safe to call concurrently without external locking.
pub trait WorkflowStore: Send + Sync {
    // -----------------------------------------------------------------------
    // Definitions
    // -----------------------------------------------------------------------

    /// Get a definition by id.
    fn get_definition(&self, id: &str) -> Result<Option<WorkflowDefinition>, RepositoryError>;

    /// Insert or overwrite a definition.
    fn put_definition(&self, def: WorkflowDefinition) -> Result<(), RepositoryError>;

    /// Insert a definition only if no definition with the same id exists.
    ///
    /// Returns `false` (and leaves the stored definition untouched) when the
    /// id is taken. The check and the insert are one atomic step.
    fn insert_definition_if_absent(&self, def: WorkflowDefinition)
    -> Result<bool, RepositoryError>;

    /// Whether a definition with this id exists.
    fn contains_definition(&self, id: &str) -> Result<bool, RepositoryError>;

    /// All stored definitions, ordered by id.
    fn list_definitions(&self) -> Result<Vec<WorkflowDefinition>, RepositoryError>;

    // -----------------------------------------------------------------------
    // Instances
    // -----------------------------------------------------------------------

    /// Get an instance snapshot by id.
    fn get_instance(&self, id: &InstanceId) -> Result<Option<WorkflowInstance>, RepositoryError>;

    /// Insert or overwrite an instance.
    fn put_instance(&self, instance: WorkflowInstance) -> Result<(), RepositoryError>;

    /// All stored instances, ordered by id (creation order for UUID v7 ids).
    fn list_instances(&self) -> Result<Vec<WorkflowInstance>, RepositoryError>;

    /// Run `f` against the stored instance while holding exclusive access to it.
    ///
    /// Concurrent calls for the same id are serialized, which makes a
    /// read-evaluate-write sequence inside `f` atomic with respect to other
    /// writers of that instance. Returns `None` if the instance does not exist.
    ///
    /// `f` may read definitions but must not call back into instance
    /// operations of the same store.
    fn with_instance_mut<T, F>(&self, id: &InstanceId, f: F) -> Result<Option<T>, RepositoryError>
    where
        F: FnOnce(&mut WorkflowInstance) -> T;
}
