use thiserror::Error;

use crate::workflow::InstanceId;

/// Coarse classification of a [`WorkflowError`].
///
/// Callers (the HTTP layer, the CLI) decide presentation from the kind; the
/// variant carries the human-readable detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    ValidationFailed,
    AlreadyExists,
    NotFound,
    InvalidDefinition,
    InvalidState,
    TerminalState,
    ActionNotFound,
    ActionDisabled,
    IllegalTransition,
    Storage,
}

impl ErrorKind {
    /// Machine-readable code used in API error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::ValidationFailed => "VALIDATION_FAILED",
            ErrorKind::AlreadyExists => "ALREADY_EXISTS",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::InvalidDefinition => "INVALID_DEFINITION",
            ErrorKind::InvalidState => "INVALID_STATE",
            ErrorKind::TerminalState => "TERMINAL_STATE",
            ErrorKind::ActionNotFound => "ACTION_NOT_FOUND",
            ErrorKind::ActionDisabled => "ACTION_DISABLED",
            ErrorKind::IllegalTransition => "ILLEGAL_TRANSITION",
            ErrorKind::Storage => "STORAGE_ERROR",
        }
    }
}

/// Errors returned by the workflow engine.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("workflow definition is invalid: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    #[error("workflow definition with id '{0}' already exists")]
    AlreadyExists(String),

    #[error("workflow definition with id '{0}' not found")]
    DefinitionNotFound(String),

    #[error("workflow instance '{0}' not found")]
    InstanceNotFound(InstanceId),

    #[error("invalid workflow definition: {0}")]
    InvalidDefinition(String),

    #[error("invalid instance state: {0}")]
    InvalidState(String),

    #[error("instance is in final state '{state}'; no further actions can be executed")]
    TerminalState { state: String },

    #[error("action '{0}' is not part of the instance's definition")]
    ActionNotFound(String),

    #[error("action '{0}' is disabled")]
    ActionDisabled(String),

    #[error("action '{action}' cannot be executed from the current state '{state}'")]
    IllegalTransition { action: String, state: String },

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

impl WorkflowError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkflowError::InvalidInput(_) => ErrorKind::InvalidInput,
            WorkflowError::ValidationFailed(_) => ErrorKind::ValidationFailed,
            WorkflowError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            WorkflowError::DefinitionNotFound(_) | WorkflowError::InstanceNotFound(_) => {
                ErrorKind::NotFound
            }
            WorkflowError::InvalidDefinition(_) => ErrorKind::InvalidDefinition,
            WorkflowError::InvalidState(_) => ErrorKind::InvalidState,
            WorkflowError::TerminalState { .. } => ErrorKind::TerminalState,
            WorkflowError::ActionNotFound(_) => ErrorKind::ActionNotFound,
            WorkflowError::ActionDisabled(_) => ErrorKind::ActionDisabled,
            WorkflowError::IllegalTransition { .. } => ErrorKind::IllegalTransition,
            WorkflowError::Storage(_) => ErrorKind::Storage,
        }
    }
}

/// Errors from store operations (used by the trait definitions in statewright-core).
///
/// Absence is not an error: lookups return `Ok(None)`.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("store unavailable")]
    Unavailable,
}
