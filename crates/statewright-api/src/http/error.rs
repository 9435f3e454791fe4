//! Application error type mapping to HTTP status codes and envelope format.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use statewright_types::error::{ErrorKind, WorkflowError};

use crate::http::response::{ApiErrorDetail, ApiResponse};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Engine errors.
    Workflow(WorkflowError),
    /// Malformed request (bad path parameter, unparseable body).
    Validation(String),
}

impl From<WorkflowError> for AppError {
    fn from(e: WorkflowError) -> Self {
        AppError::Workflow(e)
    }
}

/// HTTP status for an engine error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput | ErrorKind::ValidationFailed | ErrorKind::ActionNotFound => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::AlreadyExists
        | ErrorKind::TerminalState
        | ErrorKind::ActionDisabled
        | ErrorKind::IllegalTransition
        | ErrorKind::InvalidState => StatusCode::CONFLICT,
        ErrorKind::InvalidDefinition | ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, errors) = match &self {
            AppError::Workflow(WorkflowError::ValidationFailed(issues)) => {
                let code = ErrorKind::ValidationFailed.code();
                (
                    StatusCode::BAD_REQUEST,
                    issues
                        .iter()
                        .map(|issue| ApiErrorDetail::new(code, issue.clone()))
                        .collect(),
                )
            }
            AppError::Workflow(e) => {
                let kind = e.kind();
                if status_for(kind).is_server_error() {
                    tracing::error!(error = %e, "workflow engine error");
                }
                (status_for(kind), vec![ApiErrorDetail::new(kind.code(), e.to_string())])
            }
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                vec![ApiErrorDetail::new("INVALID_INPUT", msg.clone())],
            ),
        };

        let body = ApiResponse::failure(errors, uuid::Uuid::now_v7().to_string());
        (status, Json(body)).into_response()
    }
}
