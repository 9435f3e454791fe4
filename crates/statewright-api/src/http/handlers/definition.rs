//! Workflow definition handlers for the REST API.
//!
//! Definitions are write-once: there is no update or delete endpoint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use statewright_types::workflow::{CreateDefinitionRequest, WorkflowDefinition};

use crate::http::error::AppError;
use crate::http::extractors::json::ApiJson;
use crate::http::response::{ApiResponse, RequestClock};
use crate::state::AppState;

/// Build the definition sub-router. Mounted at `/api/v1` by the main router.
pub fn definition_routes() -> Router<AppState> {
    Router::new()
        .route("/definitions", post(create_definition).get(list_definitions))
        .route("/definitions/{id}", get(get_definition))
}

/// POST /api/v1/definitions - Validate and store a new workflow definition.
pub async fn create_definition(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateDefinitionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<WorkflowDefinition>>), AppError> {
    let clock = RequestClock::start();

    let def = state.workflow_service.create_definition(body)?;

    let href = format!("/api/v1/definitions/{}", def.id);
    let resp = clock.success(def).with_link("self", &href);

    Ok((StatusCode::CREATED, Json(resp)))
}

/// GET /api/v1/definitions - List all workflow definitions.
pub async fn list_definitions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<WorkflowDefinition>>>, AppError> {
    let clock = RequestClock::start();

    let defs = state.workflow_service.list_definitions()?;

    Ok(Json(clock.success(defs).with_link("self", "/api/v1/definitions")))
}

/// GET /api/v1/definitions/{id} - Get a workflow definition by id.
pub async fn get_definition(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<WorkflowDefinition>>, AppError> {
    let clock = RequestClock::start();

    let def = state.workflow_service.get_definition(&id)?;

    let resp = clock
        .success(def)
        .with_link("self", &format!("/api/v1/definitions/{id}"))
        .with_link("instances", "/api/v1/instances");

    Ok(Json(resp))
}
