//! Workflow instance handlers for the REST API.
//!
//! Starting instances, inspecting them, and executing actions on them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use statewright_types::workflow::{
    Action, ExecuteActionRequest, InstanceId, StartInstanceRequest, WorkflowInstance,
};

use crate::http::error::AppError;
use crate::http::extractors::json::ApiJson;
use crate::http::response::{ApiResponse, RequestClock};
use crate::state::AppState;

/// Build the instance sub-router. Mounted at `/api/v1` by the main router.
pub fn instance_routes() -> Router<AppState> {
    Router::new()
        .route("/instances", post(start_instance).get(list_instances))
        .route("/instances/{id}", get(get_instance))
        .route("/instances/{id}/actions", get(list_available_actions))
        .route("/instances/{id}/execute", post(execute_action))
}

fn parse_instance_id(raw: &str) -> Result<InstanceId, AppError> {
    raw.parse()
        .map_err(|_| AppError::Validation(format!("'{raw}' is not a valid instance id")))
}

fn instance_links(
    resp: ApiResponse<WorkflowInstance>,
    id: &InstanceId,
) -> ApiResponse<WorkflowInstance> {
    resp.with_link("self", &format!("/api/v1/instances/{id}"))
        .with_link("actions", &format!("/api/v1/instances/{id}/actions"))
        .with_link("execute", &format!("/api/v1/instances/{id}/execute"))
}

/// POST /api/v1/instances - Start an instance of a definition.
pub async fn start_instance(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<StartInstanceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<WorkflowInstance>>), AppError> {
    let clock = RequestClock::start();

    let instance = state.workflow_service.start_instance(&body.definition_id)?;

    let id = instance.id;
    let resp = instance_links(clock.success(instance), &id).with_link(
        "definition",
        &format!("/api/v1/definitions/{}", body.definition_id),
    );

    Ok((StatusCode::CREATED, Json(resp)))
}

/// GET /api/v1/instances - List all instances.
pub async fn list_instances(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<WorkflowInstance>>>, AppError> {
    let clock = RequestClock::start();

    let instances = state.workflow_service.list_instances()?;

    Ok(Json(clock.success(instances).with_link("self", "/api/v1/instances")))
}

/// GET /api/v1/instances/{id} - Get an instance with its history.
pub async fn get_instance(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<WorkflowInstance>>, AppError> {
    let clock = RequestClock::start();
    let id = parse_instance_id(&raw_id)?;

    let instance = state.workflow_service.get_instance(&id)?;

    Ok(Json(instance_links(clock.success(instance), &id)))
}

/// GET /api/v1/instances/{id}/actions - Actions that can fire from the current state.
pub async fn list_available_actions(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Action>>>, AppError> {
    let clock = RequestClock::start();
    let id = parse_instance_id(&raw_id)?;

    let actions = state.workflow_service.available_actions(&id)?;

    Ok(Json(
        clock
            .success(actions)
            .with_link("instance", &format!("/api/v1/instances/{id}")),
    ))
}

/// POST /api/v1/instances/{id}/execute - Execute an action on an instance.
pub async fn execute_action(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ApiJson(body): ApiJson<ExecuteActionRequest>,
) -> Result<Json<ApiResponse<WorkflowInstance>>, AppError> {
    let clock = RequestClock::start();
    let id = parse_instance_id(&raw_id)?;

    let instance = state.workflow_service.execute_action(&id, &body.action_id)?;

    Ok(Json(instance_links(clock.success(instance), &id)))
}
