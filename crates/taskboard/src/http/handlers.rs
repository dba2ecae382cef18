use std::str::FromStr;

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use serde::Serialize;
use taskboard_app::{AsyncTaskService, DeleteOutcome, InsertOutcome, TaskStore};
use taskboard_core::{CreateTaskRequest, Task, TaskFilter, TaskId, UpdateTaskRequest};

use super::error::{ApiError, Operation};

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn list_tasks<S>(
    State(service): State<AsyncTaskService<S>>,
    query: Result<Query<TaskFilter>, QueryRejection>,
) -> Result<Json<Vec<Task>>, ApiError>
where
    S: TaskStore + Send + Sync + 'static,
{
    let Query(filter) = query.map_err(|rejection| ApiError::from_query_rejection(&rejection))?;
    service
        .list(filter)
        .await
        .map(Json)
        .map_err(|err| ApiError::from_service(Operation::List, err))
}

pub async fn create_task<S>(
    State(service): State<AsyncTaskService<S>>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<InsertOutcome>), ApiError>
where
    S: TaskStore + Send + Sync + 'static,
{
    let Json(request) = payload.map_err(|rejection| ApiError::from_rejection(&rejection))?;
    let outcome = service
        .create_from_request(request)
        .await
        .map_err(|err| ApiError::from_service(Operation::Create, err))?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

pub async fn update_task<S>(
    State(service): State<AsyncTaskService<S>>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Task>, ApiError>
where
    S: TaskStore + Send + Sync + 'static,
{
    let request = update_request(&headers, &body)?;
    let id = parse_id(&raw_id, Operation::Update)?;
    service
        .update_from_request(id, request)
        .await
        .map(Json)
        .map_err(|err| ApiError::from_service(Operation::Update, err))
}

pub async fn delete_task<S>(
    State(service): State<AsyncTaskService<S>>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeleteOutcome>, ApiError>
where
    S: TaskStore + Send + Sync + 'static,
{
    let id = parse_id(&raw_id, Operation::Delete)?;
    service
        .delete(id)
        .await
        .map(Json)
        .map_err(|err| ApiError::from_service(Operation::Delete, err))
}

/// Ids that cannot name a stored record are reported like missing ones.
fn parse_id(raw: &str, operation: Operation) -> Result<TaskId, ApiError> {
    TaskId::from_str(raw).map_err(|_| ApiError::not_found(operation))
}

/// A body-less update carries no fields; anything else must be JSON.
fn update_request(headers: &HeaderMap, body: &[u8]) -> Result<UpdateTaskRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(UpdateTaskRequest::default());
    }
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));
    if !is_json {
        return Err(ApiError::bad_request(
            "Expected request with `Content-Type: application/json`",
        ));
    }
    Json::<UpdateTaskRequest>::from_bytes(body)
        .map(|Json(request)| request)
        .map_err(|rejection| ApiError::from_rejection(&rejection))
}
