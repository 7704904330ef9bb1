//! `/api/tasks` route handlers.
//!
//! Store calls are blocking, so each handler checks out a pooled connection
//! on the blocking thread pool.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tokio::task;
use tracing::instrument;

use taskdeck_core::{Task, TaskCreateParams, TaskUpdateParams};
use taskdeck_store::{Connection, ConnectionPool, TaskService};

use crate::errors::ApiError;
use crate::server::AppState;

/// Run `f` against a pooled connection on the blocking pool.
async fn with_conn<T, F>(pool: &ConnectionPool, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Connection) -> taskdeck_store::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    task::spawn_blocking(move || {
        let conn = pool.get()?;
        f(&conn)
    })
    .await
    .map_err(|e| ApiError::Internal {
        message: format!("store task failed: {e}"),
    })?
    .map_err(ApiError::from)
}

/// GET /api/tasks
#[instrument(skip(state))]
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = with_conn(&state.pool, TaskService::list_tasks).await?;
    Ok(Json(tasks))
}

/// POST /api/tasks
#[instrument(skip_all)]
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskCreateParams>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(params) = payload?;
    let task = with_conn(&state.pool, move |conn| {
        TaskService::create_task(conn, &params)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /api/tasks/{id}
///
/// Responds `200 null` when no task has this ID.
#[instrument(skip_all, fields(task_id = %id))]
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TaskUpdateParams>, JsonRejection>,
) -> Result<Json<Option<Task>>, ApiError> {
    let Json(updates) = payload?;
    let task = with_conn(&state.pool, move |conn| {
        TaskService::update_task(conn, &id, &updates)
    })
    .await?;
    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
#[instrument(skip_all, fields(task_id = %id))]
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    with_conn(&state.pool, move |conn| TaskService::delete_task(conn, &id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
