use super::protocol::*;
use super::service::DispatchService;
use super::types::{DispatchError, TaskId, TaskState, TaskStatus};

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::str::FromStr;
use std::sync::Arc;

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let status = match &self {
            DispatchError::EmptyHeavyKey | DispatchError::InvalidStatus(_) => {
                StatusCode::BAD_REQUEST
            }
            DispatchError::UnknownTask(_) => StatusCode::NOT_FOUND,
            DispatchError::InvalidTransition { .. } => StatusCode::CONFLICT,
        };

        if status == StatusCode::BAD_REQUEST {
            tracing::warn!("Rejected request: {}", self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// GET /status -- health check.
pub async fn handle_health() -> &'static str {
    "OK"
}

/// GET /status/:worker_id -- worker heartbeat. Idempotent, always succeeds.
pub async fn handle_heartbeat(
    Extension(service): Extension<Arc<DispatchService>>,
    Path(worker_id): Path<String>,
) -> StatusCode {
    service.heartbeat(&worker_id).await;
    StatusCode::OK
}

/// POST /tasks -- submit a batch of tasks, returning ids in input order.
pub async fn handle_submit_tasks(
    Extension(service): Extension<Arc<DispatchService>>,
    Json(batch): Json<Vec<AddTaskRequest>>,
) -> Json<SubmitTasksResponse> {
    let tasks = batch
        .into_iter()
        .map(|req| (req.task, req.heavy_key))
        .collect();

    let task_ids = service.submit_tasks(tasks).await;

    Json(SubmitTasksResponse { task_ids })
}

/// GET /tasks/fetch/:worker_id/:n -- deliver up to `n` tasks to a worker.
///
/// An empty pool is a normal outcome and yields empty lists, not an error.
pub async fn handle_fetch_tasks(
    Extension(service): Extension<Arc<DispatchService>>,
    Path((worker_id, n)): Path<(String, usize)>,
) -> Json<FetchTasksResponse> {
    let batch = service.fetch_batch(&worker_id, n).await;

    let mut task_ids = Vec::with_capacity(batch.len());
    let mut payloads = Vec::with_capacity(batch.len());
    for fetched in batch {
        task_ids.push(fetched.task_id);
        payloads.push((fetched.payload, fetched.heavy_blob));
    }

    Json(FetchTasksResponse { task_ids, payloads })
}

/// POST /tasks/status/:task_id -- apply a worker's terminal status report.
pub async fn handle_report_status(
    Extension(service): Extension<Arc<DispatchService>>,
    Path(task_id): Path<u64>,
    Json(req): Json<ReportStatusRequest>,
) -> Result<StatusCode, DispatchError> {
    let state = TaskState::from_str(&req.task_status.status)?;

    service
        .report_status(
            &req.worker_id,
            TaskId(task_id),
            state,
            req.task_status.info,
        )
        .await?;

    Ok(StatusCode::OK)
}

/// GET /tasks/status/:task_id -- query a task's current status.
pub async fn handle_get_status(
    Extension(service): Extension<Arc<DispatchService>>,
    Path(task_id): Path<u64>,
) -> Result<Json<TaskStatus>, DispatchError> {
    let task_id = TaskId(task_id);

    match service.query_status(task_id).await {
        Some(status) => Ok(Json(status)),
        None => Err(DispatchError::UnknownTask(task_id)),
    }
}

/// POST /heavy -- store a heavy payload blob under a producer-chosen key.
pub async fn handle_put_heavy(
    Extension(service): Extension<Arc<DispatchService>>,
    Json(req): Json<PutHeavyRequest>,
) -> Result<Json<PutHeavyResponse>, DispatchError> {
    let key = req.heavy_key.ok_or(DispatchError::EmptyHeavyKey)?;

    service.put_heavy(&key, req.task).await?;

    Ok(Json(PutHeavyResponse { heavy_key: key }))
}

/// Fallback for all unmatched routes.
pub async fn handle_not_found() -> (StatusCode, Json<NotFoundResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            message: "Not found".to_string(),
        }),
    )
}
