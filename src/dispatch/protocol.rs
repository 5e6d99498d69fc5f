//! Dispatch Network Protocol
//!
//! Defines the HTTP API contracts (request/response DTOs) between producers,
//! workers, and the HQ server. Field names are camelCase on the wire, and
//! the fetch response carries ids and `[payload, heavyBlob]` pairs as two
//! positionally-zipped lists, matching what the worker SDK consumes.

use super::types::TaskId;

use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Health check.
pub const ENDPOINT_HEALTH: &str = "/status";
/// Worker heartbeat (`/status/:worker_id`).
pub const ENDPOINT_HEARTBEAT: &str = "/status/:worker_id";
/// Producer batch submission.
pub const ENDPOINT_SUBMIT: &str = "/tasks";
/// Worker batch fetch (`/tasks/fetch/:worker_id/:n`).
pub const ENDPOINT_FETCH: &str = "/tasks/fetch/:worker_id/:n";
/// Status report (POST) and status query (GET) for one task.
pub const ENDPOINT_TASK_STATUS: &str = "/tasks/status/:task_id";
/// Heavy payload submission.
pub const ENDPOINT_HEAVY: &str = "/heavy";

// --- Data Transfer Objects ---

/// One element of a producer's submission batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTaskRequest {
    /// The primary payload.
    pub task: String,
    /// Optional pointer into the heavy-payload store.
    #[serde(rename = "heavyKey")]
    pub heavy_key: Option<String>,
}

/// Response to a submission batch: one id per input element, same order.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitTasksResponse {
    #[serde(rename = "taskIds")]
    pub task_ids: Vec<TaskId>,
}

/// Response to a fetch: `task_ids[i]` identifies `payloads[i]`, which is the
/// `[payload, heavyBlob|null]` pair for that task. Both lists are empty when
/// no tasks are available.
#[derive(Debug, Serialize, Deserialize)]
pub struct FetchTasksResponse {
    #[serde(rename = "taskIds")]
    pub task_ids: Vec<TaskId>,
    pub payloads: Vec<(String, Option<String>)>,
}

/// A worker's status report for one task.
///
/// `status` travels as a plain string and is validated server-side so that
/// an unknown value is rejected naming the offending value, instead of
/// failing opaquely during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportStatusRequest {
    #[serde(rename = "workerId")]
    pub worker_id: String,
    #[serde(rename = "taskStatus")]
    pub task_status: TaskStatusBody,
}

/// The status tag plus optional free-form info (error detail, log pointer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatusBody {
    pub status: String,
    pub info: Option<String>,
}

/// Producer request storing a heavy blob. The blob travels in the `task`
/// field, mirroring the submission shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutHeavyRequest {
    pub task: String,
    #[serde(rename = "heavyKey")]
    pub heavy_key: Option<String>,
}

/// Acknowledgement of a stored heavy blob.
#[derive(Debug, Serialize, Deserialize)]
pub struct PutHeavyResponse {
    #[serde(rename = "heavyKey")]
    pub heavy_key: String,
}

/// Standard error body for rejected requests.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of the fallback route for unmatched paths.
#[derive(Debug, Serialize, Deserialize)]
pub struct NotFoundResponse {
    pub message: String,
}
