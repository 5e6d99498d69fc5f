use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for a task within the server process.
///
/// Wrapper around a sequential counter value. Ids start at 0, strictly
/// increase in issuance order, and are never reused for the lifetime of the
/// process.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The definition of a unit of work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// The primary payload, immutable after submission.
    pub payload: String,
    /// Optional key into the heavy-payload store, resolved at delivery time.
    /// The referenced blob may not exist (yet); that is not an error.
    pub heavy_key: Option<String>,
}

/// Represents the lifecycle state of a task.
///
/// `Queued` and `Running` are driven by submission and delivery only;
/// workers may only report the three terminal states. No transition is
/// defined out of a terminal state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// Submitted, waiting in the pool.
    Queued,
    /// Delivered to exactly one worker.
    Running,
    /// Worker reported successful completion.
    Success,
    /// Worker reported a failure.
    Error,
    /// Reclaimed by the liveness sweep after the holder missed its
    /// heartbeat deadline.
    Lost,
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Success | TaskState::Error | TaskState::Lost)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskState::Queued => "queued",
            TaskState::Running => "running",
            TaskState::Success => "success",
            TaskState::Error => "error",
            TaskState::Lost => "lost",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for TaskState {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(TaskState::Queued),
            "running" => Ok(TaskState::Running),
            "success" => Ok(TaskState::Success),
            "error" => Ok(TaskState::Error),
            "lost" => Ok(TaskState::Lost),
            other => Err(DispatchError::InvalidStatus(other.to_string())),
        }
    }
}

/// The current status record of a task: the state tag plus an optional
/// free-form info string (error detail, log pointer). Exactly one record
/// exists per task; it is replaced, not appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskStatus {
    pub status: TaskState,
    pub info: Option<String>,
}

impl TaskStatus {
    pub fn queued() -> Self {
        Self {
            status: TaskState::Queued,
            info: None,
        }
    }
}

/// Errors surfaced by the dispatch core.
///
/// Validation errors reject the request with no state change; not-found and
/// invalid-transition conditions are scoped to a single operation and are
/// never fatal to the process.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DispatchError {
    #[error("heavy key required, can't be empty")]
    EmptyHeavyKey,
    #[error("no task with id {0}")]
    UnknownTask(TaskId),
    #[error("invalid task status: {0}")]
    InvalidStatus(String),
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidTransition {
        task_id: TaskId,
        from: TaskState,
        to: TaskState,
    },
}
