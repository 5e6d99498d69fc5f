//! Task Registry
//!
//! Owns task identity, the queued pool, and the authoritative status state
//! machine. The registry knows nothing about workers; assignment bookkeeping
//! lives in the [`ledger`](super::ledger).
//!
//! Tasks and their status records live for the life of the process. There is
//! no expiry or garbage collection of completed tasks.

use super::types::{DispatchError, Task, TaskId, TaskState, TaskStatus};

use std::collections::{HashMap, VecDeque};

/// A task together with its current status record.
#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub task: Task,
    pub status: TaskStatus,
}

/// The central store of all tasks ever submitted to this process.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    /// Next id to hand out. Monotonically increasing, never reused.
    next_id: u64,
    /// Every task ever submitted, keyed by id.
    records: HashMap<TaskId, TaskRecord>,
    /// Ids of tasks waiting for delivery, in arrival order.
    pool: VecDeque<TaskId>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next sequential id, stores the task in the queued pool,
    /// and sets its status to `queued`. Never fails.
    pub fn submit(&mut self, payload: String, heavy_key: Option<String>) -> TaskId {
        let task_id = TaskId(self.next_id);
        self.next_id += 1;

        self.records.insert(
            task_id,
            TaskRecord {
                task: Task { payload, heavy_key },
                status: TaskStatus::queued(),
            },
        );
        self.pool.push_back(task_id);

        tracing::info!("Received task {}", task_id);

        task_id
    }

    /// Removes and returns one task from the queued pool, or `None` if the
    /// pool is empty. Arrival order is used but not contractual.
    pub fn take_next(&mut self) -> Option<TaskId> {
        self.pool.pop_front()
    }

    /// Marks a delivered task as `running`. Delivery is the only path into
    /// this state; worker reports cannot set it.
    pub(crate) fn mark_running(&mut self, task_id: TaskId) {
        if let Some(record) = self.records.get_mut(&task_id) {
            record.status = TaskStatus {
                status: TaskState::Running,
                info: None,
            };
        }
    }

    /// Replaces a task's status record with a terminal state.
    ///
    /// Rejects transitions into `queued` or `running` (those are driven by
    /// submission and delivery only) and terminal transitions from anything
    /// but `running`. Re-reporting an already-terminal task is rejected, not
    /// silently accepted.
    pub fn set_status(
        &mut self,
        task_id: TaskId,
        state: TaskState,
        info: Option<String>,
    ) -> Result<(), DispatchError> {
        if !state.is_terminal() {
            return Err(DispatchError::InvalidStatus(state.to_string()));
        }

        let record = self
            .records
            .get_mut(&task_id)
            .ok_or(DispatchError::UnknownTask(task_id))?;

        if record.status.status != TaskState::Running {
            return Err(DispatchError::InvalidTransition {
                task_id,
                from: record.status.status,
                to: state,
            });
        }

        record.status = TaskStatus {
            status: state,
            info,
        };

        tracing::info!("Task {} moved to {}", task_id, state);

        Ok(())
    }

    /// Looks up a task's current status. `None` means the id was never
    /// issued.
    pub fn get_status(&self, task_id: TaskId) -> Option<&TaskStatus> {
        self.records.get(&task_id).map(|record| &record.status)
    }

    /// Looks up a task's immutable definition.
    pub fn get_task(&self, task_id: TaskId) -> Option<&Task> {
        self.records.get(&task_id).map(|record| &record.task)
    }

    /// Number of tasks currently waiting in the pool.
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    /// Counts of tasks per lifecycle state, in declaration order
    /// (queued, running, success, error, lost). Used by the stats reporter.
    pub fn status_counts(&self) -> (usize, usize, usize, usize, usize) {
        let mut queued = 0;
        let mut running = 0;
        let mut success = 0;
        let mut error = 0;
        let mut lost = 0;

        for record in self.records.values() {
            match record.status.status {
                TaskState::Queued => queued += 1,
                TaskState::Running => running += 1,
                TaskState::Success => success += 1,
                TaskState::Error => error += 1,
                TaskState::Lost => lost += 1,
            }
        }

        (queued, running, success, error, lost)
    }
}
