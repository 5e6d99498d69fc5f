//! Dispatch Service Facade
//!
//! The single entry point for all state-mutating operations: submit, fetch,
//! report, heartbeat, heavy put, and the liveness sweep. Registry, ledger,
//! heavy store, and heartbeat table live together behind one lock so every
//! operation is an atomic, serializable step -- no caller can observe a task
//! removed from the pool but not yet recorded in the ledger.

use super::ledger::AssignmentLedger;
use super::registry::TaskRegistry;
use super::types::{DispatchError, TaskId, TaskState, TaskStatus};
use crate::config::DispatchConfig;
use crate::heavy::store::HeavyStore;
use crate::liveness::monitor::HeartbeatTable;

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// All mutable server state, guarded as one unit.
#[derive(Debug, Default)]
struct DispatchState {
    registry: TaskRegistry,
    ledger: AssignmentLedger,
    heavy: HeavyStore,
    heartbeats: HeartbeatTable,
}

/// A task as delivered to a worker: id, primary payload, and the resolved
/// heavy blob (`None` when the task carries no key or the key is not yet
/// populated).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedTask {
    pub task_id: TaskId,
    pub payload: String,
    pub heavy_blob: Option<String>,
}

/// The facade exposing the dispatch core to the HTTP layer and the sweeper.
pub struct DispatchService {
    state: RwLock<DispatchState>,
    heartbeat_timeout: Duration,
}

impl DispatchService {
    pub fn new(config: &DispatchConfig) -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(DispatchState::default()),
            heartbeat_timeout: config.heartbeat_timeout,
        })
    }

    /// Submits a batch of tasks, returning their ids in input order.
    pub async fn submit_tasks(&self, tasks: Vec<(String, Option<String>)>) -> Vec<TaskId> {
        let mut state = self.state.write().await;

        tasks
            .into_iter()
            .map(|(payload, heavy_key)| state.registry.submit(payload, heavy_key))
            .collect()
    }

    /// Delivers up to `count` queued tasks to a worker.
    ///
    /// Each delivered task is recorded in the worker's assignment set and
    /// marked `running` before the heavy blob is resolved. An empty pool
    /// yields an empty batch, never an error, and exhaustion mid-batch
    /// returns whatever was collected.
    ///
    /// Fetching also touches the worker's heartbeat record, so a worker that
    /// pulls tasks but never pings is still tracked by the sweep.
    pub async fn fetch_batch(&self, worker_id: &str, count: usize) -> Vec<FetchedTask> {
        let mut state = self.state.write().await;

        state.heartbeats.beat(worker_id, Instant::now());

        let mut batch = Vec::new();
        for _ in 0..count {
            let Some(task_id) = state.registry.take_next() else {
                break;
            };

            // Pooled ids always have a record.
            let Some(task) = state.registry.get_task(task_id) else {
                tracing::error!("Task {} was pooled without a record", task_id);
                continue;
            };
            let (payload, heavy_key) = (task.payload.clone(), task.heavy_key.clone());

            state.ledger.assign(worker_id, task_id);
            state.registry.mark_running(task_id);

            let heavy_blob = heavy_key
                .as_deref()
                .and_then(|key| state.heavy.get(key))
                .map(str::to_string);

            tracing::debug!("Delivering task {} to worker '{}'", task_id, worker_id);

            batch.push(FetchedTask {
                task_id,
                payload,
                heavy_blob,
            });
        }

        if !batch.is_empty() {
            tracing::info!(
                "Delivered {} task(s) to worker '{}'",
                batch.len(),
                worker_id
            );
        }

        batch
    }

    /// Applies a worker's terminal status report for a task.
    ///
    /// Only `success`, `error`, and `lost` are accepted, and only for a
    /// task currently `running`; a rejected report changes no state. On
    /// success the assignment is released, a no-op when the ledger no
    /// longer associates the task with this worker (e.g. after
    /// reclamation).
    pub async fn report_status(
        &self,
        worker_id: &str,
        task_id: TaskId,
        state_tag: TaskState,
        info: Option<String>,
    ) -> Result<(), DispatchError> {
        if !state_tag.is_terminal() {
            return Err(DispatchError::InvalidStatus(state_tag.to_string()));
        }

        let mut state = self.state.write().await;

        state.registry.set_status(task_id, state_tag, info)?;
        state.ledger.release(worker_id, task_id);

        Ok(())
    }

    /// Records a liveness signal for a worker. Idempotent, always succeeds.
    pub async fn heartbeat(&self, worker_id: &str) {
        let mut state = self.state.write().await;
        state.heartbeats.beat(worker_id, Instant::now());
    }

    /// Looks up a task's current status. `None` means the id was never
    /// issued.
    pub async fn query_status(&self, task_id: TaskId) -> Option<TaskStatus> {
        let state = self.state.read().await;
        state.registry.get_status(task_id).cloned()
    }

    /// Stores a heavy payload blob. Empty keys are rejected.
    pub async fn put_heavy(&self, key: &str, blob: String) -> Result<(), DispatchError> {
        let mut state = self.state.write().await;
        state.heavy.put(key, blob)
    }

    /// Reclaims tasks from every worker whose last heartbeat is older than
    /// the configured timeout as of `now`.
    ///
    /// For each such worker, atomically: drop its heartbeat record, take its
    /// entire assignment set, and mark each taken task `lost`. Returns the
    /// number of reclaimed tasks. Workers within the timeout are untouched.
    pub async fn sweep(&self, now: Instant) -> usize {
        let mut state = self.state.write().await;

        let mut reclaimed = 0;
        for worker_id in state.heartbeats.expired(now, self.heartbeat_timeout) {
            state.heartbeats.remove(&worker_id);

            let tasks = state.ledger.take_all(&worker_id);
            if !tasks.is_empty() {
                tracing::info!(
                    "Worker '{}' missed its heartbeat deadline, reclaiming {} task(s)",
                    worker_id,
                    tasks.len()
                );
            }

            for task_id in tasks {
                // Reclaimed tasks are by construction running, so the
                // transition cannot be rejected.
                if let Err(e) = state.registry.set_status(
                    task_id,
                    TaskState::Lost,
                    Some(format!("worker '{}' timed out", worker_id)),
                ) {
                    tracing::error!("Failed to mark task {} lost: {}", task_id, e);
                    continue;
                }
                reclaimed += 1;
            }
        }

        reclaimed
    }

    /// Snapshot of task counts per state (queued, running, success, error,
    /// lost) plus the number of tracked workers. Used by the stats reporter.
    pub async fn stats(&self) -> ((usize, usize, usize, usize, usize), usize) {
        let state = self.state.read().await;
        (
            state.registry.status_counts(),
            state.heartbeats.tracked_count(),
        )
    }

    #[cfg(test)]
    pub(crate) async fn held_by(&self, worker_id: &str) -> Option<std::collections::HashSet<TaskId>> {
        let state = self.state.read().await;
        state.ledger.held_by(worker_id).cloned()
    }

    #[cfg(test)]
    pub(crate) async fn is_tracked(&self, worker_id: &str) -> bool {
        let state = self.state.read().await;
        state.heartbeats.is_tracked(worker_id)
    }
}
