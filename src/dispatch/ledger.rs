//! Worker Assignment Ledger
//!
//! Tracks, per worker, the set of tasks it currently holds. Workers have no
//! registration step; the first assignment creates the entry. A task appears
//! in at most one worker's set at a time -- delivery inserts it, a status
//! report or the liveness sweep removes it.

use super::types::TaskId;

use std::collections::{HashMap, HashSet};

/// Mapping from worker id to the set of task ids it currently holds.
#[derive(Debug, Default)]
pub struct AssignmentLedger {
    held: HashMap<String, HashSet<TaskId>>,
}

impl AssignmentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a task to the worker's set, creating the set if absent.
    pub fn assign(&mut self, worker_id: &str, task_id: TaskId) {
        self.held
            .entry(worker_id.to_string())
            .or_default()
            .insert(task_id);
    }

    /// Removes a task from the worker's set if present.
    ///
    /// A no-op if absent: a status report may arrive for a task the ledger
    /// no longer associates with that worker, e.g. after reclamation.
    pub fn release(&mut self, worker_id: &str, task_id: TaskId) {
        if let Some(tasks) = self.held.get_mut(worker_id) {
            tasks.remove(&task_id);
            if tasks.is_empty() {
                self.held.remove(worker_id);
            }
        }
    }

    /// Removes and returns the worker's entire assignment set. Used by the
    /// liveness sweep. Returns an empty set if the worker holds nothing.
    pub fn take_all(&mut self, worker_id: &str) -> HashSet<TaskId> {
        self.held.remove(worker_id).unwrap_or_default()
    }

    /// The tasks a worker currently holds, without removing them.
    pub fn held_by(&self, worker_id: &str) -> Option<&HashSet<TaskId>> {
        self.held.get(worker_id)
    }

    /// Total number of tasks held across all workers.
    pub fn assigned_count(&self) -> usize {
        self.held.values().map(|tasks| tasks.len()).sum()
    }
}
