//! Heartbeat Table and Sweep Loop
//!
//! Workers signal liveness by pinging the server; the table records the most
//! recent signal per worker. The sweep loop periodically asks the dispatch
//! service to reclaim tasks from every worker whose last heartbeat is older
//! than the configured timeout.

use crate::dispatch::service::DispatchService;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Per-worker record of the most recent liveness signal.
///
/// There is no registration step: the first heartbeat (or the first fetch,
/// which also touches the table) creates the entry. The sweep removes the
/// entry of a timed-out worker; a later heartbeat re-creates it.
#[derive(Debug, Default)]
pub struct HeartbeatTable {
    last_seen: HashMap<String, Instant>,
}

impl HeartbeatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `now` as the worker's most recent heartbeat. Always succeeds.
    pub fn beat(&mut self, worker_id: &str, now: Instant) {
        self.last_seen.insert(worker_id.to_string(), now);
    }

    /// Workers whose last heartbeat is older than `timeout` as of `now`.
    /// Workers within the window are not reported.
    pub fn expired(&self, now: Instant, timeout: Duration) -> Vec<String> {
        self.last_seen
            .iter()
            .filter(|(_, &last)| now.duration_since(last) > timeout)
            .map(|(worker_id, _)| worker_id.clone())
            .collect()
    }

    /// Drops a worker's record. Called by the sweep after reclamation.
    pub fn remove(&mut self, worker_id: &str) {
        self.last_seen.remove(worker_id);
    }

    /// Whether the table currently tracks this worker.
    pub fn is_tracked(&self, worker_id: &str) -> bool {
        self.last_seen.contains_key(worker_id)
    }

    /// Number of tracked workers.
    pub fn tracked_count(&self) -> usize {
        self.last_seen.len()
    }
}

/// Runs the reclamation sweep forever on a fixed period.
///
/// One sweep at a time: each iteration awaits sweep completion before the
/// next tick, so sweeps never overlap. The sweep itself serializes against
/// client operations through the dispatch service's lock.
pub async fn run_sweeper(service: Arc<DispatchService>, period: Duration) {
    tracing::info!("Liveness sweeper started (period {:?})", period);

    let mut interval = tokio::time::interval(period);
    // The first tick fires immediately; skip it.
    interval.tick().await;

    loop {
        interval.tick().await;

        let reclaimed = service.sweep(Instant::now()).await;
        if reclaimed > 0 {
            tracing::info!("Sweep reclaimed {} task(s)", reclaimed);
        }
    }
}
