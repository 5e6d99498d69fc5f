//! Liveness Module Tests
//!
//! ## Test Scopes
//! - **HeartbeatTable**: Upsert semantics and the expiry boundary.
//! - **Sweep**: Reclamation of a stale worker's tasks through the dispatch
//!   service, and the untouched path for workers within the window.

#[cfg(test)]
mod tests {
    use crate::config::DispatchConfig;
    use crate::dispatch::service::DispatchService;
    use crate::dispatch::types::TaskState;
    use crate::liveness::monitor::HeartbeatTable;
    use std::time::{Duration, Instant};

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn test_config() -> DispatchConfig {
        DispatchConfig::new("127.0.0.1:0".parse().unwrap(), TIMEOUT)
    }

    // ============================================================
    // HEARTBEAT TABLE
    // ============================================================

    #[test]
    fn test_beat_upserts_the_worker() {
        let mut table = HeartbeatTable::new();
        let now = Instant::now();

        assert!(!table.is_tracked("w1"));
        table.beat("w1", now);
        assert!(table.is_tracked("w1"));
        assert_eq!(table.tracked_count(), 1);

        // Repeated beats do not duplicate the entry
        table.beat("w1", now + Duration::from_secs(1));
        assert_eq!(table.tracked_count(), 1);
    }

    #[test]
    fn test_expired_honors_the_timeout_boundary() {
        let mut table = HeartbeatTable::new();
        let start = Instant::now();
        table.beat("fresh", start);
        table.beat("stale", start);

        // Exactly at the deadline: not yet expired
        let expired = table.expired(start + TIMEOUT, TIMEOUT);
        assert!(expired.is_empty());

        // Past the deadline for 'stale' only
        table.beat("fresh", start + TIMEOUT);
        let expired = table.expired(start + TIMEOUT + Duration::from_millis(1), TIMEOUT);
        assert_eq!(expired, vec!["stale".to_string()]);
    }

    #[test]
    fn test_remove_untracks_the_worker() {
        let mut table = HeartbeatTable::new();
        table.beat("w1", Instant::now());
        table.remove("w1");
        assert!(!table.is_tracked("w1"));

        // Removing an unknown worker is a no-op
        table.remove("ghost");
    }

    // ============================================================
    // SWEEP
    // ============================================================

    #[tokio::test]
    async fn test_sweep_reclaims_stale_workers_tasks() {
        let service = DispatchService::new(&test_config());
        let ids = service
            .submit_tasks(vec![("a".to_string(), None), ("b".to_string(), None)])
            .await;
        service.fetch_batch("w1", 2).await;

        let reclaimed = service.sweep(Instant::now() + TIMEOUT + Duration::from_secs(1)).await;
        assert_eq!(reclaimed, 2);

        for id in ids {
            let status = service.query_status(id).await.unwrap();
            assert_eq!(status.status, TaskState::Lost);
            assert!(status.info.unwrap().contains("w1"));
        }

        // The worker holds nothing and is no longer tracked
        assert!(service.held_by("w1").await.is_none());
        assert!(!service.is_tracked("w1").await);
    }

    #[tokio::test]
    async fn test_sweep_leaves_fresh_workers_untouched() {
        let service = DispatchService::new(&test_config());
        let ids = service.submit_tasks(vec![("a".to_string(), None)]).await;
        service.fetch_batch("w1", 1).await;

        let reclaimed = service.sweep(Instant::now()).await;
        assert_eq!(reclaimed, 0);

        let status = service.query_status(ids[0]).await.unwrap();
        assert_eq!(status.status, TaskState::Running);
        assert!(service.is_tracked("w1").await);
    }

    #[tokio::test]
    async fn test_sweep_skips_completed_tasks() {
        // The worker finished everything before going silent, so the
        // sweep finds nothing to reclaim.
        let service = DispatchService::new(&test_config());
        let ids = service.submit_tasks(vec![("a".to_string(), None)]).await;
        service.fetch_batch("w1", 1).await;
        service
            .report_status("w1", ids[0], TaskState::Success, None)
            .await
            .unwrap();

        let reclaimed = service.sweep(Instant::now() + TIMEOUT + Duration::from_secs(1)).await;
        assert_eq!(reclaimed, 0);

        let status = service.query_status(ids[0]).await.unwrap();
        assert_eq!(status.status, TaskState::Success);
    }

    #[tokio::test]
    async fn test_heartbeat_after_sweep_re_registers() {
        let service = DispatchService::new(&test_config());
        service.heartbeat("w1").await;

        service.sweep(Instant::now() + TIMEOUT + Duration::from_secs(1)).await;
        assert!(!service.is_tracked("w1").await);

        service.heartbeat("w1").await;
        assert!(service.is_tracked("w1").await);
    }

    #[tokio::test]
    async fn test_late_report_after_reclamation_is_rejected() {
        // The worker comes back after its tasks were reclaimed; its report
        // hits a terminal status and must be rejected, while the ledger
        // release stays a harmless no-op.
        let service = DispatchService::new(&test_config());
        let ids = service.submit_tasks(vec![("a".to_string(), None)]).await;
        service.fetch_batch("w1", 1).await;
        service.sweep(Instant::now() + TIMEOUT + Duration::from_secs(1)).await;

        let err = service
            .report_status("w1", ids[0], TaskState::Success, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::dispatch::types::DispatchError::InvalidTransition {
                from: TaskState::Lost,
                ..
            }
        ));

        let status = service.query_status(ids[0]).await.unwrap();
        assert_eq!(status.status, TaskState::Lost);
    }
}
