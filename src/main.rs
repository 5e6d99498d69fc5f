use axum::{
    Router,
    extract::Extension,
    routing::{get, post},
};
use hq_server::config::{DEFAULT_HEARTBEAT_TIMEOUT, DispatchConfig};
use hq_server::dispatch::handlers::{
    handle_fetch_tasks, handle_get_status, handle_health, handle_heartbeat, handle_not_found,
    handle_put_heavy, handle_report_status, handle_submit_tasks,
};
use hq_server::dispatch::service::DispatchService;
use hq_server::liveness::monitor::run_sweeper;
use std::net::SocketAddr;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!(
            "Usage: {} --bind <addr:port> [--heartbeat-timeout <secs>]",
            args[0]
        );
        eprintln!("Example: {} --bind 127.0.0.1:3000", args[0]);
        eprintln!(
            "Example: {} --bind 127.0.0.1:3000 --heartbeat-timeout 10",
            args[0]
        );

        std::process::exit(1);
    }

    let mut bind_addr: Option<SocketAddr> = None;
    let mut heartbeat_timeout = DEFAULT_HEARTBEAT_TIMEOUT;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = Some(args[i + 1].parse()?);
                i += 2;
            }
            "--heartbeat-timeout" => {
                heartbeat_timeout = Duration::from_secs(args[i + 1].parse()?);
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let bind_addr = bind_addr.expect("--bind is required");
    let config = DispatchConfig::new(bind_addr, heartbeat_timeout);

    tracing::info!("hq-server starting on {}", config.bind);
    tracing::info!("Heartbeat timeout: {:?}", config.heartbeat_timeout);

    // 1. Dispatch core (registry + ledger + heavy store + heartbeats):
    let service = DispatchService::new(&config);

    // 2. Liveness sweeper:
    let sweep_service = service.clone();
    let sweep_interval = config.sweep_interval;
    tokio::spawn(async move {
        run_sweeper(sweep_service, sweep_interval).await;
    });

    // 3. Stats reporter:
    let stats_service = service.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(5));

        loop {
            interval.tick().await;
            let ((queued, running, success, error, lost), workers) = stats_service.stats().await;
            tracing::info!(
                "Tasks: {} queued, {} running, {} success, {} error, {} lost ({} worker(s) tracked)",
                queued,
                running,
                success,
                error,
                lost,
                workers
            );
        }
    });

    // 4. HTTP Router:
    let app = Router::new()
        .route("/status", get(handle_health))
        .route("/status/:worker_id", get(handle_heartbeat))
        .route("/tasks", post(handle_submit_tasks))
        .route("/tasks/fetch/:worker_id/:n", get(handle_fetch_tasks))
        .route(
            "/tasks/status/:task_id",
            get(handle_get_status).post(handle_report_status),
        )
        .route("/heavy", post(handle_put_heavy))
        .fallback(handle_not_found)
        .layer(Extension(service));

    // 5. Start HTTP server:
    tracing::info!("hq-server listening on {}", config.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
