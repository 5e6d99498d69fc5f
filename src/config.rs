use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct DispatchConfig {
    // Address to bind the HTTP server to.
    pub bind: SocketAddr,
    // How long the server waits for a heartbeat before considering a worker
    // dead and reclaiming its tasks.
    pub heartbeat_timeout: Duration,
    // Interval at which the reclamation sweep runs.
    pub sweep_interval: Duration,
}

impl DispatchConfig {
    pub fn new(bind: SocketAddr, heartbeat_timeout: Duration) -> Self {
        Self {
            bind,
            heartbeat_timeout,
            // The sweep runs on a fixed period equal to the timeout.
            sweep_interval: heartbeat_timeout,
        }
    }
}
