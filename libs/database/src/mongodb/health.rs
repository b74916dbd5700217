use mongodb::Client;
use std::time::Instant;

/// Result of a detailed MongoDB health probe
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    /// Driver error when unhealthy
    pub message: Option<String>,
    pub response_time_ms: u64,
}

/// Whether the server answers a lightweight command.
pub async fn check_health(client: &Client) -> bool {
    client.list_database_names().await.is_ok()
}

/// Like [`check_health`], with latency and the failure reason.
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();
    let outcome = client.list_database_names().await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    HealthStatus {
        healthy: outcome.is_ok(),
        message: outcome.err().map(|e| e.to_string()),
        response_time_ms,
    }
}
