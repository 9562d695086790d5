//! HTTP Client with Connection Pooling
//!
//! A single blocking client shared across the process, with conservative
//! timeouts so a hung endpoint cannot stall the program indefinitely.

use reqwest::blocking::Client;
use std::sync::OnceLock;
use std::time::Duration;

use crate::error::{BalanceError, BalanceResult};

/// Global HTTP client instance - lazy initialized
static GLOBAL_CLIENT: OnceLock<Client> = OnceLock::new();

fn build_client() -> BalanceResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(10))
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(5)
        .tcp_keepalive(Duration::from_secs(60))
        .tcp_nodelay(true)
        .user_agent("chainbalance/0.1")
        .build()
        .map_err(|e| BalanceError::network_error(format!("Failed to create HTTP client: {}", e)))
}

/// Get the shared HTTP client
pub fn client() -> &'static Client {
    GLOBAL_CLIENT.get_or_init(|| {
        // Client construction only fails if TLS initialization fails, which
        // is a system-level issue the program cannot work around.
        build_client().expect("HTTP client initialization failed - check TLS configuration")
    })
}

/// Make a GET request with the shared client
pub fn get(url: &str) -> BalanceResult<reqwest::blocking::Response> {
    client().get(url).send().map_err(BalanceError::from)
}
