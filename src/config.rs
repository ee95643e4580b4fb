use std::net::SocketAddr;

/// Application-level constants
pub const APP_NAME: &str = "HealthVault";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default log filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("{}=info,tower_http=info", env!("CARGO_PKG_NAME"))
}

/// Address the API server binds to.
/// Overridable via HEALTHVAULT_ADDR (e.g. "0.0.0.0:8080").
pub fn bind_addr() -> SocketAddr {
    std::env::var("HEALTHVAULT_ADDR")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8787)))
}
