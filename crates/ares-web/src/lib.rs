//! Model-routing completion relay for the Ares chat client.
//!
//! `ares-web` exposes one OpenAI-style endpoint, `POST /v1/chat/completions`,
//! and keeps the model table and upstream address server-side so the browser
//! client never sees them.
//!
//! # Quick start
//!
//! ```ignore
//! use ares_web::{ProxyConfig, WebConfig, spawn_proxy};
//!
//! let config = ProxyConfig::from_env();
//! let addr = spawn_proxy(config, WebConfig::default()).await?;
//! println!("Ares relay: http://{addr}");
//! ```
//!
//! # Architecture
//!
//! ```text
//! client ──POST /v1/chat/completions──▶ handler ──▶ classify last user message
//!                                          │              │
//!                                          │         ModelMap lookup
//!                                          │              │
//!                                          │   POST {upstream}/v1/models/load   (best-effort)
//!                                          │              │
//!                                          └─▶ POST {upstream}/v1/chat/completions
//!                                                         │
//! client ◀──────── upstream status + body, verbatim ──────┘
//! ```
//!
//! Each request is handled independently; the only shared state is the
//! immutable [`AppState`] built once from [`ProxyConfig`].

mod api;
pub mod config;
pub mod prompt;
mod server;

pub use api::AppState;
pub use config::ProxyConfig;

use std::net::SocketAddr;
use std::path::PathBuf;

/// Configuration for the web server shell.
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:3000`.
    pub bind_addr: SocketAddr,
    /// Directory with the static browser client, served as a fallback under
    /// the API routes. If `None`, only the API is served.
    pub static_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: None,
        }
    }
}

/// Spawn the relay server on a Tokio task.
///
/// Returns the bound address (binding port 0 picks a free one). Fails only
/// when the upstream HTTP client cannot be built; missing configuration
/// values are not startup errors; they surface per request.
///
/// The server runs until the Tokio runtime shuts down.
pub async fn spawn_proxy(config: ProxyConfig, web: WebConfig) -> Result<SocketAddr, String> {
    let state = AppState::from_config(&config)?;
    let router = server::build_router(state, web.static_dir);
    Ok(server::start_server(router, web.bind_addr).await)
}
