//! Run the Ares relay server.
//!
//! Routing and upstream settings come from the environment; the flags only
//! control how the server itself is exposed.
//!
//! # Usage
//!
//! ```bash
//! ARES_UPSTREAM_URL=http://127.0.0.1:1234 \
//! ARES_MODEL_GENERAL=meta-llama-Meta-Llama-3.1-8B-Instruct \
//! ARES_MODEL_CODE=deepseek-coder-v2-lite-instruct \
//! cargo run -p ares-web -- --port 3000 --static-dir public
//! ```
//!
//! Then point the browser client (or the `ares` CLI) at the printed URL.
//! Log verbosity follows `RUST_LOG` (default `info`).

use ares_web::{ProxyConfig, WebConfig, spawn_proxy};
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Model-routing completion relay.
#[derive(Parser)]
#[command(name = "ares-web", about = "Model-routing completion relay for the Ares chat client")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to listen on.
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Directory with the static browser client to serve alongside the API.
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ProxyConfig::from_env();
    if config.upstream_url.is_none() {
        warn!("ARES_UPSTREAM_URL is not set; completion requests will fail until it is");
    }
    if config.models.general.is_none() {
        warn!("ARES_MODEL_GENERAL is not set; tasks without a dedicated model cannot be routed");
    }

    let web = WebConfig {
        bind_addr: (args.bind, args.port).into(),
        static_dir: args.static_dir,
    };
    let addr = spawn_proxy(config, web).await?;
    println!("Ares relay: http://{addr}");

    // The server runs on a background task; hold the process open until
    // the operator stops it.
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to listen for shutdown signal: {e}"))?;
    Ok(())
}
