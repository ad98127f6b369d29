//! Axum server setup and router construction.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use axum::routing::post;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::api::{self, AppState};

/// Build the full axum router.
///
/// The router serves:
/// - the completion relay at `POST /v1/chat/completions`
/// - optional static files for the browser chat client
pub fn build_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    // Permissive CORS: the browser client may be served from another origin
    // (or straight off the filesystem during development).
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route(ares_core::COMPLETIONS_PATH, post(api::chat_completions))
        .with_state(state)
        .layer(cors);

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
}

/// Start the axum server and return the bound address.
///
/// Binding port 0 picks a free port, which is how the integration tests run
/// many servers side by side.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind(bind_addr).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}
