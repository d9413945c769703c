mod client_registry;
mod delivery;
mod ws_handler;

pub use client_registry::*;
pub use delivery::*;
pub use ws_handler::*;

use axum::Router;
use axum::routing::get;

/// Builds the HTTP surface: a static health probe and the WebSocket upgrade.
pub fn router(registry: ClientRegistry) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/ws", get(ws_handler))
        .with_state(registry)
}

async fn health() -> &'static str {
    "Backend server is running"
}
