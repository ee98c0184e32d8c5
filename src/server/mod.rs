//! HTTP API surface for the resolution engine.

mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::catalog::Catalog;
use crate::resolver::ResolutionEngine;
pub use state::AppState;

pub fn build_router(engine: Arc<ResolutionEngine>, catalog: Arc<Catalog>) -> Router {
    let state = Arc::new(AppState { engine, catalog });

    Router::new()
        .route("/api/resolve", get(handlers::resolve))
        .route("/api/label", get(handlers::label))
        .route("/api/cities", get(handlers::cities))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, engine: Arc<ResolutionEngine>, catalog: Arc<Catalog>) {
    let app = build_router(engine, catalog);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot bind to {}: {}", addr, e);
            std::process::exit(1);
        });

    eprintln!("  aviacode server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    });
}
