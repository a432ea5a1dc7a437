mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::error::Result;
use crate::locate::Locator;

pub fn build_router(locator: Locator) -> Router {
    let state = Arc::new(AppState { locator });

    Router::new()
        .route("/api/locate", get(handlers::locate))
        .route("/api/intersect", get(handlers::intersect))
        .route("/api/gazetteer", get(handlers::gazetteer))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, locator: Locator) -> Result<()> {
    let app = build_router(locator);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, "server listening");
    eprintln!("  rta-geoparse listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app).await?;
    Ok(())
}
