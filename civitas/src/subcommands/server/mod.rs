mod api;

use std::{sync::Arc, time::Duration};

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;

use crate::{config::Config, indexer::Indexer};

// How long a shutdown waits for the in-flight pass to finish its current
// source transaction before abandoning it.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct AppState {
    config: Config,
    pool: SqlitePool,
    indexer: Arc<Indexer>,
}

pub async fn start(config: &Config, conn: &SqlitePool) -> anyhow::Result<()> {
    let client = Arc::new(config.chain_client());
    let indexer = Indexer::new(config.clone(), conn.clone(), client);

    let indexer_handle = if config.indexer() {
        Some(indexer.clone().start().await?)
    } else {
        None
    };

    let mut app = Router::new();

    if config.api() {
        app = app
            .route("/api/status", get(api::status))
            .route("/api/scan", post(api::scan))
            .route("/api/reindex", post(api::reindex));
    }

    let state = AppState {
        config: config.clone(),
        pool: conn.clone(),
        indexer: indexer.clone(),
    };
    let app = app.layer(CorsLayer::permissive()).with_state(state);

    let addr = config
        .server_bind()
        .expect("Server bind unconfigured")
        .parse()?;

    tracing::info!("Starting server on {addr}");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(elegant_departure::tokio::depart().on_termination())
        .await?;

    if let Some(handle) = indexer_handle {
        indexer.stop(handle, SHUTDOWN_TIMEOUT).await;
    }

    tracing::info!("Server shutdown complete.");
    elegant_departure::shutdown().await;
    Ok(())
}
