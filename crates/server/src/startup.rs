use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::AppState;
use service::{
    catalog::{CatalogService, SeaOrmCatalogRepository},
    runtime,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        return;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Public entry: connect, migrate, build the app and serve until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    runtime::ensure_env(&cfg.media.root).await?;

    // DB connection + schema
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;

    let repo = Arc::new(SeaOrmCatalogRepository::new(db));
    let state = AppState::new(CatalogService::new(repo), &cfg.media.url_prefix);

    // Build router
    let app: Router = routes::build_router(state, &cfg.media, build_cors());

    // Bind and serve
    let listener = TcpListener::bind(format!("{}:{}", cfg.server.host, cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, media_root = %cfg.media.root, "starting portfolio catalog");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}
