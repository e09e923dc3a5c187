use axum::{
    handler::Handler,
    middleware,
    routing::get,
    Json, Router,
};
use configs::MediaConfig;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::metrics;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod catalog;
pub mod gallery;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Register `handler` for GET on `path` and on `path` with a trailing slash.
fn get_both<H, T>(router: Router<AppState>, path: &str, handler: H) -> Router<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    router
        .route(path, get(handler.clone()))
        .route(&format!("{path}/"), get(handler))
}

/// Build the full application router: catalog API, media files and operational routes
pub fn build_router(state: AppState, media: &MediaConfig, cors: CorsLayer) -> Router {
    // Public routes (health, metrics, docs, media)
    let media_mount = media.url_prefix.trim_end_matches('/');
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics::metrics_handler))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest_service(media_mount, ServeDir::new(&media.root));

    // Catalog API
    let mut api = Router::new();
    api = get_both(api, "/api/gallery", gallery::list);
    api = get_both(api, "/api/gallery/search", gallery::search);
    api = get_both(api, "/api/gallery/filter", gallery::filter);
    api = get_both(api, "/api/gallery/combined", gallery::combined);
    api = get_both(api, "/api/gallery/category/:name", gallery::by_category);
    api = get_both(api, "/api/gallery/:id", gallery::detail);
    api = get_both(api, "/api/categories", catalog::categories);
    api = get_both(api, "/api/services", catalog::services);
    let api = api
        .route_layer(middleware::from_fn(metrics::track_requests))
        .with_state(state);

    // Compose
    public
        .merge(api)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
