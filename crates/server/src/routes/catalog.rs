use axum::extract::State;
use axum::Json;
use serde::Serialize;

use service::catalog::{CategoryView, ServiceView};

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryView>,
}

#[derive(Debug, Serialize)]
pub struct ServiceListResponse {
    pub services: Vec<ServiceView>,
}

#[utoipa::path(get, path = "/api/categories/", tag = "catalog", responses((status = 200, description = "Categories by display order")))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<CategoryListResponse>, JsonApiError> {
    let categories = state.catalog.categories().await?;
    Ok(Json(CategoryListResponse { categories: categories.iter().map(CategoryView::from).collect() }))
}

/// Inactive services are listed too.
#[utoipa::path(get, path = "/api/services/", tag = "catalog", responses((status = 200, description = "Services with their category")))]
pub async fn services(State(state): State<AppState>) -> Result<Json<ServiceListResponse>, JsonApiError> {
    let services = state.catalog.services().await?;
    Ok(Json(ServiceListResponse { services: services.iter().map(ServiceView::from).collect() }))
}
