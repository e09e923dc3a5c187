//! `/api/gallery` handlers.
//!
//! Every list handler runs the same pipeline: build an [`ItemQuery`], let the
//! catalog service count and fetch one page, present each record against the
//! request origin, then wrap the page in its envelope.

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::request::Parts;
use axum::Json;
use serde::Serialize;
use utoipa::IntoParams;

use service::catalog::{ItemPage, ItemQuery, MediaUrls, PortfolioItemView};
use service::errors::ServiceError;
use service::pagination::{PageMeta, PageRequest};

use crate::errors::JsonApiError;
use crate::extract::RequestOrigin;
use crate::state::AppState;

/// Query string accepted by the gallery endpoints. Values stay raw strings
/// so malformed numbers fall back to defaults instead of rejecting the request.
/// A repeated key keeps its last value.
#[derive(Debug, Default, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GalleryParams {
    /// 1-based page number
    pub page: Option<String>,
    /// items per page, clamped to 5..=200
    pub page_size: Option<String>,
    /// case-insensitive text matched against title and description
    pub q: Option<String>,
    /// exact category name, case-insensitive
    pub category: Option<String>,
    /// exact service name, case-insensitive
    pub service: Option<String>,
}

impl GalleryParams {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "page_size" => &mut params.page_size,
                "q" => &mut params.q,
                "category" => &mut params.category,
                "service" => &mut params.service,
                _ => continue,
            };
            *slot = Some(value);
        }
        params
    }

    fn page_request(&self) -> PageRequest {
        PageRequest::from_params(self.page.as_deref(), self.page_size.as_deref())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for GalleryParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // percent-decoding is lossy, so only a structurally broken query lands here
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        Ok(Self::from_pairs(pairs))
    }
}

#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    pub portfolio_items: Vec<PortfolioItemView>,
    pub pagination: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct CategoryItemsResponse {
    pub category: String,
    pub portfolio_items: Vec<PortfolioItemView>,
    pub pagination: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub search_query: String,
    pub results_count: u64,
    pub portfolio_items: Vec<PortfolioItemView>,
    pub pagination: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct FiltersApplied {
    pub category: Option<String>,
    pub service: Option<String>,
}

impl From<&ItemQuery> for FiltersApplied {
    fn from(q: &ItemQuery) -> Self {
        Self { category: q.category().map(str::to_string), service: q.service().map(str::to_string) }
    }
}

#[derive(Debug, Serialize)]
pub struct FilterResponse {
    pub filters_applied: FiltersApplied,
    pub results_count: u64,
    pub portfolio_items: Vec<PortfolioItemView>,
    pub pagination: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct CombinedResponse {
    pub search_query: Option<String>,
    pub filters_applied: FiltersApplied,
    pub results_count: u64,
    pub portfolio_items: Vec<PortfolioItemView>,
    pub pagination: PageMeta,
}

fn present(page: &ItemPage, media: &MediaUrls) -> Vec<PortfolioItemView> {
    page.items.iter().map(|r| PortfolioItemView::present(r, media)).collect()
}

#[utoipa::path(
    get, path = "/api/gallery/", tag = "gallery",
    params(GalleryParams),
    responses((status = 200, description = "Page of portfolio items, newest first"))
)]
pub async fn list(
    State(state): State<AppState>,
    origin: RequestOrigin,
    params: GalleryParams,
) -> Result<Json<ItemListResponse>, JsonApiError> {
    let media = state.media_urls(&origin)?;
    let page = state.catalog.list(params.page_request()).await?;
    Ok(Json(ItemListResponse { portfolio_items: present(&page, &media), pagination: page.meta }))
}

#[utoipa::path(
    get, path = "/api/gallery/{id}/", tag = "gallery",
    params(("id" = i32, Path, description = "Portfolio item id")),
    responses(
        (status = 200, description = "Portfolio item"),
        (status = 404, description = "Portfolio item not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn detail(
    State(state): State<AppState>,
    origin: RequestOrigin,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<PortfolioItemView>, JsonApiError> {
    // a non-numeric id can never exist
    let id: i32 = id
        .ok()
        .and_then(|Path(id)| id.parse().ok())
        .ok_or_else(|| ServiceError::not_found("Portfolio item"))?;
    let media = state.media_urls(&origin)?;
    let record = state.catalog.get(id).await?;
    Ok(Json(PortfolioItemView::present(&record, &media)))
}

#[utoipa::path(
    get, path = "/api/gallery/category/{name}/", tag = "gallery",
    params(("name" = String, Path, description = "Category name, case-insensitive"), GalleryParams),
    responses(
        (status = 200, description = "Page of the category's items"),
        (status = 404, description = "Category not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn by_category(
    State(state): State<AppState>,
    origin: RequestOrigin,
    name: Result<Path<String>, PathRejection>,
    params: GalleryParams,
) -> Result<Json<CategoryItemsResponse>, JsonApiError> {
    // a name that is not valid UTF-8 cannot match any category
    let Ok(Path(name)) = name else {
        return Err(ServiceError::not_found("Category").into());
    };
    let media = state.media_urls(&origin)?;
    let (_, page) = state.catalog.by_category(&name, params.page_request()).await?;
    Ok(Json(CategoryItemsResponse {
        category: name,
        portfolio_items: present(&page, &media),
        pagination: page.meta,
    }))
}

#[utoipa::path(
    get, path = "/api/gallery/search/", tag = "gallery",
    params(GalleryParams),
    responses(
        (status = 200, description = "Items whose title or description contains q"),
        (status = 400, description = "Search query is required", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    origin: RequestOrigin,
    params: GalleryParams,
) -> Result<Json<SearchResponse>, JsonApiError> {
    let media = state.media_urls(&origin)?;
    let (query, page) = state.catalog.search(params.q.as_deref(), params.page_request()).await?;
    Ok(Json(SearchResponse {
        search_query: query.text().unwrap_or_default().to_string(),
        results_count: page.meta.total_items,
        portfolio_items: present(&page, &media),
        pagination: page.meta,
    }))
}

#[utoipa::path(
    get, path = "/api/gallery/filter/", tag = "gallery",
    params(GalleryParams),
    responses((status = 200, description = "Items matching the category and service filters"))
)]
pub async fn filter(
    State(state): State<AppState>,
    origin: RequestOrigin,
    params: GalleryParams,
) -> Result<Json<FilterResponse>, JsonApiError> {
    let media = state.media_urls(&origin)?;
    let query = ItemQuery::filter(params.category.as_deref(), params.service.as_deref());
    let (query, page) = state.catalog.filter(query, params.page_request()).await?;
    Ok(Json(FilterResponse {
        filters_applied: FiltersApplied::from(&query),
        results_count: page.meta.total_items,
        portfolio_items: present(&page, &media),
        pagination: page.meta,
    }))
}

#[utoipa::path(
    get, path = "/api/gallery/combined/", tag = "gallery",
    params(GalleryParams),
    responses((status = 200, description = "Items matching text search and filters together"))
)]
pub async fn combined(
    State(state): State<AppState>,
    origin: RequestOrigin,
    params: GalleryParams,
) -> Result<Json<CombinedResponse>, JsonApiError> {
    let media = state.media_urls(&origin)?;
    let query = ItemQuery::new(params.q.as_deref(), params.category.as_deref(), params.service.as_deref());
    let (query, page) = state.catalog.filter(query, params.page_request()).await?;
    Ok(Json(CombinedResponse {
        search_query: query.text().map(str::to_string),
        filters_applied: FiltersApplied::from(&query),
        results_count: page.meta.total_items,
        portfolio_items: present(&page, &media),
        pagination: page.meta,
    }))
}
