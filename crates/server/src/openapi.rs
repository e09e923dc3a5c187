use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(ToSchema)]
pub struct CategoryDoc { pub id: i32, pub name: String, pub description: String, pub display_order: i32 }

#[derive(ToSchema)]
pub struct ServiceDoc {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price_range: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub category: CategoryDoc,
}

#[derive(ToSchema)]
pub struct PortfolioItemDoc {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: CategoryDoc,
    pub service: Option<ServiceDoc>,
    /// absolute URL under the media prefix
    pub image_url: Option<String>,
    /// RFC 3339
    pub upload_date: String,
}

#[derive(ToSchema)]
pub struct PaginationDoc {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub page_size: u64,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page: Option<u64>,
    pub previous_page: Option<u64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::gallery::list,
        crate::routes::gallery::detail,
        crate::routes::gallery::by_category,
        crate::routes::gallery::search,
        crate::routes::gallery::filter,
        crate::routes::gallery::combined,
        crate::routes::catalog::categories,
        crate::routes::catalog::services,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            CategoryDoc,
            ServiceDoc,
            PortfolioItemDoc,
            PaginationDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "gallery"),
        (name = "catalog")
    )
)]
pub struct ApiDoc;
