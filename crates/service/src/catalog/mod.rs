//! Read-only portfolio catalog: the query pipeline, its repositories and
//! the wire views handed to the HTTP layer.

pub mod domain;
pub mod query;
pub mod repository;
pub mod service;
pub mod view;

pub use domain::{ItemPage, ItemRecord, ServiceRecord};
pub use query::ItemQuery;
pub use repository::{CatalogRepository, SeaOrmCatalogRepository};
pub use service::CatalogService;
pub use view::{CategoryView, MediaUrls, PortfolioItemView, ServiceView};
