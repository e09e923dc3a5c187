use std::sync::Arc;

use tracing::{info, instrument};

use models::category;

use super::domain::{ItemPage, ItemRecord, ServiceRecord};
use super::query::ItemQuery;
use super::repository::CatalogRepository;
use crate::errors::ServiceError;
use crate::pagination::PageRequest;

/// Application service behind every catalog endpoint.
/// Filters through [`ItemQuery`], counts, resolves the page, then fetches
/// only that slice.
#[derive(Clone)]
pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn page(&self, query: &ItemQuery, request: PageRequest) -> Result<ItemPage, ServiceError> {
        let total = self.repo.count_items(query).await?;
        let window = request.resolve(total);
        let items = self.repo.fetch_items(query, window.offset, window.limit).await?;
        info!(total, page = window.meta.current_page, returned = items.len(), "catalog page");
        Ok(ItemPage { items, meta: window.meta })
    }

    /// Every item, newest first.
    pub async fn list(&self, request: PageRequest) -> Result<ItemPage, ServiceError> {
        self.page(&ItemQuery::default(), request).await
    }

    pub async fn get(&self, id: i32) -> Result<ItemRecord, ServiceError> {
        self.repo
            .get_item(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Portfolio item"))
    }

    /// Items of a category looked up by name. Unlike [`CatalogService::filter`],
    /// an unknown name is `NotFound`.
    pub async fn by_category(&self, name: &str, request: PageRequest) -> Result<(category::Model, ItemPage), ServiceError> {
        let category = self
            .repo
            .find_category_by_name(name)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category"))?;
        let page = self.page(&ItemQuery::in_category(category.id), request).await?;
        Ok((category, page))
    }

    /// Text search; a blank query is a `Validation` error.
    pub async fn search(&self, text: Option<&str>, request: PageRequest) -> Result<(ItemQuery, ItemPage), ServiceError> {
        let query = ItemQuery::search(text)?;
        let page = self.page(&query, request).await?;
        Ok((query, page))
    }

    /// Search and filters in any combination. Unknown names simply match nothing.
    pub async fn filter(&self, query: ItemQuery, request: PageRequest) -> Result<(ItemQuery, ItemPage), ServiceError> {
        let page = self.page(&query, request).await?;
        Ok((query, page))
    }

    pub async fn categories(&self) -> Result<Vec<category::Model>, ServiceError> {
        self.repo.list_categories().await
    }

    /// All services, active or not.
    pub async fn services(&self) -> Result<Vec<ServiceRecord>, ServiceError> {
        self.repo.list_services().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::catalog::repository::mock::MockCatalogRepository;

    fn service_with(repo: MockCatalogRepository) -> CatalogService {
        CatalogService::new(Arc::new(repo))
    }

    fn kitchen_office() -> MockCatalogRepository {
        let repo = MockCatalogRepository::new();
        let kitchens = repo.add_category("Kitchens", 0);
        let offices = repo.add_category("Offices", 1);
        repo.add_category("Garages", 2);
        let t1 = Utc::now() - Duration::hours(2);
        repo.add_item("Kitchen Redesign", "", kitchens.id, None, None, t1);
        repo.add_item("Office remodel", "", offices.id, None, None, t1 + Duration::hours(1));
        repo
    }

    fn titles(page: &ItemPage) -> Vec<&str> {
        page.items.iter().map(|r| r.item.title.as_str()).collect()
    }

    #[tokio::test]
    async fn list_is_newest_first() -> anyhow::Result<()> {
        let svc = service_with(kitchen_office());
        let page = svc.list(PageRequest::default()).await?;
        assert_eq!(titles(&page), vec!["Office remodel", "Kitchen Redesign"]);
        assert_eq!(page.meta.total_items, 2);
        Ok(())
    }

    #[tokio::test]
    async fn missing_item_is_not_found() {
        let svc = service_with(kitchen_office());
        let err = svc.get(404).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Portfolio item not found"));
    }

    #[tokio::test]
    async fn by_category_and_filter_disagree_on_unknown_names() -> anyhow::Result<()> {
        let svc = service_with(kitchen_office());
        let err = svc.by_category("Basements", PageRequest::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Category not found"));

        let (_, page) = svc.filter(ItemQuery::filter(Some("Basements"), None), PageRequest::default()).await?;
        assert!(page.items.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn existing_empty_category_is_not_an_error() -> anyhow::Result<()> {
        let svc = service_with(kitchen_office());
        let (category, page) = svc.by_category("garages", PageRequest::default()).await?;
        assert_eq!(category.name, "Garages");
        assert!(page.items.is_empty());
        assert_eq!(page.meta.total_pages, 1);
        Ok(())
    }

    #[tokio::test]
    async fn search_validates_and_filters() -> anyhow::Result<()> {
        let svc = service_with(kitchen_office());
        assert!(matches!(svc.search(Some(""), PageRequest::default()).await, Err(ServiceError::Validation(_))));
        let (query, page) = svc.search(Some("kitchen"), PageRequest::default()).await?;
        assert_eq!(query.text(), Some("kitchen"));
        assert_eq!(titles(&page), vec!["Kitchen Redesign"]);
        Ok(())
    }

    #[tokio::test]
    async fn out_of_range_page_returns_first_page() -> anyhow::Result<()> {
        let repo = MockCatalogRepository::new();
        let c = repo.add_category("Kitchens", 0);
        let start = Utc::now() - Duration::days(30);
        for i in 0..12 {
            repo.add_item(&format!("item {i}"), "", c.id, None, None, start + Duration::days(i));
        }
        let svc = service_with(repo);
        let page = svc.list(PageRequest::from_params(Some("9"), Some("5"))).await?;
        assert_eq!(page.meta.current_page, 1);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].item.title, "item 11");

        let last = svc.list(PageRequest::from_params(Some("3"), Some("5"))).await?;
        assert_eq!(titles(&last), vec!["item 1", "item 0"]);
        Ok(())
    }

    #[tokio::test]
    async fn services_include_inactive() -> anyhow::Result<()> {
        let repo = kitchen_office();
        repo.add_service("Cabinets", 1, true);
        repo.add_service("Archived", 1, false);
        let svc = service_with(repo);
        let services = svc.services().await?;
        assert_eq!(services.len(), 2);
        assert!(services.iter().any(|s| !s.service.is_active));
        Ok(())
    }
}
