use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select,
};
use tracing::{debug, instrument};

use models::{category, portfolio_item, service};

use super::domain::{ItemRecord, ServiceRecord};
use super::query::{fold_case, lower_col, ItemQuery};
use crate::errors::ServiceError;

/// Read access to the catalog. Items come back newest first.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn count_items(&self, query: &ItemQuery) -> Result<u64, ServiceError>;
    async fn fetch_items(&self, query: &ItemQuery, offset: u64, limit: u64) -> Result<Vec<ItemRecord>, ServiceError>;
    async fn get_item(&self, id: i32) -> Result<Option<ItemRecord>, ServiceError>;
    /// Case-insensitive exact lookup by name.
    async fn find_category_by_name(&self, name: &str) -> Result<Option<category::Model>, ServiceError>;
    async fn list_categories(&self) -> Result<Vec<category::Model>, ServiceError>;
    async fn list_services(&self) -> Result<Vec<ServiceRecord>, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmCatalogRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    fn filtered(&self, query: &ItemQuery) -> Select<portfolio_item::Entity> {
        portfolio_item::Entity::find()
            .join(JoinType::InnerJoin, portfolio_item::Relation::Category.def())
            .join(JoinType::LeftJoin, portfolio_item::Relation::Service.def())
            .filter(query.condition(self.db.get_database_backend()))
    }

    /// Attach categories and services to a batch of items, keeping order.
    async fn load_records(&self, items: Vec<portfolio_item::Model>) -> Result<Vec<ItemRecord>, ServiceError> {
        let service_ids: HashSet<i32> = items.iter().filter_map(|i| i.service_id).collect();
        let services: Vec<service::Model> = if service_ids.is_empty() {
            Vec::new()
        } else {
            service::Entity::find()
                .filter(service::Column::Id.is_in(service_ids))
                .all(&self.db)
                .await?
        };

        let category_ids: HashSet<i32> = items
            .iter()
            .map(|i| i.category_id)
            .chain(services.iter().map(|s| s.category_id))
            .collect();
        let categories = self.categories_by_id(category_ids).await?;

        let mut service_records: HashMap<i32, ServiceRecord> = HashMap::with_capacity(services.len());
        for s in services {
            let category = lookup(&categories, s.category_id)?;
            service_records.insert(s.id, ServiceRecord { service: s, category });
        }

        items
            .into_iter()
            .map(|item| {
                let category = lookup(&categories, item.category_id)?;
                let service = item.service_id.and_then(|id| service_records.get(&id).cloned());
                Ok(ItemRecord { item, category, service })
            })
            .collect()
    }

    async fn categories_by_id(&self, ids: HashSet<i32>) -> Result<HashMap<i32, category::Model>, ServiceError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = category::Entity::find()
            .filter(category::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|c| (c.id, c)).collect())
    }
}

fn lookup(categories: &HashMap<i32, category::Model>, id: i32) -> Result<category::Model, ServiceError> {
    categories
        .get(&id)
        .cloned()
        .ok_or_else(|| ServiceError::Db(format!("dangling category reference {id}")))
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    #[instrument(skip(self))]
    async fn count_items(&self, query: &ItemQuery) -> Result<u64, ServiceError> {
        let total = self.filtered(query).count(&self.db).await?;
        debug!(total, "counted portfolio items");
        Ok(total)
    }

    #[instrument(skip(self))]
    async fn fetch_items(&self, query: &ItemQuery, offset: u64, limit: u64) -> Result<Vec<ItemRecord>, ServiceError> {
        let rows = self.filtered(query)
            .order_by_desc(portfolio_item::Column::UploadDate)
            .order_by_desc(portfolio_item::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        debug!(rows = rows.len(), "fetched portfolio item page");
        self.load_records(rows).await
    }

    async fn get_item(&self, id: i32) -> Result<Option<ItemRecord>, ServiceError> {
        let Some(item) = portfolio_item::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(self.load_records(vec![item]).await?.pop())
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<category::Model>, ServiceError> {
        let needle = fold_case(self.db.get_database_backend(), name.trim());
        let found = category::Entity::find()
            .filter(lower_col(category::Entity, category::Column::Name).eq(needle))
            .order_by_asc(category::Column::DisplayOrder)
            .order_by_asc(category::Column::Name)
            .one(&self.db)
            .await?;
        Ok(found)
    }

    async fn list_categories(&self) -> Result<Vec<category::Model>, ServiceError> {
        let rows = category::Entity::find()
            .order_by_asc(category::Column::DisplayOrder)
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn list_services(&self) -> Result<Vec<ServiceRecord>, ServiceError> {
        let rows = service::Entity::find()
            .order_by_asc(service::Column::DisplayOrder)
            .order_by_asc(service::Column::Name)
            .all(&self.db)
            .await?;
        let categories = self.categories_by_id(rows.iter().map(|s| s.category_id).collect()).await?;
        rows.into_iter()
            .map(|s| {
                let category = lookup(&categories, s.category_id)?;
                Ok(ServiceRecord { service: s, category })
            })
            .collect()
    }
}

/// Simple in-memory repository for tests and local demos.
///
/// Evaluates [`ItemQuery::matches`] over the whole collection and slices the
/// sorted result, the same contract the SQL path fulfils with joins.
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    use chrono::{DateTime, Utc};

    use crate::catalog::query::{eq_ignore_case, newest_first};

    #[derive(Default)]
    pub struct MockCatalogRepository {
        categories: Mutex<Vec<category::Model>>,
        services: Mutex<Vec<service::Model>>,
        items: Mutex<Vec<portfolio_item::Model>>,
    }

    impl MockCatalogRepository {
        pub fn new() -> Self { Self::default() }

        pub fn add_category(&self, name: &str, display_order: i32) -> category::Model {
            let mut categories = self.categories.lock().unwrap();
            let model = category::Model {
                id: categories.len() as i32 + 1,
                name: name.to_string(),
                description: String::new(),
                display_order,
            };
            categories.push(model.clone());
            model
        }

        pub fn add_service(&self, name: &str, category_id: i32, is_active: bool) -> service::Model {
            let mut services = self.services.lock().unwrap();
            let model = service::Model {
                id: services.len() as i32 + 1,
                name: name.to_string(),
                description: String::new(),
                price_range: None,
                category_id,
                is_active,
                display_order: 0,
            };
            services.push(model.clone());
            model
        }

        pub fn add_item(
            &self,
            title: &str,
            description: &str,
            category_id: i32,
            service_id: Option<i32>,
            image: Option<&str>,
            upload_date: DateTime<Utc>,
        ) -> portfolio_item::Model {
            let mut items = self.items.lock().unwrap();
            let model = portfolio_item::Model {
                id: items.len() as i32 + 1,
                title: title.to_string(),
                image: image.map(str::to_string),
                description: description.to_string(),
                category_id,
                service_id,
                upload_date: upload_date.into(),
            };
            items.push(model.clone());
            model
        }

        fn record(&self, item: &portfolio_item::Model) -> Result<ItemRecord, ServiceError> {
            let categories = self.categories.lock().unwrap();
            let services = self.services.lock().unwrap();
            let find_category = |id: i32| {
                categories
                    .iter()
                    .find(|c| c.id == id)
                    .cloned()
                    .ok_or_else(|| ServiceError::Db(format!("dangling category reference {id}")))
            };
            let category = find_category(item.category_id)?;
            let service = match item.service_id.and_then(|id| services.iter().find(|s| s.id == id)) {
                Some(s) => Some(ServiceRecord { service: s.clone(), category: find_category(s.category_id)? }),
                None => None,
            };
            Ok(ItemRecord { item: item.clone(), category, service })
        }

        fn matching(&self, query: &ItemQuery) -> Result<Vec<ItemRecord>, ServiceError> {
            let items = self.items.lock().unwrap().clone();
            let mut records = Vec::with_capacity(items.len());
            for item in &items {
                let record = self.record(item)?;
                if query.matches(&record) {
                    records.push(record);
                }
            }
            records.sort_by(newest_first);
            Ok(records)
        }
    }

    #[async_trait]
    impl CatalogRepository for MockCatalogRepository {
        async fn count_items(&self, query: &ItemQuery) -> Result<u64, ServiceError> {
            Ok(self.matching(query)?.len() as u64)
        }

        async fn fetch_items(&self, query: &ItemQuery, offset: u64, limit: u64) -> Result<Vec<ItemRecord>, ServiceError> {
            Ok(self
                .matching(query)?
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect())
        }

        async fn get_item(&self, id: i32) -> Result<Option<ItemRecord>, ServiceError> {
            let item = self.items.lock().unwrap().iter().find(|i| i.id == id).cloned();
            item.map(|i| self.record(&i)).transpose()
        }

        async fn find_category_by_name(&self, name: &str) -> Result<Option<category::Model>, ServiceError> {
            let mut found: Vec<category::Model> = self
                .categories
                .lock()
                .unwrap()
                .iter()
                .filter(|c| eq_ignore_case(&c.name, name.trim()))
                .cloned()
                .collect();
            found.sort_by(|a, b| (a.display_order, &a.name).cmp(&(b.display_order, &b.name)));
            Ok(found.into_iter().next())
        }

        async fn list_categories(&self) -> Result<Vec<category::Model>, ServiceError> {
            let mut categories = self.categories.lock().unwrap().clone();
            categories.sort_by(|a, b| (a.display_order, &a.name).cmp(&(b.display_order, &b.name)));
            Ok(categories)
        }

        async fn list_services(&self) -> Result<Vec<ServiceRecord>, ServiceError> {
            let mut services = self.services.lock().unwrap().clone();
            services.sort_by(|a, b| (a.display_order, &a.name).cmp(&(b.display_order, &b.name)));
            let categories = self.categories.lock().unwrap().clone();
            services
                .into_iter()
                .map(|s| {
                    let category = categories
                        .iter()
                        .find(|c| c.id == s.category_id)
                        .cloned()
                        .ok_or_else(|| ServiceError::Db(format!("dangling category reference {}", s.category_id)))?;
                    Ok(ServiceRecord { service: s, category })
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use models::portfolio_item::NewPortfolioItem;
    use models::service::NewService;

    use crate::test_support::get_db;

    struct Fixture {
        repo: SeaOrmCatalogRepository,
        kitchens: category::Model,
        offices: category::Model,
        design: service::Model,
    }

    /// Kitchen Redesign (oldest), Office remodel, Bare office (newest, no service/image).
    async fn fixture() -> anyhow::Result<Fixture> {
        let db = get_db().await?;
        let kitchens = category::create(&db, "Kitchens", "", 1).await?;
        let offices = category::create(&db, "Offices", "", 0).await?;
        let _garages = category::create(&db, "Garages", "", 2).await?;
        let design = service::create(&db, NewService::new("Design", offices.id)).await?;

        let base = Utc::now() - Duration::days(10);
        portfolio_item::create_at(
            &db,
            NewPortfolioItem::new("Kitchen Redesign", kitchens.id).with_image("kitchen.jpg"),
            base.into(),
        )
        .await?;
        portfolio_item::create_at(
            &db,
            NewPortfolioItem::new("Office remodel", offices.id)
                .with_description("100% open plan")
                .with_service(design.id),
            (base + Duration::days(1)).into(),
        )
        .await?;
        portfolio_item::create_at(&db, NewPortfolioItem::new("Bare office", offices.id), (base + Duration::days(2)).into()).await?;

        Ok(Fixture { repo: SeaOrmCatalogRepository::new(db), kitchens, offices, design })
    }

    fn titles(records: &[ItemRecord]) -> Vec<&str> {
        records.iter().map(|r| r.item.title.as_str()).collect()
    }

    #[tokio::test]
    async fn unfiltered_lists_newest_first() -> anyhow::Result<()> {
        let f = fixture().await?;
        let q = ItemQuery::default();
        assert_eq!(f.repo.count_items(&q).await?, 3);
        let rows = f.repo.fetch_items(&q, 0, 20).await?;
        assert_eq!(titles(&rows), vec!["Bare office", "Office remodel", "Kitchen Redesign"]);
        Ok(())
    }

    #[tokio::test]
    async fn text_search_is_case_insensitive_over_title_and_description() -> anyhow::Result<()> {
        let f = fixture().await?;
        let q = ItemQuery::search(Some("KITCHEN"))?;
        assert_eq!(titles(&f.repo.fetch_items(&q, 0, 20).await?), vec!["Kitchen Redesign"]);

        let q = ItemQuery::search(Some("open plan"))?;
        assert_eq!(titles(&f.repo.fetch_items(&q, 0, 20).await?), vec!["Office remodel"]);
        Ok(())
    }

    #[tokio::test]
    async fn non_ascii_search_folds_like_sqlite_lower() -> anyhow::Result<()> {
        let f = fixture().await?;
        portfolio_item::create(&f.repo.db, NewPortfolioItem::new("École remodel", f.offices.id)).await?;

        let q = ItemQuery::search(Some("École"))?;
        assert_eq!(titles(&f.repo.fetch_items(&q, 0, 20).await?), vec!["École remodel"]);
        let q = ItemQuery::search(Some("ÉCOLE REMODEL"))?;
        assert_eq!(f.repo.count_items(&q).await?, 1);
        // SQLite LOWER leaves non-ASCII letters alone
        let q = ItemQuery::search(Some("école"))?;
        assert_eq!(f.repo.count_items(&q).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn like_wildcards_are_literal() -> anyhow::Result<()> {
        let f = fixture().await?;
        let q = ItemQuery::search(Some("100%"))?;
        assert_eq!(f.repo.count_items(&q).await?, 1);
        let q = ItemQuery::search(Some("%"))?;
        assert_eq!(f.repo.count_items(&q).await?, 1);
        let q = ItemQuery::search(Some("_"))?;
        assert_eq!(f.repo.count_items(&q).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn category_and_service_filters() -> anyhow::Result<()> {
        let f = fixture().await?;
        let q = ItemQuery::filter(Some("offices"), None);
        assert_eq!(titles(&f.repo.fetch_items(&q, 0, 20).await?), vec!["Bare office", "Office remodel"]);

        let q = ItemQuery::filter(Some("OFFICES"), Some("design"));
        let rows = f.repo.fetch_items(&q, 0, 20).await?;
        assert_eq!(titles(&rows), vec!["Office remodel"]);
        let service = rows[0].service.as_ref().expect("service attached");
        assert_eq!(service.service.id, f.design.id);
        assert_eq!(service.category.id, f.offices.id);

        let q = ItemQuery::filter(Some("office"), None);
        assert_eq!(f.repo.count_items(&q).await?, 0);
        let q = ItemQuery::filter(Some("Garages"), None);
        assert_eq!(f.repo.count_items(&q).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn in_category_and_paging() -> anyhow::Result<()> {
        let f = fixture().await?;
        let q = ItemQuery::in_category(f.offices.id);
        assert_eq!(f.repo.count_items(&q).await?, 2);
        let second = f.repo.fetch_items(&q, 1, 1).await?;
        assert_eq!(titles(&second), vec!["Office remodel"]);
        let beyond = f.repo.fetch_items(&q, 5, 5).await?;
        assert!(beyond.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn get_item_resolves_relations() -> anyhow::Result<()> {
        let f = fixture().await?;
        let all = f.repo.fetch_items(&ItemQuery::default(), 0, 20).await?;
        let kitchen = all.iter().find(|r| r.item.title == "Kitchen Redesign").expect("kitchen");
        let found = f.repo.get_item(kitchen.item.id).await?.expect("found");
        assert_eq!(found.category, f.kitchens);
        assert!(found.service.is_none());
        assert_eq!(found.item.image.as_deref(), Some("portfolio/kitchen.jpg"));
        assert!(f.repo.get_item(9999).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn category_lookup_and_listings() -> anyhow::Result<()> {
        let f = fixture().await?;
        let found = f.repo.find_category_by_name(" kitchens ").await?.expect("kitchens");
        assert_eq!(found.id, f.kitchens.id);
        assert!(f.repo.find_category_by_name("Kitch").await?.is_none());

        let names: Vec<String> = f.repo.list_categories().await?.into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Offices", "Kitchens", "Garages"]);

        let services = f.repo.list_services().await?;
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].category.name, "Offices");
        Ok(())
    }
}
