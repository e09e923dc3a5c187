use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{self, require_len};
use crate::{category, service};

/// Prefix new uploads are stored under, relative to the media root.
pub const UPLOAD_DIR: &str = "portfolio/";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "portfolio_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    /// Storage path relative to the media root; `None` when no image is attached.
    pub image: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category_id: i32,
    pub service_id: Option<i32>,
    pub upload_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Category, Service }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity).from(Column::CategoryId).to(category::Column::Id).into(),
            Relation::Service => Entity::belongs_to(service::Entity).from(Column::ServiceId).to(service::Column::Id).into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl Related<service::Entity> for Entity {
    fn to() -> RelationDef { Relation::Service.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Input for [`create`].
#[derive(Clone, Debug)]
pub struct NewPortfolioItem {
    pub title: String,
    pub image: Option<String>,
    pub description: String,
    pub category_id: i32,
    pub service_id: Option<i32>,
}

impl NewPortfolioItem {
    pub fn new(title: &str, category_id: i32) -> Self {
        Self {
            title: title.to_string(),
            image: None,
            description: String::new(),
            category_id,
            service_id: None,
        }
    }

    pub fn with_image(mut self, file_name: &str) -> Self {
        self.image = Some(format!("{UPLOAD_DIR}{file_name}"));
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_service(mut self, service_id: i32) -> Self {
        self.service_id = Some(service_id);
        self
    }
}

/// Insert an item stamped with the current time.
pub async fn create(db: &DatabaseConnection, input: NewPortfolioItem) -> Result<Model, errors::ModelError> {
    create_at(db, input, Utc::now().into()).await
}

/// Insert an item with an explicit `upload_date`, for imports and backfills.
pub async fn create_at(
    db: &DatabaseConnection,
    input: NewPortfolioItem,
    upload_date: DateTimeWithTimeZone,
) -> Result<Model, errors::ModelError> {
    require_len("title", &input.title, 200)?;
    if let Some(image) = input.image.as_deref() {
        require_len("image", image, 255)?;
    }
    let am = ActiveModel {
        title: Set(input.title.trim().to_string()),
        image: Set(input.image),
        description: Set(input.description),
        category_id: Set(input.category_id),
        service_id: Set(input.service_id),
        upload_date: Set(upload_date),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
