use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::errors::{self, require_len};
use crate::{category, portfolio_item};

/// An offering under a category. `is_active` is stored and presented as-is;
/// listings do not filter on it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price_range: Option<String>,
    pub category_id: i32,
    pub is_active: bool,
    pub display_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Category, PortfolioItem }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity).from(Column::CategoryId).to(category::Column::Id).into(),
            Relation::PortfolioItem => Entity::has_many(portfolio_item::Entity).into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl Related<portfolio_item::Entity> for Entity {
    fn to() -> RelationDef { Relation::PortfolioItem.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Input for [`create`].
#[derive(Clone, Debug)]
pub struct NewService {
    pub name: String,
    pub description: String,
    pub price_range: Option<String>,
    pub category_id: i32,
    pub is_active: bool,
    pub display_order: i32,
}

impl NewService {
    pub fn new(name: &str, category_id: i32) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            price_range: None,
            category_id,
            is_active: true,
            display_order: 0,
        }
    }
}

pub async fn create(db: &DatabaseConnection, input: NewService) -> Result<Model, errors::ModelError> {
    require_len("name", &input.name, 100)?;
    if let Some(range) = input.price_range.as_deref() {
        require_len("price_range", range, 100)?;
    }
    let am = ActiveModel {
        name: Set(input.name.trim().to_string()),
        description: Set(input.description),
        price_range: Set(input.price_range),
        category_id: Set(input.category_id),
        is_active: Set(input.is_active),
        display_order: Set(input.display_order),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Delete a service. Items that referenced it keep existing with no service.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
