use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::errors::{self, require_len};
use crate::{portfolio_item, service};

/// Named grouping for services and portfolio items, listed by
/// `(display_order, name)`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub display_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Service, PortfolioItem }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Service => Entity::has_many(service::Entity).into(),
            Relation::PortfolioItem => Entity::has_many(portfolio_item::Entity).into(),
        }
    }
}

impl Related<service::Entity> for Entity {
    fn to() -> RelationDef { Relation::Service.def() }
}

impl Related<portfolio_item::Entity> for Entity {
    fn to() -> RelationDef { Relation::PortfolioItem.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, name: &str, description: &str, display_order: i32) -> Result<Model, errors::ModelError> {
    require_len("name", name, 100)?;
    let am = ActiveModel {
        name: Set(name.trim().to_string()),
        description: Set(description.to_string()),
        display_order: Set(display_order),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Delete a category. Its services and portfolio items go with it.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
