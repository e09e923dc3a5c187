//! Create `portfolio_item` table.
//!
//! Deleting a category removes its items; deleting a service only clears
//! `service_id` on the items that pointed at it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PortfolioItem::Table)
                    .if_not_exists()
                    .col(pk_auto(PortfolioItem::Id))
                    .col(string_len(PortfolioItem::Title, 200).not_null())
                    .col(string_len_null(PortfolioItem::Image, 255))
                    .col(text(PortfolioItem::Description).not_null().default(""))
                    .col(integer(PortfolioItem::CategoryId).not_null())
                    .col(integer_null(PortfolioItem::ServiceId))
                    .col(timestamp_with_time_zone(PortfolioItem::UploadDate).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_portfolio_item_category")
                            .from(PortfolioItem::Table, PortfolioItem::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_portfolio_item_service")
                            .from(PortfolioItem::Table, PortfolioItem::ServiceId)
                            .to(Service::Table, Service::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PortfolioItem::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PortfolioItem {
    Table,
    Id,
    Title,
    Image,
    Description,
    CategoryId,
    ServiceId,
    UploadDate,
}

#[derive(DeriveIden)]
enum Category { Table, Id }

#[derive(DeriveIden)]
enum Service { Table, Id }
