use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Service: index on category_id
        manager
            .create_index(
                Index::create()
                    .name("idx_service_category")
                    .table(Service::Table)
                    .col(Service::CategoryId)
                    .to_owned(),
            )
            .await?;

        // PortfolioItem: foreign keys
        manager
            .create_index(
                Index::create()
                    .name("idx_portfolio_item_category")
                    .table(PortfolioItem::Table)
                    .col(PortfolioItem::CategoryId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_portfolio_item_service")
                    .table(PortfolioItem::Table)
                    .col(PortfolioItem::ServiceId)
                    .to_owned(),
            )
            .await?;

        // PortfolioItem: every listing orders by upload_date desc
        manager
            .create_index(
                Index::create()
                    .name("idx_portfolio_item_upload_date")
                    .table(PortfolioItem::Table)
                    .col(PortfolioItem::UploadDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_service_category").table(Service::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_portfolio_item_category").table(PortfolioItem::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_portfolio_item_service").table(PortfolioItem::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_portfolio_item_upload_date").table(PortfolioItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Service { Table, CategoryId }

#[derive(DeriveIden)]
enum PortfolioItem { Table, CategoryId, ServiceId, UploadDate }
