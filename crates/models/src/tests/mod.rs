/// Database connection and configuration tests
pub mod db_tests;



use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Fresh in-memory SQLite database with all migrations applied.
pub(crate) async fn memory_db() -> anyhow::Result<DatabaseConnection> {
    let cfg = configs::DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..configs::DatabaseConfig::default()
    };
    let db = crate::db::connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
