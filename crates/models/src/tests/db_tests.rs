use anyhow::Result;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use super::memory_db;

/// Test basic database connection
#[tokio::test]
async fn test_basic_connection() -> Result<()> {
    let db = memory_db().await?;
    let stmt = Statement::from_string(DatabaseBackend::Sqlite, "SELECT 1 as test".to_string());
    let row = db.query_one(stmt).await?.expect("one row");
    let test_value: i32 = row.try_get("", "test")?;
    assert_eq!(test_value, 1);
    Ok(())
}

/// Migrations create every catalog table
#[tokio::test]
async fn test_migrations_create_tables() -> Result<()> {
    let db = memory_db().await?;
    for table in ["category", "service", "portfolio_item"] {
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
            [table.into()],
        );
        assert!(db.query_one(stmt).await?.is_some(), "missing table {table}");
    }
    Ok(())
}

/// Invalid URLs fail to connect instead of panicking
#[tokio::test]
async fn test_connect_rejects_bad_url() {
    let cfg = configs::DatabaseConfig {
        url: "sqlite:///nonexistent-dir/for/sure/catalog.db?mode=ro".into(),
        max_connections: 1,
        min_connections: 1,
        connect_timeout_secs: 1,
        acquire_timeout_secs: 1,
        ..configs::DatabaseConfig::default()
    };
    assert!(crate::db::connect_with_config(&cfg).await.is_err());
}
