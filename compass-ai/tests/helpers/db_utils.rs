//! Database Test Utilities

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// In-memory database with the schema but no seed row
///
/// A single connection keeps every query on the same in-memory database.
pub async fn create_memory_db() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    compass_ai::db::init_tables(&pool).await?;
    Ok(pool)
}

/// File database opened the way the service opens it (schema + seed row)
///
/// Returns (TempDir, SqlitePool) - TempDir must be kept alive for duration of test
pub async fn create_seeded_db() -> Result<(TempDir, SqlitePool)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test_compass.db");
    let pool = compass_ai::db::init_database_pool(&db_path).await?;
    Ok((temp_dir, pool))
}

/// Names of every stored person, oldest first
pub async fn stored_names(pool: &SqlitePool) -> Result<Vec<String>> {
    let names = sqlx::query_scalar("SELECT name FROM people ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(names)
}
