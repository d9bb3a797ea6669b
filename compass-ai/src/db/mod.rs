//! Database access for compass-ai
//!
//! SQLite holds the `people` table. Name uniqueness (case-insensitive) is a
//! storage-level constraint, not a check-then-insert in the pipeline.

pub mod people;

pub use people::SqlitePersonStore;

use compass_common::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;

/// Initialize database connection pool
///
/// Creates the file if missing, then the schema and seed row.
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Use proper SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let options = SqliteConnectOptions::from_str(&db_url)?;
    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    init_tables(&pool).await?;
    seed_people(&pool).await?;

    Ok(pool)
}

/// Create the `people` table and its unique name index if they don't exist
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS people (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            x REAL NOT NULL,
            y REAL NOT NULL,
            wikipedia_url TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    reject_case_duplicates(pool).await?;

    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_people_name_nocase ON people (name COLLATE NOCASE)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (people)");

    Ok(())
}

/// Fail with the offending names if any differ only in case
///
/// Databases written before the unique index existed can hold such rows,
/// and the index cannot be created over them.
async fn reject_case_duplicates(pool: &SqlitePool) -> Result<()> {
    let groups: Vec<String> = sqlx::query_scalar(
        "SELECT group_concat(name, ', ') FROM people \
         GROUP BY name COLLATE NOCASE HAVING COUNT(*) > 1",
    )
    .fetch_all(pool)
    .await?;

    if groups.is_empty() {
        return Ok(());
    }

    for group in &groups {
        tracing::error!(names = %group, "People differ only in case");
    }
    Err(Error::Config(format!(
        "people table has names that differ only in case ({}); remove the extra rows and restart",
        groups.join("; ")
    )))
}

/// Seed an empty table with the initial reference person
pub async fn seed_people(pool: &SqlitePool) -> Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM people")
        .fetch_one(pool)
        .await?;

    if count == 0 {
        sqlx::query("INSERT INTO people (name, x, y, wikipedia_url) VALUES (?, ?, ?, ?)")
            .bind("Ayn Rand")
            .bind(8.0_f64)
            .bind(-8.0_f64)
            .bind("https://en.wikipedia.org/wiki/Ayn_Rand")
            .execute(pool)
            .await?;
        tracing::info!("Seeded empty people table");
    }

    Ok(())
}
