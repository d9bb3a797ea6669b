//! People persistence

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::models::{Person, PersonRecord};
use crate::services::person_store::{PersonStore, StoreError};

/// Load every stored person, oldest first
pub async fn list_people(pool: &SqlitePool) -> Result<Vec<Person>, StoreError> {
    let people = sqlx::query_as::<_, Person>(
        "SELECT id, name, x, y, wikipedia_url, created_at FROM people ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(people)
}

/// Load person by id
pub async fn get_person(pool: &SqlitePool, id: i64) -> Result<Option<Person>, StoreError> {
    let person = sqlx::query_as::<_, Person>(
        "SELECT id, name, x, y, wikipedia_url, created_at FROM people WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(person)
}

/// Case-insensitive name lookup
pub async fn person_exists(pool: &SqlitePool, name: &str) -> Result<bool, StoreError> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM people WHERE name = ? COLLATE NOCASE")
            .bind(name)
            .fetch_one(pool)
            .await?;

    Ok(count > 0)
}

/// Insert a person
///
/// The unique index on `name COLLATE NOCASE` turns a concurrent duplicate
/// into `StoreError::Duplicate`.
pub async fn insert_person(pool: &SqlitePool, record: &PersonRecord) -> Result<Person, StoreError> {
    let result = sqlx::query_as::<_, Person>(
        r#"
        INSERT INTO people (name, x, y, wikipedia_url)
        VALUES (?, ?, ?, ?)
        RETURNING id, name, x, y, wikipedia_url, created_at
        "#,
    )
    .bind(&record.name)
    .bind(record.x)
    .bind(record.y)
    .bind(&record.reference_url)
    .fetch_one(pool)
    .await;

    match result {
        Ok(person) => Ok(person),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(StoreError::Duplicate(record.name.clone()))
        }
        Err(e) => Err(e.into()),
    }
}

/// SQLite-backed [`PersonStore`]
#[derive(Clone)]
pub struct SqlitePersonStore {
    pool: SqlitePool,
}

impl SqlitePersonStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonStore for SqlitePersonStore {
    async fn exists(&self, name: &str) -> Result<bool, StoreError> {
        person_exists(&self.pool, name).await
    }

    async fn insert(&self, record: &PersonRecord) -> Result<Person, StoreError> {
        insert_person(&self.pool, record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::init_tables(&pool).await.unwrap();
        pool
    }

    fn record(name: &str) -> PersonRecord {
        PersonRecord {
            name: name.to_string(),
            x: 1.25,
            y: -3.5,
            reference_url: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_identity() {
        let pool = test_pool().await;

        let first = insert_person(&pool, &record("Karl Marx")).await.unwrap();
        let second = insert_person(&pool, &record("Adam Smith")).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.name, "Karl Marx");
        assert_eq!(first.x, 1.25);
        assert_eq!(first.wikipedia_url, None);

        let loaded = get_person(&pool, first.id).await.unwrap().unwrap();
        assert_eq!(loaded, first);
    }

    #[tokio::test]
    async fn test_exists_is_case_insensitive() {
        let pool = test_pool().await;
        insert_person(&pool, &record("Ayn Rand")).await.unwrap();

        assert!(person_exists(&pool, "ayn rand").await.unwrap());
        assert!(person_exists(&pool, "AYN RAND").await.unwrap());
        assert!(!person_exists(&pool, "Ayn").await.unwrap());
    }

    #[tokio::test]
    async fn test_unique_index_rejects_duplicate() {
        let pool = test_pool().await;
        insert_person(&pool, &record("Ayn Rand")).await.unwrap();

        let err = insert_person(&pool, &record("AYN rand")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(list_people(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_seed_only_when_empty() {
        let pool = test_pool().await;
        crate::db::seed_people(&pool).await.unwrap();
        crate::db::seed_people(&pool).await.unwrap();

        let people = list_people(&pool).await.unwrap();
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].name, "Ayn Rand");
        assert_eq!((people[0].x, people[0].y), (8.0, -8.0));
    }
}
