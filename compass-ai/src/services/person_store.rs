//! Storage seam consumed by the pipeline

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Person, PersonRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    /// A person with the same name (case-insensitive) already exists
    #[error("Person already exists: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// People storage
///
/// `insert` must reject case-insensitive duplicates itself so concurrent
/// runs for the same name cannot both persist.
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Case-insensitive name lookup
    async fn exists(&self, name: &str) -> Result<bool, StoreError>;

    /// Insert and return the stored person with its assigned identity
    async fn insert(&self, record: &PersonRecord) -> Result<Person, StoreError>;
}
