use crate::config::{Config, DataBackend};
use crate::models::db_operations::news_db_operations::DbError;
use crate::models::{Milestone, MonthPlan, NewsItem};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

pub mod mock;
pub mod sheet;
pub mod sqlite;

pub use mock::MockStore;
pub use sheet::SheetStore;
pub use sqlite::SqliteStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Db(#[from] DbError),
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Backend returned HTTP {status}: {body}")]
    BadStatus { status: u16, body: String },
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Duplicate identifier: {0}")]
    Duplicate(String),
    #[error("Not supported by this backend: {0}")]
    Unsupported(&'static str),
}

impl StoreError {
    /// True when the configured backend simply cannot perform the operation,
    /// as opposed to having tried and failed.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, StoreError::Unsupported(_))
    }
}

/// The persistence boundary. One round trip per call; no retries, no
/// batching, no caching. Every backend is interchangeable behind this trait
/// and is selected once at startup from configuration.
#[async_trait]
pub trait NewsStore: Send + Sync {
    async fn list_news(&self) -> Result<Vec<NewsItem>, StoreError>;

    /// Persists a fully-formed item (id already minted) and returns the row
    /// the backend actually stored. Backends that cannot echo the stored row
    /// return the input unchanged.
    async fn insert_news(&self, item: NewsItem) -> Result<NewsItem, StoreError>;

    async fn update_news(&self, item: &NewsItem) -> Result<(), StoreError>;

    async fn delete_news(&self, id: &str) -> Result<(), StoreError>;

    async fn list_milestones(&self) -> Result<Vec<Milestone>, StoreError>;

    async fn list_roadmap(&self) -> Result<Vec<MonthPlan>, StoreError>;
}

/// Builds the backend named by `DATA_BACKEND`.
pub fn build_store(config: &Config) -> Result<Arc<dyn NewsStore>, StoreError> {
    match config.data_backend {
        DataBackend::Sqlite => Ok(Arc::new(SqliteStore::open(&config.news_db_path())?)),
        DataBackend::Sheet => Ok(Arc::new(SheetStore::new(&config.sheet_api_url)?)),
        DataBackend::Mock => Ok(Arc::new(MockStore::with_seed_data())),
    }
}
