use super::{NewsStore, StoreError};
use crate::models::db_operations::news_db_operations;
use crate::models::{Milestone, MonthPlan, NewsItem};
use async_trait::async_trait;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

/// Relational backend: a thread-safe rusqlite connection pool over the
/// `news_items` / `milestones` / `roadmaps` tables created by `setup_cli`.
pub struct SqliteStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteStore {
    pub fn new(pool: Pool<SqliteConnectionManager>) -> Self {
        Self { pool }
    }

    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().build(manager)?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl NewsStore for SqliteStore {
    async fn list_news(&self) -> Result<Vec<NewsItem>, StoreError> {
        let conn = self.pool.get()?;
        Ok(news_db_operations::list_news(&conn)?)
    }

    async fn insert_news(&self, item: NewsItem) -> Result<NewsItem, StoreError> {
        let conn = self.pool.get()?;
        Ok(news_db_operations::insert_news(&conn, &item)?)
    }

    async fn update_news(&self, item: &NewsItem) -> Result<(), StoreError> {
        let conn = self.pool.get()?;
        Ok(news_db_operations::update_news(&conn, item)?)
    }

    async fn delete_news(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.pool.get()?;
        Ok(news_db_operations::delete_news(&conn, id)?)
    }

    async fn list_milestones(&self) -> Result<Vec<Milestone>, StoreError> {
        let conn = self.pool.get()?;
        Ok(news_db_operations::list_milestones(&conn)?)
    }

    async fn list_roadmap(&self) -> Result<Vec<MonthPlan>, StoreError> {
        let conn = self.pool.get()?;
        Ok(news_db_operations::list_roadmap(&conn)?)
    }
}
