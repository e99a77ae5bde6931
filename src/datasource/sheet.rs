use super::{NewsStore, StoreError};
use crate::models::{Milestone, MonthPlan, NewsItem};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// The single JSON document the spreadsheet proxy serves: one key per
/// collection, camel-cased column names inside each row. A sheet that only
/// carries `newsItems` still loads; the other collections come back empty.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct SheetDocument {
    #[serde(default)]
    news_items: Vec<NewsItem>,
    #[serde(default)]
    milestones: Vec<Milestone>,
    #[serde(default)]
    roadmap: Vec<MonthPlan>,
}

/// Spreadsheet-proxy backend. Read-only in practice: every read is a single
/// GET of the whole document; writes are not implemented against this
/// backend and report `Unsupported`, which surfaces to the user as a
/// "not yet supported" notice.
pub struct SheetStore {
    client: reqwest::Client,
    endpoint: String,
}

impl SheetStore {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    async fn fetch_document(&self) -> Result<SheetDocument, StoreError> {
        let resp = self.client.get(&self.endpoint).send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::BadStatus { status, body });
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl NewsStore for SheetStore {
    async fn list_news(&self) -> Result<Vec<NewsItem>, StoreError> {
        Ok(self.fetch_document().await?.news_items)
    }

    async fn insert_news(&self, _item: NewsItem) -> Result<NewsItem, StoreError> {
        Err(StoreError::Unsupported(
            "saving to the spreadsheet backend",
        ))
    }

    async fn update_news(&self, _item: &NewsItem) -> Result<(), StoreError> {
        Err(StoreError::Unsupported(
            "editing on the spreadsheet backend",
        ))
    }

    async fn delete_news(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::Unsupported(
            "deleting on the spreadsheet backend",
        ))
    }

    async fn list_milestones(&self) -> Result<Vec<Milestone>, StoreError> {
        Ok(self.fetch_document().await?.milestones)
    }

    async fn list_roadmap(&self) -> Result<Vec<MonthPlan>, StoreError> {
        Ok(self.fetch_document().await?.roadmap)
    }
}
