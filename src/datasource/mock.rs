use super::{NewsStore, StoreError};
use crate::models::{Category, ContentType, Milestone, MonthPlan, NewsItem, Status};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::{Mutex, PoisonError};

/// Local in-memory backend: no network at all. Used for demos and tests;
/// behaves like the remote stores, including failing a delete of an unknown
/// id and rejecting duplicate ids on insert.
pub struct MockStore {
    items: Mutex<Vec<NewsItem>>,
    milestones: Vec<Milestone>,
    roadmap: Vec<MonthPlan>,
}

impl MockStore {
    pub fn empty() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            milestones: Vec::new(),
            roadmap: Vec::new(),
        }
    }

    /// The fixed demo dataset: the 4-month content calendar plus a pair of
    /// KPI trackers and two sample items.
    pub fn with_seed_data() -> Self {
        let roadmap = vec![
            month_plan(
                "April",
                "Songkran & Soft Power",
                &["Elephant Pants Viral", "Water Festival Safety"],
            ),
            month_plan(
                "May",
                "Back to School",
                &["School Uniform Pricing", "Stationery Support"],
            ),
            month_plan(
                "June",
                "Fruit Season",
                &["Durian Export", "Mangosteen Festival"],
            ),
            month_plan(
                "July",
                "King's Birthday",
                &["Royal Projects", "Community Service"],
            ),
        ];

        let milestones = vec![
            Milestone {
                id: 1,
                name: "Published pieces".into(),
                description: "Content published this cycle".into(),
                target_kpi: 240,
                current_value: 96,
            },
            Milestone {
                id: 2,
                name: "Highlight coverage".into(),
                description: "Theme-aligned highlights".into(),
                target_kpi: 40,
                current_value: 18,
            },
        ];

        let items = vec![
            sample_item(
                "School uniform price checks in 10 provinces",
                NaiveDate::from_ymd_opt(2026, 5, 12).unwrap(),
                Category::Consumer,
                ContentType::PrPress,
                Status::Published,
            ),
            sample_item(
                "Durian export volume hits seasonal record",
                NaiveDate::from_ymd_opt(2026, 6, 2).unwrap(),
                Category::Economic,
                ContentType::Video,
                Status::Draft,
            ),
        ];

        Self {
            items: Mutex::new(items),
            milestones,
            roadmap,
        }
    }

    fn lock_items(&self) -> std::sync::MutexGuard<'_, Vec<NewsItem>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn month_plan(month: &str, theme: &str, highlights: &[&str]) -> MonthPlan {
    MonthPlan {
        month: month.into(),
        theme: theme.into(),
        highlights: highlights.iter().map(|h| h.to_string()).collect(),
    }
}

fn sample_item(
    summary: &str,
    date: NaiveDate,
    category: Category,
    content_type: ContentType,
    status: Status,
) -> NewsItem {
    NewsItem {
        id: uuid::Uuid::new_v4().to_string(),
        summary: summary.into(),
        date,
        category,
        content_type,
        status,
        is_highlight: false,
        original_text: summary.into(),
        timestamp: Utc::now(),
    }
}

#[async_trait]
impl NewsStore for MockStore {
    async fn list_news(&self) -> Result<Vec<NewsItem>, StoreError> {
        let mut items = self.lock_items().clone();
        items.sort_by(|a, b| b.date.cmp(&a.date).then(b.timestamp.cmp(&a.timestamp)));
        Ok(items)
    }

    async fn insert_news(&self, item: NewsItem) -> Result<NewsItem, StoreError> {
        let mut items = self.lock_items();
        if items.iter().any(|existing| existing.id == item.id) {
            return Err(StoreError::Duplicate(item.id));
        }
        items.push(item.clone());
        Ok(item)
    }

    async fn update_news(&self, item: &NewsItem) -> Result<(), StoreError> {
        let mut items = self.lock_items();
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                *existing = item.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(item.id.clone())),
        }
    }

    async fn delete_news(&self, id: &str) -> Result<(), StoreError> {
        let mut items = self.lock_items();
        let before = items.len();
        items.retain(|existing| existing.id != id);
        if items.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn list_milestones(&self) -> Result<Vec<Milestone>, StoreError> {
        Ok(self.milestones.clone())
    }

    async fn list_roadmap(&self) -> Result<Vec<MonthPlan>, StoreError> {
        Ok(self.roadmap.clone())
    }
}
