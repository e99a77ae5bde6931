use crate::datasource::{NewsStore, StoreError};
use crate::models::{Milestone, MonthPlan, NewsDraft, NewsItem};
use chrono::Utc;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Lifecycle of the initial collection load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    LoadFailed,
}

/// Single source of truth for the loaded record collection and the read-only
/// planning data. Views receive snapshots and request mutations through the
/// methods here; nothing else touches the collection.
///
/// Locks are only taken after the backend call has resolved, so a failed
/// mutation leaves the in-memory collection exactly as it was; there is no
/// optimistic write to roll back.
pub struct ContentState {
    store: Arc<dyn NewsStore>,
    items: RwLock<Vec<NewsItem>>,
    milestones: RwLock<Vec<Milestone>>,
    roadmap: RwLock<Vec<MonthPlan>>,
    load: Mutex<LoadState>,
}

fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| {
        log::error!("Content collection lock was poisoned! Recovering lock.");
        poisoned.into_inner()
    })
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| {
        log::error!("Content collection lock was poisoned! Recovering lock.");
        poisoned.into_inner()
    })
}

impl ContentState {
    pub fn new(store: Arc<dyn NewsStore>) -> Self {
        Self {
            store,
            items: RwLock::new(Vec::new()),
            milestones: RwLock::new(Vec::new()),
            roadmap: RwLock::new(Vec::new()),
            load: Mutex::new(LoadState::Idle),
        }
    }

    fn set_load(&self, state: LoadState) {
        *self.load.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    pub fn load_state(&self) -> LoadState {
        *self.load.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches all three collections in parallel and replaces the local
    /// state wholesale. If any one fetch fails, none of the collections is
    /// populated for this cycle: they are left empty, the failure is logged,
    /// and the state moves to `LoadFailed`. No automatic retry.
    pub async fn refresh(&self) {
        self.set_load(LoadState::Loading);
        write_lock(&self.items).clear();
        write_lock(&self.milestones).clear();
        write_lock(&self.roadmap).clear();

        let fetched = futures_util::try_join!(
            self.store.list_news(),
            self.store.list_milestones(),
            self.store.list_roadmap(),
        );

        match fetched {
            Ok((news, milestones, roadmap)) => {
                *write_lock(&self.items) = news;
                *write_lock(&self.milestones) = milestones;
                *write_lock(&self.roadmap) = roadmap;
                self.set_load(LoadState::Loaded);
            }
            Err(e) => {
                log::error!("Initial data load failed: {}", e);
                self.set_load(LoadState::LoadFailed);
            }
        }
    }

    /// Mints an id client-side, persists the new item, and prepends the row
    /// the backend echoed to the front of the collection. No re-fetch.
    pub async fn add(&self, draft: NewsDraft) -> Result<NewsItem, StoreError> {
        let original_text = draft
            .original_text
            .clone()
            .unwrap_or_else(|| draft.summary.clone());

        let item = NewsItem {
            id: Uuid::new_v4().to_string(),
            summary: draft.summary,
            date: draft.date,
            category: draft.category,
            content_type: draft.content_type,
            status: draft.status,
            is_highlight: draft.is_highlight,
            original_text,
            timestamp: Utc::now(),
        };

        let stored = self.store.insert_news(item).await?;
        write_lock(&self.items).insert(0, stored.clone());
        Ok(stored)
    }

    /// Persists the full changed record, then replaces the matching entry by
    /// id in place, preserving collection order. The creation `timestamp` of
    /// the existing entry is kept; it is never replaceable.
    pub async fn update(&self, item: NewsItem) -> Result<(), StoreError> {
        self.store.update_news(&item).await?;

        let mut items = write_lock(&self.items);
        if let Some(existing) = items.iter_mut().find(|e| e.id == item.id) {
            let created_at = existing.timestamp;
            *existing = item;
            existing.timestamp = created_at;
        }
        Ok(())
    }

    /// Deletes by id, then removes the matching entry from the collection.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete_news(id).await?;
        write_lock(&self.items).retain(|e| e.id != id);
        Ok(())
    }

    // --- read-only projections handed to the views ---

    pub fn items(&self) -> Vec<NewsItem> {
        read_lock(&self.items).clone()
    }

    pub fn find_item(&self, id: &str) -> Option<NewsItem> {
        read_lock(&self.items).iter().find(|e| e.id == id).cloned()
    }

    pub fn milestones(&self) -> Vec<Milestone> {
        read_lock(&self.milestones).clone()
    }

    pub fn roadmap(&self) -> Vec<MonthPlan> {
        read_lock(&self.roadmap).clone()
    }
}
