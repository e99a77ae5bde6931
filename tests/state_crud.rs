use async_trait::async_trait;
use chrono::NaiveDate;
use contenthub_backend::datasource::{MockStore, NewsStore, StoreError};
use contenthub_backend::models::{
    Category, ContentType, Milestone, MonthPlan, NewsDraft, NewsItem, Status,
};
use contenthub_backend::state::{ContentState, LoadState};
use std::sync::Arc;

fn draft(summary: &str, date: &str) -> NewsDraft {
    NewsDraft {
        summary: summary.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        category: Category::Economic,
        content_type: ContentType::Video,
        status: Status::Draft,
        is_highlight: false,
        original_text: None,
    }
}

async fn loaded_state() -> ContentState {
    let state = ContentState::new(Arc::new(MockStore::empty()));
    state.refresh().await;
    assert_eq!(state.load_state(), LoadState::Loaded);
    state
}

#[actix_rt::test]
async fn insert_mints_unique_ids_and_prepends() {
    let state = loaded_state().await;

    let a = state.add(draft("Test A", "2026-02-09")).await.unwrap();
    let b = state.add(draft("Test B", "2026-02-10")).await.unwrap();

    assert!(!a.id.is_empty());
    assert_ne!(a.id, b.id);

    // Most recently added first; no re-fetch happened.
    let items = state.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].summary, "Test B");
    assert_eq!(items[1].summary, "Test A");
}

#[actix_rt::test]
async fn insert_defaults_original_text_to_summary() {
    let state = loaded_state().await;
    let created = state.add(draft("Test A", "2026-02-09")).await.unwrap();
    assert_eq!(created.original_text, "Test A");
    assert!(!created.is_highlight);
}

#[actix_rt::test]
async fn update_replaces_fields_but_never_id_or_timestamp() {
    let state = loaded_state().await;
    let created = state.add(draft("Before", "2026-02-09")).await.unwrap();

    let mut changed = created.clone();
    changed.summary = "After".to_string();
    changed.status = Status::Published;
    changed.category = Category::PolicyToPeople;
    // A tampered creation instant must not survive the update.
    changed.timestamp = created.timestamp + chrono::Duration::hours(5);

    state.update(changed).await.unwrap();

    let items = state.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].summary, "After");
    assert_eq!(items[0].status, Status::Published);
    assert_eq!(items[0].category, Category::PolicyToPeople);
    assert_eq!(items[0].id, created.id);
    assert_eq!(items[0].timestamp, created.timestamp);
}

#[actix_rt::test]
async fn update_preserves_collection_order() {
    let state = loaded_state().await;
    let _a = state.add(draft("A", "2026-02-09")).await.unwrap();
    let b = state.add(draft("B", "2026-02-10")).await.unwrap();
    let _c = state.add(draft("C", "2026-02-11")).await.unwrap();

    let mut changed = b.clone();
    changed.summary = "B changed".to_string();
    state.update(changed).await.unwrap();

    let summaries: Vec<_> = state.items().into_iter().map(|i| i.summary).collect();
    assert_eq!(summaries, vec!["C", "B changed", "A"]);
}

#[actix_rt::test]
async fn delete_removes_exactly_one_record() {
    let state = loaded_state().await;
    let a = state.add(draft("A", "2026-02-09")).await.unwrap();
    let _b = state.add(draft("B", "2026-02-10")).await.unwrap();

    state.delete(&a.id).await.unwrap();

    let items = state.items();
    assert_eq!(items.len(), 1);
    assert!(items.iter().all(|i| i.id != a.id));
}

#[actix_rt::test]
async fn delete_of_unknown_id_fails_and_leaves_collection_unchanged() {
    let state = loaded_state().await;
    let _a = state.add(draft("A", "2026-02-09")).await.unwrap();

    let err = state.delete("no-such-id").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(state.items().len(), 1);
}

#[actix_rt::test]
async fn failed_insert_leaves_collection_unchanged() {
    // A store that rejects every write but loads fine.
    struct ReadOnly(MockStore);

    #[async_trait]
    impl NewsStore for ReadOnly {
        async fn list_news(&self) -> Result<Vec<NewsItem>, StoreError> {
            self.0.list_news().await
        }
        async fn insert_news(&self, _item: NewsItem) -> Result<NewsItem, StoreError> {
            Err(StoreError::Unsupported("writes in this test"))
        }
        async fn update_news(&self, _item: &NewsItem) -> Result<(), StoreError> {
            Err(StoreError::Unsupported("writes in this test"))
        }
        async fn delete_news(&self, _id: &str) -> Result<(), StoreError> {
            Err(StoreError::Unsupported("writes in this test"))
        }
        async fn list_milestones(&self) -> Result<Vec<Milestone>, StoreError> {
            self.0.list_milestones().await
        }
        async fn list_roadmap(&self) -> Result<Vec<MonthPlan>, StoreError> {
            self.0.list_roadmap().await
        }
    }

    let state = ContentState::new(Arc::new(ReadOnly(MockStore::empty())));
    state.refresh().await;

    let err = state.add(draft("A", "2026-02-09")).await.unwrap_err();
    assert!(err.is_unsupported());
    assert!(state.items().is_empty());
}

#[actix_rt::test]
async fn any_failed_fetch_aborts_the_whole_load() {
    // News loads, milestones do not: nothing may be populated.
    struct PartiallyDown(MockStore);

    #[async_trait]
    impl NewsStore for PartiallyDown {
        async fn list_news(&self) -> Result<Vec<NewsItem>, StoreError> {
            self.0.list_news().await
        }
        async fn insert_news(&self, item: NewsItem) -> Result<NewsItem, StoreError> {
            self.0.insert_news(item).await
        }
        async fn update_news(&self, item: &NewsItem) -> Result<(), StoreError> {
            self.0.update_news(item).await
        }
        async fn delete_news(&self, id: &str) -> Result<(), StoreError> {
            self.0.delete_news(id).await
        }
        async fn list_milestones(&self) -> Result<Vec<Milestone>, StoreError> {
            Err(StoreError::BadStatus {
                status: 500,
                body: "milestones offline".to_string(),
            })
        }
        async fn list_roadmap(&self) -> Result<Vec<MonthPlan>, StoreError> {
            self.0.list_roadmap().await
        }
    }

    let state = ContentState::new(Arc::new(PartiallyDown(MockStore::with_seed_data())));
    state.refresh().await;

    assert_eq!(state.load_state(), LoadState::LoadFailed);
    assert!(state.items().is_empty());
    assert!(state.milestones().is_empty());
    assert!(state.roadmap().is_empty());
}

#[actix_rt::test]
async fn refresh_replaces_state_wholesale() {
    let state = ContentState::new(Arc::new(MockStore::with_seed_data()));
    state.refresh().await;

    assert_eq!(state.load_state(), LoadState::Loaded);
    assert_eq!(state.items().len(), 2);
    assert_eq!(state.milestones().len(), 2);
    assert_eq!(state.roadmap().len(), 4);

    // A second refresh does not duplicate anything.
    state.refresh().await;
    assert_eq!(state.items().len(), 2);
    assert_eq!(state.roadmap().len(), 4);
}
