use actix_web::http::header;
use actix_web::{test, web, App};
use async_trait::async_trait;
use contenthub_backend::config::{Config, DataBackend, WebConfig};
use contenthub_backend::datasource::{MockStore, NewsStore, StoreError};
use contenthub_backend::models::db_operations::news_db_operations::DbError;
use contenthub_backend::models::{Milestone, MonthPlan, NewsItem};
use contenthub_backend::routes::views;
use contenthub_backend::state::ContentState;
use std::sync::Arc;
use tera::Tera;

fn test_config() -> Config {
    Config {
        web: WebConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        data_backend: DataBackend::Mock,
        database_path: String::new(),
        sheet_api_url: String::new(),
        gemini_api_key: String::new(),
        current_month_theme: "Back to School".to_string(),
        allowed_origins: String::new(),
        log_level: "info".to_string(),
    }
}

fn templates() -> Tera {
    Tera::new("templates/**/*.html").unwrap()
}

async fn loaded_state(store: Arc<dyn NewsStore>) -> web::Data<ContentState> {
    let state = web::Data::new(ContentState::new(store));
    state.refresh().await;
    state
}

/// Planning-table reads fail while the news listing still works, so a refresh
/// must end in the failed state with everything empty.
struct BrokenPlanningStore;

#[async_trait]
impl NewsStore for BrokenPlanningStore {
    async fn list_news(&self) -> Result<Vec<NewsItem>, StoreError> {
        Ok(Vec::new())
    }

    async fn insert_news(&self, item: NewsItem) -> Result<NewsItem, StoreError> {
        Ok(item)
    }

    async fn update_news(&self, _item: &NewsItem) -> Result<(), StoreError> {
        Ok(())
    }

    async fn delete_news(&self, _id: &str) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_milestones(&self) -> Result<Vec<Milestone>, StoreError> {
        Err(StoreError::Db(DbError::NotFound(
            "milestones table unreachable".to_string(),
        )))
    }

    async fn list_roadmap(&self) -> Result<Vec<MonthPlan>, StoreError> {
        Ok(Vec::new())
    }
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(test_config()))
                .app_data(web::Data::new(templates()))
                .app_data($state.clone())
                .configure(views::config_views),
        )
        .await
    };
}

#[actix_rt::test]
async fn dashboard_renders_placeholder_when_planning_data_is_empty() {
    let state = loaded_state(Arc::new(MockStore::empty())).await;
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/dashboard").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = std::str::from_utf8(&body).unwrap();

    assert!(html.contains("No Live Data Found"));
    assert!(!html.contains("Milestone Tracker"));
    assert!(!html.contains("could not be reached"));
}

#[actix_rt::test]
async fn dashboard_renders_charts_when_data_is_seeded() {
    let state = loaded_state(Arc::new(MockStore::with_seed_data())).await;
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/dashboard").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = std::str::from_utf8(&body).unwrap();

    assert!(!html.contains("No Live Data Found"));
    assert!(html.contains("Milestone Tracker"));
    assert!(html.contains("Songkran &amp; Soft Power"));
    assert!(html.contains("Published pieces"));
}

#[actix_rt::test]
async fn dashboard_flags_a_failed_load() {
    let state = loaded_state(Arc::new(BrokenPlanningStore)).await;
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/dashboard").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = std::str::from_utf8(&body).unwrap();

    assert!(html.contains("could not be reached"));
    // Failed loads present as an empty workspace, not partial charts.
    assert!(html.contains("No Live Data Found"));
    assert!(!html.contains("Milestone Tracker"));
}

#[actix_rt::test]
async fn delete_of_missing_id_redirects_with_not_found_notice() {
    let state = loaded_state(Arc::new(MockStore::with_seed_data())).await;
    let before = state.items().len();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/daily/delete")
        .set_form([("id", "no-such-id")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::FOUND);
    let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert_eq!(location, "/daily?notice=not_found");
    assert_eq!(state.items().len(), before);
}

#[actix_rt::test]
async fn add_redirects_with_saved_notice_and_lists_the_item() {
    let state = loaded_state(Arc::new(MockStore::empty())).await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/daily/add")
        .set_form([
            ("summary", "School uniform price checks"),
            ("date", "2026-02-09"),
            ("category", "Economic"),
            ("contentType", "Video"),
            ("status", "Draft"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert_eq!(location, "/daily?notice=saved");

    let req = test::TestRequest::get().uri("/daily?notice=saved").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("Content saved."));
    assert!(html.contains("School uniform price checks"));
}

#[actix_rt::test]
async fn blank_summary_is_rejected_before_touching_the_store() {
    let state = loaded_state(Arc::new(MockStore::empty())).await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/daily/add")
        .set_form([
            ("summary", "   "),
            ("date", "2026-02-09"),
            ("category", "Economic"),
            ("contentType", "Video"),
            ("status", "Draft"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert_eq!(location, "/daily?notice=summary_required");
    assert!(state.items().is_empty());
}
