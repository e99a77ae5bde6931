use crate::config::Config;
use crate::datasource::StoreError;
use crate::helper::analysis_helpers::NewsAnalyzer;
use crate::helper::dashboard_helpers;
use crate::models::db_operations::news_db_operations::DbError;
use crate::models::NewsDraft;
use crate::state::ContentState;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

pub fn config_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/is_server_active", web::get().to(is_server_active))
            .route("/news", web::get().to(list_news))
            .route("/news", web::post().to(create_news))
            .route("/news/{id}", web::put().to(update_news))
            .route("/news/{id}", web::delete().to(delete_news))
            .route("/stats", web::get().to(get_stats))
            .route("/analyze", web::post().to(analyze_news)),
    );
}

fn store_error_response(e: StoreError, operation: &str) -> HttpResponse {
    match &e {
        StoreError::Unsupported(_) => HttpResponse::NotImplemented().body(e.to_string()),
        StoreError::NotFound(_) | StoreError::Db(DbError::NotFound(_)) => {
            HttpResponse::NotFound().body(e.to_string())
        }
        _ => {
            log::error!("Failed to {}: {}", operation, e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

async fn is_server_active() -> impl Responder {
    HttpResponse::Ok().body("active")
}

async fn list_news(state: web::Data<ContentState>) -> impl Responder {
    HttpResponse::Ok().json(state.items())
}

async fn get_stats(state: web::Data<ContentState>) -> impl Responder {
    HttpResponse::Ok().json(dashboard_helpers::compute_stats(&state.items()))
}

async fn create_news(
    state: web::Data<ContentState>,
    draft: web::Json<NewsDraft>,
) -> impl Responder {
    let draft = draft.into_inner();
    if draft.summary.trim().is_empty() {
        return HttpResponse::BadRequest().body("A non-empty 'summary' field is required.");
    }

    match state.add(draft).await {
        Ok(created) => HttpResponse::Created().json(created),
        Err(e) => store_error_response(e, "create news item"),
    }
}

async fn update_news(
    state: web::Data<ContentState>,
    id: web::Path<String>,
    draft: web::Json<NewsDraft>,
) -> impl Responder {
    let id = id.into_inner();
    let draft = draft.into_inner();
    if draft.summary.trim().is_empty() {
        return HttpResponse::BadRequest().body("A non-empty 'summary' field is required.");
    }

    let mut item = match state.find_item(&id) {
        Some(existing) => existing,
        None => return HttpResponse::NotFound().body(format!("No news item '{}'", id)),
    };
    // Merge the submitted fields over the stored record. `id` and
    // `timestamp` are immutable; originalText only changes when supplied.
    item.summary = draft.summary;
    item.date = draft.date;
    item.category = draft.category;
    item.content_type = draft.content_type;
    item.status = draft.status;
    item.is_highlight = draft.is_highlight;
    if let Some(original_text) = draft.original_text {
        item.original_text = original_text;
    }

    match state.update(item).await {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(e) => store_error_response(e, "update news item"),
    }
}

async fn delete_news(state: web::Data<ContentState>, id: web::Path<String>) -> impl Responder {
    match state.delete(&id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => store_error_response(e, "delete news item"),
    }
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    text: String,
}

/// Classifies raw text for the operations form. Always answers with a
/// result: failures inside the analyzer collapse to its fixed fallback.
async fn analyze_news(
    analyzer: web::Data<NewsAnalyzer>,
    config: web::Data<Config>,
    req: web::Json<AnalyzeRequest>,
) -> impl Responder {
    let result = analyzer
        .analyze(&req.text, &config.current_month_theme)
        .await;
    HttpResponse::Ok().json(result)
}
