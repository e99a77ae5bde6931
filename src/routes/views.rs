use crate::config::Config;
use crate::datasource::StoreError;
use crate::helper::dashboard_helpers;
use crate::models::{Category, ContentType, NewsDraft, Notification, Status};
use crate::state::{ContentState, LoadState};
use actix_web::{web, HttpResponse, Responder};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tera::{Context, Tera};

pub fn config_views(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/dashboard", web::get().to(show_dashboard))
        .route("/daily", web::get().to(show_daily_ops))
        .route("/daily/add", web::post().to(add_news_action))
        .route("/daily/update", web::post().to(update_news_action))
        .route("/daily/delete", web::post().to(delete_news_action))
        .route("/archive", web::get().to(show_archive));
}

/// Draft fields of the daily-operations form. `contentType` matches the
/// input names in the templates (and the wire casing used everywhere else).
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsForm {
    summary: String,
    date: NaiveDate,
    category: Category,
    content_type: ContentType,
    status: Status,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateForm {
    id: String,
    summary: String,
    date: NaiveDate,
    category: Category,
    content_type: ContentType,
    status: Status,
}

#[derive(Deserialize)]
struct DeleteForm {
    id: String,
}

/// Notices travel as short codes on the redirect query string and are
/// expanded to user-facing text when the page renders.
#[derive(Deserialize)]
struct NoticeQuery {
    notice: Option<String>,
}

fn notification_for(code: &str) -> Option<Notification> {
    let (message, r#type) = match code {
        "saved" => ("Content saved.", "success"),
        "updated" => ("Content updated.", "success"),
        "deleted" => ("Content deleted.", "success"),
        "save_failed" => ("Saving failed. Please try again.", "error"),
        "update_failed" => ("Updating failed. Please try again.", "error"),
        "delete_failed" => ("Deleting failed. Please try again.", "error"),
        "not_found" => ("That item no longer exists.", "error"),
        "summary_required" => ("A summary is required.", "error"),
        "unsupported" => (
            "Writing is not yet supported on this backend.",
            "error",
        ),
        _ => return None,
    };
    Some(Notification {
        message: message.to_string(),
        r#type: r#type.to_string(),
    })
}

fn redirect_with_notice(code: &str) -> HttpResponse {
    HttpResponse::Found()
        .append_header(("location", format!("/daily?notice={}", code)))
        .finish()
}

/// Maps a facade failure to the notice code shown after redirect.
fn mutation_failure_code(e: &StoreError, failure: &'static str) -> &'static str {
    use crate::models::db_operations::news_db_operations::DbError;
    match e {
        StoreError::Unsupported(_) => "unsupported",
        StoreError::NotFound(_) | StoreError::Db(DbError::NotFound(_)) => "not_found",
        _ => failure,
    }
}

fn render(tera: &Tera, template: &str, ctx: &Context) -> HttpResponse {
    match tera.render(template, ctx) {
        Ok(rendered) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(rendered),
        Err(err) => {
            log::error!("Template rendering error: {}", err);
            HttpResponse::InternalServerError().body("Error rendering page.")
        }
    }
}

async fn index() -> impl Responder {
    HttpResponse::Found()
        .append_header(("location", "/dashboard"))
        .finish()
}

async fn show_dashboard(
    tera: web::Data<Tera>,
    state: web::Data<ContentState>,
) -> impl Responder {
    let items = state.items();
    let milestones = state.milestones();
    let roadmap = state.roadmap();

    let mut ctx = Context::new();
    ctx.insert("active_tab", "dashboard");
    ctx.insert("stats", &dashboard_helpers::compute_stats(&items));
    ctx.insert("milestones", &dashboard_helpers::milestone_views(&milestones));
    ctx.insert("roadmap", &roadmap);
    // Empty planning tables render the "no data" placeholder, not bare charts.
    ctx.insert("has_data", &(!milestones.is_empty() || !roadmap.is_empty()));
    ctx.insert(
        "load_failed",
        &(state.load_state() == LoadState::LoadFailed),
    );

    render(&tera, "dashboard.html", &ctx)
}

async fn show_daily_ops(
    tera: web::Data<Tera>,
    state: web::Data<ContentState>,
    config: web::Data<Config>,
    query: web::Query<NoticeQuery>,
) -> impl Responder {
    let mut ctx = Context::new();
    ctx.insert("active_tab", "daily");
    ctx.insert("news_items", &state.items());
    ctx.insert("current_month_theme", &config.current_month_theme);
    ctx.insert("today", &Utc::now().date_naive().format("%Y-%m-%d").to_string());

    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    let content_types: Vec<&str> = ContentType::ALL.iter().map(|c| c.as_str()).collect();
    let statuses: Vec<&str> = Status::ALL.iter().map(|s| s.as_str()).collect();
    ctx.insert("categories", &categories);
    ctx.insert("content_types", &content_types);
    ctx.insert("statuses", &statuses);

    if let Some(notification) = query.notice.as_deref().and_then(notification_for) {
        ctx.insert("notification", &notification);
    }

    render(&tera, "daily.html", &ctx)
}

async fn show_archive(tera: web::Data<Tera>, state: web::Data<ContentState>) -> impl Responder {
    let mut ctx = Context::new();
    ctx.insert("active_tab", "archive");
    ctx.insert("news_items", &state.items());
    render(&tera, "archive.html", &ctx)
}

async fn add_news_action(
    state: web::Data<ContentState>,
    form: web::Form<NewsForm>,
) -> impl Responder {
    let form = form.into_inner();
    if form.summary.trim().is_empty() {
        return redirect_with_notice("summary_required");
    }

    let draft = NewsDraft {
        summary: form.summary,
        date: form.date,
        category: form.category,
        content_type: form.content_type,
        status: form.status,
        is_highlight: false,
        original_text: None,
    };

    match state.add(draft).await {
        Ok(_) => redirect_with_notice("saved"),
        Err(e) => {
            log::error!("Failed to save news item: {}", e);
            redirect_with_notice(mutation_failure_code(&e, "save_failed"))
        }
    }
}

async fn update_news_action(
    state: web::Data<ContentState>,
    form: web::Form<UpdateForm>,
) -> impl Responder {
    let form = form.into_inner();
    if form.summary.trim().is_empty() {
        return redirect_with_notice("summary_required");
    }

    // Merge the draft over the existing record; originalText, the highlight
    // flag, and the creation timestamp are not edited here.
    let mut item = match state.find_item(&form.id) {
        Some(existing) => existing,
        None => return redirect_with_notice("not_found"),
    };
    item.summary = form.summary;
    item.date = form.date;
    item.category = form.category;
    item.content_type = form.content_type;
    item.status = form.status;

    match state.update(item).await {
        Ok(()) => redirect_with_notice("updated"),
        Err(e) => {
            log::error!("Failed to update news item '{}': {}", form.id, e);
            redirect_with_notice(mutation_failure_code(&e, "update_failed"))
        }
    }
}

async fn delete_news_action(
    state: web::Data<ContentState>,
    form: web::Form<DeleteForm>,
) -> impl Responder {
    match state.delete(&form.id).await {
        Ok(()) => redirect_with_notice("deleted"),
        Err(e) => {
            log::error!("Failed to delete news item '{}': {}", form.id, e);
            redirect_with_notice(mutation_failure_code(&e, "delete_failed"))
        }
    }
}
