use crate::models::{Milestone, MonthPlan, NewsItem};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Rusqlite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("Date/time parse error: {0}")]
    Chrono(#[from] chrono::ParseError),
    #[error("Item not found in database: {0}")]
    NotFound(String),
}

/// Parses a TEXT column holding one of the enum display strings
/// ("PR Press", "Trust & Impact", ...) into its typed form.
fn parse_enum_column<T: DeserializeOwned>(raw: String) -> Result<T, DbError> {
    Ok(serde_json::from_value(serde_json::Value::String(raw))?)
}

fn news_item_from_row(row: &Row) -> Result<NewsItem, DbError> {
    let date: String = row.get(2)?;
    let category: String = row.get(3)?;
    let content_type: String = row.get(4)?;
    let status: String = row.get(5)?;
    let timestamp: String = row.get(8)?;

    Ok(NewsItem {
        id: row.get(0)?,
        summary: row.get(1)?,
        date: NaiveDate::parse_from_str(&date, "%Y-%m-%d")?,
        category: parse_enum_column(category)?,
        content_type: parse_enum_column(content_type)?,
        status: parse_enum_column(status)?,
        is_highlight: row.get::<_, i64>(6)? != 0,
        original_text: row.get(7)?,
        timestamp: DateTime::parse_from_rfc3339(&timestamp)?.with_timezone(&Utc),
    })
}

const NEWS_COLUMNS: &str =
    "id, summary, date, category, content_type, status, is_highlight, original_text, timestamp";

// ====================================================================
// ====================== NEWS ITEM OPERATIONS ========================
// ====================================================================

/// Fetches the entire collection, most recent publication date first.
pub fn list_news(conn: &Connection) -> Result<Vec<NewsItem>, DbError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM news_items ORDER BY date DESC, timestamp DESC",
        NEWS_COLUMNS
    ))?;
    let mut rows = stmt.query([])?;

    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(news_item_from_row(row)?);
    }
    Ok(items)
}

pub fn read_news_by_id(conn: &Connection, id: &str) -> Result<NewsItem, DbError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM news_items WHERE id = ?1",
        NEWS_COLUMNS
    ))?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(row) => news_item_from_row(row),
        None => Err(DbError::NotFound(format!("news item '{}'", id))),
    }
}

/// Inserts a fully-formed item (id already minted by the caller) and returns
/// the row as stored, so the caller reconciles from what the database echoed.
pub fn insert_news(conn: &Connection, item: &NewsItem) -> Result<NewsItem, DbError> {
    conn.execute(
        "INSERT INTO news_items \
            (id, summary, date, category, content_type, status, is_highlight, original_text, timestamp) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            item.id,
            item.summary,
            item.date.format("%Y-%m-%d").to_string(),
            item.category.as_str(),
            item.content_type.as_str(),
            item.status.as_str(),
            item.is_highlight as i64,
            item.original_text,
            item.timestamp.to_rfc3339(),
        ],
    )?;
    read_news_by_id(conn, &item.id)
}

/// Updates every replaceable field of an existing item. `id` and `timestamp`
/// are never written after creation.
pub fn update_news(conn: &Connection, item: &NewsItem) -> Result<(), DbError> {
    let changed = conn.execute(
        "UPDATE news_items SET \
            summary = ?1, date = ?2, category = ?3, content_type = ?4, \
            status = ?5, is_highlight = ?6, original_text = ?7 \
         WHERE id = ?8",
        params![
            item.summary,
            item.date.format("%Y-%m-%d").to_string(),
            item.category.as_str(),
            item.content_type.as_str(),
            item.status.as_str(),
            item.is_highlight as i64,
            item.original_text,
            item.id,
        ],
    )?;
    if changed == 0 {
        return Err(DbError::NotFound(format!("news item '{}'", item.id)));
    }
    Ok(())
}

pub fn delete_news(conn: &Connection, id: &str) -> Result<(), DbError> {
    let deleted = conn.execute("DELETE FROM news_items WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(DbError::NotFound(format!("news item '{}'", id)));
    }
    Ok(())
}

// ====================================================================
// =================== READ-ONLY PLANNING TABLES ======================
// ====================================================================

pub fn list_milestones(conn: &Connection) -> Result<Vec<Milestone>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, target_kpi, current_value \
         FROM milestones ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(Milestone {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            target_kpi: row.get(3)?,
            current_value: row.get(4)?,
        })
    })?;

    let mut milestones = Vec::new();
    for row in rows {
        milestones.push(row?);
    }
    Ok(milestones)
}

pub fn list_roadmap(conn: &Connection) -> Result<Vec<MonthPlan>, DbError> {
    let mut stmt =
        conn.prepare("SELECT month, theme, highlights FROM roadmaps ORDER BY id ASC")?;
    let mut rows = stmt.query([])?;

    let mut roadmap = Vec::new();
    while let Some(row) = rows.next()? {
        let highlights_json: String = row.get(2)?;
        roadmap.push(MonthPlan {
            month: row.get(0)?,
            theme: row.get(1)?,
            // Stored as a JSON array in a TEXT column.
            highlights: serde_json::from_str(&highlights_json)?,
        });
    }
    Ok(roadmap)
}
