use rusqlite::{params, Connection, Transaction};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Rusqlite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

pub fn setup_content_db(conn: &mut Connection) -> Result<(), SetupError> {
    let tx = conn.transaction()?;

    println!("- Creating 'news_items' table...");
    tx.execute(
        "CREATE TABLE IF NOT EXISTS news_items (
            id TEXT PRIMARY KEY,
            summary TEXT NOT NULL,
            date TEXT NOT NULL,
            category TEXT NOT NULL,
            content_type TEXT NOT NULL,
            status TEXT NOT NULL CHECK(status IN ('Draft', 'Published')),
            is_highlight INTEGER NOT NULL DEFAULT 0,
            original_text TEXT NOT NULL,
            timestamp TEXT NOT NULL
        )",
        [],
    )?;

    println!("- Creating 'milestones' table...");
    tx.execute(
        "CREATE TABLE IF NOT EXISTS milestones (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            target_kpi INTEGER NOT NULL,
            current_value INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )?;

    println!("- Creating 'roadmaps' table...");
    tx.execute(
        "CREATE TABLE IF NOT EXISTS roadmaps (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            month TEXT NOT NULL,
            theme TEXT NOT NULL,
            highlights TEXT NOT NULL -- JSON array of strings
        )",
        [],
    )?;

    seed_planning_tables(&tx)?;

    tx.commit()?;
    Ok(())
}

/// Seeds the static 4-month content calendar and the KPI trackers. Idempotent
/// so a re-run against an existing database leaves edited values alone.
fn seed_planning_tables(tx: &Transaction) -> Result<(), SetupError> {
    println!("- Seeding roadmap...");
    let roadmap: [(&str, &str, &[&str]); 4] = [
        (
            "April",
            "Songkran & Soft Power",
            &["Elephant Pants Viral", "Water Festival Safety"],
        ),
        (
            "May",
            "Back to School",
            &["School Uniform Pricing", "Stationery Support"],
        ),
        (
            "June",
            "Fruit Season",
            &["Durian Export", "Mangosteen Festival"],
        ),
        (
            "July",
            "King's Birthday",
            &["Royal Projects", "Community Service"],
        ),
    ];
    for (index, (month, theme, highlights)) in roadmap.iter().enumerate() {
        let highlights_json = serde_json::to_string(highlights)?;
        tx.execute(
            "INSERT OR IGNORE INTO roadmaps (id, month, theme, highlights) VALUES (?1, ?2, ?3, ?4)",
            params![(index + 1) as i64, month, theme, highlights_json],
        )?;
        println!("  > {} - {}", month, theme);
    }

    println!("- Seeding milestones...");
    // Starting values match the in-memory demo backend so switching backends
    // tells the same KPI story.
    let milestones: [(i64, &str, &str, i64, i64); 2] = [
        (1, "Published pieces", "Content published this cycle", 240, 96),
        (2, "Highlight coverage", "Theme-aligned highlights", 40, 18),
    ];
    for (id, name, description, target, current) in milestones {
        tx.execute(
            "INSERT OR IGNORE INTO milestones (id, name, description, target_kpi, current_value) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, name, description, target, current],
        )?;
        println!("  > {} (target {})", name, target);
    }

    Ok(())
}
