use crate::models::{Milestone, NewsItem, Status};
use serde::Serialize;

/// Aggregates computed over the whole collection at render time. Nothing is
/// stored; pending is always total minus published.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ContentStats {
    pub total: usize,
    pub published: usize,
    pub pending: usize,
}

pub fn compute_stats(items: &[NewsItem]) -> ContentStats {
    let total = items.len();
    let published = items
        .iter()
        .filter(|item| item.status == Status::Published)
        .count();
    ContentStats {
        total,
        published,
        pending: total - published,
    }
}

/// Completion percentage of a milestone, clamped to [0, 100] even when the
/// current value overshoots the target. A zero or negative target reads as 0%.
pub fn progress_percent(current: i64, target: i64) -> u32 {
    if target <= 0 {
        return 0;
    }
    let pct = (current as f64 / target as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u32
}

/// CSS class bucket for a progress bar: green at target, blue past halfway,
/// amber below.
pub fn progress_color(current: i64, target: i64) -> &'static str {
    let pct = if target > 0 {
        current as f64 / target as f64 * 100.0
    } else {
        0.0
    };
    if pct >= 100.0 {
        "progress-green"
    } else if pct >= 50.0 {
        "progress-blue"
    } else {
        "progress-amber"
    }
}

/// Template-facing milestone row with derived display values.
#[derive(Debug, Serialize)]
pub struct MilestoneView {
    pub name: String,
    pub description: String,
    pub target_kpi: i64,
    pub current_value: i64,
    pub percent: u32,
    pub color: &'static str,
}

pub fn milestone_views(milestones: &[Milestone]) -> Vec<MilestoneView> {
    milestones
        .iter()
        .map(|ms| MilestoneView {
            name: ms.name.clone(),
            description: ms.description.clone(),
            target_kpi: ms.target_kpi,
            current_value: ms.current_value,
            percent: progress_percent(ms.current_value, ms.target_kpi),
            color: progress_color(ms.current_value, ms.target_kpi),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ContentType};
    use chrono::{NaiveDate, Utc};

    fn item(status: Status) -> NewsItem {
        NewsItem {
            id: uuid::Uuid::new_v4().to_string(),
            summary: "x".into(),
            date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            category: Category::Economic,
            content_type: ContentType::Banner,
            status,
            is_highlight: false,
            original_text: "x".into(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn pending_is_total_minus_published() {
        let items = vec![
            item(Status::Published),
            item(Status::Draft),
            item(Status::Draft),
            item(Status::Published),
            item(Status::Published),
        ];
        let stats = compute_stats(&items);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.published, 3);
        assert_eq!(stats.pending, 2);
    }

    #[test]
    fn empty_collection_has_zero_stats() {
        let stats = compute_stats(&[]);
        assert_eq!(
            stats,
            ContentStats {
                total: 0,
                published: 0,
                pending: 0
            }
        );
    }

    #[test]
    fn progress_is_clamped_to_hundred() {
        assert_eq!(progress_percent(250, 100), 100);
        assert_eq!(progress_percent(100, 100), 100);
        assert_eq!(progress_percent(50, 100), 50);
        assert_eq!(progress_percent(0, 100), 0);
    }

    #[test]
    fn zero_target_reads_as_zero_percent() {
        assert_eq!(progress_percent(10, 0), 0);
        assert_eq!(progress_percent(10, -5), 0);
    }

    #[test]
    fn color_buckets_follow_thresholds() {
        assert_eq!(progress_color(100, 100), "progress-green");
        assert_eq!(progress_color(120, 100), "progress-green");
        assert_eq!(progress_color(50, 100), "progress-blue");
        assert_eq!(progress_color(49, 100), "progress-amber");
        assert_eq!(progress_color(10, 0), "progress-amber");
    }
}
