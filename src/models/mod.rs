use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Editorial pillar a news item is filed under.
///
/// The entry form and the AI classifier historically used two different
/// vocabularies; both sets are valid values for stored records. The
/// classifier only ever emits the pillar subset (see `Category::PILLARS`).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Economic,
    Policy,
    Consumer,
    #[serde(rename = "Trust & Impact")]
    TrustAndImpact,
    #[serde(rename = "MOC Update")]
    MocUpdate,
    #[serde(rename = "Policy to People")]
    PolicyToPeople,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Economic,
        Category::Policy,
        Category::Consumer,
        Category::TrustAndImpact,
        Category::MocUpdate,
        Category::PolicyToPeople,
    ];

    /// The strategy pillars the classifier is constrained to.
    pub const PILLARS: [&'static str; 3] = ["Trust & Impact", "MOC Update", "Policy to People"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Economic => "Economic",
            Category::Policy => "Policy",
            Category::Consumer => "Consumer",
            Category::TrustAndImpact => "Trust & Impact",
            Category::MocUpdate => "MOC Update",
            Category::PolicyToPeople => "Policy to People",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Video,
    Banner,
    #[serde(rename = "PR Press")]
    PrPress,
    #[serde(rename = "Photo Album")]
    PhotoAlbum,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::Video,
        ContentType::Banner,
        ContentType::PrPress,
        ContentType::PhotoAlbum,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Video => "Video",
            ContentType::Banner => "Banner",
            ContentType::PrPress => "PR Press",
            ContentType::PhotoAlbum => "Photo Album",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Draft,
    Published,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::Draft, Status::Published];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "Draft",
            Status::Published => "Published",
        }
    }
}

/// A single planned or published piece of content. Field names are camelCase
/// on the wire to match the spreadsheet-proxy row shape.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub summary: String,
    pub date: NaiveDate,
    pub category: Category,
    pub content_type: ContentType,
    pub status: Status,
    pub is_highlight: bool,
    pub original_text: String,
    pub timestamp: DateTime<Utc>,
}

/// Insert payload: everything except the `id`, which is minted by the
/// controller at insert time, and the `timestamp`, set at submission.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewsDraft {
    pub summary: String,
    pub date: NaiveDate,
    pub category: Category,
    pub content_type: ContentType,
    pub status: Status,
    #[serde(default)]
    pub is_highlight: bool,
    /// Defaults to the summary text when not supplied separately.
    #[serde(default)]
    pub original_text: Option<String>,
}

/// KPI progress tracker. Read-only in this codebase; rows are seeded by the
/// setup CLI or come from the configured backend.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(rename = "targetKPI")]
    pub target_kpi: i64,
    pub current_value: i64,
}

/// One month of the static content calendar.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MonthPlan {
    pub month: String,
    pub theme: String,
    pub highlights: Vec<String>,
}

/// Structured guess produced by the classification helper.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    pub content_type: ContentType,
    pub category: Category,
    pub is_highlight: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Notification {
    pub message: String,
    pub r#type: String, // 'success' or 'error'
}

pub mod db_operations;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_wire_names_match_display_strings() {
        let json = serde_json::to_string(&Category::TrustAndImpact).unwrap();
        assert_eq!(json, "\"Trust & Impact\"");
        let json = serde_json::to_string(&ContentType::PrPress).unwrap();
        assert_eq!(json, "\"PR Press\"");
        let back: Category = serde_json::from_str("\"Policy to People\"").unwrap();
        assert_eq!(back, Category::PolicyToPeople);
    }

    #[test]
    fn news_item_uses_camel_case_row_names() {
        let item = NewsItem {
            id: "abc".into(),
            summary: "Durian exports up".into(),
            date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            category: Category::Economic,
            content_type: ContentType::Video,
            status: Status::Draft,
            is_highlight: false,
            original_text: "Durian exports up".into(),
            timestamp: Utc::now(),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("contentType").is_some());
        assert!(value.get("isHighlight").is_some());
        assert!(value.get("originalText").is_some());
    }

    #[test]
    fn milestone_target_uses_kpi_casing() {
        let ms = Milestone {
            id: 1,
            name: "Reach".into(),
            description: "Monthly reach".into(),
            target_kpi: 100,
            current_value: 40,
        };
        let value = serde_json::to_value(&ms).unwrap();
        assert!(value.get("targetKPI").is_some());
        assert!(value.get("currentValue").is_some());
    }
}
