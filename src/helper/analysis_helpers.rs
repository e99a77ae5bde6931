use crate::models::{AnalysisResult, Category, ContentType};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MODEL: &str = "gemini-1.5-flash";

#[derive(Error, Debug)]
enum AnalysisError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Model endpoint returned HTTP {status}: {body}")]
    BadStatus { status: u16, body: String },
    #[error("Model response carried no candidate text")]
    EmptyResponse,
    #[error("Model output failed to parse: {0}")]
    BadOutput(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Classifies raw news text against the current monthly theme by calling the
/// Gemini `generateContent` endpoint with a strict JSON response schema.
///
/// Fails closed: a missing credential short-circuits to the fixed fallback
/// without any network call, and every remote failure mode (auth, network,
/// non-2xx, schema mismatch) collapses into the same fallback. Callers never
/// see an error.
pub struct NewsAnalyzer {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl NewsAnalyzer {
    pub fn new(api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Points the analyzer at a different endpoint. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn analyze(&self, text: &str, current_month_theme: &str) -> AnalysisResult {
        if self.api_key.is_empty() {
            log::warn!("No Gemini API key configured; skipping analysis and using the fallback.");
            return fallback_result();
        }

        match self.request_analysis(text, current_month_theme).await {
            Ok(result) => result,
            Err(e) => {
                log::error!("News content analysis failed: {}", e);
                fallback_result()
            }
        }
    }

    async fn request_analysis(
        &self,
        text: &str,
        current_month_theme: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let prompt = format!(
            "Analyze the following news text for the Ministry of Commerce (MOC) content strategy.\n\
             \n\
             1. Summarize the content concisely.\n\
             2. Determine the most suitable content format from: 'Video', 'Banner', 'PR Press', or 'Photo Album'.\n\
             3. Categorize it into one of these three pillars: 'Trust & Impact', 'MOC Update', or 'Policy to People'.\n\
             4. Check if the content relates to the current monthly theme: \"{}\". \
             If it matches strictly or loosely, set isHighlight to true.\n\
             \n\
             News Content:\n\"{}\"",
            current_month_theme, text
        );

        let content_types: Vec<&str> = ContentType::ALL.iter().map(|c| c.as_str()).collect();
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "summary": { "type": "STRING" },
                        "contentType": { "type": "STRING", "enum": content_types },
                        "category": { "type": "STRING", "enum": Category::PILLARS },
                        "isHighlight": { "type": "BOOLEAN" }
                    },
                    "required": ["summary", "contentType", "category", "isHighlight"]
                }
            }
        });

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, MODEL, self.api_key
        );
        let resp = self.client.post(&url).json(&body).send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(AnalysisError::BadStatus { status, body });
        }

        let parsed: GenerateContentResponse = resp.json().await?;
        let json_text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or(AnalysisError::EmptyResponse)?;

        Ok(serde_json::from_str(json_text)?)
    }
}

/// The fixed result used whenever analysis cannot run.
pub fn fallback_result() -> AnalysisResult {
    AnalysisResult {
        summary: "Automatic analysis was not available. Please review the content manually.".into(),
        content_type: ContentType::PrPress,
        category: Category::MocUpdate,
        is_highlight: false,
    }
}
