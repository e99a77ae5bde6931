use config; // Explicitly import the config crate
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

/// Which persistence backend the data-access facade binds to.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataBackend {
    Sqlite,
    Sheet,
    Mock,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub web: WebConfig,
    // These fields are populated from the .env file
    pub data_backend: DataBackend,
    pub database_path: String,
    pub sheet_api_url: String,
    pub gemini_api_key: String,
    pub current_month_theme: String,
    pub allowed_origins: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env(env_path: &Path) -> Result<Self, config::ConfigError> {
        // Load the specified .env file. Propagate an error if it fails.
        dotenvy::from_path(env_path).map_err(|e| {
            config::ConfigError::Message(format!(
                "FATAL: Failed to load .env file from '{}'. Error: {}",
                env_path.display(),
                e
            ))
        })?;

        // --- VALIDATION & EXTRACTION LOGIC ---
        let data_backend = env::var("DATA_BACKEND").unwrap_or_else(|_| "sqlite".to_string());
        if !matches!(data_backend.as_str(), "sqlite" | "sheet" | "mock") {
            return Err(config::ConfigError::Message(format!(
                "FATAL: 'DATA_BACKEND' must be one of 'sqlite', 'sheet', or 'mock' (got '{}').",
                data_backend
            )));
        }

        // DATABASE_PATH is only mandatory when the sqlite backend is active.
        let database_path = env::var("DATABASE_PATH").unwrap_or_default();
        if data_backend == "sqlite" {
            if database_path.is_empty() {
                return Err(config::ConfigError::Message(
                    "FATAL: Environment variable 'DATABASE_PATH' is not set in your .env file."
                        .to_string(),
                ));
            }
            if Path::new(&database_path).is_relative() {
                return Err(config::ConfigError::Message(format!(
                    "FATAL: The 'DATABASE_PATH' in your .env file is a relative path ('{}'). It MUST be an absolute path.",
                    database_path
                )));
            }
        }

        // SHEET_API_URL is only mandatory when the sheet backend is active.
        let sheet_api_url = env::var("SHEET_API_URL").unwrap_or_default();
        if data_backend == "sheet" && sheet_api_url.is_empty() {
            return Err(config::ConfigError::Message(
                "FATAL: Environment variable 'SHEET_API_URL' is not set in your .env file."
                    .to_string(),
            ));
        }

        // Optional credential. When absent the classification helper falls
        // back without making a network call; startup never fails over it.
        let gemini_api_key = env::var("GEMINI_API_KEY").unwrap_or_default();

        // Extract CURRENT_MONTH_THEME, defaulting to the active campaign.
        let current_month_theme =
            env::var("CURRENT_MONTH_THEME").unwrap_or_else(|_| "Back to School".to_string());

        // Extract ALLOWED_ORIGINS, defaulting to an empty string if not set.
        let allowed_origins = env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "".to_string());

        // Extract LOG_LEVEL, defaulting to "info" if not set.
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        // --- END VALIDATION & EXTRACTION ---

        let builder = config::Config::builder()
            // Load base settings from the TOML file (e.g., for web host/port).
            .add_source(config::File::new(
                "config/default.toml",
                config::FileFormat::Toml,
            ))
            // Manually set the values from the environment variables we just
            // read and validated.
            .set_override("data_backend", data_backend)?
            .set_override("database_path", database_path)?
            .set_override("sheet_api_url", sheet_api_url)?
            .set_override("gemini_api_key", gemini_api_key)?
            .set_override("current_month_theme", current_month_theme)?
            .set_override("allowed_origins", allowed_origins)?
            .set_override("log_level", log_level)?
            .build()?;

        builder.try_deserialize()
    }

    /// Returns the full path to the content database file inside its own folder.
    pub fn news_db_path(&self) -> PathBuf {
        PathBuf::from(&self.database_path)
            .join("content")
            .join("content.db")
    }
}
