// --- File: crates/playon_config/src/models.rs ---

use serde::{Deserialize, Serialize};

/// Production API root used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://playon.app.br/playon/api";

// --- REST API Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String, // Loaded via PLAYON__API__BASE_URL
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// --- Schedule Config ---
// Fallback operating hours for gyms that do not publish their own, and the
// time zone that decides what "today" and "the current hour" are.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScheduleConfig {
    #[serde(default = "default_open_hour")]
    pub default_open_hour: u8,
    #[serde(default = "default_close_hour")]
    pub default_close_hour: u8,
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            default_open_hour: default_open_hour(),
            default_close_hour: default_close_hour(),
            time_zone: default_time_zone(),
        }
    }
}

impl ScheduleConfig {
    /// Parses `time_zone`, falling back to UTC for unknown names.
    pub fn tz(&self) -> chrono_tz::Tz {
        self.time_zone.parse().unwrap_or_else(|_| {
            tracing::warn!(
                "Unknown time zone '{}' in schedule config, using UTC",
                self.time_zone
            );
            chrono_tz::UTC
        })
    }
}

// --- Session Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_storage_path")]
    pub storage_path: String, // Where the signed-in user is persisted between runs
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
        }
    }
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub directory: Option<String>, // Daily rolling log files are written here when set
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_open_hour() -> u8 {
    8
}

fn default_close_hour() -> u8 {
    23
}

fn default_time_zone() -> String {
    "America/Sao_Paulo".to_string()
}

fn default_storage_path() -> String {
    ".playon/session.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
