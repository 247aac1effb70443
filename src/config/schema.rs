use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:4001";
pub const DEFAULT_REQUEST_TIMEOUT: &str = "10s";
pub const DEFAULT_PAGE_SIZE: u32 = 15;
pub const DEFAULT_CACHE_TTL: &str = "1h";

/// Client configuration.
///
/// Every key is optional; missing keys fall back to the defaults above.
///
/// Example YAML:
/// ```yaml
/// backend_url: "http://localhost:4001"
/// request_timeout: "10s"
/// page_size: 15
/// theme: auto
/// cache:
///   enabled: true
///   ttl: "1h"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the backend (default: http://localhost:4001)
    #[serde(default)]
    pub backend_url: Option<String>,

    /// Per-request timeout as a humantime duration, e.g. "10s"
    #[serde(default)]
    pub request_timeout: Option<String>,

    /// Posts per board page
    #[serde(default)]
    pub page_size: Option<u32>,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub cache: CacheSettings,
}

impl Config {
    pub fn backend_url(&self) -> &str {
        self.backend_url.as_deref().unwrap_or(DEFAULT_BACKEND_URL)
    }

    /// Request timeout; an unparseable value falls back to the default
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
            .as_deref()
            .and_then(|s| humantime::parse_duration(s).ok())
            .unwrap_or(Duration::from_secs(10))
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

/// Disk cache for read-only roster and pledge lookups.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CacheSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// How long a cached response stays fresh, e.g. "1h"
    #[serde(default)]
    pub ttl: Option<String>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: None,
        }
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        self.ttl
            .as_deref()
            .and_then(|s| humantime::parse_duration(s).ok())
            .unwrap_or(Duration::from_secs(3600))
    }
}

fn default_true() -> bool {
    true
}

/// Color theme for the quiz UI
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Detect from the terminal background
    #[default]
    Auto,
    Dark,
    Light,
}
