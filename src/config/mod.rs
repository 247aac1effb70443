pub mod init;
mod schema;

pub use schema::{
    CacheSettings, Config, Theme, DEFAULT_BACKEND_URL, DEFAULT_CACHE_TTL, DEFAULT_PAGE_SIZE,
    DEFAULT_REQUEST_TIMEOUT,
};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Environment variable that overrides `backend_url`
pub const BACKEND_URL_ENV: &str = "MINSIM_BACKEND_URL";

fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from(std::env::var("HOME").unwrap_or_default()))
}

/// Get the config directory path (~/.config/minsim/)
pub fn get_config_dir() -> PathBuf {
    home_dir().join(".config").join("minsim")
}

/// Get the default config file path (~/.config/minsim/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Get the platform cache directory for minsim (quiz progress, HTTP cache)
pub fn get_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| home_dir().join(".cache"))
        .join("minsim")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/minsim/config.yaml)
///
/// A missing default file yields the defaults. An explicitly given path must exist.
/// `MINSIM_BACKEND_URL` overrides `backend_url` in either case.
///
/// # Errors
///
/// Returns an error if:
/// - An explicit config path does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    let mut config = if config_path.exists() {
        let config_content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

        serde_saphyr::from_str(&config_content).with_context(|| {
            format!("Failed to parse config: invalid YAML in {}", config_path.display())
        })?
    } else if explicit {
        anyhow::bail!("Config file not found at {}", config_path.display());
    } else {
        log::debug!("No config at {}, using defaults", config_path.display());
        Config::default()
    };

    if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
        if !url.trim().is_empty() {
            config.backend_url = Some(url.trim().to_string());
        }
    }

    Ok(config)
}

/// Validate a loaded config.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    match reqwest::Url::parse(config.backend_url()) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(format!(
            "backend_url: unsupported scheme '{}' (expected http or https)",
            url.scheme()
        )),
        Err(e) => errors.push(format!("backend_url: '{}' is not a valid URL: {}", config.backend_url(), e)),
    }

    if let Some(timeout) = &config.request_timeout {
        match humantime::parse_duration(timeout) {
            Ok(d) if d.is_zero() => errors.push("request_timeout: must be greater than zero".to_string()),
            Ok(_) => {}
            Err(e) => errors.push(format!("request_timeout: invalid duration '{}': {}", timeout, e)),
        }
    }

    if config.page_size == Some(0) {
        errors.push("page_size: must be at least 1".to_string());
    }

    if let Some(ttl) = &config.cache.ttl {
        if let Err(e) = humantime::parse_duration(ttl) {
            errors.push(format!("cache.ttl: invalid duration '{}': {}", ttl, e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
