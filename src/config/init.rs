use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::{
    get_config_path, validate_config, CacheSettings, Config, Theme, DEFAULT_BACKEND_URL,
    DEFAULT_CACHE_TTL, DEFAULT_PAGE_SIZE, DEFAULT_REQUEST_TIMEOUT,
};
use crate::credentials::{confirm_or, prompt_line_with_default as prompt_with_default};

const CONFIG_HEADER: &str = "\
# minsim configuration
#
# backend_url      base URL of the political-data backend
#                  (MINSIM_BACKEND_URL overrides it)
# request_timeout  per-request timeout, e.g. \"10s\"
# page_size        posts per board page
# theme            quiz UI colors: auto, dark or light
# cache.enabled    cache roster and pledge lookups on disk
# cache.ttl        how long cached lookups stay fresh, e.g. \"1h\"
";

fn parse_theme(s: &str) -> Option<Theme> {
    match s.trim().to_lowercase().as_str() {
        "auto" => Some(Theme::Auto),
        "dark" => Some(Theme::Dark),
        "light" => Some(Theme::Light),
        _ => None,
    }
}

/// Serialize a config as YAML preceded by the explanatory header.
pub fn render_config(config: &Config) -> Result<String> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
    Ok(format!("{}\n{}", CONFIG_HEADER, yaml))
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("minsim configuration");
    println!("====================");
    println!();

    // Each answer is checked on its own by validating a one-key config
    let backend_url = loop {
        let input = prompt_with_default("Backend URL", DEFAULT_BACKEND_URL)?;
        let candidate = Config {
            backend_url: Some(input.clone()),
            ..Config::default()
        };
        match validate_config(&candidate) {
            Ok(()) => break input,
            Err(errors) => println!("  Invalid: {}. Try again.", errors.join("; ")),
        }
    };

    let request_timeout = loop {
        let input = prompt_with_default("Request timeout", DEFAULT_REQUEST_TIMEOUT)?;
        match humantime::parse_duration(&input) {
            Ok(d) if !d.is_zero() => break input,
            Ok(_) => println!("  Invalid: must be greater than zero. Try again."),
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    let page_size: u32 = loop {
        let input = prompt_with_default("Posts per board page", &DEFAULT_PAGE_SIZE.to_string())?;
        match input.parse::<u32>() {
            Ok(v) if v > 0 => break v,
            _ => println!("  Invalid: must be a positive whole number. Try again."),
        }
    };

    let theme = loop {
        let input = prompt_with_default("Theme (auto/dark/light)", "auto")?;
        match parse_theme(&input) {
            Some(theme) => break theme,
            None => println!("  Invalid: choose auto, dark or light. Try again."),
        }
    };

    println!();
    let cache_enabled = confirm_or("Cache roster and pledge lookups?", true)?;
    let cache_ttl = if cache_enabled {
        loop {
            let input = prompt_with_default("Cache lifetime", DEFAULT_CACHE_TTL)?;
            match humantime::parse_duration(&input) {
                Ok(_) => break Some(input),
                Err(e) => println!("  Invalid: {}. Try again.", e),
            }
        }
    } else {
        None
    };

    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = confirm_or(
            &format!("Config already exists at {}. Overwrite?", config_path.display()),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    let config = Config {
        backend_url: Some(backend_url),
        request_timeout: Some(request_timeout),
        page_size: Some(page_size),
        theme,
        cache: CacheSettings {
            enabled: cache_enabled,
            ttl: cache_ttl,
        },
    };

    let contents = render_config(&config)?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&config_path, &contents)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `minsim quiz` to take the political-orientation quiz.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_theme() {
        assert_eq!(parse_theme("Dark"), Some(Theme::Dark));
        assert_eq!(parse_theme(" light "), Some(Theme::Light));
        assert_eq!(parse_theme("auto"), Some(Theme::Auto));
        assert_eq!(parse_theme("solarized"), None);
    }

    #[test]
    fn test_rendered_config_parses_back() {
        let config = Config {
            backend_url: Some("http://localhost:4001".to_string()),
            page_size: Some(15),
            ..Config::default()
        };
        let rendered = render_config(&config).unwrap();
        assert!(rendered.starts_with("# minsim configuration"));

        let parsed: Config = serde_saphyr::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
