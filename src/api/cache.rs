use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Configuration for HTTP response caching
#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub enabled: bool, // false when --no-cache or cache.enabled: false
    pub ttl: Duration,
}

impl CacheConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ttl: Duration::ZERO,
        }
    }
}

/// Get the cache directory for backend responses
pub fn get_cache_path() -> PathBuf {
    crate::config::get_cache_dir().join("http-cache")
}

/// Clear the HTTP cache directory
pub fn clear_cache() -> Result<()> {
    let cache_path = get_cache_path();
    match std::fs::remove_dir_all(&cache_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("Failed to remove cache directory"),
    }
}

/// Cached response body with the time it was fetched
#[derive(Debug, Serialize, Deserialize)]
struct CachedBody {
    fetched_at: u64, // Unix timestamp
    body: String,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Whether an entry fetched at `fetched_at` is still usable at `now`
pub fn is_fresh(fetched_at: u64, now: u64, ttl: Duration) -> bool {
    now >= fetched_at && now - fetched_at < ttl.as_secs()
}

/// Disk cache of GET response bodies keyed by request URL.
///
/// Read and write failures are treated as misses; the cache never fails a request.
#[derive(Clone, Debug)]
pub struct ResponseCache {
    cache_path: PathBuf,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(cache_path: PathBuf, ttl: Duration) -> Self {
        Self { cache_path, ttl }
    }

    /// Fresh body for `key`, if any
    pub fn get(&self, key: &str) -> Option<String> {
        let bytes = cacache::read_sync(&self.cache_path, key).ok()?;
        let entry: CachedBody = serde_json::from_slice(&bytes).ok()?;
        if is_fresh(entry.fetched_at, now_secs(), self.ttl) {
            Some(entry.body)
        } else {
            log::debug!("Cache entry for {} expired", key);
            None
        }
    }

    pub fn put(&self, key: &str, body: &str) {
        let entry = CachedBody {
            fetched_at: now_secs(),
            body: body.to_string(),
        };
        match serde_json::to_vec(&entry) {
            Ok(serialized) => {
                if let Err(e) = cacache::write_sync(&self.cache_path, key, &serialized) {
                    log::debug!("Failed to write cache entry for {}: {}", key, e);
                }
            }
            Err(e) => log::debug!("Failed to serialize cache entry for {}: {}", key, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_fresh() {
        let ttl = Duration::from_secs(3600);
        assert!(is_fresh(1000, 1000, ttl));
        assert!(is_fresh(1000, 4599, ttl));
        assert!(!is_fresh(1000, 4600, ttl));
        // clock went backwards
        assert!(!is_fresh(1000, 999, ttl));
        assert!(!is_fresh(1000, 1000, Duration::ZERO));
    }

    #[test]
    fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().to_path_buf(), Duration::from_secs(60));
        let key = "http://localhost:4001/api/governors/metropolitan";

        assert!(cache.get(key).is_none());
        cache.put(key, r#"{"governors": []}"#);
        assert_eq!(cache.get(key).as_deref(), Some(r#"{"governors": []}"#));
    }

    #[test]
    fn test_zero_ttl_never_hits() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().to_path_buf(), Duration::ZERO);
        cache.put("k", "v");
        assert!(cache.get("k").is_none());
    }
}
