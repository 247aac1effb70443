use super::cache::{get_cache_path, CacheConfig, ResponseCache};
use super::error::{rejection_message, ApiError};
use crate::config::Config;
use anyhow::Context;
use http::Method;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

const USER_AGENT: &str = concat!("minsim/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the political-data backend
#[derive(Clone, Debug)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
    cache: Option<ResponseCache>,
}

/// Append path segments and query pairs to `base`.
/// Segments are percent-encoded, so Korean names can be passed as-is.
pub fn build_url(base: &Url, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, ApiError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

impl BackendClient {
    /// Create a client from the loaded config.
    pub fn new(config: &Config, cache_config: &CacheConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(config.backend_url())
            .with_context(|| format!("Invalid backend URL '{}'", config.backend_url()))?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        let cache = cache_config
            .enabled
            .then(|| ResponseCache::new(get_cache_path(), cache_config.ttl));

        Ok(Self {
            http,
            base_url,
            cache,
        })
    }

    /// Uncached client with default settings
    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|_| ApiError::InvalidUrl(base_url.to_string()))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            cache: None,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn url(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, ApiError> {
        build_url(&self.base_url, segments, query)
    }

    /// GET and decode a JSON body. `cacheable` responses are served from and
    /// stored in the disk cache when it is enabled.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        cacheable: bool,
    ) -> Result<T, ApiError> {
        let cache = self.cache.as_ref().filter(|_| cacheable);

        if let Some(body) = cache.and_then(|c| c.get(url.as_str())) {
            log::debug!("Cache hit: {}", url);
            return decode(&url, &body);
        }

        log::debug!("GET {}", url);
        let body = self.execute(self.http.get(url.clone())).await?;
        let value = decode(&url, &body)?;

        if let Some(cache) = cache {
            cache.put(url.as_str(), &body);
        }

        Ok(value)
    }

    /// Send a request with an optional JSON body and decode the JSON reply
    pub(crate) async fn send_json<T, B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let text = self.send(method, url.clone(), body).await?;
        decode(&url, &text)
    }

    /// Send a request with an optional JSON body, returning the raw reply
    pub(crate) async fn send<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<String, ApiError>
    where
        B: Serialize + ?Sized,
    {
        log::debug!("{} {}", method, url);
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request).await
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await.map_err(ApiError::Network)?;
        let status = response.status();
        let body = response.bytes().await.map_err(ApiError::Network)?;

        if !status.is_success() {
            let message = rejection_message(status, &body);
            log::debug!("Request rejected ({}): {}", status, message);
            return Err(ApiError::Rejected { status, message });
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

fn decode<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}
