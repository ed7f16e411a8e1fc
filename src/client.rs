use crate::cache::{cache_key, InMemoryCache, ResponseCache};
use crate::config::Bil24Config;
use crate::constants::FID_HEADER;
use crate::error::{Bil24Error, Result};
use reqwest::{Method, Response, Url};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Single point of outbound communication with the Bil24 API.
///
/// Handles request construction (base URL, query string, auth headers),
/// retry with exponential backoff for transient failures, deterministic
/// response classification, and caching of GET responses.
pub struct ApiClient {
    http: reqwest::Client,
    config: Bil24Config,
    cache: Arc<dyn ResponseCache>,
}

impl ApiClient {
    pub fn new(config: Bil24Config) -> Self {
        Self::with_cache(config, Arc::new(InMemoryCache::new()))
    }

    /// Builds a client backed by a caller-provided cache, e.g. a host
    /// application's shared object cache.
    pub fn with_cache(config: Bil24Config, cache: Arc<dyn ResponseCache>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            cache,
        }
    }

    pub fn config(&self) -> &Bil24Config {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn ensure_configured(&self) -> Result<()> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(Bil24Error::Config(
                "FID and token must be set before making API requests".into(),
            ))
        }
    }

    fn build_url(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Url> {
        let full = format!(
            "{}/{}",
            self.config.base_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        let mut url = Url::parse(&full)
            .map_err(|e| Bil24Error::Config(format!("invalid request URL '{}': {}", full, e)))?;
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// GET with query parameters. Successful responses are cached by the
    /// hash of the full URL for the configured TTL; a cache hit skips the
    /// network entirely.
    #[instrument(skip(self, params))]
    pub async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value> {
        self.ensure_configured()?;
        let url = self.build_url(endpoint, params)?;
        let key = cache_key(url.as_str());

        if let Some(hit) = self.cache.get(&key).await {
            debug!(%url, "serving GET from cache");
            return Ok(hit);
        }

        let value = self.execute(Method::GET, url, None).await?;
        self.cache
            .set(
                &key,
                value.clone(),
                Duration::from_secs(self.config.cache_ttl_seconds),
            )
            .await;
        Ok(value)
    }

    /// POST with a JSON body. Never cached.
    #[instrument(skip(self, body))]
    pub async fn post(&self, endpoint: &str, body: &Value) -> Result<Value> {
        self.ensure_configured()?;
        let url = self.build_url(endpoint, &[])?;
        self.execute(Method::POST, url, Some(body)).await
    }

    /// PUT with a JSON body. Never cached.
    #[instrument(skip(self, body))]
    pub async fn put(&self, endpoint: &str, body: &Value) -> Result<Value> {
        self.ensure_configured()?;
        let url = self.build_url(endpoint, &[])?;
        self.execute(Method::PUT, url, Some(body)).await
    }

    /// DELETE. Never cached and does not invalidate cached GETs.
    #[instrument(skip(self))]
    pub async fn delete(&self, endpoint: &str) -> Result<Value> {
        self.ensure_configured()?;
        let url = self.build_url(endpoint, &[])?;
        self.execute(Method::DELETE, url, None).await
    }

    /// Drops every cached GET response at once.
    pub async fn clear_cache(&self) {
        self.cache.flush().await;
    }

    /// Probes a short list of lightweight endpoints and reports whether any
    /// of them answered. The remote API does not support a single canonical
    /// health-check path, so `/status`, `/version` and a one-item event
    /// listing are tried in order.
    pub async fn test_connection(&self) -> bool {
        if !self.is_configured() {
            debug!("connection test skipped: client not configured");
            return false;
        }

        let limit_one = [("limit", "1".to_string())];
        let probes: [(&str, &[(&str, String)]); 3] =
            [("status", &[]), ("version", &[]), ("events", &limit_one)];

        let mut last_error = None;
        for (endpoint, params) in probes {
            match self.get(endpoint, params).await {
                Ok(_) => {
                    info!(endpoint, "connection probe succeeded");
                    return true;
                }
                Err(err) => {
                    debug!(endpoint, error = %err, "connection probe failed");
                    last_error = Some(err);
                }
            }
        }
        if let Some(err) = last_error {
            warn!(error = %err, "all connection probes failed");
        }
        false
    }

    /// Sends the request, retrying on 5xx responses and transport failures
    /// with `2^attempt` seconds of backoff. 4xx responses are terminal
    /// immediately; once retries are exhausted the last outcome is
    /// classified as-is.
    async fn execute(&self, method: Method, url: Url, body: Option<&Value>) -> Result<Value> {
        let mut attempt: u32 = 0;
        loop {
            let mut request = self
                .http
                .request(method.clone(), url.clone())
                .bearer_auth(&self.config.token)
                .header(FID_HEADER, &self.config.fid)
                .timeout(Duration::from_secs(self.config.timeout_seconds));
            if let Some(body) = body {
                request = request.json(body);
            }

            let outcome = request.send().await;
            let transient = match &outcome {
                Ok(response) => response.status().is_server_error(),
                Err(_) => true,
            };

            if transient && attempt < self.config.max_retries {
                let wait = Duration::from_secs(2u64.saturating_pow(attempt));
                warn!(
                    %url,
                    attempt = attempt + 1,
                    max_retries = self.config.max_retries,
                    wait_seconds = wait.as_secs(),
                    "transient failure, retrying"
                );
                tokio::time::sleep(wait).await;
                attempt += 1;
                continue;
            }

            return classify(outcome).await;
        }
    }
}

/// Deterministic response classification, in order: transport failure,
/// empty body (regardless of status), malformed JSON, HTTP error status,
/// success with the decoded body returned as-is.
async fn classify(outcome: reqwest::Result<Response>) -> Result<Value> {
    let response = match outcome {
        Ok(response) => response,
        Err(err) => {
            return Err(Bil24Error::Network {
                message: err.to_string(),
                timeout: err.is_timeout(),
            })
        }
    };

    let status = response.status();
    let body = response.text().await.map_err(|err| Bil24Error::Network {
        message: err.to_string(),
        timeout: err.is_timeout(),
    })?;

    if body.trim().is_empty() {
        return Err(Bil24Error::EmptyResponse {
            status: status.as_u16(),
        });
    }

    let value: Value = serde_json::from_str(&body).map_err(|err| Bil24Error::InvalidJson {
        message: err.to_string(),
    })?;

    let code = status.as_u16();
    if code >= 400 {
        let message = body_message(&value)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
        return Err(match code {
            401 => Bil24Error::Authentication { status: code, message },
            403 => Bil24Error::Authorization { status: code, message },
            404 => Bil24Error::NotFound { status: code, message },
            _ if code >= 500 => Bil24Error::Server { status: code, message },
            _ => Bil24Error::Api { status: code, message },
        });
    }

    Ok(value)
}

/// Pulls the human-readable part out of an error body: any of `message`,
/// `error` and `details`, joined in that order.
fn body_message(value: &Value) -> Option<String> {
    let mut parts = Vec::new();
    for field in ["message", "error", "details"] {
        match value.get(field) {
            Some(Value::String(s)) if !s.is_empty() => parts.push(s.clone()),
            Some(Value::Null) | None => {}
            Some(other) => parts.push(other.to_string()),
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(": "))
    }
}
