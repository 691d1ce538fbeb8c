use std::collections::HashMap;
use std::sync::{Mutex, RwLock};
use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{ClientError, Result};
use crate::ratelimit::RateLimiter;
use crate::retry::RetryPolicy;

/// Base URL of the hosted backend instance this tool was built against.
pub const DEFAULT_BASE_URL: &str = "https://x8ki-letl-twmt.n7.xano.io/api:JQwL4HAE";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const RATE_LIMIT_MAX_REQUESTS: usize = 9;
const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(20);

/// HTTP client for the hosted backend.
///
/// All requests share one sliding-window rate limiter and one retry policy:
/// HTTP 429 and transport failures are retried with exponential backoff up
/// to a bounded attempt count, every other non-success status surfaces
/// immediately as [`ClientError::Status`] carrying the body text.
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    limiter: RateLimiter,
    retry: RetryPolicy,
    token: RwLock<Option<String>>,
    username_cache: Mutex<HashMap<String, bool>>,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ClientError::Build)?;

        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::new(RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW),
            retry: RetryPolicy::default(),
            token: RwLock::new(None),
            username_cache: Mutex::new(HashMap::new()),
        })
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Store the bearer token used by authenticated requests.
    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.into());
        }
    }

    pub fn clear_token(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }

    pub(crate) fn cached_username(&self, username: &str) -> Option<bool> {
        self.username_cache
            .lock()
            .ok()
            .and_then(|cache| cache.get(username).copied())
    }

    pub(crate) fn cache_username(&self, username: &str, exists: bool) {
        if let Ok(mut cache) = self.username_cache.lock() {
            cache.insert(username.to_string(), exists);
        }
    }

    pub fn clear_username_cache(&self) {
        if let Ok(mut cache) = self.username_cache.lock() {
            cache.clear();
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|slot| slot.clone())
    }

    /// Attach the stored bearer token, failing if none is available.
    pub(crate) fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder> {
        let token = self.token().ok_or(ClientError::NotAuthenticated)?;
        Ok(request.bearer_auth(token))
    }

    /// Send a request through the rate limiter and retry policy.
    ///
    /// `build` is invoked once per attempt because request bodies (multipart
    /// forms in particular) cannot be reused across sends.
    pub(crate) async fn execute<F>(&self, url: &str, build: F) -> Result<reqwest::Response>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        for attempt in 1..=self.retry.max_attempts {
            self.limiter.acquire().await;

            let response = match build().send().await {
                Ok(response) => response,
                Err(source) => {
                    warn!(url, attempt, error = %source, "request failed");
                    if attempt == self.retry.max_attempts {
                        return Err(ClientError::Transport {
                            url: url.to_string(),
                            source,
                        });
                    }
                    tokio::time::sleep(self.retry.backoff_for(attempt)).await;
                    continue;
                }
            };

            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                warn!(url, attempt, "rate limited by backend");
                if attempt == self.retry.max_attempts {
                    return Err(ClientError::RateLimitExhausted {
                        url: url.to_string(),
                        attempts: self.retry.max_attempts,
                    });
                }
                tokio::time::sleep(self.retry.backoff_for(attempt)).await;
                continue;
            }

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                return Err(ClientError::Status {
                    url: url.to_string(),
                    status,
                    body,
                });
            }

            if !self.retry.settle.is_zero() {
                tokio::time::sleep(self.retry.settle).await;
            }
            return Ok(response);
        }

        Err(ClientError::RateLimitExhausted {
            url: url.to_string(),
            attempts: self.retry.max_attempts,
        })
    }

    pub(crate) async fn get_json<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let response = self.execute(&url, || self.http.get(&url)).await?;
        decode(&url, response).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let response = self.execute(&url, || self.http.post(&url).json(body)).await?;
        decode(&url, response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        self.execute(&url, || self.http.delete(&url)).await?;
        Ok(())
    }
}

pub(crate) async fn decode<T>(url: &str, response: reqwest::Response) -> Result<T>
where
    T: DeserializeOwned,
{
    response.json().await.map_err(|source| ClientError::Decode {
        url: url.to_string(),
        source,
    })
}
