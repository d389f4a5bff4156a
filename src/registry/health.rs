//! Per-provider call telemetry. Updated by the fetch layer on every
//! outbound call and read by `/debug/integrations` and the daily rollup
//! writer. Backed by `dashmap` so each provider's counters live behind
//! their own shard lock instead of one global mutex.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use dashmap::DashMap;
use serde::Serialize;

#[derive(Debug, Default)]
pub struct IntegrationHealth {
    called: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    status_2xx: AtomicU64,
    status_4xx: AtomicU64,
    status_5xx: AtomicU64,
    timeouts: AtomicU64,
    total_latency_ms: AtomicU64,
    last_error: parking_lot::Mutex<Option<String>>,
    last_success_at: parking_lot::Mutex<Option<chrono::DateTime<chrono::Utc>>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntegrationHealthSnapshot {
    pub called: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub status_2xx: u64,
    pub status_4xx: u64,
    pub status_5xx: u64,
    pub timeouts: u64,
    pub mean_latency_ms: f64,
    pub last_success_at: Option<chrono::DateTime<chrono::Utc>>,
    pub last_error: Option<String>,
}

impl IntegrationHealth {
    pub fn record_success(&self, status: u16, elapsed: std::time::Duration) {
        self.called.fetch_add(1, Ordering::Relaxed);
        self.succeeded.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ms
            .fetch_add(elapsed.as_millis() as u64, Ordering::Relaxed);
        bucket_status(self, status);
        *self.last_success_at.lock() = Some(chrono::Utc::now());
    }

    pub fn record_failure(&self, status: Option<u16>, error: impl Into<String>) {
        self.called.fetch_add(1, Ordering::Relaxed);
        self.failed.fetch_add(1, Ordering::Relaxed);
        if let Some(status) = status {
            bucket_status(self, status);
        }
        *self.last_error.lock() = Some(error.into());
    }

    pub fn record_timeout(&self) {
        self.called.fetch_add(1, Ordering::Relaxed);
        self.failed.fetch_add(1, Ordering::Relaxed);
        self.timeouts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> IntegrationHealthSnapshot {
        let called = self.called.load(Ordering::Relaxed);
        let mean_latency_ms = if called == 0 {
            0.0
        } else {
            self.total_latency_ms.load(Ordering::Relaxed) as f64 / called as f64
        };
        IntegrationHealthSnapshot {
            called,
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            status_2xx: self.status_2xx.load(Ordering::Relaxed),
            status_4xx: self.status_4xx.load(Ordering::Relaxed),
            status_5xx: self.status_5xx.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
            mean_latency_ms,
            last_success_at: *self.last_success_at.lock(),
            last_error: self.last_error.lock().clone(),
        }
    }
}

fn bucket_status(health: &IntegrationHealth, status: u16) {
    match status {
        200..=299 => health.status_2xx.fetch_add(1, Ordering::Relaxed),
        400..=499 => health.status_4xx.fetch_add(1, Ordering::Relaxed),
        500..=599 => health.status_5xx.fetch_add(1, Ordering::Relaxed),
        _ => 0,
    };
}

/// Process-wide registry of per-provider health, keyed by provider name.
#[derive(Debug, Default)]
pub struct HealthRegistry {
    providers: DashMap<&'static str, IntegrationHealth>,
}

impl HealthRegistry {
    pub fn new() -> Self {
        let providers = DashMap::new();
        for spec in crate::registry::INTEGRATIONS.iter() {
            providers.insert(spec.name, IntegrationHealth::default());
        }
        Self { providers }
    }

    pub fn get(&self, provider: &'static str) -> Option<dashmap::mapref::one::Ref<'_, &'static str, IntegrationHealth>> {
        self.providers.get(provider)
    }

    pub fn snapshot_all(&self) -> Vec<(&'static str, IntegrationHealthSnapshot)> {
        self.providers
            .iter()
            .map(|entry| (*entry.key(), entry.value().snapshot()))
            .collect()
    }
}

/// Convenience timer the fetch layer wraps each outbound call in.
pub struct CallTimer(Instant);
impl CallTimer {
    pub fn start() -> Self {
        Self(Instant::now())
    }
    pub fn elapsed(&self) -> std::time::Duration {
        self.0.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_latency_is_zero_with_no_calls() {
        let h = IntegrationHealth::default();
        assert_eq!(h.snapshot().mean_latency_ms, 0.0);
    }

    #[test]
    fn success_and_failure_update_distinct_counters() {
        let h = IntegrationHealth::default();
        h.record_success(200, std::time::Duration::from_millis(40));
        h.record_failure(Some(500), "boom");
        let snap = h.snapshot();
        assert_eq!(snap.called, 2);
        assert_eq!(snap.succeeded, 1);
        assert_eq!(snap.failed, 1);
        assert_eq!(snap.status_2xx, 1);
        assert_eq!(snap.status_5xx, 1);
        assert_eq!(snap.last_error.as_deref(), Some("boom"));
    }
}
