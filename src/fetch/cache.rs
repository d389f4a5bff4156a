//! Per-provider TTL cache. Cache hits bypass HTTP but are still counted
//! against the provider's `IntegrationHealth`. Backed by `dashmap` for
//! concurrent readers with a per-key write.

use std::time::{Duration, Instant};

use dashmap::DashMap;

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

pub struct TtlCache<V: Clone> {
    ttl: Duration,
    entries: DashMap<String, Entry<V>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: DashMap::new() }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.entries.get(key)?;
        if Instant::now() < entry.expires_at {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    pub fn put(&self, key: impl Into<String>, value: V) {
        self.entries.insert(
            key.into(),
            Entry { value, expires_at: Instant::now() + self.ttl },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-provider TTL constants.
pub mod ttl {
    use std::time::Duration;

    pub const SCOREBOARD: Duration = Duration::from_secs(10 * 60);
    pub const GAME_SUMMARY: Duration = Duration::from_secs(10 * 60);
    pub const NEWS: Duration = Duration::from_secs(20 * 60);
    pub const MARKET_SENTIMENT: Duration = Duration::from_secs(20 * 60);
    pub const ECONOMIC_INDICATORS: Duration = Duration::from_secs(6 * 60 * 60);
    pub const REFEREE_TENDENCIES: Duration = Duration::from_secs(7 * 24 * 60 * 60);
    pub const KP_INDEX: Duration = Duration::from_secs(3 * 60 * 60);
}
