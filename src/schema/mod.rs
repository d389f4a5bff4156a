//! Canonical Schema + Receipt (C13): normalizes every market type into one
//! pick card and a reproducible debug receipt.

pub mod betslip;
pub mod pick_card;
pub mod receipt;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::models::{MarketKind, OverUnder};

/// Suffixes that mark a JSON key as a raw timestamp. Internal debug
/// payloads carry these for provenance; anything crossing the public
/// response boundary should not.
const TIMESTAMP_KEY_SUFFIXES: [&str; 4] = ["_utc", "_iso", "_epoch", "_timestamp"];

fn is_timestamp_key(key: &str) -> bool {
    TIMESTAMP_KEY_SUFFIXES.iter().any(|suffix| key.ends_with(suffix))
}

/// Recursively strips any object key ending in `_utc`/`_iso`/`_epoch`/
/// `_timestamp` from a JSON value, descending into arrays and nested
/// objects. Non-object/array values pass through unchanged.
pub fn strip_timestamp_keys(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => serde_json::Value::Object(
            map.into_iter()
                .filter(|(k, _)| !is_timestamp_key(k))
                .map(|(k, v)| (k, strip_timestamp_keys(v)))
                .collect(),
        ),
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(strip_timestamp_keys).collect())
        }
        other => other,
    }
}

/// Serializes `value` and strips timestamp-suffixed keys before handing it
/// to `axum::Json`, so debug/public responses never leak raw `_utc`/`_iso`/
/// `_epoch`/`_timestamp` fields meant for internal provenance only.
pub fn sanitized_json<T: Serialize>(value: &T) -> axum::Json<serde_json::Value> {
    let raw = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
    axum::Json(strip_timestamp_keys(raw))
}

/// Deterministic pick_id: `hash(event_id | market_kind | selection | line | over_under)`.
/// Same inputs always yield the same id, so a pick's identity survives a
/// re-run of the same slate; SHA-256 keeps that guarantee stable across
/// Rust versions and process restarts, unlike a `DefaultHasher` digest.
pub fn pick_id(
    event_id: &str,
    market_kind: MarketKind,
    selection: &str,
    line: Option<f64>,
    over_under: Option<OverUnder>,
) -> String {
    let line_part = line.map(|l| format!("{l:.2}")).unwrap_or_default();
    let ou_part = match over_under {
        Some(OverUnder::Over) => "OVER",
        Some(OverUnder::Under) => "UNDER",
        None => "",
    };
    let payload = format!("{event_id}|{market_kind:?}|{selection}|{line_part}|{ou_part}");

    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hex::encode(hasher.finalize())[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_yield_same_id() {
        let a = pick_id("evt1", MarketKind::Spread, "LAL", Some(-4.5), None);
        let b = pick_id("evt1", MarketKind::Spread, "LAL", Some(-4.5), None);
        assert_eq!(a, b);
    }

    #[test]
    fn different_selection_yields_different_id() {
        let a = pick_id("evt1", MarketKind::Spread, "LAL", Some(-4.5), None);
        let b = pick_id("evt1", MarketKind::Spread, "BOS", Some(-4.5), None);
        assert_ne!(a, b);
    }

    #[test]
    fn strip_timestamp_keys_removes_nested_and_listed_suffixes() {
        let value = serde_json::json!({
            "pick_id": "abc",
            "reported_at_utc": "2026-08-01T00:00:00Z",
            "nested": {
                "fetched_at_iso": "2026-08-01",
                "score": 7.5,
            },
            "items": [{"seen_epoch": 12345, "name": "x"}],
        });

        let sanitized = strip_timestamp_keys(value);
        let s = sanitized.to_string();
        assert!(!s.contains("reported_at_utc"));
        assert!(!s.contains("fetched_at_iso"));
        assert!(!s.contains("seen_epoch"));
        assert!(s.contains("pick_id"));
        assert!(s.contains("score"));
    }
}
