//! Integration Registry: a static declaration of the 14 external
//! providers, plus the health telemetry and daily rollup that the fetch
//! layer updates on every call.

pub mod health;
pub mod rollup;

pub use health::{IntegrationHealth, IntegrationHealthSnapshot};
pub use rollup::RollupWriter;

use crate::config::Config;
use crate::models::Sport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    Critical,
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedTarget {
    Ai,
    Research,
    Esoteric,
    Jarvis,
    Validators,
    Confluence,
    Persistence,
}

#[derive(Debug, Clone, Copy)]
pub struct ConnectivityProbe {
    pub path: &'static str,
    pub method: &'static str,
    pub expected_status: u16,
}

#[derive(Debug, Clone, Copy)]
pub struct IntegrationSpec {
    pub name: &'static str,
    pub debug_name: &'static str,
    pub description: &'static str,
    pub env_vars: &'static [&'static str],
    pub criticality: Criticality,
    pub feeds_engine: FeedTarget,
    pub relevance_gated: bool,
    pub probe: Option<ConnectivityProbe>,
}

/// The 14 providers, leaves-first in consumer order (Fetch Layer ->
/// Context -> the four engines).
pub const INTEGRATIONS: [IntegrationSpec; 14] = [
    IntegrationSpec {
        name: "odds_api",
        debug_name: "Odds API",
        description: "Moneyline/spread/total odds across books",
        env_vars: &["ODDS_API_KEY"],
        criticality: Criticality::Critical,
        feeds_engine: FeedTarget::Ai,
        relevance_gated: false,
        probe: Some(ConnectivityProbe { path: "/v4/sports", method: "GET", expected_status: 200 }),
    },
    IntegrationSpec {
        name: "props",
        debug_name: "Playbook Props",
        description: "Player prop lines",
        env_vars: &["PLAYBOOK_API_KEY"],
        criticality: Criticality::Critical,
        feeds_engine: FeedTarget::Research,
        relevance_gated: false,
        probe: None,
    },
    IntegrationSpec {
        name: "player_stats",
        debug_name: "BallDontLie",
        description: "Player/team season stats for Context Layer",
        env_vars: &["BALLDONTLIE_API_KEY", "BDL_API_KEY"],
        criticality: Criticality::Optional,
        feeds_engine: FeedTarget::Ai,
        relevance_gated: false,
        probe: None,
    },
    IntegrationSpec {
        name: "injuries",
        debug_name: "Injury Reports",
        description: "Player injury status feed",
        env_vars: &["PLAYBOOK_API_KEY"],
        criticality: Criticality::Critical,
        feeds_engine: FeedTarget::Validators,
        relevance_gated: false,
        probe: None,
    },
    IntegrationSpec {
        name: "sharp_splits",
        debug_name: "Sharp Splits",
        description: "Public bet% / money% / RLM splits",
        env_vars: &["ODDS_API_KEY"],
        criticality: Criticality::Optional,
        feeds_engine: FeedTarget::Research,
        relevance_gated: false,
        probe: None,
    },
    IntegrationSpec {
        name: "weather",
        debug_name: "Weather",
        description: "Game-day weather for outdoor venues",
        env_vars: &["WEATHER_API_KEY"],
        criticality: Criticality::Optional,
        feeds_engine: FeedTarget::Esoteric,
        relevance_gated: true,
        probe: None,
    },
    IntegrationSpec {
        name: "astronomy",
        debug_name: "Astronomy",
        description: "Lunar phase / void-of-course data",
        env_vars: &["ASTRONOMY_API_ID", "ASTRONOMY_API_SECRET"],
        criticality: Criticality::Optional,
        feeds_engine: FeedTarget::Esoteric,
        relevance_gated: false,
        probe: None,
    },
    IntegrationSpec {
        name: "space_weather",
        debug_name: "NOAA Space Weather",
        description: "Planetary Kp-index",
        env_vars: &["NOAA_BASE_URL"],
        criticality: Criticality::Optional,
        feeds_engine: FeedTarget::Esoteric,
        relevance_gated: false,
        probe: None,
    },
    IntegrationSpec {
        name: "economic_indicators",
        debug_name: "FRED",
        description: "Macro indicators used as an esoteric seed table",
        env_vars: &["FRED_API_KEY"],
        criticality: Criticality::Optional,
        feeds_engine: FeedTarget::Esoteric,
        relevance_gated: false,
        probe: None,
    },
    IntegrationSpec {
        name: "market_sentiment",
        debug_name: "Finnhub",
        description: "Market sentiment used as a Research input",
        env_vars: &["FINNHUB_KEY"],
        criticality: Criticality::Optional,
        feeds_engine: FeedTarget::Research,
        relevance_gated: false,
        probe: None,
    },
    IntegrationSpec {
        name: "news_search",
        debug_name: "SerpApi",
        description: "News search for expert-consensus pillar",
        env_vars: &["SERPAPI_KEY"],
        criticality: Criticality::Optional,
        feeds_engine: FeedTarget::Research,
        relevance_gated: false,
        probe: None,
    },
    IntegrationSpec {
        name: "social_sentiment",
        debug_name: "Twitter",
        description: "Social chatter used as a minor Research input",
        env_vars: &["TWITTER_BEARER"],
        criticality: Criticality::Optional,
        feeds_engine: FeedTarget::Research,
        relevance_gated: false,
        probe: None,
    },
    IntegrationSpec {
        name: "licensing",
        debug_name: "Whop",
        description: "Subscriber entitlement gate",
        env_vars: &["WHOP_API_KEY"],
        criticality: Criticality::Critical,
        feeds_engine: FeedTarget::Confluence,
        relevance_gated: false,
        probe: None,
    },
    IntegrationSpec {
        name: "persistence",
        debug_name: "Database/Redis",
        description: "Snapshot + rollup persistence backing store",
        env_vars: &["DATABASE_URL", "REDIS_URL"],
        criticality: Criticality::Critical,
        feeds_engine: FeedTarget::Persistence,
        relevance_gated: false,
        probe: None,
    },
];

#[derive(Debug, Clone, serde::Serialize)]
pub struct IntegrationStatus {
    pub name: &'static str,
    pub debug_name: &'static str,
    pub configured: bool,
    pub missing_env_vars: Vec<&'static str>,
    pub criticality: &'static str,
}

/// `/debug/integrations` payload: fails loud — any CRITICAL integration with
/// no configured env var is surfaced explicitly, never silently skipped.
pub fn integration_statuses(config_present: &[(&'static str, bool)]) -> Vec<IntegrationStatus> {
    let present: std::collections::HashMap<&str, bool> = config_present.iter().copied().collect();

    INTEGRATIONS
        .iter()
        .map(|spec| {
            let missing: Vec<&'static str> = spec
                .env_vars
                .iter()
                .copied()
                .filter(|v| !present.get(v).copied().unwrap_or(false))
                .collect();
            IntegrationStatus {
                name: spec.name,
                debug_name: spec.debug_name,
                configured: missing.len() < spec.env_vars.len(),
                missing_env_vars: missing,
                criticality: match spec.criticality {
                    Criticality::Critical => "CRITICAL",
                    Criticality::Optional => "OPTIONAL",
                },
            }
        })
        .collect()
}

/// Builds the `(env_var, present)` pairs `integration_statuses` expects,
/// straight from `Config`.
pub fn env_presence(config: &Config) -> Vec<(&'static str, bool)> {
    vec![
        ("ODDS_API_KEY", config.odds_api_key.is_some()),
        ("PLAYBOOK_API_KEY", config.playbook_api_key.is_some()),
        ("BALLDONTLIE_API_KEY", config.balldontlie_api_key.is_some()),
        ("BDL_API_KEY", config.balldontlie_api_key.is_some()),
        ("WEATHER_API_KEY", config.weather_api_key.is_some()),
        ("FRED_API_KEY", config.fred_api_key.is_some()),
        ("FINNHUB_KEY", config.finnhub_key.is_some()),
        ("SERPAPI_KEY", config.serpapi_key.is_some()),
        ("TWITTER_BEARER", config.twitter_bearer.is_some()),
        ("ASTRONOMY_API_ID", config.astronomy_api_id.is_some()),
        ("ASTRONOMY_API_SECRET", config.astronomy_api_secret.is_some()),
        ("NOAA_BASE_URL", config.noaa_base_url.is_some()),
        ("WHOP_API_KEY", config.whop_api_key.is_some()),
        ("DATABASE_URL", config.database_url.is_some()),
        ("REDIS_URL", config.redis_url.is_some()),
    ]
}

/// Whether weather relevance-gating applies: indoor sports return
/// `NOT_RELEVANT`, never `FEATURE_DISABLED`.
pub fn weather_relevant_for(sport: Sport) -> bool {
    !matches!(sport, Sport::Nba | Sport::Ncaab)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_fourteen_providers() {
        assert_eq!(INTEGRATIONS.len(), 14);
    }

    #[test]
    fn missing_critical_surfaces_as_not_configured() {
        let presence = vec![("ODDS_API_KEY", false)];
        let statuses = integration_statuses(&presence);
        let odds = statuses.iter().find(|s| s.name == "odds_api").unwrap();
        assert!(!odds.configured);
        assert_eq!(odds.criticality, "CRITICAL");
        assert_eq!(odds.missing_env_vars, vec!["ODDS_API_KEY"]);
    }
}
