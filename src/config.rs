//! Immutable process configuration, read once from the environment at
//! startup. No other module is permitted to call `std::env::var` directly —
//! per the "global feature flags read at import time" re-architecture note,
//! everything gating decisions consult this struct instead.

use std::env;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub odds_api_key: Option<String>,
    pub playbook_api_key: Option<String>,
    pub balldontlie_api_key: Option<String>,
    pub weather_api_key: Option<String>,
    pub fred_api_key: Option<String>,
    pub finnhub_key: Option<String>,
    pub serpapi_key: Option<String>,
    pub twitter_bearer: Option<String>,
    pub astronomy_api_id: Option<String>,
    pub astronomy_api_secret: Option<String>,
    pub noaa_base_url: Option<String>,
    pub whop_api_key: Option<String>,
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
    pub railway_volume_mount_path: Option<String>,
    pub api_auth_key: Option<String>,
    pub enable_demo: bool,
}

fn non_empty(v: Result<String, env::VarError>) -> Option<String> {
    v.ok().filter(|s| !s.trim().is_empty())
}

impl Config {
    /// Loads configuration from the process environment. `.env` is searched
    /// both via the standard cwd-and-parents walk and, as a fallback,
    /// relative to the crate manifest directory so `cargo run` from any
    /// working directory still picks up a repo-root `.env`.
    pub fn from_env() -> Self {
        load_dotenv();

        Self {
            odds_api_key: non_empty(env::var("ODDS_API_KEY")),
            playbook_api_key: non_empty(env::var("PLAYBOOK_API_KEY")),
            balldontlie_api_key: non_empty(env::var("BALLDONTLIE_API_KEY"))
                .or_else(|| non_empty(env::var("BDL_API_KEY"))),
            weather_api_key: non_empty(env::var("WEATHER_API_KEY")),
            fred_api_key: non_empty(env::var("FRED_API_KEY")),
            finnhub_key: non_empty(env::var("FINNHUB_KEY")),
            serpapi_key: non_empty(env::var("SERPAPI_KEY")),
            twitter_bearer: non_empty(env::var("TWITTER_BEARER")),
            astronomy_api_id: non_empty(env::var("ASTRONOMY_API_ID")),
            astronomy_api_secret: non_empty(env::var("ASTRONOMY_API_SECRET")),
            noaa_base_url: non_empty(env::var("NOAA_BASE_URL")),
            whop_api_key: non_empty(env::var("WHOP_API_KEY")),
            database_url: non_empty(env::var("DATABASE_URL")),
            redis_url: non_empty(env::var("REDIS_URL")),
            railway_volume_mount_path: non_empty(env::var("RAILWAY_VOLUME_MOUNT_PATH")),
            api_auth_key: non_empty(env::var("API_AUTH_KEY")),
            enable_demo: env::var("ENABLE_DEMO")
                .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "on" | "ON"))
                .unwrap_or(false),
        }
    }

    /// Directory snapshots and rollups are written under. Defaults to the
    /// crate-relative `data/` directory unless a Railway volume is mounted.
    pub fn data_dir(&self) -> String {
        self.railway_volume_mount_path
            .clone()
            .unwrap_or_else(|| "data".to_string())
    }
}

fn load_dotenv() {
    let _ = dotenv::dotenv();

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    for candidate in [manifest_dir.join(".env"), manifest_dir.join("../.env")] {
        if candidate.exists() {
            let _ = dotenv::from_path(&candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balldontlie_alias_falls_back() {
        env::remove_var("BALLDONTLIE_API_KEY");
        env::set_var("BDL_API_KEY", "abc123");
        let cfg = Config::from_env();
        assert_eq!(cfg.balldontlie_api_key.as_deref(), Some("abc123"));
        env::remove_var("BDL_API_KEY");
    }

    #[test]
    fn enable_demo_defaults_false() {
        env::remove_var("ENABLE_DEMO");
        let cfg = Config::from_env();
        assert!(!cfg.enable_demo);
    }
}
