//! Debug/health surface: a minimal axum router exposing `/health`,
//! `/debug/integrations`, and `/debug/esoteric-candidates/{sport}`. The
//! full `/live/*` consumer router is out of scope for this surface.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::config::Config;
use crate::engines::esoteric;
use crate::middleware::{request_logging, RateLimitConfig, RateLimitLayer};
use crate::models::{EsotericSignalRecord, Sport};
use crate::registry::{self, health::HealthRegistry};
use crate::schema::sanitized_json;

pub struct DebugState {
    pub config: Config,
    pub health: HealthRegistry,
}

pub fn router(state: Arc<DebugState>) -> Router {
    let limiter = RateLimitLayer::new(RateLimitConfig::default());

    Router::new()
        .route("/health", get(health))
        .route("/debug/integrations", get(integrations))
        .route("/debug/esoteric-candidates/:sport", get(esoteric_candidates))
        .with_state(state)
        .layer(from_fn(request_logging))
        .layer(from_fn_with_state(limiter, crate::middleware::rate_limit::rate_limit_middleware))
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

async fn health() -> Json<serde_json::Value> {
    sanitized_json(&HealthBody { status: "ok" })
}

async fn integrations(State(state): State<Arc<DebugState>>) -> Json<serde_json::Value> {
    let presence = registry::env_presence(&state.config);
    sanitized_json(&registry::integration_statuses(&presence))
}

#[derive(Serialize)]
struct EsotericCandidatesBody {
    sport: Sport,
    signals: Vec<EsotericSignalRecord>,
}

async fn esoteric_candidates(Path(sport): Path<String>) -> Result<Json<serde_json::Value>, StatusCode> {
    let sport = parse_sport(&sport).ok_or(StatusCode::BAD_REQUEST)?;

    let inputs = esoteric::EsotericInputs {
        matchup_text: format!("{sport:?} sample matchup"),
        weather_relevant: registry::weather_relevant_for(sport),
        ..Default::default()
    };
    let output = esoteric::score(&inputs);

    Ok(sanitized_json(&EsotericCandidatesBody { sport, signals: output.breakdown }))
}

fn parse_sport(value: &str) -> Option<Sport> {
    match value.to_ascii_uppercase().as_str() {
        "NBA" => Some(Sport::Nba),
        "NFL" => Some(Sport::Nfl),
        "MLB" => Some(Sport::Mlb),
        "NHL" => Some(Sport::Nhl),
        "NCAAB" => Some(Sport::Ncaab),
        _ => None,
    }
}
