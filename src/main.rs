//! Slate engine binary: runs the debug/health HTTP surface and, given a
//! `--sport`/`--date` pair, a single one-shot slate scoring pass.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slate_engine::api::{self, DebugState};
use slate_engine::change_monitor::SnapshotStore;
use slate_engine::confluence::{ConfluenceInput, MonteCarloProjection};
use slate_engine::config::Config;
use slate_engine::context;
use slate_engine::engines::{ai, esoteric, jarvis, research, EngineInputs};
use slate_engine::fetch;
use slate_engine::models::{CandidatePick, EngineBreakdown, InjuryStatus, MarketKind, Rlm, Sport, Tier};
use slate_engine::pipeline;
use slate_engine::registry::health::HealthRegistry;
use slate_engine::schema;
use slate_engine::validators::{InjuryGuardConfig, InjuryGuardInput, MarketAvailabilityIndex, PropIntegrityInput};

#[derive(Parser, Debug)]
#[command(name = "slate-engine", about = "Daily slate decision engine")]
struct Cli {
    /// Bind address for the debug/health HTTP surface.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// Run a single slate request for this sport instead of serving HTTP.
    #[arg(long)]
    sport: Option<String>,

    /// ET date (YYYY-MM-DD) for the one-shot run; defaults to today.
    #[arg(long)]
    date: Option<String>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slate_engine=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
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

fn pick_type_str(kind: MarketKind) -> &'static str {
    match kind {
        MarketKind::Spread => "spread",
        MarketKind::Moneyline => "moneyline",
        MarketKind::Total => "total",
        MarketKind::PlayerProp => "player_prop",
    }
}

/// Builds one candidate plus everything engines/confluence/validators need
/// for it out of a single fetched market line.
fn build_candidate(
    sport: Sport,
    line: &slate_engine::models::MarketLine,
    event: &slate_engine::models::Event,
    slate: &fetch::SlateData,
) -> (CandidatePick, EngineInputs, ConfluenceInput, PropIntegrityInput, InjuryGuardInput) {
    let player_name = line.selection_key.split('|').next().map(|s| s.to_string());
    let split = slate
        .splits
        .iter()
        .find(|s| s.event_id == line.event_id && s.market_kind == line.market_kind);
    let injury_status = player_name
        .as_deref()
        .and_then(|name| slate.injuries.iter().find(|i| i.player_id.as_deref() == Some(name)))
        .map(|i| i.status)
        .unwrap_or(InjuryStatus::Healthy);

    let pick_id = schema::pick_id(&line.event_id, line.market_kind, &line.selection_key, line.line, line.over_under);
    let pick = CandidatePick {
        pick_id,
        event_id: line.event_id.clone(),
        market_kind: line.market_kind,
        selection: line.selection_key.clone(),
        line: line.line,
        over_under: line.over_under,
        odds_american: line.odds_american,
        book_key: line.book_key.clone(),
        book_link: None,
        ai_score: 0.0,
        research_score: 0.0,
        esoteric_score: 0.0,
        jarvis_score: 0.0,
        jason_sim_boost: 0.0,
        final_score: 0.0,
        titanium_count: 0,
        titanium_triggered: false,
        tier: Tier::Pass,
        units: 0.0,
        reasons: vec![],
        signals_fired: vec![],
        engine_breakdown: EngineBreakdown::default(),
        validator_results: vec![],
        under_supported: true,
        correction_flags: vec![],
        status: event.status,
        has_started: event.has_started,
        is_live: event.is_live,
        status_observed_at: chrono::Utc::now(),
    };

    let engine_inputs = EngineInputs {
        ai: ai::AiInput {
            home_team: event.home_team.clone(),
            away_team: event.away_team.clone(),
            spread: matches!(line.market_kind, MarketKind::Spread).then_some(line.line).flatten(),
            total: matches!(line.market_kind, MarketKind::Total).then_some(line.line).flatten(),
            moneyline_odds: line.odds_american,
            over_under: line.over_under,
        },
        research: research::PillarInputs {
            sharp_split_strong: split.map(research::is_sharp_split_strong).unwrap_or(false),
            rlm: split.map(|s| s.rlm).unwrap_or(Rlm::None),
            confirmed_out_on_opponent: false,
            situational_spot_hit: false,
            expert_consensus_pct: 50.0,
            prop_correlated_with_game_line: false,
            near_key_number: line.line.map(|l| (l.abs() - 3.0).abs() < 0.5 || (l.abs() - 7.0).abs() < 0.5).unwrap_or(false),
            volume_above_threshold: split.map(|s| s.steam_strength >= 0.7).unwrap_or(false),
        },
        esoteric: esoteric::EsotericInputs {
            matchup_text: format!("{} {}", event.home_team, event.away_team),
            weather_relevant: false,
            referee_lean: context::referee_lean(context::referee_tendency(0, None)),
            travel_rest_score: context::travel_rest_score(0.0, 3),
            ..Default::default()
        },
        jarvis: jarvis::JarvisInput {
            matchup_text: format!("{} {}", event.home_team, event.away_team),
            spread_abs: line.line.map(f64::abs).unwrap_or(0.0),
            sport,
        },
    };

    let confluence_input = ConfluenceInput {
        injury_adjusted_win_pct: 55.0,
        sim: MonteCarloProjection {
            home_win_pct: 55.0,
            cover_pct: 52.0,
            projected_total: line.line.unwrap_or(0.0),
            variance_flag: false,
        },
        engine_alignment: split.map(|s| if s.rlm == Rlm::Strong { 0.9 } else { 0.6 }).unwrap_or(0.6),
        base_score: 0.0,
        any_active_signal: split.is_some(),
        pick_type: pick_type_str(line.market_kind),
    };

    let prop_input = PropIntegrityInput {
        sport: format!("{sport:?}").to_uppercase(),
        game_id: line.event_id.clone(),
        player_name: player_name.clone(),
        market: format!("{:?}", line.market_kind).to_lowercase(),
        line: line.line,
        side: line
            .over_under
            .map(|ou| format!("{ou:?}").to_lowercase())
            .unwrap_or_else(|| "home".to_string()),
        team_id: None,
        home_team_id: event.home_team.clone(),
        away_team_id: event.away_team.clone(),
        games_played_season: 40,
        active_status: "active".to_string(),
    };

    let injury_input = InjuryGuardInput { status: injury_status };

    (pick, engine_inputs, confluence_input, prop_input, injury_input)
}

async fn run_one_shot(sport: Sport, date: Option<&str>, config: Config) -> Result<()> {
    let parsed_date = date
        .map(|d| chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d"))
        .transpose()
        .context("parsing --date as YYYY-MM-DD")?;
    let (_, _, date_label) = slate_engine::time_gate::et_day_bounds(parsed_date);

    let health_registry = HealthRegistry::new();
    let slate_data = fetch::load_slate(&config, sport, &date_label, &health_registry).await;
    let has_events = !slate_data.events.is_empty();

    let mut scored = Vec::new();
    let mut prop_inputs = Vec::new();
    let mut injury_inputs = Vec::new();
    let mut ai_scores_so_far = Vec::new();

    for line in &slate_data.market_lines {
        let Some(event) = slate_data.events.iter().find(|e| e.event_id == line.event_id) else {
            continue;
        };
        let (pick, engine_inputs, confluence_input, prop_input, injury_input) =
            build_candidate(sport, line, event, &slate_data);

        let result = pipeline::score_and_tier(pick, &engine_inputs, &confluence_input, &ai_scores_so_far);
        ai_scores_so_far.push(result.pick.ai_score);
        scored.push(result);
        prop_inputs.push(prop_input);
        injury_inputs.push(injury_input);
    }

    let (validated, drops) = pipeline::validate(
        scored,
        &prop_inputs,
        &injury_inputs,
        &InjuryGuardConfig::default(),
        &MarketAvailabilityIndex::new(),
    );
    for drop in &drops {
        info!(pick_id = %drop.pick_id, reason = %drop.reason_code, "validator dropped candidate");
    }

    let snapshot_store = SnapshotStore::new(config.data_dir());
    let result = pipeline::finalize(sport, &date_label, has_events, validated, &health_registry, &snapshot_store);

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "health": result.health,
            "published": result.published,
            "receipts": result.receipts,
            "change_events": result.change_events,
            "dropped": drops.iter().map(|d| &d.reason_code).collect::<Vec<_>>(),
        }))?
    );

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let config = Config::from_env();
    let cli = Cli::parse();

    if let Some(sport) = &cli.sport {
        let sport = parse_sport(sport).with_context(|| format!("unrecognized sport: {sport}"))?;
        info!(?sport, date = ?cli.date, "running one-shot slate request");
        run_one_shot(sport, cli.date.as_deref(), config).await?;
        return Ok(());
    }

    let state = Arc::new(DebugState { config, health: HealthRegistry::new() });
    let app = api::router(state).layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("binding {}", cli.bind))?;
    info!(addr = %cli.bind, "debug surface listening");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("serving debug surface")?;

    Ok(())
}
