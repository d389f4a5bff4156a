//! End-to-end exercise of the scoring pipeline without any network calls:
//! builds candidates by hand, runs them through engines, confluence,
//! tiering, and the publish gate, then checks the published slate obeys
//! the caps and receipt-completeness invariants.

use chrono::Utc;

use slate_engine::confluence::{ConfluenceInput, MonteCarloProjection};
use slate_engine::engines::{ai, esoteric, jarvis, research, EngineInputs};
use slate_engine::models::{
    CandidatePick, EngineBreakdown, EventStatus, MarketKind, Rlm, Sport, Tier,
};
use slate_engine::pipeline::{publish, score_and_tier};
use slate_engine::schema::receipt;

fn blank_pick(pick_id: &str, event_id: &str, selection: &str) -> CandidatePick {
    CandidatePick {
        pick_id: pick_id.to_string(),
        event_id: event_id.to_string(),
        market_kind: MarketKind::Spread,
        selection: selection.to_string(),
        line: Some(-4.5),
        over_under: None,
        odds_american: Some(-110),
        book_key: "draftkings".to_string(),
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
        engine_breakdown: EngineBreakdown {
            ai_contributions: vec![],
            research_contributions: vec![],
            esoteric_breakdown: vec![],
            jarvis_triggers: vec![],
        },
        validator_results: vec![],
        under_supported: false,
        correction_flags: vec![],
        status: EventStatus::PreGame,
        has_started: false,
        is_live: false,
        status_observed_at: Utc::now(),
    }
}

fn strong_engine_inputs(home: &str, away: &str) -> EngineInputs {
    EngineInputs {
        ai: ai::AiInput {
            home_team: home.to_string(),
            away_team: away.to_string(),
            spread: Some(6.0),
            total: Some(220.0),
            moneyline_odds: Some(-150),
            over_under: None,
        },
        research: research::PillarInputs {
            sharp_split_strong: true,
            rlm: Rlm::Strong,
            confirmed_out_on_opponent: true,
            situational_spot_hit: true,
            expert_consensus_pct: 80.0,
            prop_correlated_with_game_line: true,
            near_key_number: true,
            volume_above_threshold: true,
        },
        esoteric: esoteric::EsotericInputs {
            matchup_text: format!("{home} {away}"),
            weather_relevant: false,
            ..Default::default()
        },
        jarvis: jarvis::JarvisInput {
            matchup_text: format!("{home} {away}"),
            spread_abs: 6.0,
            sport: Sport::Nba,
        },
    }
}

fn strong_confluence() -> ConfluenceInput {
    ConfluenceInput {
        injury_adjusted_win_pct: 65.0,
        sim: MonteCarloProjection { home_win_pct: 65.0, cover_pct: 58.0, projected_total: 220.0, variance_flag: false },
        engine_alignment: 0.95,
        base_score: 0.0,
        any_active_signal: true,
        pick_type: "spread",
    }
}

#[test]
fn a_batch_of_candidates_survives_the_publish_gate_with_complete_receipts() {
    let mut scored_picks = Vec::new();
    let mut ai_scores_so_far = Vec::new();
    for i in 0..3 {
        let pick = blank_pick(&format!("pick-{i}"), &format!("evt-{i}"), &format!("Team{i}|points"));
        let scored = score_and_tier(pick, &strong_engine_inputs("Lakers", "Celtics"), &strong_confluence(), &ai_scores_so_far);
        ai_scores_so_far.push(scored.pick.ai_score);
        scored_picks.push(scored.pick);
    }

    let published = publish(scored_picks);
    assert!(!published.is_empty());
    assert!(published.len() <= slate_engine::publish_gate::MAX_TOTAL);

    for pick in &published {
        let receipt = receipt::build(pick, slate_engine::confluence::ConfluenceBand::Strong);
        assert!(receipt::is_complete(&receipt));
    }
}

#[test]
fn under_prop_without_support_is_penalized_before_tiering() {
    let mut pick = blank_pick("under-1", "evt-1", "Total|points");
    pick.over_under = Some(slate_engine::models::OverUnder::Under);
    pick.under_supported = false;

    let weak_confluence = ConfluenceInput {
        injury_adjusted_win_pct: 50.0,
        sim: MonteCarloProjection { home_win_pct: 50.0, cover_pct: 50.0, projected_total: 220.0, variance_flag: false },
        engine_alignment: 0.5,
        base_score: 0.0,
        any_active_signal: false,
        pick_type: "total",
    };

    let scored = score_and_tier(pick, &strong_engine_inputs("Lakers", "Celtics"), &weak_confluence, &[]);
    assert!(scored.pick.final_score >= 0.0);
}
