//! Receipt: the reproducible debug proof attached to every published pick.
//! Embeds the four engine scores, the 8-pillar verdicts, the 23-signal
//! esoteric breakdown with provenance, the Jason-Sim boost, the titanium
//! check, and validator outcomes.

use serde::{Deserialize, Serialize};

use crate::confluence::ConfluenceBand;
use crate::models::{CandidatePick, EngineBreakdown, SignalStatus, ValidatorResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitaniumCheck {
    pub titanium_count: u8,
    pub titanium_triggered: bool,
    pub engines_at_or_above_eight: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub pick_id: String,
    pub ai_score: f64,
    pub research_score: f64,
    pub esoteric_score: f64,
    pub jarvis_score: f64,
    pub jason_sim_boost: f64,
    pub final_score: f64,
    pub engine_breakdown: EngineBreakdown,
    pub titanium: TitaniumCheck,
    pub validator_results: Vec<ValidatorResult>,
    pub reasons: Vec<String>,
    /// How many of the 23 esoteric signals carried a real computed
    /// contribution rather than a `NO_COMPONENTS` placeholder. Entry count
    /// alone (see `is_complete`) can't distinguish a fully-wired slate from
    /// one running mostly on stubs, so this rides alongside it.
    pub esoteric_signals_computed: usize,
}

/// `band` is carried separately from the numeric boost so the receipt can
/// explain *why* Jason-Sim moved the score, not just by how much.
pub fn build(pick: &CandidatePick, band: ConfluenceBand) -> Receipt {
    let mut reasons = pick.reasons.clone();
    reasons.push(format!("jason_sim_band={band:?}"));

    let esoteric_signals_computed = pick
        .engine_breakdown
        .esoteric_breakdown
        .iter()
        .filter(|r| r.status != SignalStatus::NoComponents)
        .count();

    Receipt {
        pick_id: pick.pick_id.clone(),
        ai_score: pick.ai_score,
        research_score: pick.research_score,
        esoteric_score: pick.esoteric_score,
        jarvis_score: pick.jarvis_score,
        jason_sim_boost: pick.jason_sim_boost,
        final_score: pick.final_score,
        engine_breakdown: pick.engine_breakdown.clone(),
        titanium: TitaniumCheck {
            titanium_count: pick.titanium_count,
            titanium_triggered: pick.titanium_triggered,
            engines_at_or_above_eight: pick.engines_at_or_above(8.0),
        },
        validator_results: pick.validator_results.clone(),
        reasons,
        esoteric_signals_computed,
    }
}

/// Verifies receipt completeness: all 8 AI sub-models, all 8 Research
/// pillars, and all 23 Esoteric signals appear. This only checks entry
/// count -- a slate running on stub placeholders still passes it, which is
/// why `all_esoteric_signals_computed` exists as a separate, stricter
/// signal.
pub fn is_complete(receipt: &Receipt) -> bool {
    receipt.engine_breakdown.ai_contributions.len() == 8
        && receipt.engine_breakdown.research_contributions.len() == 8
        && receipt.engine_breakdown.esoteric_breakdown.len() == 23
}

/// Whether every one of the 23 esoteric signals carried a real computed
/// contribution, as opposed to a `NO_COMPONENTS` placeholder.
pub fn all_esoteric_signals_computed(receipt: &Receipt) -> bool {
    receipt.esoteric_signals_computed == receipt.engine_breakdown.esoteric_breakdown.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventStatus, MarketKind};

    fn sample_pick() -> CandidatePick {
        CandidatePick {
            pick_id: "abc123".to_string(),
            event_id: "evt1".to_string(),
            market_kind: MarketKind::Spread,
            selection: "Lakers".to_string(),
            line: Some(-4.5),
            over_under: None,
            odds_american: Some(-110),
            book_key: "draftkings".to_string(),
            book_link: None,
            ai_score: 7.0,
            research_score: 7.0,
            esoteric_score: 7.0,
            jarvis_score: 7.0,
            jason_sim_boost: 1.0,
            final_score: 8.0,
            titanium_count: 1,
            titanium_triggered: false,
            tier: crate::models::Tier::GoldStar,
            units: 2.0,
            reasons: vec!["alignment".to_string()],
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
            status_observed_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn incomplete_breakdown_fails_completeness_check() {
        let receipt = build(&sample_pick(), ConfluenceBand::Moderate);
        assert!(!is_complete(&receipt));
    }

    #[test]
    fn real_esoteric_breakdown_has_fewer_computed_signals_than_entries() {
        let mut pick = sample_pick();
        pick.engine_breakdown.esoteric_breakdown = crate::engines::esoteric::score(&crate::engines::esoteric::EsotericInputs {
            matchup_text: "Lakers Celtics".to_string(),
            weather_relevant: false,
            ..Default::default()
        })
        .breakdown;

        let receipt = build(&pick, ConfluenceBand::Moderate);
        assert!(receipt.esoteric_signals_computed < receipt.engine_breakdown.esoteric_breakdown.len());
        assert!(!all_esoteric_signals_computed(&receipt));
    }
}
