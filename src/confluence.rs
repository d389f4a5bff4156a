//! Jason-Sim Confluence (C9): post-pick boost/downgrade/block using
//! injury-adjusted win% and Monte-Carlo projections. Never reads odds.

#[derive(Debug, Clone, Copy)]
pub struct MonteCarloProjection {
    pub home_win_pct: f64,
    pub cover_pct: f64,
    pub projected_total: f64,
    pub variance_flag: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfluenceInput {
    /// Injury-adjusted win probability, CONFIRMED_ONLY (speculative
    /// statuses like DOUBTFUL/QUESTIONABLE are excluded upstream).
    pub injury_adjusted_win_pct: f64,
    pub sim: MonteCarloProjection,
    /// Fraction of engines agreeing with the pick's direction, 0.0-1.0.
    pub engine_alignment: f64,
    pub base_score: f64,
    pub any_active_signal: bool,
    /// One of `RECOGNIZED_PICK_TYPES`; anything else skips confluence
    /// entirely rather than boosting a market this module can't reason
    /// about.
    pub pick_type: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfluenceBand {
    Strong,
    Moderate,
    Negative,
    Neutral,
}

#[derive(Debug, Clone)]
pub struct ConfluenceOutput {
    pub jason_sim_boost: f64,
    pub band: ConfluenceBand,
    pub reasons: Vec<String>,
}

const RECOGNIZED_PICK_TYPES: [&str; 4] = ["spread", "moneyline", "total", "player_prop"];

/// Confirms a confluence reason only references a recognized pick type.
pub fn is_recognized_pick_type(pick_type: &str) -> bool {
    RECOGNIZED_PICK_TYPES.contains(&pick_type)
}

/// Computes the Jason-Sim boost. `final_score = base_score + boost`,
/// additive only -- this never overwrites the base engine average.
pub fn evaluate(input: &ConfluenceInput) -> ConfluenceOutput {
    let mut reasons = Vec::new();

    if !is_recognized_pick_type(input.pick_type) {
        reasons.push(format!("pick_type({}) not recognized, confluence skipped", input.pick_type));
        return ConfluenceOutput { jason_sim_boost: 0.0, band: ConfluenceBand::Neutral, reasons };
    }

    // A pick the simulation itself doesn't believe in gets penalized
    // before any alignment bonus is considered.
    let required_win_pct = (input.base_score / 10.0) * 100.0;
    if input.sim.home_win_pct < required_win_pct - 5.0 {
        reasons.push(format!(
            "sim_win_pct({:.1}) below required({:.1})",
            input.sim.home_win_pct, required_win_pct
        ));
        return ConfluenceOutput {
            jason_sim_boost: -1.5,
            band: ConfluenceBand::Negative,
            reasons,
        };
    }

    if input.engine_alignment >= 0.90 && input.any_active_signal {
        reasons.push(format!("alignment({:.0}%) >= 90% with active signal", input.engine_alignment * 100.0));
        return ConfluenceOutput {
            jason_sim_boost: 3.0,
            band: ConfluenceBand::Strong,
            reasons,
        };
    }

    if input.engine_alignment >= 0.70 {
        reasons.push(format!("alignment({:.0}%) >= 70%", input.engine_alignment * 100.0));
        return ConfluenceOutput {
            jason_sim_boost: 1.0,
            band: ConfluenceBand::Moderate,
            reasons,
        };
    }

    ConfluenceOutput { jason_sim_boost: 0.0, band: ConfluenceBand::Neutral, reasons }
}

/// Applies the boost additively; callers pass the already-averaged engine
/// score as `base_score`.
pub fn final_score(base_score: f64, boost: f64) -> f64 {
    (base_score + boost).clamp(0.0, 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim(home_win_pct: f64) -> MonteCarloProjection {
        MonteCarloProjection { home_win_pct, cover_pct: 55.0, projected_total: 220.0, variance_flag: false }
    }

    #[test]
    fn strong_alignment_with_active_signal_boosts_three() {
        let out = evaluate(&ConfluenceInput {
            injury_adjusted_win_pct: 60.0,
            sim: sim(65.0),
            engine_alignment: 0.95,
            base_score: 7.0,
            any_active_signal: true,
            pick_type: "spread",
        });
        assert_eq!(out.jason_sim_boost, 3.0);
        assert_eq!(out.band, ConfluenceBand::Strong);
    }

    #[test]
    fn low_simulated_win_pct_overrides_to_negative_boost() {
        let out = evaluate(&ConfluenceInput {
            injury_adjusted_win_pct: 40.0,
            sim: sim(10.0),
            engine_alignment: 0.95,
            base_score: 8.0,
            any_active_signal: true,
            pick_type: "spread",
        });
        assert_eq!(out.band, ConfluenceBand::Negative);
        assert!(out.jason_sim_boost < 0.0);
    }

    #[test]
    fn unrecognized_pick_type_skips_confluence_entirely() {
        let out = evaluate(&ConfluenceInput {
            injury_adjusted_win_pct: 60.0,
            sim: sim(65.0),
            engine_alignment: 0.95,
            base_score: 7.0,
            any_active_signal: true,
            pick_type: "futures",
        });
        assert_eq!(out.jason_sim_boost, 0.0);
        assert_eq!(out.band, ConfluenceBand::Neutral);
    }

    #[test]
    fn final_score_is_additive_and_clamped() {
        assert_eq!(final_score(7.0, 3.0), 10.0);
        assert_eq!(final_score(9.5, 3.0), 10.0);
    }

    #[test]
    fn only_recognized_pick_types_pass() {
        assert!(is_recognized_pick_type("spread"));
        assert!(!is_recognized_pick_type("futures"));
    }
}
