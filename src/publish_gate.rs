//! Publish gate: dominance dedup, correlation penalty, quality floor, and
//! the final player/game/tier caps. Applied after validators, before
//! tiering finalizes each surviving candidate.

use std::collections::HashMap;

use crate::models::{CandidatePick, Tier};
use crate::tiering;

pub const QUALITY_FLOOR: f64 = 5.5;
pub const MAX_GOLD_STAR: usize = 5;
pub const MAX_EDGE_LEAN: usize = 8;
pub const MAX_TOTAL: usize = 13;
pub const MAX_PER_PLAYER: usize = 2;
pub const MAX_GOLD_STAR_PER_PLAYER: usize = 1;
pub const MAX_PER_GAME: usize = 3;

fn player_key(pick: &CandidatePick) -> String {
    pick.selection.split('|').next().unwrap_or(&pick.selection).to_string()
}

/// Keeps only the highest-scoring candidate within each player x market
/// cluster.
pub fn dominance_dedup(picks: Vec<CandidatePick>) -> Vec<CandidatePick> {
    let mut best: HashMap<(String, String), CandidatePick> = HashMap::new();
    for pick in picks {
        let key = (player_key(&pick), format!("{:?}", pick.market_kind));
        match best.get(&key) {
            Some(existing) if existing.final_score >= pick.final_score => {}
            _ => {
                best.insert(key, pick);
            }
        }
    }
    best.into_values().collect()
}

/// Subtracts a monotone penalty from lower-ranked candidates within a game
/// that has more than 2 highly-correlated survivors. `tier`/`units` are
/// re-derived from the penalized score immediately -- `tiering.rs` is the
/// only source of truth for that mapping, so a score change can never
/// leave a stale tier/units pair behind.
pub fn correlation_penalty(mut picks: Vec<CandidatePick>) -> Vec<CandidatePick> {
    let mut by_game: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, pick) in picks.iter().enumerate() {
        by_game.entry(pick.event_id.clone()).or_default().push(i);
    }

    for indices in by_game.values() {
        if indices.len() <= 2 {
            continue;
        }
        let mut ranked = indices.clone();
        ranked.sort_by(|&a, &b| picks[b].final_score.partial_cmp(&picks[a].final_score).unwrap());
        for (rank, &idx) in ranked.iter().enumerate().skip(2) {
            let penalty = 0.1 * rank as f64;
            let pick = &mut picks[idx];
            pick.final_score = (pick.final_score - penalty).max(0.0);

            let engines_at_8 = pick.engines_at_or_above(8.0);
            pick.titanium_triggered = tiering::titanium_triggered(pick.titanium_count, pick.final_score, engines_at_8);
            pick.tier = tiering::tier_from_score(pick.final_score, pick.titanium_triggered);
            pick.units = pick.tier.units();
        }
    }

    picks
}

/// Drops anything below the community quality floor.
pub fn quality_gate(picks: Vec<CandidatePick>) -> Vec<CandidatePick> {
    picks.into_iter().filter(|p| p.final_score >= QUALITY_FLOOR).collect()
}

/// Fills the published slate in descending final-score order, respecting
/// the tier, per-player, and per-game caps.
pub fn apply_caps(mut picks: Vec<CandidatePick>) -> Vec<CandidatePick> {
    picks.sort_by(|a, b| b.final_score.partial_cmp(&a.final_score).unwrap());

    let mut published = Vec::new();
    let mut gold_star_count = 0usize;
    let mut edge_lean_count = 0usize;
    let mut per_player: HashMap<String, usize> = HashMap::new();
    let mut gold_star_per_player: HashMap<String, usize> = HashMap::new();
    let mut per_game: HashMap<String, usize> = HashMap::new();

    for pick in picks {
        if published.len() >= MAX_TOTAL {
            break;
        }

        let player = player_key(&pick);
        let game_count = *per_game.get(&pick.event_id).unwrap_or(&0);
        let player_count = *per_player.get(&player).unwrap_or(&0);
        let player_gold_count = *gold_star_per_player.get(&player).unwrap_or(&0);

        if game_count >= MAX_PER_GAME || player_count >= MAX_PER_PLAYER {
            continue;
        }

        match pick.tier {
            Tier::GoldStar | Tier::TitaniumSmash => {
                if gold_star_count >= MAX_GOLD_STAR || player_gold_count >= MAX_GOLD_STAR_PER_PLAYER {
                    continue;
                }
                gold_star_count += 1;
                *gold_star_per_player.entry(player.clone()).or_insert(0) += 1;
            }
            Tier::EdgeLean => {
                if edge_lean_count >= MAX_EDGE_LEAN {
                    continue;
                }
                edge_lean_count += 1;
            }
            Tier::Monitor | Tier::Pass => {}
        }

        *per_player.entry(player).or_insert(0) += 1;
        *per_game.entry(pick.event_id.clone()).or_insert(0) += 1;
        published.push(pick);
    }

    published
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EngineBreakdown, MarketKind};

    fn sample(event_id: &str, selection: &str, score: f64, tier: Tier) -> CandidatePick {
        CandidatePick {
            pick_id: format!("{event_id}-{selection}"),
            event_id: event_id.to_string(),
            market_kind: MarketKind::PlayerProp,
            selection: selection.to_string(),
            line: None,
            over_under: None,
            odds_american: None,
            book_key: "draftkings".to_string(),
            book_link: None,
            ai_score: score,
            research_score: score,
            esoteric_score: score,
            jarvis_score: score,
            jason_sim_boost: 0.0,
            final_score: score,
            titanium_count: 0,
            titanium_triggered: false,
            tier,
            units: tier.units(),
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
            status: crate::models::EventStatus::PreGame,
            has_started: false,
            is_live: false,
            status_observed_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn quality_gate_drops_below_floor() {
        let picks = vec![sample("g1", "p1|points", 5.0, Tier::Pass), sample("g1", "p2|points", 6.0, Tier::Monitor)];
        let survivors = quality_gate(picks);
        assert_eq!(survivors.len(), 1);
    }

    #[test]
    fn correlation_penalty_recomputes_tier_after_lowering_score() {
        let mut picks = Vec::new();
        for i in 0..4 {
            picks.push(sample("g1", &format!("p{i}|points"), 7.6, Tier::GoldStar));
        }
        let penalized = correlation_penalty(picks);
        for pick in &penalized {
            assert_eq!(pick.tier, tiering::tier_from_score(pick.final_score, pick.titanium_triggered));
            assert_eq!(pick.units, pick.tier.units());
        }
        // The two lowest-ranked candidates absorb a large enough penalty to
        // drop below the GoldStar threshold.
        assert!(penalized.iter().any(|p| p.tier != Tier::GoldStar));
    }

    #[test]
    fn dominance_dedup_keeps_highest_scorer_per_player_market() {
        let picks = vec![
            sample("g1", "p1|points", 6.0, Tier::Monitor),
            sample("g1", "p1|points", 8.0, Tier::GoldStar),
        ];
        let survivors = dominance_dedup(picks);
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].final_score, 8.0);
    }

    #[test]
    fn caps_respect_gold_star_and_per_game_limits() {
        let mut picks = Vec::new();
        for i in 0..6 {
            picks.push(sample("g1", &format!("p{i}|points"), 9.0, Tier::GoldStar));
        }
        let published = apply_caps(picks);
        let gold = published.iter().filter(|p| p.tier == Tier::GoldStar).count();
        assert!(gold <= MAX_GOLD_STAR);
        assert!(published.len() <= MAX_PER_GAME);
    }
}
