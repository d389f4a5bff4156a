//! The four scoring engines plus the orchestration that runs them together
//! for a single candidate.

pub mod ai;
pub mod esoteric;
pub mod jarvis;
pub mod research;

use crate::models::{CandidatePick, EngineBreakdown};

/// Everything the four engines need to score one candidate, gathered by
/// the pipeline before engine fan-out.
#[derive(Debug, Clone)]
pub struct EngineInputs {
    pub ai: ai::AiInput,
    pub research: research::PillarInputs,
    pub esoteric: esoteric::EsotericInputs,
    pub jarvis: jarvis::JarvisInput,
}

#[derive(Debug, Clone)]
pub struct EngineScores {
    pub ai_score: f64,
    pub research_score: f64,
    pub esoteric_score: f64,
    pub jarvis_score: f64,
    pub breakdown: EngineBreakdown,
}

impl EngineScores {
    pub fn average(&self) -> f64 {
        (self.ai_score + self.research_score + self.esoteric_score + self.jarvis_score) / 4.0
    }

    pub fn engines_at_or_above(&self, threshold: f64) -> usize {
        [self.ai_score, self.research_score, self.esoteric_score, self.jarvis_score]
            .iter()
            .filter(|s| **s >= threshold)
            .count()
    }
}

/// Runs all four engines for one candidate. Rayon parallelizes the
/// independent pure-function scoring paths; none of these calls suspend.
/// `peer_ai_scores` is every other candidate's already-computed `ai_score`
/// in this slate, used to decide between the AI ensemble and its fallback.
pub fn score_candidate(inputs: &EngineInputs, peer_ai_scores: &[f64]) -> EngineScores {
    let (ai_out, (research_out, (esoteric_out, jarvis_out))) = rayon::join(
        || ai::score(&inputs.ai, peer_ai_scores),
        || {
            rayon::join(
                || research::score(&inputs.research, research::MicroWeights::default()),
                || {
                    rayon::join(
                        || esoteric::score(&inputs.esoteric),
                        || jarvis::score(&inputs.jarvis),
                    )
                },
            )
        },
    );

    let breakdown = EngineBreakdown {
        ai_contributions: ai::complete_contributions(ai_out.contributions.clone()),
        research_contributions: research_out.contributions.clone(),
        esoteric_breakdown: esoteric_out.breakdown.clone(),
        jarvis_triggers: jarvis_out.triggers.clone(),
    };

    EngineScores {
        ai_score: ai_out.ai_score,
        research_score: research_out.research_score,
        esoteric_score: esoteric_out.esoteric_score,
        jarvis_score: jarvis_out.jarvis_score,
        breakdown,
    }
}

/// Applies the four computed scores onto a candidate's engine fields and
/// breakdown, mutating it in place as the pipeline assembles the pick.
pub fn apply_scores(pick: &mut CandidatePick, scores: EngineScores) {
    pick.ai_score = scores.ai_score;
    pick.research_score = scores.research_score;
    pick.esoteric_score = scores.esoteric_score;
    pick.jarvis_score = scores.jarvis_score;
    pick.engine_breakdown = scores.breakdown;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Rlm, Sport};

    fn sample_inputs() -> EngineInputs {
        EngineInputs {
            ai: ai::AiInput {
                home_team: "Lakers".to_string(),
                away_team: "Celtics".to_string(),
                spread: Some(6.0),
                total: Some(220.0),
                moneyline_odds: Some(-150),
                over_under: None,
            },
            research: research::PillarInputs {
                sharp_split_strong: true,
                rlm: Rlm::Strong,
                confirmed_out_on_opponent: false,
                situational_spot_hit: false,
                expert_consensus_pct: 70.0,
                prop_correlated_with_game_line: false,
                near_key_number: false,
                volume_above_threshold: false,
            },
            esoteric: esoteric::EsotericInputs {
                matchup_text: "Lakers Celtics".to_string(),
                weather_relevant: false,
                ..Default::default()
            },
            jarvis: jarvis::JarvisInput {
                matchup_text: "Lakers Celtics".to_string(),
                spread_abs: 6.0,
                sport: Sport::Nba,
            },
        }
    }

    #[test]
    fn score_candidate_fills_all_four_engines() {
        let scores = score_candidate(&sample_inputs(), &[]);
        assert!(scores.ai_score >= 0.0 && scores.ai_score <= 10.0);
        assert!(scores.research_score >= 0.0 && scores.research_score <= 10.0);
        assert!(scores.esoteric_score >= 0.0 && scores.esoteric_score <= 10.0);
        assert!(scores.jarvis_score >= 0.0 && scores.jarvis_score <= 10.0);
        assert_eq!(scores.breakdown.ai_contributions.len(), 8);
        assert_eq!(scores.breakdown.esoteric_breakdown.len(), 23);
    }
}
