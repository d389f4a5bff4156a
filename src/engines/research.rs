//! Research Engine: eight pillars, each a boolean pass plus a numeric
//! contribution, summed onto a base of 5.0 and clamped to [0, 10].

use crate::models::{Rlm, ResearchPillar, SplitSignal, RESEARCH_PILLARS};

const BASE_SCORE: f64 = 5.0;
/// Factory weightings may drift at most +/-15% from these via the micro-
/// weight vector.
const FACTORY_WEIGHTS: [f64; 8] = [1.2, 1.0, 0.8, 0.6, 0.5, 0.5, 0.4, 0.3];
const MAX_DRIFT: f64 = 0.15;

#[derive(Debug, Clone, Copy)]
pub struct MicroWeights(pub [f64; 8]);

impl Default for MicroWeights {
    fn default() -> Self {
        MicroWeights(FACTORY_WEIGHTS)
    }
}

impl MicroWeights {
    /// Clamps every weight to within +/-15% of its factory value.
    pub fn bounded(mut self) -> Self {
        for (w, factory) in self.0.iter_mut().zip(FACTORY_WEIGHTS.iter()) {
            let lo = factory * (1.0 - MAX_DRIFT);
            let hi = factory * (1.0 + MAX_DRIFT);
            *w = w.clamp(lo, hi);
        }
        self
    }
}

#[derive(Debug, Clone)]
pub struct PillarInputs {
    pub sharp_split_strong: bool,
    pub rlm: Rlm,
    pub confirmed_out_on_opponent: bool,
    pub situational_spot_hit: bool,
    pub expert_consensus_pct: f64,
    pub prop_correlated_with_game_line: bool,
    pub near_key_number: bool,
    pub volume_above_threshold: bool,
}

pub struct ResearchOutput {
    pub research_score: f64,
    pub contributions: Vec<(ResearchPillar, f64, bool)>,
}

fn pillar_index(pillar: ResearchPillar) -> usize {
    RESEARCH_PILLARS.iter().position(|p| *p == pillar).unwrap()
}

pub fn score(inputs: &PillarInputs, weights: MicroWeights) -> ResearchOutput {
    let w = weights.bounded().0;
    let mut contributions = Vec::with_capacity(8);
    let mut total = BASE_SCORE;

    let mut add = |pillar: ResearchPillar, passed: bool| {
        let contribution = if passed { w[pillar_index(pillar)] } else { 0.0 };
        total += contribution;
        contributions.push((pillar, contribution, passed));
    };

    add(ResearchPillar::SharpSplit, inputs.sharp_split_strong);
    add(ResearchPillar::ReverseLineMove, inputs.rlm == Rlm::Strong);
    add(ResearchPillar::HospitalFade, inputs.confirmed_out_on_opponent);
    add(ResearchPillar::SituationalSpot, inputs.situational_spot_hit);
    add(ResearchPillar::ExpertConsensus, inputs.expert_consensus_pct >= 65.0);
    add(ResearchPillar::PropCorrelation, inputs.prop_correlated_with_game_line);
    add(ResearchPillar::HookDiscipline, inputs.near_key_number);
    add(ResearchPillar::VolumeDiscipline, inputs.volume_above_threshold);

    ResearchOutput { research_score: total.clamp(0.0, 10.0), contributions }
}

/// Sharp-money strength from a raw split signal.
pub fn is_sharp_split_strong(split: &SplitSignal) -> bool {
    split.rlm == Rlm::Strong || split.steam_strength >= 0.7
}
