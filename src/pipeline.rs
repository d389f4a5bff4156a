//! Pipeline: orchestrates the full control flow for one `(sport, date)`
//! request: Time Gate -> Fetch -> engines -> Jason-Sim -> Validators ->
//! Publish Gate -> Tiering -> Schema/Receipt -> Change Monitor -> response.

use crate::change_monitor::{self, ChangeEvent, SnapshotStore};
use crate::confluence::{self, ConfluenceInput};
use crate::engines::{self, EngineInputs};
use crate::models::{CandidatePick, Sport, SlateHealth};
use crate::publish_gate;
use crate::registry::health::HealthRegistry;
use crate::registry::{Criticality, INTEGRATIONS};
use crate::schema::receipt::Receipt;
use crate::tiering;
use crate::validators::{self, InjuryGuardConfig, InjuryGuardInput, MarketAvailabilityIndex, PropIntegrityInput};

/// A fully assembled candidate plus whatever else engine scoring and
/// confluence produced for it, just before validators run.
pub struct ScoredCandidate {
    pub pick: CandidatePick,
    pub confluence: confluence::ConfluenceOutput,
}

/// Scores one candidate end to end: engines -> additive final score ->
/// Jason-Sim -> tiering. Does not run validators or the publish gate.
/// `peer_ai_scores` is every other candidate's already-computed `ai_score`
/// in this slate (see `engines::ai::score`).
pub fn score_and_tier(
    mut pick: CandidatePick,
    engine_inputs: &EngineInputs,
    confluence_input: &ConfluenceInput,
    peer_ai_scores: &[f64],
) -> ScoredCandidate {
    let scores = engines::score_candidate(engine_inputs, peer_ai_scores);
    engines::apply_scores(&mut pick, scores);

    let base_score = (pick.ai_score + pick.research_score + pick.esoteric_score + pick.jarvis_score) / 4.0;
    let confluence_out = confluence::evaluate(&ConfluenceInput { base_score, ..*confluence_input });
    pick.jason_sim_boost = confluence_out.jason_sim_boost;
    pick.final_score = confluence::final_score(base_score, pick.jason_sim_boost);

    if matches!(pick.over_under, Some(crate::models::OverUnder::Under)) && !pick.under_supported {
        pick.final_score = (pick.final_score - 0.15).max(0.0);
    }

    let engines_at_8 = pick.engines_at_or_above(8.0);
    pick.titanium_triggered = tiering::titanium_triggered(pick.titanium_count, pick.final_score, engines_at_8);
    pick.tier = tiering::tier_from_score(pick.final_score, pick.titanium_triggered);
    pick.units = pick.tier.units();
    pick.reasons.extend(confluence_out.reasons.clone());

    ScoredCandidate { pick, confluence: confluence_out }
}

/// Runs the three validators (in their mandated order) against every
/// scored candidate, attaching survivors' results and splitting off
/// anything a validator rejects before it ever reaches the publish gate.
/// `prop_inputs`/`injury_inputs` must be index-aligned with `scored`.
pub fn validate(
    scored: Vec<ScoredCandidate>,
    prop_inputs: &[PropIntegrityInput],
    injury_inputs: &[InjuryGuardInput],
    guard_config: &InjuryGuardConfig,
    market_index: &MarketAvailabilityIndex,
) -> (Vec<ScoredCandidate>, Vec<validators::Drop>) {
    let mut survivors = Vec::with_capacity(scored.len());
    let mut drops = Vec::new();

    for (i, mut candidate) in scored.into_iter().enumerate() {
        match validators::run(&candidate.pick, &prop_inputs[i], &injury_inputs[i], guard_config, market_index) {
            Ok(results) => {
                candidate.pick.validator_results = results;
                survivors.push(candidate);
            }
            Err(drop) => drops.push(drop),
        }
    }

    (survivors, drops)
}

/// Applies the publish-gate sequence (dedup -> correlation penalty ->
/// quality floor -> caps) to a batch of already-tiered candidates.
pub fn publish(candidates: Vec<CandidatePick>) -> Vec<CandidatePick> {
    let deduped = publish_gate::dominance_dedup(candidates);
    let penalized = publish_gate::correlation_penalty(deduped);
    let survivors = publish_gate::quality_gate(penalized);
    publish_gate::apply_caps(survivors)
}

pub struct SlateResult {
    pub health: SlateHealth,
    pub published: Vec<CandidatePick>,
    pub receipts: Vec<Receipt>,
    pub change_events: Vec<ChangeEvent>,
}

/// Derives the overall health classification for a slate request.
pub fn derive_slate_health(has_events: bool, published: &[CandidatePick], health_registry: &HealthRegistry) -> SlateHealth {
    if !has_events {
        return SlateHealth::NoSlate;
    }
    if published.is_empty() {
        return SlateHealth::NoPicks;
    }

    let critical_providers: Vec<_> = INTEGRATIONS.iter().filter(|i| i.criticality == Criticality::Critical).collect();
    let unhealthy_count = critical_providers
        .iter()
        .filter(|i| {
            health_registry
                .get(i.name)
                .map(|h| h.snapshot().succeeded == 0 && h.snapshot().called > 0)
                .unwrap_or(false)
        })
        .count();

    if !critical_providers.is_empty() && unhealthy_count * 2 > critical_providers.len() {
        return SlateHealth::Starved;
    }

    let all_low = published
        .iter()
        .all(|p| (p.ai_score + p.research_score + p.esoteric_score + p.jarvis_score) / 4.0 < 5.5);
    if all_low {
        return SlateHealth::LowEdge;
    }

    if unhealthy_count > 0 {
        return SlateHealth::Degraded;
    }

    SlateHealth::Healthy
}

/// Runs the tail of the pipeline once candidates have been scored, tiered,
/// and validated: publish gate, receipts, and the change-monitor diff
/// against the last persisted snapshot.
pub fn finalize(
    sport: Sport,
    date_label: &str,
    has_events: bool,
    scored: Vec<ScoredCandidate>,
    health_registry: &HealthRegistry,
    snapshot_store: &SnapshotStore,
) -> SlateResult {
    let bands: std::collections::HashMap<String, confluence::ConfluenceBand> =
        scored.iter().map(|s| (s.pick.pick_id.clone(), s.confluence.band)).collect();
    let candidates: Vec<CandidatePick> = scored.into_iter().map(|s| s.pick).collect();

    let published = publish(candidates);

    let receipts: Vec<Receipt> = published
        .iter()
        .map(|p| crate::schema::receipt::build(p, bands.get(&p.pick_id).copied().unwrap_or(confluence::ConfluenceBand::Neutral)))
        .collect();

    let previous = snapshot_store.load_latest(sport);
    let change_events = change_monitor::diff(previous.as_ref(), &published);
    let snapshot = change_monitor::build_snapshot(sport, date_label, &published);
    let _ = snapshot_store.persist(&snapshot);

    let health = derive_slate_health(has_events, &published, health_registry);

    SlateResult { health, published, receipts, change_events }
}
