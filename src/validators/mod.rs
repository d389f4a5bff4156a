//! Validators: run before the publish gate, on copies, never mutating the
//! candidate they inspect. Order matters.

pub mod injury_guard;
pub mod market_availability;
pub mod prop_integrity;

use crate::models::{CandidatePick, ValidatorResult};

pub use injury_guard::{InjuryGuardConfig, InjuryGuardInput};
pub use market_availability::MarketAvailabilityIndex;
pub use prop_integrity::PropIntegrityInput;

/// A dropped candidate's receipt line: `{pick_id, reason_code}`.
#[derive(Debug, Clone)]
pub struct Drop {
    pub pick_id: String,
    pub reason_code: String,
}

/// Runs the three validators in the mandated order against one candidate.
/// Returns `Ok(results)` to attach to the receipt if the pick survives, or
/// `Err(drop)` the moment any validator rejects it.
pub fn run(
    pick: &CandidatePick,
    prop_input: &PropIntegrityInput,
    injury_input: &InjuryGuardInput,
    guard_config: &InjuryGuardConfig,
    market_index: &MarketAvailabilityIndex,
) -> Result<Vec<ValidatorResult>, Drop> {
    let mut results = Vec::with_capacity(3);

    match prop_integrity::validate(prop_input) {
        Ok(r) => results.push(r),
        Err(reason_code) => {
            return Err(Drop { pick_id: pick.pick_id.clone(), reason_code });
        }
    }

    match injury_guard::validate(injury_input, guard_config) {
        Ok(r) => results.push(r),
        Err(reason_code) => {
            return Err(Drop { pick_id: pick.pick_id.clone(), reason_code });
        }
    }

    match market_availability::validate(pick, market_index) {
        Ok(r) => results.push(r),
        Err(reason_code) => {
            return Err(Drop { pick_id: pick.pick_id.clone(), reason_code });
        }
    }

    Ok(results)
}
