//! Injury Guard validator: drops OUT/SUSPENDED outright; DOUBTFUL and
//! GTD/QUESTIONABLE are configurable flags.

use crate::models::{InjuryStatus, ValidatorResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct InjuryGuardConfig {
    pub block_doubtful: bool,
    pub block_gtd: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct InjuryGuardInput {
    pub status: InjuryStatus,
}

const VALIDATOR_NAME: &str = "injury_guard";

pub fn validate(input: &InjuryGuardInput, config: &InjuryGuardConfig) -> Result<ValidatorResult, String> {
    match input.status {
        InjuryStatus::Out => return Err("INJURY_OUT".to_string()),
        InjuryStatus::Suspended => return Err("INJURY_SUSPENDED".to_string()),
        InjuryStatus::Doubtful if config.block_doubtful => return Err("INJURY_DOUBTFUL_BLOCKED".to_string()),
        InjuryStatus::Questionable if config.block_gtd => return Err("INJURY_GTD_BLOCKED".to_string()),
        _ => {}
    }

    Ok(ValidatorResult { validator: VALIDATOR_NAME.to_string(), passed: true, reason_code: None })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_is_always_dropped() {
        let result = validate(&InjuryGuardInput { status: InjuryStatus::Out }, &InjuryGuardConfig::default());
        assert_eq!(result.unwrap_err(), "INJURY_OUT");
    }

    #[test]
    fn questionable_passes_unless_gtd_blocked() {
        let input = InjuryGuardInput { status: InjuryStatus::Questionable };
        assert!(validate(&input, &InjuryGuardConfig::default()).is_ok());
        let blocked = InjuryGuardConfig { block_doubtful: false, block_gtd: true };
        assert!(validate(&input, &blocked).is_err());
    }
}
