//! Prop Integrity validator: required keys present and internally
//! consistent, regardless of market kind.

use crate::models::ValidatorResult;

#[derive(Debug, Clone)]
pub struct PropIntegrityInput {
    pub sport: String,
    pub game_id: String,
    pub player_name: Option<String>,
    pub market: String,
    pub line: Option<f64>,
    pub side: String,
    pub team_id: Option<String>,
    pub home_team_id: String,
    pub away_team_id: String,
    pub games_played_season: u32,
    pub active_status: String,
}

const VALIDATOR_NAME: &str = "prop_integrity";

pub fn validate(input: &PropIntegrityInput) -> Result<ValidatorResult, String> {
    if input.sport.is_empty() || input.game_id.is_empty() || input.market.is_empty() || input.side.is_empty() {
        return Err("MISSING_REQUIRED_KEY".to_string());
    }

    if let Some(team_id) = &input.team_id {
        if team_id != &input.home_team_id && team_id != &input.away_team_id {
            return Err("TEAM_ID_MISMATCH".to_string());
        }
    }

    if input.games_played_season == 0 {
        return Err("NO_GAMES_PLAYED".to_string());
    }

    if input.active_status.eq_ignore_ascii_case("inactive") {
        return Err("PLAYER_INACTIVE".to_string());
    }

    Ok(ValidatorResult { validator: VALIDATOR_NAME.to_string(), passed: true, reason_code: None })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> PropIntegrityInput {
        PropIntegrityInput {
            sport: "NBA".to_string(),
            game_id: "g1".to_string(),
            player_name: Some("LeBron James".to_string()),
            market: "points".to_string(),
            line: Some(25.5),
            side: "over".to_string(),
            team_id: Some("LAL".to_string()),
            home_team_id: "LAL".to_string(),
            away_team_id: "BOS".to_string(),
            games_played_season: 40,
            active_status: "active".to_string(),
        }
    }

    #[test]
    fn passes_a_consistent_prop() {
        assert!(validate(&baseline()).is_ok());
    }

    #[test]
    fn rejects_team_id_not_in_game() {
        let mut input = baseline();
        input.team_id = Some("NYK".to_string());
        assert_eq!(validate(&input).unwrap_err(), "TEAM_ID_MISMATCH");
    }

    #[test]
    fn rejects_inactive_players() {
        let mut input = baseline();
        input.active_status = "inactive".to_string();
        assert_eq!(validate(&input).unwrap_err(), "PLAYER_INACTIVE");
    }
}
