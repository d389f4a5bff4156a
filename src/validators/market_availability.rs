//! Market Availability validator: drops any prop not listed by the
//! reference sportsbook. An empty index means the book feed is itself
//! unavailable, so this degrades gracefully to allow-all.

use std::collections::HashSet;

use crate::models::{CandidatePick, ValidatorResult};

#[derive(Debug, Clone, Default)]
pub struct MarketAvailabilityIndex {
    keys: HashSet<String>,
}

impl MarketAvailabilityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sport: &str, game_id: &str, selection_key: &str, line: Option<f64>, side: &str) {
        self.keys.insert(Self::key(sport, game_id, selection_key, line, side));
    }

    fn key(sport: &str, game_id: &str, selection_key: &str, line: Option<f64>, side: &str) -> String {
        format!(
            "{}|{}|{}|{}|{}",
            sport.to_ascii_lowercase(),
            game_id,
            selection_key.to_ascii_lowercase(),
            line.map(|l| format!("{l:.1}")).unwrap_or_default(),
            side.to_ascii_lowercase(),
        )
    }

    pub fn contains(&self, sport: &str, game_id: &str, selection_key: &str, line: Option<f64>, side: &str) -> bool {
        self.keys.contains(&Self::key(sport, game_id, selection_key, line, side))
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

const VALIDATOR_NAME: &str = "market_availability";

pub fn validate(pick: &CandidatePick, index: &MarketAvailabilityIndex) -> Result<ValidatorResult, String> {
    if index.is_empty() {
        return Ok(ValidatorResult { validator: VALIDATOR_NAME.to_string(), passed: true, reason_code: None });
    }

    let sport = pick.event_id.split(':').next().unwrap_or_default();
    if !index.contains(sport, &pick.event_id, &pick.selection, pick.line, "") {
        return Err("DK_MARKET_NOT_LISTED".to_string());
    }

    Ok(ValidatorResult { validator: VALIDATOR_NAME.to_string(), passed: true, reason_code: None })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_index_allows_everything() {
        let index = MarketAvailabilityIndex::new();
        assert!(index.is_empty());
    }

    #[test]
    fn lookup_is_case_and_line_sensitive() {
        let mut index = MarketAvailabilityIndex::new();
        index.insert("nba", "g1", "lebron_points", Some(25.5), "over");
        assert!(index.contains("NBA", "g1", "LeBron_Points", Some(25.5), "OVER"));
        assert!(!index.contains("nba", "g1", "lebron_points", Some(26.5), "over"));
    }
}
