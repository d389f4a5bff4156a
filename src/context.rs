//! Context Layer: pure functions over static tables. No network, no
//! suspension points — plain functions, since scoring code is expected to
//! be non-suspending.

use crate::models::Sport;

/// Altitude adjustment to the Esoteric score, capped at +/-0.5.
pub fn altitude_adjustment(venue: &str, sport: Sport, over_under_is_over: Option<bool>) -> f64 {
    let raw: f64 = match (venue, sport) {
        ("Denver", Sport::Nba) => 0.15,
        ("Denver", Sport::Nfl) => 0.25,
        ("Coors Field", Sport::Mlb) => match over_under_is_over {
            Some(true) => 0.50,
            Some(false) => -0.30,
            None => 0.0,
        },
        ("Utah", Sport::Nba) => 0.15,
        _ => 0.0,
    };
    raw.clamp(-0.5, 0.5)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestImpact {
    None,
    Low,
    Medium,
    High,
}

/// Travel & rest: distance (miles) x fatigue multiplier x rest-days factor.
/// Back-to-back is HIGH impact; 3+ rest days is NONE.
pub fn travel_rest_impact(distance_miles: f64, rest_days: u32) -> RestImpact {
    if rest_days == 0 {
        return RestImpact::High;
    }
    if rest_days >= 3 {
        return RestImpact::None;
    }
    if distance_miles > 1500.0 {
        RestImpact::Medium
    } else {
        RestImpact::Low
    }
}

pub fn travel_rest_score(distance_miles: f64, rest_days: u32) -> f64 {
    let fatigue_multiplier = (distance_miles / 1000.0).min(3.0);
    let rest_factor = match travel_rest_impact(distance_miles, rest_days) {
        RestImpact::High => 1.0,
        RestImpact::Medium => 0.6,
        RestImpact::Low => 0.3,
        RestImpact::None => 0.0,
    };
    -(fatigue_multiplier * rest_factor * 0.1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoulRateTendency {
    Low,
    Medium,
    High,
}

/// Referee tendency lookup: prefers live rolling history (>=50 games),
/// falls back to a static seed table otherwise. The seed table is a
/// starting point, not ground truth.
pub fn referee_tendency(live_games_sampled: u32, live_foul_rate: Option<f64>) -> FoulRateTendency {
    let foul_rate = if live_games_sampled >= 50 {
        live_foul_rate.unwrap_or(20.0)
    } else {
        static_referee_seed_table()
    };

    if foul_rate < 18.0 {
        FoulRateTendency::Low
    } else if foul_rate < 22.0 {
        FoulRateTendency::Medium
    } else {
        FoulRateTendency::High
    }
}

fn static_referee_seed_table() -> f64 {
    20.0
}

/// Maps a tendency into a small Over/Under lean.
pub fn referee_lean(tendency: FoulRateTendency) -> f64 {
    match tendency {
        FoulRateTendency::High => 0.15,
        FoulRateTendency::Medium => 0.0,
        FoulRateTendency::Low => -0.15,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn altitude_is_capped() {
        assert_eq!(altitude_adjustment("Coors Field", Sport::Mlb, Some(true)), 0.50);
        assert_eq!(altitude_adjustment("Denver", Sport::Nfl, None), 0.25);
        assert_eq!(altitude_adjustment("Sea Level City", Sport::Nba, None), 0.0);
    }

    #[test]
    fn back_to_back_is_high_impact_three_rest_days_is_none() {
        assert_eq!(travel_rest_impact(500.0, 0), RestImpact::High);
        assert_eq!(travel_rest_impact(500.0, 3), RestImpact::None);
    }
}
