//! Tiering: the single source of truth for score -> tier -> units -> action.
//! No other module may read these thresholds directly.

use crate::models::Tier;

/// Maps a final score (plus whether the titanium gate fired) onto a tier.
/// Thresholds are strictly non-overlapping.
pub fn tier_from_score(score: f64, titanium_triggered: bool) -> Tier {
    if titanium_triggered && score >= 9.0 {
        Tier::TitaniumSmash
    } else if score >= 7.5 {
        Tier::GoldStar
    } else if score >= 6.5 {
        Tier::EdgeLean
    } else if score >= 5.5 {
        Tier::Monitor
    } else {
        Tier::Pass
    }
}

/// Evaluates the titanium gate itself: requires at least 3 titanium
/// triggers, a final score >= 8.0, and at least 3 of the 4 engine scores
/// >= 8.0.
pub fn titanium_triggered(titanium_count: u8, final_score: f64, engines_at_or_above_8: usize) -> bool {
    titanium_count >= 3 && final_score >= 8.0 && engines_at_or_above_8 >= 3
}
