//! PickCard: the outward-facing normalization of a `CandidatePick` plus
//! its originating `Event`.

use serde::{Deserialize, Serialize};

use crate::models::{CandidatePick, CorrectionFlag, Event, EventStatus, MarketKind, OverUnder};
use crate::time_gate::EtDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickType {
    Spread,
    Moneyline,
    Total,
    PlayerProp,
}

impl From<MarketKind> for PickType {
    fn from(kind: MarketKind) -> Self {
        match kind {
            MarketKind::Spread => PickType::Spread,
            MarketKind::Moneyline => PickType::Moneyline,
            MarketKind::Total => PickType::Total,
            MarketKind::PlayerProp => PickType::PlayerProp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SelectionSide {
    Home,
    Away,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickCard {
    pub pick_id: String,
    pub event_id: String,
    pub matchup: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(skip)]
    pub start_time_et: Option<EtDateTime>,
    pub status: EventStatus,
    pub has_started: bool,
    pub is_live: bool,

    pub pick_type: PickType,
    pub market_label: String,
    pub selection: String,
    pub selection_home_away: Option<SelectionSide>,
    pub line: Option<f64>,
    pub line_signed: Option<String>,
    pub odds_american: Option<i32>,
    pub units: f64,
    pub bet_string: String,
    pub book: String,
    pub book_link: Option<String>,

    pub tier: String,
    pub score: f64,
    pub confidence: f64,
    pub signals_fired: Vec<String>,
    pub confluence_reasons: Vec<String>,
}

fn market_label(kind: MarketKind) -> &'static str {
    match kind {
        MarketKind::Spread => "Spread",
        MarketKind::Moneyline => "Moneyline",
        MarketKind::Total => "Total",
        MarketKind::PlayerProp => "Player Prop",
    }
}

/// Formats a signed line like `+1.5` / `-4.5`, or `O 220.5` / `U 220.5`
/// for totals.
fn line_signed(line: Option<f64>, over_under: Option<OverUnder>) -> Option<String> {
    let line = line?;
    Some(match over_under {
        Some(OverUnder::Over) => format!("O {line:.1}"),
        Some(OverUnder::Under) => format!("U {line:.1}"),
        None if line >= 0.0 => format!("+{line:.1}"),
        None => format!("{line:.1}"),
    })
}

fn bet_string(selection: &str, pick_type: PickType, line_signed: &Option<String>, odds: Option<i32>) -> String {
    let odds_part = odds.map(|o| format!(" ({o:+})")).unwrap_or_default();
    match (pick_type, line_signed) {
        (PickType::Moneyline, _) => format!("{selection} ML{odds_part}"),
        (_, Some(signed)) => format!("{selection} {signed}{odds_part}"),
        (_, None) => format!("{selection}{odds_part}"),
    }
}

/// Rewrites `selection` to agree with the home/away side the pick
/// actually targets; a disagreement is logged as a correction flag rather
/// than silently dropped.
pub fn enforce_home_away_consistency(
    selection: &str,
    pick_side: Option<SelectionSide>,
    home_team: &str,
    away_team: &str,
    correction_flags: &mut Vec<CorrectionFlag>,
) -> String {
    let expected = match pick_side {
        Some(SelectionSide::Home) => home_team,
        Some(SelectionSide::Away) => away_team,
        None => return selection.to_string(),
    };

    if selection == expected {
        selection.to_string()
    } else {
        correction_flags.push(CorrectionFlag::HomeAwayRewrite);
        expected.to_string()
    }
}

pub fn build(pick: &mut CandidatePick, event: &Event, pick_side: Option<SelectionSide>, confidence: f64) -> PickCard {
    let pick_type = PickType::from(pick.market_kind);
    let selection = enforce_home_away_consistency(
        &pick.selection,
        pick_side,
        &event.home_team,
        &event.away_team,
        &mut pick.correction_flags,
    );
    let signed = line_signed(pick.line, pick.over_under);
    let bet_string_value = bet_string(&selection, pick_type, &signed, pick.odds_american);

    PickCard {
        pick_id: pick.pick_id.clone(),
        event_id: event.event_id.clone(),
        matchup: format!("{} @ {}", event.away_team, event.home_team),
        home_team: event.home_team.clone(),
        away_team: event.away_team.clone(),
        start_time_et: event.start_time_et,
        status: event.status,
        has_started: event.has_started,
        is_live: event.is_live,

        pick_type,
        market_label: market_label(pick.market_kind).to_string(),
        selection,
        selection_home_away: pick_side,
        line: pick.line,
        line_signed: signed,
        odds_american: pick.odds_american,
        units: pick.units,
        bet_string: bet_string_value,
        book: pick.book_key.clone(),
        book_link: pick.book_link.clone(),

        tier: format!("{:?}", pick.tier),
        score: pick.final_score,
        confidence,
        signals_fired: pick.signals_fired.clone(),
        confluence_reasons: pick.reasons.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_mismatched_selection_and_logs_correction() {
        let mut flags = Vec::new();
        let selection = enforce_home_away_consistency("Celtics", Some(SelectionSide::Home), "Lakers", "Celtics", &mut flags);
        assert_eq!(selection, "Lakers");
        assert_eq!(flags.len(), 1);
    }

    #[test]
    fn line_signed_formats_totals_and_spreads() {
        assert_eq!(line_signed(Some(220.5), Some(OverUnder::Over)).unwrap(), "O 220.5");
        assert_eq!(line_signed(Some(4.5), None).unwrap(), "+4.5");
        assert_eq!(line_signed(Some(-4.5), None).unwrap(), "-4.5");
    }

    fn sample_event() -> Event {
        Event {
            event_id: "evt1".to_string(),
            sport: crate::models::Sport::Nba,
            league: "NBA".to_string(),
            home_team: "Lakers".to_string(),
            away_team: "Celtics".to_string(),
            start_time_utc: None,
            start_time_et: None,
            status: EventStatus::PreGame,
            has_started: false,
            is_live: false,
        }
    }

    fn sample_pick() -> CandidatePick {
        CandidatePick {
            pick_id: "p1".to_string(),
            event_id: "evt1".to_string(),
            market_kind: MarketKind::Spread,
            selection: "Celtics".to_string(),
            line: Some(-4.5),
            over_under: None,
            odds_american: Some(-110),
            book_key: "draftkings".to_string(),
            book_link: None,
            ai_score: 7.0,
            research_score: 7.0,
            esoteric_score: 7.0,
            jarvis_score: 7.0,
            jason_sim_boost: 0.0,
            final_score: 7.0,
            titanium_count: 0,
            titanium_triggered: false,
            tier: crate::models::Tier::EdgeLean,
            units: 1.0,
            reasons: vec![],
            signals_fired: vec![],
            engine_breakdown: crate::models::EngineBreakdown {
                ai_contributions: vec![],
                research_contributions: vec![],
                esoteric_breakdown: vec![],
                jarvis_triggers: vec![],
            },
            validator_results: vec![],
            under_supported: false,
            correction_flags: vec![],
            status: EventStatus::PreGame,
            has_started: false,
            is_live: false,
            status_observed_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn build_rewrites_mismatched_selection_and_records_the_flag_on_the_pick() {
        let mut pick = sample_pick();
        let event = sample_event();

        let card = build(&mut pick, &event, Some(SelectionSide::Home), 0.8);

        assert_eq!(card.selection, "Lakers");
        assert_eq!(pick.correction_flags, vec![CorrectionFlag::HomeAwayRewrite]);
    }

    #[test]
    fn build_leaves_a_consistent_selection_untouched() {
        let mut pick = sample_pick();
        let event = sample_event();

        let card = build(&mut pick, &event, Some(SelectionSide::Away), 0.8);

        assert_eq!(card.selection, "Celtics");
        assert!(pick.correction_flags.is_empty());
    }
}
