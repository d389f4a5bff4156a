//! Core domain types. `CandidatePick` is the single mutable struct that
//! flows through the pipeline; `Event`, `MarketLine`, `InjuryRecord`, and
//! `SplitSignal` are immutable once fetched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time_gate::EtDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sport {
    Nba,
    Nfl,
    Mlb,
    Nhl,
    Ncaab,
}

impl Sport {
    /// In-season month ranges. Months are 1-12; NBA/NHL wrap across the
    /// new year.
    pub fn in_season(self, month: u32) -> bool {
        match self {
            Sport::Nba => matches!(month, 10..=12 | 1..=6),
            Sport::Nfl => matches!(month, 9..=12 | 1..=2),
            Sport::Mlb => matches!(month, 3..=10),
            Sport::Nhl => matches!(month, 10..=12 | 1..=6),
            Sport::Ncaab => matches!(month, 11..=12 | 1..=4),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    PreGame,
    InProgress,
    Final,
    NotToday,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub event_id: String,
    pub sport: Sport,
    pub league: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub start_time_utc: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub start_time_et: Option<EtDateTime>,
    pub status: EventStatus,
    pub has_started: bool,
    pub is_live: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketKind {
    Spread,
    Moneyline,
    Total,
    PlayerProp,
}

/// Allowed sportsbook keys.
pub const ALLOWED_BOOK_KEYS: &[&str] = &[
    "draftkings",
    "fanduel",
    "betmgm",
    "caesars",
    "pointsbet",
    "pinnacle",
    "bet365",
    "betrivers",
    "espnbet",
    "unibet_us",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverUnder {
    Over,
    Under,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketLine {
    pub event_id: String,
    pub market_kind: MarketKind,
    /// Either a team identifier or `player_id|stat_type`.
    pub selection_key: String,
    pub line: Option<f64>,
    pub over_under: Option<OverUnder>,
    /// American odds; `None` (never fabricated, never defaulted to -110)
    /// when the book did not supply a price.
    pub odds_american: Option<i32>,
    pub book_key: String,
    pub fetched_at: DateTime<Utc>,
}

impl MarketLine {
    /// Implied probability of the American odds, or `None` if odds are
    /// unknown. Negative odds: `abs(odds)/(abs(odds)+100)`; positive:
    /// `100/(odds+100)`.
    pub fn implied_probability(&self) -> Option<f64> {
        self.odds_american.map(american_to_prob)
    }
}

pub fn american_to_prob(odds: i32) -> f64 {
    if odds < 0 {
        let a = odds.unsigned_abs() as f64;
        a / (a + 100.0)
    } else {
        100.0 / (odds as f64 + 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InjuryStatus {
    Out,
    Suspended,
    Doubtful,
    /// GTD (game-time decision) is the same bucket as questionable.
    Questionable,
    Probable,
    Healthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjuryRecord {
    pub player_id: Option<String>,
    pub player_name: String,
    pub status: InjuryStatus,
    pub team: String,
    pub reported_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rlm {
    None,
    Weak,
    Strong,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitSignal {
    pub event_id: String,
    pub market_kind: MarketKind,
    pub public_bet_pct: f64,
    pub public_money_pct: f64,
    pub sharp_side: Option<String>,
    pub rlm: Rlm,
    pub steam_strength: f64,
}

impl SplitSignal {
    /// Sharp/public divergence of >= 15 percentage points is STRONG RLM.
    pub fn classify_rlm(public_money_pct: f64, sharp_money_pct: f64) -> Rlm {
        let divergence = (sharp_money_pct - public_money_pct).abs();
        if divergence >= 15.0 {
            Rlm::Strong
        } else if divergence >= 5.0 {
            Rlm::Weak
        } else {
            Rlm::None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Pass = 0,
    Monitor = 1,
    EdgeLean = 2,
    GoldStar = 3,
    /// Highest tier: reserved for titanium-gated picks.
    TitaniumSmash = 4,
}

impl Tier {
    pub fn units(self) -> f64 {
        match self {
            Tier::TitaniumSmash => 2.5,
            Tier::GoldStar => 2.0,
            Tier::EdgeLean => 1.0,
            Tier::Monitor | Tier::Pass => 0.0,
        }
    }

    pub fn action(self) -> &'static str {
        match self {
            Tier::TitaniumSmash | Tier::GoldStar => "SMASH",
            Tier::EdgeLean => "PLAY",
            Tier::Monitor => "WATCH",
            Tier::Pass => "SKIP",
        }
    }
}

/// The 8 AI sub-models. Enum over a string-keyed registry so receipt
/// iteration order is the declared order, not insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiSubModel {
    LineMovement,
    Matchup,
    Rest,
    Injury,
    BettingEdge,
    MonteCarloGameSim,
    PaceDefensiveMatchup,
    PropHistory,
}
pub const AI_SUB_MODELS: [AiSubModel; 8] = [
    AiSubModel::LineMovement,
    AiSubModel::Matchup,
    AiSubModel::Rest,
    AiSubModel::Injury,
    AiSubModel::BettingEdge,
    AiSubModel::MonteCarloGameSim,
    AiSubModel::PaceDefensiveMatchup,
    AiSubModel::PropHistory,
];

/// The 8 Research pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchPillar {
    SharpSplit,
    ReverseLineMove,
    HospitalFade,
    SituationalSpot,
    ExpertConsensus,
    PropCorrelation,
    HookDiscipline,
    VolumeDiscipline,
}
pub const RESEARCH_PILLARS: [ResearchPillar; 8] = [
    ResearchPillar::SharpSplit,
    ResearchPillar::ReverseLineMove,
    ResearchPillar::HospitalFade,
    ResearchPillar::SituationalSpot,
    ResearchPillar::ExpertConsensus,
    ResearchPillar::PropCorrelation,
    ResearchPillar::HookDiscipline,
    ResearchPillar::VolumeDiscipline,
];

/// The canonical 23 esoteric signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EsotericSignal {
    ChromeResonance,
    VoidMoon,
    Noosphere,
    Hurst,
    KpIndex,
    Benford,
    Biorhythm,
    LifePath,
    FoundersEcho,
    GannSquare,
    FiftyRetrace,
    Schumann,
    Atmospheric,
    Vortex,
    Fibonacci,
    PhiAlignment,
    PlanetaryHour,
    Tesla369,
    DailyEdge,
    Altitude,
    Weather,
    Referee,
    Travel,
}
pub const ESOTERIC_SIGNALS: [EsotericSignal; 23] = [
    EsotericSignal::ChromeResonance,
    EsotericSignal::VoidMoon,
    EsotericSignal::Noosphere,
    EsotericSignal::Hurst,
    EsotericSignal::KpIndex,
    EsotericSignal::Benford,
    EsotericSignal::Biorhythm,
    EsotericSignal::LifePath,
    EsotericSignal::FoundersEcho,
    EsotericSignal::GannSquare,
    EsotericSignal::FiftyRetrace,
    EsotericSignal::Schumann,
    EsotericSignal::Atmospheric,
    EsotericSignal::Vortex,
    EsotericSignal::Fibonacci,
    EsotericSignal::PhiAlignment,
    EsotericSignal::PlanetaryHour,
    EsotericSignal::Tesla369,
    EsotericSignal::DailyEdge,
    EsotericSignal::Altitude,
    EsotericSignal::Weather,
    EsotericSignal::Referee,
    EsotericSignal::Travel,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalStatus {
    Success,
    Fallback,
    NoData,
    Error,
    Partial,
    Failed,
    NoComponents,
    Skipped,
    Pending,
    FallbackSuccess,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    Internal,
    External,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallProof {
    pub cache_hit: bool,
    pub status_2xx: bool,
    pub latency_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsotericSignalRecord {
    pub signal: EsotericSignal,
    pub value: f64,
    pub status: SignalStatus,
    pub source_api: Option<String>,
    pub source_type: SourceType,
    pub raw_inputs_summary: String,
    pub call_proof: CallProof,
    pub triggered: bool,
    pub contribution: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorResult {
    pub validator: String,
    pub passed: bool,
    pub reason_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrectionFlag {
    /// The home/away consistency enforcer rewrote `selection`.
    HomeAwayRewrite,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineBreakdown {
    pub ai_contributions: Vec<(AiSubModel, f64)>,
    pub research_contributions: Vec<(ResearchPillar, f64, bool)>,
    pub esoteric_breakdown: Vec<EsotericSignalRecord>,
    pub jarvis_triggers: Vec<String>,
}

/// Internal, mutable through the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatePick {
    pub pick_id: String,
    pub event_id: String,
    pub market_kind: MarketKind,
    pub selection: String,
    pub line: Option<f64>,
    pub over_under: Option<OverUnder>,
    pub odds_american: Option<i32>,
    pub book_key: String,
    pub book_link: Option<String>,

    pub ai_score: f64,
    pub research_score: f64,
    pub esoteric_score: f64,
    pub jarvis_score: f64,
    pub jason_sim_boost: f64,
    pub final_score: f64,

    pub titanium_count: u8,
    pub titanium_triggered: bool,
    pub tier: Tier,
    pub units: f64,

    pub reasons: Vec<String>,
    pub signals_fired: Vec<String>,
    pub engine_breakdown: EngineBreakdown,
    pub validator_results: Vec<ValidatorResult>,
    pub under_supported: bool,
    pub correction_flags: Vec<CorrectionFlag>,

    pub status: EventStatus,
    pub has_started: bool,
    pub is_live: bool,
    pub status_observed_at: DateTime<Utc>,
}

impl CandidatePick {
    /// Engine scores at or above 8.0, used by the Titanium invariant.
    pub fn engines_at_or_above(&self, threshold: f64) -> usize {
        [
            self.ai_score,
            self.research_score,
            self.esoteric_score,
            self.jarvis_score,
        ]
        .iter()
        .filter(|&&s| s >= threshold)
        .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlateHealth {
    Healthy,
    Degraded,
    Starved,
    LowEdge,
    NoSlate,
    NoPicks,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implied_probability_shift_from_line_move() {
        let prob_110 = american_to_prob(-110);
        let prob_140 = american_to_prob(-140);
        let change = (prob_140 - prob_110) / prob_110 * 100.0;
        // -110 -> -140 is ~4.9% implied-prob change.
        assert!((change - 4.9).abs() < 0.3, "change was {change}");
    }

    #[test]
    fn tier_units_follow_fixed_table() {
        assert_eq!(Tier::TitaniumSmash.units(), 2.5);
        assert_eq!(Tier::GoldStar.units(), 2.0);
        assert_eq!(Tier::EdgeLean.units(), 1.0);
        assert_eq!(Tier::Monitor.units(), 0.0);
        assert_eq!(Tier::Pass.units(), 0.0);
    }

    #[test]
    fn tier_ranks_are_monotonic_with_titanium_highest() {
        assert!(Tier::TitaniumSmash > Tier::GoldStar);
        assert!(Tier::GoldStar > Tier::EdgeLean);
        assert!(Tier::EdgeLean > Tier::Monitor);
        assert!(Tier::Monitor > Tier::Pass);
    }

    #[test]
    fn rlm_classification_thresholds() {
        assert_eq!(SplitSignal::classify_rlm(50.0, 66.0), Rlm::Strong);
        assert_eq!(SplitSignal::classify_rlm(50.0, 57.0), Rlm::Weak);
        assert_eq!(SplitSignal::classify_rlm(50.0, 52.0), Rlm::None);
    }
}
