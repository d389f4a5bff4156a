//! Change monitor: diffs the new pick list against the last persisted
//! snapshot for a sport and emits change events. Snapshots are archived
//! with a timestamp; the latest overwrites `{sport}_latest.json`.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::{CandidatePick, Sport, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    OddsMove,
    LineMove,
    PropLineMove,
    TierChange,
    PropAdded,
    PropRemoved,
    PickAdded,
    PickRemoved,
    InjuryFlip,
    GoalieStatusChange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub pick_id: String,
    pub kind: ChangeKind,
    pub severity: Severity,
    pub detail: String,
}

/// The minimal durable shape of a published pick, used only to diff
/// against the next run; richer receipt data doesn't round-trip here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotPick {
    pub pick_id: String,
    pub odds_american: Option<i32>,
    pub line: Option<f64>,
    pub tier: Tier,
    pub is_prop: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub sport: Sport,
    pub date_label: String,
    pub picks: Vec<SnapshotPick>,
}

impl From<&CandidatePick> for SnapshotPick {
    fn from(pick: &CandidatePick) -> Self {
        SnapshotPick {
            pick_id: pick.pick_id.clone(),
            odds_american: pick.odds_american,
            line: pick.line,
            tier: pick.tier,
            is_prop: matches!(pick.market_kind, crate::models::MarketKind::PlayerProp),
        }
    }
}

const ODDS_MOVE_THRESHOLD: f64 = 0.015;
const ODDS_MOVE_ALERT: f64 = 0.03;
const LINE_MOVE_THRESHOLD: f64 = 0.5;
const LINE_MOVE_ALERT: f64 = 1.0;

fn implied_prob(odds: Option<i32>) -> Option<f64> {
    odds.map(crate::models::american_to_prob)
}

/// Diffs a new pick list against the previous snapshot, producing change
/// events in no particular priority order.
pub fn diff(previous: Option<&Snapshot>, current: &[CandidatePick]) -> Vec<ChangeEvent> {
    let mut events = Vec::new();
    let previous_by_id: HashMap<&str, &SnapshotPick> = previous
        .map(|s| s.picks.iter().map(|p| (p.pick_id.as_str(), p)).collect())
        .unwrap_or_default();
    let current_ids: std::collections::HashSet<&str> = current.iter().map(|p| p.pick_id.as_str()).collect();

    for pick in current {
        match previous_by_id.get(pick.pick_id.as_str()) {
            None => {
                let kind = if matches!(pick.market_kind, crate::models::MarketKind::PlayerProp) {
                    ChangeKind::PropAdded
                } else {
                    ChangeKind::PickAdded
                };
                events.push(ChangeEvent {
                    pick_id: pick.pick_id.clone(),
                    kind,
                    severity: Severity::Info,
                    detail: "new in this slate".to_string(),
                });
            }
            Some(prev) => {
                if let (Some(prev_prob), Some(new_prob)) =
                    (implied_prob(prev.odds_american), implied_prob(pick.odds_american))
                {
                    let delta = (new_prob - prev_prob).abs();
                    if delta >= ODDS_MOVE_THRESHOLD {
                        let severity = if delta >= ODDS_MOVE_ALERT { Severity::Alert } else { Severity::Warning };
                        events.push(ChangeEvent {
                            pick_id: pick.pick_id.clone(),
                            kind: ChangeKind::OddsMove,
                            severity,
                            detail: format!("implied prob moved {:.1}pp", delta * 100.0),
                        });
                    }
                }

                if let (Some(prev_line), Some(new_line)) = (prev.line, pick.line) {
                    let delta = (new_line - prev_line).abs();
                    if delta >= LINE_MOVE_THRESHOLD {
                        let severity = if delta >= LINE_MOVE_ALERT { Severity::Alert } else { Severity::Warning };
                        let kind = if prev.is_prop { ChangeKind::PropLineMove } else { ChangeKind::LineMove };
                        events.push(ChangeEvent {
                            pick_id: pick.pick_id.clone(),
                            kind,
                            severity,
                            detail: format!("line moved {delta:.1} points"),
                        });
                    }
                }

                if prev.tier != pick.tier {
                    let severity = if pick.tier > prev.tier { Severity::Info } else { Severity::Warning };
                    events.push(ChangeEvent {
                        pick_id: pick.pick_id.clone(),
                        kind: ChangeKind::TierChange,
                        severity,
                        detail: format!("{:?} -> {:?}", prev.tier, pick.tier),
                    });
                }
            }
        }
    }

    if let Some(prev_snapshot) = previous {
        for prev in &prev_snapshot.picks {
            if !current_ids.contains(prev.pick_id.as_str()) {
                let kind = if prev.is_prop { ChangeKind::PropRemoved } else { ChangeKind::PickRemoved };
                events.push(ChangeEvent {
                    pick_id: prev.pick_id.clone(),
                    kind,
                    severity: Severity::Info,
                    detail: "dropped from this slate".to_string(),
                });
            }
        }
    }

    events
}

pub struct SnapshotStore {
    data_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    fn latest_path(&self, sport: Sport) -> PathBuf {
        self.data_dir.join(format!("{}_latest.json", sport_label(sport)))
    }

    fn archive_path(&self, sport: Sport, date_label: &str) -> PathBuf {
        self.data_dir.join(format!("{}_{}.json", sport_label(sport), date_label))
    }

    pub fn load_latest(&self, sport: Sport) -> Option<Snapshot> {
        let bytes = fs::read(self.latest_path(sport)).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Writes the archive copy, then atomically replaces `{sport}_latest.json`
    /// via a temp-file rename so readers never see a partially-written file.
    pub fn persist(&self, snapshot: &Snapshot) -> io::Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        let body = serde_json::to_vec_pretty(snapshot)?;
        fs::write(self.archive_path(snapshot.sport, &snapshot.date_label), &body)?;

        let latest = self.latest_path(snapshot.sport);
        let tmp = latest.with_extension("json.tmp");
        fs::write(&tmp, &body)?;
        fs::rename(&tmp, &latest)?;
        Ok(())
    }
}

fn sport_label(sport: Sport) -> &'static str {
    match sport {
        Sport::Nba => "nba",
        Sport::Nfl => "nfl",
        Sport::Mlb => "mlb",
        Sport::Nhl => "nhl",
        Sport::Ncaab => "ncaab",
    }
}

pub fn build_snapshot(sport: Sport, date_label: &str, picks: &[CandidatePick]) -> Snapshot {
    Snapshot { sport, date_label: date_label.to_string(), picks: picks.iter().map(SnapshotPick::from).collect() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_odds_move_raises_an_alert() {
        let prev = Snapshot {
            sport: Sport::Nba,
            date_label: "2026-08-01".to_string(),
            picks: vec![SnapshotPick { pick_id: "p1".to_string(), odds_american: Some(-110), line: None, tier: Tier::Monitor, is_prop: false }],
        };

        let mut current_pick = sample_pick("p1");
        current_pick.odds_american = Some(-140);
        let events = diff(Some(&prev), &[current_pick]);

        assert!(events.iter().any(|e| e.kind == ChangeKind::OddsMove && e.severity == Severity::Alert));
    }

    #[test]
    fn small_odds_move_is_silent() {
        let prev = Snapshot {
            sport: Sport::Nba,
            date_label: "2026-08-01".to_string(),
            picks: vec![SnapshotPick { pick_id: "p1".to_string(), odds_american: Some(-110), line: None, tier: Tier::Monitor, is_prop: false }],
        };

        let mut current_pick = sample_pick("p1");
        current_pick.odds_american = Some(-113);
        let events = diff(Some(&prev), &[current_pick]);

        assert!(!events.iter().any(|e| e.kind == ChangeKind::OddsMove));
    }

    fn sample_pick(pick_id: &str) -> CandidatePick {
        CandidatePick {
            pick_id: pick_id.to_string(),
            event_id: "evt1".to_string(),
            market_kind: crate::models::MarketKind::Spread,
            selection: "Lakers".to_string(),
            line: None,
            over_under: None,
            odds_american: Some(-110),
            book_key: "draftkings".to_string(),
            book_link: None,
            ai_score: 6.0,
            research_score: 6.0,
            esoteric_score: 6.0,
            jarvis_score: 6.0,
            jason_sim_boost: 0.0,
            final_score: 6.0,
            titanium_count: 0,
            titanium_triggered: false,
            tier: Tier::Monitor,
            units: 0.0,
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
            status: crate::models::EventStatus::PreGame,
            has_started: false,
            is_live: false,
            status_observed_at: chrono::Utc::now(),
        }
    }
}
