//! The only authority for ET calendar-day boundaries (C1).
//!
//! Every other module that needs "is this today" must call through here.
//! Deliberately small surface: `now_et`, `et_day_bounds`, `filter_events_et`,
//! plus two supplemented status helpers. No other date helpers are exported.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::America::New_York;
use chrono_tz::Tz;

use crate::models::Event;

pub type EtDateTime = DateTime<Tz>;

/// Current time in `America/New_York`.
pub fn now_et() -> EtDateTime {
    Utc::now().with_timezone(&New_York)
}

/// `[start, end)` bounds for an ET calendar day, plus its `YYYY-MM-DD`
/// label. `date` defaults to today (ET) when `None`. The upper bound is
/// exclusive: the UTC instant equal to `end` belongs to the *next* day.
pub fn et_day_bounds(date: Option<NaiveDate>) -> (EtDateTime, EtDateTime, String) {
    let day = date.unwrap_or_else(|| now_et().date_naive());
    let start = New_York
        .from_local_datetime(&day.and_hms_opt(0, 0, 0).expect("valid midnight"))
        .single()
        .expect("unambiguous ET midnight");
    let end = start + chrono::Duration::days(1);
    (start, end, day.format("%Y-%m-%d").to_string())
}

/// Whether an ET-zoned instant falls within `[start, end)` for `date`
/// (today when `None`).
pub fn is_in_et_day(instant: EtDateTime, date: Option<NaiveDate>) -> bool {
    let (start, end, _) = et_day_bounds(date);
    instant >= start && instant < end
}

/// Splits events into those starting within today's ET window, those that
/// start outside it, and those whose commence time could not be parsed.
pub fn filter_events_et(events: Vec<Event>) -> (Vec<Event>, Vec<Event>, Vec<Event>) {
    let (start, end, _) = et_day_bounds(None);
    let mut kept = Vec::new();
    let mut dropped_out_of_window = Vec::new();
    let mut dropped_missing = Vec::new();

    for event in events {
        match event.start_time_et {
            Some(et) if et >= start && et < end => kept.push(event),
            Some(_) => dropped_out_of_window.push(event),
            None => dropped_missing.push(event),
        }
    }

    (kept, dropped_out_of_window, dropped_missing)
}

/// Minutes remaining until the next ET midnight.
pub fn minutes_until_next_et_midnight() -> i64 {
    let (_, end, _) = et_day_bounds(None);
    (end - now_et()).num_minutes().max(0)
}

/// Whether today's ET slate window has already fully elapsed.
pub fn is_today_et_over() -> bool {
    let (_, end, _) = et_day_bounds(None);
    now_et() >= end
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn day_bounds_are_exclusive_at_upper_edge() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let (start, end, label) = et_day_bounds(Some(day));
        assert_eq!(label, "2026-01-15");
        assert!(is_in_et_day(start, Some(day)));
        assert!(!is_in_et_day(end, Some(day)));

        let just_before_end = end - chrono::Duration::minutes(1);
        assert!(is_in_et_day(just_before_end, Some(day)));
    }

    #[test]
    fn filter_splits_kept_out_and_missing() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let (start, end, _) = et_day_bounds(Some(day));

        let today_event = make_event("e1", Some(start + chrono::Duration::hours(1)));
        let tomorrow_event = make_event("e2", Some(end));
        let missing_event = make_event("e3", None);

        let (kept, out, missing) =
            filter_events_et(vec![today_event, tomorrow_event, missing_event]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].event_id, "e1");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].event_id, "e2");
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].event_id, "e3");
    }

    fn make_event(id: &str, start_et: Option<EtDateTime>) -> Event {
        Event {
            event_id: id.to_string(),
            sport: crate::models::Sport::Nba,
            league: "NBA".to_string(),
            home_team: "HOME".to_string(),
            away_team: "AWAY".to_string(),
            start_time_utc: start_et.map(|e| e.with_timezone(&Utc)),
            start_time_et: start_et,
            status: crate::models::EventStatus::PreGame,
            has_started: false,
            is_live: false,
        }
    }
}
