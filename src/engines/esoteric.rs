//! Esoteric Engine: environment signals with per-signal provenance.
//! Strictly independent of public fade, sharp money, and gematria hits —
//! those belong to Research and Jarvis respectively.
//!
//! Numerology primitives (gematria, titanium triggers, Fibonacci, vortex)
//! live here; `jarvis.rs` reuses the gematria/titanium helpers for its
//! own, separate scoring.

use crate::models::{CallProof, EsotericSignal, EsotericSignalRecord, SignalStatus, SourceType, ESOTERIC_SIGNALS};

/// Simple gematria: a=1..z=26.
pub fn gematria_simple(text: &str) -> u32 {
    text.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| (c as u32) - ('a' as u32) + 1)
        .sum()
}

/// Reverse gematria: a=26..z=1.
pub fn gematria_reverse(text: &str) -> u32 {
    text.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| 27 - ((c as u32) - ('a' as u32) + 1))
        .sum()
}

const MASTER_NUMBERS: [u32; 3] = [11, 22, 33];

/// Digit-sum reduction to a single digit, preserving master numbers.
pub fn digit_reduce(mut n: u32) -> u32 {
    loop {
        if MASTER_NUMBERS.contains(&n) || n < 10 {
            return n;
        }
        n = n
            .to_string()
            .chars()
            .filter_map(|c| c.to_digit(10))
            .sum();
    }
}

pub const TITANIUM_NUMBERS: [u32; 11] =
    [2178, 201, 33, 93, 322, 666, 888, 369, 1656, 552, 138];

pub fn power_numbers() -> [u32; 9] {
    [11, 22, 33, 44, 55, 66, 77, 88, 99]
}

/// Tesla reduction: final digit of the reduced number is in {3, 6, 9}.
pub fn tesla_final_digit_hit(n: u32) -> bool {
    matches!(digit_reduce(n) % 10, 3 | 6 | 9)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitaniumTrigger {
    DirectMatch,
    PowerNumber,
    TeslaReduction,
}

/// Titanium trigger evaluation, capped total boost of 20 mapped into the
/// Jarvis score space.
pub fn titanium_triggers(n: u32) -> Vec<TitaniumTrigger> {
    let mut hits = Vec::new();
    if TITANIUM_NUMBERS.contains(&n) {
        hits.push(TitaniumTrigger::DirectMatch);
    }
    if power_numbers().contains(&n) {
        hits.push(TitaniumTrigger::PowerNumber);
    }
    if tesla_final_digit_hit(n) {
        hits.push(TitaniumTrigger::TeslaReduction);
    }
    hits
}

pub fn titanium_boost(triggers: &[TitaniumTrigger]) -> f64 {
    let raw: f64 = triggers
        .iter()
        .map(|t| match t {
            TitaniumTrigger::DirectMatch => 10.0,
            TitaniumTrigger::PowerNumber => 6.0,
            TitaniumTrigger::TeslaReduction => 4.0,
        })
        .sum();
    raw.min(20.0)
}

const FIBONACCI: [u32; 11] = [1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89];
const PHI: f64 = 1.618_033_988_75;

/// Fibonacci proximity bonus: exact hit +0.10, near (<=0.5) +0.05,
/// phi-ratio alignment +0.05.
pub fn fibonacci_bonus(value: f64) -> f64 {
    let mut bonus = 0.0;
    if FIBONACCI.iter().any(|&f| (f as f64 - value).abs() < 1e-9) {
        bonus += 0.10;
    } else if FIBONACCI.iter().any(|&f| (f as f64 - value).abs() <= 0.5) {
        bonus += 0.05;
    }
    if value > 0.0 {
        let ratio = value / PHI;
        if (ratio.round() - ratio).abs() < 0.02 {
            bonus += 0.05;
        }
    }
    bonus
}

const VORTEX_PATTERN: [u32; 6] = [1, 2, 4, 8, 7, 5];
const VORTEX_TESLA_KEYS: [u32; 3] = [3, 6, 9];

/// Vortex math bonus: Tesla keys +0.15, in-pattern +0.08.
pub fn vortex_bonus(n: u32) -> f64 {
    let reduced = digit_reduce(n);
    if VORTEX_TESLA_KEYS.contains(&reduced) {
        0.15
    } else if VORTEX_PATTERN.contains(&reduced) {
        0.08
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpLevel {
    Quiet,
    Unsettled,
    Active,
    Storm,
}

impl KpLevel {
    pub fn from_kp(kp: f64) -> Self {
        if kp < 3.0 {
            KpLevel::Quiet
        } else if kp < 4.0 {
            KpLevel::Unsettled
        } else if kp < 5.0 {
            KpLevel::Active
        } else {
            KpLevel::Storm
        }
    }
}

/// Kp-index score: QUIET -> 0.8, decaying through to STORM -> 0.3.
pub fn kp_score(kp: f64) -> f64 {
    match KpLevel::from_kp(kp) {
        KpLevel::Quiet => 0.8,
        KpLevel::Unsettled => 0.6,
        KpLevel::Active => 0.45,
        KpLevel::Storm => 0.3,
    }
}

/// Inputs the esoteric engine draws on; any field left `None` produces a
/// `NO_DATA` signal record rather than a fabricated value.
#[derive(Debug, Clone, Default)]
pub struct EsotericInputs {
    pub matchup_text: String,
    pub kp_index: Option<f64>,
    pub altitude_adjustment: f64,
    pub weather_relevant: bool,
    pub weather_score: Option<f64>,
    pub referee_lean: f64,
    pub travel_rest_score: f64,
    pub life_path_number: Option<u32>,
    pub fibonacci_probe: Option<f64>,
}

pub struct EsotericOutput {
    pub esoteric_score: f64,
    pub breakdown: Vec<EsotericSignalRecord>,
}

fn record(
    signal: EsotericSignal,
    value: f64,
    status: SignalStatus,
    source_type: SourceType,
    triggered: bool,
    contribution: f64,
) -> EsotericSignalRecord {
    EsotericSignalRecord {
        signal,
        value,
        status,
        source_api: None,
        source_type,
        raw_inputs_summary: String::new(),
        call_proof: CallProof::default(),
        triggered,
        contribution,
    }
}

/// Scores all 23 canonical signals and sums their contributions into
/// `esoteric_score`, clamped to [0, 10]. Every signal gets a record, fired
/// or not, satisfying the receipt-completeness invariant.
pub fn score(inputs: &EsotericInputs) -> EsotericOutput {
    let mut breakdown = Vec::with_capacity(23);
    let mut total = 5.0;

    let gematria_val = gematria_simple(&inputs.matchup_text);
    let reduced = digit_reduce(gematria_val);
    let master_hit = MASTER_NUMBERS.contains(&reduced);
    total += if master_hit { 0.2 } else { 0.0 };
    breakdown.push(record(
        EsotericSignal::ChromeResonance,
        gematria_val as f64,
        SignalStatus::Success,
        SourceType::Internal,
        master_hit,
        if master_hit { 0.2 } else { 0.0 },
    ));

    let fib_value = inputs.fibonacci_probe.unwrap_or(gematria_val as f64);
    let fib_bonus = fibonacci_bonus(fib_value);
    total += fib_bonus;
    breakdown.push(record(
        EsotericSignal::Fibonacci,
        fib_value,
        SignalStatus::Success,
        SourceType::Internal,
        fib_bonus > 0.0,
        fib_bonus,
    ));

    let vortex = vortex_bonus(gematria_val);
    total += vortex;
    breakdown.push(record(
        EsotericSignal::Vortex,
        gematria_val as f64,
        SignalStatus::Success,
        SourceType::Internal,
        vortex > 0.0,
        vortex,
    ));

    match inputs.kp_index {
        Some(kp) => {
            let contribution = kp_score(kp) - 0.5;
            total += contribution;
            breakdown.push(record(
                EsotericSignal::KpIndex,
                kp,
                SignalStatus::Success,
                SourceType::External,
                contribution > 0.0,
                contribution,
            ));
        }
        None => breakdown.push(record(
            EsotericSignal::KpIndex,
            0.0,
            SignalStatus::NoData,
            SourceType::External,
            false,
            0.0,
        )),
    }

    total += inputs.altitude_adjustment;
    breakdown.push(record(
        EsotericSignal::Altitude,
        inputs.altitude_adjustment,
        SignalStatus::Success,
        SourceType::Internal,
        inputs.altitude_adjustment != 0.0,
        inputs.altitude_adjustment,
    ));

    if inputs.weather_relevant {
        match inputs.weather_score {
            Some(w) => {
                total += w;
                breakdown.push(record(
                    EsotericSignal::Weather,
                    w,
                    SignalStatus::Success,
                    SourceType::External,
                    w != 0.0,
                    w,
                ));
            }
            None => breakdown.push(record(
                EsotericSignal::Weather,
                0.0,
                SignalStatus::NoData,
                SourceType::External,
                false,
                0.0,
            )),
        }
    } else {
        // Relevance-gated, never FEATURE_DISABLED.
        breakdown.push(record(
            EsotericSignal::Weather,
            0.0,
            SignalStatus::Skipped,
            SourceType::External,
            false,
            0.0,
        ));
    }

    total += inputs.referee_lean;
    breakdown.push(record(
        EsotericSignal::Referee,
        inputs.referee_lean,
        SignalStatus::Success,
        SourceType::Internal,
        inputs.referee_lean != 0.0,
        inputs.referee_lean,
    ));

    total += inputs.travel_rest_score;
    breakdown.push(record(
        EsotericSignal::Travel,
        inputs.travel_rest_score,
        SignalStatus::Success,
        SourceType::Internal,
        inputs.travel_rest_score != 0.0,
        inputs.travel_rest_score,
    ));

    if let Some(life_path) = inputs.life_path_number {
        let reduced = digit_reduce(life_path);
        let hit = MASTER_NUMBERS.contains(&reduced);
        breakdown.push(record(
            EsotericSignal::LifePath,
            life_path as f64,
            SignalStatus::Success,
            SourceType::Internal,
            hit,
            if hit { 0.1 } else { 0.0 },
        ));
        total += if hit { 0.1 } else { 0.0 };
    } else {
        breakdown.push(record(
            EsotericSignal::LifePath,
            0.0,
            SignalStatus::NoData,
            SourceType::Internal,
            false,
            0.0,
        ));
    }

    // Remaining signals are internal seed-table reads without live feeds
    // wired in this core; recorded NO_COMPONENTS rather than fabricated.
    for signal in ESOTERIC_SIGNALS {
        if breakdown.iter().any(|r| r.signal == signal) {
            continue;
        }
        breakdown.push(record(
            signal,
            0.0,
            SignalStatus::NoComponents,
            SourceType::Internal,
            false,
            0.0,
        ));
    }

    debug_assert_eq!(breakdown.len(), 23);

    EsotericOutput { esoteric_score: total.clamp(0.0, 10.0), breakdown }
}
