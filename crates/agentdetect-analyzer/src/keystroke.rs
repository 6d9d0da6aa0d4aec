//! Keystroke signal group: spec.md §4.4 "Keystroke group".

use agentdetect_core::types::AnomalySignal;
use agentdetect_recorder::{KeyPhase, RecorderState};

use crate::stats::{coefficient_of_variation, ratio, variance};
use crate::thresholds::{MIN_KEYSTROKES, PERFECT_TIMING_VARIANCE};

pub fn analyze(state: &RecorderState) -> Vec<AnomalySignal> {
    let keystrokes: Vec<_> = state.keystrokes.iter().collect();
    let mut signals = Vec::new();

    if keystrokes.len() < MIN_KEYSTROKES {
        return signals;
    }

    let inter_key: Vec<f64> = keystrokes
        .iter()
        .filter(|k| k.phase == KeyPhase::Down)
        .filter_map(|k| k.delta_t_ms)
        .map(|dt| dt as f64)
        .collect();

    if inter_key.len() >= 5 {
        let v = variance(&inter_key);
        if v < PERFECT_TIMING_VARIANCE {
            signals.push(AnomalySignal::new("keystroke.perfect_timing", v, 9));
        }
    }

    if inter_key.len() >= 10 {
        let cv = coefficient_of_variation(&inter_key);
        if cv < 0.1 {
            signals.push(AnomalySignal::new("comet.uniform_keystroke_cadence", cv, 9));
        }
    }

    if !inter_key.is_empty() {
        let fast_fraction = ratio(
            inter_key.iter().filter(|&&dt| dt < 30.0).count() as f64,
            inter_key.len() as f64,
        );
        if fast_fraction > 0.3 {
            signals.push(AnomalySignal::new(
                "keystroke.superhuman_speed",
                fast_fraction,
                9,
            ));
        }
    }

    let hold_durations: Vec<f64> = keystrokes
        .iter()
        .filter_map(|k| k.hold_duration_ms)
        .map(|d| d as f64)
        .collect();

    if hold_durations.len() >= 5 {
        let v = variance(&hold_durations);
        if v < 1.0 {
            signals.push(AnomalySignal::new("keystroke.constant_hold", v, 7));
        }
    }

    if hold_durations.len() >= 10 {
        let cv = coefficient_of_variation(&hold_durations);
        if cv < 0.1 {
            signals.push(AnomalySignal::new("comet.uniform_hold_duration", cv, 8));
        }
    }

    signals
}
