//! CDP/pointer signal group: spec.md §4.4 "CDP/pointer group".

use agentdetect_core::types::AnomalySignal;
use agentdetect_recorder::{PointerEventKind, RecorderState};

use crate::stats::ratio;

const MOUSEMOVE_TRAIL_WINDOW_MS: u64 = 500;

pub fn analyze(state: &RecorderState) -> Vec<AnomalySignal> {
    let mut signals = Vec::new();

    let clicks: Vec<_> = state.clicks.iter().collect();
    if !clicks.is_empty() {
        let move_times: Vec<u64> = state.mouse_moves.iter().map(|m| m.timestamp_ms).collect();
        let no_trail = clicks
            .iter()
            .filter(|c| {
                !move_times.iter().any(|&t| {
                    t < c.timestamp_ms && c.timestamp_ms - t <= MOUSEMOVE_TRAIL_WINDOW_MS
                })
            })
            .count();
        let no_trail_ratio = ratio(no_trail as f64, clicks.len() as f64);
        if no_trail_ratio > 0.7 {
            signals.push(AnomalySignal::new("comet.no_mousemove_trail", no_trail_ratio, 9));
        }
    }

    if clicks.len() >= 3 {
        let pointer_downs = state
            .pointer_events
            .iter()
            .filter(|p| p.kind == PointerEventKind::Down)
            .count();
        let down_ratio = ratio(pointer_downs as f64, clicks.len() as f64);
        if down_ratio < 0.3 {
            signals.push(AnomalySignal::new("comet.missing_pointer_events", down_ratio, 7));
        }
    }

    signals
}
