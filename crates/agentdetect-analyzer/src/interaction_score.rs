//! Interaction sub-score: spec.md §4.4 "Interaction sub-score".

use agentdetect_core::types::AnomalySignal;

const STRONG_SIGNALS: &[&str] = &[
    "click.superhuman_speed",
    "click.center_precision",
    "click.teleport_pattern",
    "click.no_movement",
    "comet.ultra_precise_center",
    "comet.no_mousemove_trail",
    "comet.read_then_act",
    "comet.low_mouse_to_action_ratio",
];

const RELIABLE_SIGNALS: &[&str] = &[
    "click.center_precision",
    "comet.ultra_precise_center",
    "comet.no_mousemove_trail",
    "comet.low_mouse_to_action_ratio",
];

pub fn score(signals: &[AnomalySignal], total_events: usize) -> u32 {
    if signals.is_empty() {
        return 0;
    }

    let sum_weights: u32 = signals.iter().map(|s| s.weight as u32).sum();
    let count = signals.len();

    let strong_count = signals.iter().filter(|s| STRONG_SIGNALS.contains(&s.name.as_str())).count();
    let multiplier = if strong_count >= 3 {
        1.5
    } else if strong_count == 2 {
        1.25
    } else {
        1.0
    };

    let has_reliable = signals.iter().any(|s| RELIABLE_SIGNALS.contains(&s.name.as_str()));
    let confidence = if total_events < 10 {
        if has_reliable {
            0.7
        } else {
            0.3
        }
    } else if total_events < 25 {
        0.85
    } else {
        1.0
    };

    let denom = std::cmp::max(count * 10, 30) as f64;
    let base = (sum_weights as f64 / denom) * 100.0;
    let raw = (base * multiplier * confidence).min(100.0);
    raw.round() as u32
}
