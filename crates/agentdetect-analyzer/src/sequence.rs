//! Sequence signal group: spec.md §4.4 "Sequence group".

use agentdetect_core::types::AnomalySignal;
use agentdetect_recorder::{FocusPhase, KeyPhase, RecorderState};

use crate::stats::ratio;
use crate::thresholds::MIN_CLICKS;

pub fn analyze(state: &RecorderState) -> Vec<AnomalySignal> {
    let mut signals = Vec::new();

    let clicks = state.clicks.len();
    if clicks >= MIN_CLICKS {
        let hover_ratio = ratio(state.hovers.len() as f64, clicks as f64);
        if hover_ratio < 2.0 {
            signals.push(AnomalySignal::new("sequence.low_hover_ratio", hover_ratio, 5));
        }
    }

    let focus_ins: Vec<_> = state
        .focus_changes
        .iter()
        .filter(|f| f.phase == FocusPhase::In)
        .collect();

    if focus_ins.len() >= 3 {
        let click_times: Vec<u64> = state.clicks.iter().map(|c| c.timestamp_ms).collect();
        let key_times: Vec<u64> = state
            .keystrokes
            .iter()
            .filter(|k| k.phase == KeyPhase::Down)
            .map(|k| k.timestamp_ms)
            .collect();

        let lacking = focus_ins
            .iter()
            .filter(|f| {
                !click_times
                    .iter()
                    .chain(key_times.iter())
                    .any(|&t| t.abs_diff(f.timestamp_ms) <= 100)
            })
            .count();

        let lacking_ratio = ratio(lacking as f64, focus_ins.len() as f64);
        if lacking_ratio > 0.5 {
            signals.push(AnomalySignal::new("sequence.direct_focus", lacking_ratio, 6));
        }
    }

    if focus_ins
        .windows(2)
        .any(|w| w[0].target.id != w[1].target.id && w[1].timestamp_ms.abs_diff(w[0].timestamp_ms) < 200)
    {
        signals.push(AnomalySignal::new("comet.rapid_focus_sequence", 1.0, 7));
    }

    signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentdetect_core::ElementDescriptor;
    use agentdetect_recorder::{FocusChange, RecorderState};

    fn focus_in(t: u64, id: &str) -> FocusChange {
        FocusChange {
            timestamp_ms: t,
            target: ElementDescriptor {
                id: id.to_string(),
                ..Default::default()
            },
            phase: FocusPhase::In,
        }
    }

    #[test]
    fn rapid_focus_across_distinct_ids_is_flagged() {
        let mut state = RecorderState::new(0);
        state.focus_changes.push(focus_in(0, "field-a"));
        state.focus_changes.push(focus_in(50, "field-b"));
        let signals = analyze(&state);
        assert!(signals.iter().any(|s| s.name == "comet.rapid_focus_sequence"));
    }

    #[test]
    fn same_id_refocus_is_not_flagged_as_rapid_sequence() {
        let mut state = RecorderState::new(0);
        state.focus_changes.push(focus_in(0, "field-a"));
        state.focus_changes.push(focus_in(50, "field-a"));
        let signals = analyze(&state);
        assert!(!signals.iter().any(|s| s.name == "comet.rapid_focus_sequence"));
    }
}
