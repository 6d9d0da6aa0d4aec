//! Burst signal group: spec.md §4.4 "Burst group".
//!
//! Builds one merged, timestamp-sorted timeline of click/keystroke/focus
//! events (the three "heterogeneous action" types) and looks for dense
//! 2-second windows, optionally preceded by a long quiet gap.

use agentdetect_core::types::AnomalySignal;
use agentdetect_recorder::{FocusPhase, KeyPhase, RecorderState};

const BURST_WINDOW_MS: u64 = 2000;
const BURST_MIN_ACTIONS: usize = 5;
const QUIET_GAP_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActionKind {
    Click,
    Keystroke,
    Focus,
}

pub fn analyze(state: &RecorderState) -> Vec<AnomalySignal> {
    let mut timeline: Vec<(u64, ActionKind)> = Vec::new();
    timeline.extend(state.clicks.iter().map(|c| (c.timestamp_ms, ActionKind::Click)));
    timeline.extend(
        state
            .keystrokes
            .iter()
            .filter(|k| k.phase == KeyPhase::Down)
            .map(|k| (k.timestamp_ms, ActionKind::Keystroke)),
    );
    timeline.extend(
        state
            .focus_changes
            .iter()
            .filter(|f| f.phase == FocusPhase::In)
            .map(|f| (f.timestamp_ms, ActionKind::Focus)),
    );
    timeline.sort_by_key(|(t, _)| *t);

    let mut signals = Vec::new();
    if timeline.len() < BURST_MIN_ACTIONS {
        return signals;
    }

    let burst_starts = find_burst_window_starts(&timeline);
    if burst_starts.len() >= 2 {
        signals.push(AnomalySignal::new("comet.action_burst", burst_starts.len() as f64, 8));
    }

    if burst_starts
        .iter()
        .any(|&start_idx| preceded_by_quiet_gap(&timeline, start_idx))
    {
        signals.push(AnomalySignal::new("comet.read_then_act", 1.0, 9));
    }

    signals
}

/// Indices (into `timeline`) of windows whose 2-second span from that
/// index contains >= 5 heterogeneous action types.
fn find_burst_window_starts(timeline: &[(u64, ActionKind)]) -> Vec<usize> {
    let mut starts = Vec::new();
    for start in 0..timeline.len() {
        let window_end = timeline[start].0 + BURST_WINDOW_MS;
        let window: Vec<ActionKind> = timeline[start..]
            .iter()
            .take_while(|(t, _)| *t <= window_end)
            .map(|(_, kind)| *kind)
            .collect();

        if window.len() < BURST_MIN_ACTIONS {
            continue;
        }
        let distinct_kinds = {
            let mut set = Vec::new();
            for kind in window {
                if !set.contains(&kind) {
                    set.push(kind);
                }
            }
            set.len()
        };
        if distinct_kinds >= 2 {
            starts.push(start);
        }
    }
    starts
}

fn preceded_by_quiet_gap(timeline: &[(u64, ActionKind)], start_idx: usize) -> bool {
    if start_idx == 0 {
        return false;
    }
    let gap = timeline[start_idx].0.saturating_sub(timeline[start_idx - 1].0);
    gap >= QUIET_GAP_MS
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentdetect_core::ElementDescriptor;
    use agentdetect_recorder::{Click, FocusChange};

    fn click(t: u64) -> Click {
        Click {
            timestamp_ms: t,
            x: 0.0,
            y: 0.0,
            target: ElementDescriptor::default(),
            offset_from_center: 0.0,
            preceding_hover: false,
            preceding_mouse_move: false,
            mousedown_time: None,
            click_duration_ms: None,
        }
    }

    fn focus_in(t: u64) -> FocusChange {
        FocusChange {
            timestamp_ms: t,
            target: ElementDescriptor::default(),
            phase: FocusPhase::In,
        }
    }

    #[test]
    fn dense_heterogeneous_window_triggers_action_burst() {
        let mut state = RecorderState::new(0);
        state.clicks.push(click(0));
        state.clicks.push(click(100));
        state.focus_changes.push(focus_in(200));
        state.focus_changes.push(focus_in(300));
        state.clicks.push(click(400));

        state.clicks.push(click(2100));
        state.clicks.push(click(2200));
        state.focus_changes.push(focus_in(2300));
        state.focus_changes.push(focus_in(2400));
        state.clicks.push(click(2500));

        let signals = analyze(&state);
        assert!(signals.iter().any(|s| s.name == "comet.action_burst"));
    }

    #[test]
    fn burst_preceded_by_quiet_gap_triggers_read_then_act() {
        let mut state = RecorderState::new(0);
        state.clicks.push(click(0));
        state.clicks.push(click(5000));
        state.clicks.push(click(5100));
        state.focus_changes.push(focus_in(5200));
        state.focus_changes.push(focus_in(5300));
        state.clicks.push(click(5400));

        let signals = analyze(&state);
        assert!(signals.iter().any(|s| s.name == "comet.read_then_act"));
    }

    #[test]
    fn sparse_activity_emits_nothing() {
        let mut state = RecorderState::new(0);
        state.clicks.push(click(0));
        state.clicks.push(click(5000));
        assert!(analyze(&state).is_empty());
    }
}
