//! Scroll signal group: spec.md §4.4 "Scroll group".

use agentdetect_core::types::AnomalySignal;
use agentdetect_recorder::RecorderState;

use crate::stats::{ratio, variance};

pub fn analyze(state: &RecorderState) -> Vec<AnomalySignal> {
    let scrolls: Vec<_> = state.scrolls.iter().collect();
    let mut signals = Vec::new();

    if scrolls.is_empty() {
        return signals;
    }

    let instant_jump_fraction = ratio(
        scrolls
            .iter()
            .filter(|s| {
                s.delta_t_ms.map(|dt| dt < 10).unwrap_or(false)
                    && s.delta_y.map(|dy| dy.abs() > 100.0).unwrap_or(false)
            })
            .count() as f64,
        scrolls.len() as f64,
    );
    if instant_jump_fraction > 0.5 {
        signals.push(AnomalySignal::new(
            "scroll.instant_jump",
            instant_jump_fraction,
            6,
        ));
    }

    let abs_delta_ys: Vec<f64> = scrolls.iter().filter_map(|s| s.delta_y).map(f64::abs).collect();
    if abs_delta_ys.len() >= 3 {
        let v = variance(&abs_delta_ys);
        if v < 1.0 {
            signals.push(AnomalySignal::new("scroll.constant_amount", v, 5));
        }
    }

    signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentdetect_recorder::{RecorderState, Scroll};

    fn scroll(t: u64, dt: Option<u64>, dy: Option<f64>) -> Scroll {
        Scroll {
            timestamp_ms: t,
            scroll_x: 0.0,
            scroll_y: 0.0,
            delta_t_ms: dt,
            delta_x: Some(0.0),
            delta_y: dy,
        }
    }

    #[test]
    fn no_scrolls_emits_nothing() {
        let state = RecorderState::new(0);
        assert!(analyze(&state).is_empty());
    }

    #[test]
    fn instant_jumps_are_flagged() {
        let mut state = RecorderState::new(0);
        for i in 0..4 {
            state.scrolls.push(scroll(i * 10, Some(5), Some(500.0)));
        }
        let signals = analyze(&state);
        assert!(signals.iter().any(|s| s.name == "scroll.instant_jump"));
    }

    #[test]
    fn constant_scroll_amount_is_flagged() {
        let mut state = RecorderState::new(0);
        for i in 0..4 {
            state.scrolls.push(scroll(i * 200, Some(200), Some(120.0)));
        }
        let signals = analyze(&state);
        assert!(signals.iter().any(|s| s.name == "scroll.constant_amount"));
    }
}
