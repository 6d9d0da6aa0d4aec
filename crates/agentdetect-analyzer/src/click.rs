//! Click signal group: spec.md §4.4 "Click group".

use agentdetect_core::types::AnomalySignal;
use agentdetect_recorder::{Click, RecorderState};

use crate::stats::{ratio, variance};
use crate::thresholds::{CENTER_CLICK_TOLERANCE_PX, MIN_CLICKS, MIN_HUMAN_REACTION_MS, PERFECT_TIMING_VARIANCE};

pub fn analyze(state: &RecorderState) -> Vec<AnomalySignal> {
    let clicks: Vec<&Click> = state.clicks.iter().collect();
    let mut signals = Vec::new();

    if clicks.len() < MIN_CLICKS {
        return signals;
    }

    let within_tolerance = |tolerance: f64| {
        ratio(
            clicks.iter().filter(|c| c.offset_from_center <= tolerance).count() as f64,
            clicks.len() as f64,
        )
    };

    let center_precision = within_tolerance(CENTER_CLICK_TOLERANCE_PX);
    if center_precision > 0.5 {
        signals.push(AnomalySignal::new("click.center_precision", center_precision, 10));
    }

    if clicks.len() >= 3 {
        let ultra = within_tolerance(2.0);
        if ultra > 0.6 {
            signals.push(AnomalySignal::new("comet.ultra_precise_center", ultra, 10));
        }
    }

    let no_hover = ratio(clicks.iter().filter(|c| !c.preceding_hover).count() as f64, clicks.len() as f64);
    if no_hover > 0.7 {
        signals.push(AnomalySignal::new("click.no_hover", no_hover, 6));
    }

    let no_movement = ratio(
        clicks.iter().filter(|c| !c.preceding_mouse_move).count() as f64,
        clicks.len() as f64,
    );
    if no_movement > 0.5 {
        signals.push(AnomalySignal::new("click.no_movement", no_movement, 9));
    }

    if clicks.len() >= 3 && state.mouse_moves.len() < 2 * clicks.len() {
        signals.push(AnomalySignal::new(
            "click.teleport_pattern",
            state.mouse_moves.len() as f64,
            10,
        ));
    }

    let intervals: Vec<f64> = clicks
        .windows(2)
        .map(|w| (w[1].timestamp_ms.saturating_sub(w[0].timestamp_ms)) as f64)
        .collect();

    if intervals.iter().any(|&dt| dt < MIN_HUMAN_REACTION_MS as f64) {
        signals.push(AnomalySignal::new("click.superhuman_speed", 1.0, 6));
    }

    if intervals.len() >= 3 {
        let v = variance(&intervals);
        if v < PERFECT_TIMING_VARIANCE {
            signals.push(AnomalySignal::new("click.perfect_timing", v, 8));
        }
    }

    signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentdetect_core::{ElementDescriptor, Rect};
    use agentdetect_recorder::RecorderState;

    fn click_at(t: u64, x: f64, y: f64, offset: f64) -> Click {
        Click {
            timestamp_ms: t,
            x,
            y,
            target: ElementDescriptor {
                rect: Rect { x: x - 25.0, y: y - 25.0, width: 50.0, height: 50.0 },
                ..Default::default()
            },
            offset_from_center: offset,
            preceding_hover: true,
            preceding_mouse_move: true,
            mousedown_time: None,
            click_duration_ms: None,
        }
    }

    #[test]
    fn below_minimum_clicks_emits_nothing() {
        let mut state = RecorderState::new(0);
        state.clicks.push(click_at(0, 10.0, 10.0, 1.0));
        assert!(analyze(&state).is_empty());
    }

    #[test]
    fn precise_center_clicks_are_flagged() {
        let mut state = RecorderState::new(0);
        for i in 0..5 {
            state.clicks.push(click_at(i * 1000, 10.0, 10.0, 1.0));
        }
        let signals = analyze(&state);
        assert!(signals.iter().any(|s| s.name == "click.center_precision"));
    }

    #[test]
    fn rapid_clicks_trigger_superhuman_speed() {
        let mut state = RecorderState::new(0);
        state.clicks.push(click_at(0, 10.0, 10.0, 20.0));
        state.clicks.push(click_at(10, 50.0, 50.0, 20.0));
        state.clicks.push(click_at(20, 90.0, 90.0, 20.0));
        let signals = analyze(&state);
        assert!(signals.iter().any(|s| s.name == "click.superhuman_speed"));
    }
}
