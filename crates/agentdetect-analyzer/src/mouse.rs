//! Mouse-movement signal group: spec.md §4.4 "Mouse group".

use agentdetect_core::types::AnomalySignal;
use agentdetect_recorder::{MouseMove, RecorderState};

use crate::stats::{ratio, variance};
use crate::thresholds::{MAX_PLAUSIBLE_MOUSE_SPEED_PX_PER_MS, MIN_MOUSE_MOVES};

pub fn analyze(state: &RecorderState, now_ms: u64) -> Vec<AnomalySignal> {
    let moves: Vec<&MouseMove> = state.mouse_moves.iter().collect();
    let mut signals = Vec::new();

    if moves.len() < MIN_MOUSE_MOVES {
        signals.push(AnomalySignal::new("mouse.insufficient_data", moves.len() as f64, 2));
        return linear_and_ratio_signals(state, &moves, now_ms, signals);
    }

    linear_and_ratio_signals(state, &moves, now_ms, signals_teleport_sparse_constant(&moves, state, now_ms))
}

fn signals_teleport_sparse_constant(
    moves: &[&MouseMove],
    state: &RecorderState,
    now_ms: u64,
) -> Vec<AnomalySignal> {
    let mut signals = Vec::new();

    if moves
        .iter()
        .any(|m| m.velocity.map(|v| v > MAX_PLAUSIBLE_MOUSE_SPEED_PX_PER_MS).unwrap_or(false))
    {
        signals.push(AnomalySignal::new("mouse.teleport", 1.0, 8));
    }

    let duration = state.duration_ms(now_ms) as f64;
    if duration > 0.0 && (moves.len() as f64) < duration / 5000.0 {
        signals.push(AnomalySignal::new("mouse.sparse_movement", moves.len() as f64, 5));
    }

    let velocities: Vec<f64> = moves.iter().filter_map(|m| m.velocity).collect();
    if velocities.len() >= 5 && variance(&velocities) < 0.1 {
        signals.push(AnomalySignal::new("mouse.constant_velocity", variance(&velocities), 6));
    }

    signals
}

fn linear_and_ratio_signals(
    state: &RecorderState,
    moves: &[&MouseMove],
    _now_ms: u64,
    mut signals: Vec<AnomalySignal>,
) -> Vec<AnomalySignal> {
    if moves.len() >= 3 {
        let linear_fraction = linear_movement_fraction(moves);
        if linear_fraction > 0.3 {
            signals.push(AnomalySignal::new("mouse.linear_movement", linear_fraction, 3));
        }
    }

    let clicks = state.clicks.len();
    let key_downs = state
        .keystrokes
        .iter()
        .filter(|k| k.phase == agentdetect_recorder::KeyPhase::Down)
        .count();
    let actions = clicks + key_downs;

    if state.page_load_count >= 2 && actions >= 3 {
        let mouse_to_action_ratio = ratio(moves.len() as f64, actions as f64);
        if mouse_to_action_ratio < 2.0 {
            signals.push(AnomalySignal::new(
                "comet.low_mouse_to_action_ratio",
                mouse_to_action_ratio,
                10,
            ));
        } else if mouse_to_action_ratio < 5.0 {
            signals.push(AnomalySignal::new(
                "comet.low_mouse_to_action_ratio",
                mouse_to_action_ratio,
                7,
            ));
        }
    }

    signals
}

/// Fraction of consecutive movement-direction pairs whose angle-of-change
/// cosine exceeds 0.99 (i.e. near-collinear).
fn linear_movement_fraction(moves: &[&MouseMove]) -> f64 {
    let angles: Vec<f64> = moves
        .iter()
        .filter_map(|m| match (m.delta_x, m.delta_y) {
            (Some(dx), Some(dy)) if dx != 0.0 || dy != 0.0 => Some(dy.atan2(dx)),
            _ => None,
        })
        .collect();

    if angles.len() < 2 {
        return 0.0;
    }

    let mut straight = 0usize;
    let mut pairs = 0usize;
    for window in angles.windows(2) {
        let delta_theta = window[1] - window[0];
        pairs += 1;
        if delta_theta.cos().abs() > 0.99 {
            straight += 1;
        }
    }

    ratio(straight as f64, pairs as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentdetect_recorder::RecorderState;

    fn push_move(state: &mut RecorderState, x: f64, y: f64, dt: Option<u64>, t: u64) {
        let velocity = match (state.mouse_moves.back(), dt) {
            (Some(prev), Some(dt)) if dt > 0 => {
                Some(((x - prev.x).powi(2) + (y - prev.y).powi(2)).sqrt() / dt as f64)
            }
            _ => None,
        };
        let (delta_x, delta_y) = match state.mouse_moves.back() {
            Some(prev) => (Some(x - prev.x), Some(y - prev.y)),
            None => (None, None),
        };
        state.mouse_moves.push(agentdetect_recorder::MouseMove {
            timestamp_ms: t,
            x,
            y,
            delta_t_ms: dt,
            delta_x,
            delta_y,
            velocity,
        });
    }

    #[test]
    fn below_minimum_emits_insufficient_data() {
        let mut state = RecorderState::new(0);
        push_move(&mut state, 0.0, 0.0, None, 0);
        let signals = analyze(&state, 1000);
        assert!(signals.iter().any(|s| s.name == "mouse.insufficient_data"));
    }

    #[test]
    fn teleporting_movement_is_flagged() {
        let mut state = RecorderState::new(0);
        for i in 0..25 {
            push_move(&mut state, i as f64, 0.0, Some(16), i as u64 * 16);
        }
        push_move(&mut state, 100_000.0, 0.0, Some(1), 10_000);
        let signals = analyze(&state, 20_000);
        assert!(signals.iter().any(|s| s.name == "mouse.teleport"));
    }

    #[test]
    fn perfectly_straight_line_is_flagged_linear() {
        let mut state = RecorderState::new(0);
        for i in 0..25 {
            push_move(&mut state, i as f64 * 2.0, i as f64 * 2.0, Some(16), i as u64 * 16);
        }
        let signals = analyze(&state, 1000);
        assert!(signals.iter().any(|s| s.name == "mouse.linear_movement"));
    }
}
