//! Configuration constants: per spec.md §4.4 these are fixed, not
//! runtime-tunable.

pub const MIN_MOUSE_MOVES: usize = 20;
pub const MIN_CLICKS: usize = 3;
pub const MIN_KEYSTROKES: usize = 10;

/// ms^2 — below this, inter-event timing is "too perfect" to be human.
pub const PERFECT_TIMING_VARIANCE: f64 = 5.0;
pub const MIN_HUMAN_REACTION_MS: u64 = 50;
pub const MAX_PLAUSIBLE_MOUSE_SPEED_PX_PER_MS: f64 = 10000.0;
pub const CENTER_CLICK_TOLERANCE_PX: f64 = 5.0;
