//! In-memory recorder state: the stores plus the bookkeeping the
//! normalization logic needs (pending mousedown/mouseup timestamps,
//! session timing, and the mutation-revision counter the Analyzer's cache
//! watches).

use crate::stores::{
    BoundedStore, Click, FocusChange, Hover, Keystroke, MouseMove, PointerEvent, Scroll,
};

/// All per-session event state owned by the Event Recorder.
#[derive(Debug, Clone)]
pub struct RecorderState {
    pub mouse_moves: BoundedStore<MouseMove>,
    pub clicks: BoundedStore<Click>,
    pub keystrokes: BoundedStore<Keystroke>,
    pub scrolls: BoundedStore<Scroll>,
    pub hovers: BoundedStore<Hover>,
    pub focus_changes: BoundedStore<FocusChange>,
    pub pointer_events: BoundedStore<PointerEvent>,

    pub start_time_ms: u64,
    pub page_load_count: u32,

    /// Bumped on every mutation. The Analyzer caches its report keyed on
    /// this value and recomputes whenever it changes.
    pub revision: u64,

    /// Timestamp of a `mousedown` not yet consumed by a following `click`.
    pub(crate) pending_mousedown_ms: Option<u64>,
    /// Timestamp of a `mouseup` not yet consumed by a following `click`.
    pub(crate) pending_mouseup_ms: Option<u64>,
    /// Timestamp of the last recorded `pointermove`, for the 50ms throttle.
    pub(crate) last_pointer_move_ms: Option<u64>,
}

impl RecorderState {
    pub fn new(start_time_ms: u64) -> Self {
        Self {
            mouse_moves: BoundedStore::new(),
            clicks: BoundedStore::new(),
            keystrokes: BoundedStore::new(),
            scrolls: BoundedStore::new(),
            hovers: BoundedStore::new(),
            focus_changes: BoundedStore::new(),
            pointer_events: BoundedStore::new(),
            start_time_ms,
            page_load_count: 1,
            revision: 0,
            pending_mousedown_ms: None,
            pending_mouseup_ms: None,
            last_pointer_move_ms: None,
        }
    }

    pub(crate) fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Total event count across all persisted stores (hovers included,
    /// since they still count as observed activity this page even though
    /// they don't persist).
    pub fn total_events(&self) -> usize {
        self.mouse_moves.len()
            + self.clicks.len()
            + self.keystrokes.len()
            + self.scrolls.len()
            + self.hovers.len()
            + self.focus_changes.len()
            + self.pointer_events.len()
    }

    pub fn duration_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.start_time_ms)
    }
}
