//! Cross-page persistence: compressing `RecorderState` into a storable
//! snapshot, and merging a restored snapshot back in on the next page
//! load.

use crate::state::RecorderState;
use crate::stores::{Click, FocusChange, Keystroke, MouseMove, PointerEvent, Scroll, SNAPSHOT_CAP};
use serde::{Deserialize, Serialize};

/// The compressed, DOM-reference-free snapshot written to the
/// tab-persistent store. `hovers` is deliberately absent: hover identity
/// cannot be serialized across a page load (see Design Notes).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PersistedSnapshot {
    pub mouse_moves: Vec<MouseMove>,
    pub clicks: Vec<Click>,
    pub keystrokes: Vec<Keystroke>,
    pub scrolls: Vec<Scroll>,
    pub focus_changes: Vec<FocusChange>,
    pub pointer_events: Vec<PointerEvent>,
    pub start_time_ms: u64,
    pub page_load_count: u32,
}

impl PersistedSnapshot {
    /// Build a snapshot from live state, capping each store's
    /// contribution at [`SNAPSHOT_CAP`] most-recent records.
    pub fn capture(state: &RecorderState) -> Self {
        Self {
            mouse_moves: state.mouse_moves.tail(SNAPSHOT_CAP),
            clicks: state.clicks.tail(SNAPSHOT_CAP),
            keystrokes: state.keystrokes.tail(SNAPSHOT_CAP),
            scrolls: state.scrolls.tail(SNAPSHOT_CAP),
            focus_changes: state.focus_changes.tail(SNAPSHOT_CAP),
            pointer_events: state.pointer_events.tail(SNAPSHOT_CAP),
            start_time_ms: state.start_time_ms,
            page_load_count: state.page_load_count,
        }
    }

    /// Merge a restored snapshot into fresh state: restored records are
    /// prepended (oldest-first) ahead of anything already recorded this
    /// page, the original `start_time_ms` is preserved, and
    /// `page_load_count` increments by one. Restoration happens during
    /// `startMonitoring`, before any new listeners can fire, so there is
    /// no interleaving to reason about.
    pub fn merge_into(self, state: &mut RecorderState) {
        state.mouse_moves.prepend_and_trim(self.mouse_moves);
        state.clicks.prepend_and_trim(self.clicks);
        state.keystrokes.prepend_and_trim(self.keystrokes);
        state.scrolls.prepend_and_trim(self.scrolls);
        state.focus_changes.prepend_and_trim(self.focus_changes);
        state.pointer_events.prepend_and_trim(self.pointer_events);
        state.start_time_ms = self.start_time_ms;
        state.page_load_count = self.page_load_count + 1;
        state.touch();
    }
}
