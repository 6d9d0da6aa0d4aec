//! # agentdetect-recorder
//!
//! The Event Recorder (spec.md §4.1): normalizes raw DOM events into typed
//! records, enforces per-store caps, and persists compressed snapshots
//! across page loads.

pub mod recorder;
pub mod snapshot;
pub mod state;
pub mod stores;

pub use recorder::EventRecorder;
pub use snapshot::PersistedSnapshot;
pub use state::RecorderState;
pub use stores::{
    BoundedStore, Click, FocusChange, FocusPhase, Hover, HoverKind, KeyPhase, Keystroke,
    MouseMove, PointerEvent, PointerEventKind, Scroll, SNAPSHOT_CAP, STORE_CAP,
};
