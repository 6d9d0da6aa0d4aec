//! # agentdetect-dom
//!
//! The DOM-facing port the detection engine is built against: normalized
//! event payloads, a mutation feed shaped like `MutationObserver`, and the
//! tab-persistent storage interface. Modeled on `rustkit-dom`'s event
//! types, trimmed to read-only observation — this engine never mutates
//! the page.

pub mod events;
pub mod mutation;
pub mod storage;

pub use events::{
    ClickRaw, DomEvent, FocusRaw, HoverRaw, KeyDownRaw, KeyUpRaw, MouseButtonRaw, MouseMoveRaw,
    PointerKind, PointerRaw, ScrollRaw,
};
pub use mutation::{ComputedStyleSnapshot, MutationRecord, NodeSnapshot, Position};
pub use storage::TabStorage;
