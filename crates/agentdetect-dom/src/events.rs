//! Normalized raw DOM event payloads.
//!
//! The engine never subscribes to a real DOM itself — per spec.md §1 the
//! host page is an opaque DOM. A thin host-binding layer (out of this
//! workspace's scope; see SPEC_FULL.md §1) observes the real
//! `addEventListener` callbacks and forwards them here as these small,
//! already-normalized payloads, the same way `rustkit_dom::events::Event`
//! models a dispatched event without owning the platform event source.

use agentdetect_core::{ElementDescriptor, NodeRef};
use serde::{Deserialize, Serialize};

/// Mouse coordinates plus a timestamp; used for `mousemove`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseMoveRaw {
    pub x: f64,
    pub y: f64,
    pub timestamp_ms: u64,
}

/// A `click` event. Carries both the persistable structural descriptor of
/// the target and its live `NodeRef`, used only for the same-tick identity
/// comparison against recent Hovers (never persisted itself).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickRaw {
    pub x: f64,
    pub y: f64,
    pub timestamp_ms: u64,
    pub target: ElementDescriptor,
    pub target_node: NodeRef,
}

/// `mousedown` / `mouseup`; these only annotate the most recent Click.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseButtonRaw {
    pub timestamp_ms: u64,
}

/// `mouseover` / `mouseout`. Carries a `NodeRef` rather than a descriptor:
/// recency comparisons for `precedingHover` use node identity, and Hovers
/// are never persisted across pages (see Design Notes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverRaw {
    pub target_node: NodeRef,
    pub timestamp_ms: u64,
}

/// `keydown`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyDownRaw {
    pub key: String,
    pub timestamp_ms: u64,
}

/// `keyup`. No key value is needed: it only closes out the hold duration
/// of the most recent unfinished `keydown`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyUpRaw {
    pub timestamp_ms: u64,
}

/// `scroll`, fired on `document` or `window`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollRaw {
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub timestamp_ms: u64,
}

/// `focusin` / `focusout`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusRaw {
    pub target: ElementDescriptor,
    pub timestamp_ms: u64,
}

/// The pointer types the Fingerprint/Recorder care about distinguishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    Mouse,
    Pen,
    Touch,
    Other(String),
}

/// `pointerdown` / `pointermove`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerRaw {
    pub x: f64,
    pub y: f64,
    pub timestamp_ms: u64,
    pub pointer_type: PointerKind,
}

/// The union of normalized events the Event Recorder accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomEvent {
    MouseMove(MouseMoveRaw),
    Click(ClickRaw),
    MouseDown(MouseButtonRaw),
    MouseUp(MouseButtonRaw),
    MouseOver(HoverRaw),
    MouseOut(HoverRaw),
    KeyDown(KeyDownRaw),
    KeyUp(KeyUpRaw),
    Scroll(ScrollRaw),
    FocusIn(FocusRaw),
    FocusOut(FocusRaw),
    PointerDown(PointerRaw),
    PointerMove(PointerRaw),
}

impl DomEvent {
    pub fn timestamp_ms(&self) -> u64 {
        match self {
            DomEvent::MouseMove(e) => e.timestamp_ms,
            DomEvent::Click(e) => e.timestamp_ms,
            DomEvent::MouseDown(e) | DomEvent::MouseUp(e) => e.timestamp_ms,
            DomEvent::MouseOver(e) | DomEvent::MouseOut(e) => e.timestamp_ms,
            DomEvent::KeyDown(e) => e.timestamp_ms,
            DomEvent::KeyUp(e) => e.timestamp_ms,
            DomEvent::Scroll(e) => e.timestamp_ms,
            DomEvent::FocusIn(e) | DomEvent::FocusOut(e) => e.timestamp_ms,
            DomEvent::PointerDown(e) | DomEvent::PointerMove(e) => e.timestamp_ms,
        }
    }
}
