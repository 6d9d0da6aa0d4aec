//! Synthesizes `DomEvent` streams with either organic (human-like) or
//! uniform/linear (automation-like) timing and motion, for feeding
//! `Engine::handle_event` in end-to-end scenarios.

use agentdetect_core::{ElementDescriptor, NodeRef, Rect};
use agentdetect_dom::events::{
    ClickRaw, DomEvent, FocusRaw, HoverRaw, KeyDownRaw, KeyUpRaw, MouseMoveRaw, PointerKind,
    PointerRaw, ScrollRaw,
};

fn descriptor(tag: &str) -> ElementDescriptor {
    ElementDescriptor {
        tag: tag.to_string(),
        id: String::new(),
        class: String::new(),
        rect: Rect {
            x: 10.0,
            y: 10.0,
            width: 80.0,
            height: 24.0,
        },
    }
}

/// A cheap xorshift so timing jitter is reproducible across test runs
/// without pulling in `rand` as a dependency of this crate.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    /// A value in `[lo, hi)`.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next() % (hi - lo)
    }
}

/// `count` mouse moves along a jittered path with irregular timing and
/// velocity, the way a held-and-wiggled mouse actually looks.
pub fn human_mouse_trail(start_ms: u64, count: usize) -> Vec<DomEvent> {
    let mut rng = Lcg(start_ms.max(1) ^ 0xD1B5_4A32_D192_ED03);
    let mut events = Vec::with_capacity(count);
    let mut t = start_ms;
    let mut x = 100.0;
    let mut y = 100.0;
    for _ in 0..count {
        t += rng.range(16, 180);
        x += rng.range(0, 40) as f64 - 20.0;
        y += rng.range(0, 40) as f64 - 20.0;
        events.push(DomEvent::MouseMove(MouseMoveRaw {
            x,
            y,
            timestamp_ms: t,
        }));
    }
    events
}

/// `count` mouse moves at a fixed velocity along a dead-straight line and
/// perfectly even spacing, the signature of a CDP `Input.dispatchMouseEvent`
/// script rather than a human hand.
pub fn bot_mouse_trail(start_ms: u64, count: usize) -> Vec<DomEvent> {
    let mut events = Vec::with_capacity(count);
    for i in 0..count {
        let t = start_ms + (i as u64) * 100;
        events.push(DomEvent::MouseMove(MouseMoveRaw {
            x: 100.0 + i as f64 * 5.0,
            y: 100.0 + i as f64 * 5.0,
            timestamp_ms: t,
        }));
    }
    events
}

/// Types `text` with jittered inter-key delays and hold durations.
pub fn human_typing(start_ms: u64, text: &str) -> Vec<DomEvent> {
    let mut rng = Lcg(start_ms.max(1) ^ 0x9E37_79B9);
    let mut events = Vec::new();
    let mut t = start_ms;
    for ch in text.chars() {
        t += rng.range(80, 260);
        events.push(DomEvent::KeyDown(KeyDownRaw {
            key: ch.to_string(),
            timestamp_ms: t,
        }));
        t += rng.range(30, 120);
        events.push(DomEvent::KeyUp(KeyUpRaw { timestamp_ms: t }));
    }
    events
}

/// Types `text` at a perfectly uniform cadence and hold duration, the
/// signature of a scripted `element.dispatchEvent` loop.
pub fn uniform_typing(start_ms: u64, text: &str) -> Vec<DomEvent> {
    let mut events = Vec::new();
    let mut t = start_ms;
    for ch in text.chars() {
        t += 50;
        events.push(DomEvent::KeyDown(KeyDownRaw {
            key: ch.to_string(),
            timestamp_ms: t,
        }));
        t += 20;
        events.push(DomEvent::KeyUp(KeyUpRaw { timestamp_ms: t }));
    }
    events
}

/// A hover over a button immediately followed by a click on it, as a
/// human driving a real pointer would produce.
pub fn human_click(at_ms: u64, node: NodeRef) -> Vec<DomEvent> {
    vec![
        DomEvent::MouseOver(HoverRaw {
            target_node: node,
            timestamp_ms: at_ms.saturating_sub(120),
        }),
        DomEvent::Click(ClickRaw {
            x: 50.0,
            y: 20.0,
            timestamp_ms: at_ms,
            target: descriptor("button"),
            target_node: node,
        }),
    ]
}

/// A click with no preceding hover and no preceding mouse movement in the
/// lookback window, as a CDP `Input.dispatchMouseEvent` click landing cold
/// on an element would produce.
pub fn bot_click(at_ms: u64, node: NodeRef) -> DomEvent {
    DomEvent::Click(ClickRaw {
        x: 50.0,
        y: 20.0,
        timestamp_ms: at_ms,
        target: descriptor("button"),
        target_node: node,
    })
}

pub fn scroll(at_ms: u64, scroll_y: f64) -> DomEvent {
    DomEvent::Scroll(ScrollRaw {
        scroll_x: 0.0,
        scroll_y,
        timestamp_ms: at_ms,
    })
}

pub fn focus_in(at_ms: u64, tag: &str) -> DomEvent {
    DomEvent::FocusIn(FocusRaw {
        target: descriptor(tag),
        timestamp_ms: at_ms,
    })
}

pub fn pointer_move(at_ms: u64, x: f64, y: f64) -> DomEvent {
    DomEvent::PointerMove(PointerRaw {
        x,
        y,
        timestamp_ms: at_ms,
        pointer_type: PointerKind::Mouse,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_mouse_trail_has_irregular_spacing() {
        let events = human_mouse_trail(0, 20);
        let timestamps: Vec<u64> = events.iter().map(|e| e.timestamp_ms()).collect();
        let deltas: Vec<u64> = timestamps.windows(2).map(|w| w[1] - w[0]).collect();
        assert!(deltas.iter().any(|&d| d != deltas[0]));
    }

    #[test]
    fn bot_mouse_trail_has_uniform_spacing() {
        let events = bot_mouse_trail(0, 20);
        let timestamps: Vec<u64> = events.iter().map(|e| e.timestamp_ms()).collect();
        let deltas: Vec<u64> = timestamps.windows(2).map(|w| w[1] - w[0]).collect();
        assert!(deltas.iter().all(|&d| d == 100));
    }
}
