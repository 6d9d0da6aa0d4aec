//! The Event Recorder: subscription normalization, caps, and cross-page
//! persistence (spec.md §4.1).

use crate::snapshot::PersistedSnapshot;
use crate::state::RecorderState;
use crate::stores::{
    Click, FocusChange, FocusPhase, Hover, HoverKind, Keystroke, KeyPhase, MouseMove,
    PointerEvent, PointerEventKind, Scroll,
};
use agentdetect_core::Clock;
use agentdetect_dom::{DomEvent, TabStorage};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Last `N` hovers consulted for `precedingHover`.
const HOVER_LOOKBACK: usize = 20;
/// Last `N` mouse moves consulted for `precedingMouseMove`.
const MOVE_LOOKBACK: usize = 10;
/// `precedingMouseMove` distance tolerance, in pixels.
const MOVE_PROXIMITY_PX: f64 = 50.0;
/// Minimum spacing between recorded `pointermove` events, inclusive of
/// equality (a sample landing exactly on the boundary is recorded).
const POINTER_MOVE_THROTTLE_MS: u64 = 50;
/// Snapshot writes are rate-limited to at most once per this interval.
const SNAPSHOT_WRITE_INTERVAL_MS: u64 = 2_000;

fn storage_key(context_id: u64) -> String {
    format!("agentdetect_events_{context_id}")
}

/// Subscribes (logically — see `agentdetect-dom`) to input/mutation
/// events, records normalized records, enforces caps, and persists state
/// across page loads.
pub struct EventRecorder {
    state: RecorderState,
    storage: Arc<dyn TabStorage>,
    clock: Arc<dyn Clock>,
    context_id: Option<u64>,
    monitoring: bool,
    last_snapshot_write_ms: Option<u64>,
}

impl EventRecorder {
    pub fn new(storage: Arc<dyn TabStorage>, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now_ms();
        Self {
            state: RecorderState::new(now),
            storage,
            clock,
            context_id: None,
            monitoring: false,
            last_snapshot_write_ms: None,
        }
    }

    /// Idempotent. Restores the snapshot keyed by `context_id` (if any)
    /// before accepting new events.
    pub fn start_monitoring(&mut self, context_id: Option<u64>) {
        if self.monitoring {
            return;
        }
        self.monitoring = true;
        self.context_id = context_id;

        if let Some(ctx) = context_id {
            if let Some(raw) = self.storage.read(&storage_key(ctx)) {
                match serde_json::from_str::<PersistedSnapshot>(&raw) {
                    Ok(snapshot) => {
                        debug!(context_id = ctx, "restored event snapshot");
                        snapshot.merge_into(&mut self.state);
                    }
                    Err(err) => {
                        warn!(context_id = ctx, %err, "failed to parse stored snapshot");
                    }
                }
            }
        }
    }

    /// Idempotent.
    pub fn stop_monitoring(&mut self) {
        self.monitoring = false;
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring
    }

    /// Read-only accessor for the Analyzer.
    pub fn raw_state(&self) -> &RecorderState {
        &self.state
    }

    /// Best-effort: writes the current compressed state to the
    /// persistent tab store. Failures are swallowed. Rate-limited to at
    /// most once per [`SNAPSHOT_WRITE_INTERVAL_MS`] unless `force` is set
    /// (used on unload).
    pub fn save_snapshot(&mut self, force: bool) {
        let Some(ctx) = self.context_id else {
            return;
        };
        let now = self.clock.now_ms();
        if !force {
            if let Some(last) = self.last_snapshot_write_ms {
                if now.saturating_sub(last) < SNAPSHOT_WRITE_INTERVAL_MS {
                    return;
                }
            }
        }
        let snapshot = PersistedSnapshot::capture(&self.state);
        match serde_json::to_string(&snapshot) {
            Ok(json) => {
                self.storage.write(&storage_key(ctx), json);
                self.last_snapshot_write_ms = Some(now);
                trace!(context_id = ctx, "wrote event snapshot");
            }
            Err(err) => {
                warn!(%err, "failed to serialize event snapshot");
            }
        }
    }

    /// Dispatch a single normalized DOM event into the appropriate store.
    pub fn handle_event(&mut self, event: DomEvent) {
        if !self.monitoring {
            return;
        }
        match event {
            DomEvent::MouseMove(raw) => self.on_mouse_move(raw.x, raw.y, raw.timestamp_ms),
            DomEvent::Click(raw) => self.on_click(raw),
            DomEvent::MouseDown(raw) => self.on_mouse_down(raw.timestamp_ms),
            DomEvent::MouseUp(raw) => self.on_mouse_up(raw.timestamp_ms),
            DomEvent::MouseOver(raw) => self.on_hover(raw.target_node, raw.timestamp_ms, HoverKind::Over),
            DomEvent::MouseOut(raw) => self.on_hover(raw.target_node, raw.timestamp_ms, HoverKind::Out),
            DomEvent::KeyDown(raw) => self.on_key_down(raw.key, raw.timestamp_ms),
            DomEvent::KeyUp(raw) => self.on_key_up(raw.timestamp_ms),
            DomEvent::Scroll(raw) => self.on_scroll(raw.scroll_x, raw.scroll_y, raw.timestamp_ms),
            DomEvent::FocusIn(raw) => self.on_focus(raw.target, raw.timestamp_ms, FocusPhase::In),
            DomEvent::FocusOut(raw) => self.on_focus(raw.target, raw.timestamp_ms, FocusPhase::Out),
            DomEvent::PointerDown(raw) => {
                self.on_pointer(raw.x, raw.y, raw.timestamp_ms, PointerEventKind::Down)
            }
            DomEvent::PointerMove(raw) => self.on_pointer_move(raw.x, raw.y, raw.timestamp_ms),
        }
    }

    fn on_mouse_move(&mut self, x: f64, y: f64, timestamp_ms: u64) {
        let prev = self.state.mouse_moves.back().copied();
        let (delta_t_ms, delta_x, delta_y, velocity) = match prev {
            Some(p) => {
                let dt = timestamp_ms.saturating_sub(p.timestamp_ms);
                let dx = x - p.x;
                let dy = y - p.y;
                let v = if dt > 0 {
                    Some(((dx * dx + dy * dy).sqrt()) / dt as f64)
                } else {
                    None
                };
                (Some(dt), Some(dx), Some(dy), v)
            }
            None => (None, None, None, None),
        };
        self.state.mouse_moves.push(MouseMove {
            timestamp_ms,
            x,
            y,
            delta_t_ms,
            delta_x,
            delta_y,
            velocity,
        });
        self.state.touch();
    }

    fn on_click(&mut self, raw: agentdetect_dom::ClickRaw) {
        let center = raw.target.rect.center();
        let offset_from_center = center.distance_to(agentdetect_core::Point::new(raw.x, raw.y));

        let preceding_hover = self
            .state
            .hovers
            .iter()
            .rev()
            .take(HOVER_LOOKBACK)
            .any(|h| h.kind == HoverKind::Over && h.target_node == raw.target_node);

        let preceding_mouse_move = self
            .state
            .mouse_moves
            .iter()
            .rev()
            .take(MOVE_LOOKBACK)
            .any(|m| {
                agentdetect_core::Point::new(m.x, m.y).distance_to(agentdetect_core::Point::new(raw.x, raw.y))
                    <= MOVE_PROXIMITY_PX
            });

        let mousedown_time = self.state.pending_mousedown_ms.take();
        let mouseup_time = self.state.pending_mouseup_ms.take();
        let click_duration_ms = match (mousedown_time, mouseup_time) {
            (Some(down), Some(up)) => Some(up.saturating_sub(down)),
            _ => None,
        };

        self.state.clicks.push(Click {
            timestamp_ms: raw.timestamp_ms,
            x: raw.x,
            y: raw.y,
            target: raw.target,
            offset_from_center,
            preceding_hover,
            preceding_mouse_move,
            mousedown_time,
            click_duration_ms,
        });
        self.state.touch();
    }

    fn on_mouse_down(&mut self, timestamp_ms: u64) {
        self.state.pending_mousedown_ms = Some(timestamp_ms);
        self.state.pending_mouseup_ms = None;
    }

    fn on_mouse_up(&mut self, timestamp_ms: u64) {
        self.state.pending_mouseup_ms = Some(timestamp_ms);
    }

    fn on_hover(&mut self, target_node: agentdetect_core::NodeRef, timestamp_ms: u64, kind: HoverKind) {
        self.state.hovers.push(Hover {
            target_node,
            timestamp_ms,
            kind,
        });
        self.state.touch();
    }

    fn on_key_down(&mut self, key: String, timestamp_ms: u64) {
        let key = redact_key(&key);
        let delta_t_ms = self
            .state
            .keystrokes
            .back()
            .map(|k| timestamp_ms.saturating_sub(k.timestamp_ms));
        self.state.keystrokes.push(Keystroke {
            timestamp_ms,
            key,
            delta_t_ms,
            phase: KeyPhase::Down,
            hold_duration_ms: None,
        });
        self.state.touch();
    }

    fn on_key_up(&mut self, timestamp_ms: u64) {
        if let Some(down) = self
            .state
            .keystrokes
            .rfind_mut(|k| k.phase == KeyPhase::Down && k.hold_duration_ms.is_none())
        {
            down.hold_duration_ms = Some(timestamp_ms.saturating_sub(down.timestamp_ms));
            self.state.touch();
        }
    }

    fn on_scroll(&mut self, scroll_x: f64, scroll_y: f64, timestamp_ms: u64) {
        let prev = self.state.scrolls.back().copied();
        let (delta_t_ms, delta_x, delta_y) = match prev {
            Some(p) => (
                Some(timestamp_ms.saturating_sub(p.timestamp_ms)),
                Some(scroll_x - p.scroll_x),
                Some(scroll_y - p.scroll_y),
            ),
            None => (None, None, None),
        };
        self.state.scrolls.push(Scroll {
            timestamp_ms,
            scroll_x,
            scroll_y,
            delta_t_ms,
            delta_x,
            delta_y,
        });
        self.state.touch();
    }

    fn on_focus(&mut self, target: agentdetect_core::ElementDescriptor, timestamp_ms: u64, phase: FocusPhase) {
        self.state.focus_changes.push(FocusChange {
            timestamp_ms,
            target,
            phase,
        });
        self.state.touch();
    }

    fn on_pointer(&mut self, x: f64, y: f64, timestamp_ms: u64, kind: PointerEventKind) {
        self.state.pointer_events.push(PointerEvent {
            timestamp_ms,
            x,
            y,
            kind,
        });
        self.state.touch();
    }

    fn on_pointer_move(&mut self, x: f64, y: f64, timestamp_ms: u64) {
        if let Some(last) = self.state.last_pointer_move_ms {
            if timestamp_ms.saturating_sub(last) < POINTER_MOVE_THROTTLE_MS {
                return;
            }
        }
        self.state.last_pointer_move_ms = Some(timestamp_ms);
        self.on_pointer(x, y, timestamp_ms, PointerEventKind::Move);
    }
}

/// Single-character `key` values are redacted to the literal token
/// `"char"`; named keys (`"Enter"`, `"Tab"`, `"ArrowLeft"`, ...) pass
/// through verbatim.
fn redact_key(key: &str) -> String {
    if key.chars().count() == 1 {
        "char".to_string()
    } else {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentdetect_core::{ElementDescriptor, NodeRef, Rect};
    use agentdetect_dom::ClickRaw;
    use std::sync::{Arc, Mutex};

    struct MemStorage(Mutex<std::collections::HashMap<String, String>>);

    impl MemStorage {
        fn new() -> Self {
            Self(Mutex::new(std::collections::HashMap::new()))
        }
    }

    impl TabStorage for MemStorage {
        fn read(&self, key: &str) -> Option<String> {
            self.0.lock().unwrap().get(key).cloned()
        }
        fn write(&self, key: &str, value: String) {
            self.0.lock().unwrap().insert(key.to_string(), value);
        }
    }

    struct FixedClock(std::sync::atomic::AtomicU64);
    impl Clock for FixedClock {
        fn now_ms(&self) -> u64 {
            self.0.load(std::sync::atomic::Ordering::SeqCst)
        }
    }

    fn recorder() -> EventRecorder {
        let storage = Arc::new(MemStorage::new());
        let clock = Arc::new(FixedClock(std::sync::atomic::AtomicU64::new(0)));
        let mut r = EventRecorder::new(storage, clock);
        r.start_monitoring(Some(1));
        r
    }

    #[test]
    fn redacts_single_character_keys_but_not_named_keys() {
        assert_eq!(redact_key("a"), "char");
        assert_eq!(redact_key("Enter"), "Enter");
        assert_eq!(redact_key("ArrowLeft"), "ArrowLeft");
    }

    #[test]
    fn offset_from_center_is_never_negative() {
        let mut r = recorder();
        r.on_click(ClickRaw {
            x: 100.0,
            y: 100.0,
            timestamp_ms: 1,
            target: ElementDescriptor {
                tag: "button".into(),
                id: String::new(),
                class: String::new(),
                rect: Rect {
                    x: 90.0,
                    y: 90.0,
                    width: 20.0,
                    height: 20.0,
                },
            },
            target_node: NodeRef(1),
        });
        let click = r.raw_state().clicks.iter().last().unwrap();
        assert!(click.offset_from_center >= 0.0);
    }

    #[test]
    fn click_is_augmented_at_most_once_by_mousedown_mouseup_pair() {
        let mut r = recorder();
        r.on_mouse_down(10);
        r.on_mouse_up(40);
        r.on_click(ClickRaw {
            x: 0.0,
            y: 0.0,
            timestamp_ms: 45,
            target: ElementDescriptor::default(),
            target_node: NodeRef(1),
        });
        let click = r.raw_state().clicks.iter().last().unwrap();
        assert_eq!(click.mousedown_time, Some(10));
        assert_eq!(click.click_duration_ms, Some(30));

        // a later click with no mousedown/mouseup pair isn't retroactively
        // annotated from the earlier pair
        r.on_click(ClickRaw {
            x: 0.0,
            y: 0.0,
            timestamp_ms: 100,
            target: ElementDescriptor::default(),
            target_node: NodeRef(1),
        });
        let second = r.raw_state().clicks.iter().last().unwrap();
        assert_eq!(second.mousedown_time, None);
        assert_eq!(second.click_duration_ms, None);
    }

    #[test]
    fn pointer_move_throttle_is_inclusive_of_equality() {
        let mut r = recorder();
        r.on_pointer_move(0.0, 0.0, 0);
        r.on_pointer_move(0.0, 0.0, 49);
        r.on_pointer_move(0.0, 0.0, 50);
        let moves: Vec<_> = r
            .raw_state()
            .pointer_events
            .iter()
            .filter(|p| p.kind == PointerEventKind::Move)
            .collect();
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[1].timestamp_ms, 50);
    }

    #[test]
    fn restart_monitoring_is_idempotent() {
        let mut r = recorder();
        r.on_mouse_move(1.0, 1.0, 1);
        r.start_monitoring(Some(1));
        assert_eq!(r.raw_state().mouse_moves.len(), 1);
    }
}
