//! Per-store record types and the capped, FIFO-evicting store they live
//! in. Every store has the same cap (500) and the same eviction policy,
//! per spec.md §3.

use agentdetect_core::ElementDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Hard per-store cap. Exceeding it evicts the oldest record.
pub const STORE_CAP: usize = 500;
/// Cap on records written into a cross-page snapshot.
pub const SNAPSHOT_CAP: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseMove {
    pub timestamp_ms: u64,
    pub x: f64,
    pub y: f64,
    /// Time since the previous MouseMove, in ms. `None` for the first.
    pub delta_t_ms: Option<u64>,
    pub delta_x: Option<f64>,
    pub delta_y: Option<f64>,
    /// Pixels per ms, only computed when `delta_t_ms > 0`.
    pub velocity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Click {
    pub timestamp_ms: u64,
    pub x: f64,
    pub y: f64,
    pub target: ElementDescriptor,
    /// Euclidean distance from (x, y) to the target's rect center. Always
    /// `>= 0`.
    pub offset_from_center: f64,
    pub preceding_hover: bool,
    pub preceding_mouse_move: bool,
    pub mousedown_time: Option<u64>,
    /// `mouseup_time - mousedown_time`, once both have arrived.
    pub click_duration_ms: Option<u64>,
}

/// A normalized keystroke. Per spec.md §3, actual characters are never
/// stored: single-character `key` values collapse to the literal token
/// `"char"` before the record is ever created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keystroke {
    pub timestamp_ms: u64,
    pub key: String,
    pub delta_t_ms: Option<u64>,
    pub phase: KeyPhase,
    pub hold_duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyPhase {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scroll {
    pub timestamp_ms: u64,
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub delta_t_ms: Option<u64>,
    pub delta_x: Option<f64>,
    pub delta_y: Option<f64>,
}

/// Hovers are intentionally excluded from cross-page persistence (see
/// Design Notes): the node identity they carry cannot be serialized
/// meaningfully across a page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hover {
    pub target_node: agentdetect_core::NodeRef,
    pub timestamp_ms: u64,
    pub kind: HoverKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoverKind {
    Over,
    Out,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusChange {
    pub timestamp_ms: u64,
    pub target: ElementDescriptor,
    pub phase: FocusPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusPhase {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub timestamp_ms: u64,
    pub x: f64,
    pub y: f64,
    pub kind: PointerEventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEventKind {
    Down,
    Move,
}

/// An append-only, FIFO-evicting store capped at [`STORE_CAP`] records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoundedStore<T> {
    records: VecDeque<T>,
}

impl<T> BoundedStore<T> {
    pub fn new() -> Self {
        Self {
            records: VecDeque::new(),
        }
    }

    /// Append a record, evicting the oldest if the cap is exceeded.
    pub fn push(&mut self, record: T) {
        self.records.push_back(record);
        while self.records.len() > STORE_CAP {
            self.records.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.records.iter()
    }

    pub fn back(&self) -> Option<&T> {
        self.records.back()
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.records.back_mut()
    }

    /// Find the most recent record matching `pred`, mutably.
    pub fn rfind_mut(&mut self, mut pred: impl FnMut(&T) -> bool) -> Option<&mut T> {
        self.records.iter_mut().rev().find(|r| pred(r))
    }

    /// Prepend `older` records (oldest first) before the current content,
    /// then trim from the head to respect the cap. Used when restoring a
    /// cross-page snapshot: restored records are always older than
    /// whatever has already arrived this page (restoration happens during
    /// `startMonitoring`, before listeners fire — see spec.md §5).
    pub fn prepend_and_trim(&mut self, older: Vec<T>) {
        let mut merged: VecDeque<T> = older.into();
        merged.append(&mut self.records);
        while merged.len() > STORE_CAP {
            merged.pop_front();
        }
        self.records = merged;
    }

    /// The most recent `n` records, oldest-first, for snapshotting.
    pub fn tail(&self, n: usize) -> Vec<T>
    where
        T: Clone,
    {
        let len = self.records.len();
        let skip = len.saturating_sub(n);
        self.records.iter().skip(skip).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_evicts_oldest_past_cap() {
        let mut store = BoundedStore::new();
        for i in 0..(STORE_CAP + 10) {
            store.push(i);
        }
        assert_eq!(store.len(), STORE_CAP);
        assert_eq!(*store.iter().next().unwrap(), 10);
    }

    #[test]
    fn prepend_and_trim_keeps_restored_as_oldest() {
        let mut store = BoundedStore::new();
        store.push(10);
        store.push(11);
        store.prepend_and_trim(vec![1, 2, 3]);
        let all: Vec<i32> = store.iter().copied().collect();
        assert_eq!(all, vec![1, 2, 3, 10, 11]);
    }

    #[test]
    fn prepend_and_trim_respects_cap() {
        let mut store = BoundedStore::new();
        for i in 0..5 {
            store.push(i);
        }
        let older: Vec<i32> = (-(STORE_CAP as i32)..0).collect();
        store.prepend_and_trim(older);
        assert_eq!(store.len(), STORE_CAP);
        // the five newest-this-page records must survive at the tail
        let all: Vec<i32> = store.iter().copied().collect();
        assert_eq!(&all[all.len() - 5..], &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn tail_caps_to_snapshot_size() {
        let mut store = BoundedStore::new();
        for i in 0..10 {
            store.push(i);
        }
        let snap = store.tail(3);
        assert_eq!(snap, vec![7, 8, 9]);
    }

    use proptest::prelude::*;

    proptest! {
        /// spec.md §8: "∀ event stores S, |S| ≤ 500 at all observable
        /// times", for any sequence of pushes.
        #[test]
        fn push_never_exceeds_cap(values in prop::collection::vec(any::<u32>(), 0..2000)) {
            let mut store = BoundedStore::new();
            for v in values {
                store.push(v);
                prop_assert!(store.len() <= STORE_CAP);
            }
        }

        /// `prepend_and_trim` must never grow a store past the cap,
        /// however large the restored snapshot was.
        #[test]
        fn prepend_and_trim_never_exceeds_cap(
            existing in prop::collection::vec(any::<u32>(), 0..50),
            older in prop::collection::vec(any::<u32>(), 0..1200),
        ) {
            let mut store = BoundedStore::new();
            for v in existing {
                store.push(v);
            }
            store.prepend_and_trim(older);
            prop_assert!(store.len() <= STORE_CAP);
        }

        /// Whatever was already on the page this load must survive at the
        /// tail of a prepend, in order, as long as it alone fits the cap.
        #[test]
        fn prepend_and_trim_preserves_new_tail_order(
            existing in prop::collection::vec(any::<u16>(), 0..50),
            older in prop::collection::vec(any::<u16>(), 0..50),
        ) {
            let mut store = BoundedStore::new();
            for v in &existing {
                store.push(*v);
            }
            store.prepend_and_trim(older);
            let all: Vec<u16> = store.iter().copied().collect();
            prop_assert_eq!(&all[all.len() - existing.len()..], &existing[..]);
        }
    }
}
