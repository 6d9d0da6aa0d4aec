//! Navigator snapshot: spec.md §4.2 "Navigator" — informational only, no
//! direct score contribution.

use crate::ports::{NavigatorSnapshot, RuntimeEnvironment};

pub fn snapshot(env: &impl RuntimeEnvironment) -> NavigatorSnapshot {
    env.navigator()
}
