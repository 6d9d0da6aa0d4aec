//! Session identity: generation, and the record persisted under the
//! `agentdetect_session` storage key for same-tab continuity.

use serde::{Deserialize, Serialize};

/// Session ids are reused across page loads within the same tab for up to
/// this many milliseconds.
pub const SESSION_MAX_AGE_MS: u64 = 30 * 60 * 1000;

/// The record persisted under `agentdetect_session`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionRecord {
    pub id: String,
    pub timestamp: u64,
}

impl SessionRecord {
    /// Generate a fresh session id of the form `<time36>-<rand>`, where
    /// `time36` is `now_ms` base36-encoded and `rand` is a short random
    /// base36 suffix.
    pub fn generate(now_ms: u64, rand_source: &mut impl rand::RngCore) -> Self {
        let time36 = to_base36(now_ms as u128);
        let rand_part = to_base36(rand_source.next_u32() as u128);
        Self {
            id: format!("{time36}-{rand_part}"),
            timestamp: now_ms,
        }
    }

    /// Whether this record is still valid at `now_ms`, i.e. not older than
    /// [`SESSION_MAX_AGE_MS`].
    pub fn is_fresh(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.timestamp) < SESSION_MAX_AGE_MS
    }
}

/// Restore-or-create the session id for this tab. Returns the record to
/// persist (unchanged if restored-and-fresh, freshly generated otherwise)
/// and whether it was restored from a prior page load.
pub fn restore_or_create(
    restored: Option<SessionRecord>,
    now_ms: u64,
    rand_source: &mut impl rand::RngCore,
) -> (SessionRecord, bool) {
    match restored {
        Some(record) if record.is_fresh(now_ms) => (record, true),
        _ => (SessionRecord::generate(now_ms, rand_source), false),
    }
}

fn to_base36(mut n: u128) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).expect("base36 alphabet is ascii")
}
