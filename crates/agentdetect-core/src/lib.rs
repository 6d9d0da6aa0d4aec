//! # agentdetect-core
//!
//! Shared types, errors, configuration, session identity, and the clock
//! port used by every other agentdetect crate. Analogous to `hiwave-core`
//! in the browser engine this workspace is modeled on: one small crate
//! holding the vocabulary everything else builds on.

pub mod clock;
pub mod config;
pub mod error;
pub mod session;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use config::{EngineConfig, EngineConfigPatch};
pub use error::{EngineError, EngineResult};
pub use session::{restore_or_create, SessionRecord, SESSION_MAX_AGE_MS};
pub use types::{AnomalySignal, ElementDescriptor, NodeRef, Point, Rect, Verdict, DETECTED_AGENT_COMET};
