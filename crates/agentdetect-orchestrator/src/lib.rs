//! # agentdetect-orchestrator
//!
//! Composes the Recorder, Fingerprint Collector, Injection Observer and
//! Analyzer into the top-level [`Engine`]: owns session identity and
//! configuration, shapes the outbound report, folds the four sub-scores
//! into the combined score and verdict, and drives periodic reporting.
//! Analogous to `hiwave-core`'s lifecycle dispatcher, scoped to this
//! engine's five components (spec.md §4.5).

pub mod combined_score;
pub mod engine;
pub mod report_shape;

pub use combined_score::{combined_score, verdict_for};
pub use engine::{CollectResult, Engine};
pub use report_shape::{
    CometPayload, EventCounts, InjectionPayload, InjectionSignalSummary, InteractionPayload,
    PageContext, ReportData,
};
