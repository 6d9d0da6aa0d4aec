//! # agentdetect-analyzer
//!
//! The Analyzer (spec.md §4.4): pure functions over `agentdetect-recorder`'s
//! `RecorderState`, `agentdetect-fingerprint`'s report, and
//! `agentdetect-injection`'s findings, producing a cached [`AnalysisReport`].

pub mod agent_score;
pub mod analyzer;
pub mod burst;
pub mod click;
pub mod interaction_score;
pub mod keystroke;
pub mod mouse;
pub mod pointer;
pub mod report;
pub mod scroll;
pub mod sequence;
pub mod stats;
pub mod thresholds;

pub use analyzer::Analyzer;
pub use report::AnalysisReport;
