//! `AnalysisReport`: the Analyzer's cached output.

use agentdetect_core::types::AnomalySignal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub signals: Vec<AnomalySignal>,
    pub interaction_score: u32,
    pub agent_signals: Vec<AnomalySignal>,
    pub agent_score: u32,
    /// The `RecorderState::revision` this report was computed against.
    pub revision: u64,
}
