//! `Analyzer`: composes every signal group into one [`AnalysisReport`],
//! cached until `RecorderState::revision` changes.

use agentdetect_fingerprint::Fingerprint;
use agentdetect_injection::InjectionFinding;
use agentdetect_recorder::RecorderState;

use crate::agent_score;
use crate::interaction_score;
use crate::report::AnalysisReport;
use crate::{burst, click, keystroke, mouse, pointer, scroll, sequence};

#[derive(Debug, Default)]
pub struct Analyzer {
    cached: Option<AnalysisReport>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the report if `state.revision` has moved since the last
    /// call, otherwise returns the cached value — spec.md §4.4 "analysis
    /// cached until mutation".
    pub fn analyze(
        &mut self,
        state: &RecorderState,
        now_ms: u64,
        fingerprint: &Fingerprint,
        injection_findings: &[InjectionFinding],
    ) -> AnalysisReport {
        if let Some(cached) = &self.cached {
            if cached.revision == state.revision {
                tracing::trace!(revision = state.revision, "analyzer cache hit");
                return cached.clone();
            }
        }
        tracing::trace!(revision = state.revision, "analyzer cache miss, recomputing");

        let mut signals = Vec::new();
        signals.extend(mouse::analyze(state, now_ms));
        signals.extend(click::analyze(state));
        signals.extend(keystroke::analyze(state));
        signals.extend(scroll::analyze(state));
        signals.extend(sequence::analyze(state));
        signals.extend(burst::analyze(state));
        signals.extend(pointer::analyze(state));

        let interaction_score = interaction_score::score(&signals, state.total_events());

        let agent_signals = agent_score::extract_agent_signals(&signals, fingerprint, injection_findings);
        let agent_score = agent_score::score(&agent_signals);

        let report = AnalysisReport {
            signals,
            interaction_score,
            agent_signals,
            agent_score,
            revision: state.revision,
        };
        self.cached = Some(report.clone());
        report
    }
}
