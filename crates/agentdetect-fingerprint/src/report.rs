//! The `Fingerprint` report type returned by [`crate::collector::FingerprintCollector::collect`].

use agentdetect_core::types::AnomalySignal;
use serde::{Deserialize, Serialize};

use crate::ports::NavigatorSnapshot;

/// One probe's findings. Most groups use `signals`; a couple of the spec's
/// probes talk about "anomalies" instead but the shape is identical, so a
/// single struct serves both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalGroup {
    pub signals: Vec<AnomalySignal>,
}

impl SignalGroup {
    pub fn push(&mut self, signal: AnomalySignal) {
        self.signals.push(signal);
    }

    pub fn weight_sum(&self) -> u32 {
        self.signals.iter().map(|s| s.weight as u32).sum()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fingerprint {
    pub webdriver: SignalGroup,
    pub headless: SignalGroup,
    pub extensions: SignalGroup,
    pub comet_extension: SignalGroup,
    pub perplexity_network: SignalGroup,
    pub globals: SignalGroup,
    pub dom_markers: SignalGroup,
    pub canvas: SignalGroup,
    pub webgl: SignalGroup,
    pub navigator: NavigatorSnapshot,
    pub score: u32,
}

impl Fingerprint {
    pub fn all_groups(&self) -> [&SignalGroup; 8] {
        [
            &self.webdriver,
            &self.headless,
            &self.extensions,
            &self.comet_extension,
            &self.perplexity_network,
            &self.globals,
            &self.dom_markers,
            &self.canvas,
            &self.webgl,
        ]
    }

    pub fn all_signals(&self) -> impl Iterator<Item = &AnomalySignal> {
        self.all_groups().into_iter().flat_map(|g| g.signals.iter())
    }

    /// `min(100, round((sumWeights / max(50, count*10)) * 100))`.
    pub fn compute_score(&self) -> u32 {
        let signals: Vec<&AnomalySignal> = self.all_signals().collect();
        if signals.is_empty() {
            return 0;
        }
        let sum_weights: u32 = signals.iter().map(|s| s.weight as u32).sum();
        let count = signals.len() as u32;
        let denom = std::cmp::max(50, count * 10) as f64;
        let ratio = (sum_weights as f64 / denom) * 100.0;
        std::cmp::min(100, ratio.round() as u32)
    }

    pub fn finalize_score(&mut self) {
        self.score = self.compute_score();
    }
}
