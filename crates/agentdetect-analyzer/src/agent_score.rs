//! Agent-category extraction and scoring: spec.md §4.4 "Agent-category
//! extraction and score".

use agentdetect_core::types::AnomalySignal;
use agentdetect_fingerprint::{signals as fp_signals, Fingerprint};
use agentdetect_injection::InjectionFinding;

/// Fingerprint signal names that, on their own, constitute conclusive
/// evidence of the agent extension.
const DEFINITIVE_FINGERPRINT_SIGNALS: &[&str] = &[
    fp_signals::COMET_SCRIPT_OR_LINK_MATCH,
    fp_signals::COMET_STYLESHEET_MATCH,
    fp_signals::COMET_RESOURCE_PROBE_HIT,
    fp_signals::COMET_TAB_STORE_HIT,
    fp_signals::EXTENSIONS_MCP_CLAUDE_GLOBAL,
    fp_signals::PERPLEXITY_NETWORK_TARGET,
];

const DEFINITIVE_INJECTION_TYPES: &[&str] = &["mutation_script", "extension_resource"];

const TIER1_FIXED_NAMES: &[&str] = &["comet.ultra_precise_center"];

/// Weight threshold above which `comet.low_mouse_to_action_ratio`
/// counts as Tier 1 rather than Tier 2.
const LOW_MOUSE_RATIO_TIER1_WEIGHT: u8 = 10;

/// Union of every signal that belongs in the agent-signal pool: (a)
/// behavioral `comet.*` anomalies from the interaction groups, (b)
/// Fingerprint signals from the agent-extension/agent-runtime/network
/// groups, (c) the mid-session webdriver change, (d) Injection findings
/// referencing the agent brand or extension ID.
pub fn extract_agent_signals(
    behavioral_signals: &[AnomalySignal],
    fingerprint: &Fingerprint,
    injection_findings: &[InjectionFinding],
) -> Vec<AnomalySignal> {
    let mut agent_signals: Vec<AnomalySignal> = behavioral_signals
        .iter()
        .filter(|s| s.name.starts_with("comet."))
        .cloned()
        .collect();

    for signal in fingerprint.comet_extension.signals.iter().chain(fingerprint.perplexity_network.signals.iter()).chain(fingerprint.extensions.signals.iter()) {
        if DEFINITIVE_FINGERPRINT_SIGNALS.contains(&signal.name.as_str()) {
            agent_signals.push(signal.clone());
        }
    }

    if fingerprint
        .webdriver
        .signals
        .iter()
        .any(|s| s.name == fp_signals::WEBDRIVER_CHANGED_MID_SESSION)
    {
        agent_signals.push(AnomalySignal::new(
            fp_signals::WEBDRIVER_CHANGED_MID_SESSION,
            1.0,
            10,
        ));
    }

    for finding in injection_findings {
        if DEFINITIVE_INJECTION_TYPES.contains(&finding.type_) {
            agent_signals.push(AnomalySignal::new(finding.name.clone(), 1.0, finding.weight));
        }
    }

    agent_signals
}

fn is_definitive(signals: &[AnomalySignal]) -> bool {
    signals.iter().any(|s| {
        DEFINITIVE_FINGERPRINT_SIGNALS.contains(&s.name.as_str())
            || s.name == "mutation_script.extension_url"
            || s.name == "extension.resources"
    })
}

enum Tier {
    One,
    Two,
}

fn classify(signal: &AnomalySignal) -> Option<Tier> {
    if !signal.name.starts_with("comet.") {
        return None;
    }
    if TIER1_FIXED_NAMES.contains(&signal.name.as_str()) {
        return Some(Tier::One);
    }
    if signal.name == "comet.low_mouse_to_action_ratio" && signal.weight >= LOW_MOUSE_RATIO_TIER1_WEIGHT {
        return Some(Tier::One);
    }
    Some(Tier::Two)
}

/// Computes the agent score per spec.md §4.4's tiered formula.
pub fn score(agent_signals: &[AnomalySignal]) -> u32 {
    if agent_signals.is_empty() {
        return 0;
    }

    let sum_weights: u32 = agent_signals.iter().map(|s| s.weight as u32).sum();

    if is_definitive(agent_signals) {
        return std::cmp::min(100, 70 + sum_weights);
    }

    let mut tier1 = 0usize;
    let mut tier2 = 0usize;
    for signal in agent_signals {
        match classify(signal) {
            Some(Tier::One) => tier1 += 1,
            Some(Tier::Two) => tier2 += 1,
            None => {}
        }
    }

    if tier1 >= 1 && tier2 >= 2 {
        std::cmp::min(100, sum_weights * 2)
    } else if tier1 >= 1 {
        std::cmp::min(100, (sum_weights as f64 * 1.5).round() as u32)
    } else if tier2 > 0 {
        std::cmp::min(40, sum_weights)
    } else {
        0
    }
}
