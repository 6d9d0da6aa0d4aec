//! Assembles the outbound report payload shape (spec.md §6) from the
//! internal Fingerprint/Analyzer/Injection report types. This is purely a
//! wire-format concern — the internal report types stay as their owning
//! crates define them.

use std::collections::HashMap;

use serde::Serialize;

use agentdetect_analyzer::AnalysisReport;
use agentdetect_core::types::{AnomalySignal, Verdict, DETECTED_AGENT_COMET};
use agentdetect_fingerprint::Fingerprint;
use agentdetect_injection::{InjectionFinding, InjectionReport};
use agentdetect_recorder::RecorderState;

/// Page metadata the orchestrator stamps onto every report. A real host
/// binding reads this off `location`/`document.title`; it carries no
/// detection-relevant behavior, so it is modeled as its own small port
/// rather than folded into `RuntimeEnvironment`.
pub trait PageContext {
    fn page_url(&self) -> String;
    fn page_title(&self) -> String;
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCounts {
    pub mouse_moves: usize,
    pub clicks: usize,
    pub keystrokes: usize,
    pub scrolls: usize,
    pub hovers: usize,
    pub focus_changes: usize,
    pub pointer_events: usize,
}

impl EventCounts {
    pub fn capture(state: &RecorderState) -> Self {
        Self {
            mouse_moves: state.mouse_moves.len(),
            clicks: state.clicks.len(),
            keystrokes: state.keystrokes.len(),
            scrolls: state.scrolls.len(),
            hovers: state.hovers.len(),
            focus_changes: state.focus_changes.len(),
            pointer_events: state.pointer_events.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionPayload {
    pub event_counts: EventCounts,
    pub anomalies: Vec<AnomalySignal>,
    pub score: u32,
}

/// One grouped injection signal as shipped on the wire: the group's
/// strongest weight, how many raw findings fed it, and a bounded sample
/// of the categories that matched (there is no richer per-match text to
/// report — `InjectionFinding` is deliberately flat, see DESIGN.md).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectionSignalSummary {
    pub name: String,
    pub count: u32,
    pub max_weight: u8,
    pub examples: Vec<String>,
}

const MAX_EXAMPLES: usize = 3;

fn group_injection_signals(findings: &[InjectionFinding]) -> Vec<InjectionSignalSummary> {
    let mut groups: HashMap<&str, (u8, u32, Vec<String>)> = HashMap::new();
    for finding in findings {
        let entry = groups
            .entry(finding.name.as_str())
            .or_insert((finding.weight, 0, Vec::new()));
        entry.0 = entry.0.max(finding.weight);
        entry.1 += 1;
        if entry.2.len() < MAX_EXAMPLES {
            entry.2.push(finding.type_.to_string());
        }
    }
    let mut summaries: Vec<InjectionSignalSummary> = groups
        .into_iter()
        .map(|(name, (max_weight, count, examples))| InjectionSignalSummary {
            name: name.to_string(),
            count,
            max_weight,
            examples,
        })
        .collect();
    summaries.sort_by(|a, b| a.name.cmp(&b.name));
    summaries
}

fn detection_counts(findings: &[InjectionFinding]) -> HashMap<String, u32> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for finding in findings {
        *counts.entry(finding.type_.to_string()).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectionPayload {
    pub detection_counts: HashMap<String, u32>,
    pub signals: Vec<InjectionSignalSummary>,
    pub score: u32,
}

impl InjectionPayload {
    pub fn from_report(report: &InjectionReport) -> Self {
        Self {
            detection_counts: detection_counts(&report.signals),
            signals: group_injection_signals(&report.signals),
            score: report.score,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CometPayload {
    pub detected: bool,
    pub signal_count: usize,
    pub signals: Vec<AnomalySignal>,
    pub score: u32,
}

/// The full outbound report payload (spec.md §6 "Report payload
/// (combined)").
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub session_id: String,
    pub timestamp: u64,
    pub page_url: String,
    pub page_title: String,
    pub fingerprint: Fingerprint,
    pub interaction: InteractionPayload,
    pub injection: InjectionPayload,
    pub comet: CometPayload,
    pub combined_score: u32,
    pub verdict: Verdict,
    pub detected_agent: Option<String>,
}

#[allow(clippy::too_many_arguments)]
pub fn assemble_report(
    session_id: String,
    timestamp: u64,
    page_url: String,
    page_title: String,
    fingerprint: Fingerprint,
    state: &RecorderState,
    analysis: &AnalysisReport,
    injection: &InjectionReport,
    combined_score: u32,
) -> ReportData {
    let detected_agent = if analysis.agent_signals.is_empty() {
        None
    } else {
        Some(DETECTED_AGENT_COMET.to_string())
    };

    ReportData {
        session_id,
        timestamp,
        page_url,
        page_title,
        interaction: InteractionPayload {
            event_counts: EventCounts::capture(state),
            anomalies: analysis.signals.clone(),
            score: analysis.interaction_score,
        },
        injection: InjectionPayload::from_report(injection),
        comet: CometPayload {
            detected: !analysis.agent_signals.is_empty(),
            signal_count: analysis.agent_signals.len(),
            signals: analysis.agent_signals.clone(),
            score: analysis.agent_score,
        },
        fingerprint,
        combined_score,
        verdict: Verdict::from_score(combined_score),
        detected_agent,
    }
}
