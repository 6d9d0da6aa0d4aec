//! `InjectionObserver`: `startMonitoring`/`stopMonitoring`/`analyze()` per
//! spec.md §4.3.

use agentdetect_dom::mutation::{MutationRecord, NodeSnapshot};

use crate::finding::{InjectionFinding, InjectionReport};
use crate::scanner::{self, scan_node};
use crate::scoring;

const WATCHED_ATTRIBUTES: &[&str] = &[
    "class",
    "id",
    "src",
    "href",
    "style",
    "data-comet",
    "data-perplexity",
];

pub fn is_watched_attribute(name: &str) -> bool {
    WATCHED_ATTRIBUTES.contains(&name)
}

#[derive(Debug, Default)]
pub struct InjectionObserver {
    active: bool,
    debug: bool,
    findings: Vec<InjectionFinding>,
}

impl InjectionObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_monitoring(&mut self, debug: bool) {
        if self.active {
            tracing::debug!("injection observer already active, ignoring duplicate start");
            return;
        }
        self.active = true;
        self.debug = debug;
        self.findings.clear();
        tracing::debug!(debug, "injection observer started");
    }

    pub fn stop_monitoring(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        tracing::debug!("injection observer stopped");
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Walks every descendant of the given root once. Per the resolved
    /// Open Question, the floating-UI computed-style check is skipped on
    /// this path — only on `apply_mutation` for newly added nodes.
    pub fn initial_scan(&mut self, body: &NodeSnapshot) {
        if !self.active {
            return;
        }
        for node in body.iter() {
            self.findings.extend(scan_node(node, false));
        }
    }

    /// Aggregates `<img>`/`<iframe>`/stylesheet URLs matching a known
    /// extension scheme into the single `extension.resources` signal.
    /// Called once alongside `initial_scan` over the same document.
    pub fn scan_extension_resource_urls(&mut self, urls: &[String]) {
        if !self.active {
            return;
        }
        for url in urls {
            if scanner::is_extension_resource_url(url) {
                self.findings.push(InjectionFinding::new(
                    "extension_resource",
                    "extension.resources",
                    7,
                ));
            }
        }
    }

    pub fn apply_mutation(&mut self, mutation: &MutationRecord) {
        if !self.active {
            return;
        }
        match mutation {
            MutationRecord::ChildListAdded { nodes } => {
                for added in nodes {
                    for node in added.iter() {
                        self.findings.extend(scan_node(node, true));
                    }
                }
            }
            MutationRecord::AttributeChanged {
                snapshot,
                attribute,
                ..
            } => {
                if is_watched_attribute(attribute) {
                    self.findings.extend(scan_node(snapshot, true));
                }
            }
        }
    }

    pub fn analyze(&self) -> InjectionReport {
        InjectionReport {
            signals: self.findings.clone(),
            score: scoring::score(&self.findings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentdetect_core::NodeRef;
    use std::collections::HashMap;

    fn leaf(tag: &str, class: &str, text: Option<&str>) -> NodeSnapshot {
        NodeSnapshot {
            node: NodeRef(1),
            tag: tag.to_string(),
            id: String::new(),
            class: class.to_string(),
            attributes: HashMap::new(),
            leaf_text: text.map(str::to_string),
            style: None,
            children: Vec::new(),
        }
    }

    #[test]
    fn analyze_before_start_monitoring_is_empty() {
        let observer = InjectionObserver::new();
        let report = observer.analyze();
        assert!(report.signals.is_empty());
        assert_eq!(report.score, 0);
    }

    #[test]
    fn start_monitoring_is_idempotent_and_does_not_clear_active_findings() {
        let mut observer = InjectionObserver::new();
        observer.start_monitoring(false);
        let body = leaf("div", "widget", Some("get answer now"));
        observer.initial_scan(&body);
        assert!(!observer.analyze().signals.is_empty());

        observer.start_monitoring(false);
        assert!(!observer.analyze().signals.is_empty());
    }

    #[test]
    fn stop_monitoring_prevents_further_findings() {
        let mut observer = InjectionObserver::new();
        observer.start_monitoring(false);
        observer.stop_monitoring();
        let body = leaf("div", "widget", Some("get answer now"));
        observer.initial_scan(&body);
        assert!(observer.analyze().signals.is_empty());
    }

    #[test]
    fn extension_resource_urls_aggregate_into_one_named_signal() {
        let mut observer = InjectionObserver::new();
        observer.start_monitoring(false);
        observer.scan_extension_resource_urls(&[
            "chrome-extension://abc/icon.png".to_string(),
            "https://example.com/logo.png".to_string(),
            "moz-extension://def/icon.png".to_string(),
        ]);
        let report = observer.analyze();
        assert_eq!(report.signals.len(), 2);
        assert!(report
            .signals
            .iter()
            .all(|s| s.name == "extension.resources"));
    }
}
