//! Pure scan functions over a `NodeSnapshot` tree: text/attribute pattern
//! matching, the floating-UI heuristic, shadow-DOM detection, and the
//! agent-extension `src`/`href` check. spec.md §4.3.

use agentdetect_dom::mutation::{NodeSnapshot, Position};

use crate::finding::InjectionFinding;
use crate::registries::{self, attribute_matches, text_matches};

const COMET_EXTENSION_ID: &str = "npclhjbddhklpbnacpjloidibaggcgon";
const EXTENSION_SCHEMES: &[&str] = &["chrome-extension://", "moz-extension://"];

/// Scans one node (not its descendants — callers walk the tree) and
/// returns every finding it contributes. Host-platform elements are
/// skipped entirely.
pub fn scan_node(node: &NodeSnapshot, check_floating_ui: bool) -> Vec<InjectionFinding> {
    if registries::is_host_element(&node.class, &node.id, &node.attributes) {
        return vec![];
    }

    let mut findings = Vec::new();

    if let Some(text) = &node.leaf_text {
        for pattern in text_matches(text) {
            findings.push(InjectionFinding::new("text", pattern.name, pattern.weight));
        }
    }

    let haystacks = [
        node.class.as_str(),
        node.id.as_str(),
        node.attributes.get("src").map(String::as_str).unwrap_or(""),
        node.attributes.get("href").map(String::as_str).unwrap_or(""),
    ];
    for haystack in haystacks {
        if haystack.is_empty() {
            continue;
        }
        for pattern in attribute_matches(haystack) {
            findings.push(InjectionFinding::new(
                "attribute",
                pattern.name,
                pattern.weight,
            ));
        }
    }

    if check_floating_ui {
        if let Some(style) = node.style {
            let is_floating = matches!(style.position, Position::Fixed | Position::Absolute)
                && style.rect.width >= 50.0
                && style.rect.height >= 50.0
                && style.z_index >= 9000;
            if is_floating {
                findings.push(InjectionFinding::new("floating_ui", "floating_ui.candidate", 6));
            }
            if style.has_shadow_root {
                findings.push(InjectionFinding::new("shadow_dom", "shadow_dom.present", 7));
            }
        }
    }

    if extension_url_match(node.attributes.get("src"))
        || extension_url_match(node.attributes.get("href"))
    {
        findings.push(InjectionFinding::new(
            "mutation_script",
            "mutation_script.extension_url",
            10,
        ));
    }

    findings
}

fn extension_url_match(value: Option<&String>) -> bool {
    let Some(value) = value else { return false };
    value.contains(COMET_EXTENSION_ID)
        || EXTENSION_SCHEMES.iter().any(|scheme| value.contains(scheme))
}

/// Whether a resource URL (img/iframe src, or a stylesheet URL) counts
/// toward the aggregated `extension.resources` signal.
pub fn is_extension_resource_url(url: &str) -> bool {
    EXTENSION_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
}
