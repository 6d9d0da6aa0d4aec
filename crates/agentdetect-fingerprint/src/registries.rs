//! Static pattern registries consulted by the probes. Kept as plain data
//! so the scoring rules (`weight`) are reviewable in one place rather
//! than scattered across `if` statements.

use crate::ports::ElementSummary;

/// A known AI-assistant / homework-helper browser extension, matched by a
/// case-insensitive substring against an element's `id`/`class`, or a
/// `chrome-extension://<id>/` URL pattern found in a stylesheet.
pub struct KnownExtension {
    pub name: &'static str,
    pub class_or_id_needle: &'static str,
    pub extension_id: Option<&'static str>,
    pub weight: u8,
}

/// ~20-entry registry of known helper-extension fingerprints. Weights
/// 5-10 per spec.md §4.2. Perplexity Comet is handled by its own
/// dedicated probe (`extensions::agent_probe`) since it has a stronger,
/// multi-signal contract (resource probe, cache, network target).
pub const KNOWN_EXTENSIONS: &[KnownExtension] = &[
    KnownExtension { name: "generic-ai-overlay", class_or_id_needle: "ai-answer-overlay", extension_id: None, weight: 7 },
    KnownExtension { name: "homework-solver", class_or_id_needle: "homework-solver", extension_id: None, weight: 8 },
    KnownExtension { name: "quiz-helper", class_or_id_needle: "quiz-helper-widget", extension_id: None, weight: 7 },
    KnownExtension { name: "chatgpt-sidebar", class_or_id_needle: "chatgpt-sidebar", extension_id: None, weight: 6 },
    KnownExtension { name: "answer-finder", class_or_id_needle: "answer-finder", extension_id: None, weight: 8 },
    KnownExtension { name: "essay-writer-ext", class_or_id_needle: "essay-writer-ext", extension_id: None, weight: 8 },
    KnownExtension { name: "exam-assist", class_or_id_needle: "exam-assist-panel", extension_id: None, weight: 9 },
    KnownExtension { name: "auto-solve-widget", class_or_id_needle: "auto-solve", extension_id: None, weight: 9 },
    KnownExtension { name: "math-solver-ext", class_or_id_needle: "math-solver-ext", extension_id: None, weight: 7 },
    KnownExtension { name: "grammar-ai-assist", class_or_id_needle: "grammar-ai-assist", extension_id: None, weight: 5 },
    KnownExtension { name: "quillbot-like", class_or_id_needle: "paraphrase-ai-widget", extension_id: None, weight: 5 },
    KnownExtension { name: "photo-solve", class_or_id_needle: "photo-solve-camera", extension_id: None, weight: 8 },
    KnownExtension { name: "tutor-bot-overlay", class_or_id_needle: "tutor-bot-overlay", extension_id: None, weight: 7 },
    KnownExtension { name: "answer-key-inject", class_or_id_needle: "answer-key-inject", extension_id: None, weight: 9 },
    KnownExtension { name: "study-copilot", class_or_id_needle: "study-copilot", extension_id: None, weight: 6 },
    KnownExtension { name: "llm-autofill", class_or_id_needle: "llm-autofill", extension_id: None, weight: 8 },
    KnownExtension { name: "browser-agent-hud", class_or_id_needle: "browser-agent-hud", extension_id: None, weight: 10 },
    KnownExtension { name: "mcp-bridge-widget", class_or_id_needle: "mcp-bridge-widget", extension_id: None, weight: 10 },
    KnownExtension { name: "claude-desktop-overlay", class_or_id_needle: "claude-desktop-overlay", extension_id: None, weight: 9 },
    KnownExtension { name: "side-panel-ai-copilot", class_or_id_needle: "side-panel-ai-copilot", extension_id: None, weight: 6 },
];

/// `chrome-extension://<id>/` stylesheet pattern to check per registry
/// entry that names a concrete extension id.
pub fn stylesheet_matches(url: &str, ext: &KnownExtension) -> bool {
    match ext.extension_id {
        Some(id) => url.contains(&format!("chrome-extension://{id}/")),
        None => false,
    }
}

pub fn element_matches_known_extension(el: &ElementSummary, ext: &KnownExtension) -> bool {
    el.class.to_lowercase().contains(ext.class_or_id_needle)
        || el.id.to_lowercase().contains(ext.class_or_id_needle)
}

/// MCP / Claude runtime marker globals. Names are placeholders for
/// whatever bridge a given MCP/agent runtime installs on `window`; the
/// probe only needs presence, not semantics.
pub const MCP_CLAUDE_RUNTIME_GLOBALS: &[(&str, u8)] = &[
    ("__mcp_bridge__", 10),
    ("__claude_desktop_bridge__", 10),
    ("__anthropic_extension_runtime__", 9),
    ("__mcp_client__", 9),
];

/// Automation globals: Selenium/Phantom/Puppeteer/Playwright/CDP/iMacros/
/// user-script artifacts. Weights 5-10 per spec.md §4.2.
pub const AUTOMATION_GLOBALS: &[(&str, u8)] = &[
    ("webdriver", 8),
    ("__selenium_unwrapped", 9),
    ("__webdriver_evaluate", 9),
    ("__driver_evaluate", 9),
    ("__webdriver_script_function", 8),
    ("__fxdriver_evaluate", 8),
    ("__driver_unwrapped", 8),
    ("_Selenium_IDE_Recorder", 9),
    ("_selenium", 7),
    ("callSelenium", 7),
    ("domAutomation", 8),
    ("domAutomationController", 8),
    ("_phantom", 7),
    ("callPhantom", 8),
    ("__nightmare", 8),
    ("_WEBDRIVER_ELEM_CACHE", 7),
    ("__playwright", 9),
    ("__pw_manual", 8),
    ("__PW_inspect", 8),
    ("__puppeteer_evaluation_script__", 9),
    ("__imacros", 6),
    ("GM_info", 5),
    ("unsafeWindow", 6),
];

/// Prefixes identifying CDP artifacts injected directly as own properties
/// of `document` (e.g. `cdc_adoQpoasnfa76pfcZLmcfl_Array`). Weight 10 each
/// per spec.md §4.2.
pub const CDC_PROPERTY_PREFIXES: &[&str] = &["$cdc_", "cdc_", "_cdc_", "$chrome_asyncScriptInfo"];
pub const CDC_PROPERTY_WEIGHT: u8 = 10;

pub fn is_cdc_property(name: &str) -> bool {
    CDC_PROPERTY_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// A DOM marker rule: an attribute/selector known to be left behind by
/// test/automation frameworks.
pub struct DomMarkerRule {
    pub name: &'static str,
    pub weight: u8,
    pub matches: fn(&ElementSummary) -> bool,
}

const TESTID_AUTOMATION_PREFIXES: &[&str] = &["selenium", "cypress", "playwright"];

pub const DOM_MARKERS: &[DomMarkerRule] = &[
    DomMarkerRule {
        name: "dom.data_selenium",
        weight: 9,
        matches: |el| el.attributes.contains_key("data-selenium"),
    },
    DomMarkerRule {
        name: "dom.data_testid_automation",
        weight: 6,
        matches: |el| {
            el.attributes
                .get("data-testid")
                .map(|v| {
                    let lower = v.to_lowercase();
                    TESTID_AUTOMATION_PREFIXES
                        .iter()
                        .any(|p| lower.starts_with(p))
                })
                .unwrap_or(false)
        },
    },
    DomMarkerRule {
        name: "dom.data_webdriver",
        weight: 8,
        matches: |el| el.attributes.contains_key("data-webdriver"),
    },
    DomMarkerRule {
        name: "dom.data_automation",
        weight: 7,
        matches: |el| el.attributes.contains_key("data-automation"),
    },
];
