//! Static pattern registries: suspicious text, suspicious attributes, and
//! the host-element filter. spec.md §4.3 "Patterns".

/// A phrase match against a leaf element's text content. Matching is
/// case-insensitive substring, deliberately not regex — every needle here
/// is a literal phrase or brand name.
pub struct TextPattern {
    pub name: &'static str,
    pub needle: &'static str,
    pub weight: u8,
}

pub const TEXT_PATTERNS: &[TextPattern] = &[
    TextPattern { name: "text.get_answer", needle: "get answer", weight: 8 },
    TextPattern { name: "text.solve_this", needle: "solve this", weight: 8 },
    TextPattern { name: "text.ask_ai", needle: "ask ai", weight: 7 },
    TextPattern { name: "text.show_solution", needle: "show solution", weight: 7 },
    TextPattern { name: "text.explain_this", needle: "explain this", weight: 6 },
    TextPattern { name: "text.homework_help", needle: "homework help", weight: 7 },
    TextPattern { name: "text.chatgpt_brand", needle: "chatgpt", weight: 6 },
    TextPattern { name: "text.perplexity_brand", needle: "perplexity", weight: 7 },
    TextPattern { name: "text.copilot_brand", needle: "copilot", weight: 5 },
    TextPattern { name: "text.auto_complete_answer", needle: "auto-complete answer", weight: 9 },
    TextPattern { name: "text.generate_essay", needle: "generate essay", weight: 9 },
    TextPattern { name: "text.summarize_page", needle: "summarize this page", weight: 6 },
];

/// A match against an element's `class`, `id`, `src`, or `href`.
pub struct AttributePattern {
    pub name: &'static str,
    pub needle: &'static str,
    pub weight: u8,
}

pub const ATTRIBUTE_PATTERNS: &[AttributePattern] = &[
    AttributePattern { name: "attribute.ai_overlay_class", needle: "ai-overlay", weight: 7 },
    AttributePattern { name: "attribute.homework_solver_class", needle: "homework-solver", weight: 8 },
    AttributePattern { name: "attribute.answer_widget_id", needle: "answer-widget", weight: 8 },
    AttributePattern { name: "attribute.comet_src", needle: "comet", weight: 9 },
    AttributePattern { name: "attribute.perplexity_src", needle: "perplexity", weight: 9 },
    AttributePattern { name: "attribute.mcp_bridge_id", needle: "mcp-bridge", weight: 10 },
    AttributePattern { name: "attribute.claude_overlay_class", needle: "claude-overlay", weight: 9 },
    AttributePattern { name: "attribute.auto_solve_class", needle: "auto-solve", weight: 9 },
];

pub fn text_matches(haystack: &str) -> Vec<&'static TextPattern> {
    let lower = haystack.to_lowercase();
    TEXT_PATTERNS
        .iter()
        .filter(|p| lower.contains(p.needle))
        .collect()
}

pub fn attribute_matches(haystack: &str) -> Vec<&'static AttributePattern> {
    let lower = haystack.to_lowercase();
    ATTRIBUTE_PATTERNS
        .iter()
        .filter(|p| lower.contains(p.needle))
        .collect()
}

/// Prefixes (matched via `starts_with`, case-insensitive) that mark an
/// element as host-platform chrome rather than injected UI: the generic
/// "regex" language in spec.md is implemented as plain prefix matching
/// since every listed family is a fixed, known prefix, not a pattern
/// needing true regex.
const CLASS_ID_HOST_PREFIXES: &[&str] = &[
    // Bootstrap utility classes
    "btn-", "col-", "row", "container", "navbar-", "card-", "modal-", "form-", "d-flex", "d-none",
    // icon fonts
    "fa-", "fas-", "far-", "material-icons", "glyphicon-",
    // known editor toolbars
    "ql-", "ck-", "cke_", "tox-", "ProseMirror",
    // test-framework ids
    "__cypress", "storybook-root",
];

/// Host-specific data attributes that, if present, mark the element as
/// platform-owned regardless of class/id.
const HOST_DATA_ATTRIBUTES: &[&str] = &[
    "data-host-widget",
    "data-platform-component",
    "data-reactroot",
];

pub fn is_host_element(class: &str, id: &str, attributes: &std::collections::HashMap<String, String>) -> bool {
    let class_lower = class.to_lowercase();
    let id_lower = id.to_lowercase();

    let prefix_hit = CLASS_ID_HOST_PREFIXES.iter().any(|prefix| {
        class_lower
            .split_whitespace()
            .any(|token| token.starts_with(&prefix.to_lowercase()))
            || id_lower.starts_with(&prefix.to_lowercase())
    });
    if prefix_hit {
        return true;
    }

    HOST_DATA_ATTRIBUTES
        .iter()
        .any(|attr| attributes.contains_key(*attr))
}
