//! `InjectionFinding` and the `analyze()` report shape.

use serde::{Deserialize, Serialize};

/// A single raw observation before grouping/scoring. `type_` names the
/// category ("text", "attribute", "floating_ui", "shadow_dom",
/// "extension_resource", "mutation_script"), `name` the specific pattern
/// or signal matched within that category. Grouping is by `(type_, name)`
/// per spec.md §4.3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjectionFinding {
    #[serde(rename = "type")]
    pub type_: &'static str,
    pub name: String,
    pub weight: u8,
}

impl InjectionFinding {
    pub fn new(type_: &'static str, name: impl Into<String>, weight: u8) -> Self {
        Self {
            type_,
            name: name.into(),
            weight,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InjectionReport {
    pub signals: Vec<InjectionFinding>,
    pub score: u32,
}
