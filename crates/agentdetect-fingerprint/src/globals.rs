//! Automation-global scan, `cdc_`-prefix document-property scan, and the
//! DOM-marker scan. spec.md §4.2 "Automation globals", "DOM markers".

use agentdetect_core::types::AnomalySignal;

use crate::ports::RuntimeEnvironment;
use crate::registries::{self, AUTOMATION_GLOBALS, CDC_PROPERTY_WEIGHT, DOM_MARKERS};
use crate::report::SignalGroup;
use crate::signals;

pub fn automation_globals_probe(env: &impl RuntimeEnvironment) -> SignalGroup {
    let mut group = SignalGroup::default();
    let present = env.window_global_names();

    for (name, weight) in AUTOMATION_GLOBALS {
        if present.iter().any(|g| g == name) {
            group.push(AnomalySignal::new(format!("globals.{name}"), 1.0, *weight));
        }
    }

    for prop in env.document_own_property_names() {
        if registries::is_cdc_property(&prop) {
            group.push(AnomalySignal::new(
                signals::DOM_CDC_PROPERTY,
                1.0,
                CDC_PROPERTY_WEIGHT,
            ));
        }
    }

    group
}

pub fn dom_markers_probe(env: &impl RuntimeEnvironment) -> SignalGroup {
    let mut group = SignalGroup::default();
    let elements = env.scan_elements();

    for rule in DOM_MARKERS {
        if elements.iter().any(|el| (rule.matches)(el)) {
            group.push(AnomalySignal::new(rule.name, 1.0, rule.weight));
        }
    }

    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{ElementSummary, NavigatorSnapshot};
    use std::collections::HashMap;

    struct FakeEnv {
        globals: Vec<String>,
        doc_props: Vec<String>,
        elements: Vec<ElementSummary>,
    }

    impl RuntimeEnvironment for FakeEnv {
        fn navigator(&self) -> NavigatorSnapshot {
            NavigatorSnapshot::default()
        }
        fn webdriver_now(&self) -> bool {
            false
        }
        fn webdriver_at_load(&self) -> bool {
            false
        }
        fn webdriver_getter_is_native(&self) -> bool {
            true
        }
        fn outer_window_dims(&self) -> (f64, f64) {
            (1920.0, 1080.0)
        }
        fn screen_dims(&self) -> (f64, f64) {
            (1920.0, 1080.0)
        }
        fn has_chrome_global(&self) -> bool {
            true
        }
        fn has_connection_api(&self) -> bool {
            true
        }
        fn window_global_names(&self) -> Vec<String> {
            self.globals.clone()
        }
        fn document_own_property_names(&self) -> Vec<String> {
            self.doc_props.clone()
        }
        fn scan_elements(&self) -> Vec<ElementSummary> {
            self.elements.clone()
        }
        fn stylesheet_extension_urls(&self) -> Vec<String> {
            vec![]
        }
        fn script_and_link_urls(&self) -> Vec<String> {
            vec![]
        }
        fn resource_timing_names(&self) -> Vec<String> {
            vec![]
        }
    }

    #[test]
    fn selenium_global_is_detected() {
        let env = FakeEnv {
            globals: vec!["__selenium_unwrapped".to_string()],
            doc_props: vec![],
            elements: vec![],
        };
        let group = automation_globals_probe(&env);
        assert_eq!(group.signals.len(), 1);
        assert_eq!(group.signals[0].name, "globals.__selenium_unwrapped");
    }

    #[test]
    fn cdc_prefixed_property_is_detected_at_weight_ten() {
        let env = FakeEnv {
            globals: vec![],
            doc_props: vec!["cdc_adoQpoasnfa76pfcZLmcfl_Array".to_string()],
            elements: vec![],
        };
        let group = automation_globals_probe(&env);
        assert_eq!(group.signals.len(), 1);
        assert_eq!(group.signals[0].name, signals::DOM_CDC_PROPERTY);
        assert_eq!(group.signals[0].weight, 10);
    }

    #[test]
    fn clean_globals_emit_nothing() {
        let env = FakeEnv {
            globals: vec!["fetch".to_string(), "localStorage".to_string()],
            doc_props: vec!["title".to_string(), "body".to_string()],
            elements: vec![],
        };
        assert!(automation_globals_probe(&env).signals.is_empty());
    }

    #[test]
    fn data_testid_automation_prefix_is_detected() {
        let mut attrs = HashMap::new();
        attrs.insert("data-testid".to_string(), "cypress-run-42".to_string());
        let env = FakeEnv {
            globals: vec![],
            doc_props: vec![],
            elements: vec![ElementSummary {
                tag: "button".into(),
                id: String::new(),
                class: String::new(),
                attributes: attrs,
            }],
        };
        let group = dom_markers_probe(&env);
        assert_eq!(group.signals.len(), 1);
        assert_eq!(group.signals[0].name, "dom.data_testid_automation");
    }

    #[test]
    fn data_testid_unrelated_value_is_not_detected() {
        let mut attrs = HashMap::new();
        attrs.insert("data-testid".to_string(), "submit-button".to_string());
        let env = FakeEnv {
            globals: vec![],
            doc_props: vec![],
            elements: vec![ElementSummary {
                tag: "button".into(),
                id: String::new(),
                class: String::new(),
                attributes: attrs,
            }],
        };
        assert!(dom_markers_probe(&env).signals.is_empty());
    }
}
