//! Headless-indicator probe: spec.md §4.2 "Headless indicators".

use agentdetect_core::types::AnomalySignal;

use crate::ports::RuntimeEnvironment;
use crate::report::SignalGroup;
use crate::signals;

const HEADLESS_UA_NEEDLES: &[&str] = &["HeadlessChrome", "PhantomJS", "SlimerJS"];

pub struct HeadlessProbeResult {
    pub group: SignalGroup,
    /// `true` iff any emitted signal carries weight >= 7.
    pub detected: bool,
}

pub fn probe(env: &impl RuntimeEnvironment) -> HeadlessProbeResult {
    let mut group = SignalGroup::default();
    let nav = env.navigator();
    let ua = &nav.user_agent;
    let is_chrome_branded = ua.contains("Chrome");

    if nav.plugin_count == 0 {
        group.push(AnomalySignal::new(signals::HEADLESS_EMPTY_PLUGINS, 1.0, 6));
    }
    if nav.languages.is_empty() {
        group.push(AnomalySignal::new(signals::HEADLESS_EMPTY_LANGUAGES, 1.0, 7));
    }
    if is_chrome_branded && !env.has_chrome_global() {
        group.push(AnomalySignal::new(
            signals::HEADLESS_MISSING_CHROME_GLOBAL,
            1.0,
            8,
        ));
    }
    if HEADLESS_UA_NEEDLES.iter().any(|needle| ua.contains(needle)) {
        group.push(AnomalySignal::new(signals::HEADLESS_UA_MATCH, 1.0, 10));
    }

    let (outer_w, outer_h) = env.outer_window_dims();
    if outer_w == 0.0 && outer_h == 0.0 {
        group.push(AnomalySignal::new(signals::HEADLESS_ZERO_OUTER_DIMS, 1.0, 8));
    }

    let (screen_w, screen_h) = env.screen_dims();
    if screen_w == 0.0 && screen_h == 0.0 {
        group.push(AnomalySignal::new(signals::HEADLESS_ZERO_SCREEN_DIMS, 1.0, 7));
    }

    if is_chrome_branded && !env.has_connection_api() {
        group.push(AnomalySignal::new(
            signals::HEADLESS_MISSING_CONNECTION_API,
            1.0,
            4,
        ));
    }

    let detected = group.signals.iter().any(|s| s.weight >= 7);
    HeadlessProbeResult { group, detected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{ElementSummary, NavigatorSnapshot};

    struct FakeEnv {
        nav: NavigatorSnapshot,
        outer: (f64, f64),
        screen: (f64, f64),
        chrome_global: bool,
        connection_api: bool,
    }

    impl Default for FakeEnv {
        fn default() -> Self {
            Self {
                nav: NavigatorSnapshot {
                    user_agent: "Mozilla/5.0 Chrome/120.0".into(),
                    plugin_count: 3,
                    languages: vec!["en-US".into()],
                    ..Default::default()
                },
                outer: (1920.0, 1080.0),
                screen: (1920.0, 1080.0),
                chrome_global: true,
                connection_api: true,
            }
        }
    }

    impl RuntimeEnvironment for FakeEnv {
        fn navigator(&self) -> NavigatorSnapshot {
            self.nav.clone()
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
            self.outer
        }
        fn screen_dims(&self) -> (f64, f64) {
            self.screen
        }
        fn has_chrome_global(&self) -> bool {
            self.chrome_global
        }
        fn has_connection_api(&self) -> bool {
            self.connection_api
        }
        fn window_global_names(&self) -> Vec<String> {
            vec![]
        }
        fn document_own_property_names(&self) -> Vec<String> {
            vec![]
        }
        fn scan_elements(&self) -> Vec<ElementSummary> {
            vec![]
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
    fn normal_browser_is_not_detected() {
        let env = FakeEnv::default();
        let result = probe(&env);
        assert!(result.group.signals.is_empty());
        assert!(!result.detected);
    }

    #[test]
    fn headless_chrome_ua_triggers_detection() {
        let mut env = FakeEnv::default();
        env.nav.user_agent = "Mozilla/5.0 HeadlessChrome/120.0".into();
        let result = probe(&env);
        assert!(result.detected);
        assert!(result
            .group
            .signals
            .iter()
            .any(|s| s.name == signals::HEADLESS_UA_MATCH));
    }

    #[test]
    fn low_weight_signals_alone_do_not_flip_detected() {
        let mut env = FakeEnv::default();
        env.connection_api = false;
        let result = probe(&env);
        assert_eq!(result.group.signals.len(), 1);
        assert_eq!(result.group.signals[0].weight, 4);
        assert!(!result.detected);
    }

    #[test]
    fn missing_chrome_global_on_chrome_ua_is_detected() {
        let mut env = FakeEnv::default();
        env.chrome_global = false;
        let result = probe(&env);
        assert!(result.detected);
    }

    #[test]
    fn non_chrome_ua_does_not_check_chrome_global_or_connection_api() {
        let mut env = FakeEnv::default();
        env.nav.user_agent = "Mozilla/5.0 Firefox/120.0".into();
        env.chrome_global = false;
        env.connection_api = false;
        let result = probe(&env);
        assert!(result.group.signals.is_empty());
    }
}
