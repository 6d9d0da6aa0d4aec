//! `FingerprintCollector`: composes every probe into one [`Fingerprint`]
//! report per spec.md §4.2's "collect()" contract.

use std::sync::Arc;

use agentdetect_dom::storage::TabStorage;

use crate::ports::{CanvasProbe, ExtensionResourceLoader, RuntimeEnvironment, WebglProbe};
use crate::report::Fingerprint;
use crate::{canvas, extensions, globals, headless, navigator, webdriver, webgl};

/// Ties the runtime-environment port together with the canvas/WebGL
/// backends and an optional extension-resource loader. `loader` is
/// `None` in contexts (e.g. most unit tests) where the resource-race leg
/// of the Comet probe isn't exercised; the rest of the probes still run.
pub struct FingerprintCollector<E, C, G, S> {
    env: E,
    canvas_probe: C,
    webgl_probe: G,
    storage: S,
    extension_loader: Option<Arc<dyn ExtensionResourceLoader>>,
}

impl<E, C, G, S> FingerprintCollector<E, C, G, S>
where
    E: RuntimeEnvironment,
    C: CanvasProbe,
    G: WebglProbe,
    S: TabStorage,
{
    pub fn new(env: E, canvas_probe: C, webgl_probe: G, storage: S) -> Self {
        Self {
            env,
            canvas_probe,
            webgl_probe,
            storage,
            extension_loader: None,
        }
    }

    pub fn with_extension_loader(mut self, loader: Arc<dyn ExtensionResourceLoader>) -> Self {
        self.extension_loader = Some(loader);
        self
    }

    pub async fn collect(&self) -> Fingerprint {
        let webdriver_group = webdriver::probe(&self.env);
        let headless_result = headless::probe(&self.env);
        let extensions_group = extensions::known_extensions_probe(&self.env);
        let comet_group =
            extensions::comet_probe(&self.env, &self.storage, self.extension_loader.clone())
                .await;
        let network_group = extensions::network_target_probe(&self.env);
        let globals_group = globals::automation_globals_probe(&self.env);
        let dom_markers_group = globals::dom_markers_probe(&self.env);
        let canvas_result = canvas::probe(&self.canvas_probe);
        let webgl_group = webgl::probe(&self.webgl_probe);
        let nav_snapshot = navigator::snapshot(&self.env);

        let mut fingerprint = Fingerprint {
            webdriver: webdriver_group,
            headless: headless_result.group,
            extensions: extensions_group,
            comet_extension: comet_group,
            perplexity_network: network_group,
            globals: globals_group,
            dom_markers: dom_markers_group,
            canvas: canvas_result.group,
            webgl: webgl_group,
            navigator: nav_snapshot,
            score: 0,
        };
        fingerprint.finalize_score();
        fingerprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{ElementSummary, NavigatorSnapshot, WebglInfo};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct CleanEnv;

    impl RuntimeEnvironment for CleanEnv {
        fn navigator(&self) -> NavigatorSnapshot {
            NavigatorSnapshot {
                user_agent: "Mozilla/5.0 Chrome/120.0".into(),
                plugin_count: 3,
                languages: vec!["en-US".into()],
                ..Default::default()
            }
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

    struct AutomatedEnv;

    impl RuntimeEnvironment for AutomatedEnv {
        fn navigator(&self) -> NavigatorSnapshot {
            NavigatorSnapshot {
                user_agent: "Mozilla/5.0 HeadlessChrome/120.0".into(),
                plugin_count: 0,
                languages: vec![],
                ..Default::default()
            }
        }
        fn webdriver_now(&self) -> bool {
            true
        }
        fn webdriver_at_load(&self) -> bool {
            true
        }
        fn webdriver_getter_is_native(&self) -> bool {
            true
        }
        fn outer_window_dims(&self) -> (f64, f64) {
            (0.0, 0.0)
        }
        fn screen_dims(&self) -> (f64, f64) {
            (0.0, 0.0)
        }
        fn has_chrome_global(&self) -> bool {
            false
        }
        fn has_connection_api(&self) -> bool {
            false
        }
        fn window_global_names(&self) -> Vec<String> {
            vec!["__selenium_unwrapped".to_string()]
        }
        fn document_own_property_names(&self) -> Vec<String> {
            vec!["cdc_adoQpoasnfa76pfcZLmcfl_Array".to_string()]
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

    struct FixedCanvas;
    impl CanvasProbe for FixedCanvas {
        fn render_data_url(&self) -> Result<String, String> {
            Ok(format!("data:image/png;base64,{}", "A".repeat(2000)))
        }
    }

    struct NoWebgl;
    impl WebglProbe for NoWebgl {
        fn debug_renderer_info(&self) -> Option<WebglInfo> {
            None
        }
        fn is_available(&self) -> bool {
            false
        }
    }

    struct MemStorage {
        inner: Mutex<HashMap<String, String>>,
    }
    impl MemStorage {
        fn new() -> Self {
            Self {
                inner: Mutex::new(HashMap::new()),
            }
        }
    }
    impl TabStorage for MemStorage {
        fn read(&self, key: &str) -> Option<String> {
            self.inner.lock().unwrap().get(key).cloned()
        }
        fn write(&self, key: &str, value: String) {
            self.inner.lock().unwrap().insert(key.to_string(), value);
        }
    }

    struct NeverLoader;
    #[async_trait]
    impl ExtensionResourceLoader for NeverLoader {
        async fn try_load(&self, _url: &str) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn clean_session_has_low_score() {
        let collector = FingerprintCollector::new(CleanEnv, FixedCanvas, NoWebgl, MemStorage::new())
            .with_extension_loader(Arc::new(NeverLoader));
        let fp = collector.collect().await;
        assert_eq!(fp.score, 0);
    }

    #[tokio::test]
    async fn automated_session_has_high_score() {
        let collector =
            FingerprintCollector::new(AutomatedEnv, FixedCanvas, NoWebgl, MemStorage::new())
                .with_extension_loader(Arc::new(NeverLoader));
        let fp = collector.collect().await;
        assert!(fp.score > 50, "expected high score, got {}", fp.score);
        assert!(!fp.webdriver.signals.is_empty());
        assert!(!fp.globals.signals.is_empty());
    }

    #[tokio::test]
    async fn score_never_exceeds_one_hundred() {
        let collector =
            FingerprintCollector::new(AutomatedEnv, FixedCanvas, NoWebgl, MemStorage::new())
                .with_extension_loader(Arc::new(NeverLoader));
        let fp = collector.collect().await;
        assert!(fp.score <= 100);
    }
}
