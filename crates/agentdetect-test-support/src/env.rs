//! Configurable fakes for the Fingerprint Collector's probe ports
//! ([`RuntimeEnvironment`], [`CanvasProbe`], [`WebglProbe`],
//! [`ExtensionResourceLoader`]). Each defaults to a "clean", human-looking
//! shape; tests flip individual fields to synthesize an automated one.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use agentdetect_fingerprint::ports::{
    CanvasProbe, ElementSummary, ExtensionResourceLoader, NavigatorSnapshot, RuntimeEnvironment,
    WebglInfo, WebglProbe,
};

/// A fully scriptable [`RuntimeEnvironment`]. Construct with
/// [`FakeEnvironment::human`] or [`FakeEnvironment::headless_bot`] for the
/// two common shapes, then override individual fields as the scenario
/// needs.
#[derive(Debug, Clone)]
pub struct FakeEnvironment {
    pub navigator: NavigatorSnapshot,
    pub webdriver_now: bool,
    pub webdriver_at_load: bool,
    pub webdriver_getter_is_native: bool,
    pub outer_window_dims: (f64, f64),
    pub screen_dims: (f64, f64),
    pub has_chrome_global: bool,
    pub has_connection_api: bool,
    pub window_global_names: Vec<String>,
    pub document_own_property_names: Vec<String>,
    pub elements: Vec<ElementSummary>,
    pub stylesheet_extension_urls: Vec<String>,
    pub script_and_link_urls: Vec<String>,
    pub resource_timing_names: Vec<String>,
}

impl Default for FakeEnvironment {
    fn default() -> Self {
        Self::human()
    }
}

impl FakeEnvironment {
    /// A plausible everyday Chrome desktop session: no automation
    /// markers, ordinary window/screen dimensions, a few plugins.
    pub fn human() -> Self {
        Self {
            navigator: NavigatorSnapshot {
                user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/124.0".into(),
                platform: "Win32".into(),
                hardware_concurrency: 8,
                device_memory: Some(8.0),
                max_touch_points: 0,
                languages: vec!["en-US".into(), "en".into()],
                cookie_enabled: true,
                do_not_track: None,
                plugin_count: 3,
            },
            webdriver_now: false,
            webdriver_at_load: false,
            webdriver_getter_is_native: true,
            outer_window_dims: (1920.0, 1040.0),
            screen_dims: (1920.0, 1080.0),
            has_chrome_global: true,
            has_connection_api: true,
            window_global_names: vec![],
            document_own_property_names: vec![],
            elements: vec![],
            stylesheet_extension_urls: vec![],
            script_and_link_urls: vec![],
            resource_timing_names: vec![],
        }
    }

    /// A CDP-driven headless session: `navigator.webdriver` true from
    /// load, the classic `cdc_`-prefixed ChromeDriver document property,
    /// zero outer window dimensions, no plugins.
    pub fn headless_bot() -> Self {
        Self {
            navigator: NavigatorSnapshot {
                user_agent: "Mozilla/5.0 HeadlessChrome/124.0".into(),
                platform: "Linux x86_64".into(),
                hardware_concurrency: 2,
                device_memory: None,
                max_touch_points: 0,
                languages: vec![],
                cookie_enabled: true,
                do_not_track: None,
                plugin_count: 0,
            },
            webdriver_now: true,
            webdriver_at_load: true,
            webdriver_getter_is_native: true,
            outer_window_dims: (0.0, 0.0),
            screen_dims: (0.0, 0.0),
            has_chrome_global: false,
            has_connection_api: false,
            window_global_names: vec!["__selenium_unwrapped".into(), "__webdriver_evaluate".into()],
            document_own_property_names: vec!["cdc_adoQpoasnfa76pfcZLmcfl_Array".into()],
            elements: vec![],
            stylesheet_extension_urls: vec![],
            script_and_link_urls: vec![],
            resource_timing_names: vec![],
        }
    }

    pub fn with_elements(mut self, elements: Vec<ElementSummary>) -> Self {
        self.elements = elements;
        self
    }

    pub fn with_script_and_link_urls(mut self, urls: Vec<String>) -> Self {
        self.script_and_link_urls = urls;
        self
    }

    pub fn with_resource_timing_names(mut self, names: Vec<String>) -> Self {
        self.resource_timing_names = names;
        self
    }
}

impl RuntimeEnvironment for FakeEnvironment {
    fn navigator(&self) -> NavigatorSnapshot {
        self.navigator.clone()
    }
    fn webdriver_now(&self) -> bool {
        self.webdriver_now
    }
    fn webdriver_at_load(&self) -> bool {
        self.webdriver_at_load
    }
    fn webdriver_getter_is_native(&self) -> bool {
        self.webdriver_getter_is_native
    }
    fn outer_window_dims(&self) -> (f64, f64) {
        self.outer_window_dims
    }
    fn screen_dims(&self) -> (f64, f64) {
        self.screen_dims
    }
    fn has_chrome_global(&self) -> bool {
        self.has_chrome_global
    }
    fn has_connection_api(&self) -> bool {
        self.has_connection_api
    }
    fn window_global_names(&self) -> Vec<String> {
        self.window_global_names.clone()
    }
    fn document_own_property_names(&self) -> Vec<String> {
        self.document_own_property_names.clone()
    }
    fn scan_elements(&self) -> Vec<ElementSummary> {
        self.elements.clone()
    }
    fn stylesheet_extension_urls(&self) -> Vec<String> {
        self.stylesheet_extension_urls.clone()
    }
    fn script_and_link_urls(&self) -> Vec<String> {
        self.script_and_link_urls.clone()
    }
    fn resource_timing_names(&self) -> Vec<String> {
        self.resource_timing_names.clone()
    }
}

/// Always renders the same fixed-size canvas data URL, long enough to
/// clear the Fingerprint Collector's "too short to be real" floor.
#[derive(Debug, Clone)]
pub struct FakeCanvasProbe {
    pub data_url: Result<String, String>,
}

impl Default for FakeCanvasProbe {
    fn default() -> Self {
        Self {
            data_url: Ok(format!("data:image/png;base64,{}", "A".repeat(2_000))),
        }
    }
}

impl FakeCanvasProbe {
    pub fn failing(msg: impl Into<String>) -> Self {
        Self {
            data_url: Err(msg.into()),
        }
    }
}

impl CanvasProbe for FakeCanvasProbe {
    fn render_data_url(&self) -> Result<String, String> {
        self.data_url.clone()
    }
}

/// A plausible discrete GPU vendor/renderer pair by default; `blocked()`
/// simulates a headless/software-rendering backend with no debug info.
#[derive(Debug, Clone)]
pub struct FakeWebglProbe {
    pub info: Option<WebglInfo>,
    pub available: bool,
}

impl Default for FakeWebglProbe {
    fn default() -> Self {
        Self {
            info: Some(WebglInfo {
                vendor: "Google Inc. (NVIDIA)".into(),
                renderer: "ANGLE (NVIDIA, NVIDIA GeForce RTX 3070 Direct3D11 vs_5_0 ps_5_0)".into(),
            }),
            available: true,
        }
    }
}

impl FakeWebglProbe {
    pub fn blocked() -> Self {
        Self {
            info: None,
            available: false,
        }
    }
}

impl WebglProbe for FakeWebglProbe {
    fn debug_renderer_info(&self) -> Option<WebglInfo> {
        self.info.clone()
    }
    fn is_available(&self) -> bool {
        self.available
    }
}

/// Resolves `try_load` to `true` for a configured set of URLs (or every
/// URL, in `always_succeed` mode) and `false` otherwise.
#[derive(Debug, Default)]
pub struct FakeExtensionResourceLoader {
    succeed_urls: HashSet<String>,
    always_succeed: bool,
}

impl FakeExtensionResourceLoader {
    pub fn never() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn always() -> Arc<Self> {
        Arc::new(Self {
            succeed_urls: HashSet::new(),
            always_succeed: true,
        })
    }

    pub fn succeeding_for(urls: impl IntoIterator<Item = String>) -> Arc<Self> {
        Arc::new(Self {
            succeed_urls: urls.into_iter().collect(),
            always_succeed: false,
        })
    }
}

#[async_trait]
impl ExtensionResourceLoader for FakeExtensionResourceLoader {
    async fn try_load(&self, url: &str) -> bool {
        self.always_succeed || self.succeed_urls.contains(url)
    }
}
