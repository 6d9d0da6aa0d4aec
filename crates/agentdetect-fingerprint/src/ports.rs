//! Runtime/environment ports the Fingerprint Collector probes against.
//! Each is a small trait seam so the scoring logic is unit-testable
//! without a real browser (mirrors how `rustkit-canvas`/`rustkit-webgl`
//! separate drawing-command construction from backend execution).

use async_trait::async_trait;
use std::collections::HashMap;

/// A structured navigator snapshot. Informational only — no direct score.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NavigatorSnapshot {
    pub user_agent: String,
    pub platform: String,
    pub hardware_concurrency: u32,
    pub device_memory: Option<f64>,
    pub max_touch_points: u32,
    pub languages: Vec<String>,
    pub cookie_enabled: bool,
    pub do_not_track: Option<String>,
    pub plugin_count: u32,
}

/// A DOM element as surfaced to the extension/marker scans: just enough
/// to pattern-match against, never a live reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementSummary {
    pub tag: String,
    pub id: String,
    pub class: String,
    pub attributes: HashMap<String, String>,
}

/// Vendor/renderer strings read through `WEBGL_debug_renderer_info`.
#[derive(Debug, Clone, PartialEq)]
pub struct WebglInfo {
    pub vendor: String,
    pub renderer: String,
}

/// The window/document/navigator surface the Fingerprint Collector reads.
/// A real host binding implements this against `web_sys`/`js_sys`; tests
/// implement it against a fixed fixture.
pub trait RuntimeEnvironment {
    fn navigator(&self) -> NavigatorSnapshot;

    /// `navigator.webdriver` read right now.
    fn webdriver_now(&self) -> bool;
    /// `navigator.webdriver` as captured once, at module load time.
    fn webdriver_at_load(&self) -> bool;
    /// Whether the `webdriver` getter's function body is still native code
    /// (i.e. untampered). `false` means it was replaced.
    fn webdriver_getter_is_native(&self) -> bool;

    fn outer_window_dims(&self) -> (f64, f64);
    fn screen_dims(&self) -> (f64, f64);
    fn has_chrome_global(&self) -> bool;
    fn has_connection_api(&self) -> bool;

    /// Names of every automation-related global actually present on
    /// `window` (checked against the static registry by the caller).
    fn window_global_names(&self) -> Vec<String>;
    /// `document`'s own enumerable property names, for the `cdc_`-prefix
    /// scan.
    fn document_own_property_names(&self) -> Vec<String>;

    /// Every element in the document, flattened, for the known-extension
    /// and DOM-marker scans.
    fn scan_elements(&self) -> Vec<ElementSummary>;
    /// `chrome-extension://`-scheme URLs found in stylesheets.
    fn stylesheet_extension_urls(&self) -> Vec<String>;
    /// `<script src>` / `<link href>` URLs.
    fn script_and_link_urls(&self) -> Vec<String>;
    /// `performance.getEntriesByType('resource')` entry names.
    fn resource_timing_names(&self) -> Vec<String>;
}

/// Renders the fixed canvas fingerprint sequence and returns its data URL.
pub trait CanvasProbe {
    fn render_data_url(&self) -> Result<String, String>;
}

/// Reads WebGL vendor/renderer through the debug extension.
pub trait WebglProbe {
    fn debug_renderer_info(&self) -> Option<WebglInfo>;
    fn is_available(&self) -> bool;
}

/// Attempts to load a single candidate extension-resource URL, resolving
/// `true` on success and `false` on any failure. The collector races up
/// to four of these concurrently with an overall 1-second timeout.
#[async_trait]
pub trait ExtensionResourceLoader: Send + Sync {
    async fn try_load(&self, url: &str) -> bool;
}
