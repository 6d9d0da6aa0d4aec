//! Stable `AnomalySignal` names emitted by this crate. Names are part of
//! the scoring vocabulary and are never renamed once shipped.

pub const WEBDRIVER_TRUE: &str = "webdriver.true";
pub const WEBDRIVER_CHANGED_MID_SESSION: &str = "webdriver.changed_mid_session";
pub const WEBDRIVER_GETTER_REPLACED: &str = "webdriver.getter_replaced";

pub const HEADLESS_EMPTY_PLUGINS: &str = "headless.empty_plugins";
pub const HEADLESS_EMPTY_LANGUAGES: &str = "headless.empty_languages";
pub const HEADLESS_MISSING_CHROME_GLOBAL: &str = "headless.missing_chrome_global";
pub const HEADLESS_UA_MATCH: &str = "headless.ua_match";
pub const HEADLESS_ZERO_OUTER_DIMS: &str = "headless.zero_outer_dims";
pub const HEADLESS_ZERO_SCREEN_DIMS: &str = "headless.zero_screen_dims";
pub const HEADLESS_MISSING_CONNECTION_API: &str = "headless.missing_connection_api";

pub const EXTENSIONS_KNOWN_ELEMENT: &str = "extensions.known_element";
pub const EXTENSIONS_KNOWN_STYLESHEET: &str = "extensions.known_stylesheet";
pub const EXTENSIONS_MCP_CLAUDE_GLOBAL: &str = "extensions.mcp_claude_global";
pub const EXTENSIONS_RESOURCES: &str = "extensions.resources";

pub const COMET_TAB_STORE_HIT: &str = "comet.tab_store_hit";
pub const COMET_SCRIPT_OR_LINK_MATCH: &str = "comet.script_or_link_match";
pub const COMET_STYLESHEET_MATCH: &str = "comet.stylesheet_match";
pub const COMET_RESOURCE_PROBE_HIT: &str = "comet.resource_probe_hit";

/// Reserved, never emitted directly by this crate — see DESIGN.md for the
/// resolved Open Question on where these two signals are computed
/// (agentdetect-analyzer, over recorder state, not here).
pub const COMET_ZERO_KEYSTROKES: &str = "comet.zero_keystrokes";
pub const COMET_LOW_PER_PAGE_MOUSE_RATIO: &str = "comet.low_per_page_mouse_ratio";

pub const PERPLEXITY_NETWORK_TARGET: &str = "perplexity.network_target";

pub const DOM_CDC_PROPERTY: &str = "dom.cdc_property";

pub const CANVAS_DATA_SHORT: &str = "canvas.data.short";
pub const CANVAS_ERROR: &str = "canvas.error";

pub const WEBGL_SOFTWARE_RENDERER: &str = "webgl.software_renderer";
pub const WEBGL_MISSING: &str = "webgl.missing";

pub const COMET_EXTENSION_ID: &str = "npclhjbddhklpbnacpjloidibaggcgon";
