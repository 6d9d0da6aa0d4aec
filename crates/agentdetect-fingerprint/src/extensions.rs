//! Known-extension scan, Perplexity Comet agent-extension probe, and the
//! network-target probe. spec.md §4.2 "Known extensions", "Agent extension
//! probe", "Network target probe".

use std::sync::Arc;
use std::time::Duration;

use agentdetect_core::types::AnomalySignal;
use agentdetect_dom::storage::TabStorage;

use crate::ports::{ExtensionResourceLoader, RuntimeEnvironment};
use crate::registries::{self, KNOWN_EXTENSIONS, MCP_CLAUDE_RUNTIME_GLOBALS};
use crate::report::SignalGroup;
use crate::signals;

const COMET_TAB_STORE_KEY: &str = "agentdetect_comet_detected";
const COMET_CANDIDATE_PATHS: &[&str] = &[
    "assets/icon-128.png",
    "images/logo.svg",
    "static/sidebar.js",
    "content/inject.css",
];
const COMET_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Known-extension DOM/stylesheet scan plus MCP/Claude runtime globals.
pub fn known_extensions_probe(env: &impl RuntimeEnvironment) -> SignalGroup {
    let mut group = SignalGroup::default();

    let elements = env.scan_elements();
    for ext in KNOWN_EXTENSIONS {
        if elements
            .iter()
            .any(|el| registries::element_matches_known_extension(el, ext))
        {
            group.push(AnomalySignal::new(
                signals::EXTENSIONS_KNOWN_ELEMENT,
                1.0,
                ext.weight,
            ));
        }
    }

    let stylesheet_urls = env.stylesheet_extension_urls();
    for ext in KNOWN_EXTENSIONS {
        if stylesheet_urls
            .iter()
            .any(|url| registries::stylesheet_matches(url, ext))
        {
            group.push(AnomalySignal::new(
                signals::EXTENSIONS_KNOWN_STYLESHEET,
                1.0,
                ext.weight,
            ));
        }
    }

    let globals = env.window_global_names();
    for (name, weight) in MCP_CLAUDE_RUNTIME_GLOBALS {
        if globals.iter().any(|g| g == name) {
            group.push(AnomalySignal::new(
                signals::EXTENSIONS_MCP_CLAUDE_GLOBAL,
                1.0,
                *weight,
            ));
        }
    }

    group
}

/// Perplexity Comet detection: tab-store cache, static URL scan, then the
/// async resource-load race.
pub async fn comet_probe(
    env: &impl RuntimeEnvironment,
    storage: &impl TabStorage,
    loader: Option<Arc<dyn ExtensionResourceLoader>>,
) -> SignalGroup {
    let mut group = SignalGroup::default();

    if let Some(cached) = storage.read(COMET_TAB_STORE_KEY) {
        if cached == "true" {
            group.push(AnomalySignal::new(signals::COMET_TAB_STORE_HIT, 1.0, 10));
            return group;
        }
    }

    let needle = format!("chrome-extension://{}/", signals::COMET_EXTENSION_ID);
    let script_hit = env
        .script_and_link_urls()
        .iter()
        .any(|url| url.contains(&needle));
    if script_hit {
        group.push(AnomalySignal::new(
            signals::COMET_SCRIPT_OR_LINK_MATCH,
            1.0,
            10,
        ));
    }

    let stylesheet_hit = env
        .stylesheet_extension_urls()
        .iter()
        .any(|url| url.contains(&needle));
    if stylesheet_hit {
        group.push(AnomalySignal::new(signals::COMET_STYLESHEET_MATCH, 1.0, 10));
    }

    if let Some(loader) = loader {
        let candidate_urls: Vec<String> = COMET_CANDIDATE_PATHS
            .iter()
            .map(|path| format!("chrome-extension://{}/{}", signals::COMET_EXTENSION_ID, path))
            .collect();

        let hit = race_resource_loads(loader, candidate_urls).await;
        if hit {
            group.push(AnomalySignal::new(signals::COMET_RESOURCE_PROBE_HIT, 1.0, 10));
            storage.write(COMET_TAB_STORE_KEY, "true".to_string());
        }
    }

    group
}

/// Races up to four resource-load attempts concurrently, resolving `true`
/// as soon as the first one succeeds, `false` if all fail or the
/// 1-second timeout elapses first.
async fn race_resource_loads(loader: Arc<dyn ExtensionResourceLoader>, urls: Vec<String>) -> bool {
    let mut set = tokio::task::JoinSet::new();
    for url in urls {
        let loader = Arc::clone(&loader);
        set.spawn(async move { loader.try_load(&url).await });
    }

    let race = async {
        while let Some(joined) = set.join_next().await {
            if matches!(joined, Ok(true)) {
                return true;
            }
        }
        false
    };

    tokio::time::timeout(COMET_PROBE_TIMEOUT, race)
        .await
        .unwrap_or(false)
}

pub fn network_target_probe(env: &impl RuntimeEnvironment) -> SignalGroup {
    let mut group = SignalGroup::default();
    let hit = env.resource_timing_names().iter().any(|name| {
        name.contains("perplexity.ai/agent") || name.contains("perplexity.ai/rest/sse")
    });
    if hit {
        group.push(AnomalySignal::new(signals::PERPLEXITY_NETWORK_TARGET, 1.0, 9));
    }
    group
}
