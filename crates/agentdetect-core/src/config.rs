//! Engine configuration, merged with defaults on `init`.

use serde::{Deserialize, Serialize};

/// Configuration for the detection engine. All fields are optional on the
/// wire (`EngineConfig::merge`) and fall back to `EngineConfig::default()`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Master switch. When `false`, `init` returns without side effects.
    pub enabled: bool,

    /// Periodic reporting period, in milliseconds.
    pub report_interval_ms: u64,

    /// Combined score below which reports are suppressed.
    pub min_report_score: u32,

    /// Opaque identifier scoping tab-persistent storage. `None` disables
    /// cross-page persistence (the Recorder still runs for the one page).
    pub context_id: Option<u64>,

    /// Opaque token attached to every report for server-side validation.
    /// Missing `session_key` triggers `ConfigurationOmission` and
    /// suppresses all reports.
    pub session_key: Option<String>,

    /// Emit diagnostic traces at `debug`/`trace` level.
    pub debug: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            report_interval_ms: 30_000,
            min_report_score: 10,
            context_id: None,
            session_key: None,
            debug: false,
        }
    }
}

impl EngineConfig {
    /// Merge a partially-specified configuration (e.g. parsed from host
    /// JSON) over the defaults. Fields present in `patch` win.
    pub fn merged(patch: EngineConfigPatch) -> Self {
        let mut cfg = Self::default();
        if let Some(v) = patch.enabled {
            cfg.enabled = v;
        }
        if let Some(v) = patch.report_interval_ms {
            cfg.report_interval_ms = v;
        }
        if let Some(v) = patch.min_report_score {
            cfg.min_report_score = v;
        }
        if let Some(v) = patch.context_id {
            cfg.context_id = Some(v);
        }
        if let Some(v) = patch.session_key {
            cfg.session_key = Some(v);
        }
        if let Some(v) = patch.debug {
            cfg.debug = v;
        }
        cfg
    }
}

/// A sparse configuration patch, the shape a host actually hands `init`.
/// Every field is optional; `None` means "use the default".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfigPatch {
    pub enabled: Option<bool>,
    pub report_interval_ms: Option<u64>,
    pub min_report_score: Option<u32>,
    pub context_id: Option<u64>,
    pub session_key: Option<String>,
    pub debug: Option<bool>,
}
