//! Error taxonomy for the agentdetect engine.
//!
//! None of these ever escape the engine's public surface (`init`,
//! `collectAndReport`, `runAnalysis`, `shutdown`): every fallible internal
//! operation is caught at its boundary and turned into a low-weight signal,
//! a swallowed no-op, or a suppressed report, per the propagation policy.

use thiserror::Error;

/// Result type alias for agentdetect operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Main error type for the agentdetect engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A Fingerprint sub-probe raised; recorded as a low-weight anomaly on
    /// that sub-probe, never propagated past the Fingerprint Collector.
    #[error("probe failure: {0}")]
    Probe(String),

    /// The tab-persistent store is unavailable or rejected a write.
    #[error("storage failure: {0}")]
    Storage(String),

    /// A single mutation record triggered an exception during analysis.
    #[error("mutation failure: {0}")]
    Mutation(String),

    /// The outbound RPC or unload beacon failed.
    #[error("transport failure: {0}")]
    Transport(String),

    /// `sessionKey` is missing from configuration; all reports are
    /// suppressed.
    #[error("configuration omission: {0}")]
    ConfigurationOmission(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    pub fn probe(msg: impl Into<String>) -> Self {
        Self::Probe(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn mutation(msg: impl Into<String>) -> Self {
        Self::Mutation(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn configuration_omission(msg: impl Into<String>) -> Self {
        Self::ConfigurationOmission(msg.into())
    }
}
