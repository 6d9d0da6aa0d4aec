//! # agentdetect-transport
//!
//! The outbound reporting RPC and unload-beacon client (spec.md §4.5,
//! §6), built on `reqwest` the way `rustkit-http` wraps it for the
//! browser engine this workspace is modeled on.

pub mod client;
pub mod payload;

pub use client::{HttpReportClient, ReportClient};
pub use payload::{ReportPayload, SignalType};
