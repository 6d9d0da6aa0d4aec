//! # agentdetect-fingerprint
//!
//! The Fingerprint Collector (spec.md §4.2): a bounded set of synchronous
//! and asynchronous probes over the runtime environment, each emitting
//! `AnomalySignal`s that roll up into one composite [`Fingerprint`] report.

pub mod canvas;
pub mod collector;
pub mod extensions;
pub mod globals;
pub mod headless;
pub mod navigator;
pub mod ports;
pub mod registries;
pub mod report;
pub mod signals;
pub mod webdriver;
pub mod webgl;

pub use collector::FingerprintCollector;
pub use report::{Fingerprint, SignalGroup};
