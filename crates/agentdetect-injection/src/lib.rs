//! # agentdetect-injection
//!
//! The Injection Observer (spec.md §4.3): detects injected UI — AI/
//! homework-helper overlays and agent-extension artifacts — via an
//! initial DOM scan plus a live mutation feed.

pub mod finding;
pub mod observer;
pub mod registries;
pub mod scanner;
pub mod scoring;

pub use finding::{InjectionFinding, InjectionReport};
pub use observer::InjectionObserver;
