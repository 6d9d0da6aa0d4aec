//! Shared value types used across every agentdetect crate.

use serde::{Deserialize, Serialize};

/// A 2D point in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A bounding rectangle, as `getBoundingClientRect()` would report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A small structural description of a DOM element, used everywhere a
/// record needs to reference "which element" without holding a live DOM
/// reference (see Design Notes: "Cyclic / DOM references in event records").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    pub tag: String,
    pub id: String,
    pub class: String,
    pub rect: Rect,
}

/// A stable, opaque identifier for a live DOM node within one page's
/// lifetime. Used only for same-page identity comparisons (e.g. "is this
/// click's target the same node as that hover's target"); never
/// serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(pub u64);

/// A single weighted anomaly observation. The `name` is the stable,
/// dotted identifier downstream scoring selects on — never rename one of
/// these once shipped, and never dispatch on anything but `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalySignal {
    pub name: String,
    pub value: f64,
    pub weight: u8,
}

impl AnomalySignal {
    pub fn new(name: impl Into<String>, value: f64, weight: u8) -> Self {
        debug_assert!((1..=10).contains(&weight), "weight out of [1,10]");
        Self {
            name: name.into(),
            value,
            weight,
        }
    }

    pub fn flag(name: impl Into<String>, weight: u8) -> Self {
        Self::new(name, 1.0, weight)
    }
}

/// Graded verdict derived from the combined score by fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    LikelyHuman,
    LowSuspicion,
    Suspicious,
    ProbableAgent,
    HighConfidenceAgent,
}

impl Verdict {
    /// Map an integer combined score in `[0,100]` to a verdict using the
    /// closed-interval thresholds from the spec.
    pub fn from_score(score: u32) -> Self {
        match score {
            80..=100 => Verdict::HighConfidenceAgent,
            60..=79 => Verdict::ProbableAgent,
            40..=59 => Verdict::Suspicious,
            20..=39 => Verdict::LowSuspicion,
            _ => Verdict::LikelyHuman,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::LikelyHuman => "LIKELY_HUMAN",
            Verdict::LowSuspicion => "LOW_SUSPICION",
            Verdict::Suspicious => "SUSPICIOUS",
            Verdict::ProbableAgent => "PROBABLE_AGENT",
            Verdict::HighConfidenceAgent => "HIGH_CONFIDENCE_AGENT",
        }
    }
}

/// The one agent brand this engine currently names directly when evidence
/// is conclusive.
pub const DETECTED_AGENT_COMET: &str = "comet_agentic";
