//! Core data types for inference results
//!
//! Defines tokens, predictions and sketch rankings as rendered by the client.
//! All values are transient: they are rebuilt from every server response.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Lower bound of a displayed confidence (percent)
pub const MIN_CONFIDENCE: f64 = 0.0;

/// Upper bound of a displayed confidence (percent)
pub const MAX_CONFIDENCE: f64 = 100.0;

/// Clamp a confidence value into the displayable `[0, 100]` range.
///
/// NaN is displayed as zero.
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_CONFIDENCE;
    }
    value.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

/// Descending order by confidence, NaN sorted last
fn by_confidence_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as a `#rrggbb` hex string
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse a `#rrggbb` hex string
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color: {}", s)))
    }
}

/// A token of the input text as segmented by the remote model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Vocabulary id assigned by the model
    pub id: i64,
    /// Decoded token text
    pub text: String,
    /// Display color, derived from the text
    pub color: Rgb,
}

/// A candidate for the masked position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedToken {
    pub text: String,
    /// Confidence in percent, as reported by the server
    pub confidence: f64,
    pub color: Rgb,
}

impl PredictedToken {
    /// Confidence clamped for display
    pub fn display_confidence(&self) -> f64 {
        clamp_confidence(self.confidence)
    }
}

/// Result of a masked-token request: the segmented input plus ranked candidates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaskPrediction {
    pub tokens: Vec<Token>,
    pub predictions: Vec<PredictedToken>,
}

impl MaskPrediction {
    /// Order predictions by descending confidence.
    ///
    /// The sort is stable, so equal confidences keep server order.
    pub fn sort_predictions(&mut self) {
        self.predictions
            .sort_by(|a, b| by_confidence_desc(a.confidence, b.confidence));
    }

    /// Highest-ranked prediction, if any
    pub fn best(&self) -> Option<&PredictedToken> {
        self.predictions.first()
    }
}

/// A single class label with its confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchLabel {
    pub label: String,
    /// Confidence in percent
    pub confidence: f64,
}

impl SketchLabel {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    pub fn display_confidence(&self) -> f64 {
        clamp_confidence(self.confidence)
    }
}

/// Ranked classification of a sketch, top-k only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SketchResult {
    pub labels: Vec<SketchLabel>,
}

impl SketchResult {
    /// Build a ranking from raw labels, keeping the `k` most confident
    pub fn top(mut labels: Vec<SketchLabel>, k: usize) -> Self {
        labels.sort_by(|a, b| by_confidence_desc(a.confidence, b.confidence));
        labels.truncate(k);
        Self { labels }
    }

    pub fn best(&self) -> Option<&SketchLabel> {
        self.labels.first()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
