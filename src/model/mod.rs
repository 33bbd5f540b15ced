//! Inference result model
//!
//! Transient values built from each server response:
//!
//! - [`Token`]: a segment of the input text with its model id
//! - [`PredictedToken`]: a candidate for the masked position
//! - [`SketchResult`]: ranked class labels for a drawing
//!
//! Confidences are percentages; use [`clamp_confidence`] before display.

mod types;

pub use types::{
    clamp_confidence, MaskPrediction, PredictedToken, Rgb, SketchLabel, SketchResult, Token,
    MAX_CONFIDENCE, MIN_CONFIDENCE,
};
