//! Inference Service Client
//!
//! Talks to the local inference service over HTTP.
//!
//! ## Endpoints
//!
//! - `POST {llm_path}`: `text/plain` body containing `[MASK]`, answers
//!   `{tokens, predictions}`; HTTP 418 when the marker is missing
//! - `POST {sketch_path}`: `image/jpeg` or `image/png` body, answers ranked
//!   `{label, conf}` entries
//!
//! Sessions depend on the [`InferenceBackend`] trait rather than on the HTTP
//! client directly.

mod dto;
mod error;
mod http;

pub use dto::{RawMaskResponse, RawPrediction, RawSketchLabel, RawToken, SketchResponse};
pub use error::{ClientError, MISSING_MASK_STATUS};
pub use http::{image_content_type, InferenceClient, REQUEST_ID_HEADER};

use async_trait::async_trait;

use crate::model::SketchLabel;

/// A service able to answer masked-token and sketch requests
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Predict candidates for the `[MASK]` position in `text`
    async fn predict_masked(&self, text: &str) -> Result<RawMaskResponse, ClientError>;

    /// Classify an encoded sketch image
    async fn classify_sketch(
        &self,
        image: Vec<u8>,
        content_type: &str,
    ) -> Result<Vec<SketchLabel>, ClientError>;
}
