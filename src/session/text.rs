//! Text session: one masked-token request per submitted line

use std::sync::Arc;

use crate::client::{ClientError, InferenceBackend};
use crate::model::{MaskPrediction, PredictedToken, Token};
use crate::palette::TokenPalette;

/// Request/render cycle for masked text.
///
/// Holds the palette, so token colors stay stable across submissions.
pub struct TextSession {
    backend: Arc<dyn InferenceBackend>,
    palette: TokenPalette,
    requests: u64,
}

impl TextSession {
    pub fn new(backend: Arc<dyn InferenceBackend>, palette: TokenPalette) -> Self {
        Self {
            backend,
            palette,
            requests: 0,
        }
    }

    /// Submit text to the service.
    ///
    /// Returns `Ok(None)` without sending anything when the text is empty or
    /// only whitespace. Predictions come back sorted by descending confidence.
    pub async fn process_text(
        &mut self,
        text: &str,
    ) -> Result<Option<MaskPrediction>, ClientError> {
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("skipping empty input");
            return Ok(None);
        }

        tracing::info!(input = %text, "processing text");
        self.requests += 1;
        let raw = self.backend.predict_masked(text).await?;

        let tokens = raw
            .tokens
            .into_iter()
            .map(|t| Token {
                color: self.palette.color_for(&t.text),
                id: t.id,
                text: t.text,
            })
            .collect();

        let predictions = raw
            .predictions
            .into_iter()
            .map(|p| PredictedToken {
                color: self.palette.color_for(&p.text),
                text: p.text,
                confidence: p.confidence,
            })
            .collect();

        let mut result = MaskPrediction {
            tokens,
            predictions,
        };
        result.sort_predictions();

        if let Some(best) = result.best() {
            tracing::info!(best = %best.text, confidence = best.confidence, "prediction received");
        }

        Ok(Some(result))
    }

    pub fn palette(&self) -> &TokenPalette {
        &self.palette
    }

    /// Number of requests sent by this session
    pub fn requests(&self) -> u64 {
        self.requests
    }
}
