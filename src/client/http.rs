//! Inference REST Client
//!
//! HTTP client for the masked-token and sketch endpoints.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use std::time::Duration;

use super::dto::{RawMaskResponse, SketchResponse};
use super::error::ClientError;
use super::InferenceBackend;
use crate::config::ServerConfig;
use crate::model::SketchLabel;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Pick the content type for an image body from its magic bytes.
///
/// Anything that is not PNG is sent as JPEG.
pub fn image_content_type(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&PNG_MAGIC) {
        "image/png"
    } else {
        "image/jpeg"
    }
}

/// Inference service REST client
pub struct InferenceClient {
    client: Client,
    config: ServerConfig,
}

impl InferenceClient {
    /// Create a new client with the given configuration
    pub fn new(config: ServerConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Check that the service answers HTTP at all.
    ///
    /// Returns the status of `GET {base_url}/`; any status counts as reachable.
    pub async fn health_check(&self) -> Result<u16, ClientError> {
        let response = self
            .client
            .get(&self.config.base_url)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        Ok(response.status().as_u16())
    }

    async fn post(
        &self,
        url: &str,
        content_type: &str,
        body: impl Into<reqwest::Body>,
    ) -> Result<Response, ClientError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(request_id = %request_id, url = %url, content_type, "sending request");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .header(REQUEST_ID_HEADER, &request_id)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(request_id = %request_id, error = %e, "request failed");
                ClientError::from_send(e)
            })?;

        let status = response.status();
        tracing::debug!(request_id = %request_id, status = status.as_u16(), "response received");

        if status.is_success() {
            return Ok(response);
        }

        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let text = response.text().await.unwrap_or_default();
        let message = if text.trim().is_empty() { reason } else { text };
        Err(ClientError::api(status.as_u16(), message))
    }
}

#[async_trait]
impl InferenceBackend for InferenceClient {
    async fn predict_masked(&self, text: &str) -> Result<RawMaskResponse, ClientError> {
        let url = self.config.llm_url();
        let response = self
            .post(&url, "text/plain", text.to_string())
            .await
            .map_err(ClientError::for_mask_endpoint)?;

        let bytes = response.bytes().await.map_err(ClientError::from_send)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn classify_sketch(
        &self,
        image: Vec<u8>,
        content_type: &str,
    ) -> Result<Vec<SketchLabel>, ClientError> {
        let url = self.config.sketch_url();
        let response = self.post(&url, content_type, image).await?;

        let bytes = response.bytes().await.map_err(ClientError::from_send)?;
        let parsed: SketchResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed.into_labels())
    }
}
