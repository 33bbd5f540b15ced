//! Client error types

use thiserror::Error;

/// HTTP status the service uses to reject text without a mask marker
pub const MISSING_MASK_STATUS: u16 = 418;

/// Errors that can occur when talking to the inference service
#[derive(Error, Debug)]
pub enum ClientError {
    /// The input text has no `[MASK]` marker (HTTP 418)
    #[error("input text is missing [MASK]")]
    MissingMask,

    /// Any other non-success response
    #[error("{status} - {message}")]
    Api { status: u16, message: String },

    #[error("Inference service unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Classify a transport-level reqwest failure
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Unavailable
        } else {
            ClientError::Request(err)
        }
    }

    /// Build the error for a non-success status
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ClientError::Api {
            status,
            message: message.into(),
        }
    }

    /// Reinterpret an error from the masked-token endpoint, where HTTP 418
    /// means the text has no `[MASK]` marker
    pub fn for_mask_endpoint(self) -> Self {
        match self {
            ClientError::Api {
                status: MISSING_MASK_STATUS,
                ..
            } => ClientError::MissingMask,
            other => other,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
