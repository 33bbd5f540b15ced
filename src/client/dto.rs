//! Wire types of the inference service
//!
//! Response bodies as sent by the server, before colors are assigned.

use serde::{Deserialize, Serialize};

use crate::model::SketchLabel;

/// A token of the segmented input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawToken {
    pub id: i64,
    pub text: String,
}

/// A candidate for the masked position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    pub text: String,
    pub confidence: f64,
}

/// Body of a masked-token response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMaskResponse {
    #[serde(default)]
    pub tokens: Vec<RawToken>,
    #[serde(default)]
    pub predictions: Vec<RawPrediction>,
}

/// A ranked label as sent by the sketch endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSketchLabel {
    pub label: String,
    #[serde(alias = "confidence")]
    pub conf: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSketchTop {
    #[serde(default)]
    pub top: Vec<RawSketchLabel>,
}

/// Body of a sketch response.
///
/// Older servers return the ranking directly; newer ones wrap it as
/// `[{"top": [...]}]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SketchResponse {
    Flat(Vec<RawSketchLabel>),
    Wrapped(Vec<RawSketchTop>),
}

impl SketchResponse {
    pub fn into_labels(self) -> Vec<SketchLabel> {
        let raw = match self {
            SketchResponse::Flat(labels) => labels,
            SketchResponse::Wrapped(entries) => entries
                .into_iter()
                .next()
                .map(|entry| entry.top)
                .unwrap_or_default(),
        };

        raw.into_iter()
            .map(|l| SketchLabel::new(l.label, l.conf))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_response_ignores_extra_fields() {
        let body = r#"{
            "tokens": [{"id": 2, "text": "[CLS]"}, {"id": 4, "text": "[MASK]"}],
            "predictions": [{"text": "casa", "confidence": 41.2}],
            "model": "bert-base-italian-xxl-cased"
        }"#;
        let resp: RawMaskResponse = serde_json::from_str(body).unwrap();

        assert_eq!(resp.tokens.len(), 2);
        assert_eq!(resp.tokens[1].text, "[MASK]");
        assert_eq!(resp.predictions[0].confidence, 41.2);
    }

    #[test]
    fn test_mask_response_missing_lists() {
        let resp: RawMaskResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.tokens.is_empty());
        assert!(resp.predictions.is_empty());
    }

    #[test]
    fn test_flat_sketch_response() {
        let body = r#"[{"label": "cat", "conf": 80.5}, {"label": "dog", "conf": 10.0}]"#;
        let labels = serde_json::from_str::<SketchResponse>(body)
            .unwrap()
            .into_labels();

        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0], SketchLabel::new("cat", 80.5));
    }

    #[test]
    fn test_wrapped_sketch_response() {
        let body = r#"[{"top": [{"label": "house", "conf": 66.0}, {"label": "tent", "conf": 21.0}]}]"#;
        let labels = serde_json::from_str::<SketchResponse>(body)
            .unwrap()
            .into_labels();

        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].label, "house");
        assert_eq!(labels[1].confidence, 21.0);
    }

    #[test]
    fn test_empty_sketch_response() {
        let labels = serde_json::from_str::<SketchResponse>("[]")
            .unwrap()
            .into_labels();
        assert!(labels.is_empty());
    }

    #[test]
    fn test_sketch_response_rejects_garbage() {
        assert!(serde_json::from_str::<SketchResponse>(r#"{"label": "x"}"#).is_err());
    }
}
