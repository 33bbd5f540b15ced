//! JSON output

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    kind: &'static str,
    received_at: DateTime<Utc>,
    #[serde(flatten)]
    payload: &'a T,
}

/// Serialize a result as one JSON line tagged with its kind and arrival time
pub fn to_json<T: Serialize>(kind: &'static str, payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Envelope {
        kind,
        received_at: Utc::now(),
        payload,
    })
}
