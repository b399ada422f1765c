//! Payloads returned by the function

use {
    crate::error::UpstreamError,
    serde::{Deserialize, Serialize},
    serde_json::Value,
};

/// One unit rate as published by the price feed. Schema owned upstream.
pub(crate) type PriceRecord = Value;
/// One half-hourly intensity entry from the carbon feed. Schema owned upstream.
pub(crate) type CarbonRecord = Value;

/// Successful response body.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ResponsePayload {
    pub(crate) prices: Vec<PriceRecord>,
    pub(crate) carbon: Vec<CarbonRecord>,
    pub(crate) region: String,
    /// ISO-8601, UTC, millisecond precision.
    pub(crate) timestamp: String,
}

/// Failed response body.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ErrorPayload {
    pub(crate) error: String,
    #[serde(rename = "type")]
    pub(crate) kind: String,
    pub(crate) stack: Option<String>,
}

impl From<&UpstreamError> for ErrorPayload {
    fn from(error: &UpstreamError) -> Self {
        Self {
            error: error.to_string(),
            kind: error.kind().to_string(),
            stack: Some(error.trace()),
        }
    }
}

/// Takes the array found at `pointer` out of an upstream body. Anything else
/// (missing field, `null`, not an array) yields no records.
pub(crate) fn take_records(mut body: Value, pointer: &str) -> Vec<Value> {
    match body.pointer_mut(pointer).map(Value::take) {
        Some(Value::Array(records)) => records,
        _ => Vec::new(),
    }
}
