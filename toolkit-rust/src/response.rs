//! Outgoing response representation for functions

use {
    serde::{Deserialize, Serialize},
    std::collections::HashMap,
};

/// Represents one outgoing HTTP response.
///
/// The serialized form is the one expected by serverless event gateways:
///
/// ```json
/// { "statusCode": 200, "headers": { "Content-Type": "application/json" }, "body": "{...}" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    /// HTTP status code
    pub status_code: u16,
    /// Response headers
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Response body, already serialized
    #[serde(default)]
    pub body: String,
}

impl FunctionResponse {
    /// Create a new response with the given status code and an empty body.
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            headers: HashMap::new(),
            body: String::new(),
        }
    }

    /// Create a JSON response with a custom status code.
    ///
    /// # Example
    /// ```ignore
    /// FunctionResponse::json(200, &json!({"message": "Success"}))
    /// ```
    pub fn json<T: Serialize>(status_code: u16, body: &T) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self::new(status_code)
                .with_header("Content-Type", "application/json")
                .with_body(body),
            Err(e) => Self::new(500)
                .with_header("Content-Type", "application/json")
                .with_body(
                    serde_json::json!({
                        "error": "response_serialization_error",
                        "details": e.to_string(),
                    })
                    .to_string(),
                ),
        }
    }

    /// Add a header to the response (builder pattern).
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the body (builder pattern).
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Allow cross-origin reads from the given origin.
    ///
    /// # Example
    /// ```ignore
    /// FunctionResponse::json(200, &data).with_cors("*")
    /// ```
    pub fn with_cors(self, origin: impl Into<String>) -> Self {
        self.with_header("Access-Control-Allow-Origin", origin)
    }

    /// Get a header value (case-insensitive lookup).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
