//! Incoming request representation for functions

use {
    serde::{Deserialize, Serialize},
    std::collections::HashMap,
};

/// Represents one incoming HTTP request, independent of how it reached the
/// function (direct HTTP call or serverless event).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRequest {
    /// HTTP method (GET, POST, ...). Functions are free to ignore it.
    pub method: String,
    /// Request path as seen by the runtime.
    pub path: String,
    /// Decoded query parameters.
    #[serde(default)]
    pub query: HashMap<String, String>,
    /// HTTP headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Request body, if any.
    #[serde(default)]
    pub body: Option<String>,
}

impl FunctionRequest {
    /// Creates a `GET` request for the given path with no parameters.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            path: path.into(),
            query: HashMap::new(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Adds a query parameter (builder pattern).
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Get a query parameter.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Get a query parameter, treating an empty value like a missing one.
    pub fn non_empty_query_param(&self, key: &str) -> Option<&str> {
        self.query_param(key).filter(|value| !value.is_empty())
    }

    /// Get a header value (case-insensitive lookup).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

impl Default for FunctionRequest {
    fn default() -> Self {
        Self::get("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param_lookup() {
        let request = FunctionRequest::get("/").with_query("region", "A");

        assert_eq!(request.query_param("region"), Some("A"));
        assert_eq!(request.query_param("missing"), None);
    }

    #[test]
    fn test_empty_query_param_is_treated_as_missing() {
        let request = FunctionRequest::get("/").with_query("region", "");

        assert_eq!(request.query_param("region"), Some(""));
        assert_eq!(request.non_empty_query_param("region"), None);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut request = FunctionRequest::default();
        request
            .headers
            .insert("Content-Type".to_string(), "text/plain".to_string());

        assert_eq!(request.header("content-type"), Some("text/plain"));
        assert_eq!(request.header("CONTENT-TYPE"), Some("text/plain"));
    }
}
