//! Serverless event adapter.
//!
//! Event gateways (Netlify functions, AWS Lambda proxy integrations) do not
//! forward raw HTTP requests. They hand the function a JSON event and expect
//! a JSON `{ statusCode, headers, body }` back. This module turns such an
//! event into a [`FunctionRequest`]; the reply side is the serialized
//! [`crate::FunctionResponse`].

use {
    crate::FunctionRequest,
    serde::{Deserialize, Serialize},
    std::collections::HashMap,
};

/// A serverless HTTP event. Every field is optional and may be `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FunctionEvent {
    pub http_method: Option<String>,
    pub path: Option<String>,
    pub query_string_parameters: Option<HashMap<String, String>>,
    pub headers: Option<HashMap<String, String>>,
    pub body: Option<String>,
}

impl FunctionEvent {
    /// Parses an event from arbitrary JSON. A `null` event is an empty event.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(serde_json::from_value::<Option<Self>>(value)?.unwrap_or_default())
    }

    /// Converts the event into a request, falling back to `default_path`
    /// when the event does not carry one.
    pub fn into_request(self, default_path: &str) -> FunctionRequest {
        FunctionRequest {
            method: self.http_method.unwrap_or_else(|| "GET".to_string()),
            path: self.path.unwrap_or_else(|| default_path.to_string()),
            query: self.query_string_parameters.unwrap_or_default(),
            headers: self.headers.unwrap_or_default(),
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    #[test]
    fn test_full_event_into_request() {
        let event = FunctionEvent::from_value(json!({
            "httpMethod": "POST",
            "path": "/get-data",
            "queryStringParameters": { "region": "A" },
            "headers": { "host": "localhost" },
            "body": "ignored"
        }))
        .unwrap();

        let request = event.into_request("/fallback");

        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/get-data");
        assert_eq!(request.query_param("region"), Some("A"));
        assert_eq!(request.header("Host"), Some("localhost"));
        assert_eq!(request.body.as_deref(), Some("ignored"));
    }

    #[test]
    fn test_null_query_string_parameters() {
        let event = FunctionEvent::from_value(json!({
            "queryStringParameters": null
        }))
        .unwrap();

        let request = event.into_request("/get-data");

        assert!(request.query.is_empty());
        assert_eq!(request.method, "GET");
        assert_eq!(request.path, "/get-data");
    }

    #[test]
    fn test_null_event_is_empty_event() {
        let event = FunctionEvent::from_value(serde_json::Value::Null).unwrap();

        assert_eq!(event, FunctionEvent::default());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let event = FunctionEvent::from_value(json!({
            "rawUrl": "https://example.com/get-data",
            "isBase64Encoded": false,
            "multiValueQueryStringParameters": { "region": ["B"] }
        }))
        .unwrap();

        assert_eq!(event, FunctionEvent::default());
    }

    #[test]
    fn test_non_object_event_is_rejected() {
        assert!(FunctionEvent::from_value(json!("region=C")).is_err());
        assert!(FunctionEvent::from_value(json!({ "queryStringParameters": "C" })).is_err());
    }
}
