//! Error types for the upstream feeds

use {
    std::{error::Error as StdError, fmt, time::Duration},
    thiserror::Error,
};

/// The third-party APIs this function reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Upstream {
    Octopus,
    CarbonIntensity,
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Upstream::Octopus => write!(f, "Octopus"),
            Upstream::CarbonIntensity => write!(f, "Carbon Intensity"),
        }
    }
}

/// Why fetching one of the feeds failed.
#[derive(Debug, Error)]
pub(crate) enum UpstreamError {
    #[error("{upstream} API error: {status} {status_text}")]
    Http {
        upstream: Upstream,
        status: u16,
        status_text: String,
    },

    #[error("{upstream} API did not respond within {timeout:?}")]
    Timeout {
        upstream: Upstream,
        timeout: Duration,
    },

    #[error("{upstream} API returned invalid JSON: {source}")]
    Parse {
        upstream: Upstream,
        #[source]
        source: serde_json::Error,
    },

    #[error("{upstream} API request failed: {source}")]
    Unexpected {
        upstream: Upstream,
        #[source]
        source: reqwest::Error,
    },

    #[error("{upstream} API base URL cannot carry a path: {base_url}")]
    InvalidBaseUrl { upstream: Upstream, base_url: String },
}

impl UpstreamError {
    /// Error kind reported to callers in the `type` field.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Http { .. } => "UpstreamHTTPError",
            UpstreamError::Timeout { .. } => "UpstreamTimeoutError",
            UpstreamError::Parse { .. } => "UpstreamParseError",
            UpstreamError::Unexpected { .. } | UpstreamError::InvalidBaseUrl { .. } => {
                "UnexpectedError"
            }
        }
    }

    /// Which feed failed.
    pub(crate) fn upstream(&self) -> Upstream {
        match self {
            UpstreamError::Http { upstream, .. }
            | UpstreamError::Timeout { upstream, .. }
            | UpstreamError::Parse { upstream, .. }
            | UpstreamError::Unexpected { upstream, .. }
            | UpstreamError::InvalidBaseUrl { upstream, .. } => *upstream,
        }
    }

    /// Diagnostic trace: the error itself followed by its chain of sources.
    /// Meant for humans, the layout is not stable.
    pub(crate) fn trace(&self) -> String {
        let mut trace = format!("{}: {}", self.kind(), self);
        let mut source = self.source();

        while let Some(cause) = source {
            trace.push_str(&format!("\n    caused by: {cause}"));
            source = cause.source();
        }

        trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message_carries_status() {
        let error = UpstreamError::Http {
            upstream: Upstream::Octopus,
            status: 503,
            status_text: "Service Unavailable".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Octopus API error: 503 Service Unavailable"
        );
        assert_eq!(error.kind(), "UpstreamHTTPError");
        assert_eq!(error.upstream(), Upstream::Octopus);
    }

    #[test]
    fn test_timeout_error() {
        let error = UpstreamError::Timeout {
            upstream: Upstream::CarbonIntensity,
            timeout: Duration::from_secs(20),
        };

        assert_eq!(
            error.to_string(),
            "Carbon Intensity API did not respond within 20s"
        );
        assert_eq!(error.kind(), "UpstreamTimeoutError");
    }

    #[test]
    fn test_parse_error_trace_includes_source() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let error = UpstreamError::Parse {
            upstream: Upstream::Octopus,
            source,
        };

        let trace = error.trace();

        assert_eq!(error.kind(), "UpstreamParseError");
        assert!(trace.starts_with("UpstreamParseError: Octopus API returned invalid JSON"));
        assert!(trace.contains("caused by: expected value"));
    }

    #[test]
    fn test_invalid_base_url_is_unexpected() {
        let error = UpstreamError::InvalidBaseUrl {
            upstream: Upstream::CarbonIntensity,
            base_url: "mailto:ops@example.com".to_string(),
        };

        assert_eq!(error.kind(), "UnexpectedError");
        assert_eq!(error.trace().lines().count(), 1);
    }
}
