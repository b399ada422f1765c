//! Upstream API client
//!
//! Thin wrapper around [reqwest::Client] shared by both feeds: builds URLs
//! under a base, bounds every exchange with a timeout and maps every failure
//! to an [UpstreamError].

use {
    crate::error::{Upstream, UpstreamError},
    reqwest::{Client, Url},
    serde_json::Value,
    std::time::Duration,
};

/// Time allowed for one complete exchange with an upstream, body included.
pub(crate) const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(20);

pub(crate) struct UpstreamClient {
    /// HTTP client for making requests
    client: Client,
    /// Base URL, paths are appended to it
    base_url: Url,
    upstream: Upstream,
    timeout: Duration,
}

impl UpstreamClient {
    pub(crate) fn new(upstream: Upstream, base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
            upstream,
            timeout: UPSTREAM_TIMEOUT,
        }
    }

    /// Overrides [UPSTREAM_TIMEOUT].
    #[cfg(test)]
    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Appends percent-encoded path segments to the base URL. An empty last
    /// segment produces a trailing slash.
    pub(crate) fn url_for<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidBaseUrl {
                upstream: self.upstream,
                base_url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// GETs `url` and parses the body as JSON.
    pub(crate) async fn get_json(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<Value, UpstreamError> {
        log::debug!("Requesting {} API: {}", self.upstream, url);

        let result = match tokio::time::timeout(self.timeout, self.send(url, query)).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout {
                upstream: self.upstream,
                timeout: self.timeout,
            }),
        };

        if let Err(e) = &result {
            log::warn!("{} API request failed: {}", self.upstream, e);
        }

        result
    }

    async fn send(&self, url: Url, query: &[(&str, String)]) -> Result<Value, UpstreamError> {
        let mut request = self.client.get(url);

        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        let status = response.status();

        if !status.is_success() {
            return Err(UpstreamError::Http {
                upstream: self.upstream,
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let text = response.text().await.map_err(|e| self.network_error(e))?;

        serde_json::from_str(&text).map_err(|source| UpstreamError::Parse {
            upstream: self.upstream,
            source,
        })
    }

    fn network_error(&self, e: reqwest::Error) -> UpstreamError {
        if e.is_timeout() {
            UpstreamError::Timeout {
                upstream: self.upstream,
                timeout: self.timeout,
            }
        } else {
            UpstreamError::Unexpected {
                upstream: self.upstream,
                source: e,
            }
        }
    }
}
