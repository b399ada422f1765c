//! Regional carbon intensity forecasts from the Carbon Intensity API.

use {
    crate::{
        error::{Upstream, UpstreamError},
        models::{take_records, CarbonRecord},
        upstream_client::UpstreamClient,
        window::TimeWindow,
    },
    reqwest::Url,
};

/// Numeric region the forecast is always fetched for.
pub(crate) const REGION_ID: u32 = 13;

pub(crate) struct CarbonFeed {
    client: UpstreamClient,
}

impl CarbonFeed {
    pub(crate) fn new(base_url: Url) -> Self {
        Self {
            client: UpstreamClient::new(Upstream::CarbonIntensity, base_url),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_timeout(self, timeout: std::time::Duration) -> Self {
        Self {
            client: self.client.with_timeout(timeout),
        }
    }

    /// Intensity entries for [REGION_ID] within `window`, taken from the
    /// nested `data.data` array.
    pub(crate) async fn fetch_carbon(
        &self,
        window: &TimeWindow,
    ) -> Result<Vec<CarbonRecord>, UpstreamError> {
        let start = window.start_secs();
        let end = window.end_secs();
        let region_id = REGION_ID.to_string();

        let url = self.client.url_for([
            "regional",
            "intensity",
            start.as_str(),
            end.as_str(),
            "regionid",
            region_id.as_str(),
        ])?;

        let body = self.client.get_json(url, &[]).await?;

        Ok(take_records(body, "/data/data"))
    }
}
