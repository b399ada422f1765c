//! Half-hourly electricity unit rates from the Octopus Energy API.

use {
    crate::{
        error::{Upstream, UpstreamError},
        models::{take_records, PriceRecord},
        upstream_client::UpstreamClient,
        window::TimeWindow,
    },
    reqwest::Url,
};

/// Pricing product version the tariff codes are built from.
pub(crate) const PRODUCT_CODE: &str = "AGILE-24-10-01";
/// Enough rates for the whole window in a single page.
pub(crate) const PAGE_SIZE: u32 = 2500;

/// Single-register electricity tariff of [PRODUCT_CODE] in `region`. The
/// region is not validated, unknown codes fail upstream.
pub(crate) fn tariff_code(region: &str) -> String {
    format!("E-1R-{PRODUCT_CODE}-{region}")
}

pub(crate) struct PriceFeed {
    client: UpstreamClient,
}

impl PriceFeed {
    pub(crate) fn new(base_url: Url) -> Self {
        Self {
            client: UpstreamClient::new(Upstream::Octopus, base_url),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_timeout(self, timeout: std::time::Duration) -> Self {
        Self {
            client: self.client.with_timeout(timeout),
        }
    }

    /// Unit rates for `region` within `window`, in upstream order. A body
    /// without a `results` array yields no records.
    pub(crate) async fn fetch_prices(
        &self,
        region: &str,
        window: &TimeWindow,
    ) -> Result<Vec<PriceRecord>, UpstreamError> {
        let tariff = tariff_code(region);
        let url = self.client.url_for([
            "products",
            PRODUCT_CODE,
            "electricity-tariffs",
            tariff.as_str(),
            "standard-unit-rates",
            "",
        ])?;

        let query = [
            ("period_from", window.start_millis()),
            ("period_to", window.end_millis()),
            ("page_size", PAGE_SIZE.to_string()),
        ];

        let body = self.client.get_json(url, &query).await?;

        Ok(take_records(body, "/results"))
    }
}
