//! # `get-data`
//!
//! Serverless function that fetches half-hourly electricity unit rates for a
//! region together with the regional carbon intensity forecast and returns
//! both in one JSON payload.
//!
//! ## Request
//!
//! Any method. The only input is the optional `region` query parameter
//! (defaults to `C` when missing or empty). The request body is ignored.
//!
//! ## Response
//!
//! `200` with `{ prices, carbon, region, timestamp }`, or `500` with
//! `{ error, type, stack }` when either upstream fails. Both carry
//! `Access-Control-Allow-Origin: *`.

use {
    crate::{
        clock::{Clock, SystemClock},
        config::Config,
        error::UpstreamError,
        feeds::{carbon::CarbonFeed, prices::PriceFeed},
        models::{ErrorPayload, ResponsePayload},
        window::{iso_millis, TimeWindow},
    },
    function_toolkit::*,
    std::sync::Arc,
};

/// Region used when the request does not name one.
pub(crate) const DEFAULT_REGION: &str = "C";

pub(crate) struct GetData {
    prices: PriceFeed,
    carbon: CarbonFeed,
    clock: Arc<dyn Clock>,
}

impl GetData {
    pub(crate) fn from_config(config: &Config) -> Self {
        Self {
            prices: PriceFeed::new(config.octopus_api_base.clone()),
            carbon: CarbonFeed::new(config.carbon_intensity_api_base.clone()),
            clock: Arc::new(SystemClock),
        }
    }

    #[cfg(test)]
    fn with_parts(prices: PriceFeed, carbon: CarbonFeed, clock: Arc<dyn Clock>) -> Self {
        Self {
            prices,
            carbon,
            clock,
        }
    }

    /// Fetches both feeds concurrently for one window computed from a single
    /// reading of the clock. The first failure wins and the other fetch is
    /// dropped.
    pub(crate) async fn aggregate(&self, region: &str) -> Result<ResponsePayload, UpstreamError> {
        let window = TimeWindow::around(self.clock.now());

        let (prices, carbon) = tokio::try_join!(
            self.prices.fetch_prices(region, &window),
            self.carbon.fetch_carbon(&window),
        )?;

        log::debug!(
            "Fetched {} prices and {} carbon entries for region {}",
            prices.len(),
            carbon.len(),
            region
        );

        Ok(ResponsePayload {
            prices,
            carbon,
            region: region.to_string(),
            timestamp: iso_millis(self.clock.now()),
        })
    }
}

impl ServerlessFunction for GetData {
    async fn new() -> Self {
        let config = Config::from_env().unwrap_or_else(|e| {
            log::warn!("Falling back to default configuration: {e:#}");
            Config::default()
        });

        Self::from_config(&config)
    }

    fn name() -> &'static str {
        "get-data"
    }

    fn description() -> &'static str {
        "Merges regional electricity unit rates with carbon intensity forecasts."
    }

    fn path() -> &'static str {
        "/get-data"
    }

    async fn health(&self) -> AnyResult<StatusCode> {
        Ok(StatusCode::OK)
    }

    async fn handle(&self, request: FunctionRequest) -> FunctionResponse {
        let region = request
            .non_empty_query_param("region")
            .unwrap_or(DEFAULT_REGION);

        match self.aggregate(region).await {
            Ok(payload) => FunctionResponse::json(200, &payload).with_cors("*"),
            Err(e) => {
                log::error!(
                    "Failed to fetch {} data for region {}: {}",
                    e.upstream(),
                    region,
                    e.trace()
                );

                FunctionResponse::json(500, &ErrorPayload::from(&e)).with_cors("*")
            }
        }
    }
}
