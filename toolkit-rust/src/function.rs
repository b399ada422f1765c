use {
    crate::{FunctionRequest, FunctionResponse},
    anyhow::Result as AnyResult,
    reqwest::Url,
    serde_json::{json, Value},
    std::future::Future,
    warp::http::StatusCode,
};

/// This trait defines the interface for a serverless function. It forces
/// implementation of the following methods:
///
/// - `new`: Builds the function for one invocation.
/// - `name`: Returns the function name.
/// - `handle`: Handles one request.
/// - `health`: Returns the health status of the function.
///
/// Based on the provided methods, the runtime automatically generates the
/// following endpoints under [`ServerlessFunction::path`]:
///
/// - `ANY /`: Invokes the function with the incoming HTTP request.
/// - `POST /invoke`: Invokes the function with a serverless event.
/// - `GET /health`: Returns the health status of the function.
/// - `GET /meta`: Returns the metadata of the function.
///
/// A fresh value is built with [`ServerlessFunction::new`] for every
/// invocation so that nothing is shared between two requests.
pub trait ServerlessFunction: Send + Sync + 'static {
    /// Builds the function. Called once per invocation.
    fn new() -> impl Future<Output = Self> + Send;
    /// Returns the name of the function.
    fn name() -> &'static str;
    /// Returns a one line description of the function.
    fn description() -> &'static str {
        ""
    }
    /// Handles one request. The function is responsible for the whole
    /// response, status and headers included, so it must never fail.
    fn handle(&self, request: FunctionRequest) -> impl Future<Output = FunctionResponse> + Send;
    /// Returns the health status of the function. For now, this only returns
    /// an HTTP status code.
    fn health(&self) -> impl Future<Output = AnyResult<StatusCode>> + Send;
    /// Returns the relative path on a webserver that the function resides
    /// on. This defaults to an empty path (root URL). But can be overriden by
    /// the implementor.
    fn path() -> &'static str {
        ""
    }
    /// Returns the metadata of the function.
    ///
    /// It is used to generate the `/meta` endpoint.
    fn meta(url: Url) -> Value {
        json!(
            {
                "name": Self::name(),
                "description": Self::description(),
                "url": url.to_string(),
            }
        )
    }
}
