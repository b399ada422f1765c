use {
    crate::{FunctionEvent, FunctionRequest, FunctionResponse, ServerlessFunction},
    reqwest::Url,
    serde_json::json,
    std::{collections::HashMap, net::SocketAddr},
    warp::{
        filters::{host::Authority, path::FullPath},
        http::{HeaderMap, Method, StatusCode},
        hyper::body::Bytes,
        Filter,
        Rejection,
        Reply,
    },
};

/// Macro to bootstrap the runtime for a set of functions. The macro generates
/// the necessary routes for each function and serves them on the provided
/// address.
///
/// # Examples
///
/// ### One function running on `127.0.0.1:8080`
///
/// ```ignore
/// use function_toolkit::bootstrap;
///
/// #[tokio::main]
/// async fn main() {
///     bootstrap!(YourFunction);
/// }
/// ```
///
/// ### Multiple functions running on the provided address
///
/// ```ignore
/// use function_toolkit::bootstrap;
///
/// #[tokio::main]
/// async fn main() {
///     bootstrap!(([127, 0, 0, 1], 8081), [YourFunction, AnotherFunction]);
/// }
/// ```
#[macro_export]
macro_rules! bootstrap {
    ($addr:expr, [$function:ty $(, $next_function:ty)* $(,)?]) => {{
        use {
            $crate::warp::{http::StatusCode, Filter},
        };

        // Create routes for each function in the bundle.
        let routes = $crate::routes_for_::<$function>();
        $(let routes = routes.or($crate::routes_for_::<$next_function>());)*

        // Add a default health route in case there is none in the root.
        let default_health_route = $crate::warp::get()
            .and($crate::warp::path("health"))
            .and($crate::warp::path::end())
            .map(|| $crate::warp::reply::with_status(String::new(), StatusCode::OK));

        let routes = routes
            .or(default_health_route)
            .with($crate::warp::log("function_toolkit::access"));

        let addr: ::std::net::SocketAddr = $addr.into();
        $crate::announce_(addr);

        // Serve the routes.
        $crate::warp::serve(routes).run(addr).await
    }};
    // Default address.
    ([$($function:ty),+ $(,)?]) => {
        $crate::bootstrap!(([127, 0, 0, 1], 8080), [$($function, )*])
    };
    // Only 1 function.
    ($addr:expr, $function:ty) => {
        $crate::bootstrap!($addr, [$function])
    };
    // Only 1 function with default address.
    ($function:ty) => {
        $crate::bootstrap!(([127, 0, 0, 1], 8080), [$function])
    };
}

/// Logs the address the runtime is about to listen on.
///
/// **This is an internal function used by [bootstrap!] macro and should not be
/// used directly.**
#[doc(hidden)]
pub fn announce_(addr: SocketAddr) {
    log::info!("Function runtime listening on http://{addr}");
}

/// This function generates the necessary routes for a given
/// [ServerlessFunction].
///
/// **This is an internal function used by [bootstrap!] macro and should not be
/// used directly.**
#[doc(hidden)]
pub fn routes_for_<T: ServerlessFunction>(
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let base_path = T::path()
        .split('/')
        .filter(|s| !s.is_empty())
        .fold(warp::any().boxed(), |filter, segment| {
            filter.and(warp::path(segment.to_string())).boxed()
        });

    let health_route = warp::get()
        .and(base_path.clone())
        .and(warp::path("health"))
        .and(warp::path::end())
        .and_then(health_handler::<T>);

    // Meta path is function base URL path and `/meta`.
    let meta_route = warp::get()
        .and(base_path.clone())
        .and(warp::path("meta"))
        .and(warp::path::end())
        .and(warp::filters::host::optional())
        .and(warp::path::full())
        .and_then(meta_handler::<T>);

    // Event path is function base URL path and `/invoke`.
    let invoke_route = warp::post()
        .and(base_path.clone())
        .and(warp::path("invoke"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and_then(invoke_handler::<T>);

    // The function itself answers on its base path, whatever the method.
    let handle_route = base_path
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::path::full())
        .and(warp::query::<HashMap<String, String>>())
        .and(warp::header::headers_cloned())
        .and(warp::body::bytes())
        .and_then(handle_handler::<T>);

    health_route
        .or(meta_route)
        .or(invoke_route)
        .or(handle_route)
}

/// Base path of the function, always starting with a slash.
fn base_path_of<T: ServerlessFunction>() -> String {
    format!("/{}", T::path().trim_matches('/'))
}

async fn health_handler<T: ServerlessFunction>() -> Result<impl Reply, Rejection> {
    let function = T::new().await;

    let status = function
        .health()
        .await
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    Ok(warp::reply::with_status("", status))
}

async fn meta_handler<T: ServerlessFunction>(
    host: Option<Authority>,
    path: FullPath,
) -> Result<impl Reply, Rejection> {
    // If the host is malformed or not present, return a 400.
    let host = match host {
        Some(host) => host,
        None => {
            let reply = json!({
                "error": "host_header_required",
                "details": "Host header is required.",
            });

            return Ok(warp::reply::with_status(
                warp::reply::json(&reply),
                StatusCode::BAD_REQUEST,
            ));
        }
    };

    // Stripping 'meta' suffix from the path will give us the base path.
    let base_path = match path.as_str().strip_suffix("meta") {
        Some(base_path) => base_path,
        None => {
            let reply = json!({
                "error": "invalid_path",
                "details": "Meta path must end with '/meta'.",
            });

            return Ok(warp::reply::with_status(
                warp::reply::json(&reply),
                StatusCode::BAD_REQUEST,
            ));
        }
    };

    // Assume `http` for localhost, otherwise use `https`.
    let scheme = if host.host() == "localhost" || host.host() == "127.0.0.1" {
        "http"
    } else {
        "https"
    };

    let url = match Url::parse(&format!("{scheme}://{host}{base_path}")) {
        Ok(url) => url,
        Err(e) => {
            let reply = json!({
                "error": "url_parsing_error",
                "details": e.to_string(),
            });

            return Ok(warp::reply::with_status(
                warp::reply::json(&reply),
                StatusCode::BAD_REQUEST,
            ));
        }
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&T::meta(url)),
        StatusCode::OK,
    ))
}

async fn invoke_handler<T: ServerlessFunction>(
    event: serde_json::Value,
) -> Result<impl Reply, Rejection> {
    // Deserialize the event payload into [FunctionEvent].
    let event = match FunctionEvent::from_value(event) {
        Ok(event) => event,
        Err(e) => {
            let reply = json!({
                "error": "event_deserialization_error",
                "details": e.to_string(),
            });

            // Reply with 422 if we can't parse the event data.
            return Ok(warp::reply::with_status(
                warp::reply::json(&reply),
                StatusCode::UNPROCESSABLE_ENTITY,
            ));
        }
    };

    let request = event.into_request(&base_path_of::<T>());

    log::debug!(
        "Invoking '{}' from event: {} {}",
        T::name(),
        request.method,
        request.path
    );

    let function = T::new().await;
    let response = function.handle(request).await;

    // The event gateway reads the function status from the payload, the
    // transport itself always succeeds.
    Ok(warp::reply::with_status(
        warp::reply::json(&response),
        StatusCode::OK,
    ))
}

async fn handle_handler<T: ServerlessFunction>(
    method: Method,
    path: FullPath,
    query: HashMap<String, String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl Reply, Rejection> {
    let request = FunctionRequest {
        method: method.to_string(),
        path: path.as_str().to_string(),
        query,
        headers: headers
            .iter()
            .filter_map(|(key, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (key.to_string(), value.to_string()))
            })
            .collect(),
        body: (!body.is_empty()).then(|| String::from_utf8_lossy(&body).into_owned()),
    };

    log::debug!(
        "Invoking '{}': {} {}",
        T::name(),
        request.method,
        request.path
    );

    let function = T::new().await;
    let response = function.handle(request).await;

    Ok(into_reply(T::name(), response))
}

/// Writes a [FunctionResponse] back as a plain HTTP response.
fn into_reply(name: &str, response: FunctionResponse) -> warp::http::Response<String> {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut builder = warp::http::Response::builder().status(status);

    for (key, value) in &response.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }

    builder.body(response.body).unwrap_or_else(|e| {
        log::error!("Function '{name}' returned a response that is not valid HTTP: {e}");

        let mut reply = warp::http::Response::new(String::new());
        *reply.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        reply
    })
}

#[cfg(test)]
mod tests {
    use {super::*, crate::AnyResult, serde_json::Value};

    /// Echoes the request back so tests can see what the runtime built.
    struct Echo;

    impl ServerlessFunction for Echo {
        async fn new() -> Self {
            Self
        }

        fn name() -> &'static str {
            "echo"
        }

        fn path() -> &'static str {
            "/api/echo/"
        }

        async fn handle(&self, request: FunctionRequest) -> FunctionResponse {
            let status = if request.query_param("fail").is_some() {
                500
            } else {
                200
            };

            FunctionResponse::json(status, &request).with_cors("*")
        }

        async fn health(&self) -> AnyResult<StatusCode> {
            Ok(StatusCode::OK)
        }
    }

    #[tokio::test]
    async fn test_direct_invocation_forwards_query_and_method() {
        let routes = routes_for_::<Echo>();

        let reply = warp::test::request()
            .method("DELETE")
            .path("/api/echo?region=A&empty=")
            .header("x-custom", "yes")
            .body("payload")
            .reply(&routes)
            .await;

        assert_eq!(reply.status(), 200);
        assert_eq!(reply.headers()["access-control-allow-origin"], "*");
        assert_eq!(reply.headers()["content-type"], "application/json");

        let echoed: FunctionRequest = serde_json::from_slice(reply.body()).unwrap();
        assert_eq!(echoed.method, "DELETE");
        assert_eq!(echoed.path, "/api/echo");
        assert_eq!(echoed.query_param("region"), Some("A"));
        assert_eq!(echoed.query_param("empty"), Some(""));
        assert_eq!(echoed.header("X-Custom"), Some("yes"));
        assert_eq!(echoed.body.as_deref(), Some("payload"));
    }

    #[tokio::test]
    async fn test_direct_invocation_keeps_function_status() {
        let routes = routes_for_::<Echo>();

        let reply = warp::test::request()
            .path("/api/echo?fail=1")
            .reply(&routes)
            .await;

        assert_eq!(reply.status(), 500);
        assert_eq!(reply.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn test_event_invocation_replies_in_gateway_shape() {
        let routes = routes_for_::<Echo>();

        let reply = warp::test::request()
            .method("POST")
            .path("/api/echo/invoke")
            .json(&json!({
                "httpMethod": "GET",
                "queryStringParameters": { "region": "B" }
            }))
            .reply(&routes)
            .await;

        assert_eq!(reply.status(), 200);

        let response: FunctionResponse = serde_json::from_slice(reply.body()).unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));

        let echoed: FunctionRequest = serde_json::from_str(&response.body).unwrap();
        assert_eq!(echoed.path, "/api/echo");
        assert_eq!(echoed.query_param("region"), Some("B"));
    }

    #[tokio::test]
    async fn test_event_invocation_with_null_event() {
        let routes = routes_for_::<Echo>();

        let reply = warp::test::request()
            .method("POST")
            .path("/api/echo/invoke")
            .json(&Value::Null)
            .reply(&routes)
            .await;

        assert_eq!(reply.status(), 200);

        let response: FunctionResponse = serde_json::from_slice(reply.body()).unwrap();
        let echoed: FunctionRequest = serde_json::from_str(&response.body).unwrap();
        assert!(echoed.query.is_empty());
        assert_eq!(echoed.method, "GET");
    }

    #[tokio::test]
    async fn test_422_when_event_malformed() {
        let routes = routes_for_::<Echo>();

        let reply = warp::test::request()
            .method("POST")
            .path("/api/echo/invoke")
            .json(&json!({ "queryStringParameters": ["not", "a", "map"] }))
            .reply(&routes)
            .await;

        assert_eq!(reply.status(), 422);

        let body: Value = serde_json::from_slice(reply.body()).unwrap();
        assert_eq!(body["error"], "event_deserialization_error");
    }

    #[tokio::test]
    async fn test_meta_and_health() {
        let routes = routes_for_::<Echo>();

        let meta = warp::test::request()
            .path("/api/echo/meta")
            .header("host", "localhost:8080")
            .reply(&routes)
            .await;

        assert_eq!(meta.status(), 200);

        let meta: Value = serde_json::from_slice(meta.body()).unwrap();
        assert_eq!(meta["name"], "echo");
        assert_eq!(meta["url"], "http://localhost:8080/api/echo/");

        let health = warp::test::request()
            .path("/api/echo/health")
            .reply(&routes)
            .await;

        assert_eq!(health.status(), 200);
    }

    #[tokio::test]
    async fn test_meta_requires_host() {
        let routes = routes_for_::<Echo>();

        let meta = warp::test::request()
            .path("/api/echo/meta")
            .reply(&routes)
            .await;

        assert_eq!(meta.status(), 400);
    }

    #[test]
    fn test_invalid_header_becomes_500() {
        let response = FunctionResponse::new(200).with_header("bad header\n", "x");

        let reply = into_reply("echo", response);

        assert_eq!(reply.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
