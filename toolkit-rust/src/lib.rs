//! # Function Toolkit
//!
//! The Function Toolkit is a Rust library that provides a trait to define a
//! serverless-style HTTP function. A function receives one
//! [`FunctionRequest`] per invocation and answers with one
//! [`FunctionResponse`]. The Toolkit automatically generates the endpoints
//! that expose the function over HTTP, both for direct calls and for
//! Netlify / AWS Lambda style event invocations.

mod event;
mod function;
mod request;
mod response;
mod runtime;

pub use {
    anyhow::Result as AnyResult,
    event::FunctionEvent,
    function::ServerlessFunction,
    request::FunctionRequest,
    response::FunctionResponse,
    runtime::{announce_, routes_for_},
    warp::{self, http::StatusCode},
};
