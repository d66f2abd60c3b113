//! HTTP transport for the cloud service APIs.
//!
//! This module provides the transport layer proxies are built on. It handles
//! request/response processing, endpoint resolution, retry logic and the
//! classification of failed responses.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Session`]: The transport trait proxies are generic over
//! - [`HttpSession`]: The `reqwest` implementation of [`Session`]
//! - [`HttpRequest`]: A request to be sent to a service
//! - [`HttpResponse`]: A parsed response
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//! - [`DataType`]: Content types for request bodies
//!
//! # Retry Behavior
//!
//! [`HttpSession`] implements automatic retry logic for transient failures:
//!
//! - **429 (Rate Limited)**: Retries using `Retry-After` header value, or 1 second if not present
//! - **500 / 503**: Retries with fixed 1-second delay
//! - **Other errors (4xx)**: Returns immediately without retry
//!
//! The default `tries` is 1, meaning no automatic retries. Configure via
//! [`EclConfigBuilder::tries`](crate::EclConfigBuilder::tries).

mod errors;
mod http_request;
mod http_response;
mod http_session;
mod session;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{parse_next_link, HttpResponse};
pub use http_session::{HttpSession, RETRY_WAIT_TIME, SDK_VERSION};
pub use session::Session;
