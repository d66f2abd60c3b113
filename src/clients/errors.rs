//! HTTP-specific error types.
//!
//! This module contains error types for HTTP operations, including response
//! errors, retry exhaustion, and request validation failures.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: The diagnostic record of a failed call
//! - [`MaxHttpRetriesExceededError`]: When retry attempts are exhausted
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use ecl_sdk::{HttpError, Session};
//!
//! match session.get("/stacks", &filter, None).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::NotFound(e)) => println!("Gone: {}", e.details_or_message()),
//!     Err(HttpError::Response(e)) => {
//!         println!("API error {:?}: {}", e.http_status, e.message);
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use crate::clients::http_request::HttpMethod;
use serde_json::Value;
use thiserror::Error;

/// Diagnostic record attached to every error raised for a failed call.
///
/// All fields except `message` are optional because errors can be raised
/// before a request is sent (for example during validation), in which case
/// there is no status, URL or response.
///
/// # Example
///
/// ```rust
/// use ecl_sdk::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     message: "No Stack found for demo".to_string(),
///     details: Some("Stack not found".to_string()),
///     http_status: Some(404),
///     ..Default::default()
/// };
///
/// assert_eq!(error.to_string(), "No Stack found for demo");
/// ```
#[derive(Debug, Error, Default)]
#[error("{message}")]
pub struct HttpResponseError {
    /// Human readable summary.
    pub message: String,
    /// Detail text extracted from the response body.
    pub details: Option<String>,
    /// The HTTP status code of the response.
    pub http_status: Option<u16>,
    /// Request ID reported by the server.
    pub request_id: Option<String>,
    /// The URL that was requested.
    pub url: Option<String>,
    /// The HTTP method that was used.
    pub method: Option<HttpMethod>,
    /// The raw response body, if one was received.
    pub response: Option<Value>,
    /// The underlying error, if any.
    #[source]
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl HttpResponseError {
    /// Creates an error record with only a message.
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Returns `details` when present and non-empty, otherwise `message`.
    #[must_use]
    pub fn details_or_message(&self) -> &str {
        match self.details.as_deref() {
            Some(details) if !details.is_empty() => details,
            _ => &self.message,
        }
    }
}

/// Error returned when maximum retry attempts have been exhausted.
///
/// Raised when a request keeps failing with 429, 500 or 503 responses after
/// all configured tries.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {}", last.message)]
pub struct MaxHttpRetriesExceededError {
    /// The number of tries that were attempted.
    pub tries: u32,
    /// The error produced by the final attempt.
    #[source]
    pub last: HttpResponseError,
}

/// Error returned when an HTTP request fails validation.
///
/// # Example
///
/// ```rust
/// use ecl_sdk::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "put".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use put without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A PUT or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// No base URL is configured for the requested service.
    #[error("No endpoint configured for service type '{service_type}'.")]
    UnknownEndpoint {
        /// The service type that could not be resolved.
        service_type: String,
    },
}

/// Unified error type for all HTTP-related errors.
///
/// A 404 response is reported as [`HttpError::NotFound`] so callers can tell
/// absence apart from other failures without inspecting the status code.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The server reported that the target does not exist (404).
    #[error("{0}")]
    NotFound(HttpResponseError),

    /// Any other non-2xx response.
    #[error("{0}")]
    Response(HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns `true` if the server reported the target as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns the diagnostic record if the error came from a response.
    #[must_use]
    pub const fn response_error(&self) -> Option<&HttpResponseError> {
        match self {
            Self::NotFound(e) | Self::Response(e) => Some(e),
            Self::MaxRetries(e) => Some(&e.last),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }

    /// Returns the HTTP status of the failed response, if any.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        self.response_error().and_then(|e| e.http_status)
    }

    /// Returns the server request ID, if any.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.response_error().and_then(|e| e.request_id.as_deref())
    }
}
