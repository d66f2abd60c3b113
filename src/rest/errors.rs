//! Error types for resource operations.
//!
//! # Error Handling
//!
//! Transport errors are lifted into [`ResourceError`] as follows:
//!
//! - **404**: [`ResourceError::NotFound`] - Resource doesn't exist
//! - **Everything else**: [`ResourceError::Http`] - Wrapped HTTP error
//!
//! The remaining variants are raised locally before or after a call:
//! capability checks, identifier resolution, path building and typed
//! deserialization.
//!
//! # Example
//!
//! ```rust,ignore
//! use ecl_sdk::rest::ResourceError;
//!
//! match proxy.get_stack("web").await {
//!     Ok(stack) => println!("Found: {:?}", stack.get("stack_status")),
//!     Err(ResourceError::NotFound(e)) => {
//!         println!("{} ({})", e.message, e.details_or_message());
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use crate::clients::{HttpError, HttpResponseError};
use crate::rest::path::ResourceOperation;
use thiserror::Error;

/// Error type for resource operations.
///
/// Variants wrapping [`HttpResponseError`] carry the full diagnostic record:
/// message, details, HTTP status, request ID, URL, method and raw response.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The server reported that the resource does not exist.
    #[error("{0}")]
    NotFound(HttpResponseError),

    /// A name lookup matched more than one resource.
    #[error("{0}")]
    Duplicate(HttpResponseError),

    /// The schema does not allow the operation.
    #[error("The {resource} resource does not support the {operation} method")]
    MethodNotSupported {
        /// The type name of the resource.
        resource: &'static str,
        /// The rejected operation.
        operation: ResourceOperation,
    },

    /// The caller's input was rejected before any call was made.
    #[error("{0}")]
    InvalidRequest(HttpResponseError),

    /// No identifier could be resolved for the resource.
    #[error("Unable to determine the identifier of this {resource}")]
    Identity {
        /// The type name of the resource.
        resource: &'static str,
    },

    /// A URI template placeholder had no value.
    #[error("Cannot resolve path for {resource}: missing parameter '{param}'")]
    PathResolutionFailed {
        /// The type name of the resource.
        resource: &'static str,
        /// The placeholder without a value.
        param: String,
    },

    /// Attributes could not be converted into the requested type.
    #[error("Failed to deserialize {resource}: {source}")]
    Deserialize {
        /// The type name of the resource.
        resource: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// Any other HTTP-level failure.
    #[error(transparent)]
    Http(HttpError),
}

impl From<HttpError> for ResourceError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::NotFound(e) => Self::NotFound(e),
            other => Self::Http(other),
        }
    }
}

impl ResourceError {
    /// Creates an [`ResourceError::InvalidRequest`] with only a message.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(HttpResponseError::with_message(message))
    }

    /// Returns `true` for [`ResourceError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns the diagnostic record, if the error carries one.
    #[must_use]
    pub const fn response_error(&self) -> Option<&HttpResponseError> {
        match self {
            Self::NotFound(e) | Self::Duplicate(e) | Self::InvalidRequest(e) => Some(e),
            Self::Http(e) => e.response_error(),
            Self::MethodNotSupported { .. }
            | Self::Identity { .. }
            | Self::PathResolutionFailed { .. }
            | Self::Deserialize { .. } => None,
        }
    }

    /// Returns the detail text, if any.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.response_error().and_then(|e| e.details.as_deref())
    }

    /// Returns the server request ID, if any.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.response_error().and_then(|e| e.request_id.as_deref())
    }

    /// Returns the HTTP status, if any.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        self.response_error().and_then(|e| e.http_status)
    }
}

/// Re-raises a not-found error with resource-specific context.
///
/// The message becomes `No {resource} found for {id}`. Status, request ID,
/// URL, method and response are kept; the original message is used as the
/// details when the server supplied none. Any other error is returned
/// unchanged.
///
/// # Example
///
/// ```rust
/// use ecl_sdk::clients::HttpResponseError;
/// use ecl_sdk::rest::{remap_not_found, ResourceError};
///
/// let original = ResourceError::NotFound(HttpResponseError {
///     message: "DELETE https://heat/stacks/web/1/abandon failed with status 404".to_string(),
///     details: Some("The Stack (web) could not be found.".to_string()),
///     http_status: Some(404),
///     request_id: Some("req-1".to_string()),
///     ..Default::default()
/// });
///
/// let remapped = remap_not_found(original, "stack", "web");
/// assert_eq!(remapped.to_string(), "No stack found for web");
/// assert_eq!(remapped.details(), Some("The Stack (web) could not be found."));
/// assert_eq!(remapped.request_id(), Some("req-1"));
/// ```
#[must_use]
pub fn remap_not_found(error: ResourceError, resource: &str, id: &str) -> ResourceError {
    match error {
        ResourceError::NotFound(e) => ResourceError::NotFound(HttpResponseError {
            message: format!("No {resource} found for {id}"),
            details: Some(
                e.details
                    .filter(|details| !details.is_empty())
                    .unwrap_or(e.message),
            ),
            ..e
        }),
        other => other,
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
