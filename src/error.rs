//! Error types for SDK configuration.
//!
//! This module contains the error type returned when building an
//! [`EclConfig`](crate::EclConfig) or one of its validated newtypes.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use ecl_sdk::{ProjectId, ConfigError};
//!
//! let result = ProjectId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyProjectId)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Project ID cannot be empty.
    #[error("Project ID cannot be empty. Please provide the tenant/project the session acts for.")]
    EmptyProjectId,

    /// Auth token cannot be empty when one is supplied.
    #[error("Auth token cannot be empty. Omit the token instead of passing an empty string.")]
    EmptyAuthToken,

    /// Endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Expected an absolute URL with scheme (e.g., 'https://orchestration.example.com/v1/tenant').")]
    InvalidEndpointUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Endpoint interface name is not recognised.
    #[error("Invalid interface '{value}'. Expected one of 'public', 'internal' or 'admin'.")]
    InvalidInterface {
        /// The invalid interface string that was provided.
        value: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Request tries must be at least one.
    #[error("Invalid tries value {tries}. At least one attempt is required.")]
    InvalidTries {
        /// The rejected value.
        tries: u32,
    },
}
