//! Configuration types for the SDK.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`EclConfig`]: The configuration a [`HttpSession`](crate::HttpSession) is built from
//! - [`EclConfigBuilder`]: A builder for constructing [`EclConfig`] instances
//! - [`ProjectId`]: A validated project (tenant) identifier
//! - [`AuthToken`]: A pre-issued token with masked debug output
//! - [`EndpointUrl`]: A validated service base URL
//! - [`ServiceFilter`] and [`Interface`]: The service descriptor handed to proxies
//!
//! # Example
//!
//! ```rust
//! use ecl_sdk::{EclConfig, EndpointUrl, ProjectId};
//!
//! let config = EclConfig::builder()
//!     .project_id(ProjectId::new("tenant-1").unwrap())
//!     .endpoint("orchestration", EndpointUrl::new("https://heat.example.com/v1/tenant-1").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert!(config.endpoint("orchestration").is_some());
//! ```

mod newtypes;
mod service;

pub use newtypes::{AuthToken, EndpointUrl, ProjectId};
pub use service::{Interface, ServiceFilter};

use crate::error::ConfigError;
use std::collections::HashMap;

/// Configuration for an [`HttpSession`](crate::HttpSession).
///
/// Endpoints are a static map from service type to base URL; there is no
/// catalog discovery.
///
/// # Thread Safety
///
/// `EclConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct EclConfig {
    project_id: ProjectId,
    auth_token: Option<AuthToken>,
    endpoints: HashMap<String, EndpointUrl>,
    user_agent_prefix: Option<String>,
    tries: u32,
}

impl EclConfig {
    /// Creates a new builder for constructing an `EclConfig`.
    #[must_use]
    pub fn builder() -> EclConfigBuilder {
        EclConfigBuilder::new()
    }

    /// Returns the project ID.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Returns the auth token, if configured.
    #[must_use]
    pub const fn auth_token(&self) -> Option<&AuthToken> {
        self.auth_token.as_ref()
    }

    /// Returns the base URL registered for a service type.
    #[must_use]
    pub fn endpoint(&self, service_type: &str) -> Option<&EndpointUrl> {
        self.endpoints.get(service_type)
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns how many attempts a request gets before giving up.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }
}

// Verify EclConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EclConfig>();
};

/// Builder for constructing [`EclConfig`] instances.
///
/// `project_id` is required.
///
/// # Defaults
///
/// - `auth_token`: `None`
/// - `endpoints`: empty
/// - `user_agent_prefix`: `None`
/// - `tries`: `1` (no retries)
#[derive(Debug, Default)]
pub struct EclConfigBuilder {
    project_id: Option<ProjectId>,
    auth_token: Option<AuthToken>,
    endpoints: HashMap<String, EndpointUrl>,
    user_agent_prefix: Option<String>,
    tries: Option<u32>,
}

impl EclConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the project ID (required).
    #[must_use]
    pub fn project_id(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets the token forwarded in `X-Auth-Token`.
    #[must_use]
    pub fn auth_token(mut self, token: AuthToken) -> Self {
        self.auth_token = Some(token);
        self
    }

    /// Registers the base URL for a service type.
    ///
    /// Registering the same service type twice keeps the last URL.
    #[must_use]
    pub fn endpoint(mut self, service_type: impl Into<String>, url: EndpointUrl) -> Self {
        self.endpoints.insert(service_type.into(), url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets how many attempts a retryable request gets.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Builds the [`EclConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `project_id` is not
    /// set, or [`ConfigError::InvalidTries`] if `tries` is zero.
    pub fn build(self) -> Result<EclConfig, ConfigError> {
        let project_id = self.project_id.ok_or(ConfigError::MissingRequiredField {
            field: "project_id",
        })?;

        let tries = self.tries.unwrap_or(1);
        if tries == 0 {
            return Err(ConfigError::InvalidTries { tries });
        }

        Ok(EclConfig {
            project_id,
            auth_token: self.auth_token,
            endpoints: self.endpoints,
            user_agent_prefix: self.user_agent_prefix,
            tries,
        })
    }
}
