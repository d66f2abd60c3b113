//! Service descriptors.
//!
//! A [`ServiceFilter`] names the remote service a proxy talks to. The session
//! uses it to pick the base URL for relative request URIs.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// The endpoint interface a service is reached through.
///
/// # Example
///
/// ```rust
/// use ecl_sdk::Interface;
///
/// let interface: Interface = "internal".parse().unwrap();
/// assert_eq!(interface, Interface::Internal);
/// assert_eq!(Interface::default().to_string(), "public");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Interface {
    /// The publicly reachable endpoint.
    #[default]
    Public,
    /// The endpoint reachable from inside the provider network.
    Internal,
    /// The administrative endpoint.
    Admin,
}

impl Interface {
    /// Returns the lowercase name of the interface.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interface {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" | "publicurl" => Ok(Self::Public),
            "internal" | "internalurl" => Ok(Self::Internal),
            "admin" | "adminurl" => Ok(Self::Admin),
            _ => Err(ConfigError::InvalidInterface {
                value: s.to_string(),
            }),
        }
    }
}

/// Immutable descriptor of the service a proxy is bound to.
///
/// Each typed proxy owns one of these and passes it with every request.
///
/// # Example
///
/// ```rust
/// use ecl_sdk::{Interface, ServiceFilter};
///
/// let filter = ServiceFilter::new("orchestration").with_version("v1");
/// assert_eq!(filter.service_type(), "orchestration");
/// assert_eq!(filter.version(), Some("v1"));
/// assert_eq!(filter.interface(), Interface::Public);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ServiceFilter {
    service_type: String,
    version: Option<String>,
    interface: Interface,
}

impl ServiceFilter {
    /// Creates a filter for the given service type on the public interface.
    #[must_use]
    pub fn new(service_type: impl Into<String>) -> Self {
        Self {
            service_type: service_type.into(),
            version: None,
            interface: Interface::Public,
        }
    }

    /// Sets the API version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the endpoint interface.
    #[must_use]
    pub const fn with_interface(mut self, interface: Interface) -> Self {
        self.interface = interface;
        self
    }

    /// Returns the service type, e.g. `"orchestration"`.
    #[must_use]
    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    /// Returns the requested API version, if any.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the endpoint interface.
    #[must_use]
    pub const fn interface(&self) -> Interface {
        self.interface
    }
}

impl fmt::Display for ServiceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}/{} ({})", self.service_type, version, self.interface),
            None => write!(f, "{} ({})", self.service_type, self.interface),
        }
    }
}
