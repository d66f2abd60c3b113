//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated project (tenant) identifier.
///
/// The session exposes this value to proxies that need to scope requests to
/// the caller's tenant, such as the security order device listing.
///
/// # Example
///
/// ```rust
/// use ecl_sdk::ProjectId;
///
/// let project = ProjectId::new("7e91b19b9baa423793ee74a8e1ff2be1").unwrap();
/// assert_eq!(project.as_ref(), "7e91b19b9baa423793ee74a8e1ff2be1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a new validated project ID.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyProjectId`] if the ID is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(ConfigError::EmptyProjectId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A pre-issued authentication token.
///
/// The SDK does not obtain tokens; it only forwards one supplied by the
/// caller in the `X-Auth-Token` header.
///
/// # Security
///
/// The `Debug` implementation masks the token, displaying only
/// `AuthToken(*****)`.
///
/// # Example
///
/// ```rust
/// use ecl_sdk::AuthToken;
///
/// let token = AuthToken::new("gAAAAABk").unwrap();
/// assert_eq!(format!("{:?}", token), "AuthToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Creates a new validated auth token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAuthToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyAuthToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AuthToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(*****)")
    }
}

/// A validated service endpoint base URL.
///
/// The URL must be absolute (`http` or `https`) and have a non-empty host.
/// A trailing slash is removed so relative resource paths can be appended
/// directly.
///
/// # Serialization
///
/// `EndpointUrl` serializes to and deserializes from its string form:
///
/// ```rust
/// use ecl_sdk::EndpointUrl;
///
/// let url = EndpointUrl::new("https://orchestration.example.com/v1/").unwrap();
/// let json = serde_json::to_string(&url).unwrap();
/// assert_eq!(json, r#""https://orchestration.example.com/v1""#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointUrl {
    url: String,
    host_start: usize,
    host_end: usize,
}

impl EndpointUrl {
    /// Creates a new validated endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpointUrl`] if the URL is not an
    /// absolute `http`/`https` URL with a host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidEndpointUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(ConfigError::InvalidEndpointUrl { url });
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidEndpointUrl { url });
        }

        Ok(Self {
            url,
            host_start,
            host_end,
        })
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Joins a resource path onto this endpoint.
    ///
    /// The path may or may not start with `/`.
    ///
    /// ```rust
    /// use ecl_sdk::EndpointUrl;
    ///
    /// let url = EndpointUrl::new("https://api.example.com/v1").unwrap();
    /// assert_eq!(url.join("stacks"), "https://api.example.com/v1/stacks");
    /// assert_eq!(url.join("/stacks"), "https://api.example.com/v1/stacks");
    /// ```
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}

impl AsRef<str> for EndpointUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl Serialize for EndpointUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for EndpointUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_id_rejects_empty_string() {
        assert!(matches!(ProjectId::new(""), Err(ConfigError::EmptyProjectId)));
        assert!(matches!(
            ProjectId::new("   "),
            Err(ConfigError::EmptyProjectId)
        ));
    }

    #[test]
    fn test_project_id_trims_whitespace() {
        let project = ProjectId::new("  tenant-1 ").unwrap();
        assert_eq!(project.as_ref(), "tenant-1");
        assert_eq!(project.to_string(), "tenant-1");
    }

    #[test]
    fn test_auth_token_masks_value_in_debug() {
        let token = AuthToken::new("super-secret-token").unwrap();
        let debug_output = format!("{token:?}");
        assert_eq!(debug_output, "AuthToken(*****)");
        assert!(!debug_output.contains("super-secret-token"));
    }

    #[test]
    fn test_auth_token_rejects_empty_string() {
        assert!(matches!(AuthToken::new(""), Err(ConfigError::EmptyAuthToken)));
    }

    #[test]
    fn test_endpoint_url_validates_format() {
        let url = EndpointUrl::new("https://orchestration.example.com/v1/tenant").unwrap();
        assert_eq!(url.host_name(), "orchestration.example.com");

        let url = EndpointUrl::new("http://localhost:8004").unwrap();
        assert_eq!(url.host_name(), "localhost");
    }

    #[test]
    fn test_endpoint_url_strips_trailing_slash() {
        let url = EndpointUrl::new("https://api.example.com/v1.0/").unwrap();
        assert_eq!(url.as_ref(), "https://api.example.com/v1.0");
        assert_eq!(
            url.join("/virtual_network_appliances"),
            "https://api.example.com/v1.0/virtual_network_appliances"
        );
    }

    #[test]
    fn test_endpoint_url_rejects_invalid() {
        assert!(EndpointUrl::new("api.example.com").is_err());
        assert!(EndpointUrl::new("https://").is_err());
        assert!(EndpointUrl::new("ftp://files.example.com").is_err());
        assert!(EndpointUrl::new("://example.com").is_err());
    }

    #[test]
    fn test_endpoint_url_deserializes_from_string() {
        let url: EndpointUrl = serde_json::from_str(r#""https://api.example.com/""#).unwrap();
        assert_eq!(url.as_ref(), "https://api.example.com");

        let result: Result<EndpointUrl, _> = serde_json::from_str(r#""not-a-url""#);
        assert!(result.is_err());
    }
}
