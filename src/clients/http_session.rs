//! `reqwest`-backed [`Session`] implementation.

use std::collections::HashMap;

use crate::clients::errors::{
    HttpError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::session::Session;
use crate::config::{EclConfig, ServiceFilter};

/// Fixed retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP session for the cloud service APIs.
///
/// The session handles:
/// - Endpoint resolution from the configured service map
/// - Default headers including User-Agent and `X-Auth-Token`
/// - Automatic retry logic for 429, 500 and 503 responses when `tries > 1`
/// - Classification of non-2xx responses into [`HttpError`]
///
/// # Thread Safety
///
/// `HttpSession` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use ecl_sdk::{EclConfig, EndpointUrl, HttpSession, ProjectId, AuthToken};
///
/// let config = EclConfig::builder()
///     .project_id(ProjectId::new("tenant-1")?)
///     .auth_token(AuthToken::new(token)?)
///     .endpoint("orchestration", EndpointUrl::new("https://heat.example.com/v1/tenant-1")?)
///     .build()?;
///
/// let session = HttpSession::new(config)?;
/// ```
#[derive(Debug)]
pub struct HttpSession {
    client: reqwest::Client,
    config: EclConfig,
    default_headers: HashMap<String, String>,
}

// Verify HttpSession is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpSession>();
};

impl HttpSession {
    /// Creates a new session from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (for example when TLS initialisation fails).
    pub fn new(config: EclConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!("{user_agent_prefix}ecl-sdk v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        if let Some(token) = config.auth_token() {
            default_headers.insert("X-Auth-Token".to_string(), token.as_ref().to_string());
        }

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            config,
            default_headers,
        })
    }

    /// Returns the configuration this session was built from.
    #[must_use]
    pub const fn config(&self) -> &EclConfig {
        &self.config
    }

    /// Returns the default headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Resolves the full URL of a request.
    ///
    /// Absolute URIs are returned unchanged; relative ones are joined onto
    /// the endpoint registered for the service type.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::UnknownEndpoint`] when no endpoint
    /// is registered for the service.
    pub fn resolve_url(
        &self,
        request: &HttpRequest,
        service: &ServiceFilter,
    ) -> Result<String, InvalidHttpRequestError> {
        if request.is_absolute() {
            return Ok(request.uri.clone());
        }
        self.config
            .endpoint(service.service_type())
            .map(|endpoint| endpoint.join(&request.uri))
            .ok_or_else(|| InvalidHttpRequestError::UnknownEndpoint {
                service_type: service.service_type().to_string(),
            })
    }

    async fn send_once(
        &self,
        request: &HttpRequest,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse, HttpError> {
        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Patch => self.client.patch(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        for (key, value) in headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }
        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        let body = if body_text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&body_text)
                .unwrap_or(serde_json::Value::String(body_text))
        };

        Ok(HttpResponse::new(code, res_headers, body))
    }

    /// Parses response headers into a `HashMap` keyed by lower-case name.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Calculates the retry delay based on response and status code.
    ///
    /// Negative or non-finite `Retry-After` values fall back to
    /// [`RETRY_WAIT_TIME`].
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> std::time::Duration {
        // Retry-After is only honoured for 429
        let retry_after = (status == 429)
            .then_some(response.retry_request_after)
            .flatten()
            .and_then(|seconds| std::time::Duration::try_from_secs_f64(seconds).ok());
        retry_after.unwrap_or(std::time::Duration::from_secs(RETRY_WAIT_TIME))
    }
}

impl Session for HttpSession {
    async fn request(
        &self,
        request: HttpRequest,
        service: &ServiceFilter,
    ) -> Result<HttpResponse, HttpError> {
        request.verify()?;
        let url = self.resolve_url(&request, service)?;

        let mut headers = self.default_headers.clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let max_tries = self.config.tries();
        let mut tries: u32 = 0;
        loop {
            tries += 1;
            tracing::debug!(
                method = request.http_method.as_str(),
                url = %url,
                service = %service,
                attempt = tries,
                "sending request"
            );

            let response = self.send_once(&request, &url, &headers).await?;
            let code = response.code;
            if response.is_ok() {
                return Ok(response);
            }

            let should_retry = matches!(code, 429 | 500 | 503);
            if !should_retry || max_tries == 1 {
                return Err(response.into_http_error(request.http_method, &url));
            }

            if tries >= max_tries {
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    tries: max_tries,
                    last: response.into_error(request.http_method, &url),
                }));
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tracing::warn!(
                status = code,
                attempt = tries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "retrying {} {}",
                request.http_method.as_str(),
                url
            );
            tokio::time::sleep(delay).await;
        }
    }

    fn project_id(&self) -> &str {
        self.config.project_id().as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthToken, EndpointUrl, ProjectId};

    fn create_test_config() -> EclConfig {
        EclConfig::builder()
            .project_id(ProjectId::new("tenant-1").unwrap())
            .auth_token(AuthToken::new("test-token").unwrap())
            .endpoint(
                "orchestration",
                EndpointUrl::new("https://heat.example.com/v1/tenant-1").unwrap(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_user_agent_header_format() {
        let session = HttpSession::new(create_test_config()).unwrap();

        let user_agent = session.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("ecl-sdk v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = EclConfig::builder()
            .project_id(ProjectId::new("tenant-1").unwrap())
            .user_agent_prefix("MyTool/1.0")
            .build()
            .unwrap();
        let session = HttpSession::new(config).unwrap();

        let user_agent = session.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyTool/1.0 | "));
    }

    #[test]
    fn test_auth_token_header_injection() {
        let session = HttpSession::new(create_test_config()).unwrap();
        assert_eq!(
            session.default_headers().get("X-Auth-Token"),
            Some(&"test-token".to_string())
        );
        assert_eq!(
            session.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_no_auth_token_header_without_token() {
        let config = EclConfig::builder()
            .project_id(ProjectId::new("tenant-1").unwrap())
            .build()
            .unwrap();
        let session = HttpSession::new(config).unwrap();
        assert!(session.default_headers().get("X-Auth-Token").is_none());
    }

    #[test]
    fn test_resolve_url_joins_relative_uri() {
        let session = HttpSession::new(create_test_config()).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "/stacks")
            .build()
            .unwrap();

        let url = session
            .resolve_url(&request, &ServiceFilter::new("orchestration"))
            .unwrap();
        assert_eq!(url, "https://heat.example.com/v1/tenant-1/stacks");
    }

    #[test]
    fn test_resolve_url_passes_absolute_uri_through() {
        let session = HttpSession::new(create_test_config()).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "https://other.example.com/stacks?marker=x")
            .build()
            .unwrap();

        let url = session
            .resolve_url(&request, &ServiceFilter::new("unregistered"))
            .unwrap();
        assert_eq!(url, "https://other.example.com/stacks?marker=x");
    }

    #[test]
    fn test_resolve_url_rejects_unknown_service() {
        let session = HttpSession::new(create_test_config()).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "/plans")
            .build()
            .unwrap();

        let result = session.resolve_url(&request, &ServiceFilter::new("virtual-network-appliance"));
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::UnknownEndpoint { service_type })
                if service_type == "virtual-network-appliance"
        ));
    }

    #[test]
    fn test_project_id_comes_from_config() {
        let session = HttpSession::new(create_test_config()).unwrap();
        assert_eq!(Session::project_id(&session), "tenant-1");
    }

    fn response_with_retry_after(value: &str) -> HttpResponse {
        HttpResponse::new(
            429,
            HashMap::from([("Retry-After".to_string(), vec![value.to_string()])]),
            serde_json::Value::Null,
        )
    }

    #[test]
    fn test_retry_delay_honours_retry_after_for_429() {
        let response = response_with_retry_after("2.5");
        assert_eq!(
            HttpSession::calculate_retry_delay(&response, 429),
            std::time::Duration::from_millis(2500)
        );
        assert_eq!(
            HttpSession::calculate_retry_delay(&response, 503),
            std::time::Duration::from_secs(RETRY_WAIT_TIME)
        );
    }

    #[test]
    fn test_retry_delay_ignores_invalid_retry_after() {
        for value in ["-1", "NaN", "inf"] {
            let response = response_with_retry_after(value);
            assert_eq!(
                HttpSession::calculate_retry_delay(&response, 429),
                std::time::Duration::from_secs(RETRY_WAIT_TIME),
                "Retry-After: {value}"
            );
        }
    }
}
