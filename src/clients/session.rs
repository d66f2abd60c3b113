//! The transport seam used by proxies.
//!
//! Proxies never talk to `reqwest` directly; they go through a [`Session`].
//! [`HttpSession`](crate::HttpSession) is the production implementation and
//! tests substitute scripted ones.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{DataType, HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::ServiceFilter;

/// An authenticated connection able to perform HTTP calls against the
/// services named by a [`ServiceFilter`].
///
/// Implementors provide [`request`](Self::request) and
/// [`project_id`](Self::project_id); the verb helpers are built on top.
/// Implementations must return [`HttpError::NotFound`] for 404 responses and
/// [`HttpError::Response`] for other non-2xx statuses.
///
/// # Example
///
/// ```rust,ignore
/// use ecl_sdk::{Session, ServiceFilter};
///
/// let filter = ServiceFilter::new("orchestration");
/// let response = session.get("/stacks", &filter, None).await?;
/// println!("{}", response.json());
/// ```
#[allow(async_fn_in_trait)]
pub trait Session: Send + Sync {
    /// Sends a request to the service described by `service`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport failures and non-2xx responses.
    async fn request(
        &self,
        request: HttpRequest,
        service: &ServiceFilter,
    ) -> Result<HttpResponse, HttpError>;

    /// Returns the project (tenant) the session acts for.
    fn project_id(&self) -> &str;

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    async fn get(
        &self,
        uri: &str,
        service: &ServiceFilter,
        headers: Option<BTreeMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        let request = with_headers(HttpRequest::builder(HttpMethod::Get, uri), headers).build()?;
        self.request(request, service).await
    }

    /// Sends a POST request with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    async fn post(
        &self,
        uri: &str,
        service: &ServiceFilter,
        body: Option<Value>,
        headers: Option<BTreeMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        let mut builder = HttpRequest::builder(HttpMethod::Post, uri);
        if let Some(body) = body {
            builder = builder.body(body).body_type(DataType::Json);
        }
        let request = with_headers(builder, headers).build()?;
        self.request(request, service).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    async fn put(
        &self,
        uri: &str,
        service: &ServiceFilter,
        body: Value,
        headers: Option<BTreeMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        let builder = HttpRequest::builder(HttpMethod::Put, uri)
            .body(body)
            .body_type(DataType::Json);
        let request = with_headers(builder, headers).build()?;
        self.request(request, service).await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    async fn patch(
        &self,
        uri: &str,
        service: &ServiceFilter,
        body: Value,
        headers: Option<BTreeMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        let builder = HttpRequest::builder(HttpMethod::Patch, uri)
            .body(body)
            .body_type(DataType::Json);
        let request = with_headers(builder, headers).build()?;
        self.request(request, service).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    async fn delete(
        &self,
        uri: &str,
        service: &ServiceFilter,
        headers: Option<BTreeMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        let request =
            with_headers(HttpRequest::builder(HttpMethod::Delete, uri), headers).build()?;
        self.request(request, service).await
    }
}

fn with_headers(
    builder: crate::clients::http_request::HttpRequestBuilder,
    headers: Option<BTreeMap<String, String>>,
) -> crate::clients::http_request::HttpRequestBuilder {
    match headers {
        Some(headers) => builder.extra_headers(headers),
        None => builder,
    }
}

impl<S: Session> Session for &S {
    async fn request(
        &self,
        request: HttpRequest,
        service: &ServiceFilter,
    ) -> Result<HttpResponse, HttpError> {
        (**self).request(request, service).await
    }

    fn project_id(&self) -> &str {
        (**self).project_id()
    }
}

impl<S: Session> Session for Arc<S> {
    async fn request(
        &self,
        request: HttpRequest,
        service: &ServiceFilter,
    ) -> Result<HttpResponse, HttpError> {
        (**self).request(request, service).await
    }

    fn project_id(&self) -> &str {
        (**self).project_id()
    }
}
