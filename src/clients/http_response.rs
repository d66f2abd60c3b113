//! HTTP response types.
//!
//! This module provides the [`HttpResponse`] type and the classification of
//! non-2xx responses into [`HttpError`] values.

use std::collections::HashMap;

use serde_json::Value;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::HttpMethod;

/// Extracts the `rel="next"` target from a `Link` header value.
///
/// The header format is `<url>; rel="next", <url>; rel="prev"`.
///
/// ```rust
/// use ecl_sdk::clients::parse_next_link;
///
/// let header = r#"<https://api.example.com/stacks?marker=b>; rel="next""#;
/// assert_eq!(
///     parse_next_link(header).as_deref(),
///     Some("https://api.example.com/stacks?marker=b")
/// );
/// ```
#[must_use]
pub fn parse_next_link(header_value: &str) -> Option<String> {
    header_value.split(',').find_map(|link| {
        let mut parts = link.trim().split(';');
        let url = parts
            .next()?
            .trim()
            .trim_start_matches('<')
            .trim_end_matches('>');
        let is_next = parts.any(|part| {
            let part = part.trim();
            part.strip_prefix("rel=")
                .is_some_and(|rel| rel.trim_matches('"') == "next")
        });
        (is_next && !url.is_empty()).then(|| url.to_string())
    })
}

/// An HTTP response received through a [`Session`](crate::Session).
///
/// Header names are stored lower-cased; a header may carry several values.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body. `Null` for empty bodies; a non-JSON body is
    /// kept as a string.
    pub body: Value,
    /// Next page URI from the `Link` header, if the server sent one.
    pub next_page_uri: Option<String>,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the `Link` and `Retry-After`
    /// headers.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Value) -> Self {
        let headers: HashMap<String, Vec<String>> = headers
            .into_iter()
            .map(|(name, values)| (name.to_ascii_lowercase(), values))
            .collect();

        let next_page_uri = headers
            .get("link")
            .and_then(|values| values.iter().find_map(|v| parse_next_link(v)));

        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.parse::<f64>().ok());

        Self {
            code,
            headers,
            body,
            next_page_uri,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the parsed JSON body.
    #[must_use]
    pub const fn json(&self) -> &Value {
        &self.body
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the server request ID.
    ///
    /// `x-openstack-request-id` is preferred, then `x-request-id`.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-openstack-request-id")
            .or_else(|| self.header("x-request-id"))
    }

    /// Returns a human readable detail string for a failed response.
    ///
    /// Looks for the usual error keys in the body (`message`, `faultstring`,
    /// `error`, `description`, and one level of nesting such as
    /// `{"badRequest": {"message": ..}}`), then falls back to the raw text.
    /// The result is never empty.
    #[must_use]
    pub fn error_details(&self) -> String {
        extract_details(&self.body).unwrap_or_else(|| match &self.body {
            Value::Null => format!("{} {}", self.code, reason_phrase(self.code)),
            Value::String(s) if s.trim().is_empty() => {
                format!("{} {}", self.code, reason_phrase(self.code))
            }
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Converts the response into the diagnostic record for an error.
    #[must_use]
    pub fn into_error(self, method: HttpMethod, url: &str) -> HttpResponseError {
        let details = self.error_details();
        HttpResponseError {
            message: format!(
                "{} {} failed with status {}",
                method.as_str(),
                url,
                self.code
            ),
            details: Some(details),
            http_status: Some(self.code),
            request_id: self.request_id().map(str::to_string),
            url: Some(url.to_string()),
            method: Some(method),
            response: (!self.body.is_null()).then_some(self.body),
            cause: None,
        }
    }

    /// Returns the response unchanged if it is a 2xx, otherwise an error.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::NotFound`] for 404 and [`HttpError::Response`] for
    /// any other non-2xx status.
    pub fn error_for_status(self, method: HttpMethod, url: &str) -> Result<Self, HttpError> {
        if self.is_ok() {
            return Ok(self);
        }
        Err(self.into_http_error(method, url))
    }

    /// Classifies the response as an [`HttpError`] regardless of status.
    ///
    /// 404 becomes [`HttpError::NotFound`]; everything else
    /// [`HttpError::Response`].
    #[must_use]
    pub fn into_http_error(self, method: HttpMethod, url: &str) -> HttpError {
        if self.code == 404 {
            HttpError::NotFound(self.into_error(method, url))
        } else {
            HttpError::Response(self.into_error(method, url))
        }
    }
}

fn extract_details(body: &Value) -> Option<String> {
    const KEYS: [&str; 5] = ["message", "faultstring", "error", "description", "title"];

    let object = body.as_object()?;
    for key in KEYS {
        match object.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(nested @ Value::Object(_)) => {
                if let Some(found) = extract_details(nested) {
                    return Some(found);
                }
            }
            _ => {}
        }
    }
    object
        .values()
        .filter(|v| v.is_object())
        .find_map(extract_details)
}

const fn reason_phrase(code: u16) -> &'static str {
    match code {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Error",
    }
}
