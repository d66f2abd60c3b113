//! Shared helpers for integration tests.
//!
//! [`MockSession`] replays scripted responses in order and records every
//! request it receives. Non-2xx responses are classified exactly like
//! [`HttpSession`](ecl_sdk::HttpSession) does.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use ecl_sdk::{HttpError, HttpMethod, HttpRequest, HttpResponse, ServiceFilter, Session};
use serde_json::Value;

/// Project the mock session acts for.
pub const PROJECT_ID: &str = "tenant-1";

/// Base URL relative URIs are joined onto.
pub const BASE_URL: &str = "https://api.test";

/// A request as seen by the mock session.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub request: HttpRequest,
    pub service: ServiceFilter,
    pub url: String,
}

impl RecordedRequest {
    pub fn method(&self) -> HttpMethod {
        self.request.http_method
    }

    pub fn uri(&self) -> &str {
        &self.request.uri
    }

    pub fn body(&self) -> Option<&Value> {
        self.request.body.as_ref()
    }

    pub fn query(&self, key: &str) -> Option<&str> {
        self.request
            .query
            .as_ref()
            .and_then(|query| query.get(key))
            .map(String::as_str)
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.request
            .extra_headers
            .as_ref()
            .and_then(|headers| headers.get(key))
            .map(String::as_str)
    }
}

/// A scripted in-memory session.
#[derive(Debug, Default)]
pub struct MockSession {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response with a JSON body.
    pub fn respond(self, code: u16, body: Value) -> Self {
        self.respond_with_headers(code, &[], body)
    }

    /// Queues a response with headers and a JSON body.
    pub fn respond_with_headers(self, code: u16, headers: &[(&str, &str)], body: Value) -> Self {
        let headers: HashMap<String, Vec<String>> = headers
            .iter()
            .map(|(name, value)| ((*name).to_string(), vec![(*value).to_string()]))
            .collect();
        self.responses
            .lock()
            .unwrap()
            .push_back(HttpResponse::new(code, headers, body));
        self
    }

    /// Queues a 404 with a server message and request ID.
    pub fn respond_not_found(self, message: &str) -> Self {
        self.respond_with_headers(
            404,
            &[("x-openstack-request-id", "req-404")],
            serde_json::json!({"itemNotFound": {"message": message, "code": 404}}),
        )
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

impl Session for MockSession {
    async fn request(
        &self,
        request: HttpRequest,
        service: &ServiceFilter,
    ) -> Result<HttpResponse, HttpError> {
        request.verify()?;
        let url = if request.is_absolute() {
            request.uri.clone()
        } else {
            format!("{BASE_URL}{}", request.uri)
        };
        let method = request.http_method;

        self.requests.lock().unwrap().push(RecordedRequest {
            request,
            service: service.clone(),
            url: url.clone(),
        });

        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {} {url}", method.as_str()));
        response.error_for_status(method, &url)
    }

    fn project_id(&self) -> &str {
        PROJECT_ID
    }
}
