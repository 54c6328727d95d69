//! HTTP mock server helpers for testing outbound HTTP calls.
//!
//! This module provides a thin wrapper around `wiremock` for declarative
//! HTTP stubbing. Use it to mock the vendor API in integration tests.
//!
//! # Quick Start
//!
//! ```ignore
//! use crate::common::http_mock::MockHttpServer;
//!
//! #[tokio::test]
//! async fn test_external_api_call() {
//!     let server = MockHttpServer::start().await;
//!
//!     server
//!         .expect_post("/trace")
//!         .respond_with_json(json!({"Success": true}))
//!         .mount()
//!         .await;
//!
//!     // Your code posts to server.url("/trace")
//! }
//! ```
//!
//! # Patterns
//!
//! - **Success response**: `.respond_with_json(value)` or `.respond_with_body(string)`
//! - **Error response**: `.respond_with_status(500)`
//! - **Timeout simulation**: `.respond_with_delay(Duration::from_secs(30))`
//! - **Request verification**: `.expect_times(1)` to assert call count

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Wrapper around a running `wiremock` server.
pub struct MockHttpServer {
    server: MockServer,
}

impl MockHttpServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Absolute URL for `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.server.uri(), path)
    }

    /// Access the underlying server for custom matchers.
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    pub fn expect_post(&self, path: &str) -> MockStub<'_> {
        MockStub::new(&self.server, "POST", path)
    }

    /// Assert that every mounted `expect_times` expectation was met.
    pub async fn verify(&self) {
        self.server.verify().await;
    }

    /// All requests received so far.
    pub async fn received_requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}

/// Builder for one stubbed endpoint.
pub struct MockStub<'a> {
    server: &'a MockServer,
    method: &'static str,
    path: String,
    headers: Vec<(String, String)>,
    status: u16,
    body: Option<StubBody>,
    delay: Option<Duration>,
    expected_calls: Option<u64>,
}

enum StubBody {
    Json(Value),
    Text(String),
}

impl<'a> MockStub<'a> {
    fn new(server: &'a MockServer, method: &'static str, path: &str) -> Self {
        Self {
            server,
            method,
            path: path.to_string(),
            headers: Vec::new(),
            status: 200,
            body: None,
            delay: None,
            expected_calls: None,
        }
    }

    /// Only match requests carrying this header value.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn respond_with_json(mut self, body: Value) -> Self {
        self.body = Some(StubBody::Json(body));
        self
    }

    pub fn respond_with_body(mut self, body: &str) -> Self {
        self.body = Some(StubBody::Text(body.to_string()));
        self
    }

    pub fn respond_with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn respond_with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn expect_times(mut self, times: u64) -> Self {
        self.expected_calls = Some(times);
        self
    }

    pub async fn mount(self) {
        let mut builder = Mock::given(method(self.method)).and(path(self.path.as_str()));
        for (name, value) in &self.headers {
            builder = builder.and(header(name.as_str(), value.as_str()));
        }

        let mut template = ResponseTemplate::new(self.status);
        template = match self.body {
            Some(StubBody::Json(value)) => template.set_body_json(value),
            Some(StubBody::Text(text)) => template.set_body_string(text),
            None => template,
        };
        if let Some(delay) = self.delay {
            template = template.set_delay(delay);
        }

        let mut mock = builder.respond_with(template);
        if let Some(times) = self.expected_calls {
            mock = mock.expect(times);
        }
        mock.mount(self.server).await;
    }
}

/// Decode an `application/x-www-form-urlencoded` request body.
pub fn form_fields(request: &Request) -> HashMap<String, String> {
    url::form_urlencoded::parse(&request.body)
        .into_owned()
        .collect()
}
