//! Common test utilities for integration tests.
//!
//! - [`http_mock::MockHttpServer`] - `wiremock` server standing in for the vendor API
//! - [`test_client`] - `HttpTraceClient` wired to a mock server with fixed credentials

#![allow(dead_code)]

pub mod http_mock;

use http_mock::MockHttpServer;
use parceltrace::tracking::{Credentials, HttpTraceClient};

/// Path the stubbed vendor endpoint is mounted on.
pub const TRACE_PATH: &str = "/Ebusiness/EbusinessOrderHandle.aspx";

pub const TEST_ACCOUNT_ID: &str = "1237100";
pub const TEST_SECRET: &str = "test-secret";

pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_ACCOUNT_ID, TEST_SECRET).expect("test credentials are valid")
}

/// Client pointed at the mock server's trace endpoint.
pub fn test_client(server: &MockHttpServer) -> HttpTraceClient {
    HttpTraceClient::new(test_credentials()).with_endpoint(server.url(TRACE_PATH))
}
