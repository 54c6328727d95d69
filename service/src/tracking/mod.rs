//! Parcel trace query module.
//!
//! Signs and submits trace queries to the vendor API and decodes the
//! response.
//!
//! # Architecture
//!
//! The module uses a trait-based design for testability:
//!
//! - [`TraceApiClient`] - Trait defining the trace query
//! - [`HttpTraceClient`] - Real HTTP implementation using reqwest
//! - [`mock::MockTraceClient`] - Mock for unit tests (behind `test-utils` feature)
//! - [`carriers`] - Table of commonly used carrier codes
//!
//! There is no process-wide default client. Build one `HttpTraceClient`
//! (usually via [`HttpTraceClient::from_config`]) and pass it to callers.
//!
//! # Testing Patterns
//!
//! ## Unit Tests (Mock Implementation)
//!
//! ```ignore
//! use parceltrace::tracking::mock::MockTraceClient;
//!
//! let mock = MockTraceClient::new();
//! mock.set_traces_result(Ok(response));
//! let summary = summarize(&mock, &TraceQuery::new("SF", "SF1")).await?;
//! ```
//!
//! ## Integration Tests (HTTP Stubbing)
//!
//! ```ignore
//! let server = MockHttpServer::start().await;
//! server
//!     .expect_post(TRACE_PATH)
//!     .respond_with_json(json!({"Success": true, "State": "3", "Traces": []}))
//!     .mount()
//!     .await;
//!
//! let client = HttpTraceClient::new(credentials).with_endpoint(server.url(TRACE_PATH));
//! ```

pub mod carriers;
mod client;
mod types;

pub use client::{
    summarize, Credentials, HttpTraceClient, TraceApiClient, TraceError, PRODUCTION_ENDPOINT,
    SANDBOX_ENDPOINT,
};
pub use types::{
    LogisticsStatus, SuccessFlag, TraceEntry, TraceQuery, TraceSummary, TracesRequestData,
    TracesResponse,
};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;
