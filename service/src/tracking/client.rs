//! Trace query API client.
//!
//! This module provides a trait-based HTTP client for the vendor's instant
//! trace query (`RequestType=1002`). The trait abstraction enables:
//!
//! - Easy mocking in unit tests
//! - HTTP-level testing with `MockHttpServer` in integration tests
//! - Passing one explicitly constructed client to the code that needs it
//!
//! # Example
//!
//! ```ignore
//! use parceltrace::tracking::{Credentials, HttpTraceClient, TraceApiClient, TraceQuery};
//!
//! let client = HttpTraceClient::new(Credentials::new("1237100", "app-key")?);
//! let response = client.traces(&TraceQuery::new("SF", "SF1234567890")).await?;
//! println!("{}", response.logistics_status());
//! ```

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use super::types::{TraceQuery, TraceSummary, TracesResponse};
use crate::config::KdnConfig;

/// Production trace query endpoint.
pub const PRODUCTION_ENDPOINT: &str = "https://api.kdniao.com/Ebusiness/EbusinessOrderHandle.aspx";

/// Vendor sandbox endpoint, accepts test merchant ids.
pub const SANDBOX_ENDPOINT: &str =
    "http://sandboxapi.kdniao.cc:8080/kdniaosandbox/gateway/exterfaceInvoke.json";

/// Request type code for the instant trace query.
const REQUEST_TYPE_TRACES: &str = "1002";

/// Errors that can occur when querying traces.
#[derive(Debug, Error)]
pub enum TraceError {
    /// Missing account id or secret key
    #[error("configuration error: {0}")]
    Config(String),

    /// Missing carrier code or tracking number
    #[error("validation error: {0}")]
    Validation(String),

    /// HTTP request failed or returned an error status
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body is not the expected JSON
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Vendor reported failure; the reason is shown verbatim
    #[error("{reason}")]
    Vendor { reason: String },
}

/// Merchant credentials issued by the vendor.
#[derive(Clone)]
pub struct Credentials {
    account_id: String,
    secret_key: String,
}

impl Credentials {
    /// Validate and wrap an account id (`EBusinessID`) and secret key.
    ///
    /// # Errors
    /// Returns `TraceError::Config` if either value is empty.
    pub fn new(
        account_id: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, TraceError> {
        let account_id = account_id.into();
        let secret_key = secret_key.into();

        if account_id.is_empty() {
            return Err(TraceError::Config("account id (EBusinessID) is required".into()));
        }
        if secret_key.is_empty() {
            return Err(TraceError::Config("secret key (AppKey) is required".into()));
        }

        Ok(Self {
            account_id,
            secret_key,
        })
    }

    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub(crate) fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_id", &self.account_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Trait for trace query operations.
///
/// Use `HttpTraceClient` for real HTTP calls, or `mock::MockTraceClient`
/// in tests.
#[async_trait]
pub trait TraceApiClient: Send + Sync {
    /// Look up the trace history of one parcel.
    ///
    /// Only returns `Ok` when the vendor confirmed success.
    async fn traces(&self, query: &TraceQuery) -> Result<TracesResponse, TraceError>;
}

/// HTTP-based implementation of `TraceApiClient`.
#[derive(Debug, Clone)]
pub struct HttpTraceClient {
    client: reqwest::Client,
    credentials: Credentials,
    endpoint: String,
}

impl HttpTraceClient {
    /// Create a client for the production endpoint.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self::with_client(reqwest::Client::new(), credentials)
    }

    /// Create a client with a custom `reqwest::Client` (timeouts, proxies).
    #[must_use]
    pub fn with_client(client: reqwest::Client, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
            endpoint: PRODUCTION_ENDPOINT.to_string(),
        }
    }

    /// Create a client from loaded configuration.
    ///
    /// # Errors
    /// Returns `TraceError::Config` if the account id or app key is empty.
    pub fn from_config(config: &KdnConfig) -> Result<Self, TraceError> {
        let credentials = Credentials::new(config.ebusiness_id.as_str(), config.app_key.as_str())?;
        Ok(Self::new(credentials).with_endpoint(config.endpoint.as_str()))
    }

    /// Point the client at another endpoint (sandbox, test server).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

#[async_trait]
impl TraceApiClient for HttpTraceClient {
    async fn traces(&self, query: &TraceQuery) -> Result<TracesResponse, TraceError> {
        query.validate()?;

        let request_data = serde_json::to_string(&query.request_data())?;
        let data_sign = pt_sign::sign(&request_data, self.credentials.secret_key());
        let escaped_request_data = pt_sign::escape_path_segment(&request_data);

        tracing::debug!(
            carrier_code = %query.carrier_code,
            tracking_number = %query.tracking_number,
            endpoint = %self.endpoint,
            "submitting trace query"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[
                ("DataSign", data_sign.as_str()),
                ("DataType", "json"),
                ("EBusinessID", self.credentials.account_id()),
                ("RequestData", escaped_request_data.as_str()),
                ("RequestType", REQUEST_TYPE_TRACES),
            ])
            .send()
            .await?;

        // Gateways answer some failures with an error status and a JSON
        // body; the vendor's reason wins over the bare status.
        let status_error = response.error_for_status_ref().err();
        let body = response.text().await?;
        let traces: TracesResponse = match (serde_json::from_str(&body), status_error) {
            (Ok(traces), None) => traces,
            (Err(err), None) => return Err(TraceError::Decode(err)),
            (Ok(traces), Some(err)) => return Err(rejected_with_status(traces, err)),
            (Err(_), Some(err)) => return Err(TraceError::Transport(err)),
        };

        if !traces.is_success() {
            let reason = traces.reason.unwrap_or_default();
            tracing::warn!(
                carrier_code = %query.carrier_code,
                tracking_number = %query.tracking_number,
                reason = %reason,
                "vendor rejected trace query"
            );
            return Err(TraceError::Vendor { reason });
        }

        tracing::debug!(
            state = %traces.state,
            entries = traces.traces.len(),
            "trace query succeeded"
        );
        Ok(traces)
    }
}

/// Error for a non-2xx response whose body still decoded.
///
/// A failure carrying a reason becomes `Vendor`; anything else keeps the
/// status as a transport error.
fn rejected_with_status(traces: TracesResponse, status_error: reqwest::Error) -> TraceError {
    let failed = !traces.is_success();
    match traces.reason {
        Some(reason) if failed && !reason.is_empty() => {
            tracing::warn!(
                status = ?status_error.status(),
                reason = %reason,
                "vendor rejected trace query with error status"
            );
            TraceError::Vendor { reason }
        }
        _ => TraceError::Transport(status_error),
    }
}

/// Query a parcel and flatten the result for display.
///
/// # Errors
/// Propagates any error from the client unchanged.
pub async fn summarize<C>(client: &C, query: &TraceQuery) -> Result<TraceSummary, TraceError>
where
    C: TraceApiClient + ?Sized,
{
    let response = client.traces(query).await?;
    Ok(TraceSummary::new(query, response))
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{TraceApiClient, TraceError, TraceQuery, TracesResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mock implementation of `TraceApiClient` for unit tests.
    ///
    /// Configure the response with `set_traces_result` and verify calls
    /// with `traces_calls()`.
    pub struct MockTraceClient {
        traces_result: Mutex<Option<Result<TracesResponse, TraceError>>>,
        traces_calls: Mutex<Vec<TraceQuery>>,
    }

    impl MockTraceClient {
        pub fn new() -> Self {
            Self {
                traces_result: Mutex::new(None),
                traces_calls: Mutex::new(Vec::new()),
            }
        }

        /// Set the result for the next `traces` call.
        pub fn set_traces_result(&self, result: Result<TracesResponse, TraceError>) {
            *self.traces_result.lock().unwrap() = Some(result);
        }

        /// Get all queries passed to `traces`.
        pub fn traces_calls(&self) -> Vec<TraceQuery> {
            self.traces_calls.lock().unwrap().clone()
        }
    }

    impl Default for MockTraceClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl TraceApiClient for MockTraceClient {
        async fn traces(&self, query: &TraceQuery) -> Result<TracesResponse, TraceError> {
            self.traces_calls.lock().unwrap().push(query.clone());

            self.traces_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| {
                    Err(TraceError::Vendor {
                        reason: "no mock result configured".to_string(),
                    })
                })
        }
    }
}
