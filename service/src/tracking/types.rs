//! Request and response types for the trace query API.
//!
//! Field names on the wire are PascalCase and fixed by the vendor.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_aux::field_attributes::deserialize_default_from_null;
use serde_json::{Number, Value};

use super::client::TraceError;

/// One trace query: which parcel to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceQuery {
    pub carrier_code: String,
    pub tracking_number: String,
    pub order_code: String,
    pub customer_name: String,
}

impl TraceQuery {
    /// Query a parcel by carrier code and tracking number.
    pub fn new(carrier_code: impl Into<String>, tracking_number: impl Into<String>) -> Self {
        Self {
            carrier_code: carrier_code.into(),
            tracking_number: tracking_number.into(),
            order_code: String::new(),
            customer_name: String::new(),
        }
    }

    /// Attach the merchant-side order code.
    #[must_use]
    pub fn with_order_code(mut self, order_code: impl Into<String>) -> Self {
        self.order_code = order_code.into();
        self
    }

    /// Attach the customer name. Some carriers (SF) require the last four
    /// digits of the recipient's phone number here.
    #[must_use]
    pub fn with_customer_name(mut self, customer_name: impl Into<String>) -> Self {
        self.customer_name = customer_name.into();
        self
    }

    /// Check the required fields.
    ///
    /// # Errors
    /// Returns `TraceError::Validation` if the carrier code or tracking
    /// number is empty.
    pub fn validate(&self) -> Result<(), TraceError> {
        if self.carrier_code.is_empty() {
            return Err(TraceError::Validation("carrier code is required".into()));
        }
        if self.tracking_number.is_empty() {
            return Err(TraceError::Validation("tracking number is required".into()));
        }
        Ok(())
    }

    /// Build the `RequestData` payload for this query.
    #[must_use]
    pub fn request_data(&self) -> TracesRequestData<'_> {
        TracesRequestData {
            order_code: &self.order_code,
            shipper_code: &self.carrier_code,
            logistic_code: &self.tracking_number,
            customer_name: &self.customer_name,
        }
    }
}

/// JSON body carried in the `RequestData` form field.
///
/// Field order and names are part of the signed payload. Empty fields are
/// sent as `""`, never omitted.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TracesRequestData<'a> {
    #[serde(rename = "OrderCode")]
    pub order_code: &'a str,
    #[serde(rename = "ShipperCode")]
    pub shipper_code: &'a str,
    #[serde(rename = "LogisticCode")]
    pub logistic_code: &'a str,
    #[serde(rename = "CustomerName")]
    pub customer_name: &'a str,
}

/// The vendor's `Success` field.
///
/// Success comes back as JSON `true`, failure frequently as the string
/// `"false"`. Read it only through [`SuccessFlag::is_success`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SuccessFlag {
    Bool(bool),
    Text(String),
    Other(Value),
}

impl SuccessFlag {
    /// `true`, or the exact string `"true"`. Everything else is a failure.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::Bool(flag) => *flag,
            Self::Text(text) => text == "true",
            Self::Other(_) => false,
        }
    }
}

impl Default for SuccessFlag {
    fn default() -> Self {
        Self::Other(Value::Null)
    }
}

/// One waypoint in a parcel's history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraceEntry {
    /// Event time as sent by the vendor, e.g. `2023-01-01 10:00:00`.
    #[serde(rename = "AcceptTime", default, deserialize_with = "deserialize_default_from_null")]
    pub accept_time: String,
    /// Location / event description.
    #[serde(rename = "AcceptStation", default, deserialize_with = "deserialize_default_from_null")]
    pub accept_station: String,
    #[serde(rename = "Remark", default, deserialize_with = "deserialize_default_from_null")]
    pub remark: String,
}

/// Decoded trace query response.
#[derive(Debug, Clone, Deserialize)]
pub struct TracesResponse {
    #[serde(rename = "EBusinessID", default, deserialize_with = "deserialize_code")]
    pub e_business_id: String,
    #[serde(rename = "OrderCode", default, deserialize_with = "deserialize_default_from_null")]
    pub order_code: String,
    #[serde(rename = "ShipperCode", default, deserialize_with = "deserialize_default_from_null")]
    pub shipper_code: String,
    #[serde(rename = "LogisticCode", default, deserialize_with = "deserialize_default_from_null")]
    pub logistic_code: String,
    #[serde(rename = "Success", default)]
    success: SuccessFlag,
    /// Raw state code; see [`TracesResponse::logistics_status`].
    #[serde(rename = "State", default, deserialize_with = "deserialize_code")]
    pub state: String,
    /// Vendor's failure reason, usually only present on failure.
    #[serde(rename = "Reason", default)]
    pub reason: Option<String>,
    /// History in vendor order.
    #[serde(rename = "Traces", default, deserialize_with = "deserialize_default_from_null")]
    pub traces: Vec<TraceEntry>,
}

/// String, number or `null` (as `""`) for code-like fields.
fn deserialize_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(Number),
    }

    Ok(match Option::<Code>::deserialize(deserializer)? {
        Some(Code::Text(text)) => text,
        Some(Code::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

impl TracesResponse {
    /// Whether the vendor reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success.is_success()
    }

    /// Map the state code to a logistics status.
    #[must_use]
    pub fn logistics_status(&self) -> LogisticsStatus {
        LogisticsStatus::from_state_code(&self.state)
    }

    /// Most recent trace entry, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&TraceEntry> {
        self.traces.last()
    }
}

/// Shipment status derived from the vendor's `State` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogisticsStatus {
    NoTrace,
    Collected,
    InTransit,
    Delivered,
    Exception,
}

impl LogisticsStatus {
    /// `"1"`..`"4"` map to a known status; any other code means no trace yet.
    #[must_use]
    pub fn from_state_code(code: &str) -> Self {
        match code {
            "1" => Self::Collected,
            "2" => Self::InTransit,
            "3" => Self::Delivered,
            "4" => Self::Exception,
            _ => Self::NoTrace,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoTrace => "no_trace",
            Self::Collected => "collected",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Exception => "exception",
        }
    }

    /// Label used by the vendor's own console.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoTrace => "暂无轨迹信息",
            Self::Collected => "已揽件",
            Self::InTransit => "运输在途",
            Self::Delivered => "已签收",
            Self::Exception => "问题件",
        }
    }
}

impl fmt::Display for LogisticsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NoTrace => "No tracking information yet",
            Self::Collected => "Collected",
            Self::InTransit => "In transit",
            Self::Delivered => "Delivered",
            Self::Exception => "Exception/problem",
        };
        f.write_str(text)
    }
}

/// Flattened view of a successful response, used for display and JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TraceSummary {
    pub carrier_code: String,
    pub tracking_number: String,
    pub order_code: String,
    pub status: LogisticsStatus,
    pub status_label: &'static str,
    pub entries: Vec<TraceEntry>,
}

impl TraceSummary {
    /// Build a summary, falling back to the query's identifiers when the
    /// vendor leaves them out of the response.
    #[must_use]
    pub fn new(query: &TraceQuery, response: TracesResponse) -> Self {
        let status = response.logistics_status();
        let pick = |returned: String, asked: &str| {
            if returned.is_empty() {
                asked.to_string()
            } else {
                returned
            }
        };

        Self {
            carrier_code: pick(response.shipper_code, &query.carrier_code),
            tracking_number: pick(response.logistic_code, &query.tracking_number),
            order_code: pick(response.order_code, &query.order_code),
            status,
            status_label: status.label(),
            entries: response.traces,
        }
    }
}
