//! Order records as fetched from the delivery platform.
//!
//! Only `id` and `created_time` are interpreted; every other field passes
//! through opaquely so the snapshot file preserves what the API returned.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Time window for an order fetch, passed through verbatim as the
/// `start_time` / `end_time` query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    /// Inclusive window start, in whatever format the API expects.
    pub start: String,
    /// Inclusive window end.
    pub end: String,
}

impl TimeWindow {
    /// Create a new time window.
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// A single order as returned by the orders endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Order identifier. The wire format is inconsistent (string or
    /// number), so it is normalized to a string on the way in.
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    /// Creation timestamp as reported by the platform.
    pub created_time: String,
    /// All remaining fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl OrderRecord {
    /// The UTC calendar date the order was created on, or `None` when
    /// `created_time` cannot be parsed.
    ///
    /// Accepts RFC 3339 and the platform's space-separated variant.
    #[must_use]
    pub fn created_date_utc(&self) -> Option<NaiveDate> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.created_time) {
            return Some(dt.to_utc().date_naive());
        }
        NaiveDateTime::parse_from_str(&self.created_time, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|naive| naive.date())
    }
}

/// Accept either a JSON string or a JSON number for the order id.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(serde_json::Number),
    }

    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => Ok(s),
        StringOrNumber::Number(n) => Ok(n.to_string()),
    }
}
