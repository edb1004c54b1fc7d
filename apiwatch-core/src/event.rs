use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned to an event at ingestion.
///
/// Ids come from a per-store monotonic counter: unique for the store's
/// lifetime, and id order equals arrival order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EventId(pub u64);

/// One captured API call as delivered by the collector.
///
/// Every payload field is independently optional and stays absent when
/// the collector omitted it — a missing `duration_ms` is not 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub duration_ms: Option<f64>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub query_params: Option<serde_json::Value>,
    #[serde(default)]
    pub request_data: Option<serde_json::Value>,
    #[serde(default)]
    pub response_data: Option<serde_json::Value>,
    #[serde(default)]
    pub headers: Option<serde_json::Value>,
}

/// A stored event: a [`RawEvent`] plus the id assigned at ingestion.
/// The id never changes once assigned.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub path: String,
    pub status_code: Option<u16>,
    pub duration_ms: Option<f64>,
    pub service: Option<String>,
    pub query_params: Option<serde_json::Value>,
    pub request_data: Option<serde_json::Value>,
    pub response_data: Option<serde_json::Value>,
    pub headers: Option<serde_json::Value>,
}

impl Event {
    pub fn from_raw(id: EventId, raw: RawEvent) -> Self {
        Self {
            id,
            timestamp: raw.timestamp,
            method: raw.method,
            path: raw.path,
            status_code: raw.status_code,
            duration_ms: raw.duration_ms,
            service: raw.service,
            query_params: raw.query_params,
            request_data: raw.request_data,
            response_data: raw.response_data,
            headers: raw.headers,
        }
    }

    /// Hundreds bucket of the status code (2 for 2xx, 4 for 4xx, ...).
    /// `None` when the collector reported no status.
    pub fn status_bucket(&self) -> Option<u16> {
        self.status_code.map(|s| s / 100)
    }

    /// Visual classification used by the request rows. An absent status
    /// reads as an error.
    pub fn status_class(&self) -> StatusClass {
        match self.status_code {
            Some(s) if s < 300 => StatusClass::Success,
            Some(s) if s < 400 => StatusClass::Redirect,
            _ => StatusClass::Error,
        }
    }
}

/// Display class of a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Redirect,
    Error,
}

impl StatusClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusClass::Success => "success",
            StatusClass::Redirect => "redirect",
            StatusClass::Error => "error",
        }
    }
}
