//! Last-updated date stamp

use chrono::{DateTime, SecondsFormat, Utc};

/// Text and `datetime` attribute for a `<time>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateStamp {
    pub text: String,
    pub datetime: String,
}

impl DateStamp {
    /// Stamp for `instant`, using a chrono format string for the visible text
    pub fn at(instant: DateTime<Utc>, format: &str) -> Self {
        Self {
            text: instant.format(format).to_string(),
            datetime: instant.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Stamp for a Unix timestamp in milliseconds (as returned by `Date.now()`)
    pub fn from_millis(millis: f64, format: &str) -> Option<Self> {
        DateTime::from_timestamp_millis(millis as i64).map(|instant| Self::at(instant, format))
    }

    /// Stamp for the current time (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn now(format: &str) -> Option<Self> {
        Self::from_millis(js_sys::Date::now(), format)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn now(format: &str) -> Option<Self> {
        Some(Self::at(Utc::now(), format))
    }
}
