//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Wire format for calendar dates (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Parses a `YYYY-MM-DD` date as midnight UTC.
    ///
    /// Surrounding whitespace is ignored. `field` names the input in the
    /// returned validation error.
    pub fn parse_date(field: &str, raw: &str) -> Result<Self, ValidationError> {
        let date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
            .map_err(|_| ValidationError::invalid_format(field, "expected YYYY-MM-DD"))?;
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| ValidationError::invalid_format(field, "date out of range"))?;
        Ok(Self(midnight.and_utc()))
    }

    /// Parses an optional date field, treating blank input as absent.
    pub fn parse_optional_date(
        field: &str,
        raw: Option<&str>,
    ) -> Result<Option<Self>, ValidationError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => Self::parse_date(field, value).map(Some),
        }
    }

    /// Formats the calendar date part as `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        self.0.format(DATE_FORMAT).to_string()
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Creates a new timestamp offset by a std duration.
    pub fn plus(&self, duration: std::time::Duration) -> Self {
        let delta = Duration::from_std(duration).unwrap_or(Duration::MAX);
        Self(self.0.checked_add_signed(delta).unwrap_or(DateTime::<Utc>::MAX_UTC))
    }

    /// Returns the timestamp as Unix seconds.
    pub fn as_unix_secs(&self) -> i64 {
        self.0.timestamp()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
