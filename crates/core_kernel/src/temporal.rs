//! Calendar handling for registry dates
//!
//! Registry dates are stored as display strings (the way operators type and
//! read them). This module owns the timezone used to decide what "today" is
//! and the exact formats the registry writes.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Format of a file's registration date, e.g. `05 Mar 2024`
///
/// [`format_registration_date`] follows the en-GB short month names, which
/// differ from `%b` only for September (`Sept`).
pub const REGISTRATION_DATE_FORMAT: &str = "%d %b %Y";

/// Format of an installment due date, e.g. `05-03-2024`
pub const DUE_DATE_FORMAT: &str = "%d-%m-%Y";

/// ISO calendar date, used for export file names
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Timezone wrapper for the registry office
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Converts a UTC datetime to the local timezone
    pub fn to_local(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.0)
    }

    /// Returns the local calendar date of the given instant
    pub fn date_of(&self, utc: DateTime<Utc>) -> NaiveDate {
        self.to_local(utc).date_naive()
    }

    /// Returns today's local calendar date
    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::Asia::Karachi)
    }
}

impl FromStr for Timezone {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tz::from_str(s.trim())
            .map(Timezone)
            .map_err(|_| TemporalError::UnknownTimezone(s.to_string()))
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name())
    }
}

/// Formats a registration date, e.g. `19 Oct 2026` or `05 Sept 2024`
pub fn format_registration_date(date: NaiveDate) -> String {
    if date.month() == 9 {
        return date.format("%d Sept %Y").to_string();
    }
    date.format(REGISTRATION_DATE_FORMAT).to_string()
}

/// Formats an installment due date, e.g. `19-10-2026`
pub fn format_due_date(date: NaiveDate) -> String {
    date.format(DUE_DATE_FORMAT).to_string()
}

/// Formats an ISO calendar date, e.g. `2026-10-19`
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}
