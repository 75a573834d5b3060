//! Strongly-typed identifiers for registry entities
//!
//! File numbers are operator-assigned strings; transaction ids are
//! creation-time tokens minted by the process.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Identifier of a property file, assigned by the registry office
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileNo(String);

impl FileNo {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier is blank
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for FileNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileNo {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FileNo {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for FileNo {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

static LAST_TRANS_ID: AtomicI64 = AtomicI64::new(0);

/// Creation-time token of a ledger transaction
///
/// Minted from the wall clock in milliseconds. Tokens are strictly
/// increasing within a process, so two entries added in the same
/// millisecond still get distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransId(i64);

impl TransId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Mints a fresh token
    pub fn generate() -> Self {
        let now = Utc::now().timestamp_millis();
        let mut last = LAST_TRANS_ID.load(Ordering::Relaxed);
        loop {
            let next = now.max(last + 1);
            match LAST_TRANS_ID.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => return Self(next),
                Err(current) => last = current,
            }
        }
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TransId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TransId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
