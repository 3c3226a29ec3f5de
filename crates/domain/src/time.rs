//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for `last_seen`, log rows, security events, etc.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Return the current UTC calendar date, used for day-bucketed queries.
#[must_use]
pub fn today() -> chrono::NaiveDate {
    Utc::now().date_naive()
}
