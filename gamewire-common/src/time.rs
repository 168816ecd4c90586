//! Timestamp utilities

use chrono::{DateTime, NaiveDate, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Get current UTC calendar date
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Format a calendar date the way the catalog API expects (`YYYY-MM-DD`)
pub fn format_api_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
