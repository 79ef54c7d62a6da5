//! Parsing and formatting of the dates exchanged with the budget store and the HTML forms.
//!
//! The store accepts RFC 3339 timestamps and may return either timestamps or plain
//! `YYYY-MM-DD` dates. The app only cares about calendar dates, so timestamps are
//! reduced to their UTC date.

use serde::{Deserialize, Deserializer, Serializer};
use time::{
    Date, OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem,
    format_description::well_known::Rfc3339, macros::format_description,
};

use crate::Error;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Parse a calendar date from either `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` is neither format.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    let text = text.trim();

    if let Ok(date) = Date::parse(text, DATE_FORMAT) {
        return Ok(date);
    }

    OffsetDateTime::parse(text, &Rfc3339)
        .map(|timestamp| timestamp.to_offset(UtcOffset::UTC).date())
        .map_err(|_| Error::InvalidDate(text.to_owned()))
}

/// Format `date` as an RFC 3339 timestamp at UTC midnight, e.g. `2024-01-03T00:00:00.000Z`.
pub fn to_timestamp(date: Date) -> String {
    format!("{date}T00:00:00.000Z")
}

/// Serde adapter for [Date] fields: deserializes with [parse_date] and
/// serializes with [to_timestamp].
pub mod iso_date {
    use super::*;

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_timestamp(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse_date(&text).map_err(serde::de::Error::custom)
    }
}
