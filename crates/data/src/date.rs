//! Lenient date handling for person records.
//!
//! The application stores dates as timestamps, so records coming straight
//! from its JSON API carry RFC 3339 strings such as
//! `1980-05-01T00:00:00.000Z`. Hand written snapshots use plain `1980-05-01`.
//! Both are accepted; only the calendar date (in UTC) is kept.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date or timestamp, returning `None` for anything unrecognised.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }
    // Timestamps without an offset are taken as UTC
    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|timestamp| timestamp.date())
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// `#[serde(with = "date::optional")]` helper for `Option<NaiveDate>` fields.
pub mod optional {
    use super::{format_date, parse_date};
    use chrono::NaiveDate;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_some(&format_date(date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        parse_date(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid date {raw:?}")))
    }
}
