use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Which end of a date range a bare `YYYY-MM-DD` stands for.
#[derive(Clone, Copy, Debug)]
pub enum Bound {
    Start,
    End,
}

/// Parse a case-insensitive enum value (`critical`, `CRITICAL`, ...).
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let normalized = raw.replace('-', "_");
    T::from_str(&normalized).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse an RFC 3339 timestamp or a calendar date.
///
/// A date covers the whole day: `Start` is midnight, `End` the last
/// microsecond.
pub fn parse_bound(raw: &str, field: &str, bound: Bound) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        anyhow::anyhow!("invalid {field} '{raw}': expected RFC 3339 or YYYY-MM-DD")
    })?;
    let time = match bound {
        Bound::Start => NaiveTime::from_hms_opt(0, 0, 0),
        Bound::End => NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999),
    }
    .ok_or_else(|| anyhow::anyhow!("invalid time of day for {field}"))?;
    Ok(date.and_time(time).and_utc())
}

/// Parse an optional bound, reporting which flag was malformed.
pub fn parse_optional_bound(
    raw: Option<&str>,
    field: &str,
    bound: Bound,
) -> anyhow::Result<Option<DateTime<Utc>>> {
    raw.map(|value| parse_bound(value, field, bound)).transpose()
}
