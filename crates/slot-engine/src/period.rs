//! Search-period parsing and validation.
//!
//! A period arrives as `"<start>/<end>"` with both halves RFC 3339 instants,
//! e.g. `2019-04-23T10:00:00Z/2019-04-23T11:00:00Z`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{Result, ValidationError};

const SEPARATOR: char = '/';

/// The window a caller wants searched. `end` is always strictly after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchPeriod {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl SearchPeriod {
    /// Build a period from two instants.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidPeriod` unless `end > start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end <= start {
            return Err(ValidationError::InvalidPeriod);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whole minutes between start and end.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Parse and validate a raw `"<start>/<end>"` period string.
///
/// Splits on the first `/`. Fails with `ValidationError::InvalidPeriod` when
/// the separator is missing, either half is not an RFC 3339 instant, or the
/// end is not strictly after the start.
pub fn validate_period(raw: &str) -> Result<SearchPeriod> {
    let (start, end) = raw
        .split_once(SEPARATOR)
        .ok_or(ValidationError::InvalidPeriod)?;
    SearchPeriod::new(parse_bound(start)?, parse_bound(end)?)
}

fn parse_bound(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ValidationError::InvalidPeriod)
}

impl FromStr for SearchPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        validate_period(s)
    }
}

impl fmt::Display for SearchPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.start.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            SEPARATOR,
            self.end.to_rfc3339_opts(SecondsFormat::AutoSi, true)
        )
    }
}
