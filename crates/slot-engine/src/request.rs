//! Whole-request validation.
//!
//! [`AvailabilityRequest`] is the raw shape callers send. Every field is
//! optional at the type level so a missing field turns into the matching
//! [`ValidationError`] instead of a deserialization failure.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ValidationError};
use crate::period::{validate_period, SearchPeriod};

/// Longest accepted slot, in minutes.
pub const MAX_DURATION_MINUTES: i64 = i32::MAX as i64;

/// Length of the canonical hyphenated UUID form.
const HYPHENATED_UUID_LEN: usize = 36;

/// Raw availability request, as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    #[serde(default)]
    pub calendar_ids: Vec<String>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub period_to_search: Option<String>,
}

/// A strictly positive slot length in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotDuration(u32);

impl SlotDuration {
    /// # Errors
    /// Returns `ValidationError::InvalidDuration` when `minutes` is not
    /// positive, `ValidationError::DurationTooLarge` above
    /// `MAX_DURATION_MINUTES`.
    pub fn from_minutes(minutes: i64) -> Result<Self> {
        if minutes < 1 {
            return Err(ValidationError::InvalidDuration);
        }
        if minutes > MAX_DURATION_MINUTES {
            return Err(ValidationError::DurationTooLarge(minutes));
        }
        u32::try_from(minutes)
            .map(Self)
            .map_err(|_| ValidationError::DurationTooLarge(minutes))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::minutes(i64::from(self.0))
    }
}

/// A validated request: everything the engine needs, already checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotQuery {
    pub calendar_ids: Vec<Uuid>,
    pub duration: SlotDuration,
    pub period: SearchPeriod,
}

/// One calendar's slice of a [`SlotQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRequest {
    pub calendar_id: Uuid,
    pub period: SearchPeriod,
    pub duration: SlotDuration,
}

impl SlotQuery {
    /// Per-calendar requests, in the order the ids were supplied.
    pub fn requests(&self) -> impl Iterator<Item = SlotRequest> + '_ {
        self.calendar_ids.iter().map(|&calendar_id| SlotRequest {
            calendar_id,
            period: self.period,
            duration: self.duration,
        })
    }
}

impl AvailabilityRequest {
    pub fn new(calendar_ids: Vec<String>, duration: i64, period_to_search: impl Into<String>) -> Self {
        Self {
            calendar_ids,
            duration: Some(duration),
            period_to_search: Some(period_to_search.into()),
        }
    }

    /// Check the request and convert it into a [`SlotQuery`].
    ///
    /// Checks run in a fixed order (calendar ids, duration, period) and the
    /// first failure is returned; nothing is partially accepted.
    ///
    /// # Errors
    /// - `EmptyCalendarIds` if no calendar ids were given
    /// - `InvalidCalendarId` for the first id that is not a hyphenated UUID
    /// - `InvalidDuration` if the duration is missing or not positive
    /// - `DurationTooLarge` if it exceeds `MAX_DURATION_MINUTES`
    /// - `InvalidPeriod` if the period is missing or invalid
    pub fn validate(&self) -> Result<SlotQuery> {
        if self.calendar_ids.is_empty() {
            return Err(ValidationError::EmptyCalendarIds);
        }
        let calendar_ids = self
            .calendar_ids
            .iter()
            .map(|raw| parse_calendar_id(raw))
            .collect::<Result<Vec<_>>>()?;

        let duration = self
            .duration
            .ok_or(ValidationError::InvalidDuration)
            .and_then(SlotDuration::from_minutes)?;

        let period = self
            .period_to_search
            .as_deref()
            .ok_or(ValidationError::InvalidPeriod)
            .and_then(validate_period)?;

        Ok(SlotQuery {
            calendar_ids,
            duration,
            period,
        })
    }
}

/// Only the hyphenated `8-4-4-4-12` form is accepted; simple, braced and
/// `urn:uuid:` spellings are rejected.
fn parse_calendar_id(raw: &str) -> Result<Uuid> {
    if raw.len() != HYPHENATED_UUID_LEN {
        return Err(ValidationError::InvalidCalendarId(raw.to_string()));
    }
    Uuid::try_parse(raw).map_err(|_| ValidationError::InvalidCalendarId(raw.to_string()))
}
