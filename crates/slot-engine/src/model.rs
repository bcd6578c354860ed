//! Data model shared by the validator, the engine, and the appointment source.
//!
//! Wire names follow the request/response JSON: camelCase for everything the
//! engine produces, snake_case (`calendar_id`, `start`, `end`) for appointments
//! read from calendar data files.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Message carried by a result entry whose calendar id is unknown.
pub const CALENDAR_NOT_FOUND: &str = "Calendar Id does not exist.";

/// An existing busy interval on a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// String form of the owning calendar's UUID.
    pub calendar_id: String,
    #[serde(deserialize_with = "deserialize_instant")]
    pub start: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_instant")]
    pub end: DateTime<Utc>,
}

impl Appointment {
    pub fn new(calendar_id: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            start,
            end,
        }
    }

    /// False when the appointment ends before it starts. Zero-length
    /// appointments are well-formed.
    pub fn is_well_formed(&self) -> bool {
        self.end >= self.start
    }

    /// True when `calendar_id` names the given calendar.
    ///
    /// Compares parsed UUIDs, so `48CADF26-...` and `48cadf26-...` match.
    pub fn belongs_to(&self, calendar_id: &Uuid) -> bool {
        Uuid::parse_str(&self.calendar_id).is_ok_and(|id| id == *calendar_id)
    }
}

/// One free, bookable interval of exactly the requested duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Per-calendar outcome. Exactly one of the slot list or the error is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum CalendarResult {
    /// The calendar exists; the list may be empty.
    Available {
        calendar_id: Uuid,
        available_slot_list: Vec<AvailableSlot>,
    },
    /// The calendar could not be searched.
    Unavailable { calendar_id: Uuid, error: String },
}

impl CalendarResult {
    pub fn available(calendar_id: Uuid, slots: Vec<AvailableSlot>) -> Self {
        Self::Available {
            calendar_id,
            available_slot_list: slots,
        }
    }

    pub fn not_found(calendar_id: Uuid) -> Self {
        Self::Unavailable {
            calendar_id,
            error: CALENDAR_NOT_FOUND.to_string(),
        }
    }

    pub fn calendar_id(&self) -> Uuid {
        match self {
            Self::Available { calendar_id, .. } | Self::Unavailable { calendar_id, .. } => {
                *calendar_id
            }
        }
    }

    pub fn slots(&self) -> Option<&[AvailableSlot]> {
        match self {
            Self::Available {
                available_slot_list,
                ..
            } => Some(available_slot_list),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Available { .. } => None,
            Self::Unavailable { error, .. } => Some(error),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }
}

/// Aggregate response: one entry per requested calendar id, in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub available_slots: Vec<CalendarResult>,
}

/// Accepts RFC 3339 instants, or offset-less `YYYY-MM-DDTHH:MM:SS[.fff]`
/// timestamps which are taken to be UTC.
fn deserialize_instant<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_instant(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid timestamp '{raw}', expected RFC 3339"))
    })
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
