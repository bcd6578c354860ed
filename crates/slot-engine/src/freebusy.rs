//! Compute free gaps from appointment lists and tile them into slots.
//!
//! Appointments are sorted by start time and walked with a cursor that only
//! ever moves forward, so overlapping or out-of-order appointments collapse
//! into a single busy stretch. The gaps left inside the search period are cut
//! into back-to-back slots of the requested duration.

use chrono::{DateTime, Utc};

use crate::model::{Appointment, AvailableSlot};
use crate::period::SearchPeriod;
use crate::request::SlotDuration;

/// A maximal free stretch of the search period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl Gap {
    fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        }
    }
}

/// Whether an appointment counts against the search period.
///
/// The start and end of the appointment are each checked against both period
/// bounds: `(start >= period.start || end > period.start) && (start < period.end || end <= period.end)`.
/// This admits partial overlaps at either edge, not only fully contained
/// appointments.
pub fn is_in_period(appointment: &Appointment, period: &SearchPeriod) -> bool {
    (appointment.start >= period.start() || appointment.end > period.start())
        && (appointment.start < period.end() || appointment.end <= period.end())
}

/// Find the free gaps of `period` left by `appointments`.
///
/// Appointments are expected to be pre-filtered with [`is_in_period`]; any
/// order is accepted. Returns gaps sorted by start time. A gap is only
/// emitted when it has positive length, so appointments reaching past the
/// period end never produce an inverted gap.
pub fn find_free_gaps(appointments: &[Appointment], period: &SearchPeriod) -> Vec<Gap> {
    let mut busy: Vec<&Appointment> = appointments.iter().collect();
    // Stable: equal starts keep their source order.
    busy.sort_by_key(|a| a.start);

    let mut gaps = Vec::new();
    let mut cursor = period.start();

    for appointment in busy {
        let gap_end = appointment.start.min(period.end());
        if cursor < gap_end {
            gaps.push(Gap::new(cursor, gap_end));
        }
        cursor = cursor.max(appointment.end);
    }

    // Trailing gap after the last appointment.
    if cursor < period.end() {
        gaps.push(Gap::new(cursor, period.end()));
    }

    gaps
}

/// Cut a gap into consecutive slots of exactly `duration`.
///
/// A slot ending exactly on `gap.end` is kept; any shorter remainder is
/// dropped.
pub fn tile_gap(gap: &Gap, duration: SlotDuration) -> Vec<AvailableSlot> {
    let step = duration.as_duration();
    let mut slots = Vec::new();
    let mut slot_start = gap.start;

    while let Some(slot_end) = slot_start.checked_add_signed(step) {
        if slot_end > gap.end {
            break;
        }
        slots.push(AvailableSlot {
            start_time: slot_start,
            end_time: slot_end,
        });
        slot_start = slot_end;
    }

    slots
}

/// Tile every gap in order and concatenate the slots.
pub fn tile_gaps(gaps: &[Gap], duration: SlotDuration) -> Vec<AvailableSlot> {
    gaps.iter().flat_map(|gap| tile_gap(gap, duration)).collect()
}
