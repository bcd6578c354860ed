//! Per-calendar availability search and multi-calendar aggregation.
//!
//! Each requested calendar is handled on its own: an unknown id yields an
//! inline error entry and never stops the remaining calendars. Input-shape
//! problems are caught earlier, by [`AvailabilityRequest::validate`], and
//! reject the whole request.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::freebusy::{self, Gap};
use crate::model::{Appointment, AvailabilityResponse, CalendarResult};
use crate::period::SearchPeriod;
use crate::request::{AvailabilityRequest, SlotDuration, SlotQuery};
use crate::source::AppointmentSource;

/// Compute the bookable slots of one calendar within `period`.
///
/// 1. Unknown calendar: returns the "Calendar Id does not exist." entry.
/// 2. Appointments not owned by `calendar_id`, ending before they start, or
///    outside the period (see [`freebusy::is_in_period`]) are dropped.
/// 3. The free gaps left by the remaining appointments are tiled into slots
///    of `duration`. With no appointments the whole period is one gap.
pub fn compute_availability<S: AppointmentSource>(
    calendar_id: Uuid,
    period: &SearchPeriod,
    duration: SlotDuration,
    source: &S,
) -> CalendarResult {
    if !source.exists(&calendar_id) {
        warn!(%calendar_id, "calendar not found");
        return CalendarResult::not_found(calendar_id);
    }

    let in_period: Vec<Appointment> = source
        .appointments_for(&calendar_id)
        .into_iter()
        .filter(|a| {
            if !a.is_well_formed() {
                warn!(%calendar_id, start = %a.start, end = %a.end, "ignoring inverted appointment");
                return false;
            }
            a.belongs_to(&calendar_id) && freebusy::is_in_period(a, period)
        })
        .collect();

    let gaps = if in_period.is_empty() {
        vec![Gap {
            start: period.start(),
            end: period.end(),
            duration_minutes: period.duration_minutes(),
        }]
    } else {
        freebusy::find_free_gaps(&in_period, period)
    };

    let slots = freebusy::tile_gaps(&gaps, duration);
    debug!(
        %calendar_id,
        appointments = in_period.len(),
        gaps = gaps.len(),
        slots = slots.len(),
        "computed availability"
    );

    CalendarResult::available(calendar_id, slots)
}

/// Run [`compute_availability`] for every calendar in the query, preserving
/// request order. Duplicate ids are answered independently.
pub fn find_available_slots<S: AppointmentSource>(
    query: &SlotQuery,
    source: &S,
) -> AvailabilityResponse {
    let available_slots = query
        .requests()
        .map(|req| compute_availability(req.calendar_id, &req.period, req.duration, source))
        .collect();

    AvailabilityResponse { available_slots }
}

/// Availability search bound to one appointment source.
#[derive(Debug, Clone)]
pub struct AvailabilityEngine<S> {
    source: S,
}

impl<S: AppointmentSource> AvailabilityEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Validate a raw request, then search every calendar it names.
    ///
    /// # Errors
    /// Returns the first [`ValidationError`](crate::ValidationError) found;
    /// no calendar is searched in that case.
    pub fn search(&self, request: &AvailabilityRequest) -> Result<AvailabilityResponse> {
        let query = request.validate()?;
        Ok(self.query(&query))
    }

    /// Search an already-validated query.
    pub fn query(&self, query: &SlotQuery) -> AvailabilityResponse {
        find_available_slots(query, &self.source)
    }
}
