//! # slot-engine
//!
//! Finds bookable, fixed-duration slots across calendars.
//!
//! For each requested calendar the engine takes the existing appointments,
//! keeps those touching the search period, subtracts them from the period and
//! cuts what is left into back-to-back slots. Requests are validated as a
//! whole first; unknown calendars are then reported per entry.
//!
//! ## Modules
//!
//! - [`period`] -- `"<start>/<end>"` parsing into a [`SearchPeriod`]
//! - [`request`] -- raw request validation into a [`SlotQuery`]
//! - [`freebusy`] -- gap derivation and slot tiling
//! - [`availability`] -- per-calendar search and aggregation
//! - [`source`] -- the [`AppointmentSource`] capability and [`CalendarStore`]
//! - [`model`] -- appointments, slots, and response shapes
//! - [`error`] -- Error types
//!
//! ## Quick start
//!
//! ```rust
//! use slot_engine::{AvailabilityEngine, AvailabilityRequest, CalendarStore};
//! use uuid::Uuid;
//!
//! let id = Uuid::parse_str("48cadf26-975e-11e5-b9c2-c8e0eb18c1e9").unwrap();
//! let engine = AvailabilityEngine::new(CalendarStore::new().with_calendar(id, vec![]));
//!
//! let request = AvailabilityRequest::new(
//!     vec![id.to_string()],
//!     15,
//!     "2019-04-23T10:00:00Z/2019-04-23T11:00:00Z",
//! );
//! let response = engine.search(&request).unwrap();
//! assert_eq!(response.available_slots[0].slots().unwrap().len(), 4);
//! ```

pub mod availability;
pub mod error;
pub mod freebusy;
pub mod model;
pub mod period;
pub mod request;
pub mod source;

pub use availability::{compute_availability, find_available_slots, AvailabilityEngine};
pub use error::{SourceError, ValidationError};
pub use model::{Appointment, AvailabilityResponse, AvailableSlot, CalendarResult};
pub use period::{validate_period, SearchPeriod};
pub use request::{AvailabilityRequest, SlotDuration, SlotQuery, SlotRequest};
pub use source::{AppointmentSource, CalendarStore};
