//! Appointment lookup capability and the in-memory calendar store.
//!
//! The engine only talks to [`AppointmentSource`]. [`CalendarStore`] is the
//! stock implementation: built once (in code or from a directory of JSON
//! calendar files), then shared read-only.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::SourceError;
use crate::model::Appointment;

/// Read-only access to calendars and their appointments.
pub trait AppointmentSource {
    /// True if the calendar is known, even when it has no appointments.
    fn exists(&self, calendar_id: &Uuid) -> bool;

    /// All appointments stored for the calendar, unfiltered by time.
    /// Empty when the calendar is unknown or has none.
    fn appointments_for(&self, calendar_id: &Uuid) -> Vec<Appointment>;
}

impl<S: AppointmentSource + ?Sized> AppointmentSource for &S {
    fn exists(&self, calendar_id: &Uuid) -> bool {
        (**self).exists(calendar_id)
    }

    fn appointments_for(&self, calendar_id: &Uuid) -> Vec<Appointment> {
        (**self).appointments_for(calendar_id)
    }
}

/// On-disk calendar file body.
#[derive(Debug, Default, Deserialize)]
struct CalendarFile {
    #[serde(default)]
    appointments: Vec<Appointment>,
}

/// Immutable-after-load map from calendar id to appointments.
#[derive(Debug, Clone, Default)]
pub struct CalendarStore {
    calendars: HashMap<Uuid, Vec<Appointment>>,
}

impl CalendarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a calendar, replacing any previous entry for the same id.
    #[must_use]
    pub fn with_calendar(mut self, calendar_id: Uuid, appointments: Vec<Appointment>) -> Self {
        self.insert_calendar(calendar_id, appointments);
        self
    }

    pub fn insert_calendar(&mut self, calendar_id: Uuid, appointments: Vec<Appointment>) {
        self.calendars.insert(calendar_id, appointments);
    }

    /// Load every `<uuid>.json` file in `dir` as one calendar.
    ///
    /// Files without a `.json` extension are ignored. JSON files whose stem
    /// is not a UUID are skipped with a warning. A calendar file without an
    /// `appointments` array still registers the calendar.
    ///
    /// # Errors
    /// `SourceError::Io` if the directory or a file cannot be read,
    /// `SourceError::Json` if a calendar file is malformed,
    /// `SourceError::InvertedAppointment` if an appointment ends before it
    /// starts.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, SourceError> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|source| SourceError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut store = Self::new();
        for entry in entries {
            let path = entry
                .map_err(|source| SourceError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?
                .path();

            if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }

            let Some(calendar_id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| Uuid::parse_str(stem).ok())
            else {
                warn!(path = %path.display(), "skipping calendar file without a UUID name");
                continue;
            };

            let body = fs::read_to_string(&path).map_err(|source| SourceError::Io {
                path: path.clone(),
                source,
            })?;
            let file: CalendarFile =
                serde_json::from_str(&body).map_err(|source| SourceError::Json {
                    path: path.clone(),
                    source,
                })?;

            if let Some(index) = file.appointments.iter().position(|a| !a.is_well_formed()) {
                return Err(SourceError::InvertedAppointment { path, index });
            }

            debug!(%calendar_id, appointments = file.appointments.len(), "loaded calendar");
            store.insert_calendar(calendar_id, file.appointments);
        }

        info!(dir = %dir.display(), calendars = store.len(), "calendar store loaded");
        Ok(store)
    }

    /// Known calendar ids, sorted.
    pub fn calendar_ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self.calendars.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of stored appointments, or `None` for an unknown calendar.
    pub fn appointment_count(&self, calendar_id: &Uuid) -> Option<usize> {
        self.calendars.get(calendar_id).map(Vec::len)
    }

    pub fn len(&self) -> usize {
        self.calendars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calendars.is_empty()
    }
}

impl AppointmentSource for CalendarStore {
    fn exists(&self, calendar_id: &Uuid) -> bool {
        self.calendars.contains_key(calendar_id)
    }

    fn appointments_for(&self, calendar_id: &Uuid) -> Vec<Appointment> {
        self.calendars.get(calendar_id).cloned().unwrap_or_default()
    }
}
