//! The `Appointment` entity and its status state machine.
//!
//! An appointment is a flat record keyed by an opaque UUID, with a fixed-format
//! date (`DD/MM/YYYY`) and start time (`HH:MM`), free-text patient fields, and
//! an append-only history log of status transitions and notes. Reschedules
//! chain records together via `previous_appointment_id`/`next_appointment_id`
//! back/forward links; the links are lookup aids, not ownership edges.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Appointment lifecycle status.
///
/// `Scheduled` is the only state that admits further transitions; the other
/// four are terminal. Only `Cancelled` and `Rescheduled` are excluded from
/// slot-exclusivity conflict checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Status {
    Scheduled,
    Attended,
    Cancelled,
    NoShow,
    Rescheduled,
}

impl Status {
    /// Every status, in declaration order. Used for zero-filled statistics.
    pub const ALL: [Status; 5] = [
        Status::Scheduled,
        Status::Attended,
        Status::Cancelled,
        Status::NoShow,
        Status::Rescheduled,
    ];

    /// An active appointment is the only kind that blocks its (date, time)
    /// slot. Cancelled and rescheduled records free the slot for re-booking.
    pub fn is_active(self) -> bool {
        !matches!(self, Status::Cancelled | Status::Rescheduled)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Scheduled => "Scheduled",
            Status::Attended => "Attended",
            Status::Cancelled => "Cancelled",
            Status::NoShow => "NoShow",
            Status::Rescheduled => "Rescheduled",
        };
        f.write_str(name)
    }
}

/// One line of an appointment's append-only history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the entry was recorded. Entries are appended in timestamp order
    /// and never deleted or reordered.
    pub at: NaiveDateTime,
    /// Human-readable description (status transition or free-text note).
    pub note: String,
}

/// A timed appointment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    /// Opaque unique identifier, assigned at creation, immutable thereafter.
    pub id: String,
    /// Calendar date, DD/MM/YYYY.
    pub date: String,
    /// Start time, 24-hour HH:MM.
    pub time: String,
    /// Length of the appointment in minutes.
    pub duration_minutes: u32,
    /// Patient name (required non-empty at creation).
    pub patient: String,
    /// Contact phone; optional, 9 digits after stripping separators.
    #[serde(default)]
    pub phone: String,
    /// Reason for the visit (required non-empty at creation).
    pub description: String,
    pub status: Status,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Append-only log of status changes and notes.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    /// Back link: set on a record created by a reschedule, pointing at the
    /// appointment it replaced.
    #[serde(default)]
    pub previous_appointment_id: Option<String>,
    /// Forward link: set on a rescheduled original, pointing at its replacement.
    #[serde(default)]
    pub next_appointment_id: Option<String>,
    /// Free-text reason captured on cancellation or rescheduling.
    #[serde(default)]
    pub change_reason: Option<String>,
}

/// Default appointment length when the caller does not override it.
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl Appointment {
    /// Build a new appointment with a fresh UUID, `Scheduled` status, and the
    /// default duration. Text inputs are trimmed. Format validation is the
    /// service's job — construction never fails.
    pub fn new(date: &str, time: &str, patient: &str, phone: &str, description: &str) -> Self {
        let stamp = now();
        Appointment {
            id: Uuid::new_v4().to_string(),
            date: date.trim().to_string(),
            time: time.trim().to_string(),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            patient: patient.trim().to_string(),
            phone: phone.trim().to_string(),
            description: description.trim().to_string(),
            status: Status::Scheduled,
            created_at: stamp,
            updated_at: stamp,
            history: Vec::new(),
            previous_appointment_id: None,
            next_appointment_id: None,
            change_reason: None,
        }
    }

    /// Transition to `new_status`, logging the change in the history and
    /// capturing `reason` as the change reason. One shared timestamp covers
    /// the history entry and `updated_at`.
    pub fn record_status(&mut self, new_status: Status, reason: &str) {
        let stamp = now();
        self.history.push(HistoryEntry {
            at: stamp,
            note: format!(
                "Status change: {} -> {}. Reason: {}",
                self.status, new_status, reason
            ),
        });
        self.status = new_status;
        self.change_reason = Some(reason.to_string());
        self.updated_at = stamp;
    }

    /// Bump `updated_at` to the current instant.
    pub fn touch(&mut self) {
        self.updated_at = now();
    }

    /// Append a free-text note to the history log.
    pub fn add_note(&mut self, note: &str) {
        let stamp = now();
        self.history.push(HistoryEntry {
            at: stamp,
            note: note.to_string(),
        });
        self.updated_at = stamp;
    }

    /// Mark this appointment `Rescheduled` and build its replacement at
    /// (`new_date`, `new_time`), wiring the back/forward links between the
    /// two records. The replacement copies patient, phone, and duration, and
    /// prefixes its description with the origin id.
    ///
    /// Conflict checking and persistence are the caller's responsibility;
    /// this only performs the in-memory transition on both values.
    pub fn reschedule_to(&mut self, new_date: &str, new_time: &str, reason: &str) -> Appointment {
        self.record_status(Status::Rescheduled, reason);

        let mut replacement = Appointment::new(
            new_date,
            new_time,
            &self.patient,
            &self.phone,
            &format!("Rescheduled from appointment {}. {}", self.id, self.description),
        );
        replacement.duration_minutes = self.duration_minutes;
        replacement.previous_appointment_id = Some(self.id.clone());
        replacement.add_note(&format!("Appointment rescheduled. Reason: {reason}"));

        self.next_appointment_id = Some(replacement.id.clone());
        replacement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_appointment_trims_and_defaults() {
        let a = Appointment::new("01/01/2025", " 09:00 ", " Ana ", "", "checkup");
        assert_eq!(a.time, "09:00");
        assert_eq!(a.patient, "Ana");
        assert_eq!(a.status, Status::Scheduled);
        assert_eq!(a.duration_minutes, DEFAULT_DURATION_MINUTES);
        assert_eq!(a.id.len(), 36); // UUID format
        assert!(a.history.is_empty());
    }

    #[test]
    fn record_status_logs_transition() {
        let mut a = Appointment::new("01/01/2025", "09:00", "Ana", "", "checkup");
        a.record_status(Status::Cancelled, "patient requested");
        assert_eq!(a.status, Status::Cancelled);
        assert_eq!(a.change_reason.as_deref(), Some("patient requested"));
        assert_eq!(a.history.len(), 1);
        assert!(a.history[0].note.contains("Scheduled -> Cancelled"));
        assert_eq!(a.history[0].at, a.updated_at);
    }

    #[test]
    fn only_cancelled_and_rescheduled_free_the_slot() {
        assert!(Status::Scheduled.is_active());
        assert!(Status::Attended.is_active());
        assert!(Status::NoShow.is_active());
        assert!(!Status::Cancelled.is_active());
        assert!(!Status::Rescheduled.is_active());
    }

    #[test]
    fn reschedule_links_both_records() {
        let mut original = Appointment::new("01/01/2025", "09:00", "Ana", "", "checkup");
        let replacement = original.reschedule_to("02/01/2025", "10:00", "clinic closed");

        assert_eq!(original.status, Status::Rescheduled);
        assert_eq!(original.next_appointment_id.as_deref(), Some(replacement.id.as_str()));
        assert_eq!(
            replacement.previous_appointment_id.as_deref(),
            Some(original.id.as_str())
        );
        assert!(replacement.description.contains(&original.id));
        assert_eq!(replacement.status, Status::Scheduled);
    }
}
