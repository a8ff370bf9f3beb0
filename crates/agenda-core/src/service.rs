//! The agenda orchestrator: conflict-checked booking, the status state
//! machine, reschedule chains, queries, and aggregate statistics.
//!
//! Every operation is a full read-modify-write against the repository's
//! current snapshot — there is no cache between calls, and a failed
//! operation never writes, so the persisted set is untouched on any error.
//! `&mut self` on the mutating operations makes single-writer use the only
//! option within one service value; sharing a service across writers
//! requires external serialization.

use chrono::NaiveTime;
use std::collections::{BTreeMap, HashSet};

use crate::appointment::{Appointment, Status};
use crate::error::{AgendaError, Result};
use crate::repository::AppointmentRepo;
use crate::slots::SlotEngine;
use crate::validate::{parse_date, parse_time, valid_date, valid_phone, valid_time};

/// Aggregate counters over the full appointment set.
#[derive(Debug, Clone, PartialEq)]
pub struct AgendaStats {
    /// Total records, every status included.
    pub total: usize,
    /// Per-status counts; every status is present, zero-filled.
    pub by_status: BTreeMap<Status, usize>,
    /// Records carrying a back link, i.e. created by a reschedule.
    pub reschedules: usize,
    /// Mean whole days between creation and the appointment date, over
    /// records currently Scheduled or Attended. 0.0 when that set is empty.
    pub mean_lead_days: f64,
}

/// Orchestrates appointment operations against a repository snapshot.
pub struct AgendaService<R: AppointmentRepo> {
    repo: R,
    slots: SlotEngine,
}

impl<R: AppointmentRepo> AgendaService<R> {
    pub fn new(repo: R, slots: SlotEngine) -> Self {
        AgendaService { repo, slots }
    }

    /// Build a draft appointment whose duration defaults to the engine's
    /// configured slot duration. The draft is not persisted until [`create`].
    ///
    /// [`create`]: AgendaService::create
    pub fn new_appointment(
        &self,
        date: &str,
        time: &str,
        patient: &str,
        phone: &str,
        description: &str,
    ) -> Appointment {
        let mut a = Appointment::new(date, time, patient, phone, description);
        a.duration_minutes = self.slots.slot_minutes();
        a
    }

    /// Validate and persist a new appointment.
    ///
    /// # Errors
    /// `Validation` for a missing patient/description or a malformed
    /// date/time/phone; `Conflict` when an active appointment already holds
    /// the exact (date, time). On any error nothing is written.
    pub fn create(&mut self, appointment: Appointment) -> Result<Appointment> {
        let mut items = self.repo.all()?;
        self.validate(&items, &appointment, None)?;
        upsert(&mut items, appointment.clone());
        self.repo.save_many(&items)?;
        Ok(appointment)
    }

    /// Replace the fields of the appointment identified by `id` with those of
    /// `appointment` (the stored identity always stays `id`). The record may
    /// keep its own slot — conflict checking excludes `id`.
    pub fn edit(&mut self, id: &str, mut appointment: Appointment) -> Result<Appointment> {
        let mut items = self.repo.all()?;
        if !items.iter().any(|a| a.id == id) {
            return Err(AgendaError::NotFound(id.to_string()));
        }
        self.validate(&items, &appointment, Some(id))?;
        appointment.id = id.to_string();
        appointment.touch();
        upsert(&mut items, appointment.clone());
        self.repo.save_many(&items)?;
        Ok(appointment)
    }

    /// Cancel an appointment, keeping the record for history and reporting.
    /// Cancelling an already-cancelled record succeeds and appends another
    /// history line.
    pub fn cancel(&mut self, id: &str, reason: &str) -> Result<Appointment> {
        self.mark_status(id, Status::Cancelled, reason)
    }

    /// Transition an appointment to `new_status` with a history entry and a
    /// fresh `updated_at`.
    pub fn mark_status(&mut self, id: &str, new_status: Status, reason: &str) -> Result<Appointment> {
        let mut items = self.repo.all()?;
        let target = items
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AgendaError::NotFound(id.to_string()))?;
        target.record_status(new_status, reason);
        let updated = target.clone();
        self.repo.save_many(&items)?;
        Ok(updated)
    }

    /// Append a timestamped free-text note to an appointment's history.
    pub fn add_note(&mut self, id: &str, note: &str) -> Result<Appointment> {
        let mut items = self.repo.all()?;
        let target = items
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AgendaError::NotFound(id.to_string()))?;
        target.add_note(note);
        let updated = target.clone();
        self.repo.save_many(&items)?;
        Ok(updated)
    }

    /// Move an appointment to a new slot by chaining a replacement record.
    ///
    /// The original becomes `Rescheduled` (and stops blocking its slot) with
    /// a forward link to the replacement; the replacement carries the back
    /// link and a history entry with `reason`. Both records are persisted in
    /// the same write. On validation or conflict failure neither record is
    /// mutated in the store. Returns the replacement.
    pub fn reschedule(
        &mut self,
        id: &str,
        new_date: &str,
        new_time: &str,
        reason: &str,
    ) -> Result<Appointment> {
        let mut items = self.repo.all()?;
        let index = items
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| AgendaError::NotFound(id.to_string()))?;

        // In-memory transition first: with the original already Rescheduled
        // in the working snapshot, re-booking its own old slot is allowed.
        let replacement = items[index].reschedule_to(new_date, new_time, reason);
        self.validate(&items, &replacement, None)?;

        items.push(replacement.clone());
        self.repo.save_many(&items)?;
        Ok(replacement)
    }

    /// Physically remove a record. Distinct from [`cancel`], which keeps it.
    ///
    /// [`cancel`]: AgendaService::cancel
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let mut items = self.repo.all()?;
        let index = items
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| AgendaError::NotFound(id.to_string()))?;
        items.remove(index);
        self.repo.save_many(&items)?;
        Ok(())
    }

    /// All records ordered by (date, time) ascending. The fixed formats are
    /// parsed for comparison — DD/MM/YYYY does not sort lexically.
    pub fn list(&self) -> Result<Vec<Appointment>> {
        let mut items = self.repo.all()?;
        items.sort_by_key(|a| (parse_date(&a.date), parse_time(&a.time)));
        Ok(items)
    }

    /// Every appointment for `patient` (case-insensitive exact match on the
    /// name), terminal statuses included — audit view, not a booking view.
    pub fn patient_history(&self, patient: &str) -> Result<Vec<Appointment>> {
        let needle = patient.to_lowercase();
        Ok(self
            .repo
            .all()?
            .into_iter()
            .filter(|a| a.patient.to_lowercase() == needle)
            .collect())
    }

    /// First free generated slot on `date`, considering only active
    /// appointments as occupying. `None` when the date is invalid or the day
    /// is fully booked.
    pub fn suggest_next(&self, date: &str) -> Result<Option<String>> {
        let occupied: HashSet<(String, String)> = self
            .repo
            .all()?
            .into_iter()
            .filter(|a| a.status.is_active())
            .map(|a| (a.date, a.time))
            .collect();
        Ok(self.slots.suggest_next(date, &occupied))
    }

    /// Aggregate statistics over the full current snapshot.
    pub fn statistics(&self) -> Result<AgendaStats> {
        let items = self.repo.all()?;

        let mut by_status: BTreeMap<Status, usize> =
            Status::ALL.iter().map(|s| (*s, 0)).collect();
        for a in &items {
            if let Some(count) = by_status.get_mut(&a.status) {
                *count += 1;
            }
        }

        let reschedules = items
            .iter()
            .filter(|a| a.previous_appointment_id.is_some())
            .count();

        let lead_days: Vec<i64> = items
            .iter()
            .filter(|a| matches!(a.status, Status::Scheduled | Status::Attended))
            .filter_map(|a| {
                let date = parse_date(&a.date)?;
                Some((date.and_time(NaiveTime::MIN) - a.created_at).num_days())
            })
            .collect();
        let mean_lead_days = if lead_days.is_empty() {
            0.0
        } else {
            lead_days.iter().sum::<i64>() as f64 / lead_days.len() as f64
        };

        Ok(AgendaStats {
            total: items.len(),
            by_status,
            reschedules,
            mean_lead_days,
        })
    }

    /// Shared rule for create/edit/reschedule: field formats first, then the
    /// slot-exclusivity scan. `exclude_id` lets a record keep its own slot
    /// when editing.
    fn validate(
        &self,
        items: &[Appointment],
        candidate: &Appointment,
        exclude_id: Option<&str>,
    ) -> Result<()> {
        if candidate.patient.is_empty() {
            return Err(AgendaError::Validation("patient is required".to_string()));
        }
        if candidate.description.is_empty() {
            return Err(AgendaError::Validation("description is required".to_string()));
        }
        if !valid_date(&candidate.date) {
            return Err(AgendaError::Validation(
                "invalid date (use DD/MM/YYYY)".to_string(),
            ));
        }
        if !valid_time(&candidate.time) {
            return Err(AgendaError::Validation("invalid time (use HH:MM)".to_string()));
        }
        if !valid_phone(&candidate.phone) {
            return Err(AgendaError::Validation(
                "invalid phone (9 digits expected)".to_string(),
            ));
        }
        if slot_taken(items, &candidate.date, &candidate.time, exclude_id) {
            return Err(AgendaError::Conflict {
                date: candidate.date.clone(),
                time: candidate.time.clone(),
            });
        }
        Ok(())
    }
}

/// Linear scan for the slot-exclusivity invariant: a candidate (date, time)
/// conflicts iff some other record holds it with an active status. O(n) by
/// design — the working set is a single calendar.
fn slot_taken(items: &[Appointment], date: &str, time: &str, exclude_id: Option<&str>) -> bool {
    items.iter().any(|a| {
        exclude_id != Some(a.id.as_str())
            && a.status.is_active()
            && a.date == date
            && a.time == time
    })
}

/// Replace the record with a matching id, or append when there is none.
fn upsert(items: &mut Vec<Appointment>, appointment: Appointment) {
    match items.iter_mut().find(|a| a.id == appointment.id) {
        Some(existing) => *existing = appointment,
        None => items.push(appointment),
    }
}
