//! # agenda-core
//!
//! In-process appointment-scheduling engine: creates, validates, reschedules,
//! cancels, and reports on timed appointments while guaranteeing that no two
//! active appointments occupy the same date/time slot.
//!
//! All times are naive local wall-clock values in a single fixed time zone;
//! dates are `DD/MM/YYYY` strings and start times are 24-hour `HH:MM` strings.
//! Every operation is a full read-modify-write against the repository's
//! current snapshot, and a failed operation leaves the persisted set
//! untouched.
//!
//! ## Quick start
//!
//! ```rust
//! use agenda_core::{AgendaService, Appointment, MemoryRepo, SlotEngine};
//!
//! let mut agenda = AgendaService::new(MemoryRepo::new(), SlotEngine::default());
//!
//! let ana = agenda
//!     .create(Appointment::new("01/01/2025", "09:00", "Ana", "", "checkup"))
//!     .unwrap();
//!
//! // The slot is now held by an active appointment — double-booking fails.
//! let double = agenda.create(Appointment::new("01/01/2025", "09:00", "Luis", "", "follow-up"));
//! assert!(double.is_err());
//!
//! // Cancelling frees the slot for re-booking.
//! agenda.cancel(&ana.id, "patient requested").unwrap();
//! assert_eq!(agenda.suggest_next("01/01/2025").unwrap().as_deref(), Some("09:00"));
//! ```
//!
//! ## Modules
//!
//! - [`validate`] — pure date/time/phone format validators
//! - [`slots`] — `SlotEngine`, the daily start-time sequence generator
//! - [`appointment`] — the `Appointment` entity, its status state machine,
//!   and the append-only history log
//! - [`repository`] — the read-all/write-all store contract plus JSON-file
//!   and in-memory implementations
//! - [`service`] — `AgendaService`, the conflict-checked orchestrator
//! - [`error`] — error taxonomy (`Validation` / `Conflict` / `NotFound`)

pub mod appointment;
pub mod error;
pub mod repository;
pub mod service;
pub mod slots;
pub mod validate;

pub use appointment::{Appointment, HistoryEntry, Status};
pub use error::{AgendaError, Result};
pub use repository::{AppointmentRepo, JsonFileRepo, MemoryRepo};
pub use service::{AgendaService, AgendaStats};
pub use slots::SlotEngine;
