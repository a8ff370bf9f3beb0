//! Error types for agenda-core operations.
//!
//! Three recoverable kinds cover every business failure (`Validation`,
//! `Conflict`, `NotFound`); storage failures from the repository collaborator
//! propagate unchanged as `Io`/`Json` and are never interpreted or retried
//! by the service layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgendaError {
    /// Malformed date/time/phone, or a required field was empty.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested (date, time) slot is already held by an active appointment.
    #[error("Slot already taken at {date} {time}")]
    Conflict { date: String, time: String },

    /// The operation referenced an appointment id that does not exist.
    #[error("Appointment not found: {0}")]
    NotFound(String),

    /// Opaque storage failure from the repository (file access).
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Opaque storage failure from the repository (snapshot (de)serialization).
    #[error("Storage format error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout agenda-core.
pub type Result<T> = std::result::Result<T, AgendaError>;
