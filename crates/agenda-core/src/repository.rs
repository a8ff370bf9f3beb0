//! Repository contract and the two bundled implementations.
//!
//! The service treats the repository as the single source of truth: every
//! operation reads the full snapshot, computes in memory, and writes the full
//! resulting set back. The contract is deliberately read-all/write-all — no
//! incremental upserts at the storage boundary.

use std::fs;
use std::path::{Path, PathBuf};

use crate::appointment::Appointment;
use crate::error::Result;

/// Durable store of appointment records.
pub trait AppointmentRepo {
    /// Full current snapshot. A missing store reads as an empty sequence,
    /// never an error.
    fn all(&self) -> Result<Vec<Appointment>>;

    /// Atomically replace the entire persisted set with `items`.
    fn save_many(&mut self, items: &[Appointment]) -> Result<()>;
}

/// Snapshot persisted as a pretty-printed JSON array on disk.
#[derive(Debug)]
pub struct JsonFileRepo {
    path: PathBuf,
}

impl JsonFileRepo {
    /// Open (or prepare) a repository at `path`, creating parent directories.
    /// The file itself is only written on the first `save_many`.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(JsonFileRepo { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AppointmentRepo for JsonFileRepo {
    fn all(&self) -> Result<Vec<Appointment>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save_many(&mut self, items: &[Appointment]) -> Result<()> {
        let raw = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// In-memory snapshot behind the same contract, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryRepo {
    items: Vec<Appointment>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        MemoryRepo::default()
    }
}

impl AppointmentRepo for MemoryRepo {
    fn all(&self) -> Result<Vec<Appointment>> {
        Ok(self.items.clone())
    }

    fn save_many(&mut self, items: &[Appointment]) -> Result<()> {
        self.items = items.to_vec();
        Ok(())
    }
}
