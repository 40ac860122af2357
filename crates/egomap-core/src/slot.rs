use crate::record::StakeholderRecord;
use std::io;
use std::path::{Path, PathBuf};

/// Default slot file name, mirroring the original app's storage key.
pub const DEFAULT_SLOT_FILE_NAME: &str = "egomap_items.json";

/// Outcome of loading the save slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotStatus {
    /// Nothing has been saved yet ("Nothing saved yet." notice, not an error).
    Empty,
    /// Records loaded from the slot. Malformed slot contents degrade to an
    /// empty list rather than failing.
    Loaded(Vec<StakeholderRecord>),
}

/// A single named save slot holding the full record list as a JSON array.
#[derive(Debug, Clone)]
pub struct SaveSlot {
    path: PathBuf,
}

impl SaveSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A slot file with the default name inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_SLOT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, records: &[StakeholderRecord]) -> io::Result<()> {
        let json = serde_json::to_string(records).unwrap_or_else(|_| "[]".to_string());
        std::fs::write(&self.path, json)
    }

    /// Loads the slot.
    ///
    /// An absent slot is [`SlotStatus::Empty`]; a slot whose contents no
    /// longer parse yields an empty record list. Only genuine I/O failures
    /// (permissions, etc.) are returned as errors.
    pub fn load(&self) -> io::Result<SlotStatus> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(SlotStatus::Empty),
            Err(err) => return Err(err),
        };
        let records: Vec<StakeholderRecord> = serde_json::from_str(&raw).unwrap_or_default();
        Ok(SlotStatus::Loaded(records))
    }
}
