use crate::error::{Error, Result};
use crate::record::StakeholderRecord;

/// Owner of the in-memory stakeholder sequence.
///
/// Insertion order is preserved across upserts (an edit replaces the record
/// in place, it does not move it). The store also owns the current
/// edit-target id so that form logic does not need ambient globals.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<StakeholderRecord>,
    editing: Option<String>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates, normalizes and writes a record.
    ///
    /// A record whose name trims to empty is rejected and the store is left
    /// unchanged. A record with a known id replaces the existing entry in
    /// place; otherwise it is appended. A successful upsert clears the
    /// edit target.
    pub fn upsert(&mut self, record: StakeholderRecord) -> Result<()> {
        let record = record.normalized();
        if record.name.is_empty() {
            return Err(Error::EmptyName);
        }
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                tracing::debug!(id = %record.id, "replacing record");
                *existing = record;
            }
            None => {
                tracing::debug!(id = %record.id, "appending record");
                self.records.push(record);
            }
        }
        self.editing = None;
        Ok(())
    }

    /// Removes the record with the given id. No-op if absent.
    pub fn remove(&mut self, id: &str) {
        self.records.retain(|r| r.id != id);
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
    }

    /// Wholesale replacement, used by load/import.
    ///
    /// Deliberately permissive: entries are taken as-is, with no clamping
    /// and no id-uniqueness re-check, so an export→import round-trip is
    /// byte-faithful.
    pub fn replace_all(&mut self, records: Vec<StakeholderRecord>) {
        tracing::debug!(count = records.len(), "replacing all records");
        self.records = records;
        self.editing = None;
    }

    /// The current ordered record sequence.
    pub fn list(&self) -> &[StakeholderRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&StakeholderRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Marks a record as the current edit target.
    pub fn begin_edit(&mut self, id: &str) -> Result<&StakeholderRecord> {
        let record = self
            .records
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::UnknownRecord { id: id.to_string() })?;
        self.editing = Some(record.id.clone());
        Ok(record)
    }

    /// The id of the record currently being edited, if any.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn clear_edit(&mut self) {
        self.editing = None;
    }
}
