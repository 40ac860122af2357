use crate::record::StakeholderRecord;
use serde_json::Value;

/// Failures surfaced by [`import_records`].
///
/// Both variants are recoverable: the caller keeps its current records and
/// shows a notice.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Couldn't parse JSON.")]
    Parse(#[source] serde_json::Error),

    #[error("Invalid JSON format.")]
    NotAnArray,
}

/// Serializes the record list as a pretty-printed JSON array, the shape
/// written to `stakeholders.json`.
pub fn export_records(records: &[StakeholderRecord]) -> String {
    // Serializing plain data structs cannot fail.
    serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
}

/// Parses an imported JSON document into a record list.
///
/// The top-level value must be an array; anything else is a shape failure.
/// Individual entries are taken permissively (missing fields get defaults,
/// nothing is clamped) so files exported by older versions still load.
pub fn import_records(text: &str) -> Result<Vec<StakeholderRecord>, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::Parse)?;
    let Value::Array(entries) = value else {
        return Err(ImportError::NotAnArray);
    };
    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        let record: StakeholderRecord =
            serde_json::from_value(entry).map_err(ImportError::Parse)?;
        records.push(record);
    }
    Ok(records)
}
