#![forbid(unsafe_code)]

//! Stakeholder record model + store (headless).
//!
//! Design goals:
//! - deterministic, testable state transitions (the store is the sole owner
//!   of the record sequence; renderers hold derived, transient copies)
//! - validation at the write boundary, permissive wholesale replacement
//! - JSON shapes compatible with files produced by the original web app

pub mod codec;
pub mod error;
pub mod record;
pub mod slot;
pub mod store;

pub use codec::{ImportError, export_records, import_records};
pub use error::{Error, Result};
pub use record::StakeholderRecord;
pub use slot::{SaveSlot, SlotStatus};
pub use store::RecordStore;

/// Default file name for JSON exports.
pub const EXPORT_JSON_FILE_NAME: &str = "stakeholders.json";
/// Default file name for raster exports.
pub const EXPORT_PNG_FILE_NAME: &str = "stakeholder-map.png";

#[cfg(test)]
mod tests;
