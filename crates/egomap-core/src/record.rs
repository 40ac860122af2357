use serde::{Deserialize, Serialize};

/// Default category assigned when the user leaves the field blank.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Form defaults (matching the entry form's initial slider positions).
pub const DEFAULT_IMPORTANCE: i64 = 60;
pub const DEFAULT_PROXIMITY: i64 = 40;
pub const DEFAULT_STRENGTH: f64 = 6.0;

pub const IMPORTANCE_RANGE: (i64, i64) = (0, 100);
pub const PROXIMITY_RANGE: (i64, i64) = (0, 100);
pub const STRENGTH_RANGE: (f64, f64) = (0.0, 10.0);

/// A single stakeholder entry.
///
/// Serde field names match the JSON emitted by the original web app so that
/// exported files round-trip between the two. Every field carries a default:
/// wholesale import is permissive and must accept partial entries (see
/// [`crate::store::RecordStore::replace_all`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StakeholderRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub importance: i64,
    pub proximity: i64,
    pub strength: f64,
    pub notes: String,
}

impl Default for StakeholderRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            importance: DEFAULT_IMPORTANCE,
            proximity: DEFAULT_PROXIMITY,
            strength: DEFAULT_STRENGTH,
            notes: String::new(),
        }
    }
}

impl StakeholderRecord {
    /// Creates a record with a fresh v4 id and form defaults.
    pub fn fresh(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Normalizes a record the way a successful form submit does: trims the
    /// string fields, substitutes the default category for a blank one and
    /// clamps the numeric ratings into their ranges.
    pub fn normalized(&self) -> Self {
        let category = self.category.trim();
        Self {
            id: self.id.clone(),
            name: self.name.trim().to_string(),
            category: if category.is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                category.to_string()
            },
            importance: self
                .importance
                .clamp(IMPORTANCE_RANGE.0, IMPORTANCE_RANGE.1),
            proximity: self.proximity.clamp(PROXIMITY_RANGE.0, PROXIMITY_RANGE.1),
            strength: self.strength.clamp(STRENGTH_RANGE.0, STRENGTH_RANGE.1),
            notes: self.notes.trim().to_string(),
        }
    }
}
