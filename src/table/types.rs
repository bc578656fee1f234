use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Column names a table source must provide, in display order.
pub const COLUMNS: [&str; 9] = [
    "name",
    "read_speed",
    "write_speed",
    "capacity",
    "cost_per_gb",
    "mtbf_hours",
    "power_watts",
    "security_score",
    "scalability_score",
];

/// Qualitative ratings are expressed on a 1-5 scale.
pub const RATING_MIN: f64 = 1.0;
pub const RATING_MAX: f64 = 5.0;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("table has no rows")]
    Empty,

    #[error("row {row}: technology name is blank")]
    BlankName { row: usize },

    #[error("technology '{0}' appears more than once")]
    DuplicateName(String),

    #[error("{name}.{field}: {value} is not a valid value ({reason})")]
    InvalidValue {
        name: String,
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("unsupported table format '{0}' (expected csv, yaml, yml or json)")]
    UnsupportedFormat(String),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid YAML: {0}")]
    Yaml(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Metrics for one storage technology.
///
/// Speeds are MB/s, capacity is TB, cost is USD per GB. An `mtbf_hours` of 0
/// means the technology has no device-level MTBF (e.g. cloud storage).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnologyRecord {
    pub name: String,
    pub read_speed: f64,
    pub write_speed: f64,
    pub capacity: f64,
    pub cost_per_gb: f64,
    pub mtbf_hours: f64,
    pub power_watts: f64,
    pub security_score: f64,
    pub scalability_score: f64,
}

impl TechnologyRecord {
    /// Whether this technology has a meaningful MTBF value
    pub fn has_mtbf(&self) -> bool {
        self.mtbf_hours != 0.0
    }

    fn numeric_fields(&self) -> [(&'static str, f64); 8] {
        [
            ("read_speed", self.read_speed),
            ("write_speed", self.write_speed),
            ("capacity", self.capacity),
            ("cost_per_gb", self.cost_per_gb),
            ("mtbf_hours", self.mtbf_hours),
            ("power_watts", self.power_watts),
            ("security_score", self.security_score),
            ("scalability_score", self.scalability_score),
        ]
    }
}

/// Ordered, immutable snapshot of technology metrics.
///
/// Only constructed through [`ReferenceTable::new`], which trims names and
/// enforces unique non-blank names and finite, non-negative numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReferenceTable {
    records: Vec<TechnologyRecord>,
}

impl ReferenceTable {
    pub fn new(mut records: Vec<TechnologyRecord>) -> Result<Self, TableError> {
        if records.is_empty() {
            return Err(TableError::Empty);
        }

        // Lookups by name match the trimmed form
        for record in records.iter_mut() {
            let trimmed = record.name.trim();
            if trimmed.len() != record.name.len() {
                record.name = trimmed.to_string();
            }
        }

        let mut seen = HashSet::new();
        for (idx, record) in records.iter().enumerate() {
            let name = record.name.as_str();
            if name.is_empty() {
                return Err(TableError::BlankName { row: idx + 1 });
            }
            if !seen.insert(name.to_string()) {
                return Err(TableError::DuplicateName(name.to_string()));
            }

            for (field, value) in record.numeric_fields() {
                let reason = if !value.is_finite() {
                    Some("must be finite")
                } else if value < 0.0 {
                    Some("must be non-negative")
                } else {
                    None
                };
                if let Some(reason) = reason {
                    return Err(TableError::InvalidValue {
                        name: name.to_string(),
                        field,
                        value,
                        reason,
                    });
                }
            }

            for (field, value) in [
                ("security_score", record.security_score),
                ("scalability_score", record.scalability_score),
            ] {
                if !(RATING_MIN..=RATING_MAX).contains(&value) {
                    return Err(TableError::InvalidValue {
                        name: name.to_string(),
                        field,
                        value,
                        reason: "ratings must be between 1 and 5",
                    });
                }
            }
        }

        Ok(Self { records })
    }

    /// Wrap records already known to satisfy the table invariants
    pub(super) fn from_trusted(records: Vec<TechnologyRecord>) -> Self {
        debug_assert!(!records.is_empty());
        Self { records }
    }

    pub fn records(&self) -> &[TechnologyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TechnologyRecord> {
        self.records.iter()
    }

    pub fn get(&self, name: &str) -> Option<&TechnologyRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    /// Values of one field, in table order
    pub fn column<F>(&self, field: F) -> Vec<f64>
    where
        F: Fn(&TechnologyRecord) -> f64,
    {
        self.records.iter().map(field).collect()
    }
}
