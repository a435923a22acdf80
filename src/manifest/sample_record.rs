//sample_record.rs
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Classification;

/// Placeholder written for labels that could not be inferred.
pub const UNKNOWN: &str = "Unknown";

/// One row of the tabular manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub patient: String,
    pub sample: String,
    pub condition: String,
    /// absolute path of the source file, existence is not checked here
    pub path: String,
}

impl SampleRecord {
    pub fn new(path: &Path, labels: Classification) -> Self {
        let or_unknown = |v: Option<String>| v.unwrap_or_else(|| UNKNOWN.to_string());
        SampleRecord {
            patient: or_unknown(labels.patient),
            sample: or_unknown(labels.sample),
            condition: or_unknown(labels.condition),
            path: path.to_string_lossy().to_string(),
        }
    }

    /// True if any of patient / sample / condition fell back to the placeholder.
    pub fn is_partial(&self) -> bool {
        [&self.patient, &self.sample, &self.condition]
            .iter()
            .any(|v| v.as_str() == UNKNOWN)
    }
}
