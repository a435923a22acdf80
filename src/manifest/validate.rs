// src/manifest/validate.rs
use std::fmt;
use std::fs;
use std::path::Path;

use log::{error, warn};
use serde_yaml::{Mapping, Value};

use super::tumor_normal::{NORMAL, TUMOR};
use crate::error::{ManifestError, Result};

/// Non-fatal findings; they never flip a report to invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    MissingFile { sample: String, path: String },
    UnexpectedCondition { patient: String, condition: String },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::MissingFile { sample, path } => {
                write!(f, "Sample file not found: {path} (sample '{sample}')")
            }
            ValidationWarning::UnexpectedCondition { patient, condition } => {
                write!(f, "Unexpected sample type '{condition}' for patient {patient}")
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub valid: bool,
    pub warnings: Vec<ValidationWarning>,
    /// why the manifest was rejected
    pub error: Option<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    fn from_check(check: Result<()>, warnings: Vec<ValidationWarning>) -> Self {
        match check {
            Ok(()) => ValidationReport {
                valid: true,
                warnings,
                error: None,
            },
            Err(e) => {
                error!("Error validating manifest: {e}");
                ValidationReport {
                    valid: false,
                    warnings,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

fn label(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "~".to_string(),
        other => format!("{other:?}"),
    }
}

fn mapping_under<'a>(doc: &'a Value, key: &str) -> Result<&'a Mapping> {
    let top = doc
        .as_mapping()
        .ok_or_else(|| ManifestError::Structure("document is not a mapping".into()))?;
    top.get(key)
        .ok_or_else(|| ManifestError::Structure(format!("missing top level key '{key}'")))?
        .as_mapping()
        .ok_or_else(|| ManifestError::Structure(format!("'{key}' is not a mapping")))
}

fn check_paths(samples: &Mapping, warnings: &mut Vec<ValidationWarning>) -> Result<()> {
    for (name, path) in samples {
        let path = path.as_str().ok_or_else(|| {
            ManifestError::Structure(format!("path of sample '{}' is not a string", label(name)))
        })?;
        if !Path::new(path).exists() {
            let w = ValidationWarning::MissingFile {
                sample: label(name),
                path: path.to_string(),
            };
            warn!("{w}");
            warnings.push(w);
        }
    }
    Ok(())
}

fn check_flat(doc: &Value, warnings: &mut Vec<ValidationWarning>) -> Result<()> {
    let samples = mapping_under(doc, "samples")?;
    check_paths(samples, warnings)
}

fn check_tn(doc: &Value, warnings: &mut Vec<ValidationWarning>) -> Result<()> {
    let patients = mapping_under(doc, "SAMPLES")?;
    for (patient, conditions) in patients {
        let conditions = conditions.as_mapping().ok_or_else(|| {
            ManifestError::Structure(format!("patient '{}' is not a mapping", label(patient)))
        })?;
        for (condition, samples) in conditions {
            let cond = label(condition);
            if cond != TUMOR && cond != NORMAL {
                let w = ValidationWarning::UnexpectedCondition {
                    patient: label(patient),
                    condition: cond.clone(),
                };
                warn!("{w}");
                warnings.push(w);
            }
            let samples = samples.as_mapping().ok_or_else(|| {
                ManifestError::Structure(format!(
                    "condition '{}' of patient '{}' is not a mapping",
                    cond,
                    label(patient)
                ))
            })?;
            check_paths(samples, warnings)?;
        }
    }
    Ok(())
}

/// Check a loaded `samples:` manifest. Missing files only produce warnings.
pub fn validate_flat(doc: &Value) -> ValidationReport {
    let mut warnings = Vec::new();
    let check = check_flat(doc, &mut warnings);
    ValidationReport::from_check(check, warnings)
}

/// Check a loaded `SAMPLES:` manifest. Missing files and condition names
/// other than TUMOR / NORMAL only produce warnings.
pub fn validate_tn(doc: &Value) -> ValidationReport {
    let mut warnings = Vec::new();
    let check = check_tn(doc, &mut warnings);
    ValidationReport::from_check(check, warnings)
}

fn load(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|e| ManifestError::io(path, e))?;
    Ok(serde_yaml::from_str(&text)?)
}

fn validate_file<F>(path: &Path, validate: F) -> ValidationReport
where
    F: Fn(&Value) -> ValidationReport,
{
    match load(path) {
        Ok(doc) => validate(&doc),
        Err(e) => ValidationReport::from_check(Err(e), Vec::new()),
    }
}

pub fn validate_flat_file<P: AsRef<Path>>(path: P) -> ValidationReport {
    validate_file(path.as_ref(), validate_flat)
}

pub fn validate_tn_file<P: AsRef<Path>>(path: P) -> ValidationReport {
    validate_file(path.as_ref(), validate_tn)
}
