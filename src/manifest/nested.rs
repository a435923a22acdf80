// src/manifest/nested.rs
use std::path::{Component, Path, PathBuf};

use log::{debug, info};

use super::classifier::{classify, Classification, ConditionPatterns};
use super::output::{write_yaml, OutputTarget};
use super::tumor_normal::{SampleTree, TumorNormalManifest};
use super::walk::{normalize_extension, search_root, walk_files, WalkOrder};
use crate::error::Result;

/// patient -> condition -> sample -> path
pub type NestedSamples = SampleTree;

fn segment_with(p: &Path, pattern: &str) -> Option<String> {
    p.components().find_map(|c| match c {
        Component::Normal(os) => {
            let s = os.to_string_lossy();
            if s.contains(pattern) {
                Some(s.to_string())
            } else {
                None
            }
        }
        _ => None,
    })
}

/// Resolve `(patient, condition, sample)` for one file from its labels.
///
/// The patient falls back to the first segment containing a non-empty
/// `patient_pattern`, the sample to the file stem. Returns `None` when no
/// condition or no patient can be found.
fn resolve_labels(
    p: &Path,
    labels: Classification,
    patient_pattern: Option<&str>,
) -> Option<(String, String, String)> {
    // only condition anchored labels count here, not the relative-path fallback
    let condition = labels.condition?;
    let patient = labels.patient.or_else(|| {
        patient_pattern
            .filter(|pat| !pat.is_empty())
            .and_then(|pat| segment_with(p, pat))
    })?;
    let sample = labels.sample.unwrap_or_else(|| {
        p.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    });
    Some((patient, condition, sample))
}

/// Classify files below `directory` into patient -> condition -> sample -> path.
///
/// The sample is the directory between condition and file when there is one,
/// the file stem otherwise. When no patient sits before the condition segment
/// and `patient_pattern` is given, the first segment containing it is used.
///
/// Unlike [`build_tsv`](super::tabular::build_tsv), which keeps unresolved
/// files as `Unknown` rows, files still lacking a patient or a condition are
/// dropped here.
pub fn build_nested<P: AsRef<Path>>(
    directory: P,
    extension: &str,
    patient_pattern: Option<&str>,
    patterns: &ConditionPatterns,
) -> Result<NestedSamples> {
    let root = search_root(directory.as_ref())?;
    let extension = normalize_extension(extension);

    let mut nested = NestedSamples::new();
    for p in walk_files(&root, &extension, WalkOrder::Walk) {
        let labels = classify(&p, &root, patterns);
        let Some((patient, condition, sample)) = resolve_labels(&p, labels, patient_pattern) else {
            debug!("no patient or condition for {} - dropped", p.display());
            continue;
        };

        nested
            .entry(patient)
            .or_default()
            .entry(condition)
            .or_default()
            .insert(sample, p.to_string_lossy().to_string());
    }

    Ok(nested)
}

/// Build the nested manifest and write it as `SAMPLES:` YAML.
pub fn generate_nested_yaml<P: AsRef<Path>>(
    directory: P,
    extension: &str,
    patient_pattern: Option<&str>,
    patterns: &ConditionPatterns,
    target: &OutputTarget,
) -> Result<PathBuf> {
    let samples = build_nested(directory, extension, patient_pattern, patterns)?;
    let patients = samples.len();
    let out = target.yaml_path();
    write_yaml(&TumorNormalManifest { samples }, &out)?;

    info!("Generated nested YAML file: {}", out.display());
    info!("Found {} patients", patients);
    Ok(out)
}
