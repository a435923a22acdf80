// src/manifest/tumor_normal.rs
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::output::{write_yaml, OutputTarget};
use super::walk::{normalize_extension, search_root, walk_files, WalkOrder};
use crate::error::Result;

pub const TUMOR: &str = "TUMOR";
pub const NORMAL: &str = "NORMAL";

/// patient -> condition -> file paths
pub type PatientBamMap = IndexMap<String, IndexMap<String, Vec<String>>>;

/// patient -> condition -> sample -> path, kept in insertion order
pub type SampleTree = IndexMap<String, IndexMap<String, IndexMap<String, String>>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TumorNormalManifest {
    #[serde(rename = "SAMPLES")]
    pub samples: SampleTree,
}

/// How the extension is removed from a file name to form the sample name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StripMode {
    /// Remove the first occurrence anywhere in the name. A name like
    /// `a.sorted.bam_b.sorted.bam` loses the inner copy, not the suffix.
    #[default]
    FirstOccurrence,
    /// Remove the extension only when the name ends with it.
    Suffix,
}

impl StripMode {
    pub fn strip(&self, file_name: &str, extension: &str) -> String {
        if extension.is_empty() {
            return file_name.to_string();
        }
        match self {
            StripMode::FirstOccurrence => file_name.replacen(extension, "", 1),
            StripMode::Suffix => file_name
                .strip_suffix(extension)
                .unwrap_or(file_name)
                .to_string(),
        }
    }
}

fn file_name_of(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

/// Turn a patient -> condition -> paths map into the nested `SAMPLES` manifest.
///
/// Conditions without files are left out; a patient whose conditions are all
/// empty still appears with an empty mapping.
pub fn build_tn(patient_bams: &PatientBamMap, extension: &str, mode: StripMode) -> TumorNormalManifest {
    let mut samples = SampleTree::new();

    for (patient, conditions) in patient_bams {
        let mut per_condition: IndexMap<String, IndexMap<String, String>> = IndexMap::new();
        for (condition, paths) in conditions {
            if paths.is_empty() {
                continue;
            }
            let entry = per_condition.entry(condition.clone()).or_default();
            for path in paths {
                let sample = mode.strip(file_name_of(path), extension);
                entry.insert(sample, path.clone());
            }
        }
        samples.insert(patient.clone(), per_condition);
    }

    TumorNormalManifest { samples }
}

/// `SHAH_H` in `x_SHAH_H000033_T16.bam` -> `SHAH_H000033`: the first two `_`
/// separated tokens starting at the pattern.
fn patient_id(file_name: &str, pattern: &str) -> Option<String> {
    let start = file_name.find(pattern)?;
    let mut tokens = file_name[start..].split('_');
    let first = tokens.next()?;
    let second = tokens.next()?;
    Some(format!("{first}_{second}"))
}

/// Group files below `directory` by patient id and tumor/normal status, both
/// read from the file name. Files matching neither condition are skipped.
pub fn discover_tn<P: AsRef<Path>>(
    directory: P,
    patient_pattern: &str,
    tumor_pattern: &str,
    normal_pattern: &str,
    extension: &str,
) -> Result<PatientBamMap> {
    let root = search_root(directory.as_ref())?;
    let extension = normalize_extension(extension);

    let mut patient_bams = PatientBamMap::new();
    for p in walk_files(&root, &extension, WalkOrder::SortedByPath) {
        let fname = match p.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => continue,
        };
        if !fname.contains(patient_pattern) {
            debug!("no patient pattern '{}' in {}", patient_pattern, fname);
            continue;
        }
        let patient = match patient_id(fname, patient_pattern) {
            Some(id) => id,
            None => {
                warn!("could not cut a patient id after '{}' from {} - file is ignored", patient_pattern, fname);
                continue;
            }
        };
        let condition = if fname.contains(tumor_pattern) {
            TUMOR
        } else if fname.contains(normal_pattern) {
            NORMAL
        } else {
            debug!("{} is neither tumor nor normal", fname);
            continue;
        };

        patient_bams
            .entry(patient)
            .or_default()
            .entry(condition.to_string())
            .or_default()
            .push(p.to_string_lossy().to_string());
    }

    Ok(patient_bams)
}

/// Build the tumor/normal manifest and write it as `SAMPLES:` YAML.
pub fn generate_tumor_normal_yaml(
    patient_bams: &PatientBamMap,
    extension: &str,
    mode: StripMode,
    target: &OutputTarget,
) -> Result<PathBuf> {
    let manifest = build_tn(patient_bams, extension, mode);
    let out = target.yaml_path();
    write_yaml(&manifest, &out)?;

    let total: usize = patient_bams
        .values()
        .flat_map(|c| c.values())
        .map(|paths| paths.len())
        .sum();
    info!("Generated tumor-normal YAML file: {}", out.display());
    info!("Processed {} patients with {} total samples", patient_bams.len(), total);
    Ok(out)
}
