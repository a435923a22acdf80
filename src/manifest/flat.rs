// src/manifest/flat.rs
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::output::{write_yaml, OutputTarget};
use super::walk::{normalize_extension, search_root, walk_files, WalkOrder};
use crate::error::{ManifestError, Result};

/// sample name -> absolute path, serialized with sorted keys
pub type SampleMap = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatManifest {
    pub samples: SampleMap,
}

/// Map every file ending on `extension` below `directory` to its stem.
///
/// Files are visited in path order; two files sharing a stem collapse into
/// one entry and the later path wins.
pub fn build_flat<P: AsRef<Path>>(directory: P, extension: &str) -> Result<SampleMap> {
    let directory = directory.as_ref();
    let extension = normalize_extension(extension);
    let root = search_root(directory)?;

    let files = walk_files(&root, &extension, WalkOrder::SortedByPath);
    if files.is_empty() {
        return Err(ManifestError::NoMatches {
            extension,
            directory: directory.to_path_buf(),
        });
    }

    let mut samples = SampleMap::new();
    for p in files {
        let name = p
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        if let Some(prev) = samples.insert(name.clone(), p.to_string_lossy().to_string()) {
            debug!("sample '{}' seen twice, replacing {}", name, prev);
        }
    }
    Ok(samples)
}

/// Build the flat manifest for `directory` and write it as `samples:` YAML.
pub fn generate_samples_yaml<P: AsRef<Path>>(
    directory: P,
    extension: &str,
    target: &OutputTarget,
) -> Result<PathBuf> {
    let samples = build_flat(directory, extension)?;
    let count = samples.len();
    let out = target.yaml_path();
    write_yaml(&FlatManifest { samples }, &out)?;

    info!("Generated YAML file: {}", out.display());
    info!("Found {} samples with extension '{}'", count, normalize_extension(extension));
    Ok(out)
}

/// Read a header-less two column TSV (`sample<TAB>path`) into a sample map.
pub fn flat_from_tsv<P: AsRef<Path>>(tsv: P) -> Result<SampleMap> {
    let tsv = tsv.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(tsv)?;

    let mut samples = SampleMap::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        if rec.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        match (rec.get(0), rec.get(1)) {
            (Some(name), Some(path)) if rec.len() == 2 => {
                samples.insert(name.trim().to_string(), path.trim().to_string());
            }
            _ => {
                return Err(ManifestError::Structure(format!(
                    "{} line {}: expected 2 tab separated columns, found {}",
                    tsv.display(),
                    line + 1,
                    rec.len()
                )))
            }
        }
    }
    Ok(samples)
}

/// Convert a two column TSV into a `samples:` YAML manifest.
pub fn generate_samples_yaml_from_tsv<P: AsRef<Path>>(
    tsv: P,
    target: &OutputTarget,
) -> Result<PathBuf> {
    let samples = flat_from_tsv(tsv)?;
    let out = target.yaml_path();
    write_yaml(&FlatManifest { samples }, &out)?;
    info!("Generated YAML file: {}", out.display());
    Ok(out)
}
