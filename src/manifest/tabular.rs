// src/manifest/tabular.rs
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::classifier::{classify, ConditionPatterns};
use super::output::OutputTarget;
use super::sample_record::SampleRecord;
use super::walk::{normalize_extension, search_root, walk_files, WalkOrder};
use crate::error::{ManifestError, Result};

pub const TSV_HEADER: [&str; 4] = ["patient", "sample", "condition", "path"];

/// Classify every file ending on `extension` below `directory`, one record per
/// file in walk order. Labels that cannot be inferred stay `Unknown`; no file
/// is dropped, unlike [`build_nested`](super::nested::build_nested).
pub fn build_tsv<P: AsRef<Path>>(
    directory: P,
    extension: &str,
    patterns: &ConditionPatterns,
) -> Result<Vec<SampleRecord>> {
    let directory = directory.as_ref();
    let extension = normalize_extension(extension);
    let root = search_root(directory)?;

    let records: Vec<SampleRecord> = walk_files(&root, &extension, WalkOrder::Walk)
        .into_iter()
        .map(|p| {
            let labels = classify(&p, &root, patterns);
            debug!("{} -> {:?}", p.display(), labels);
            SampleRecord::new(&p, labels)
        })
        .collect();

    if records.is_empty() {
        return Err(ManifestError::NoMatches {
            extension,
            directory: directory.to_path_buf(),
        });
    }

    let partial = records.iter().filter(|r| r.is_partial()).count();
    if partial > 0 {
        debug!("{} of {} records have unknown labels", partial, records.len());
    }
    Ok(records)
}

/// Write records as a tab separated sample sheet with a fixed header.
pub fn write_tsv<P: AsRef<Path>>(records: &[SampleRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut w = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(path)?;

    w.write_record(TSV_HEADER)?;
    for rec in records {
        w.serialize(rec)?;
    }
    w.flush().map_err(|e| ManifestError::io(path, e))?;
    Ok(())
}

/// Build the sample sheet for `directory` and write it to `target`.
pub fn generate_samples_tsv<P: AsRef<Path>>(
    directory: P,
    extension: &str,
    patterns: &ConditionPatterns,
    target: &OutputTarget,
) -> Result<PathBuf> {
    let records = build_tsv(directory, extension, patterns)?;
    let out = target.tsv_path();
    write_tsv(&records, &out)?;

    info!("Generated TSV file: {}", out.display());
    info!("Found {} samples with extension '{}'", records.len(), normalize_extension(extension));
    Ok(out)
}
