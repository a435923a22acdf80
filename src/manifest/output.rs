// src/manifest/output.rs
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::error::{ManifestError, Result};

/// Where a generated manifest is written: an explicit directory plus a file
/// name whose suffix is completed on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub dir: PathBuf,
    pub name: String,
}

impl OutputTarget {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(dir: P, name: S) -> Self {
        OutputTarget {
            dir: dir.into(),
            name: name.into(),
        }
    }

    /// `<dir>/<name>.yaml` unless the name already ends on `.yaml` or `.yml`.
    pub fn yaml_path(&self) -> PathBuf {
        if self.name.ends_with(".yaml") || self.name.ends_with(".yml") {
            self.dir.join(&self.name)
        } else {
            self.dir.join(format!("{}.yaml", self.name))
        }
    }

    /// `<dir>/<name>.tsv` unless the name already ends on `.tsv`.
    pub fn tsv_path(&self) -> PathBuf {
        if self.name.ends_with(".tsv") {
            self.dir.join(&self.name)
        } else {
            self.dir.join(format!("{}.tsv", self.name))
        }
    }
}

/// `<prefix>_YYYYMMDD_HHMMSS`
pub fn timestamped_name<Tz: TimeZone>(prefix: &str, when: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}_{}", prefix, when.format("%Y%m%d_%H%M%S"))
}

/// Serialize `doc` as block style YAML into `path`, replacing any existing file.
pub fn write_yaml<T: Serialize, P: AsRef<Path>>(doc: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let f = File::create(path).map_err(|e| ManifestError::io(path, e))?;
    let mut w = BufWriter::new(f);
    serde_yaml::to_writer(&mut w, doc)?;
    w.flush().map_err(|e| ManifestError::io(path, e))?;
    Ok(())
}
