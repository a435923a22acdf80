// src/manifest/classifier.rs
use std::path::{Component, Path};

use indexmap::IndexMap;

/// Condition name -> case-insensitive substrings that mark a path segment as
/// belonging to that condition.
///
/// Iteration follows insertion order, so when one segment matches several
/// conditions the condition inserted first wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionPatterns(IndexMap<String, Vec<String>>);

impl ConditionPatterns {
    pub fn new() -> Self {
        ConditionPatterns(IndexMap::new())
    }

    /// Builder style insert; patterns are stored lower-cased.
    pub fn with<S: Into<String>>(mut self, condition: S, patterns: &[&str]) -> Self {
        self.insert(condition, patterns.iter().map(|p| p.to_string()).collect());
        self
    }

    /// Add (or replace) a condition. Replacing keeps the original position.
    pub fn insert<S: Into<String>>(&mut self, condition: S, patterns: Vec<String>) {
        let patterns = patterns
            .into_iter()
            .map(|p| p.to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        self.0.insert(condition.into(), patterns);
    }

    /// `TUMOR` / `NORMAL` labels, matching the names the tumor/normal manifests use.
    pub fn tumor_normal_upper() -> Self {
        ConditionPatterns::new()
            .with("TUMOR", &["tumor"])
            .with("NORMAL", &["normal"])
    }

    /// The first condition whose patterns occur in `segment`, ignoring case.
    pub fn matching(&self, segment: &str) -> Option<&str> {
        let lower = segment.to_lowercase();
        self.0
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|p| lower.contains(p.as_str())))
            .map(|(name, _)| name.as_str())
    }
}

impl Default for ConditionPatterns {
    fn default() -> Self {
        ConditionPatterns::new()
            .with("Tumor", &["tumor"])
            .with("Normal", &["normal"])
    }
}

/// Labels inferred for one file. `None` means the label could not be determined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub patient: Option<String>,
    pub sample: Option<String>,
    pub condition: Option<String>,
}

fn normal_segments(p: &Path) -> Vec<String> {
    p.components()
        .filter_map(|c| match c {
            Component::Normal(os) => Some(os.to_string_lossy().to_string()),
            _ => None,
        })
        .collect()
}

/// Infer patient, sample and condition for `full_path` from its directory layout.
///
/// The first path segment matching a condition pattern anchors the result:
/// the segment before it is the patient, the segment after it is the sample
/// if a further segment (the file name) follows. Without a condition segment
/// the path relative to `search_root` is used instead: `patient/file` gives
/// only a patient, `patient/.../sample/file` gives the patient and the
/// file's parent directory as sample.
pub fn classify(full_path: &Path, search_root: &Path, patterns: &ConditionPatterns) -> Classification {
    let segments = normal_segments(full_path);

    let hit = segments
        .iter()
        .enumerate()
        .find_map(|(i, seg)| patterns.matching(seg).map(|cond| (i, cond.to_string())));

    if let Some((idx, condition)) = hit {
        let file_idx = segments.len() - 1;
        let patient = idx.checked_sub(1).map(|p| segments[p].clone());
        let sample = if idx + 1 < file_idx {
            Some(segments[idx + 1].clone())
        } else {
            None
        };
        return Classification {
            patient,
            sample,
            condition: Some(condition),
        };
    }

    let rel = match full_path.strip_prefix(search_root) {
        Ok(rel) => normal_segments(rel),
        Err(_) => return Classification::default(),
    };

    let mut out = Classification::default();
    if rel.len() >= 2 {
        out.patient = Some(rel[0].clone());
        if rel.len() >= 3 {
            out.sample = Some(rel[rel.len() - 2].clone());
        }
    }
    out
}
