// tests/validate_test.rs

use std::fs;
use std::io;
use std::path::Path;

use sample_manifest::manifest::{
    validate_flat, validate_flat_file, validate_tn, validate_tn_file, ValidationWarning,
};
use serde_yaml::Value;
use tempfile::TempDir;

fn yaml(text: &str) -> Value {
    serde_yaml::from_str(text).expect("test yaml")
}

fn touch(path: &Path) -> io::Result<()> {
    fs::write(path, "")
}

#[test]
fn flat_manifest_with_existing_files_is_valid() -> io::Result<()> {
    let tmp = TempDir::new()?;
    let s1 = tmp.path().join("sample1.fast5");
    let s2 = tmp.path().join("sample2.fast5");
    touch(&s1)?;
    touch(&s2)?;

    let doc = yaml(&format!(
        "samples:\n  sample1: {}\n  sample2: {}\n",
        s1.display(),
        s2.display()
    ));
    let report = validate_flat(&doc);
    assert!(report.is_valid());
    assert!(report.warnings.is_empty());
    assert!(report.error.is_none());
    Ok(())
}

#[test]
fn missing_top_level_key_fails() {
    let report = validate_flat(&yaml("data:\n  sample1: /path/to/file\n"));
    assert!(!report.is_valid());
    assert!(report.error.unwrap().contains("samples"));
}

#[test]
fn missing_files_only_warn() {
    let report = validate_flat(&yaml("samples:\n  ghost: /nonexistent/ghost.fast5\n"));
    assert!(report.is_valid());
    assert_eq!(
        report.warnings,
        vec![ValidationWarning::MissingFile {
            sample: "ghost".into(),
            path: "/nonexistent/ghost.fast5".into(),
        }]
    );
}

#[test]
fn wrong_shapes_fail() {
    assert!(!validate_flat(&yaml("- a\n- b\n")).is_valid());
    assert!(!validate_flat(&yaml("samples: [a, b]\n")).is_valid());
    assert!(!validate_flat(&yaml("samples:\n  s1: [1, 2]\n")).is_valid());
    assert!(!validate_flat(&Value::Null).is_valid());
    // an empty mapping is still the right shape
    assert!(validate_flat(&yaml("samples: {}\n")).is_valid());
}

#[test]
fn unreadable_or_corrupt_files_fail_without_panicking() -> io::Result<()> {
    let tmp = TempDir::new()?;
    let corrupt = tmp.path().join("corrupt.yaml");
    fs::write(&corrupt, "samples: [unclosed\n  - : :\n")?;

    let report = validate_flat_file(&corrupt);
    assert!(!report.is_valid());
    assert!(report.error.is_some());

    let report = validate_tn_file(tmp.path().join("does_not_exist.yaml"));
    assert!(!report.is_valid());
    assert!(report.error.is_some());

    let empty = tmp.path().join("empty.yaml");
    fs::write(&empty, "")?;
    assert!(!validate_flat_file(&empty).is_valid());
    Ok(())
}

#[test]
fn tumor_normal_manifest_is_valid() -> io::Result<()> {
    let tmp = TempDir::new()?;
    let tumor = tmp.path().join("tumor.sorted.bam");
    let normal = tmp.path().join("normal.sorted.bam");
    touch(&tumor)?;
    touch(&normal)?;

    let path = tmp.path().join("test_tumor_normal.yaml");
    fs::write(
        &path,
        format!(
            "SAMPLES:\n  PATIENT_001:\n    TUMOR:\n      tumor_sample: {}\n    NORMAL:\n      normal_sample: {}\n",
            tumor.display(),
            normal.display()
        ),
    )?;

    let report = validate_tn_file(&path);
    assert!(report.is_valid(), "{:?}", report.error);
    assert!(report.warnings.is_empty());
    Ok(())
}

#[test]
fn tumor_normal_without_samples_key_fails() {
    assert!(!validate_tn(&yaml("DATA:\n  PATIENT_001: {}\n")).is_valid());
    // the flat key does not count
    assert!(!validate_tn(&yaml("samples:\n  PATIENT_001: {}\n")).is_valid());
}

#[test]
fn tumor_normal_shape_violations_fail() {
    assert!(!validate_tn(&yaml("SAMPLES:\n  P1: /just/a/path\n")).is_valid());
    assert!(!validate_tn(&yaml("SAMPLES:\n  P1:\n    TUMOR: [/a.bam]\n")).is_valid());
    assert!(!validate_tn(&yaml("SAMPLES: [P1]\n")).is_valid());
}

#[test]
fn unexpected_condition_and_missing_file_only_warn() {
    let report = validate_tn(&yaml(
        "SAMPLES:\n  P1:\n    RELAPSE:\n      r1: /nonexistent/r1.bam\n  P2: {}\n",
    ));
    assert!(report.is_valid());
    assert_eq!(report.warnings.len(), 2);
    assert_eq!(
        report.warnings[0],
        ValidationWarning::UnexpectedCondition {
            patient: "P1".into(),
            condition: "RELAPSE".into(),
        }
    );
    assert!(matches!(report.warnings[1], ValidationWarning::MissingFile { .. }));
    assert_eq!(
        report.warnings[0].to_string(),
        "Unexpected sample type 'RELAPSE' for patient P1"
    );
}
