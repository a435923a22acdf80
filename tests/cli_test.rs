// tests/cli_test.rs

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn keep_dir_on_err(tmp: TempDir, err: impl std::fmt::Display) -> ! {
    let path: PathBuf = tmp.into_path(); // prevents cleanup
    panic!("{err}\n\nTest workspace kept at:\n  {}", path.display());
}

fn touch(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, "")
}

fn create_example_tree(base: &Path) -> io::Result<PathBuf> {
    let root = base.join("INPUT");
    touch(&root.join("patient1/normal/sampleA/a.bed"))?;
    touch(&root.join("patient1/tumor/sampleB/b.bed"))?;
    touch(&root.join("patient2/c.bed"))?;
    touch(&root.join("patient2/ignored.txt"))?;
    Ok(root)
}

#[test]
fn sample_sheet_cli_writes_the_tsv() {
    let tmp = TempDir::new().expect("TempDir");

    let result: Result<(), String> = (|| {
        let input = create_example_tree(tmp.path()).map_err(|e| e.to_string())?;
        let out = tmp.path().join("sheet.tsv");

        Command::cargo_bin("sample-manifest")
            .map_err(|e| format!("binary sample-manifest not built: {e}"))?
            .arg(&input)
            .arg("bed")
            .arg(&out)
            .assert()
            .success()
            .stdout(predicate::str::contains(out.to_string_lossy().to_string()));

        let text = fs::read_to_string(&out).map_err(|e| e.to_string())?;
        let lines: Vec<&str> = text.lines().collect();
        if lines.first() != Some(&"patient\tsample\tcondition\tpath") {
            return Err(format!("unexpected header in:\n{text}"));
        }
        if lines.len() != 4 {
            return Err(format!("expected 3 data rows in:\n{text}"));
        }
        if !text.contains("patient1\tsampleA\tNormal\t") || !text.contains("patient2\tUnknown\tUnknown\t") {
            return Err(format!("rows do not match the layout:\n{text}"));
        }
        Ok(())
    })();

    if let Err(e) = result {
        keep_dir_on_err(tmp, e);
    }
}

#[test]
fn sample_sheet_cli_fails_on_missing_directory() {
    let tmp = TempDir::new().expect("TempDir");
    let out = tmp.path().join("sheet.tsv");

    Command::cargo_bin("sample-manifest")
        .unwrap()
        .arg(tmp.path().join("nope"))
        .arg(".bed")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Directory not found"));
    assert!(!out.exists());
}

#[test]
fn sample_sheet_cli_writes_header_only_without_matches() -> Result<(), String> {
    let tmp = TempDir::new().expect("TempDir");
    let input = create_example_tree(tmp.path()).expect("tree");
    let out = tmp.path().join("sheet.tsv");

    Command::cargo_bin("sample-manifest")
        .unwrap()
        .arg(&input)
        .arg(".pod5")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample sheet created"))
        .stderr(predicate::str::contains("No files with extension '.pod5'"));

    let text = fs::read_to_string(&out).map_err(|e| e.to_string())?;
    assert_eq!(text, "patient\tsample\tcondition\tpath\n");
    Ok(())
}

#[test]
fn sample_sheet_cli_requires_three_arguments() {
    Command::cargo_bin("sample-manifest")
        .unwrap()
        .arg(".")
        .arg("bed")
        .assert()
        .failure();
}

#[test]
fn yaml_cli_flat_then_validate() {
    let tmp = TempDir::new().expect("TempDir");
    let input = create_example_tree(tmp.path()).expect("tree");

    Command::cargo_bin("samples_yaml")
        .unwrap()
        .args(["flat"])
        .arg(&input)
        .arg("bed")
        .arg("--output-dir")
        .arg(tmp.path())
        .args(["-o", "my_samples"])
        .assert()
        .success()
        .stdout(predicate::str::contains("my_samples.yaml"));

    let manifest = tmp.path().join("my_samples.yaml");
    assert!(manifest.is_file());

    Command::cargo_bin("samples_yaml")
        .unwrap()
        .arg("validate")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));

    // the flat manifest has no SAMPLES key
    Command::cargo_bin("samples_yaml")
        .unwrap()
        .arg("validate")
        .arg("--tumor-normal")
        .arg(&manifest)
        .assert()
        .failure();
}

#[test]
fn yaml_cli_validate_reports_each_warning_once() {
    let tmp = TempDir::new().expect("TempDir");
    let manifest = tmp.path().join("gone.yaml");
    fs::write(&manifest, "samples:\n  ghost: /no/such/ghost.bam\n").expect("write manifest");

    let out = Command::cargo_bin("samples_yaml")
        .unwrap()
        .arg("validate")
        .arg(&manifest)
        .output()
        .expect("run samples_yaml");

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);
    let needle = "Sample file not found: /no/such/ghost.bam";
    assert_eq!(stderr.matches(needle).count(), 1, "stderr: {stderr}");
    assert_eq!(stdout.matches(needle).count(), 0, "stdout: {stdout}");
    assert!(stdout.contains("1 warning(s)"));
    assert!(stdout.contains("is valid"));
}

#[test]
fn yaml_cli_tumor_normal_discovery() {
    let tmp = TempDir::new().expect("TempDir");
    let bams = tmp.path().join("bams");
    touch(&bams.join("SHAH_H000033_T16_04_WG01_R1.sorted.bam")).unwrap();
    touch(&bams.join("SHAH_H000033_N03_01_WG01_R1.sorted.bam")).unwrap();

    Command::cargo_bin("samples_yaml")
        .unwrap()
        .arg("tumor-normal")
        .arg(&bams)
        .arg("--output-dir")
        .arg(tmp.path())
        .args(["--output", "tn.yml"])
        .assert()
        .success();

    let text = fs::read_to_string(tmp.path().join("tn.yml")).unwrap();
    assert!(text.contains("SHAH_H000033:"), "{text}");
    assert!(text.contains("SHAH_H000033_T16_04_WG01_R1:"), "{text}");

    Command::cargo_bin("samples_yaml")
        .unwrap()
        .args(["validate", "-t"])
        .arg(tmp.path().join("tn.yml"))
        .assert()
        .success();
}

#[test]
fn yaml_cli_rejects_bad_condition_argument() {
    let tmp = TempDir::new().expect("TempDir");
    let input = create_example_tree(tmp.path()).expect("tree");

    Command::cargo_bin("samples_yaml")
        .unwrap()
        .arg("nested")
        .arg(&input)
        .arg("bed")
        .args(["-c", "no_equals_sign"])
        .arg("--output-dir")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME=pattern"));
}
