//! End-to-end runs of the `alphadex` binary.

use crate::common::{write_job_file, CAT_CORPUS};
use alphadex::testing::{read_outputs, write_corpus};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn alphadex(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_alphadex"))
        .args(args)
        .current_dir(cwd)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("run alphadex")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Corpus files and a job file listing them by relative path.
fn setup(extra: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    write_corpus(dir.path(), &CAT_CORPUS);
    let mut paths: Vec<PathBuf> = vec!["f1.txt".into(), "f2.txt".into()];
    paths.extend(extra.iter().map(PathBuf::from));
    write_job_file(&dir.path().join("job.txt"), &paths);
    dir
}

#[test]
fn test_index_writes_letter_files() {
    let dir = setup(&[]);
    let output = alphadex(dir.path(), &["index", "2", "3", "job.txt", "-o", "out"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("✅ Index complete"));
    let outputs = read_outputs(&dir.path().join("out"));
    assert_eq!(outputs.len(), 26);
    assert_eq!(outputs[&'c'], "cat:[1 2]\n");
}

#[test]
fn test_default_output_is_current_dir() {
    let dir = setup(&[]);
    let output = alphadex(dir.path(), &["-q", "index", "1", "1", "job.txt"]);

    assert!(output.status.success());
    assert!(!stderr(&output).contains("Index complete"));
    assert_eq!(fs::read_to_string(dir.path().join("s.txt")).unwrap(), "sat:[1]\n");
}

#[test]
fn test_skipped_file_warns_but_succeeds() {
    let dir = setup(&["missing.txt"]);
    let output = alphadex(dir.path(), &["-q", "index", "2", "2", "job.txt", "-o", "out"]);

    assert!(output.status.success());
    let err = stderr(&output);
    assert!(err.contains("⚠️"), "{}", err);
    assert!(err.contains("missing.txt"), "{}", err);
    assert_eq!(read_outputs(&dir.path().join("out")).len(), 26);
}

#[test]
fn test_zero_mappers_exits_with_error() {
    let dir = setup(&[]);
    let output = alphadex(dir.path(), &["index", "0", "2", "job.txt", "-o", "out"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("❌ Incorrect number of mappers"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_missing_job_file_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let output = alphadex(dir.path(), &["index", "1", "1", "nope.txt"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Could not open job file"));
}

#[test]
fn test_short_job_file_exits_with_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("job.txt"), "4\na.txt\n").unwrap();
    let output = alphadex(dir.path(), &["index", "1", "1", "job.txt"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("declares 4 files but lists only 1"));
}

#[test]
fn test_json_manifest_and_report() {
    let dir = TempDir::new().unwrap();
    write_corpus(dir.path(), &CAT_CORPUS);
    fs::write(
        dir.path().join("job.json"),
        r#"{"version": 1, "files": ["f2.txt", "f1.txt"]}"#,
    )
    .unwrap();

    let output = alphadex(
        dir.path(),
        &["-q", "index", "1", "2", "job.json", "-o", "out", "--report", "report.json"],
    );
    assert!(output.status.success(), "{}", stderr(&output));

    // Ids follow manifest order, so f2.txt is file 1.
    assert_eq!(read_outputs(&dir.path().join("out"))[&'s'], "sat:[2]\n");

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("report.json")).unwrap())
            .unwrap();
    assert_eq!(report["files"], 2);
    assert_eq!(report["words"], 5);
    assert_eq!(report["reducers"].as_array().unwrap().len(), 2);
}

#[test]
fn test_plan_prints_partitions() {
    let dir = setup(&[]);
    let output = alphadex(dir.path(), &["plan", "3", "job.txt"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("mapper-0"));
    assert!(stdout.contains("mapper-2"));
    assert!(stdout.contains("makespan"));
    // planning reads no input text and writes nothing
    assert!(!dir.path().join("a.txt").exists());
}
