//! Unreadable inputs, bad configuration and cancellation.

use crate::common::{assert_outputs_well_formed, MemorySource, Workspace, CAT_CORPUS};
use alphadex::testing::read_outputs;
use alphadex::{FileDescriptor, IndexJob, JobConfig, JobError, JobManifest};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_file_is_skipped() {
    let ws = Workspace::new(&CAT_CORPUS);
    let mut files = ws.files.clone();
    files.insert(
        1,
        FileDescriptor::new(2, ws.dir.path().join("input/absent.txt"), 0),
    );
    files[2].id = 3;

    let out = ws.out("out");
    let report = IndexJob::new(JobConfig::new(2, 2).with_output_dir(&out), files)
        .run()
        .unwrap();

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].id, 2);
    assert!(report.skipped[0].path.ends_with("absent.txt"));

    let outputs = read_outputs(&out);
    assert_outputs_well_formed(&outputs);
    assert_eq!(outputs[&'c'], "cat:[1 3]\n");
}

#[test]
fn test_unresolvable_size_from_manifest_still_runs() {
    let ws = Workspace::new(&CAT_CORPUS);
    let manifest = JobManifest::new(vec![
        ws.files[0].path.clone(),
        ws.dir.path().join("nowhere.txt"),
        ws.files[1].path.clone(),
    ]);
    let files = manifest.resolve();
    assert_eq!(files[1].size_bytes, 0);

    let out = ws.out("out");
    let report = IndexJob::new(JobConfig::new(3, 1).with_output_dir(&out), files)
        .run()
        .unwrap();
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(read_outputs(&out)[&'c'], "cat:[1 3]\n");
}

#[test]
fn test_zero_workers_rejected_before_output_exists() {
    let dir = TempDir::new().unwrap();
    for (mappers, reducers, role) in [(0, 1, "mappers"), (1, 0, "reducers"), (0, 0, "mappers")] {
        let out = dir.path().join(format!("out-{}-{}", mappers, reducers));
        let source = MemorySource::new(&CAT_CORPUS);
        let config = JobConfig::new(mappers, reducers).with_output_dir(&out);
        let job = IndexJob::with_source(config, source.descriptors(), source);

        match job.run() {
            Err(JobError::InvalidWorkerCount { role: r, .. }) => assert_eq!(r, role),
            other => panic!("expected InvalidWorkerCount, got {:?}", other),
        }
        assert!(!out.exists());
    }
}

#[test]
fn test_output_dir_blocked_by_file() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("out");
    fs::write(&blocker, "not a directory").unwrap();

    let source = MemorySource::new(&CAT_CORPUS);
    let config = JobConfig::new(1, 1).with_output_dir(&blocker);
    let job = IndexJob::with_source(config, source.descriptors(), source);
    assert!(matches!(job.run(), Err(JobError::OutputDir { .. })));
}

#[test]
fn test_cancelled_before_reduce() {
    let dir = TempDir::new().unwrap();
    let source = MemorySource::new(&CAT_CORPUS);
    let config = JobConfig::new(2, 3).with_output_dir(dir.path());
    let job = IndexJob::with_source(config, source.descriptors(), source);

    let token = job.cancellation_token();
    token.cancel();
    assert_eq!(job.run().unwrap_err(), JobError::Cancelled);
    assert!(read_outputs(dir.path()).is_empty());
}

#[test]
fn test_more_mappers_than_files() {
    let dir = TempDir::new().unwrap();
    let source = MemorySource::new(&CAT_CORPUS);
    let config = JobConfig::new(8, 2).with_output_dir(dir.path());
    let job = IndexJob::with_source(config, source.descriptors(), source);

    let report = job.run().unwrap();
    assert_eq!(report.mappers.len(), 8);
    assert_eq!(report.mappers.iter().filter(|m| m.files == 0).count(), 6);
    assert_eq!(read_outputs(dir.path())[&'c'], "cat:[1 2]\n");
}
