//! Output must not depend on scheduling, worker counts or previous runs.

use crate::common::{flatten, Workspace, MIXED_CORPUS};
use alphadex::testing::read_outputs;
use alphadex::{IndexJob, JobConfig};
use std::fs;

#[test]
fn test_mapper_count_does_not_change_output() {
    let ws = Workspace::new(&MIXED_CORPUS);
    let (_, baseline) = ws.run("m1", 1, 3);

    for mappers in [2, 3, 6, 10] {
        let (_, outputs) = ws.run(&format!("m{}", mappers), mappers, 3);
        assert_eq!(
            flatten(&outputs),
            flatten(&baseline),
            "{} mappers changed the output",
            mappers
        );
    }
}

#[test]
fn test_reducer_count_does_not_change_output() {
    let ws = Workspace::new(&MIXED_CORPUS);
    let (_, baseline) = ws.run("r1", 2, 1);

    for reducers in [2, 7, 26, 40] {
        let (_, outputs) = ws.run(&format!("r{}", reducers), 2, reducers);
        assert_eq!(flatten(&outputs), flatten(&baseline));
    }
}

#[test]
fn test_rerun_into_same_directory_is_identical() {
    let ws = Workspace::new(&MIXED_CORPUS);
    let (_, first) = ws.run("out", 3, 3);

    // Garbage from an unrelated earlier run must be replaced, not appended to.
    fs::write(ws.out("out").join("z.txt"), "stale:[9]\n").unwrap();

    let (_, second) = ws.run("out", 3, 3);
    assert_eq!(flatten(&first), flatten(&second));
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let ws = Workspace::new(&MIXED_CORPUS);
    let out = ws.out("repeat");
    let config = JobConfig::new(4, 5).with_output_dir(&out);

    let mut previous = None;
    for _ in 0..5 {
        IndexJob::new(config.clone(), ws.files.clone())
            .run()
            .unwrap();
        let outputs = flatten(&read_outputs(&out));
        if let Some(prev) = &previous {
            assert_eq!(prev, &outputs);
        }
        previous = Some(outputs);
    }
}
