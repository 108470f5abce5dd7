//! Known inputs with hand-checked outputs.

use crate::common::{assert_outputs_well_formed, Workspace, CAT_CORPUS, MIXED_CORPUS};
use alphadex::testing::read_outputs;
use alphadex::{partition, EmptyWordPolicy, FileDescriptor, IndexJob, JobConfig};

#[test]
fn test_cat_corpus() {
    let ws = Workspace::new(&CAT_CORPUS);
    let (report, outputs) = ws.run("out", 2, 2);

    assert_outputs_well_formed(&outputs);
    assert_eq!(outputs[&'c'], "cat:[1 2]\n");
    assert_eq!(outputs[&'s'], "sat:[1]\n");
    assert_eq!(outputs[&'a'], "a:[2]\n");
    assert_eq!(outputs[&'r'], "ran:[2]\n");
    assert_eq!(outputs[&'t'], "the:[1]\n");
    assert_eq!(report.words, 5);
    assert_eq!(report.files, 2);
    assert!(report.skipped.is_empty());
}

#[test]
fn test_letter_without_words_is_empty_file() {
    let ws = Workspace::new(&CAT_CORPUS);
    let (_, outputs) = ws.run("out", 1, 1);

    assert_eq!(outputs[&'q'], "");
    assert_eq!(outputs[&'z'], "");
    let empty = outputs.values().filter(|c| c.is_empty()).count();
    assert_eq!(empty, 21);
}

#[test]
fn test_mixed_corpus() {
    let ws = Workspace::new(&MIXED_CORPUS);
    let (report, outputs) = ws.run("out", 3, 4);

    assert_outputs_well_formed(&outputs);
    assert_eq!(outputs[&'z'], "zebras:[1]\nzigzag:[1]\n");
    assert_eq!(outputs[&'q'], "quails:[1]\nquarrel:[1]\nquietly:[1]\n");
    assert_eq!(outputs[&'a'], "again:[4]\nand:[4]\napple:[2]\napples:[2]\n");
    assert_eq!(
        outputs[&'e'],
        "eat:[5]\neggs:[5]\nelephants:[5]\neleven:[5]\nevening:[5]\nevery:[5]\n"
    );
    assert_eq!(outputs[&'i'], "its:[4]\n");
    assert_eq!(outputs[&'o'], "oclock:[4]\n");
    assert_eq!(outputs[&'t'], "tea:[4]\ntime:[4]\ntoast:[4]\n");
    // "" from digits and punctuation is indexed but never written
    assert!(report.words > outputs.values().map(|c| c.lines().count()).sum::<usize>());
}

#[test]
fn test_word_shared_by_many_files_sorts_first() {
    let ws = Workspace::new(&["bee bat", "bee", "bee ball", "ball"]);
    let (_, outputs) = ws.run("out", 2, 1);
    assert_eq!(outputs[&'b'], "bee:[1 2 3]\nball:[3 4]\nbat:[1]\n");
}

#[test]
fn test_lpt_plan_for_one_big_file() {
    let mut sizes = vec![10];
    sizes.extend(std::iter::repeat(1).take(9));
    let files: Vec<FileDescriptor> = sizes
        .iter()
        .enumerate()
        .map(|(i, &size)| FileDescriptor::new(i + 1, format!("{}.txt", i + 1), size))
        .collect();

    let partitions = partition(&files, 3);
    let ids: Vec<Vec<usize>> = partitions
        .iter()
        .map(|p| p.files.iter().map(|f| f.id).collect())
        .collect();
    assert_eq!(ids[0], vec![1]);
    assert_eq!(ids[1].len(), 5);
    assert_eq!(ids[2].len(), 4);
    assert_eq!(partitions[1].total_bytes, 5);
    assert_eq!(partitions[2].total_bytes, 4);
}

#[test]
fn test_output_dir_is_created() {
    let ws = Workspace::new(&CAT_CORPUS);
    let (report, outputs) = ws.run("nested/deeper/out", 1, 2);
    assert_eq!(outputs.len(), 26);
    assert!(report.output_dir.ends_with("nested/deeper/out"));
}

#[test]
fn test_skip_empty_words_only_changes_word_count() {
    let ws = Workspace::new(&MIXED_CORPUS);
    let (indexed, kept) = ws.run("kept", 2, 2);

    let out = ws.out("skipped");
    let config = JobConfig::new(2, 2)
        .with_output_dir(&out)
        .with_empty_words(EmptyWordPolicy::Skip);
    let skipped = IndexJob::new(config, ws.files.clone()).run().unwrap();

    assert_eq!(skipped.words + 1, indexed.words);
    assert_eq!(read_outputs(&out), kept);
}
