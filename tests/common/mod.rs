//! Shared test utilities and fixtures.

#![allow(dead_code)]

use alphadex::testing::{read_outputs, write_corpus};
use alphadex::{FileDescriptor, IndexJob, JobConfig, JobReport};
use std::collections::BTreeMap;
use tempfile::TempDir;

// Re-export canonical test utilities from alphadex::testing
pub use alphadex::testing::{write_job_file, MemorySource};

// ============================================================================
// FIXTURES
// ============================================================================

/// Two tiny files used throughout: "The cat sat." and "A cat ran."
pub const CAT_CORPUS: [&str; 2] = ["The cat sat.", "A cat ran."];

/// A corpus with uneven file sizes, punctuation and mixed case.
pub const MIXED_CORPUS: [&str; 6] = [
    "Zebras zig-zag; quails quietly quarrel.",
    "apple Apple APPLE apples",
    "",
    "It's 9 o'clock: time for tea, toast and TEA again!",
    "Every evening, eleven elephants eat eggs.",
    "1234 ... --- !!!",
];

/// A workspace with input files on disk and a separate output directory.
pub struct Workspace {
    pub dir: TempDir,
    pub files: Vec<FileDescriptor>,
}

impl Workspace {
    pub fn new(texts: &[&str]) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let input = dir.path().join("input");
        std::fs::create_dir_all(&input).expect("create input dir");
        let files = write_corpus(&input, texts);
        Self { dir, files }
    }

    pub fn out(&self, name: &str) -> std::path::PathBuf {
        self.dir.path().join(name)
    }

    /// Run a job from disk into `<tmp>/<name>` and read back every letter file.
    pub fn run(
        &self,
        name: &str,
        mappers: usize,
        reducers: usize,
    ) -> (JobReport, BTreeMap<char, String>) {
        let out = self.out(name);
        let config = JobConfig::new(mappers, reducers).with_output_dir(&out);
        let report = IndexJob::new(config, self.files.clone())
            .run()
            .expect("job should succeed");
        (report, read_outputs(&out))
    }
}

// ============================================================================
// ASSERTIONS
// ============================================================================

/// Every output line must be `word:[ids]` with the word starting with the
/// file's letter, ascending ids, and lines sorted by count desc then word.
pub fn assert_outputs_well_formed(outputs: &BTreeMap<char, String>) {
    assert_eq!(outputs.len(), 26, "expected a.txt through z.txt");

    for (letter, content) in outputs {
        let mut previous: Option<(usize, String)> = None;
        for line in content.lines() {
            let (word, ids) = line
                .split_once(":[")
                .unwrap_or_else(|| panic!("malformed line {:?} in {}.txt", line, letter));
            assert!(word.starts_with(*letter), "{} in {}.txt", word, letter);
            assert!(word.chars().all(|c| c.is_ascii_lowercase()), "{}", word);

            let ids: Vec<usize> = ids
                .trim_end_matches(']')
                .split(' ')
                .map(|id| id.parse().expect("numeric file id"))
                .collect();
            assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids not ascending: {}", line);

            if let Some((count, prev_word)) = &previous {
                assert!(
                    *count > ids.len() || (*count == ids.len() && prev_word.as_str() < word),
                    "{}.txt out of order at {:?}",
                    letter,
                    line
                );
            }
            previous = Some((ids.len(), word.to_string()));
        }
        assert!(content.is_empty() || content.ends_with('\n'));
    }
}

/// Concatenation of all 26 files, for byte-identical comparisons.
pub fn flatten(outputs: &BTreeMap<char, String>) -> String {
    outputs
        .iter()
        .map(|(letter, content)| format!("== {}\n{}", letter, content))
        .collect()
}
