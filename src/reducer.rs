// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reduce phase: claim letters from the queue and write one `<letter>.txt`
//! per claim from the frozen index.
//!
//! # Output format
//!
//! One line per word starting with the letter:
//!
//! ```text
//! cat:[1 2]
//! car:[2]
//! ```
//!
//! Words are ordered by the number of files they occur in (descending), then
//! alphabetically. File ids are ascending. A letter with no words still gets
//! an (empty) file.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::barrier::CancellationToken;
use crate::error::JobError;
use crate::observer::JobObserver;
use crate::queue::LetterWorkQueue;
use crate::shared_index::FrozenIndex;
use crate::types::WordEntry;

/// One written output file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LetterOutput {
    pub letter: char,
    pub path: PathBuf,
    pub lines: usize,
}

/// What one reducer did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReducerReport {
    pub reducer: usize,
    pub letters: Vec<LetterOutput>,
}

/// Path of the output file for `letter`.
pub fn letter_path(output_dir: &Path, letter: char) -> PathBuf {
    output_dir.join(format!("{}.txt", letter))
}

/// Entries for `letter` in output order.
pub fn sorted_entries(index: &FrozenIndex, letter: char) -> Vec<WordEntry<'_>> {
    let mut entries: Vec<WordEntry<'_>> = index.entries_for_letter(letter).collect();
    entries.sort_by(|a, b| {
        b.occurrences()
            .cmp(&a.occurrences())
            .then_with(|| a.word.cmp(b.word))
    });
    entries
}

/// Write `<output_dir>/<letter>.txt`, replacing any previous content.
pub fn write_letter(
    index: &FrozenIndex,
    letter: char,
    output_dir: &Path,
) -> Result<LetterOutput, JobError> {
    let path = letter_path(output_dir, letter);
    let entries = sorted_entries(index, letter);

    let file = File::create(&path).map_err(|e| JobError::output_write(&path, &e))?;
    let mut out = BufWriter::new(file);
    for entry in &entries {
        writeln!(out, "{}", entry.to_line()).map_err(|e| JobError::output_write(&path, &e))?;
    }
    out.flush().map_err(|e| JobError::output_write(&path, &e))?;

    Ok(LetterOutput {
        letter,
        path,
        lines: entries.len(),
    })
}

pub struct Reducer<'a> {
    id: usize,
    output_dir: &'a Path,
}

impl<'a> Reducer<'a> {
    pub fn new(id: usize, output_dir: &'a Path) -> Self {
        Self { id, output_dir }
    }

    /// Claim letters until the queue is empty or the job is cancelled.
    ///
    /// A write failure cancels the job so other reducers stop claiming.
    pub fn run(
        &self,
        index: &FrozenIndex,
        queue: &LetterWorkQueue,
        cancel: &CancellationToken,
        observer: &dyn JobObserver,
    ) -> Result<ReducerReport, JobError> {
        let mut report = ReducerReport {
            reducer: self.id,
            letters: Vec::new(),
        };

        while !cancel.is_cancelled() {
            let Some(letter) = queue.try_claim() else {
                break;
            };

            let output = match write_letter(index, letter, self.output_dir) {
                Ok(output) => output,
                Err(e) => {
                    cancel.cancel();
                    return Err(e);
                }
            };
            debug!(reducer = self.id, %letter, words = output.lines, "letter written");
            observer.letter_written(letter, output.lines);
            report.letters.push(output);
        }

        Ok(report)
    }
}
