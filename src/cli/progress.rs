// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Progress bars for `alphadex index`, fed by the engine's observer hooks.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use alphadex::{FileDescriptor, FileError, JobObserver, ALPHABET_LEN};

fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<10} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━━╸")
}

/// A "Mapping" bar counting files and a "Reducing" bar counting letters.
pub struct ProgressObserver {
    _multi: MultiProgress,
    mapping: ProgressBar,
    reducing: ProgressBar,
}

impl ProgressObserver {
    pub fn new(files: usize) -> Self {
        let multi = MultiProgress::new();

        let mapping = multi.add(ProgressBar::new(files as u64));
        mapping.set_style(progress_style());
        mapping.set_prefix("Mapping");
        mapping.set_message("files...");

        let reducing = multi.add(ProgressBar::new(ALPHABET_LEN as u64));
        reducing.set_style(progress_style());
        reducing.set_prefix("Reducing");
        reducing.set_message("waiting for mappers");

        Self {
            _multi: multi,
            mapping,
            reducing,
        }
    }

    /// Leave the bars on screen with a final message.
    pub fn finish(&self) {
        if !self.mapping.is_finished() {
            self.mapping.abandon();
        }
        if self.reducing.position() == ALPHABET_LEN as u64 {
            self.reducing.finish_with_message("26 files written");
        } else {
            self.reducing.abandon_with_message("stopped");
        }
    }
}

impl JobObserver for ProgressObserver {
    fn file_indexed(&self, _file: &FileDescriptor) {
        self.mapping.inc(1);
    }

    fn file_skipped(&self, error: &FileError) {
        self.mapping.inc(1);
        self.mapping
            .set_message(format!("skipped {}", error.path.display()));
    }

    fn map_phase_finished(&self, words: usize) {
        self.mapping
            .finish_with_message(format!("{} distinct words", words));
        self.reducing.set_message("letters...");
    }

    fn letter_written(&self, letter: char, _lines: usize) {
        self.reducing.inc(1);
        self.reducing.set_message(format!("{}.txt", letter));
    }
}
