// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Map phase: turn a partition of files into a local word index, then merge
//! it into the shared index in one critical section.
//!
//! Each word is recorded at most once per file. A file that cannot be read is
//! skipped as a whole (words read before the failure are dropped) and listed
//! in the mapper's report; the remaining files are still indexed.

use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::error::FileError;
use crate::observer::JobObserver;
use crate::shared_index::SharedIndex;
use crate::source::TokenSource;
use crate::tokenizer::{normalize_token, EmptyWordPolicy};
use crate::types::{FileDescriptor, LocalIndex, Partition};

/// What one mapper did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MapperReport {
    pub mapper: usize,
    /// Files assigned to this mapper.
    pub files: usize,
    /// Total size of the assigned files.
    pub bytes: u64,
    /// Distinct words in the local index.
    pub local_words: usize,
    /// Words this mapper added to the shared index first.
    pub new_words: usize,
    pub skipped: Vec<FileError>,
}

pub struct Mapper<'a, S: TokenSource + ?Sized> {
    id: usize,
    partition: &'a Partition,
    source: &'a S,
    empty_words: EmptyWordPolicy,
}

impl<'a, S: TokenSource + ?Sized> Mapper<'a, S> {
    pub fn new(
        id: usize,
        partition: &'a Partition,
        source: &'a S,
        empty_words: EmptyWordPolicy,
    ) -> Self {
        Self {
            id,
            partition,
            source,
            empty_words,
        }
    }

    /// Index every file of the partition locally.
    pub fn build_local_index(&self, observer: &dyn JobObserver) -> (LocalIndex, Vec<FileError>) {
        let mut local = LocalIndex::new();
        let mut skipped = Vec::new();

        for file in &self.partition.files {
            match self.file_words(file) {
                Ok(words) => {
                    debug!(
                        mapper = self.id,
                        file = file.id,
                        words = words.len(),
                        "indexed file"
                    );
                    for word in words {
                        local.entry(word).or_default().insert(file.id);
                    }
                    observer.file_indexed(file);
                }
                Err(error) => {
                    warn!(mapper = self.id, "skipping {}", error);
                    observer.file_skipped(&error);
                    skipped.push(error);
                }
            }
        }

        (local, skipped)
    }

    /// Distinct normalized words of one file.
    fn file_words(&self, file: &FileDescriptor) -> Result<HashSet<String>, FileError> {
        let mut words = HashSet::new();
        let policy = self.empty_words;
        self.source
            .read_tokens(file, &mut |token| {
                let word = normalize_token(token);
                if policy.keeps(&word) {
                    words.insert(word);
                }
            })
            .map_err(|e| FileError::new(file.id, &file.path, &e))?;
        Ok(words)
    }

    /// Build the local index and merge it into `index`.
    pub fn run(&self, index: &SharedIndex, observer: &dyn JobObserver) -> MapperReport {
        debug!(
            mapper = self.id,
            files = self.partition.len(),
            bytes = self.partition.total_bytes,
            "mapper started"
        );

        let (local, skipped) = self.build_local_index(observer);
        let local_words = local.len();
        let new_words = if local.is_empty() {
            0
        } else {
            index.merge(local)
        };

        debug!(mapper = self.id, local_words, new_words, "mapper merged");

        MapperReport {
            mapper: self.id,
            files: self.partition.len(),
            bytes: self.partition.total_bytes,
            local_words,
            new_words,
            skipped,
        }
    }
}
