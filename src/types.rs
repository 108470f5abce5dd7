// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Core data types shared by the map and reduce phases.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

/// Identifier of an input file: 1-based position in the job file.
pub type FileId = usize;

/// Word → set of files it occurs in. Built by one mapper, merged once.
pub type LocalIndex = HashMap<String, BTreeSet<FileId>>;

/// Number of output partitions, one per lowercase ASCII letter.
pub const ALPHABET_LEN: usize = 26;

/// The output alphabet in queue order.
pub fn alphabet() -> impl Iterator<Item = char> {
    'a'..='z'
}

/// An input file with its pre-resolved size.
///
/// Created once before partitioning and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileDescriptor {
    pub id: FileId,
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl FileDescriptor {
    pub fn new(id: FileId, path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        Self {
            id,
            path: path.into(),
            size_bytes,
        }
    }
}

/// The files assigned to one mapper.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub files: Vec<FileDescriptor>,
    pub total_bytes: u64,
}

impl Partition {
    pub fn push(&mut self, file: FileDescriptor) {
        self.total_bytes += file.size_bytes;
        self.files.push(file);
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

/// One line of an output file: a word and the ascending ids of the files
/// that contain it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordEntry<'a> {
    pub word: &'a str,
    pub file_ids: &'a [FileId],
}

impl WordEntry<'_> {
    /// Number of distinct files the word occurs in.
    pub fn occurrences(&self) -> usize {
        self.file_ids.len()
    }

    /// Render as `word:[1 2 3]` (no trailing newline).
    pub fn to_line(&self) -> String {
        let ids: Vec<String> = self.file_ids.iter().map(ToString::to_string).collect();
        format!("{}:[{}]", self.word, ids.join(" "))
    }
}
