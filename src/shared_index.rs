// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The index shared between the two phases.
//!
//! During the map phase, mappers call [`SharedIndex::merge`] once each. The
//! whole local result is merged under one lock acquisition, so merges from
//! different mappers never interleave.
//!
//! After the phase barrier, reducers call [`SharedIndex::snapshot`]. The first
//! call moves the accumulated words out of the mutex into a [`FrozenIndex`]
//! (sorted, ids flattened to ascending vectors); every later call returns the
//! same frozen view. Reading the view takes no lock at all.
//!
//! # INVARIANTS
//!
//! 1. **NO_DUP_IDS**: a word's file ids are a set
//! 2. **WRITES_BEFORE_READS**: `merge` after `snapshot` is a bug and panics
//! 3. **FIRST_LETTER**: `entries_for_letter(c)` yields exactly the words whose
//!    first character is `c`

use parking_lot::Mutex;
use std::collections::btree_map;
use std::collections::hash_map::Entry;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::types::{FileId, LocalIndex, WordEntry};

/// Word → file-id set, written by mappers and frozen for reducers.
#[derive(Debug, Default)]
pub struct SharedIndex {
    words: Mutex<LocalIndex>,
    frozen: OnceLock<FrozenIndex>,
}

impl SharedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union a mapper's local index into the shared one.
    ///
    /// Returns the number of words that were new to the shared index.
    pub fn merge(&self, local: LocalIndex) -> usize {
        assert!(
            self.frozen.get().is_none(),
            "merge into an index that was already frozen for reducing"
        );

        let mut words = self.words.lock();
        let mut inserted = 0;
        for (word, file_ids) in local {
            match words.entry(word) {
                Entry::Vacant(slot) => {
                    slot.insert(file_ids);
                    inserted += 1;
                }
                Entry::Occupied(mut slot) => slot.get_mut().extend(file_ids),
            }
        }
        inserted
    }

    /// Number of distinct words merged so far (or frozen).
    pub fn len(&self) -> usize {
        match self.frozen.get() {
            Some(frozen) => frozen.len(),
            None => self.words.lock().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read-only view of the finished index.
    ///
    /// Must only be called once no mapper can merge any more; the phase
    /// barrier provides that ordering.
    pub fn snapshot(&self) -> &FrozenIndex {
        self.frozen.get_or_init(|| {
            let words = std::mem::take(&mut *self.words.lock());
            FrozenIndex::from_local(words)
        })
    }
}

/// Immutable, sorted form of the index read by reducers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrozenIndex {
    words: BTreeMap<String, Vec<FileId>>,
}

impl FrozenIndex {
    pub fn from_local(local: LocalIndex) -> Self {
        let words = local
            .into_iter()
            .map(|(word, ids)| (word, ids.into_iter().collect()))
            .collect();
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Ascending file ids for `word`, if indexed.
    pub fn get(&self, word: &str) -> Option<&[FileId]> {
        self.words.get(word).map(Vec::as_slice)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    /// All entries in word order.
    pub fn iter(&self) -> impl Iterator<Item = WordEntry<'_>> {
        self.words.iter().map(to_entry)
    }

    /// Words starting with `letter`, in word order.
    ///
    /// Words are stored sorted, so this is a range scan rather than a pass
    /// over the whole index.
    pub fn entries_for_letter(&self, letter: char) -> LetterEntries<'_> {
        LetterEntries {
            inner: self.words.range(letter.to_string()..),
            letter,
        }
    }
}

fn to_entry<'a>((word, ids): (&'a String, &'a Vec<FileId>)) -> WordEntry<'a> {
    WordEntry {
        word: word.as_str(),
        file_ids: ids.as_slice(),
    }
}

/// Iterator returned by [`FrozenIndex::entries_for_letter`].
pub struct LetterEntries<'a> {
    inner: btree_map::Range<'a, String, Vec<FileId>>,
    letter: char,
}

impl<'a> Iterator for LetterEntries<'a> {
    type Item = WordEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (word, ids) = self.inner.next()?;
        if word.starts_with(self.letter) {
            Some(to_entry((word, ids)))
        } else {
            None
        }
    }
}
