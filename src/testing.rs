//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::source::TokenSource;
use crate::tokenizer::for_each_token;
use crate::types::{alphabet, FileDescriptor, FileId};

/// In-memory input files, ids assigned 1.. in order.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: Vec<(FileDescriptor, String)>,
    unreadable: HashSet<FileId>,
}

impl MemorySource {
    pub fn new(texts: &[&str]) -> Self {
        let files = texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let id = i + 1;
                let file = FileDescriptor::new(id, format!("mem/{}.txt", id), text.len() as u64);
                (file, (*text).to_string())
            })
            .collect();
        Self {
            files,
            unreadable: HashSet::new(),
        }
    }

    /// Make file `id` fail after its first token.
    pub fn with_unreadable(mut self, id: FileId) -> Self {
        self.unreadable.insert(id);
        self
    }

    pub fn descriptors(&self) -> Vec<FileDescriptor> {
        self.files.iter().map(|(file, _)| file.clone()).collect()
    }
}

impl TokenSource for MemorySource {
    fn read_tokens(&self, file: &FileDescriptor, emit: &mut dyn FnMut(&str)) -> io::Result<()> {
        let (_, text) = self
            .files
            .iter()
            .find(|(f, _)| f.id == file.id)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such in-memory file"))?;

        if self.unreadable.contains(&file.id) {
            let mut first = true;
            for_each_token(text.as_bytes(), |token| {
                if std::mem::take(&mut first) {
                    emit(token);
                }
            })?;
            return Err(io::Error::other("simulated read failure"));
        }

        for_each_token(text.as_bytes(), emit)
    }
}

/// Write `texts` as `f1.txt`, `f2.txt`, ... under `dir` and describe them.
pub fn write_corpus(dir: &Path, texts: &[&str]) -> Vec<FileDescriptor> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let id = i + 1;
            let path = dir.join(format!("f{}.txt", id));
            fs::write(&path, text).expect("write corpus file");
            FileDescriptor::new(id, path, text.len() as u64)
        })
        .collect()
}

/// Write a plain-text job file listing `paths`.
pub fn write_job_file(path: &Path, paths: &[PathBuf]) {
    let mut content = format!("{}\n", paths.len());
    for p in paths {
        content.push_str(&p.display().to_string());
        content.push('\n');
    }
    fs::write(path, content).expect("write job file");
}

/// Contents of every `<letter>.txt` present in `dir`.
pub fn read_outputs(dir: &Path) -> BTreeMap<char, String> {
    alphabet()
        .filter_map(|letter| {
            fs::read_to_string(dir.join(format!("{}.txt", letter)))
                .ok()
                .map(|content| (letter, content))
        })
        .collect()
}
