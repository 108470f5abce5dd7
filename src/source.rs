//! Where mappers get their tokens from.
//!
//! The engine only needs "give me the whitespace-delimited tokens of this
//! file". Production reads the filesystem; tests plug in
//! [`crate::testing::MemorySource`].

use std::fs::File;
use std::io::{self, BufReader};

use crate::tokenizer::for_each_token;
use crate::types::FileDescriptor;

/// Supplies raw tokens for an input file.
pub trait TokenSource: Sync {
    /// Call `emit` for every token of `file`, in order.
    ///
    /// An `Err` means the file could not be opened or read to the end; the
    /// tokens already emitted for it are discarded by the caller.
    fn read_tokens(&self, file: &FileDescriptor, emit: &mut dyn FnMut(&str)) -> io::Result<()>;
}

/// Reads input files from disk.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsTokenSource;

impl TokenSource for FsTokenSource {
    fn read_tokens(&self, file: &FileDescriptor, emit: &mut dyn FnMut(&str)) -> io::Result<()> {
        let reader = BufReader::new(File::open(&file.path)?);
        for_each_token(reader, emit)
    }
}
