//! Progress callbacks from inside the worker pool.
//!
//! Called from worker threads, so implementations must be `Sync` and cheap.
//! The CLI drives its progress bars from these; library users can ignore
//! them with [`NoopObserver`].

use crate::error::FileError;
use crate::types::FileDescriptor;

pub trait JobObserver: Sync {
    /// A mapper finished reading a file.
    fn file_indexed(&self, _file: &FileDescriptor) {}

    /// A mapper gave up on a file.
    fn file_skipped(&self, _error: &FileError) {}

    /// Every worker passed the phase barrier; `words` distinct words were
    /// merged.
    fn map_phase_finished(&self, _words: usize) {}

    /// A reducer finished `<letter>.txt`.
    fn letter_written(&self, _letter: char, _lines: usize) {}
}

/// Ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl JobObserver for NoopObserver {}
