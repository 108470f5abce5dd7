// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! [`JobError`] is fatal: the job stops and no report is produced.
//! [`FileError`] is not: the file is skipped and listed in the report.

use serde::Serialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::types::FileId;

/// A fatal job failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    /// Mapper or reducer count below 1.
    InvalidWorkerCount { role: &'static str, count: usize },
    /// The job file could not be read.
    JobFileRead { path: PathBuf, reason: String },
    /// The job file is not in either supported format.
    JobFileParse { path: PathBuf, reason: String },
    /// The job file declares more paths than it lists.
    MissingJobEntries { declared: usize, found: usize },
    /// The output directory could not be created.
    OutputDir { path: PathBuf, reason: String },
    /// A reducer failed to write its letter file.
    OutputWrite { path: PathBuf, reason: String },
    /// The OS refused to start a worker thread.
    WorkerSpawn { worker: String, reason: String },
    /// A worker panicked; the job was torn down.
    WorkerPanicked { worker: String, message: String },
    /// The job was cancelled before the reduce phase finished.
    Cancelled,
}

impl JobError {
    pub(crate) fn output_write(path: &Path, err: &io::Error) -> Self {
        JobError::OutputWrite {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}

impl fmt::Display for JobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobError::InvalidWorkerCount { role, count } => {
                write!(f, "Incorrect number of {}: {} (need at least 1)", role, count)
            }
            JobError::JobFileRead { path, reason } => {
                write!(f, "Could not open job file {}: {}", path.display(), reason)
            }
            JobError::JobFileParse { path, reason } => {
                write!(f, "Invalid job file {}: {}", path.display(), reason)
            }
            JobError::MissingJobEntries { declared, found } => write!(
                f,
                "Job file declares {} files but lists only {}",
                declared, found
            ),
            JobError::OutputDir { path, reason } => write!(
                f,
                "Failed to create output dir {}: {}",
                path.display(),
                reason
            ),
            JobError::OutputWrite { path, reason } => {
                write!(f, "Failed to write {}: {}", path.display(), reason)
            }
            JobError::WorkerSpawn { worker, reason } => {
                write!(f, "Thread creation failed for {}: {}", worker, reason)
            }
            JobError::WorkerPanicked { worker, message } => {
                write!(f, "{} panicked: {}", worker, message)
            }
            JobError::Cancelled => write!(f, "Job cancelled"),
        }
    }
}

impl std::error::Error for JobError {}

/// An input file that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    pub id: FileId,
    pub path: PathBuf,
    pub reason: String,
}

impl FileError {
    pub fn new(id: FileId, path: &Path, err: &io::Error) -> Self {
        Self {
            id,
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file {} ({}): {}", self.id, self.path.display(), self.reason)
    }
}
