// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Job files: which input files to index.
//!
//! Two formats are accepted:
//!
//! ```text
//! 3
//! books/a.txt
//! books/b.txt books/c.txt
//! ```
//!
//! A count followed by that many whitespace-separated paths. Anything after
//! the last counted path is ignored.
//!
//! ```json
//! {"version": 1, "files": ["books/a.txt", "books/b.txt"]}
//! ```
//!
//! Files ending in `.json` are read as the JSON form. Paths are used as
//! given, relative to the current directory.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::JobError;
use crate::types::FileDescriptor;

fn default_version() -> u32 {
    1
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobManifest {
    #[serde(default = "default_version")]
    pub version: u32,
    pub files: Vec<PathBuf>,
}

impl JobManifest {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            version: default_version(),
            files,
        }
    }

    /// Read a job file, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self, JobError> {
        let content = fs::read_to_string(path).map_err(|e| JobError::JobFileRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(path, &content)
        } else {
            Self::from_text(path, &content)
        }
    }

    pub fn from_json(path: &Path, content: &str) -> Result<Self, JobError> {
        let manifest: JobManifest =
            serde_json::from_str(content).map_err(|e| JobError::JobFileParse {
                path: path.to_path_buf(),
                reason: format!("invalid manifest JSON: {}", e),
            })?;
        if manifest.version != 1 {
            return Err(JobError::JobFileParse {
                path: path.to_path_buf(),
                reason: format!("unsupported manifest version {}", manifest.version),
            });
        }
        Ok(manifest)
    }

    pub fn from_text(path: &Path, content: &str) -> Result<Self, JobError> {
        let mut tokens = content.split_whitespace();
        let count_token = tokens.next().ok_or_else(|| JobError::JobFileParse {
            path: path.to_path_buf(),
            reason: "missing file count".to_string(),
        })?;
        let declared: usize = count_token.parse().map_err(|_| JobError::JobFileParse {
            path: path.to_path_buf(),
            reason: format!("invalid file count '{}'", count_token),
        })?;

        let files: Vec<PathBuf> = tokens.take(declared).map(PathBuf::from).collect();
        if files.len() < declared {
            return Err(JobError::MissingJobEntries {
                declared,
                found: files.len(),
            });
        }
        Ok(Self::new(files))
    }

    /// Number the files 1.. in listed order and look up their sizes.
    ///
    /// A file whose size cannot be read gets size 0; the mapper that owns it
    /// reports the real failure when it tries to open it.
    pub fn resolve(&self) -> Vec<FileDescriptor> {
        self.files
            .par_iter()
            .enumerate()
            .map(|(i, path)| {
                let size = match fs::metadata(path) {
                    Ok(meta) => meta.len(),
                    Err(e) => {
                        warn!(file = i + 1, "cannot stat {}: {}", path.display(), e);
                        0
                    }
                };
                FileDescriptor::new(i + 1, path.clone(), size)
            })
            .collect()
    }
}
