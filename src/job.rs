// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Job configuration and the worker pool that runs it.
//!
//! ```text
//!   files ──partition()──▶ N partitions
//!                              │
//!         ┌────────────────────┼────────────────────┐
//!         ▼                    ▼                    ▼
//!     mapper-0   ...       mapper-N-1          reducer-0 ... reducer-M-1
//!     local index          local index              │
//!         │ merge (lock)       │ merge (lock)       │
//!         ▼                    ▼                    │
//!   ══════════════════ phase barrier (N + M) ══════════════════
//!                                                   │
//!                         snapshot() ◀──────────────┤
//!                         letter queue ◀── try_claim()
//!                                                   ▼
//!                                            a.txt ... z.txt
//! ```
//!
//! All N + M threads are spawned up front inside one `thread::scope` and
//! joined before [`IndexJob::run`] returns.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use tracing::{debug, info};

use crate::barrier::{CancellationToken, PhaseBarrier};
use crate::error::{FileError, JobError};
use crate::mapper::MapperReport;
use crate::observer::{JobObserver, NoopObserver};
use crate::partition::{makespan, partition};
use crate::queue::LetterWorkQueue;
use crate::reducer::ReducerReport;
use crate::shared_index::SharedIndex;
use crate::source::{FsTokenSource, TokenSource};
use crate::tokenizer::EmptyWordPolicy;
use crate::types::{FileDescriptor, Partition, ALPHABET_LEN};
use crate::worker::{panic_message, Worker, WorkerContext, WorkerOutput};

/// Worker counts and output settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobConfig {
    pub mappers: usize,
    pub reducers: usize,
    pub output_dir: PathBuf,
    pub empty_words: EmptyWordPolicy,
}

impl JobConfig {
    /// Output goes to the current directory unless changed.
    pub fn new(mappers: usize, reducers: usize) -> Self {
        Self {
            mappers,
            reducers,
            output_dir: PathBuf::from("."),
            empty_words: EmptyWordPolicy::default(),
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_empty_words(mut self, policy: EmptyWordPolicy) -> Self {
        self.empty_words = policy;
        self
    }

    pub fn validate(&self) -> Result<(), JobError> {
        if self.mappers < 1 {
            return Err(JobError::InvalidWorkerCount {
                role: "mappers",
                count: self.mappers,
            });
        }
        if self.reducers < 1 {
            return Err(JobError::InvalidWorkerCount {
                role: "reducers",
                count: self.reducers,
            });
        }
        Ok(())
    }

    pub fn workers(&self) -> usize {
        self.mappers + self.reducers
    }
}

/// Summary of a finished job.
#[derive(Clone, Debug, Default, Serialize)]
pub struct JobReport {
    pub files: usize,
    pub bytes: u64,
    /// Largest partition, in bytes.
    pub makespan_bytes: u64,
    /// Distinct words in the final index.
    pub words: usize,
    pub output_dir: PathBuf,
    pub mappers: Vec<MapperReport>,
    pub reducers: Vec<ReducerReport>,
    /// Files that could not be read, by id.
    pub skipped: Vec<FileError>,
}

impl JobReport {
    pub fn letters_written(&self) -> usize {
        self.reducers.iter().map(|r| r.letters.len()).sum()
    }

    pub fn lines_written(&self) -> usize {
        self.reducers
            .iter()
            .flat_map(|r| &r.letters)
            .map(|l| l.lines)
            .sum()
    }
}

/// One indexing run over a fixed set of files.
pub struct IndexJob<S = FsTokenSource> {
    config: JobConfig,
    files: Vec<FileDescriptor>,
    source: S,
    cancel: CancellationToken,
}

impl IndexJob<FsTokenSource> {
    /// Read input files from disk.
    pub fn new(config: JobConfig, files: Vec<FileDescriptor>) -> Self {
        Self::with_source(config, files, FsTokenSource)
    }
}

impl<S: TokenSource> IndexJob<S> {
    pub fn with_source(config: JobConfig, files: Vec<FileDescriptor>, source: S) -> Self {
        Self {
            config,
            files,
            source,
            cancel: CancellationToken::new(),
        }
    }

    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    pub fn files(&self) -> &[FileDescriptor] {
        &self.files
    }

    /// Token that stops the job when cancelled. Mappers check it before
    /// reading, reducers after the barrier and before each claim.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// The mapper assignment `run` will use.
    pub fn plan(&self) -> Result<Vec<Partition>, JobError> {
        self.config.validate()?;
        Ok(partition(&self.files, self.config.mappers))
    }

    pub fn run(&self) -> Result<JobReport, JobError> {
        self.run_with_observer(&NoopObserver)
    }

    pub fn run_with_observer(&self, observer: &dyn JobObserver) -> Result<JobReport, JobError> {
        let partitions = self.plan()?;
        let output_dir = self.config.output_dir.as_path();
        ensure_output_dir(output_dir)?;

        let makespan_bytes = makespan(&partitions);
        for (id, p) in partitions.iter().enumerate() {
            debug!(mapper = id, files = p.len(), bytes = p.total_bytes, "partition");
        }
        info!(
            files = self.files.len(),
            mappers = self.config.mappers,
            reducers = self.config.reducers,
            makespan_bytes,
            "starting job"
        );

        let index = SharedIndex::new();
        let queue = LetterWorkQueue::new();
        let barrier = PhaseBarrier::new(self.config.workers());
        let ctx = WorkerContext {
            index: &index,
            queue: &queue,
            barrier: &barrier,
            cancel: &self.cancel,
            source: &self.source,
            observer,
            output_dir,
            empty_words: self.config.empty_words,
        };

        let workers: Vec<Worker> = partitions
            .into_iter()
            .enumerate()
            .map(|(id, p)| Worker::mapper(id, p))
            .chain((0..self.config.reducers).map(Worker::reducer))
            .collect();

        let results = run_pool(workers, &ctx);
        let report = self.collect(results, &index, makespan_bytes)?;

        info!(
            words = report.words,
            letters = report.letters_written(),
            skipped = report.skipped.len(),
            "job finished"
        );
        Ok(report)
    }

    fn collect(
        &self,
        results: Vec<Result<WorkerOutput, JobError>>,
        index: &SharedIndex,
        makespan_bytes: u64,
    ) -> Result<JobReport, JobError> {
        let mut mappers = Vec::with_capacity(self.config.mappers);
        let mut reducers = Vec::with_capacity(self.config.reducers);
        let mut first_error: Option<JobError> = None;

        for result in results {
            match result {
                Ok(WorkerOutput::Mapped(report)) => mappers.push(report),
                Ok(WorkerOutput::Reduced(report)) => reducers.push(report),
                // The error that caused a cancellation beats the cancellation.
                Err(e) => {
                    if matches!(first_error, None | Some(JobError::Cancelled)) {
                        first_error = Some(e);
                    }
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }
        if self.cancel.is_cancelled() {
            return Err(JobError::Cancelled);
        }

        let letters: usize = reducers.iter().map(|r| r.letters.len()).sum();
        debug_assert_eq!(
            letters, ALPHABET_LEN,
            "every letter must be written exactly once"
        );

        let mut skipped: Vec<FileError> = mappers.iter().flat_map(|m| m.skipped.clone()).collect();
        skipped.sort_by_key(|e| e.id);

        Ok(JobReport {
            files: self.files.len(),
            bytes: self.files.iter().map(|f| f.size_bytes).sum(),
            makespan_bytes,
            words: index.len(),
            output_dir: self.config.output_dir.clone(),
            mappers,
            reducers,
            skipped,
        })
    }
}

/// Spawn every worker in its own named thread and join them all.
///
/// If a thread cannot be spawned, the barrier is aborted so the workers that
/// did start can finish, and the spawn failure is reported.
fn run_pool<S: TokenSource + ?Sized>(
    workers: Vec<Worker>,
    ctx: &WorkerContext<'_, S>,
) -> Vec<Result<WorkerOutput, JobError>> {
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers.len());
        let mut results = Vec::new();

        for worker in workers {
            let name = worker.to_string();
            let spawned = thread::Builder::new()
                .name(name.clone())
                .spawn_scoped(scope, move || worker.run(ctx));
            match spawned {
                Ok(handle) => handles.push((name, handle)),
                Err(e) => {
                    ctx.cancel.cancel();
                    ctx.barrier.abort();
                    results.push(Err(JobError::WorkerSpawn {
                        worker: name,
                        reason: e.to_string(),
                    }));
                    break;
                }
            }
        }

        for (name, handle) in handles {
            let result = handle.join().unwrap_or_else(|payload| {
                Err(JobError::WorkerPanicked {
                    worker: name,
                    message: panic_message(&*payload),
                })
            });
            results.push(result);
        }
        results
    })
}

/// Create `dir` and any missing parents.
pub fn ensure_output_dir(dir: &Path) -> Result<(), JobError> {
    fs::create_dir_all(dir).map_err(|e| JobError::OutputDir {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })
}
