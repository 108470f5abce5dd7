// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Two-phase inverted word index over a set of text files.
//!
//! A job runs `N` mapper threads and `M` reducer threads side by side. The
//! mappers split the input files between them (largest first, onto the
//! lightest mapper), index their files locally, and merge into one shared
//! index. A barrier separates the phases. The reducers then take letters off
//! a shared queue and write `a.txt` through `z.txt`, each line a word and
//! the ids of the files it occurs in.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │ manifest.rs │────▶│ partition.rs │────▶│   job.rs    │
//! │ (job file,  │     │ (LPT split)  │     │ (thread     │
//! │  sizes)     │     │              │     │  pool)      │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!                                                 │
//!                                                 ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                        worker.rs                        │
//! │   mapper.rs ──merge──▶ shared_index.rs ◀──snapshot──    │
//! │                        barrier.rs          reducer.rs   │
//! │                                            queue.rs     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use alphadex::{IndexJob, JobConfig, JobManifest};
//! use std::path::Path;
//!
//! let files = JobManifest::load(Path::new("job.txt"))?.resolve();
//! let config = JobConfig::new(4, 2).with_output_dir("out");
//! let report = IndexJob::new(config, files).run()?;
//! println!("{} words", report.words);
//! # Ok::<(), alphadex::JobError>(())
//! ```

// Module declarations
mod barrier;
mod error;
mod job;
mod manifest;
mod mapper;
mod observer;
mod partition;
mod queue;
mod reducer;
mod shared_index;
mod source;
pub mod testing;
mod tokenizer;
mod types;
mod worker;

// Re-exports for public API
pub use barrier::{BarrierWait, CancellationToken, PhaseBarrier};
pub use error::{FileError, JobError};
pub use job::{ensure_output_dir, IndexJob, JobConfig, JobReport};
pub use manifest::JobManifest;
pub use mapper::{Mapper, MapperReport};
pub use observer::{JobObserver, NoopObserver};
pub use partition::{lpt_bound, makespan, partition};
pub use queue::LetterWorkQueue;
pub use reducer::{letter_path, sorted_entries, write_letter, LetterOutput, Reducer, ReducerReport};
pub use shared_index::{FrozenIndex, LetterEntries, SharedIndex};
pub use source::{FsTokenSource, TokenSource};
pub use tokenizer::{for_each_token, normalize_token, EmptyWordPolicy};
pub use types::{alphabet, FileDescriptor, FileId, LocalIndex, Partition, WordEntry, ALPHABET_LEN};
pub use worker::{Role, Worker, WorkerContext, WorkerOutput};
