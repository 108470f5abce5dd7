// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the alphadex command-line interface.
//!
//! Two subcommands: `index` runs a job and writes `a.txt`..`z.txt`, `plan`
//! shows how the input files would be split across mappers without reading
//! them.

pub mod display;
#[cfg(feature = "progress")]
pub mod progress;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "alphadex",
    about = "Parallel inverted word index, one output file per letter",
    version
)]
pub struct Cli {
    /// More log output (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// No progress bars and no summary
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Index the files listed in a job file
    Index {
        /// Number of mapper threads
        mappers: usize,

        /// Number of reducer threads
        reducers: usize,

        /// Job file: a count followed by paths, or a .json manifest
        job_file: PathBuf,

        /// Directory for a.txt..z.txt
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Drop tokens with no letters instead of indexing them as ""
        #[arg(long)]
        skip_empty_words: bool,

        /// Write the job report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Show the mapper assignment for a job file
    Plan {
        /// Number of mapper threads
        mappers: usize,

        /// Job file: a count followed by paths, or a .json manifest
        job_file: PathBuf,
    },
}
