// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use std::fs;
use std::path::Path;
use std::process;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use alphadex::{
    lpt_bound, makespan, partition, EmptyWordPolicy, IndexJob, JobConfig, JobManifest, JobReport,
};

mod cli;
use cli::{display, Cli, Commands};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Index {
            mappers,
            reducers,
            job_file,
            output,
            skip_empty_words,
            report,
        } => {
            let policy = if skip_empty_words {
                EmptyWordPolicy::Skip
            } else {
                EmptyWordPolicy::Index
            };
            let config = JobConfig::new(mappers, reducers)
                .with_output_dir(output)
                .with_empty_words(policy);
            run_index(config, &job_file, report.as_deref(), cli.quiet)
        }
        Commands::Plan { mappers, job_file } => run_plan(mappers, &job_file),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_index(
    config: JobConfig,
    job_file: &Path,
    report_path: Option<&Path>,
    quiet: bool,
) -> Result<(), String> {
    // Worker counts are checked before the job file is even opened.
    config.validate().map_err(|e| e.to_string())?;

    let manifest = JobManifest::load(job_file).map_err(|e| e.to_string())?;
    let files = manifest.resolve();
    let file_count = files.len();
    let job = IndexJob::new(config, files);

    let start = Instant::now();
    let report = run_with_progress(&job, file_count, quiet)?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    display::print_skipped(&report.skipped);
    if let Some(path) = report_path {
        write_report(&report, path)?;
    }
    if !quiet {
        display::print_summary(&report, elapsed_ms);
    }
    Ok(())
}

#[cfg(feature = "progress")]
fn run_with_progress(job: &IndexJob, files: usize, quiet: bool) -> Result<JobReport, String> {
    if quiet {
        return job.run().map_err(|e| e.to_string());
    }
    let progress = cli::progress::ProgressObserver::new(files);
    let result = job.run_with_observer(&progress);
    progress.finish();
    result.map_err(|e| e.to_string())
}

#[cfg(not(feature = "progress"))]
fn run_with_progress(job: &IndexJob, _files: usize, _quiet: bool) -> Result<JobReport, String> {
    job.run().map_err(|e| e.to_string())
}

fn write_report(report: &JobReport, path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| format!("Failed to serialize report: {}", e))?;
    fs::write(path, json).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

fn run_plan(mappers: usize, job_file: &Path) -> Result<(), String> {
    JobConfig::new(mappers, 1)
        .validate()
        .map_err(|e| e.to_string())?;

    let manifest = JobManifest::load(job_file).map_err(|e| e.to_string())?;
    let files = manifest.resolve();
    let partitions = partition(&files, mappers);
    display::print_plan(&partitions, makespan(&partitions), lpt_bound(mappers));
    Ok(())
}
