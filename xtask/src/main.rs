//! Custom cargo commands for alphadex.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests
//!   cargo xtask check     - Quick check (cargo check + clippy)
//!   cargo xtask bench     - Run benchmarks

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Run full verification suite (tests, clippy, feature matrix, smoke run)
  test      Run all Rust tests
  check     Quick check (cargo check + clippy)
  bench     Run benchmarks
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("alphadex Verification Suite");
    println!("==========================================\n");

    println!("[1/4] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[2/4] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[3/4] Building without default features...");
    run_cargo(&["build", "--quiet", "--no-default-features"])?;
    println!("✓ Builds without progress bars\n");

    println!("[4/4] Smoke run: 1 mapper vs 4 mappers...");
    smoke_run()?;
    println!("✓ Outputs identical\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/2] cargo check...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/2] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

/// Index a generated corpus twice through the release binary and compare.
fn smoke_run() -> Result<()> {
    let root = project_root()?;
    run_cargo(&["build", "--quiet", "--release"])?;
    let binary = root.join("target/release/alphadex");

    let work = root.join("target/xtask-smoke");
    if work.exists() {
        fs::remove_dir_all(&work).context("Failed to clear smoke directory")?;
    }
    fs::create_dir_all(&work).context("Failed to create smoke directory")?;

    let words = [
        "The", "quick", "brown", "fox", "jumps", "over", "lazy", "dog.", "Zany", "quokkas",
        "yodel", "x-rays", "2024", "!!", "Walrus", "vexes", "umpires",
    ];
    let mut job = String::new();
    let file_count = 40;
    job.push_str(&format!("{}\n", file_count));
    for i in 0..file_count {
        let name = format!("doc{}.txt", i);
        let text: Vec<&str> = (0..(i * 13) % 200 + 1)
            .map(|j| words[(i * 7 + j * 3) % words.len()])
            .collect();
        fs::write(work.join(&name), text.join(" "))
            .with_context(|| format!("Failed to write {}", name))?;
        job.push_str(&name);
        job.push('\n');
    }
    fs::write(work.join("job.txt"), job).context("Failed to write job file")?;

    run_alphadex(&binary, &work, &["-q", "index", "1", "1", "job.txt", "-o", "one"])?;
    run_alphadex(&binary, &work, &["-q", "index", "4", "7", "job.txt", "-o", "four"])?;

    for letter in 'a'..='z' {
        let file = format!("{}.txt", letter);
        let one = fs::read(work.join("one").join(&file))
            .with_context(|| format!("one/{} missing", file))?;
        let four = fs::read(work.join("four").join(&file))
            .with_context(|| format!("four/{} missing", file))?;
        if one != four {
            bail!("{} differs between 1 and 4 mappers", file);
        }
    }

    Ok(())
}

fn run_alphadex(binary: &Path, cwd: &Path, args: &[&str]) -> Result<()> {
    let status = Command::new(binary)
        .args(args)
        .current_dir(cwd)
        .status()
        .with_context(|| format!("Failed to run alphadex {:?}", args))?;

    if !status.success() {
        bail!("alphadex {:?} failed", args);
    }

    Ok(())
}
