// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the alphadex CLI.
//!
//! Box-drawn tables for `plan`, one-line summaries for `index`. Colors use
//! the OneDark palette and are switched off for `NO_COLOR` and for output
//! that is not a terminal.

use std::io::IsTerminal;

use alphadex::{FileError, JobReport, Partition};

// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 64;

// ═══════════════════════════════════════════════════════════════════════════
// COLORS
// ═══════════════════════════════════════════════════════════════════════════

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stdout().is_terminal()
}

fn paint(color: (u8, u8, u8), modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), rgb(color), text, RESET)
    } else {
        text.to_string()
    }
}

fn border() -> String {
    if use_colors() {
        rgb(GRAY)
    } else {
        String::new()
    }
}

fn reset() -> &'static str {
    if use_colors() {
        RESET
    } else {
        ""
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!(
        "{}│{}{}{}{}│{}",
        border(),
        reset(),
        content,
        " ".repeat(pad),
        border(),
        reset()
    );
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", paint(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}┌{}{}{}{}┐{}",
        border(),
        reset(),
        label_part,
        border(),
        "─".repeat(remaining),
        reset()
    );
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("{}└{}┘{}", border(), "─".repeat(BOX_WIDTH), reset());
}

pub fn pad_left(s: &str, width: usize) -> String {
    let len = visible_len(s);
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - len), s)
    }
}

/// Human-readable byte count.
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COMMAND OUTPUT
// ═══════════════════════════════════════════════════════════════════════════

/// Table of mapper assignments printed by `alphadex plan`.
pub fn print_plan(partitions: &[Partition], makespan: u64, bound: f64) {
    let files: usize = partitions.iter().map(Partition::len).sum();
    let bytes: u64 = partitions.iter().map(|p| p.total_bytes).sum();

    section_top("PLAN");
    row(&format!(
        " {} files, {} across {} mappers",
        files,
        format_size(bytes),
        partitions.len()
    ));
    row("");
    for (id, p) in partitions.iter().enumerate() {
        let load = format_size(p.total_bytes);
        let load = if p.total_bytes == makespan && makespan > 0 {
            paint(YELLOW, &[BOLD], &load)
        } else {
            load
        };
        row(&format!(
            " mapper-{:<4} {:>6} files {}",
            id,
            p.len(),
            pad_left(&load, 12)
        ));
    }
    row("");
    row(&format!(
        " makespan {}  {}",
        format_size(makespan),
        paint(GRAY, &[DIM], &format!("(LPT within {:.3}x of optimal)", bound))
    ));
    section_bot();
}

/// One warning line per skipped input file.
pub fn print_skipped(skipped: &[FileError]) {
    for error in skipped {
        eprintln!("⚠️  Skipped {}", error);
    }
}

pub fn print_summary(report: &JobReport, elapsed_ms: f64) {
    eprintln!(
        "{} {} words from {} files into {} ({} lines, {:.1} ms)",
        paint(GREEN, &[BOLD], "✅ Index complete:"),
        report.words,
        report.files - report.skipped.len(),
        report.output_dir.display(),
        report.lines_written(),
        elapsed_ms
    );
}
