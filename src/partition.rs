// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Greedy file partitioning across mappers.
//!
//! Longest-processing-time-first: sort files by size descending, then give
//! each file to the partition with the smallest running total. Ties between
//! partitions go to the lowest index, and the sort is stable, so the same
//! input always produces the same plan.
//!
//! The resulting makespan (largest partition) is within `4/3 - 1/(3n)` of the
//! optimum (Graham, 1969).
//!
//! # INVARIANTS
//!
//! 1. **COVERING**: every input file lands in exactly one partition
//! 2. **COUNT**: exactly `n` partitions are returned, some possibly empty
//! 3. **TOTALS**: `total_bytes` equals the sum of the partition's file sizes

use crate::types::{FileDescriptor, Partition};

/// Split `files` into `n` partitions of roughly equal total size.
///
/// `n` must be at least 1; the job config rejects zero mappers before this
/// is ever called.
pub fn partition(files: &[FileDescriptor], n: usize) -> Vec<Partition> {
    assert!(n >= 1, "partition requires at least one mapper");

    let mut order: Vec<&FileDescriptor> = files.iter().collect();
    order.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));

    let mut partitions = vec![Partition::default(); n];
    for file in order {
        let lightest = lightest_partition(&partitions);
        partitions[lightest].push(file.clone());
    }

    debug_assert_eq!(
        partitions.iter().map(Partition::len).sum::<usize>(),
        files.len(),
        "partitions must cover every input file"
    );

    partitions
}

/// Index of the partition with the smallest total; the lowest index wins ties.
fn lightest_partition(partitions: &[Partition]) -> usize {
    let mut best = 0;
    for (i, p) in partitions.iter().enumerate().skip(1) {
        if p.total_bytes < partitions[best].total_bytes {
            best = i;
        }
    }
    best
}

/// Largest partition total.
pub fn makespan(partitions: &[Partition]) -> u64 {
    partitions.iter().map(|p| p.total_bytes).max().unwrap_or(0)
}

/// Worst-case ratio of the greedy makespan to the optimal one for `n` bins.
pub fn lpt_bound(n: usize) -> f64 {
    let n = n.max(1) as f64;
    4.0 / 3.0 - 1.0 / (3.0 * n)
}
