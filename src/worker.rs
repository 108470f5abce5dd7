// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Role-tagged workers.
//!
//! Every thread in the pool runs a [`Worker`]: a mapper bound to one
//! partition, or a reducer bound to the letter queue. Both see the same
//! [`WorkerContext`] and both pass the phase barrier exactly once. Mappers
//! arrive after merging, reducers arrive before reading.
//!
//! A panic inside a role body is caught here. The barrier is aborted and the
//! job cancelled, so the remaining workers drain instead of waiting for a
//! party that will never arrive.

use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use tracing::{debug, info};

use crate::barrier::{BarrierWait, CancellationToken, PhaseBarrier};
use crate::error::JobError;
use crate::mapper::{Mapper, MapperReport};
use crate::observer::JobObserver;
use crate::queue::LetterWorkQueue;
use crate::reducer::{Reducer, ReducerReport};
use crate::shared_index::SharedIndex;
use crate::source::TokenSource;
use crate::tokenizer::EmptyWordPolicy;
use crate::types::Partition;

/// Collaborators shared by every worker of one job.
pub struct WorkerContext<'a, S: TokenSource + ?Sized> {
    pub index: &'a SharedIndex,
    pub queue: &'a LetterWorkQueue,
    pub barrier: &'a PhaseBarrier,
    pub cancel: &'a CancellationToken,
    pub source: &'a S,
    pub observer: &'a dyn JobObserver,
    pub output_dir: &'a Path,
    pub empty_words: EmptyWordPolicy,
}

pub enum Role {
    Mapper(Partition),
    Reducer,
}

pub struct Worker {
    id: usize,
    role: Role,
}

/// What a worker hands back when joined.
#[derive(Debug)]
pub enum WorkerOutput {
    Mapped(MapperReport),
    Reduced(ReducerReport),
}

impl Worker {
    pub fn mapper(id: usize, partition: Partition) -> Self {
        Self {
            id,
            role: Role::Mapper(partition),
        }
    }

    pub fn reducer(id: usize) -> Self {
        Self {
            id,
            role: Role::Reducer,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn run<S: TokenSource + ?Sized>(
        self,
        ctx: &WorkerContext<'_, S>,
    ) -> Result<WorkerOutput, JobError> {
        let name = self.to_string();
        match self.role {
            Role::Mapper(partition) => run_mapper(self.id, &name, &partition, ctx),
            Role::Reducer => run_reducer(self.id, &name, ctx),
        }
    }
}

impl fmt::Display for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role {
            Role::Mapper(_) => write!(f, "mapper-{}", self.id),
            Role::Reducer => write!(f, "reducer-{}", self.id),
        }
    }
}

fn run_mapper<S: TokenSource + ?Sized>(
    id: usize,
    name: &str,
    partition: &Partition,
    ctx: &WorkerContext<'_, S>,
) -> Result<WorkerOutput, JobError> {
    let report = if ctx.cancel.is_cancelled() {
        debug!(mapper = id, "map phase cancelled");
        MapperReport {
            mapper: id,
            files: partition.files.len(),
            bytes: partition.total_bytes,
            local_words: 0,
            new_words: 0,
            skipped: Vec::new(),
        }
    } else {
        let result = catch_unwind(AssertUnwindSafe(|| {
            Mapper::new(id, partition, ctx.source, ctx.empty_words).run(ctx.index, ctx.observer)
        }));
        match result {
            Ok(report) => report,
            Err(payload) => return Err(tear_down(name, &*payload, ctx)),
        }
    };

    let wait = ctx.barrier.arrive_and_wait();
    announce_phase_change(wait, ctx);
    Ok(WorkerOutput::Mapped(report))
}

fn run_reducer<S: TokenSource + ?Sized>(
    id: usize,
    name: &str,
    ctx: &WorkerContext<'_, S>,
) -> Result<WorkerOutput, JobError> {
    let wait = ctx.barrier.arrive_and_wait();
    announce_phase_change(wait, ctx);

    if !wait.proceeds() || ctx.cancel.is_cancelled() {
        debug!(reducer = id, "reduce phase cancelled");
        return Ok(WorkerOutput::Reduced(ReducerReport {
            reducer: id,
            letters: Vec::new(),
        }));
    }

    let result = catch_unwind(AssertUnwindSafe(|| {
        let frozen = ctx.index.snapshot();
        Reducer::new(id, ctx.output_dir).run(frozen, ctx.queue, ctx.cancel, ctx.observer)
    }));

    match result {
        Ok(report) => report.map(WorkerOutput::Reduced),
        Err(payload) => Err(tear_down(name, &*payload, ctx)),
    }
}

fn announce_phase_change<S: TokenSource + ?Sized>(wait: BarrierWait, ctx: &WorkerContext<'_, S>) {
    if wait.is_leader() {
        // Every mapper has merged, so freezing here is safe.
        let words = ctx.index.snapshot().len();
        info!(
            workers = ctx.barrier.parties(),
            words, "map phase complete, reducing"
        );
        ctx.observer.map_phase_finished(words);
    }
}

/// Cancel the job after a worker panic and release everyone at the barrier.
fn tear_down<S: TokenSource + ?Sized>(
    name: &str,
    payload: &(dyn Any + Send),
    ctx: &WorkerContext<'_, S>,
) -> JobError {
    ctx.cancel.cancel();
    ctx.barrier.abort();
    JobError::WorkerPanicked {
        worker: name.to_string(),
        message: panic_message(payload),
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
