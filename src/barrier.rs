// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Single-use rendezvous between the map and reduce phases, plus the shared
//! cancellation flag checked at phase boundaries.
//!
//! `std::sync::Barrier` has no way to release waiters early, so a mapper that
//! panics (or a worker thread that never got spawned) would leave everyone
//! else blocked forever. [`PhaseBarrier::abort`] covers that case.

use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// How a thread left the barrier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarrierWait {
    /// Last to arrive; every party is through.
    Leader,
    /// Released by the leader.
    Follower,
    /// Released by [`PhaseBarrier::abort`]; the next phase must not run.
    Aborted,
}

impl BarrierWait {
    pub fn is_leader(self) -> bool {
        self == BarrierWait::Leader
    }

    pub fn proceeds(self) -> bool {
        self != BarrierWait::Aborted
    }
}

#[derive(Debug, Default)]
struct BarrierState {
    arrived: usize,
    released: bool,
    aborted: bool,
}

/// Blocks every caller until `parties` threads have arrived.
#[derive(Debug)]
pub struct PhaseBarrier {
    parties: usize,
    state: Mutex<BarrierState>,
    cvar: Condvar,
}

impl PhaseBarrier {
    pub fn new(parties: usize) -> Self {
        Self {
            parties,
            state: Mutex::new(BarrierState::default()),
            cvar: Condvar::new(),
        }
    }

    pub fn parties(&self) -> usize {
        self.parties
    }

    /// Arrive and block until all parties have arrived or the barrier is
    /// aborted.
    pub fn arrive_and_wait(&self) -> BarrierWait {
        let mut state = self.state.lock();
        if state.aborted {
            return BarrierWait::Aborted;
        }

        state.arrived += 1;
        assert!(
            state.arrived <= self.parties,
            "phase barrier is single-use: {} arrivals for {} parties",
            state.arrived,
            self.parties
        );

        if state.arrived == self.parties {
            state.released = true;
            self.cvar.notify_all();
            return BarrierWait::Leader;
        }

        while !state.released && !state.aborted {
            self.cvar.wait(&mut state);
        }
        if state.released {
            BarrierWait::Follower
        } else {
            BarrierWait::Aborted
        }
    }

    /// Release every waiter (current and future) with [`BarrierWait::Aborted`].
    ///
    /// Has no effect once the barrier has released normally.
    pub fn abort(&self) {
        let mut state = self.state.lock();
        if !state.released {
            state.aborted = true;
            self.cvar.notify_all();
        }
    }
}

/// Shared "stop working" flag.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
