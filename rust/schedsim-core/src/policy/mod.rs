//! Scheduling policies
//!
//! A policy owns the ready set and answers three questions for the engine:
//! who runs next, for how long continuously, and what happens when a time
//! slice expires. The engine owns the canonical process table; policies
//! store table indices, never process records.

mod fcfs;
mod hrrn;
mod mlfq;
mod mlq;
mod queue;
mod rr;
mod sjf;
mod srtf;

pub use fcfs::Fcfs;
pub use hrrn::Hrrn;
pub use mlfq::Mlfq;
pub use mlq::Mlq;
pub use rr::RoundRobin;
pub use sjf::Sjf;
pub use srtf::Srtf;

use crate::process::{ProcState, Tick};

/// Contract between the engine and a scheduling discipline.
///
/// `slot` arguments index into the process table passed alongside every
/// call; the table is the single source of truth for process state.
pub trait Policy: std::fmt::Debug {
    /// Canonical upper-case policy name.
    fn name(&self) -> &'static str;

    /// True iff a new arrival may displace the running process.
    fn preempt_on_arrival(&self) -> bool {
        false
    }

    /// Admit a newly arrived process into the ready set. Implementations
    /// record `ready_since = now`.
    fn on_arrival(&mut self, table: &mut [ProcState], slot: usize, now: Tick);

    /// Re-admit a process that lost the CPU without completing.
    fn put_back(&mut self, table: &mut [ProcState], slot: usize, now: Tick) {
        self.on_arrival(table, slot, now);
    }

    /// Choose the process that should hold the CPU starting at `now`.
    ///
    /// When `current` is set it is the running process; the policy may keep
    /// it, or displace it for a better ready candidate after re-admitting
    /// it. Returns `None` when nothing is runnable.
    fn select(&mut self, table: &mut [ProcState], now: Tick, current: Option<usize>)
        -> Option<usize>;

    /// Longest run the process may perform before the engine must consult
    /// the policy again. `None` means until completion or arrival-driven
    /// preemption.
    fn max_continuous_run(&self, table: &[ProcState], slot: usize, now: Tick) -> Option<Tick> {
        let _ = (table, slot, now);
        None
    }

    /// Notification that `slot` ran for `ran_for` units ending at `now`.
    fn on_run(&mut self, table: &mut [ProcState], slot: usize, ran_for: Tick, now: Tick) {
        let _ = (table, slot, ran_for, now);
    }

    /// A slice ended with work remaining; re-admit the process, possibly at
    /// a different queue. Policies whose slice always equals the remaining
    /// burst never receive this call.
    fn on_timeslice_expired(&mut self, table: &mut [ProcState], slot: usize, now: Tick) {
        self.put_back(table, slot, now);
    }
}

/// Stamp the current ready-set admission time.
pub(crate) fn mark_ready(table: &mut [ProcState], slot: usize, now: Tick) {
    table[slot].ready_since = now;
}
