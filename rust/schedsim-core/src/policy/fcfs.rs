//! First-come first-served

use std::collections::VecDeque;

use crate::process::{ProcState, Tick};

use super::{mark_ready, Policy};

/// Non-preemptive FIFO: processes run to completion in admission order.
#[derive(Debug, Default)]
pub struct Fcfs {
    queue: VecDeque<usize>,
}

impl Fcfs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Policy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn on_arrival(&mut self, table: &mut [ProcState], slot: usize, now: Tick) {
        mark_ready(table, slot, now);
        self.queue.push_back(slot);
    }

    fn select(
        &mut self,
        _table: &mut [ProcState],
        _now: Tick,
        current: Option<usize>,
    ) -> Option<usize> {
        current.or_else(|| self.queue.pop_front())
    }

    fn max_continuous_run(&self, table: &[ProcState], slot: usize, _now: Tick) -> Option<Tick> {
        Some(table[slot].remaining)
    }
}
