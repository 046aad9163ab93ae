//! Shortest remaining time first

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::process::{ProcState, Tick};

use super::queue::JobKey;
use super::{mark_ready, Policy};

/// Preemptive variant of SJF: a new arrival with strictly smaller
/// `(remaining, arrival_time, pid)` displaces the running process.
#[derive(Debug, Default)]
pub struct Srtf {
    heap: BinaryHeap<Reverse<JobKey>>,
}

impl Srtf {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Policy for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn preempt_on_arrival(&self) -> bool {
        true
    }

    fn on_arrival(&mut self, table: &mut [ProcState], slot: usize, now: Tick) {
        mark_ready(table, slot, now);
        self.heap.push(Reverse(JobKey::of(table, slot)));
    }

    fn select(
        &mut self,
        table: &mut [ProcState],
        _now: Tick,
        current: Option<usize>,
    ) -> Option<usize> {
        let Some(cur) = current else {
            return self.heap.pop().map(|Reverse(key)| key.slot);
        };
        let displace = match self.heap.peek() {
            Some(Reverse(top)) => {
                let p = &table[cur];
                (top.remaining, top.arrival, top.pid.as_str())
                    < (p.remaining, p.arrival_time, p.pid.as_str())
            }
            None => false,
        };
        if displace {
            self.heap.push(Reverse(JobKey::of(table, cur)));
            self.heap.pop().map(|Reverse(key)| key.slot)
        } else {
            Some(cur)
        }
    }

    fn max_continuous_run(&self, table: &[ProcState], slot: usize, _now: Tick) -> Option<Tick> {
        Some(table[slot].remaining)
    }
}
