//! Shortest job first (a.k.a. shortest process next)

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::process::{ProcState, Tick};

use super::queue::JobKey;
use super::{mark_ready, Policy};

/// Non-preemptive min-heap on `(remaining, arrival_time, pid)`.
#[derive(Debug, Default)]
pub struct Sjf {
    heap: BinaryHeap<Reverse<JobKey>>,
}

impl Sjf {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Policy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn on_arrival(&mut self, table: &mut [ProcState], slot: usize, now: Tick) {
        mark_ready(table, slot, now);
        self.heap.push(Reverse(JobKey::of(table, slot)));
    }

    fn select(
        &mut self,
        _table: &mut [ProcState],
        _now: Tick,
        current: Option<usize>,
    ) -> Option<usize> {
        current.or_else(|| self.heap.pop().map(|Reverse(key)| key.slot))
    }

    fn max_continuous_run(&self, table: &[ProcState], slot: usize, _now: Tick) -> Option<Tick> {
        Some(table[slot].remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Process;

    fn state(pid: &str, arrival: Tick, burst: Tick) -> ProcState {
        ProcState::new(&Process {
            pid: pid.to_string(),
            arrival_time: arrival,
            burst_time: burst,
            priority: None,
        })
    }

    #[test]
    fn picks_shortest_remaining_first() {
        let mut procs = vec![state("P1", 0, 6), state("P2", 0, 3), state("P3", 0, 8)];
        let mut policy = Sjf::new();
        for slot in 0..3 {
            policy.on_arrival(&mut procs, slot, 0);
        }
        assert_eq!(policy.select(&mut procs, 0, None), Some(1));
        assert_eq!(policy.select(&mut procs, 3, None), Some(0));
        assert_eq!(policy.select(&mut procs, 9, None), Some(2));
    }

    #[test]
    fn ties_break_by_arrival_then_pid() {
        let mut procs = vec![state("P2", 0, 4), state("P1", 0, 4), state("P0", 1, 4)];
        let mut policy = Sjf::new();
        for slot in 0..3 {
            policy.on_arrival(&mut procs, slot, 0);
        }
        assert_eq!(policy.select(&mut procs, 0, None), Some(1)); // P1
        assert_eq!(policy.select(&mut procs, 0, None), Some(0)); // P2
        assert_eq!(policy.select(&mut procs, 0, None), Some(2)); // P0, later arrival
    }
}
