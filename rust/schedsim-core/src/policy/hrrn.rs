//! Highest response ratio next

use crate::process::{ProcState, Tick};

use super::queue::take_highest_response_ratio;
use super::{mark_ready, Policy};

/// Non-preemptive: each selection scores every ready candidate by
/// `(waiting + service) / service` and picks the maximum, so long waits
/// eventually beat short bursts.
#[derive(Debug, Default)]
pub struct Hrrn {
    ready: Vec<usize>,
}

impl Hrrn {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Policy for Hrrn {
    fn name(&self) -> &'static str {
        "HRRN"
    }

    fn on_arrival(&mut self, table: &mut [ProcState], slot: usize, now: Tick) {
        mark_ready(table, slot, now);
        self.ready.push(slot);
    }

    fn select(
        &mut self,
        table: &mut [ProcState],
        now: Tick,
        current: Option<usize>,
    ) -> Option<usize> {
        current.or_else(|| take_highest_response_ratio(&mut self.ready, table, now))
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
    fn long_wait_beats_short_burst() {
        // At t=30: P2 ratio (29+4)/4 = 8.25, P3 ratio (5+2)/2 = 3.5
        let mut procs = vec![state("P2", 1, 4), state("P3", 25, 2)];
        let mut policy = Hrrn::new();
        policy.on_arrival(&mut procs, 0, 1);
        policy.on_arrival(&mut procs, 1, 25);
        assert_eq!(policy.select(&mut procs, 30, None), Some(0));
        assert_eq!(policy.select(&mut procs, 34, None), Some(1));
    }

    #[test]
    fn keeps_the_running_process() {
        let mut procs = vec![state("P1", 0, 4), state("P2", 0, 1)];
        let mut policy = Hrrn::new();
        policy.on_arrival(&mut procs, 1, 0);
        assert_eq!(policy.select(&mut procs, 2, Some(0)), Some(0));
    }
}
