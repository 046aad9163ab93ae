//! Round robin

use std::collections::VecDeque;

use crate::error::{SimError, SimResult};
use crate::process::{ProcState, Tick};

use super::{mark_ready, Policy};

/// FIFO with a fixed quantum. An expired process rejoins the tail, behind
/// any arrivals admitted during its slice.
#[derive(Debug)]
pub struct RoundRobin {
    quantum: Tick,
    queue: VecDeque<usize>,
}

impl RoundRobin {
    pub fn new(quantum: Tick) -> SimResult<Self> {
        if quantum == 0 {
            return Err(SimError::PolicyConfig(
                "time_slice must be > 0 for RR".to_string(),
            ));
        }
        Ok(Self {
            quantum,
            queue: VecDeque::new(),
        })
    }
}

impl Policy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
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
        Some(table[slot].remaining.min(self.quantum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Process;

    fn state(pid: &str, burst: Tick) -> ProcState {
        ProcState::new(&Process {
            pid: pid.to_string(),
            arrival_time: 0,
            burst_time: burst,
            priority: None,
        })
    }

    #[test]
    fn rejects_zero_quantum() {
        assert!(matches!(
            RoundRobin::new(0),
            Err(SimError::PolicyConfig(_))
        ));
    }

    #[test]
    fn caps_runs_at_the_quantum() {
        let procs = vec![state("P1", 10), state("P2", 2)];
        let policy = RoundRobin::new(4).unwrap();
        assert_eq!(policy.max_continuous_run(&procs, 0, 0), Some(4));
        assert_eq!(policy.max_continuous_run(&procs, 1, 0), Some(2));
    }

    #[test]
    fn expired_process_rejoins_behind_new_arrivals() {
        let mut procs = vec![state("P1", 10), state("P2", 2)];
        let mut policy = RoundRobin::new(4).unwrap();
        policy.on_arrival(&mut procs, 0, 0);
        let first = policy.select(&mut procs, 0, None);
        assert_eq!(first, Some(0));
        policy.on_arrival(&mut procs, 1, 2); // arrives mid-slice
        policy.on_timeslice_expired(&mut procs, 0, 4);
        assert_eq!(policy.select(&mut procs, 4, None), Some(1));
        assert_eq!(policy.select(&mut procs, 6, None), Some(0));
    }
}
