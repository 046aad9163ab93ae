//! Multi-level feedback queue

use crate::config::{MlfqConfig, QueueSpec};
use crate::error::{SimError, SimResult};
use crate::process::{ProcState, Tick};

use super::queue::ReadyQueue;
use super::Policy;

/// Three round-robin levels over an FCFS tail. Every process is admitted
/// at level 0; exhausting the level quantum with work remaining demotes it
/// one level. There is no promotion.
///
/// `quantum_left` is reloaded lazily: a value of 0 means the full level
/// quantum is granted at the next selection.
#[derive(Debug)]
pub struct Mlfq {
    levels: [ReadyQueue; 4],
    quanta: [Tick; 3],
}

impl Mlfq {
    pub fn new(config: &MlfqConfig) -> SimResult<Self> {
        if config.quanta.iter().any(|&q| q == 0) {
            return Err(SimError::PolicyConfig(
                "MLFQ levels 0..2 require time_slice > 0".to_string(),
            ));
        }
        let levels = [
            ReadyQueue::new(&QueueSpec::rr(config.quanta[0]))?,
            ReadyQueue::new(&QueueSpec::rr(config.quanta[1]))?,
            ReadyQueue::new(&QueueSpec::rr(config.quanta[2]))?,
            ReadyQueue::new(&QueueSpec::fcfs())?,
        ];
        Ok(Self {
            levels,
            quanta: config.quanta,
        })
    }

    fn pick_highest(&mut self, table: &mut [ProcState], now: Tick) -> Option<usize> {
        for level in 0..4 {
            if !self.levels[level].is_empty() {
                if let Some(slot) = self.levels[level].pick(table, now) {
                    let p = &mut table[slot];
                    p.level = level;
                    if level < 3 && p.quantum_left == 0 {
                        p.quantum_left = self.quanta[level];
                    }
                    return Some(slot);
                }
            }
        }
        None
    }
}

impl Policy for Mlfq {
    fn name(&self) -> &'static str {
        "MLFQ"
    }

    fn on_arrival(&mut self, table: &mut [ProcState], slot: usize, now: Tick) {
        let p = &mut table[slot];
        p.level = 0;
        p.quantum_left = 0;
        self.levels[0].admit(table, slot, now);
    }

    fn put_back(&mut self, table: &mut [ProcState], slot: usize, now: Tick) {
        let level = table[slot].level.min(3);
        self.levels[level].admit(table, slot, now);
    }

    fn select(
        &mut self,
        table: &mut [ProcState],
        now: Tick,
        current: Option<usize>,
    ) -> Option<usize> {
        let Some(cur) = current else {
            return self.pick_highest(table, now);
        };
        // the FCFS tail runs to completion once dispatched
        let cur_level = table[cur].level;
        if cur_level == 3 {
            return Some(cur);
        }
        let higher_ready = (0..cur_level).any(|level| !self.levels[level].is_empty());
        if higher_ready {
            self.levels[cur_level].admit(table, cur, now);
            self.pick_highest(table, now)
        } else {
            Some(cur)
        }
    }

    fn max_continuous_run(&self, table: &[ProcState], slot: usize, _now: Tick) -> Option<Tick> {
        let p = &table[slot];
        if p.level == 3 {
            return Some(p.remaining);
        }
        let budget = if p.quantum_left == 0 {
            self.quanta[p.level]
        } else {
            p.quantum_left
        };
        Some(p.remaining.min(budget))
    }

    fn on_run(&mut self, table: &mut [ProcState], slot: usize, ran_for: Tick, _now: Tick) {
        let level = table[slot].level;
        if level < 3 {
            let p = &mut table[slot];
            if p.quantum_left == 0 {
                p.quantum_left = self.quanta[level];
            }
            p.quantum_left = p.quantum_left.saturating_sub(ran_for);
        }
    }

    fn on_timeslice_expired(&mut self, table: &mut [ProcState], slot: usize, now: Tick) {
        let level = table[slot].level;
        if level == 3 {
            self.levels[3].admit(table, slot, now);
            return;
        }
        if table[slot].quantum_left == 0 {
            let next = (level + 1).min(3);
            table[slot].level = next;
            table[slot].quantum_left = 0;
            self.levels[next].admit(table, slot, now);
        } else {
            self.levels[level].admit(table, slot, now);
        }
    }
}
