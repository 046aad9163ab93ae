//! Multi-level queue

use crate::config::{MlqConfig, PriorityMapping};
use crate::error::SimResult;
use crate::process::{ProcState, Tick};

use super::queue::ReadyQueue;
use super::Policy;

/// Four fixed-priority queues, each with its own internal discipline. A
/// process's queue is decided once, at admission, from its priority; there
/// is no aging and no movement between queues.
#[derive(Debug)]
pub struct Mlq {
    queues: [ReadyQueue; 4],
    mapping: PriorityMapping,
}

impl Mlq {
    pub fn new(config: &MlqConfig) -> SimResult<Self> {
        let queues = [
            ReadyQueue::new(&config.queues[0])?,
            ReadyQueue::new(&config.queues[1])?,
            ReadyQueue::new(&config.queues[2])?,
            ReadyQueue::new(&config.queues[3])?,
        ];
        Ok(Self {
            queues,
            mapping: config.priority_mapping,
        })
    }

    /// Queue index for a user priority; missing priorities sink to the
    /// bottom queue.
    fn map_priority(&self, priority: Option<i64>) -> usize {
        match priority {
            None => 3,
            Some(p) => {
                let adjusted = match self.mapping {
                    PriorityMapping::ZeroToThree => p,
                    PriorityMapping::OneToFour => p - 1,
                };
                adjusted.clamp(0, 3) as usize
            }
        }
    }

    fn pick_highest(&mut self, table: &mut [ProcState], now: Tick) -> Option<usize> {
        for level in 0..4 {
            if !self.queues[level].is_empty() {
                if let Some(slot) = self.queues[level].pick(table, now) {
                    table[slot].level = level;
                    return Some(slot);
                }
            }
        }
        None
    }
}

impl Policy for Mlq {
    fn name(&self) -> &'static str {
        "MLQ"
    }

    fn on_arrival(&mut self, table: &mut [ProcState], slot: usize, now: Tick) {
        let level = self.map_priority(table[slot].priority);
        table[slot].level = level;
        self.queues[level].admit(table, slot, now);
    }

    fn put_back(&mut self, table: &mut [ProcState], slot: usize, now: Tick) {
        let level = table[slot].level.min(3);
        self.queues[level].admit(table, slot, now);
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
        // the bottom queue is never displaced by its own refills
        let cur_level = table[cur].level;
        if cur_level == 3 {
            return Some(cur);
        }
        let higher_ready = (0..cur_level).any(|level| !self.queues[level].is_empty());
        if higher_ready {
            self.queues[cur_level].admit(table, cur, now);
            self.pick_highest(table, now)
        } else {
            Some(cur)
        }
    }

    fn max_continuous_run(&self, table: &[ProcState], slot: usize, _now: Tick) -> Option<Tick> {
        let p = &table[slot];
        Some(self.queues[p.level].max_run(p))
    }

    fn on_timeslice_expired(&mut self, table: &mut [ProcState], slot: usize, now: Tick) {
        let level = table[slot].level;
        self.queues[level].admit(table, slot, now);
    }
}
