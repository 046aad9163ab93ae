//! Embedded per-level ready queue
//!
//! MLQ queues and MLFQ levels each run their own internal discipline. This
//! is a restricted policy: it admits, picks, and bounds runs, while
//! preemption and level movement stay with the owning policy.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::config::{QueueDiscipline, QueueSpec};
use crate::error::{SimError, SimResult};
use crate::process::{ProcState, Tick};

use super::mark_ready;

/// Min-heap ordering key: `(remaining, arrival_time, pid)` lexicographic.
/// Pids are unique, so the trailing slot never decides an ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct JobKey {
    pub remaining: Tick,
    pub arrival: Tick,
    pub pid: String,
    pub slot: usize,
}

impl JobKey {
    pub fn of(table: &[ProcState], slot: usize) -> Self {
        let p = &table[slot];
        Self {
            remaining: p.remaining,
            arrival: p.arrival_time,
            pid: p.pid.clone(),
            slot,
        }
    }
}

/// Remove and return the candidate with the highest response ratio
/// `(waiting + service) / service`, ties broken by `(arrival_time, pid)`.
pub(crate) fn take_highest_response_ratio(
    ready: &mut Vec<usize>,
    table: &[ProcState],
    now: Tick,
) -> Option<usize> {
    if ready.is_empty() {
        return None;
    }
    let mut best_at = 0usize;
    let mut best_ratio = -1.0f64;
    for (i, &slot) in ready.iter().enumerate() {
        let p = &table[slot];
        let waiting = now.saturating_sub(p.ready_since);
        let service = p.remaining.max(1);
        let ratio = (waiting + service) as f64 / service as f64;
        if ratio > best_ratio {
            best_ratio = ratio;
            best_at = i;
        } else if ratio == best_ratio {
            let candidate = &table[slot];
            let held = &table[ready[best_at]];
            if (candidate.arrival_time, candidate.pid.as_str())
                < (held.arrival_time, held.pid.as_str())
            {
                best_at = i;
            }
        }
    }
    Some(ready.remove(best_at))
}

/// Ready collection running one discipline.
#[derive(Debug)]
pub(crate) enum ReadyQueue {
    Fifo(VecDeque<usize>),
    Shortest(BinaryHeap<Reverse<JobKey>>),
    RoundRobin { fifo: VecDeque<usize>, quantum: Tick },
    ResponseRatio(Vec<usize>),
}

impl ReadyQueue {
    pub fn new(spec: &QueueSpec) -> SimResult<Self> {
        match spec.discipline {
            QueueDiscipline::Fcfs => Ok(ReadyQueue::Fifo(VecDeque::new())),
            QueueDiscipline::Sjf => Ok(ReadyQueue::Shortest(BinaryHeap::new())),
            QueueDiscipline::Hrrn => Ok(ReadyQueue::ResponseRatio(Vec::new())),
            QueueDiscipline::Rr => match spec.quantum {
                Some(quantum) if quantum > 0 => Ok(ReadyQueue::RoundRobin {
                    fifo: VecDeque::new(),
                    quantum,
                }),
                _ => Err(SimError::PolicyConfig(
                    "RR queue requires time_slice > 0".to_string(),
                )),
            },
        }
    }

    pub fn admit(&mut self, table: &mut [ProcState], slot: usize, now: Tick) {
        mark_ready(table, slot, now);
        match self {
            ReadyQueue::Fifo(fifo) | ReadyQueue::RoundRobin { fifo, .. } => fifo.push_back(slot),
            ReadyQueue::Shortest(heap) => heap.push(Reverse(JobKey::of(table, slot))),
            ReadyQueue::ResponseRatio(ready) => ready.push(slot),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ReadyQueue::Fifo(fifo) | ReadyQueue::RoundRobin { fifo, .. } => fifo.is_empty(),
            ReadyQueue::Shortest(heap) => heap.is_empty(),
            ReadyQueue::ResponseRatio(ready) => ready.is_empty(),
        }
    }

    pub fn pick(&mut self, table: &[ProcState], now: Tick) -> Option<usize> {
        match self {
            ReadyQueue::Fifo(fifo) | ReadyQueue::RoundRobin { fifo, .. } => fifo.pop_front(),
            ReadyQueue::Shortest(heap) => heap.pop().map(|Reverse(key)| key.slot),
            ReadyQueue::ResponseRatio(ready) => take_highest_response_ratio(ready, table, now),
        }
    }

    /// Longest continuous run the discipline allows the picked process.
    pub fn max_run(&self, p: &ProcState) -> Tick {
        match self {
            ReadyQueue::RoundRobin { quantum, .. } => p.remaining.min(*quantum),
            _ => p.remaining,
        }
    }
}
