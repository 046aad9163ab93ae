//! Process records
//!
//! `Process` is the validated input shape; `ProcState` is the mutable
//! runtime record the engine owns for the duration of one simulation.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Simulated clock value. Time advances in whole units.
pub type Tick = u64;

/// A process as submitted to the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Identifier, unique within a run
    pub pid: String,
    /// Time at which the process becomes runnable
    pub arrival_time: Tick,
    /// Total CPU time the process requires
    pub burst_time: Tick,
    /// Policy-dependent priority (MLQ queue mapping)
    #[serde(default)]
    pub priority: Option<i64>,
}

/// Mutable runtime record for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcState {
    pub pid: String,
    pub arrival_time: Tick,
    pub burst_time: Tick,
    pub priority: Option<i64>,
    /// CPU time still owed; reaches zero exactly once
    pub remaining: Tick,
    /// Time of the first CPU grant
    pub first_start: Option<Tick>,
    /// Time `remaining` reached zero
    pub completion_time: Option<Tick>,
    /// Time the process entered the ready set at its current admission
    pub ready_since: Tick,
    /// Queue level (0 highest .. 3 lowest) used by MLQ and MLFQ
    pub level: usize,
    /// Quantum budget left at the current MLFQ level; 0 means "reload on
    /// the next selection at this level"
    pub quantum_left: Tick,
}

impl ProcState {
    /// Create the runtime record for a validated input process.
    pub fn new(process: &Process) -> Self {
        Self {
            pid: process.pid.clone(),
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            priority: process.priority,
            remaining: process.burst_time,
            first_start: None,
            completion_time: None,
            ready_since: process.arrival_time,
            level: 0,
            quantum_left: 0,
        }
    }
}

/// Validate a batch of input processes: non-empty unique pids, positive
/// bursts. Arrival times are non-negative by construction.
pub fn validate_processes(processes: &[Process]) -> SimResult<()> {
    let mut seen = std::collections::HashSet::with_capacity(processes.len());
    for process in processes {
        if process.pid.trim().is_empty() {
            return Err(SimError::Validation(
                "pid must be a non-empty string".to_string(),
            ));
        }
        if !seen.insert(process.pid.as_str()) {
            return Err(SimError::Validation(format!(
                "duplicate pid: {}",
                process.pid
            )));
        }
        if process.burst_time == 0 {
            return Err(SimError::Validation(format!(
                "burst_time must be > 0 for {}",
                process.pid
            )));
        }
    }
    Ok(())
}
