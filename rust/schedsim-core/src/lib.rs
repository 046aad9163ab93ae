//! Deterministic CPU-scheduling simulation core
//!
//! This crate reconstructs the CPU occupancy timeline (the "Gantt chart")
//! for a set of processes under a pluggable scheduling policy and derives
//! per-process and aggregate timing metrics. It provides:
//! - A discrete-event engine driving simulated time forward
//! - Eight classical policies (FCFS, SJF/SPN, SRTF, HRRN, RR, MLQ, MLFQ)
//!   behind a single policy contract
//! - A metrics builder for waiting/turnaround/response/completion times,
//!   CPU utilization, and throughput
//!
//! The core is single-threaded, synchronous, and reentrant: a simulation
//! owns all of its state and two runs over the same input are identical.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod policy;
pub mod process;
pub mod segment;

pub use config::{
    build_policy, Algorithm, MlfqConfig, MlqConfig, PolicySpec, PriorityMapping, QueueDiscipline,
    QueueSpec,
};
pub use engine::simulate;
pub use error::{SimError, SimResult};
pub use metrics::{build_report, Averages, ProcessMetrics, SimulationReport};
pub use policy::Policy;
pub use process::{validate_processes, ProcState, Process, Tick};
pub use segment::{merge_segments, Segment, SegmentLabel};
