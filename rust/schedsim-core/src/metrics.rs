//! Timing metrics derived from a completed run
//!
//! Post-processes the segment timeline and process end-states into
//! per-process and aggregate metrics. Context-switch intervals count as
//! busy time: they are charged against CPU utilization.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::process::{ProcState, Tick};
use crate::segment::{Segment, SegmentLabel};

/// Per-process timing metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    pub pid: String,
    pub waiting_time: Tick,
    pub turnaround_time: Tick,
    pub response_time: Tick,
    pub completion_time: Tick,
}

/// Arithmetic means over all processes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    pub avg_response_time: f64,
}

/// Full outcome of one simulation: the merged timeline plus everything
/// derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub segments: Vec<Segment>,
    pub metrics: Vec<ProcessMetrics>,
    pub averages: Averages,
    pub cpu_utilization: Option<f64>,
    pub throughput: Option<f64>,
}

/// Build the report for a finished run. Metrics are returned in table
/// order. Fails with [`SimError::Incomplete`] if any process never
/// completed.
pub fn build_report(table: &[ProcState], segments: Vec<Segment>) -> SimResult<SimulationReport> {
    let mut metrics = Vec::with_capacity(table.len());
    for p in table {
        let (Some(completion), Some(first_start)) = (p.completion_time, p.first_start) else {
            return Err(SimError::Incomplete(p.pid.clone()));
        };
        let turnaround = completion - p.arrival_time;
        metrics.push(ProcessMetrics {
            pid: p.pid.clone(),
            waiting_time: turnaround - p.burst_time,
            turnaround_time: turnaround,
            response_time: first_start - p.arrival_time,
            completion_time: completion,
        });
    }

    let divisor = metrics.len().max(1) as f64;
    let averages = Averages {
        avg_waiting_time: metrics.iter().map(|m| m.waiting_time as f64).sum::<f64>() / divisor,
        avg_turnaround_time: metrics
            .iter()
            .map(|m| m.turnaround_time as f64)
            .sum::<f64>()
            / divisor,
        avg_response_time: metrics.iter().map(|m| m.response_time as f64).sum::<f64>() / divisor,
    };

    let (cpu_utilization, throughput) = system_metrics(table, &segments);

    Ok(SimulationReport {
        segments,
        metrics,
        averages,
        cpu_utilization,
        throughput,
    })
}

fn system_metrics(table: &[ProcState], segments: &[Segment]) -> (Option<f64>, Option<f64>) {
    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        return (None, None);
    };
    let total = last.end - first.start;
    if total == 0 {
        return (None, None);
    }
    let idle: Tick = segments
        .iter()
        .filter(|s| s.label.is_idle())
        .map(Segment::duration)
        .sum();
    let utilization = (total - idle) as f64 / total as f64;

    let first_arrival = table.iter().map(|p| p.arrival_time).min().unwrap_or(0);
    let last_completion = table
        .iter()
        .filter_map(|p| p.completion_time)
        .max()
        .unwrap_or(0);
    let makespan = last_completion.saturating_sub(first_arrival);
    let throughput = if makespan > 0 {
        Some(table.len() as f64 / makespan as f64)
    } else {
        None
    };
    (Some(utilization), throughput)
}
