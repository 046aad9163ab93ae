//! API response models
//!
//! Responses carry both the structured `metrics`/`averages` shapes and the
//! flat legacy arrays and duplicated average fields older clients still
//! read.

use schedsim_core::{Averages, ProcessMetrics, Segment};
use serde::{Deserialize, Serialize};

/// One slot of the reconstructed CPU timeline. The sentinel `pid` values
/// `IDLE` and `CS` appear literally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttEntry {
    pub start: u64,
    pub end: u64,
    pub pid: String,
}

impl From<&Segment> for GanttEntry {
    fn from(segment: &Segment) -> Self {
        Self {
            start: segment.start,
            end: segment.end,
            pid: segment.label.to_string(),
        }
    }
}

/// Response for one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub algorithm: String,
    pub gantt: Vec<GanttEntry>,
    pub metrics: Vec<ProcessMetrics>,
    pub averages: Averages,

    pub waiting_time: Vec<u64>,
    pub turnaround_time: Vec<u64>,
    pub response_time: Vec<u64>,
    pub completion_time: Vec<u64>,

    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub average_response_time: f64,
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    pub avg_response_time: f64,

    pub cpu_utilization: Option<f64>,
    pub throughput: Option<f64>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// One row of a `/compare` result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareRow {
    pub algorithm: String,
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    pub avg_response_time: f64,
    pub cpu_utilization: Option<f64>,
    pub throughput: Option<f64>,
}

/// Response for `/compare`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareResponse {
    pub results: Vec<CompareRow>,
}

/// Body of the welcome route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}
