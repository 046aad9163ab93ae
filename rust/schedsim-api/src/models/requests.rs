//! API request models
//!
//! Fields accept both snake_case and the camelCase aliases the legacy
//! frontend sends; normalization happens here so the core only sees
//! resolved values. Numeric fields are parsed signed and range-checked in
//! the service layer so a negative arrival is a validation error, not a
//! type error.

use serde::{Deserialize, Serialize};

/// One process in a scheduling request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessIn {
    /// Process identifier
    #[serde(alias = "id")]
    pub pid: String,
    /// Arrival time (defaults to 0)
    #[serde(default, alias = "arrivalTime")]
    pub arrival_time: i64,
    /// Required CPU time
    #[serde(alias = "burstTime")]
    pub burst_time: i64,
    /// Priority, used by MLQ queue mapping
    #[serde(default, alias = "prio")]
    pub priority: Option<i64>,
}

/// A request to run one scheduling simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Algorithm name, case-insensitive
    pub algorithm: String,
    /// Workload
    pub processes: Vec<ProcessIn>,
    /// Cost charged between runs of distinct processes
    #[serde(default, alias = "contextSwitchTime")]
    pub context_switch_time: i64,
    /// Quantum for RR; base quantum for defaulted MLFQ
    #[serde(default, alias = "timeSlice")]
    pub time_slice: Option<i64>,
    /// Policy-specific configuration (MLQ / MLFQ)
    #[serde(default)]
    pub config: SchedulerConfig,
}

/// Policy-specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// MLQ queues (exactly four expected), or MLFQ levels to derive
    /// quanta from
    #[serde(default)]
    pub queues: Option<Vec<QueueConfig>>,
    /// MLFQ level quanta; the last entry is ignored (level 3 is FCFS)
    #[serde(default, alias = "timeSlices")]
    pub time_slices: Option<Vec<Option<i64>>>,
    /// MLQ priority mapping: `"1-4"` (default) or `"0-3"`
    #[serde(default, alias = "priorityMapping")]
    pub priority_mapping: Option<String>,
}

/// One MLQ queue / MLFQ level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Per-queue discipline; unknown names fall back to FCFS
    #[serde(default, alias = "algo")]
    pub algorithm: Option<String>,
    /// Quantum for RR queues
    #[serde(default, alias = "timeSlice")]
    pub time_slice: Option<i64>,
}

/// A request to compare several algorithms over one workload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareRequest {
    /// Algorithms to run; defaults to all eight
    #[serde(default)]
    pub algorithms: Option<Vec<String>>,
    pub processes: Vec<ProcessIn>,
    #[serde(default, alias = "contextSwitchTime")]
    pub context_switch_time: i64,
    #[serde(default, alias = "timeSlice")]
    pub time_slice: Option<i64>,
    #[serde(default)]
    pub config: SchedulerConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_camel_case_aliases() {
        let request: ScheduleRequest = serde_json::from_str(
            r#"{
                "algorithm": "rr",
                "timeSlice": 4,
                "contextSwitchTime": 1,
                "processes": [
                    {"id": "P1", "arrivalTime": 2, "burstTime": 5, "prio": 1}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(request.time_slice, Some(4));
        assert_eq!(request.context_switch_time, 1);
        assert_eq!(request.processes[0].pid, "P1");
        assert_eq!(request.processes[0].arrival_time, 2);
        assert_eq!(request.processes[0].burst_time, 5);
        assert_eq!(request.processes[0].priority, Some(1));
    }

    #[test]
    fn arrival_time_defaults_to_zero() {
        let process: ProcessIn =
            serde_json::from_str(r#"{"pid": "P1", "burst_time": 3}"#).unwrap();
        assert_eq!(process.arrival_time, 0);
        assert_eq!(process.priority, None);
    }

    #[test]
    fn config_aliases_are_normalized() {
        let config: SchedulerConfig = serde_json::from_str(
            r#"{
                "timeSlices": [2, 4, 8, null],
                "priorityMapping": "0-3",
                "queues": [{"algo": "rr", "timeSlice": 3}]
            }"#,
        )
        .unwrap();
        assert_eq!(config.time_slices, Some(vec![Some(2), Some(4), Some(8), None]));
        assert_eq!(config.priority_mapping.as_deref(), Some("0-3"));
        let queue = &config.queues.unwrap()[0];
        assert_eq!(queue.algorithm.as_deref(), Some("rr"));
        assert_eq!(queue.time_slice, Some(3));
    }
}
