//! Request resolution and simulation orchestration
//!
//! Bridges boundary DTOs to the core: validates inputs, resolves policy
//! configuration (with defaulting and warnings), runs the engine, and
//! shapes the response.

use schedsim_core::{
    build_policy, build_report, simulate, validate_processes, Algorithm, MlfqConfig, MlqConfig,
    PolicySpec, PriorityMapping, ProcState, Process, QueueDiscipline, QueueSpec, SimulationReport,
};
use tracing::{info, warn};

use crate::models::errors::{ApiError, ApiResult};
use crate::models::requests::{
    CompareRequest, ProcessIn, QueueConfig, ScheduleRequest, SchedulerConfig,
};
use crate::models::responses::{CompareResponse, CompareRow, GanttEntry, ScheduleResponse};

/// Quantum used for defaulted MLQ round-robin queues when the request
/// carries no usable `time_slice`.
const DEFAULT_MLQ_QUANTUM: u64 = 4;

/// Run one scheduling request end to end.
pub fn execute_schedule(request: &ScheduleRequest) -> ApiResult<ScheduleResponse> {
    let mut warnings = Vec::new();
    let algorithm: Algorithm = request.algorithm.parse().map_err(ApiError::from)?;
    let spec = resolve_policy(algorithm, request.time_slice, &request.config, &mut warnings)?;

    let processes = convert_processes(&request.processes)?;
    validate_processes(&processes).map_err(ApiError::from)?;
    let context_switch_time =
        non_negative(request.context_switch_time, "context_switch_time")?;

    let mut policy = build_policy(&spec).map_err(ApiError::from)?;
    let mut table: Vec<ProcState> = processes.iter().map(ProcState::new).collect();
    let segments = simulate(&mut table, policy.as_mut(), context_switch_time);
    let report = build_report(&table, segments).map_err(ApiError::from)?;

    info!(
        algorithm = algorithm.as_str(),
        processes = table.len(),
        "simulation complete"
    );
    Ok(assemble_response(algorithm, report, warnings))
}

/// Run the workload under several algorithms and summarize each result.
pub fn compare_algorithms(request: &CompareRequest) -> ApiResult<CompareResponse> {
    let names: Vec<String> = match &request.algorithms {
        Some(names) => names.clone(),
        None => Algorithm::ALL
            .iter()
            .map(|a| a.as_str().to_string())
            .collect(),
    };

    let mut results = Vec::with_capacity(names.len());
    for name in names {
        let sub_request = ScheduleRequest {
            algorithm: name,
            processes: request.processes.clone(),
            context_switch_time: request.context_switch_time,
            time_slice: request.time_slice,
            config: request.config.clone(),
        };
        let response = execute_schedule(&sub_request)?;
        results.push(CompareRow {
            algorithm: response.algorithm,
            avg_waiting_time: response.avg_waiting_time,
            avg_turnaround_time: response.avg_turnaround_time,
            avg_response_time: response.avg_response_time,
            cpu_utilization: response.cpu_utilization,
            throughput: response.throughput,
        });
    }
    Ok(CompareResponse { results })
}

fn resolve_policy(
    algorithm: Algorithm,
    time_slice: Option<i64>,
    config: &SchedulerConfig,
    warnings: &mut Vec<String>,
) -> ApiResult<PolicySpec> {
    match algorithm {
        Algorithm::Fcfs => Ok(PolicySpec::Fcfs),
        Algorithm::Sjf | Algorithm::Spn => Ok(PolicySpec::Sjf),
        Algorithm::Srtf => Ok(PolicySpec::Srtf),
        Algorithm::Hrrn => Ok(PolicySpec::Hrrn),
        Algorithm::Rr => {
            let quantum = time_slice
                .ok_or_else(|| ApiError::validation("time_slice is required for RR"))?;
            if quantum <= 0 {
                return Err(ApiError::validation("time_slice must be > 0 for RR"));
            }
            Ok(PolicySpec::Rr {
                quantum: quantum as u64,
            })
        }
        Algorithm::Mlq => resolve_mlq(time_slice, config, warnings),
        Algorithm::Mlfq => resolve_mlfq(time_slice, config, warnings),
    }
}

fn resolve_mlq(
    time_slice: Option<i64>,
    config: &SchedulerConfig,
    warnings: &mut Vec<String>,
) -> ApiResult<PolicySpec> {
    let queues: [QueueSpec; 4] = match config.queues.as_deref() {
        Some(configured) if configured.len() == 4 => [
            queue_spec(&configured[0]),
            queue_spec(&configured[1]),
            queue_spec(&configured[2]),
            queue_spec(&configured[3]),
        ],
        _ => {
            let quantum = default_mlq_quantum(time_slice)?;
            warn!("MLQ queue configuration missing or invalid, using default");
            warnings.push(
                "MLQ config.queues missing/invalid; using default: RR, RR, FCFS, FCFS"
                    .to_string(),
            );
            [
                QueueSpec::rr(quantum),
                QueueSpec::rr(quantum),
                QueueSpec::fcfs(),
                QueueSpec::fcfs(),
            ]
        }
    };
    let priority_mapping = config
        .priority_mapping
        .as_deref()
        .map(PriorityMapping::parse)
        .unwrap_or_default();
    Ok(PolicySpec::Mlq(MlqConfig {
        queues,
        priority_mapping,
    }))
}

fn resolve_mlfq(
    time_slice: Option<i64>,
    config: &SchedulerConfig,
    warnings: &mut Vec<String>,
) -> ApiResult<PolicySpec> {
    let configured: Option<Vec<Option<i64>>> = config.time_slices.clone().or_else(|| {
        config
            .queues
            .as_ref()
            .filter(|queues| queues.len() == 4)
            .map(|queues| queues.iter().map(|q| q.time_slice).collect())
    });

    let slices = match configured {
        Some(slices) if slices.len() == 4 => slices,
        _ => {
            let base = time_slice.ok_or_else(|| {
                ApiError::validation(
                    "time_slice is required for MLFQ (or provide config.time_slices)",
                )
            })?;
            if base <= 0 {
                return Err(ApiError::validation(
                    "MLFQ levels 0..2 require time_slice > 0",
                ));
            }
            warn!("MLFQ time_slices missing or invalid, using default ladder");
            warnings.push(
                "MLFQ config time_slices missing/invalid; using default [ts, 2ts, 4ts, FCFS]"
                    .to_string(),
            );
            vec![Some(base), Some(base * 2), Some(base * 4), None]
        }
    };

    // the fourth entry is ignored: level 3 is always FCFS
    let mut quanta = [0u64; 3];
    for (level, quantum) in quanta.iter_mut().enumerate() {
        *quantum = match slices[level] {
            Some(value) if value > 0 => value as u64,
            _ => {
                return Err(ApiError::validation(
                    "MLFQ levels 0..2 require time_slice > 0",
                ))
            }
        };
    }
    Ok(PolicySpec::Mlfq(MlfqConfig { quanta }))
}

fn queue_spec(config: &QueueConfig) -> QueueSpec {
    let discipline = QueueDiscipline::parse(config.algorithm.as_deref().unwrap_or("FCFS"));
    // non-positive quanta are dropped here; the core rejects an RR queue
    // left without one
    let quantum = config
        .time_slice
        .and_then(|value| u64::try_from(value).ok())
        .filter(|&value| value > 0);
    QueueSpec { discipline, quantum }
}

fn default_mlq_quantum(time_slice: Option<i64>) -> ApiResult<u64> {
    match time_slice {
        None | Some(0) => Ok(DEFAULT_MLQ_QUANTUM),
        Some(value) if value > 0 => Ok(value as u64),
        Some(_) => Err(ApiError::validation("RR queue requires time_slice > 0")),
    }
}

fn convert_processes(processes: &[ProcessIn]) -> ApiResult<Vec<Process>> {
    processes
        .iter()
        .map(|p| {
            if p.arrival_time < 0 {
                return Err(ApiError::validation("arrival_time must be >= 0"));
            }
            if p.burst_time <= 0 {
                return Err(ApiError::validation("burst_time must be > 0"));
            }
            Ok(Process {
                pid: p.pid.clone(),
                arrival_time: p.arrival_time as u64,
                burst_time: p.burst_time as u64,
                priority: p.priority,
            })
        })
        .collect()
}

fn non_negative(value: i64, field: &str) -> ApiResult<u64> {
    u64::try_from(value)
        .map_err(|_| ApiError::validation(format!("{} must be >= 0", field)))
}

fn assemble_response(
    algorithm: Algorithm,
    report: SimulationReport,
    warnings: Vec<String>,
) -> ScheduleResponse {
    let gantt = report.segments.iter().map(GanttEntry::from).collect();
    let waiting_time: Vec<u64> = report.metrics.iter().map(|m| m.waiting_time).collect();
    let turnaround_time: Vec<u64> = report.metrics.iter().map(|m| m.turnaround_time).collect();
    let response_time: Vec<u64> = report.metrics.iter().map(|m| m.response_time).collect();
    let completion_time: Vec<u64> = report.metrics.iter().map(|m| m.completion_time).collect();
    let averages = report.averages;

    ScheduleResponse {
        algorithm: algorithm.as_str().to_string(),
        gantt,
        metrics: report.metrics,
        averages,
        waiting_time,
        turnaround_time,
        response_time,
        completion_time,
        average_waiting_time: averages.avg_waiting_time,
        average_turnaround_time: averages.avg_turnaround_time,
        average_response_time: averages.avg_response_time,
        avg_waiting_time: averages.avg_waiting_time,
        avg_turnaround_time: averages.avg_turnaround_time,
        avg_response_time: averages.avg_response_time,
        cpu_utilization: report.cpu_utilization,
        throughput: report.throughput,
        warnings,
    }
}
