//! CPU-scheduling simulator
//!
//! Umbrella crate: re-exports the simulation core and the REST facade.

pub use schedsim_api::{
    compare_algorithms, execute_schedule, router, serve, ApiError, CompareRequest,
    ScheduleRequest, ScheduleResponse,
};
pub use schedsim_core::{
    build_policy, build_report, simulate, Algorithm, PolicySpec, ProcState, Process, SimError,
    SimulationReport,
};
