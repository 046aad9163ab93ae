//! REST facade for the scheduling simulator
//!
//! Owns everything at the HTTP boundary: request shapes (including the
//! camelCase aliases and legacy payloads older clients send), policy
//! configuration defaulting with warnings, error-to-status mapping, and
//! the axum router. The simulation itself lives in `schedsim-core`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod models;
pub mod rest;
pub mod service;

pub use models::errors::{ApiError, ApiResult};
pub use models::requests::{CompareRequest, ProcessIn, QueueConfig, ScheduleRequest, SchedulerConfig};
pub use models::responses::{CompareResponse, CompareRow, GanttEntry, ScheduleResponse};
pub use rest::{router, serve};
pub use service::{compare_algorithms, execute_schedule};
