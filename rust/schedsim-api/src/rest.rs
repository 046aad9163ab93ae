//! REST API server
//!
//! `/execute` (alias `/schedule`) runs one simulation, `/compare` runs a
//! workload under several algorithms, and the per-algorithm legacy routes
//! accept the old payload shapes: a full request object (algorithm
//! injected, `quantum` aliased to `time_slice`) or a bare process array
//! whose items may be `[pid, burst, priority?]` tuples.

use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::models::errors::ApiError;
use crate::models::requests::{CompareRequest, ScheduleRequest};
use crate::models::responses::{CompareResponse, ScheduleResponse, WelcomeResponse};
use crate::service;

/// Build the application router.
pub fn router() -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/execute", post(execute))
        .route("/schedule", post(execute))
        .route("/compare", post(compare))
        .route("/fcfs", post(|p| legacy("FCFS", p)))
        .route("/sjf", post(|p| legacy("SJF", p)))
        .route("/spn", post(|p| legacy("SPN", p)))
        .route("/srtf", post(|p| legacy("SRTF", p)))
        .route("/rr", post(|p| legacy("RR", p)))
        .route("/hrrn", post(|p| legacy("HRRN", p)))
        .route("/mlq", post(|p| legacy("MLQ", p)))
        .route("/mlfq", post(|p| legacy("MLFQ", p)))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Bind and serve the API on `addr`.
pub async fn serve(addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "scheduling API listening");
    axum::serve(listener, router()).await
}

async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the CPU Scheduling Algorithms API".to_string(),
    })
}

async fn execute(
    Json(request): Json<ScheduleRequest>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    service::execute_schedule(&request).map(Json)
}

async fn compare(
    Json(request): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, ApiError> {
    service::compare_algorithms(&request).map(Json)
}

async fn legacy(
    algorithm: &'static str,
    Json(payload): Json<Value>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let request = normalize_legacy_payload(algorithm, payload)?;
    service::execute_schedule(&request).map(Json)
}

/// Turn a legacy payload into a full request for `algorithm`.
fn normalize_legacy_payload(
    algorithm: &str,
    payload: Value,
) -> Result<ScheduleRequest, ApiError> {
    let mut object = match payload {
        Value::Object(mut map) => {
            map.entry("algorithm")
                .or_insert_with(|| Value::String(algorithm.to_string()));
            map
        }
        Value::Array(items) => {
            let mut processes = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Object(_) => processes.push(item),
                    Value::Array(parts) if parts.len() >= 2 => {
                        let pid = match &parts[0] {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        };
                        processes.push(json!({
                            "pid": pid,
                            "arrival_time": 0,
                            "burst_time": parts[1],
                            "priority": parts.get(2).cloned().unwrap_or(Value::Null),
                        }));
                    }
                    _ => return Err(ApiError::validation("Invalid process entry")),
                }
            }
            let mut map = serde_json::Map::new();
            map.insert(
                "algorithm".to_string(),
                Value::String(algorithm.to_string()),
            );
            map.insert("processes".to_string(), Value::Array(processes));
            map
        }
        _ => return Err(ApiError::validation("Invalid request payload")),
    };

    // the old RR/MLFQ endpoints said "quantum" instead of "time_slice"
    if matches!(algorithm, "RR" | "MLFQ")
        && !object.contains_key("time_slice")
        && !object.contains_key("timeSlice")
    {
        if let Some(quantum) = object.get("quantum").cloned() {
            object.insert("time_slice".to_string(), quantum);
        }
    }

    serde_json::from_value(Value::Object(object))
        .map_err(|e| ApiError::validation(format!("Invalid request payload: {}", e)))
}
