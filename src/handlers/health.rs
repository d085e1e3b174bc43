use axum::{extract::State, http::StatusCode, response::Json as ResponseJson};
use chrono::Utc;

use crate::handlers::SERVICE_VERSION;
use crate::models::health::{
    ApiCheck, DatabaseCheck, DetailedHealth, HealthChecks, HealthStatus, HealthSummary,
    ProbeResponse, ResourceCheck,
};
use crate::models::timestamp;
use crate::state::AppState;
use crate::utils::process;

pub async fn health_check(State(state): State<AppState>) -> ResponseJson<HealthSummary> {
    ResponseJson(HealthSummary {
        success: true,
        message: "API is healthy",
        timestamp: timestamp(),
        uptime: state.uptime(),
        environment: state.config.environment.clone(),
        version: SERVICE_VERSION,
    })
}

/// Health report with per-subsystem checks for monitoring dashboards.
///
/// The database check is static; no connection is attempted.
pub async fn detailed_health(State(state): State<AppState>) -> ResponseJson<DetailedHealth> {
    ResponseJson(DetailedHealth {
        success: true,
        timestamp: timestamp(),
        uptime: state.uptime(),
        environment: state.config.environment.clone(),
        version: SERVICE_VERSION,
        checks: HealthChecks {
            api: ApiCheck {
                status: HealthStatus::Healthy,
                response_time: Utc::now().timestamp_millis(),
            },
            database: DatabaseCheck {
                status: HealthStatus::Healthy,
                response_time: "<1ms",
            },
            memory: ResourceCheck {
                usage: process::memory_usage(),
                status: HealthStatus::Healthy,
            },
            cpu: ResourceCheck {
                usage: process::cpu_usage(),
                status: HealthStatus::Healthy,
            },
        },
    })
}

/// Liveness probe: answers as long as the process can serve HTTP.
pub async fn live() -> ResponseJson<ProbeResponse> {
    ResponseJson(ProbeResponse {
        success: true,
        status: HealthStatus::Alive,
        timestamp: timestamp(),
    })
}

/// Readiness probe: 200 when the configured readiness flag is set, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, ResponseJson<ProbeResponse>) {
    let (code, status) = if state.config.ready {
        (StatusCode::OK, HealthStatus::Ready)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, HealthStatus::NotReady)
    };

    (
        code,
        ResponseJson(ProbeResponse {
            success: state.config.ready,
            status,
            timestamp: timestamp(),
        }),
    )
}
