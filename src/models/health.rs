use serde::Serialize;

use crate::utils::process::{CpuUsage, MemoryUsage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    #[serde(rename = "healthy")]
    Healthy,
    #[serde(rename = "alive")]
    Alive,
    #[serde(rename = "ready")]
    Ready,
    #[serde(rename = "not ready")]
    NotReady,
}

#[derive(Debug, Serialize)]
pub struct HealthSummary {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: String,
    pub uptime: f64,
    pub environment: String,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DetailedHealth {
    pub success: bool,
    pub timestamp: String,
    pub uptime: f64,
    pub environment: String,
    pub version: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub api: ApiCheck,
    pub database: DatabaseCheck,
    pub memory: ResourceCheck<MemoryUsage>,
    pub cpu: ResourceCheck<CpuUsage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCheck {
    pub status: HealthStatus,
    /// Epoch milliseconds at which the check ran.
    pub response_time: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseCheck {
    pub status: HealthStatus,
    pub response_time: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ResourceCheck<T> {
    pub usage: Option<T>,
    pub status: HealthStatus,
}

/// Body of the liveness and readiness probes.
#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    pub success: bool,
    pub status: HealthStatus,
    pub timestamp: String,
}
