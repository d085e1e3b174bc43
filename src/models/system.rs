use serde::Serialize;

use crate::utils::process::{CpuUsage, MemoryUsage};

// ---- /system/status ----

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub services: ServiceMap,
    pub infrastructure: InfrastructureStatus,
    pub metrics: TrafficSummary,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ServiceMap {
    pub frontend: ServiceStatus,
    pub backend: ServiceStatus,
    pub database: ServiceStatus,
}

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub status: &'static str,
    pub port: u16,
    pub health: &'static str,
    pub uptime: &'static str,
}

#[derive(Debug, Serialize)]
pub struct InfrastructureStatus {
    pub kubernetes: KubernetesStatus,
    pub docker: DockerStatus,
}

#[derive(Debug, Serialize)]
pub struct KubernetesStatus {
    pub status: &'static str,
    pub nodes: u32,
    pub pods: u32,
    pub services: u32,
}

#[derive(Debug, Serialize)]
pub struct DockerStatus {
    pub status: &'static str,
    pub containers: u32,
    pub images: u32,
}

#[derive(Debug, Serialize)]
pub struct TrafficSummary {
    pub requests_per_minute: u32,
    pub avg_response_time: &'static str,
    pub error_rate: &'static str,
    pub cpu_usage: &'static str,
    pub memory_usage: &'static str,
}

// ---- /system/deployment ----

#[derive(Debug, Serialize)]
pub struct DeploymentInfo {
    pub current_version: &'static str,
    pub build_number: String,
    pub deployment_time: String,
    pub git_commit: String,
    pub environment: String,
    pub infrastructure: DeploymentTarget,
    pub containers: ContainerImages,
}

#[derive(Debug, Serialize)]
pub struct DeploymentTarget {
    pub platform: &'static str,
    pub cloud_provider: String,
    pub region: String,
}

#[derive(Debug, Serialize)]
pub struct ContainerImages {
    pub frontend: &'static str,
    pub backend: &'static str,
    pub database: &'static str,
}

// ---- /system/metrics ----

#[derive(Debug, Serialize)]
pub struct ResourceMetrics {
    pub system: ProcessMetrics,
    pub application: ApplicationMetrics,
    pub infrastructure: ClusterMetrics,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ProcessMetrics {
    pub uptime: f64,
    pub memory: Option<MemoryUsage>,
    pub cpu: Option<CpuUsage>,
    pub platform: &'static str,
    pub arch: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ApplicationMetrics {
    pub requests_total: u64,
    pub requests_per_second: f64,
    pub response_time_avg: u32,
    pub error_rate: f64,
    pub active_connections: u32,
}

#[derive(Debug, Serialize)]
pub struct ClusterMetrics {
    pub pods_running: u32,
    pub pods_pending: u32,
    pub pods_failed: u32,
    pub nodes_ready: u32,
    pub cluster_cpu_usage: &'static str,
    pub cluster_memory_usage: &'static str,
}

// ---- /system/pipeline ----

#[derive(Debug, Serialize)]
pub struct PipelineStatus {
    pub last_deployment: LastDeployment,
    pub current_pipeline: CurrentPipeline,
    pub stages: PipelineStages,
    pub next_deployment: NextDeployment,
}

#[derive(Debug, Serialize)]
pub struct LastDeployment {
    pub status: &'static str,
    pub timestamp: &'static str,
    pub duration: &'static str,
    pub commit: String,
    pub branch: &'static str,
    pub trigger: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CurrentPipeline {
    pub status: &'static str,
    pub stage: &'static str,
    pub progress: u8,
}

/// Stages in execution order; serialized in field order.
#[derive(Debug, Serialize)]
pub struct PipelineStages {
    pub test: StageResult,
    pub build: StageResult,
    pub security_scan: StageResult,
    pub deploy: StageResult,
}

#[derive(Debug, Serialize)]
pub struct StageResult {
    pub status: &'static str,
    pub duration: &'static str,
}

#[derive(Debug, Serialize)]
pub struct NextDeployment {
    pub scheduled: bool,
    pub auto_deploy: bool,
    pub branch_protection: bool,
}
