pub mod fallback;
pub mod health;
pub mod system;

/// Version reported by the health and deployment documents.
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
