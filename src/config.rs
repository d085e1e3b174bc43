//! Service configuration loaded from environment variables.
//!
//! Handlers never read the process environment directly. Everything they
//! need is resolved once at startup into [`Config`] and handed to the router
//! through [`crate::state::AppState`].

use serde::Deserialize;

/// Environment name that turns off stack traces in error responses.
pub const PRODUCTION: &str = "production";

/// Raw environment variables as deserialized by `envy`.
#[derive(Debug, Deserialize)]
struct EnvVars {
    #[serde(default = "default_environment")]
    node_env: String,
    #[serde(default)]
    build_number: Option<String>,
    #[serde(default)]
    deployment_time: Option<String>,
    #[serde(default)]
    git_commit: Option<String>,
    #[serde(default = "default_local")]
    cloud_provider: String,
    #[serde(default = "default_local")]
    region: String,
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_true")]
    ready: bool,
    #[serde(default)]
    expose_error_stack: Option<bool>,
    #[serde(default = "default_log_filter")]
    rust_log: String,
    #[serde(default = "default_log_format")]
    log_format: String,
}

/// Resolved service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment environment name (`NODE_ENV`).
    pub environment: String,
    /// CI build number (`BUILD_NUMBER`).
    pub build_number: Option<String>,
    /// Time of the current deployment (`DEPLOYMENT_TIME`).
    pub deployment_time: Option<String>,
    /// Deployed git commit (`GIT_COMMIT`).
    pub git_commit: Option<String>,
    /// Cloud provider name (`CLOUD_PROVIDER`).
    pub cloud_provider: String,
    /// Cloud region (`REGION`).
    pub region: String,
    /// Listen address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Answer the readiness probe with "ready".
    pub ready: bool,
    /// Include `error.stack` in error responses.
    pub expose_error_stack: bool,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_local() -> String {
    "local".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Empty variables count as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<EnvVars> for Config {
    fn from(vars: EnvVars) -> Self {
        let expose_error_stack = vars
            .expose_error_stack
            .unwrap_or(vars.node_env != PRODUCTION);

        Self {
            environment: vars.node_env,
            build_number: non_empty(vars.build_number),
            deployment_time: non_empty(vars.deployment_time),
            git_commit: non_empty(vars.git_commit),
            cloud_provider: vars.cloud_provider,
            region: vars.region,
            host: vars.host,
            port: vars.port,
            ready: vars.ready,
            expose_error_stack,
            log_filter: vars.rust_log,
            json_logs: vars.log_format.eq_ignore_ascii_case("json"),
        }
    }
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit `(NAME, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, EnvVars>(vars).map(Config::from)
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == PRODUCTION
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::from(EnvVars {
            node_env: default_environment(),
            build_number: None,
            deployment_time: None,
            git_commit: None,
            cloud_provider: default_local(),
            region: default_local(),
            host: default_host(),
            port: default_port(),
            ready: default_true(),
            expose_error_stack: None,
            rust_log: default_log_filter(),
            log_format: default_log_format(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_vars(Vec::new()).unwrap();

        assert_eq!(config.environment, "development");
        assert_eq!(config.cloud_provider, "local");
        assert_eq!(config.region, "local");
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert!(config.ready);
        assert!(config.expose_error_stack);
        assert!(config.git_commit.is_none());
        assert!(!config.json_logs);
    }

    #[test]
    fn reads_deployment_variables() {
        let config = Config::from_vars(vars(&[
            ("NODE_ENV", "staging"),
            ("BUILD_NUMBER", "42"),
            ("GIT_COMMIT", "9f8e7d6"),
            ("CLOUD_PROVIDER", "aws"),
            ("REGION", "eu-west-1"),
            ("PORT", "9090"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.environment, "staging");
        assert_eq!(config.build_number.as_deref(), Some("42"));
        assert_eq!(config.git_commit.as_deref(), Some("9f8e7d6"));
        assert_eq!(config.cloud_provider, "aws");
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.port, 9090);
        assert!(config.json_logs);
    }

    #[test]
    fn production_hides_stack_unless_overridden() {
        let config = Config::from_vars(vars(&[("NODE_ENV", "production")])).unwrap();
        assert!(config.is_production());
        assert!(!config.expose_error_stack);

        let config = Config::from_vars(vars(&[
            ("NODE_ENV", "production"),
            ("EXPOSE_ERROR_STACK", "true"),
        ]))
        .unwrap();
        assert!(config.expose_error_stack);
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = Config::from_vars(vars(&[("GIT_COMMIT", "")])).unwrap();
        assert!(config.git_commit.is_none());
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(Config::from_vars(vars(&[("PORT", "not-a-port")])).is_err());
    }

    #[test]
    fn readiness_flag_can_be_disabled() {
        let config = Config::from_vars(vars(&[("READY", "false")])).unwrap();
        assert!(!config.ready);
    }
}
