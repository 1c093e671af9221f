//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Workflow behaviour switches.
    #[serde(default)]
    pub workflow: WorkflowConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Workflow configuration.
///
/// The first three switches decide behaviour the reconciliation screens never
/// pinned down; the defaults enforce the stricter contract.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowConfig {
    /// Refuse to create a reconciliation for transactions that do not match.
    #[serde(default = "default_true")]
    pub require_match: bool,
    /// Mark both linked transactions reconciled when an entry is approved.
    #[serde(default = "default_true")]
    pub reconcile_on_approve: bool,
    /// Allow a checker or admin to approve or reject an entity they created.
    #[serde(default = "default_true")]
    pub allow_self_approval: bool,
    /// Number of recent entries and uploads shown on the dashboard.
    #[serde(default = "default_recent_activity_limit")]
    pub recent_activity_limit: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            require_match: true,
            reconcile_on_approve: true,
            allow_self_approval: true,
            recent_activity_limit: default_recent_activity_limit(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_recent_activity_limit() -> usize {
    5
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Fallback `EnvFilter` directive when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "recon=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("RECON").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
