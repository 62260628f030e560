use super::defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main server configuration
///
/// Every section carries serde defaults, so an empty (or partial) TOML file
/// yields a runnable configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub limits: LimitsSettings,
    #[serde(default)]
    pub guard: GuardSettings,
    #[serde(default)]
    pub seed: SeedSettings,
    #[serde(default)]
    pub security: SecuritySettings,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Directory of static UI assets served at `/` (index.html as the index)
    #[serde(default = "default_ui_path")]
    pub ui_path: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
            ui_path: default_ui_path(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for log files (server.log lands here)
    #[serde(default = "default_logs_path")]
    pub logs_path: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    /// "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Optional per-target log level overrides
    /// [logging.targets]
    /// rusqlite = "debug"
    #[serde(default)]
    pub targets: HashMap<String, String>,
    /// Third-party targets capped at `warn` unless `targets` names them
    #[serde(default = "default_quiet_targets")]
    pub quiet_targets: Vec<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            logs_path: default_logs_path(),
            log_to_console: true,
            format: default_log_format(),
            targets: HashMap::new(),
            quiet_targets: default_quiet_targets(),
        }
    }
}

/// Request and execution limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsSettings {
    /// Maximum accepted JSON body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
    /// Wall-clock bound for a single statement; 0 disables the bound
    #[serde(default = "default_statement_timeout_ms")]
    pub statement_timeout_ms: u64,
}

impl Default for LimitsSettings {
    fn default() -> Self {
        Self {
            max_body_size: default_max_body_size(),
            statement_timeout_ms: default_statement_timeout_ms(),
        }
    }
}

/// Statement guard settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardSettings {
    /// Keywords (or space-separated keyword phrases) rejected as whole words,
    /// case-insensitively
    #[serde(default = "default_denied_keywords")]
    pub denied_keywords: Vec<String>,
}

impl Default for GuardSettings {
    fn default() -> Self {
        Self {
            denied_keywords: default_denied_keywords(),
        }
    }
}

/// Sample data volumes for the boot-time seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedSettings {
    #[serde(default = "default_seed_users")]
    pub users: u32,
    #[serde(default = "default_seed_products")]
    pub products: u32,
    #[serde(default = "default_seed_employees")]
    pub employees: u32,
    #[serde(default = "default_seed_orders")]
    pub orders: u32,
    #[serde(default = "default_seed_max_items_per_order")]
    pub max_items_per_order: u32,
    /// Fixed RNG seed for reproducible sample data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self {
            users: default_seed_users(),
            products: default_seed_products(),
            employees: default_seed_employees(),
            orders: default_seed_orders(),
            max_items_per_order: default_seed_max_items_per_order(),
            rng_seed: None,
        }
    }
}

/// Security settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecuritySettings {
    #[serde(default)]
    pub cors: CorsSettings,
}

/// CORS configuration that maps directly to actix-cors options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins. Use ["*"] (or leave empty) for any origin.
    #[serde(default = "default_cors_origins")]
    pub allowed_origins: Vec<String>,

    /// Preflight cache max age in seconds. Default: 3600 (1 hour)
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: default_cors_origins(),
            max_age: default_cors_max_age(),
        }
    }
}
