use super::types::ServerConfig;
use std::fs;
use std::path::Path;

const VALID_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
const VALID_FORMATS: [&str; 2] = ["compact", "json"];

impl ServerConfig {
    /// Load configuration from a TOML file, apply environment overrides and validate.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let mut config = Self::from_toml_str(&content)?;

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML text without touching the environment.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))
    }

    /// Defaults plus environment overrides, used when no config file exists.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = ServerConfig::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - SQLSANDBOX_SERVER_HOST: Override server.host
    /// - SQLSANDBOX_SERVER_PORT: Override server.port
    /// - PORT: Override server.port (legacy, prefer SQLSANDBOX_SERVER_PORT)
    /// - SQLSANDBOX_LOG_LEVEL: Override logging.level
    /// - SQLSANDBOX_UI_PATH: Override server.ui_path
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup (the environment in production).
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SQLSANDBOX_SERVER_HOST") {
            self.server.host = host;
        }

        if let Some(port_str) = lookup("SQLSANDBOX_SERVER_PORT") {
            self.server.port = port_str.parse().map_err(|_| {
                anyhow::anyhow!("Invalid SQLSANDBOX_SERVER_PORT value: {}", port_str)
            })?;
        } else if let Some(port_str) = lookup("PORT") {
            // Legacy fallback
            self.server.port = port_str
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid PORT value: {}", port_str))?;
        }

        if let Some(level) = lookup("SQLSANDBOX_LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }

        if let Some(path) = lookup("SQLSANDBOX_UI_PATH") {
            self.server.ui_path = if path.trim().is_empty() { None } else { Some(path) };
        }

        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        if !VALID_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                VALID_LEVELS.join(", ")
            ));
        }

        if !VALID_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                VALID_FORMATS.join(", ")
            ));
        }

        for (target, level) in &self.logging.targets {
            if !VALID_LEVELS.contains(&level.as_str()) {
                return Err(anyhow::anyhow!(
                    "Invalid log level '{}' for target '{}'. Must be one of: {}",
                    level,
                    target,
                    VALID_LEVELS.join(", ")
                ));
            }
        }

        if self.limits.max_body_size == 0 {
            return Err(anyhow::anyhow!("max_body_size cannot be 0"));
        }

        if self.guard.denied_keywords.is_empty() {
            return Err(anyhow::anyhow!("guard.denied_keywords cannot be empty"));
        }

        if self.guard.denied_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(anyhow::anyhow!("guard.denied_keywords cannot contain blank entries"));
        }

        if self.seed.orders > 0 && self.seed.users == 0 {
            return Err(anyhow::anyhow!("seed.orders requires at least one seeded user"));
        }

        if self.seed.orders > 0 && self.seed.products == 0 {
            return Err(anyhow::anyhow!("seed.orders requires at least one seeded product"));
        }

        if self.seed.max_items_per_order == 0 {
            return Err(anyhow::anyhow!("seed.max_items_per_order cannot be 0"));
        }

        Ok(())
    }
}
