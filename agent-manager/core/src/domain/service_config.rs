// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Service Configuration Types
//
// Kubernetes-style configuration manifest for the agent manager service:
// - HTTP listener (host/port)
// - Optional PostgreSQL persistence (in-memory repositories when absent)
// - Log level
//
// Loaded from YAML with discovery and environment overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::repository::{PostgresConfig, StorageBackend};

pub const CONFIG_API_VERSION: &str = "agent-manager.dev/v1";
pub const CONFIG_KIND: &str = "ServiceConfig";
pub const CONFIG_PATH_ENV: &str = "AGENT_MANAGER_CONFIG_PATH";

/// Top-level service configuration manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfigManifest {
    /// API version (must be "agent-manager.dev/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "ServiceConfig")
    pub kind: String,

    pub metadata: ConfigMetadata,

    #[serde(default)]
    pub spec: ServiceConfigSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigMetadata {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfigSpec {
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL settings; in-memory storage when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// tracing filter directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_connections() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ServiceConfigManifest {
    fn default() -> Self {
        Self {
            api_version: CONFIG_API_VERSION.to_string(),
            kind: CONFIG_KIND.to_string(),
            metadata: ConfigMetadata {
                name: "agent-manager".to_string(),
            },
            spec: ServiceConfigSpec::default(),
        }
    }
}

impl ServiceConfigManifest {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Discover configuration file using precedence order
    /// 1. AGENT_MANAGER_CONFIG_PATH environment variable
    /// 2. ./agent-manager-config.yaml (working directory)
    /// 3. ~/.agent-manager/config.yaml (user home)
    /// 4. /etc/agent-manager/config.yaml (system, Unix)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./agent-manager-config.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".agent-manager").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        #[cfg(unix)]
        {
            let system_config = PathBuf::from("/etc/agent-manager/config.yaml");
            if system_config.exists() {
                return Some(system_config);
            }
        }

        None
    }

    /// Log level from the config file that `load_or_default` would read.
    ///
    /// Reads without logging so the subscriber can be installed before the
    /// full load. Unreadable or malformed files yield `None`; the full load
    /// reports those.
    pub fn peek_log_level(cli_path: Option<&Path>) -> Option<String> {
        let path = match cli_path {
            Some(path) => path.to_path_buf(),
            None => Self::discover_config()?,
        };
        Self::from_yaml_file(path)
            .ok()
            .map(|config| config.spec.logging.level)
            .filter(|level| !level.is_empty())
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit CLI path must exist and parse
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path)
                .map_err(|e| anyhow::anyhow!("Failed to load config at {:?}: {}", path, e))?;
            config.apply_env_overrides();
            return Ok(config);
        }

        let mut config = if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            Self::from_yaml_file(config_path)?
        } else {
            tracing::warn!("No configuration file found in standard locations. Using defaults.");
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            tracing::info!("Environment override: DATABASE_URL");
            match self.spec.database.as_mut() {
                Some(database) => database.url = url,
                None => {
                    self.spec.database = Some(DatabaseConfig {
                        url,
                        max_connections: default_max_connections(),
                    })
                }
            }
        }

        if let Some(host) = lookup("AGENT_MANAGER_HOST").filter(|v| !v.is_empty()) {
            tracing::info!("Environment override: AGENT_MANAGER_HOST={}", host);
            self.spec.server.host = host;
        }

        if let Some(val) = lookup("AGENT_MANAGER_PORT") {
            match val.parse::<u16>() {
                Ok(port) => {
                    tracing::info!("Environment override: AGENT_MANAGER_PORT={}", port);
                    self.spec.server.port = port;
                }
                Err(_) => {
                    tracing::warn!(
                        "Invalid value for AGENT_MANAGER_PORT: '{}'. Expected a port number. Ignoring.",
                        val
                    );
                }
            }
        }

        if let Some(level) = lookup("AGENT_MANAGER_LOG_LEVEL").filter(|v| !v.is_empty()) {
            tracing::info!("Environment override: AGENT_MANAGER_LOG_LEVEL={}", level);
            self.spec.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != CONFIG_API_VERSION {
            anyhow::bail!(
                "Invalid apiVersion: '{}'. Must be '{}'",
                self.api_version,
                CONFIG_API_VERSION
            );
        }

        if self.kind != CONFIG_KIND {
            anyhow::bail!("Invalid kind: '{}'. Must be '{}'", self.kind, CONFIG_KIND);
        }

        if self.metadata.name.is_empty() {
            anyhow::bail!("metadata.name cannot be empty");
        }

        if self.spec.server.port == 0 {
            anyhow::bail!("spec.server.port cannot be 0");
        }

        if let Some(database) = &self.spec.database {
            if database.url.is_empty() {
                anyhow::bail!("spec.database.url cannot be empty");
            }
            if database.max_connections == 0 {
                anyhow::bail!("spec.database.max_connections must be at least 1");
            }
        }

        Ok(())
    }

    /// Storage backend implied by the database section
    pub fn storage_backend(&self) -> StorageBackend {
        match &self.spec.database {
            Some(database) => StorageBackend::PostgreSQL(PostgresConfig {
                connection_string: database.url.clone(),
                max_connections: database.max_connections,
            }),
            None => StorageBackend::InMemory,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.spec.server.host, self.spec.server.port)
    }
}
