use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::lookup::LookupConfig;
use crate::{DnsClass, RecordType, TransportType};

const LOCAL_CONFIG_PATH: &str = "ferrous-lookup.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-lookup/config.toml";

/// Main configuration structure for Ferrous Lookup
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Lookup defaults (servers, transport, retries, suffix handling)
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-lookup.toml in current directory
    /// 3. /etc/ferrous-lookup/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        let lookup = &mut self.lookup;

        if let Some(record_type) = overrides.record_type {
            lookup.record_type = record_type;
        }
        if let Some(class) = overrides.class {
            lookup.class = class;
        }
        if let Some(servers) = overrides.servers {
            if !servers.is_empty() {
                lookup.use_custom_dns_server = true;
                lookup.custom_dns_servers = servers;
            }
        }
        if let Some(port) = overrides.port {
            lookup.port = port;
        }
        if let Some(transport) = overrides.transport {
            lookup.transport = transport;
        }
        if let Some(recursion) = overrides.recursion {
            lookup.recursion = recursion;
        }
        if let Some(use_cache) = overrides.use_resolver_cache {
            lookup.use_resolver_cache = use_cache;
        }
        if let Some(attempts) = overrides.attempts {
            lookup.attempts = attempts;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            lookup.timeout_ms = timeout_ms;
        }
        if let Some(add_suffix) = overrides.add_dns_suffix {
            lookup.add_dns_suffix = add_suffix;
        }
        if let Some(suffix) = overrides.custom_dns_suffix {
            lookup.add_dns_suffix = true;
            lookup.use_custom_dns_suffix = true;
            lookup.custom_dns_suffix = suffix;
        }
        if let Some(resolve_cname) = overrides.resolve_cname {
            lookup.resolve_cname = resolve_cname;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = json;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lookup = &self.lookup;

        if lookup.attempts == 0 {
            return Err(ConfigError::Validation(
                "attempts must be at least 1".to_string(),
            ));
        }

        if lookup.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "timeout_ms must be greater than 0".to_string(),
            ));
        }

        if lookup.use_custom_dns_server && lookup.port == 0 {
            return Err(ConfigError::Validation(
                "Custom DNS server port cannot be 0".to_string(),
            ));
        }

        if lookup.max_concurrent_queries == 0 {
            return Err(ConfigError::Validation(
                "max_concurrent_queries must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub record_type: Option<RecordType>,
    pub class: Option<DnsClass>,
    pub servers: Option<Vec<String>>,
    pub port: Option<u16>,
    pub transport: Option<TransportType>,
    pub recursion: Option<bool>,
    pub use_resolver_cache: Option<bool>,
    pub attempts: Option<u32>,
    pub timeout_ms: Option<u64>,
    pub add_dns_suffix: Option<bool>,
    pub custom_dns_suffix: Option<String>,
    pub resolve_cname: Option<bool>,
    pub log_level: Option<String>,
    pub log_json: Option<bool>,
}
