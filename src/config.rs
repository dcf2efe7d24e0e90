//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Published Historical_Wildfires.csv
pub const DEFAULT_DATASET_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMDeveloperSkillsNetwork-DV0101EN-SkillsNetwork/Data%20Files/Historical_Wildfires.csv";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dataset source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// HTTP(S) URL or local path of the CSV
    #[serde(default = "default_source")]
    pub source: String,

    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

fn default_source() -> String {
    DEFAULT_DATASET_URL.to_string()
}

fn default_fetch_timeout() -> u64 {
    30
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Verbose logging
    #[serde(default)]
    pub debug: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
        }
    }
}

impl ServerConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Initial control values of the dashboard
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_region")]
    pub default_region: String,

    #[serde(default = "default_year")]
    pub default_year: i32,
}

fn default_region() -> String {
    "NSW".to_string()
}

fn default_year() -> i32 {
    2005
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_region: default_region(),
            default_year: default_year(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Default config file locations, in lookup order
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("wildfire-dashboard").join("config.toml"));
        }
        paths.push(PathBuf::from("./config.toml"));
        paths
    }

    /// Load from default locations or environment
    ///
    /// Returns the file that was used, if any.
    pub fn load_default() -> Result<(Self, Option<PathBuf>), ConfigError> {
        Self::load_from_candidates(&Self::default_paths())
    }

    /// Load the first existing file among `paths`, or fall back to the
    /// environment when none exists
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_from_candidates(
        paths: &[PathBuf],
    ) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Ok((Self::load_with_env(path)?, Some(path.clone()))),
            None => Ok((Self::from_env(), None)),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a key lookup (environment in production)
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(source) = lookup("WILDFIRE_DATASET") {
            self.dataset.source = source;
        }

        if let Some(host) = lookup("WILDFIRE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("WILDFIRE_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Some(debug) = lookup("WILDFIRE_DEBUG") {
            self.server.debug = parse_flag(&debug);
        }

        if let Some(level) = lookup("WILDFIRE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("WILDFIRE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "" | "false" | "0" | "no" | "off"
    )
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    format!(
        r#"# Wildfire Dashboard Configuration
#
# Environment variables override these settings:
# - WILDFIRE_DATASET
# - WILDFIRE_HOST
# - WILDFIRE_PORT
# - WILDFIRE_DEBUG
# - WILDFIRE_LOG_LEVEL
# - WILDFIRE_LOG_FORMAT

[dataset]
# HTTP(S) URL or local path of the wildfire CSV
source = "{}"

# Timeout for downloading the dataset (seconds)
fetch_timeout_secs = 30

[server]
# Dashboard server host
host = "127.0.0.1"

# Dashboard server port
port = 8050

# Verbose (debug) logging
debug = false

[dashboard]
# Initially selected region (NSW, NT, QL, SA, TA, VI, WA)
default_region = "NSW"

# Initially selected year
default_year = 2005

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#,
        DEFAULT_DATASET_URL
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.dataset.source, DEFAULT_DATASET_URL);
        assert_eq!(config.server.addr(), "127.0.0.1:8050");
        assert!(!config.server.debug);
        assert_eq!(config.dashboard.default_region, "NSW");
        assert_eq!(config.dashboard.default_year, 2005);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.dataset.source, DEFAULT_DATASET_URL);
        assert_eq!(config.server.port, 8050);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
[dataset]
source = "./data/wildfires.csv"

[server]
port = 9000
"#,
        )
        .unwrap();

        assert_eq!(config.dataset.source, "./data/wildfires.csv");
        assert_eq!(config.dataset.fetch_timeout_secs, 30);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::parse("[server]\nport = \"not a port\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nformat = \"json\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.logging.format, "json");

        let err = Config::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_candidates_first_existing_wins() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let first = dir.path().join("first.toml");
        let second = dir.path().join("second.toml");
        std::fs::write(&first, "[dashboard]\ndefault_year = 2011\n").unwrap();
        std::fs::write(&second, "[dashboard]\ndefault_year = 2019\n").unwrap();

        let (config, used) =
            Config::load_from_candidates(&[missing.clone(), first.clone(), second]).unwrap();
        assert_eq!(config.dashboard.default_year, 2011);
        assert_eq!(used, Some(first));

        let (config, used) = Config::load_from_candidates(&[missing]).unwrap();
        assert_eq!(config.dashboard.default_region, "NSW");
        assert_eq!(used, None);
    }

    #[test]
    fn test_malformed_candidate_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = \"oops\"\n").unwrap();

        let err = Config::load_from_candidates(&[path.clone()]).unwrap_err();
        match err {
            ConfigError::Parse { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("WILDFIRE_DATASET", "/tmp/fires.csv"),
            ("WILDFIRE_PORT", "8123"),
            ("WILDFIRE_DEBUG", "true"),
            ("WILDFIRE_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.dataset.source, "/tmp/fires.csv");
        assert_eq!(config.server.port, 8123);
        assert!(config.server.debug);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_port_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "WILDFIRE_PORT").then(|| "abc".to_string()));
        assert_eq!(config.server.port, 8050);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("off"));
        assert!(!parse_flag("No"));
        assert!(!parse_flag(""));
    }
}
