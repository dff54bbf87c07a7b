//! Configuration system
//!
//! Provides layered configuration for the merge tool:
//! - Runtime defaults
//! - Config file loading (optional, `basic` feature)
//! - Environment variable overrides
//! - Validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Merge configuration
    pub merge: MergeConfig,

    /// Output configuration
    pub output: OutputConfig,

    /// Paths configuration
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Entries kept in each top-N ranking
    pub top_n: usize,
    /// Input files the CLI insists on
    pub min_inputs: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub json_pretty: bool,
    pub default_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub log_directory: PathBuf,
}

const LOG_FORMATS: [&str; 2] = ["pretty", "json"];
const LOG_OUTPUTS: [&str; 3] = ["console", "file", "both"];

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "WARN".to_string(),
                format: "pretty".to_string(),
                output: "console".to_string(),
            },
            merge: MergeConfig {
                top_n: 10,
                min_inputs: 2,
            },
            output: OutputConfig {
                json_pretty: true,
                default_path: PathBuf::from("merged-report.json"),
            },
            paths: PathsConfig {
                log_directory: PathBuf::from("logs"),
            },
        }
    }
}

impl Config {
    /// Load configuration from an explicit file or the default locations,
    /// then apply environment overrides and validate.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load_from_default_locations()?,
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    fn load_from_default_locations() -> Result<Self> {
        let config_paths = [
            PathBuf::from("usage-merge.toml"),
            PathBuf::from(".usage-merge.toml"),
            dirs::config_dir()
                .map(|d| d.join("usage-merge").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.is_file() {
                info!(config_file = %path.display(), "Loading configuration from file");
                return Self::load_from_file(path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from TOML file
    #[cfg(feature = "basic")]
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    #[cfg(not(feature = "basic"))]
    pub fn load_from_file(path: &Path) -> Result<Self> {
        anyhow::bail!(
            "Config file {} given but built without the `basic` feature",
            path.display()
        )
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = env::var("LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Ok(val) = env::var("LOG_OUTPUT") {
            self.logging.output = val;
        }

        if let Ok(val) = env::var("USAGE_MERGE_TOP_N") {
            self.merge.top_n = val.parse().context("Invalid USAGE_MERGE_TOP_N")?;
        }
        if let Ok(val) = env::var("USAGE_MERGE_MIN_INPUTS") {
            self.merge.min_inputs = val.parse().context("Invalid USAGE_MERGE_MIN_INPUTS")?;
        }

        if let Ok(val) = env::var("USAGE_MERGE_OUTPUT") {
            self.output.default_path = PathBuf::from(val);
        }
        if let Ok(val) = env::var("USAGE_MERGE_JSON_PRETTY") {
            self.output.json_pretty = val.parse().context("Invalid USAGE_MERGE_JSON_PRETTY")?;
        }

        if let Ok(val) = env::var("USAGE_MERGE_LOG_DIR") {
            self.paths.log_directory = PathBuf::from(val);
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.merge.top_n == 0 {
            return Err(anyhow::anyhow!("Top-N ranking size must be greater than 0"));
        }

        if self.merge.min_inputs == 0 {
            return Err(anyhow::anyhow!("Minimum input count must be at least 1"));
        }

        if self.merge.top_n > 100 {
            warn!(
                top_n = self.merge.top_n,
                "Large ranking size, rankings may be hard to read"
            );
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Log format must be one of {:?}, got {}",
                LOG_FORMATS,
                self.logging.format
            ));
        }

        if !LOG_OUTPUTS.contains(&self.logging.output.as_str()) {
            return Err(anyhow::anyhow!(
                "Log output must be one of {:?}, got {}",
                LOG_OUTPUTS,
                self.logging.output
            ));
        }

        Ok(())
    }

    /// Save current configuration to file
    #[cfg(feature = "basic")]
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        info!(path = %path.display(), "Configuration saved to file");

        Ok(())
    }
}
