#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for pkgverify
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/pkgverify/config.toml)
//! - Environment variables
//!
//! CLI flags are applied last by the binary.

pub mod constants;

use pkgv_errors::{ConfigError, Error};
use pkgv_types::{ColorChoice, OutputFormat, StatErrorPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub verify: VerifyConfig,

    #[serde(default)]
    pub pacman: PacmanConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    #[serde(default = "default_color_choice")]
    pub color: ColorChoice,
}

/// Verification run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// Alternate root prefixed to every manifest path
    #[serde(default)]
    pub root: Option<PathBuf>,
    #[serde(default)]
    pub ignore_dir_mtime: bool,
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize, // 0 = number of CPUs
    #[serde(default)]
    pub stat_errors: StatErrorPolicy,
}

/// Host package manager configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacmanConfig {
    #[serde(default = "default_pacman_binary")]
    pub binary: PathBuf,
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

// Default implementations

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: OutputFormat::Tty,
            color: ColorChoice::Auto,
        }
    }
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            root: None,
            ignore_dir_mtime: false,
            max_concurrency: constants::DEFAULT_MAX_CONCURRENCY,
            stat_errors: StatErrorPolicy::Abort,
        }
    }
}

impl Default for PacmanConfig {
    fn default() -> Self {
        Self {
            binary: default_pacman_binary(),
            db_path: default_db_path(),
        }
    }
}

// Default value functions for serde
fn default_output_format() -> OutputFormat {
    OutputFormat::Tty
}

fn default_color_choice() -> ColorChoice {
    ColorChoice::Auto
}

fn default_max_concurrency() -> usize {
    constants::DEFAULT_MAX_CONCURRENCY
}

fn default_pacman_binary() -> PathBuf {
    PathBuf::from(constants::PACMAN_BINARY)
}

fn default_db_path() -> PathBuf {
    PathBuf::from(constants::PACMAN_DB_PATH)
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir
            .join(constants::CONFIG_DIR_NAME)
            .join(constants::CONFIG_FILE_NAME))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // PKGVERIFY_OUTPUT
        if let Ok(output) = std::env::var("PKGVERIFY_OUTPUT") {
            self.general.default_output = match output.as_str() {
                "plain" => OutputFormat::Plain,
                "tty" => OutputFormat::Tty,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "PKGVERIFY_OUTPUT".to_string(),
                        value: output,
                    }
                    .into())
                }
            };
        }

        // PKGVERIFY_COLOR
        if let Ok(color) = std::env::var("PKGVERIFY_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "PKGVERIFY_COLOR".to_string(),
                        value: color,
                    }
                    .into())
                }
            };
        }

        // PKGVERIFY_ROOT
        if let Ok(root) = std::env::var("PKGVERIFY_ROOT") {
            self.verify.root = if root.is_empty() {
                None
            } else {
                Some(PathBuf::from(root))
            };
        }

        // PKGVERIFY_JOBS
        if let Ok(jobs) = std::env::var("PKGVERIFY_JOBS") {
            self.verify.max_concurrency = jobs.parse().map_err(|_| ConfigError::InvalidValue {
                field: "PKGVERIFY_JOBS".to_string(),
                value: jobs,
            })?;
        }

        // PKGVERIFY_IGNORE_DIR_MTIME
        if let Ok(ignore) = std::env::var("PKGVERIFY_IGNORE_DIR_MTIME") {
            self.verify.ignore_dir_mtime = match ignore.as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "PKGVERIFY_IGNORE_DIR_MTIME".to_string(),
                        value: ignore,
                    }
                    .into())
                }
            };
        }

        Ok(())
    }

    /// Number of entries verified concurrently
    #[must_use]
    pub fn verify_concurrency(&self) -> usize {
        calculate_concurrency(self.verify.max_concurrency)
    }
}

/// Resolve a configured concurrency, 0 meaning one worker per CPU
#[must_use]
pub fn calculate_concurrency(config_value: usize) -> usize {
    if config_value > 0 {
        config_value
    } else {
        num_cpus::get().max(1)
    }
}
