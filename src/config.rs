use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::VitalRsError;
use crate::logging::LogConfig;
use crate::pmc::PmcConfig;
use crate::risk::RiskConfig;
use crate::workload::WorkloadConfig;

/// Main application configuration
///
/// Every section is optional in the TOML file; missing sections take their
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// ACWR/TSB window sizes
    pub workload: WorkloadConfig,

    /// Performance model time constants
    pub pmc: PmcConfig,

    /// Clinical alert thresholds
    pub risk: RiskConfig,

    /// Logging setup for the command-line tool
    pub logging: LogConfig,
}

impl AppConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        config.validate()?;
        debug!(path = %path.as_ref().display(), "Loaded configuration");

        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vitalrs")
            .join("config.toml")
    }

    /// Load `path` (or the default location), falling back to defaults
    ///
    /// A missing file is not a problem. A file that exists but cannot be
    /// used is returned alongside the defaults so the caller can report it
    /// once logging is set up, since the log level itself comes from here.
    pub fn load_or_default(path: Option<&Path>) -> (Self, Option<anyhow::Error>) {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return (Self::default(), None);
        }

        match Self::load_from_file(&config_path) {
            Ok(config) => (config, None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    /// Reject window sizes and time constants the calculators cannot use
    pub fn validate(&self) -> std::result::Result<(), VitalRsError> {
        let workload = &self.workload;
        if workload.acute_window == 0 || workload.chronic_window == 0 {
            return Err(VitalRsError::Configuration(
                "workload windows must be at least one session".to_string(),
            ));
        }
        if workload.acute_window > workload.chronic_window {
            return Err(VitalRsError::Configuration(format!(
                "acute window ({}) cannot exceed chronic window ({})",
                workload.acute_window, workload.chronic_window
            )));
        }
        if self.pmc.atl_time_constant == 0 || self.pmc.ctl_time_constant == 0 {
            return Err(VitalRsError::Configuration(
                "performance model time constants must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
