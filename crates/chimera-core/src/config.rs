//! Run configuration
//!
//! Read once from `config.ini` before a run can start:
//!
//! ```ini
//! [CoreParameters]
//! max_iterations = 500
//! complexity_factor = 1000
//! ; optional
//! iteration_delay_ms = 50
//! phase_delay_ms = 1000
//! ; required | optional | disabled
//! model = optional
//!
//! [StabilityThresholds]
//! coherence_min = 0.4
//! volatility_max = 0.9
//!
//! [Interface]
//! update_rate_ms = 100
//! ```

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Failure;

/// Error types for configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// How the model blob participates in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModelMode {
    /// Missing model ends the run
    Required,
    /// Missing model is tolerated; windows are empty
    #[default]
    Optional,
    /// Model is never read
    Disabled,
}

/// `[CoreParameters]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreParameters {
    pub max_iterations: u32,
    pub complexity_factor: u32,
    #[serde(default = "default_iteration_delay_ms")]
    pub iteration_delay_ms: u64,
    #[serde(default = "default_phase_delay_ms")]
    pub phase_delay_ms: u64,
    #[serde(default)]
    pub model: ModelMode,
}

fn default_iteration_delay_ms() -> u64 {
    50
}

fn default_phase_delay_ms() -> u64 {
    1000
}

/// `[StabilityThresholds]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StabilityThresholds {
    pub coherence_min: f64,
    pub volatility_max: f64,
}

impl StabilityThresholds {
    /// First breached threshold, coherence checked before volatility
    pub fn check(&self, coherence: f64, volatility: f64) -> Option<Failure> {
        if coherence < self.coherence_min {
            Some(Failure::CoherenceCollapse)
        } else if volatility > self.volatility_max {
            Some(Failure::VolatilityExceeded)
        } else {
            None
        }
    }

    pub fn is_volatility_critical(&self, volatility: f64) -> bool {
        volatility > self.volatility_max
    }
}

/// `[Interface]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InterfaceSettings {
    pub update_rate_ms: u64,
}

impl InterfaceSettings {
    pub fn update_rate(&self) -> Duration {
        Duration::from_millis(self.update_rate_ms)
    }
}

/// Full run configuration, immutable once loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChimeraConfig {
    #[serde(rename = "CoreParameters", alias = "coreparameters")]
    pub core: CoreParameters,
    #[serde(rename = "StabilityThresholds", alias = "stabilitythresholds")]
    pub thresholds: StabilityThresholds,
    #[serde(rename = "Interface", alias = "interface")]
    pub interface: InterfaceSettings,
}

impl Default for ChimeraConfig {
    fn default() -> Self {
        Self {
            core: CoreParameters {
                max_iterations: 500,
                complexity_factor: 1000,
                iteration_delay_ms: default_iteration_delay_ms(),
                phase_delay_ms: default_phase_delay_ms(),
                model: ModelMode::Optional,
            },
            thresholds: StabilityThresholds {
                coherence_min: 0.4,
                volatility_max: 0.9,
            },
            interface: InterfaceSettings {
                update_rate_ms: 100,
            },
        }
    }
}

impl ChimeraConfig {
    /// Load and validate an INI file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::Missing(path.to_path_buf()));
        }
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Ini))
            .build()?;
        Self::finish(settings)
    }

    /// Parse and validate INI text
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(text, FileFormat::Ini))
            .build()?;
        Self::finish(settings)
    }

    fn finish(settings: Config) -> Result<Self, ConfigError> {
        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values a run cannot operate with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interface.update_rate_ms == 0 {
            return Err(ConfigError::Invalid(
                "Interface.update_rate_ms must be at least 1".to_string(),
            ));
        }
        if !self.thresholds.coherence_min.is_finite() {
            return Err(ConfigError::Invalid(
                "StabilityThresholds.coherence_min must be finite".to_string(),
            ));
        }
        if !self.thresholds.volatility_max.is_finite() {
            return Err(ConfigError::Invalid(
                "StabilityThresholds.volatility_max must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
