//! Configuration management for drivesafe
//!
//! Config stored at: ~/.config/drivesafe/config.json

use std::path::{Path, PathBuf};

use drivesafe_domain::model::DEFAULT_NEAR_THRESHOLD_DAYS;
use drivesafe_domain::service::performance_tracker::DEFAULT_ACCELERATION_THRESHOLD_MPS;
use drivesafe_domain::service::ExpirationCalculator;
use drivesafe_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data directory override
    #[serde(default)]
    pub store_dir: Option<PathBuf>,

    /// Days before an obligation at which it is flagged as near
    #[serde(default = "default_near_threshold_days")]
    pub near_threshold_days: i64,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Speed change (m/s) counted as sudden acceleration or braking
    #[serde(default = "default_acceleration_threshold")]
    pub acceleration_threshold_mps: f64,

    /// Default user for route and profile commands
    #[serde(default)]
    pub user_id: Option<String>,
}

fn default_near_threshold_days() -> i64 {
    DEFAULT_NEAR_THRESHOLD_DAYS
}

fn default_acceleration_threshold() -> f64 {
    DEFAULT_ACCELERATION_THRESHOLD_MPS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: None,
            near_threshold_days: default_near_threshold_days(),
            output_format: OutputFormat::default(),
            acceleration_threshold_mps: default_acceleration_threshold(),
            user_id: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("drivesafe");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the data directory holding the stores
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.store_dir {
            return Ok(dir.clone());
        }

        let store_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join("drivesafe");
        Ok(store_dir)
    }

    pub fn calculator(&self) -> ExpirationCalculator {
        ExpirationCalculator::new(self.near_threshold_days)
    }

    /// Load config from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        config
            .validate()
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.near_threshold_days < 0 {
            return Err("near_threshold_days must not be negative".to_string());
        }
        if !(self.acceleration_threshold_mps.is_finite() && self.acceleration_threshold_mps > 0.0) {
            return Err("acceleration_threshold_mps must be positive".to_string());
        }
        Ok(())
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "DriveSafe Configuration")?;
        writeln!(f, "=======================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Store dir:          {}",
            self.store_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Near threshold:     {} days", self.near_threshold_days)?;
        writeln!(f, "Output format:      {}", self.output_format)?;
        writeln!(f, "Accel threshold:    {:.1} m/s", self.acceleration_threshold_mps)?;
        writeln!(
            f,
            "Default user:       {}",
            self.user_id.as_deref().unwrap_or("(none)")
        )?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:        {}", path.display())?;
        }

        Ok(())
    }
}
