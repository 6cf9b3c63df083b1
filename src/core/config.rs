//! Configuration management

use crate::core::{Error, Resource, Result};
use crate::scoring::{DEFAULT_BASE_RATE, DEFAULT_DISCOUNT_RATE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "greenscore-tracker";
const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub interest: InterestConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

        let app_config_dir = config_dir.join(APP_DIR);

        if !app_config_dir.exists() {
            fs::create_dir_all(&app_config_dir)?;
        }

        Ok(app_config_dir.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the scoring pipeline relies on
    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        self.interest.validate()?;
        if self.general.days_in_month == 0 {
            return Err(Error::Config("days_in_month must be at least 1".to_string()));
        }
        self.general.report_start_date()?;
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Number of synthetic days generated per month
    #[serde(default = "default_days_in_month")]
    pub days_in_month: u32,
    /// Fixed seed for sample generation (None = fresh seed every run)
    #[serde(default)]
    pub sample_seed: Option<u64>,
    /// First day of the monthly tracker report (YYYY-MM-DD)
    #[serde(default = "default_report_start")]
    pub report_start: String,
}

fn default_days_in_month() -> u32 { 30 }
fn default_report_start() -> String { "2024-07-01".to_string() }

impl GeneralConfig {
    pub fn report_start_date(&self) -> Result<chrono::NaiveDate> {
        chrono::NaiveDate::parse_from_str(&self.report_start, "%Y-%m-%d")
            .map_err(|e| Error::Config(format!("Invalid report_start '{}': {}", self.report_start, e)))
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            days_in_month: default_days_in_month(),
            sample_seed: None,
            report_start: default_report_start(),
        }
    }
}

/// Weight and normalization ceiling for one resource
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceNorm {
    pub weight: f64,
    /// Usage that normalizes to 1.0; also the upper bound of generated samples
    pub max_usage: f64,
}

/// Green score weights and norms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_electricity")]
    pub electricity: ResourceNorm,
    #[serde(default = "default_water")]
    pub water: ResourceNorm,
    #[serde(default = "default_petrol")]
    pub petrol: ResourceNorm,
}

fn default_electricity() -> ResourceNorm { ResourceNorm { weight: 0.4, max_usage: 100.0 } }
fn default_water() -> ResourceNorm { ResourceNorm { weight: 0.3, max_usage: 500.0 } }
fn default_petrol() -> ResourceNorm { ResourceNorm { weight: 0.3, max_usage: 50.0 } }

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            electricity: default_electricity(),
            water: default_water(),
            petrol: default_petrol(),
        }
    }
}

impl ScoringConfig {
    pub fn norm(&self, resource: Resource) -> &ResourceNorm {
        match resource {
            Resource::Electricity => &self.electricity,
            Resource::Water => &self.water,
            Resource::Petrol => &self.petrol,
        }
    }

    /// Weights must sum to 1.0 and every max usage must be strictly positive
    pub fn validate(&self) -> Result<()> {
        let mut total_weight = 0.0;
        for resource in Resource::ALL {
            let norm = self.norm(resource);
            if !norm.max_usage.is_finite() || norm.max_usage <= 0.0 {
                return Err(Error::Config(format!(
                    "max_usage for {} must be positive, got {}",
                    resource, norm.max_usage
                )));
            }
            if !norm.weight.is_finite() || norm.weight < 0.0 {
                return Err(Error::Config(format!(
                    "weight for {} must be non-negative, got {}",
                    resource, norm.weight
                )));
            }
            total_weight += norm.weight;
        }

        if (total_weight - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(Error::Config(format!(
                "scoring weights must sum to 1.0, got {}",
                total_weight
            )));
        }
        Ok(())
    }
}

/// Interest rate derivation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestConfig {
    /// Rate in percent before any discount
    #[serde(default = "default_base_rate")]
    pub base_rate: f64,
    /// Percentage points removed per unit of green score
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,
}

fn default_base_rate() -> f64 { DEFAULT_BASE_RATE }
fn default_discount_rate() -> f64 { DEFAULT_DISCOUNT_RATE }

impl Default for InterestConfig {
    fn default() -> Self {
        Self {
            base_rate: default_base_rate(),
            discount_rate: default_discount_rate(),
        }
    }
}

impl InterestConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.base_rate.is_finite() || self.base_rate < 0.0 {
            return Err(Error::Config(format!("base_rate must be non-negative, got {}", self.base_rate)));
        }
        if !self.discount_rate.is_finite() || self.discount_rate < 0.0 {
            return Err(Error::Config(format!(
                "discount_rate must be non-negative, got {}",
                self.discount_rate
            )));
        }
        Ok(())
    }
}

/// Credential store location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file for accounts (None = platform data directory)
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolve_database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| Error::Config("Could not determine data directory".to_string()))?;
        Ok(data_dir.join(APP_DIR).join("users.db"))
    }
}
