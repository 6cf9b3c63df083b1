//! Core module - Configuration, errors, and common types

mod config;
mod error;
mod types;

pub use config::{Config, GeneralConfig, InterestConfig, ResourceNorm, ScoringConfig, StorageConfig};
pub use error::{Error, Result};
pub use types::{DailyRecord, MonthlySummary, Resource, UsageSample};
