//! Common types used across the application

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tracked resource contributing to the green score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Electricity,
    Water,
    Petrol,
}

impl Resource {
    /// All resources, in scoring order
    pub const ALL: [Resource; 3] = [Resource::Electricity, Resource::Water, Resource::Petrol];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Electricity => "electricity",
            Resource::Water => "water",
            Resource::Petrol => "petrol",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One day's raw usage readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageSample {
    pub electricity_usage: f64,
    pub water_usage: f64,
    pub petrol_usage: f64,
}

impl UsageSample {
    pub fn new(electricity_usage: f64, water_usage: f64, petrol_usage: f64) -> Self {
        Self {
            electricity_usage,
            water_usage,
            petrol_usage,
        }
    }

    /// Usage recorded for a single resource
    pub fn usage(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Electricity => self.electricity_usage,
            Resource::Water => self.water_usage,
            Resource::Petrol => self.petrol_usage,
        }
    }

    /// Reject negative, NaN, or infinite readings
    pub fn validate(&self) -> Result<()> {
        for resource in Resource::ALL {
            let value = self.usage(resource);
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidInput { resource, value });
            }
        }
        Ok(())
    }
}

/// A recorded day: the raw sample and the green score derived from it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub sample: UsageSample,
    /// Weighted normalized usage. Not clamped, so it may exceed 1.0
    pub green_score: f64,
}

/// Monthly figures derived from a ledger snapshot (never persisted)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Mean of the daily green scores, 0.0 when nothing was recorded
    pub average_green_score: f64,
    /// Discounted interest rate in percent, floored at zero
    pub interest_rate: f64,
    /// Number of days the average was taken over
    pub days_recorded: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sample() {
        assert!(UsageSample::new(0.0, 250.0, 49.9).validate().is_ok());
    }

    #[test]
    fn test_negative_sample_names_resource() {
        let err = UsageSample::new(10.0, -1.0, 5.0).validate().unwrap_err();
        match err {
            Error::InvalidInput { resource, value } => {
                assert_eq!(resource, Resource::Water);
                assert_eq!(value, -1.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_finite_sample_rejected() {
        assert!(UsageSample::new(f64::NAN, 0.0, 0.0).validate().is_err());
        assert!(UsageSample::new(0.0, f64::INFINITY, 0.0).validate().is_err());
        assert!(UsageSample::new(0.0, 0.0, f64::NEG_INFINITY).validate().is_err());
    }

    #[test]
    fn test_sample_json_field_names() {
        let sample: UsageSample = serde_json::from_str(
            r#"{"electricity_usage": 50.0, "water_usage": 250.0, "petrol_usage": 25.0}"#,
        )
        .unwrap();
        assert_eq!(sample.usage(Resource::Petrol), 25.0);
    }
}
