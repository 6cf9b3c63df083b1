//! Replay of externally supplied samples

use crate::core::{Error, Result, UsageSample};
use crate::usage::UsageSource;
use std::collections::VecDeque;
use std::path::Path;

/// Yields a fixed list of samples in order, then stops
pub struct ReplaySource {
    samples: VecDeque<UsageSample>,
}

impl ReplaySource {
    pub fn new(samples: Vec<UsageSample>) -> Self {
        Self {
            samples: samples.into(),
        }
    }

    /// Load a JSON array of samples
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let samples: Vec<UsageSample> = serde_json::from_str(content)
            .map_err(|e| Error::Serialization(format!("Failed to parse samples: {}", e)))?;
        Ok(Self::new(samples))
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl UsageSource for ReplaySource {
    fn next_sample(&mut self) -> Option<UsageSample> {
        self.samples.pop_front()
    }

    fn name(&self) -> &str {
        "Replay (supplied samples)"
    }

    fn is_synthetic(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_in_order() {
        let mut source = ReplaySource::from_json_str(
            r#"[
                {"electricity_usage": 1.0, "water_usage": 2.0, "petrol_usage": 3.0},
                {"electricity_usage": 4.0, "water_usage": 5.0, "petrol_usage": 6.0}
            ]"#,
        )
        .unwrap();

        assert_eq!(source.remaining(), 2);
        assert_eq!(source.next_sample().unwrap().electricity_usage, 1.0);
        assert_eq!(source.next_sample().unwrap().electricity_usage, 4.0);
        assert!(source.next_sample().is_none());
    }

    #[test]
    fn test_malformed_json() {
        let result = ReplaySource::from_json_str(r#"[{"electricity_usage": 1.0}]"#);
        assert!(matches!(result, Err(Error::Serialization(_))));
    }
}
