//! Score aggregation and interest rate derivation
//!
//! Reduces a ledger of daily green scores to a monthly average and maps
//! that average to a discounted interest rate:
//! `rate = max(base_rate - score * discount_rate, 0)`

use crate::core::{DailyRecord, InterestConfig, MonthlySummary};

/// Default rate before discount, in percent
pub const DEFAULT_BASE_RATE: f64 = 5.0;
/// Default discount per unit of green score, in percentage points
pub const DEFAULT_DISCOUNT_RATE: f64 = 2.0;

/// Mean green score of `records`, or 0.0 when nothing has been recorded
pub fn monthly_green_score(records: &[DailyRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }

    let total: f64 = records.iter().map(|r| r.green_score).sum();
    total / records.len() as f64
}

/// Linear discount of `base_rate`, floored at zero. No upper clamp.
pub fn interest_rate(green_score: f64, base_rate: f64, discount_rate: f64) -> f64 {
    (base_rate - green_score * discount_rate).max(0.0)
}

/// Aggregator bound to a configured base and discount rate
pub struct ScoreAggregator {
    config: InterestConfig,
}

impl ScoreAggregator {
    /// Create a new aggregator with the given interest configuration
    pub fn new(config: &InterestConfig) -> Self {
        Self { config: *config }
    }

    pub fn monthly_green_score(&self, records: &[DailyRecord]) -> f64 {
        monthly_green_score(records)
    }

    /// Interest rate for `green_score` under the configured rates
    pub fn interest_rate(&self, green_score: f64) -> f64 {
        interest_rate(green_score, self.config.base_rate, self.config.discount_rate)
    }

    /// Compute the monthly summary for a ledger snapshot
    pub fn summarize(&self, records: &[DailyRecord]) -> MonthlySummary {
        let average_green_score = self.monthly_green_score(records);
        MonthlySummary {
            average_green_score,
            interest_rate: self.interest_rate(average_green_score),
            days_recorded: records.len(),
        }
    }
}

impl Default for ScoreAggregator {
    fn default() -> Self {
        Self::new(&InterestConfig::default())
    }
}
