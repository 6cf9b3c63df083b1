//! Daily usage recording
//!
//! Provides the ledger of recorded days and the sources that feed it:
//! - Synthetic: seedable random generator for demonstration data
//! - Replay: samples supplied from outside (e.g. a JSON file)

mod generator;
mod replay;

pub use generator::SampleGenerator;
pub use replay::ReplaySource;

use crate::core::{DailyRecord, Resource, Result, ScoringConfig, UsageSample};

/// Trait for daily usage sources
pub trait UsageSource {
    /// Produce the next day's sample, or None when the source is exhausted
    fn next_sample(&mut self) -> Option<UsageSample>;

    /// Name of this usage source
    fn name(&self) -> &str;

    /// Whether samples are synthetic rather than measured
    fn is_synthetic(&self) -> bool;
}

/// Append-only, ordered history of recorded days
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageLedger {
    records: Vec<DailyRecord>,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, record: DailyRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Computes green scores on ingestion and keeps the ledger for one session
pub struct UsageRecorder {
    norms: ScoringConfig,
    ledger: UsageLedger,
}

impl UsageRecorder {
    /// Create a recorder using the given weights and norms.
    ///
    /// Fails with `Error::Config` when the norms would make scores undefined.
    pub fn new(norms: &ScoringConfig) -> Result<Self> {
        norms.validate()?;
        Ok(Self {
            norms: norms.clone(),
            ledger: UsageLedger::new(),
        })
    }

    /// Validate `sample`, score it, and append it to the ledger.
    ///
    /// Invalid samples are rejected before anything is appended.
    pub fn record_day(&mut self, sample: UsageSample) -> Result<DailyRecord> {
        if let Err(e) = sample.validate() {
            log::warn!("Rejected usage sample: {}", e);
            return Err(e);
        }

        let record = DailyRecord {
            sample,
            green_score: self.green_score(&sample),
        };
        self.ledger.push(record);

        log::debug!(
            "Recorded day {} with green score {:.4}",
            self.ledger.len(),
            record.green_score
        );

        Ok(record)
    }

    /// Record every sample a source yields, stopping at the first invalid one
    pub fn record_from(&mut self, source: &mut dyn UsageSource, max_days: usize) -> Result<usize> {
        let mut recorded = 0;
        while recorded < max_days {
            let Some(sample) = source.next_sample() else {
                break;
            };
            self.record_day(sample)?;
            recorded += 1;
        }

        log::info!("Recorded {} day(s) from {}", recorded, source.name());
        Ok(recorded)
    }

    /// Copy of the ledger as recorded so far
    pub fn ledger_snapshot(&self) -> Vec<DailyRecord> {
        self.ledger.records().to_vec()
    }

    pub fn ledger(&self) -> &UsageLedger {
        &self.ledger
    }

    /// Weighted sum of normalized usage. Normalized values are not clamped.
    fn green_score(&self, sample: &UsageSample) -> f64 {
        Resource::ALL
            .iter()
            .map(|&resource| {
                let norm = self.norms.norm(resource);
                (sample.usage(resource) / norm.max_usage) * norm.weight
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;

    fn recorder() -> UsageRecorder {
        UsageRecorder::new(&ScoringConfig::default()).unwrap()
    }

    #[test]
    fn test_green_score_formula() {
        let mut recorder = recorder();
        let record = recorder.record_day(UsageSample::new(37.0, 120.0, 8.5)).unwrap();

        let expected = 0.4 * (37.0 / 100.0) + 0.3 * (120.0 / 500.0) + 0.3 * (8.5 / 50.0);
        assert!((record.green_score - expected).abs() < 1e-9);
        assert_eq!(recorder.ledger().len(), 1);
    }

    #[test]
    fn test_half_usage_scores_half() {
        let mut recorder = recorder();
        let record = recorder.record_day(UsageSample::new(50.0, 250.0, 25.0)).unwrap();
        assert!((record.green_score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_score_above_max_is_not_clamped() {
        let mut recorder = recorder();
        let record = recorder.record_day(UsageSample::new(200.0, 1000.0, 100.0)).unwrap();
        assert!((record.green_score - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_sample_leaves_ledger_unchanged() {
        let mut recorder = recorder();
        recorder.record_day(UsageSample::new(10.0, 10.0, 10.0)).unwrap();

        let result = recorder.record_day(UsageSample::new(-5.0, 10.0, 10.0));
        assert!(matches!(
            result,
            Err(Error::InvalidInput { resource: Resource::Electricity, .. })
        ));

        let result = recorder.record_day(UsageSample::new(1.0, f64::NAN, 1.0));
        assert!(result.is_err());

        assert_eq!(recorder.ledger().len(), 1);
    }

    #[test]
    fn test_snapshot_is_stable_and_ordered() {
        let mut recorder = recorder();
        recorder.record_day(UsageSample::new(10.0, 0.0, 0.0)).unwrap();
        recorder.record_day(UsageSample::new(20.0, 0.0, 0.0)).unwrap();

        let first = recorder.ledger_snapshot();
        let second = recorder.ledger_snapshot();
        assert_eq!(first, second);
        assert_eq!(first[0].sample.electricity_usage, 10.0);
        assert_eq!(first[1].sample.electricity_usage, 20.0);

        recorder.record_day(UsageSample::new(30.0, 0.0, 0.0)).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(recorder.ledger_snapshot().len(), 3);
    }

    #[test]
    fn test_record_from_stops_at_max_days() {
        let mut recorder = recorder();
        let mut source = SampleGenerator::seeded(&ScoringConfig::default(), 11).unwrap();

        let recorded = recorder.record_from(&mut source, 5).unwrap();
        assert_eq!(recorded, 5);
        assert_eq!(recorder.ledger().len(), 5);
    }

    #[test]
    fn test_unusable_norms_rejected() {
        let mut norms = ScoringConfig::default();
        norms.petrol.max_usage = 0.0;
        assert!(matches!(UsageRecorder::new(&norms), Err(Error::Config(_))));

        norms.petrol.max_usage = -50.0;
        assert!(matches!(UsageRecorder::new(&norms), Err(Error::Config(_))));

        let mut norms = ScoringConfig::default();
        norms.water.weight = 0.5;
        assert!(matches!(UsageRecorder::new(&norms), Err(Error::Config(_))));
    }

    #[test]
    fn test_record_from_stops_when_source_exhausted() {
        let mut recorder = recorder();
        let mut source = ReplaySource::new(vec![
            UsageSample::new(1.0, 1.0, 1.0),
            UsageSample::new(2.0, 2.0, 2.0),
        ]);

        let recorded = recorder.record_from(&mut source, 30).unwrap();
        assert_eq!(recorded, 2);
    }
}
