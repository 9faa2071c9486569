//! Dataset ingestion
//!
//! This module normalizes heterogeneous raw values into observations:
//! - Numbers and numeric strings are parsed to floats
//! - Values rejected by the ingest policy are dropped
//! - Each retained value gets its absolute magnitude and leading digit

use crate::config::IngestPolicy;
use crate::digit::DigitExtractor;
use crate::types::{Observation, RawValue};
use log::debug;

/// Ingestor for turning raw values into observations
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetIngestor {
    policy: IngestPolicy,
}

impl DatasetIngestor {
    pub fn new(policy: IngestPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> IngestPolicy {
        self.policy
    }

    /// Normalize raw values with the default positive-only policy
    pub fn normalize(raw_values: &[RawValue]) -> Vec<Observation> {
        Self::default().normalize_with_stats(raw_values).0
    }

    /// Normalize raw values and report how many were dropped.
    ///
    /// Output order matches input order with drops removed.
    pub fn normalize_with_stats(&self, raw_values: &[RawValue]) -> (Vec<Observation>, usize) {
        let mut observations = Vec::with_capacity(raw_values.len());
        let mut dropped = 0;

        for (index, raw) in raw_values.iter().enumerate() {
            match self.observe(raw) {
                Some(observation) => observations.push(observation),
                None => {
                    debug!("dropping value at index {index}: {raw}");
                    dropped += 1;
                }
            }
        }

        (observations, dropped)
    }

    /// Build a single observation, or `None` if the policy drops the value
    pub fn observe(&self, raw: &RawValue) -> Option<Observation> {
        let value = raw.as_f64().filter(|v| v.is_finite())?;

        let keep = match self.policy {
            IngestPolicy::PositiveOnly => value > 0.0,
            IngestPolicy::Absolute => true,
        };
        if !keep {
            return None;
        }

        let processed = value.abs();
        // Finite by construction, so extraction cannot fail here.
        let first_digit = DigitExtractor::first_digit(processed).ok()?;

        Some(Observation {
            raw: raw.clone(),
            processed,
            first_digit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(values: &[&str]) -> Vec<RawValue> {
        values.iter().map(|v| RawValue::from(*v)).collect()
    }

    #[test]
    fn test_normalize_numbers_and_strings() {
        let input = vec![
            RawValue::from(1234.0),
            RawValue::from("0.0456"),
            RawValue::from(" 98.6 "),
        ];
        let observations = DatasetIngestor::normalize(&input);

        assert_eq!(observations.len(), 3);
        assert_eq!(observations[0].first_digit, 1);
        assert_eq!(observations[0].processed, 1234.0);
        assert_eq!(observations[1].first_digit, 4);
        assert_eq!(observations[1].raw, RawValue::from("0.0456"));
        assert_eq!(observations[2].first_digit, 9);
    }

    #[test]
    fn test_positive_only_drops_invalid() {
        let input = raw(&["42", "abc", "0", "-17", "", "NaN", "inf", "7.5"]);
        let ingestor = DatasetIngestor::default();
        let (observations, dropped) = ingestor.normalize_with_stats(&input);

        let digits: Vec<u8> = observations.iter().map(|o| o.first_digit).collect();
        assert_eq!(digits, vec![4, 7]);
        assert_eq!(dropped, 6);
    }

    #[test]
    fn test_absolute_policy_keeps_negatives_and_zero() {
        let input = raw(&["-17", "0", "abc", "250"]);
        let ingestor = DatasetIngestor::new(IngestPolicy::Absolute);
        let (observations, dropped) = ingestor.normalize_with_stats(&input);

        assert_eq!(dropped, 1);
        assert_eq!(observations.len(), 3);
        assert_eq!(observations[0].processed, 17.0);
        assert_eq!(observations[0].first_digit, 1);
        assert_eq!(observations[1].first_digit, 0);
        assert_eq!(observations[2].first_digit, 2);
    }

    #[test]
    fn test_small_decimal_strings() {
        let input = raw(&["0.0003", "0.0006", "0.000000000001"]);
        let ingestor = DatasetIngestor::new(IngestPolicy::PositiveOnly);
        assert_eq!(ingestor.policy(), IngestPolicy::PositiveOnly);

        let digits: Vec<u8> = ingestor
            .normalize_with_stats(&input)
            .0
            .iter()
            .map(|o| o.first_digit)
            .collect();
        assert_eq!(digits, vec![3, 6, 1]);
    }

    #[test]
    fn test_order_preserved() {
        let input = raw(&["900", "-1", "80", "7"]);
        let observations = DatasetIngestor::normalize(&input);
        let processed: Vec<f64> = observations.iter().map(|o| o.processed).collect();
        assert_eq!(processed, vec![900.0, 80.0, 7.0]);
    }

    #[test]
    fn test_non_finite_number_dropped() {
        let input = vec![RawValue::Number(f64::NAN), RawValue::Number(f64::INFINITY)];
        let ingestor = DatasetIngestor::new(IngestPolicy::Absolute);
        let (observations, dropped) = ingestor.normalize_with_stats(&input);
        assert!(observations.is_empty());
        assert_eq!(dropped, 2);
    }
}
