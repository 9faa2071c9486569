//! Synthetic datasets
//!
//! Demo value generators for exercising the analysis without a live data
//! source. Nothing in the analysis path calls into this module.

use crate::types::RawValue;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Cumulative Benford probabilities for digits 1-8; digit 9 takes the rest
const BENFORD_CUMULATIVE: [f64; 8] = [0.301, 0.477, 0.602, 0.699, 0.778, 0.845, 0.903, 0.954];

/// Kind of synthetic dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    /// Integers of 1-6 digits whose leading digit follows Benford's Law
    Benford,
    /// Random-walk prices starting at 100, formatted with two decimals
    Prices,
    /// One-decimal magnitudes whose leading digit follows Benford's Law
    Magnitudes,
}

/// Seedable generator for demo datasets
pub struct SyntheticGenerator {
    rng: StdRng,
}

impl SyntheticGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for reproducible output
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn generate(&mut self, kind: DatasetKind, count: usize) -> Vec<RawValue> {
        match kind {
            DatasetKind::Benford => self.benford_values(count),
            DatasetKind::Prices => self.random_walk_prices(count),
            DatasetKind::Magnitudes => self.magnitudes(count),
        }
    }

    pub fn benford_values(&mut self, count: usize) -> Vec<RawValue> {
        (0..count)
            .map(|_| {
                let first_digit = self.benford_digit() as u64;
                let magnitude: u32 = self.rng.gen_range(1..=6);
                let scale = 10u64.pow(magnitude - 1);
                let rest = self.rng.gen_range(0..scale);
                RawValue::Number((first_digit * scale + rest) as f64)
            })
            .collect()
    }

    pub fn random_walk_prices(&mut self, count: usize) -> Vec<RawValue> {
        let mut price = 100.0_f64;
        (0..count)
            .map(|_| {
                let change: f64 = self.rng.gen_range(-0.05..0.05);
                price *= 1.0 + change;
                RawValue::Text(format!("{price:.2}"))
            })
            .collect()
    }

    pub fn magnitudes(&mut self, count: usize) -> Vec<RawValue> {
        (0..count)
            .map(|_| {
                let first_digit = self.benford_digit() as f64;
                let tenth: u8 = self.rng.gen_range(0..10);
                RawValue::Number(first_digit + tenth as f64 / 10.0)
            })
            .collect()
    }

    fn benford_digit(&mut self) -> u8 {
        let roll: f64 = self.rng.gen();
        BENFORD_CUMULATIVE
            .iter()
            .position(|&bound| roll < bound)
            .map(|i| i as u8 + 1)
            .unwrap_or(9)
    }
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digit::DigitExtractor;
    use crate::pipeline::analyze;
    use crate::types::ConformityLevel;

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = SyntheticGenerator::with_seed(7).generate(DatasetKind::Benford, 50);
        let b = SyntheticGenerator::with_seed(7).generate(DatasetKind::Benford, 50);
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
    }

    #[test]
    fn test_benford_values_conform() {
        let values = SyntheticGenerator::with_seed(42).benford_values(20_000);
        let report = analyze(&values);
        assert_eq!(report.conformity.total_valid_observations, 20_000);
        assert_eq!(report.conformity.conformity_level, ConformityLevel::High);
    }

    #[test]
    fn test_prices_are_positive_two_decimal_strings() {
        let values = SyntheticGenerator::with_seed(1).random_walk_prices(100);
        for value in &values {
            match value {
                RawValue::Text(s) => {
                    let (_, decimals) = s.split_once('.').unwrap();
                    assert_eq!(decimals.len(), 2);
                    assert!(value.as_f64().unwrap() > 0.0);
                }
                other => panic!("expected text price, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_magnitudes_range() {
        let values = SyntheticGenerator::with_seed(3).magnitudes(500);
        for value in &values {
            let v = value.as_f64().unwrap();
            assert!((1.0..10.0).contains(&v));
            assert!(DigitExtractor::first_digit(v).unwrap() >= 1);
        }
    }
}
