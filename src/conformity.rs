//! Conformity evaluation
//!
//! This module compares an observed leading-digit distribution to the Benford
//! reference:
//! - Per-digit percentage deviations and their mean (MAD)
//! - Largest deviation and the digit it belongs to
//! - Pearson chi-square over counts
//! - Most and least frequent digits
//! - Classification into conformity bands by MAD
//!
//! Ties always resolve to the lowest digit. An empty dataset produces a
//! result whose derived statistics are all `None`.

use crate::config::ConformityThresholds;
use crate::reference::{expected_count, BENFORD_PERCENTAGES, DIGITS};
use crate::types::{ConformityLevel, ConformityResult, DigitFrequency};

/// Evaluator for Benford conformity statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct ConformityEvaluator {
    thresholds: ConformityThresholds,
}

impl ConformityEvaluator {
    pub fn new(thresholds: ConformityThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> ConformityThresholds {
        self.thresholds
    }

    /// Evaluate `frequency` against the reference for `total` valid observations
    pub fn evaluate(&self, frequency: &DigitFrequency, total: u64) -> ConformityResult {
        let observed_percentages = frequency.percentages(total);

        if total == 0 {
            return ConformityResult {
                observed_percentages,
                mean_absolute_deviation: None,
                max_deviation: None,
                max_deviation_digit: None,
                chi_square: None,
                most_frequent_digit: None,
                least_frequent_digit: None,
                total_valid_observations: 0,
                conformity_level: ConformityLevel::InsufficientData,
            };
        }

        let deviations = compute_deviations(&observed_percentages);
        let mean_absolute_deviation = deviations.iter().sum::<f64>() / 9.0;
        let (max_deviation_digit, max_deviation) = compute_max_deviation(&deviations);
        let chi_square = compute_chi_square(frequency, total);
        let (most_frequent_digit, least_frequent_digit) = compute_frequency_extremes(frequency);

        ConformityResult {
            observed_percentages,
            mean_absolute_deviation: Some(mean_absolute_deviation),
            max_deviation: Some(max_deviation),
            max_deviation_digit: Some(max_deviation_digit),
            chi_square: Some(chi_square),
            most_frequent_digit: Some(most_frequent_digit),
            least_frequent_digit: Some(least_frequent_digit),
            total_valid_observations: total,
            conformity_level: self.classify(mean_absolute_deviation),
        }
    }

    /// Evaluate using the frequency table's own total
    pub fn evaluate_frequency(&self, frequency: &DigitFrequency) -> ConformityResult {
        self.evaluate(frequency, frequency.total())
    }

    /// Map a mean absolute deviation onto a conformity band.
    /// Each band is inclusive-low, exclusive-high.
    pub fn classify(&self, mean_absolute_deviation: f64) -> ConformityLevel {
        if mean_absolute_deviation < self.thresholds.high {
            ConformityLevel::High
        } else if mean_absolute_deviation < self.thresholds.moderate {
            ConformityLevel::Moderate
        } else {
            ConformityLevel::Low
        }
    }
}

/// Absolute percentage deviation per digit
pub fn compute_deviations(observed_percentages: &[f64; 9]) -> [f64; 9] {
    let mut deviations = [0.0; 9];
    for (i, deviation) in deviations.iter_mut().enumerate() {
        *deviation = (observed_percentages[i] - BENFORD_PERCENTAGES[i]).abs();
    }
    deviations
}

/// Largest deviation and the lowest digit attaining it
fn compute_max_deviation(deviations: &[f64; 9]) -> (u8, f64) {
    let mut digit = 1;
    let mut max = deviations[0];
    for (i, &deviation) in deviations.iter().enumerate().skip(1) {
        if deviation > max {
            max = deviation;
            digit = i as u8 + 1;
        }
    }
    (digit, max)
}

/// Pearson chi-square; caller guarantees `total > 0`
fn compute_chi_square(frequency: &DigitFrequency, total: u64) -> f64 {
    DIGITS
        .zip(frequency.counts().iter())
        .filter_map(|(digit, &count)| {
            let expected = expected_count(digit, total)?;
            let diff = count as f64 - expected;
            Some(diff * diff / expected)
        })
        .sum()
}

/// Most and least frequent digits, scanning 1 to 9 with strict comparisons
fn compute_frequency_extremes(frequency: &DigitFrequency) -> (u8, u8) {
    let counts = frequency.counts();
    let mut most = 1;
    let mut least = 1;
    let mut max_count = counts[0];
    let mut min_count = counts[0];

    for (i, &count) in counts.iter().enumerate().skip(1) {
        if count > max_count {
            max_count = count;
            most = i as u8 + 1;
        }
        if count < min_count {
            min_count = count;
            least = i as u8 + 1;
        }
    }

    (most, least)
}
