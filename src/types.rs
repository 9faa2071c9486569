//! Core types for Benford conformity analysis
//!
//! This module defines the data structures that flow through each stage of the
//! analysis: raw values, observations, digit frequencies, conformity results,
//! the assembled report, and the encoded report payload.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw input value as supplied by a data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Parse to a float; returns `None` when the value is not numeric.
    ///
    /// Text is trimmed and parsed with the standard float grammar, so
    /// `"12abc"` and `""` do not parse.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Number(v)
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Number(v as f64)
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Text(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{n}"),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

/// A single ingested value with its extracted leading digit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Original value as received
    pub raw: RawValue,
    /// Absolute numeric value
    pub processed: f64,
    /// Leading significant digit (0 is the zero-value sentinel)
    pub first_digit: u8,
}

/// Occurrence counts for leading digits 1-9
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitFrequency {
    counts: [u64; 9],
}

impl DigitFrequency {
    /// Build a frequency table from explicit counts (index 0 is digit 1)
    pub fn from_counts(counts: [u64; 9]) -> Self {
        Self { counts }
    }

    /// Record one occurrence of `digit`; digits outside 1-9 are ignored
    pub(crate) fn record(&mut self, digit: u8) {
        if (1..=9).contains(&digit) {
            self.counts[(digit - 1) as usize] += 1;
        }
    }

    /// Count for `digit` (1-9); zero for anything else
    pub fn count(&self, digit: u8) -> u64 {
        if (1..=9).contains(&digit) {
            self.counts[(digit - 1) as usize]
        } else {
            0
        }
    }

    /// Raw counts, index 0 is digit 1
    pub fn counts(&self) -> &[u64; 9] {
        &self.counts
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Percentage share of each digit against `total`, all zero when `total` is 0
    pub fn percentages(&self, total: u64) -> [f64; 9] {
        let mut out = [0.0; 9];
        if total > 0 {
            for (pct, &count) in out.iter_mut().zip(self.counts.iter()) {
                *pct = (count as f64 / total as f64) * 100.0;
            }
        }
        out
    }
}

/// Conformity classification derived from the mean absolute deviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConformityLevel {
    High,
    Moderate,
    Low,
    /// No valid observations; statistics are not applicable
    InsufficientData,
}

impl ConformityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConformityLevel::High => "high",
            ConformityLevel::Moderate => "moderate",
            ConformityLevel::Low => "low",
            ConformityLevel::InsufficientData => "insufficient_data",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ConformityLevel::High => "High conformity",
            ConformityLevel::Moderate => "Moderate conformity",
            ConformityLevel::Low => "Low conformity",
            ConformityLevel::InsufficientData => "Insufficient data",
        }
    }

    /// Short interpretation suitable for an alert or status line
    pub fn interpretation(&self) -> &'static str {
        match self {
            ConformityLevel::High => {
                "The data closely follows Benford's Law, which suggests naturally occurring, unmanipulated values."
            }
            ConformityLevel::Moderate => {
                "The data moderately follows Benford's Law. Additional analysis may be needed."
            }
            ConformityLevel::Low => {
                "The data deviates from Benford's Law. This may indicate manipulation or values that are not naturally occurring."
            }
            ConformityLevel::InsufficientData => {
                "No valid observations were available, so conformity could not be evaluated."
            }
        }
    }
}

impl fmt::Display for ConformityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of comparing observed digit shares to the Benford reference
///
/// Every derived statistic is `None` when `total_valid_observations` is 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConformityResult {
    /// Observed percentage per digit, index 0 is digit 1
    pub observed_percentages: [f64; 9],
    /// Mean of absolute percentage deviations across the 9 digits
    pub mean_absolute_deviation: Option<f64>,
    /// Largest absolute percentage deviation
    pub max_deviation: Option<f64>,
    /// Lowest digit attaining `max_deviation`
    pub max_deviation_digit: Option<u8>,
    /// Pearson chi-square statistic over observed vs expected counts
    pub chi_square: Option<f64>,
    pub most_frequent_digit: Option<u8>,
    pub least_frequent_digit: Option<u8>,
    pub total_valid_observations: u64,
    pub conformity_level: ConformityLevel,
}

impl ConformityResult {
    /// Whether the derived statistics carry values
    pub fn is_applicable(&self) -> bool {
        self.total_valid_observations > 0
    }
}

/// Immutable result bundle handed to presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Normalized observations, in input order
    pub observations: Vec<Observation>,
    /// Raw values removed by the ingest policy
    pub dropped: usize,
    pub frequency: DigitFrequency,
    pub conformity: ConformityResult,
}

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Report provenance information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProvenance {
    /// Free-form label for where the values came from
    pub source: String,
    pub computed_at_utc: String,
}

/// Per-digit observed vs expected comparison row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitRow {
    pub digit: u8,
    pub count: u64,
    pub observed_pct: f64,
    pub expected_pct: f64,
    pub deviation: f64,
}

/// Bounded preview of the observation list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationPreview {
    pub rows: Vec<Observation>,
    /// Observations not included in `rows`
    pub remaining: usize,
}

/// Conformity summary with presentation strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    #[serde(flatten)]
    pub conformity: ConformityResult,
    pub label: String,
    pub interpretation: String,
    pub total_observations: usize,
    pub dropped: usize,
}

/// Complete encoded report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportPayload {
    pub report_version: String,
    pub producer: ReportProducer,
    pub provenance: ReportProvenance,
    pub summary: ReportSummary,
    pub digits: Vec<DigitRow>,
    pub preview: ObservationPreview,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_value_parsing() {
        assert_eq!(RawValue::from(12.5).as_f64(), Some(12.5));
        assert_eq!(RawValue::from(" 42.10 ").as_f64(), Some(42.1));
        assert_eq!(RawValue::from("-7").as_f64(), Some(-7.0));
        assert_eq!(RawValue::from("12abc").as_f64(), None);
        assert_eq!(RawValue::from("").as_f64(), None);
    }

    #[test]
    fn test_raw_value_deserialize_untagged() {
        let values: Vec<RawValue> = serde_json::from_str(r#"[1, 2.5, "3.75"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                RawValue::Number(1.0),
                RawValue::Number(2.5),
                RawValue::Text("3.75".to_string())
            ]
        );
    }

    #[test]
    fn test_digit_frequency_record_and_total() {
        let mut freq = DigitFrequency::default();
        freq.record(1);
        freq.record(1);
        freq.record(9);
        freq.record(0);
        freq.record(12);

        assert_eq!(freq.count(1), 2);
        assert_eq!(freq.count(9), 1);
        assert_eq!(freq.count(0), 0);
        assert_eq!(freq.total(), 3);
    }

    #[test]
    fn test_percentages_zero_total() {
        let freq = DigitFrequency::default();
        assert_eq!(freq.percentages(0), [0.0; 9]);
    }

    #[test]
    fn test_conformity_level_serialization() {
        let json = serde_json::to_string(&ConformityLevel::InsufficientData).unwrap();
        assert_eq!(json, "\"insufficient_data\"");
        assert_eq!(ConformityLevel::Moderate.as_str(), "moderate");
    }
}
