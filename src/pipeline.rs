//! Pipeline orchestration
//!
//! This module provides the public analysis API.
//! It chains ingestion, digit extraction, aggregation and evaluation into a
//! single call that returns a fresh report. No state survives between calls.

use crate::config::AnalysisConfig;
use crate::conformity::ConformityEvaluator;
use crate::encoder::ReportEncoder;
use crate::error::BenfordError;
use crate::frequency::FrequencyAggregator;
use crate::ingest::DatasetIngestor;
use crate::input::{InputFormat, InputParser};
use crate::types::{AnalysisReport, RawValue};
use log::info;

/// Analyze raw values with the default configuration.
///
/// # Example
/// ```
/// use benford_conformity::{analyze, RawValue};
///
/// let values: Vec<RawValue> = vec![RawValue::from(123.0), RawValue::from("0.045")];
/// let report = analyze(&values);
/// assert_eq!(report.conformity.total_valid_observations, 2);
/// ```
pub fn analyze(raw_values: &[RawValue]) -> AnalysisReport {
    BenfordAnalyzer::new().analyze(raw_values)
}

/// Analyze a JSON array of numbers or numeric strings and return the encoded
/// report payload as JSON.
///
/// # Arguments
/// * `raw_json` - JSON array, e.g. `[1200, "34.5", 0.07]`
///
/// # Example
/// ```ignore
/// let payload = analyze_json("[1200, \"34.5\", 0.07]".to_string())?;
/// ```
pub fn analyze_json(raw_json: String) -> Result<String, BenfordError> {
    let analyzer = BenfordAnalyzer::new();
    let values = InputParser::parse(&raw_json, InputFormat::Json, None)?;
    let report = analyzer.analyze(&values);
    analyzer.encoder().encode_to_json(&report, "json")
}

/// Configurable analyzer.
///
/// Holds only immutable settings; every call to [`BenfordAnalyzer::analyze`]
/// builds its frequency table and result from scratch.
pub struct BenfordAnalyzer {
    config: AnalysisConfig,
    ingestor: DatasetIngestor,
    evaluator: ConformityEvaluator,
    encoder: ReportEncoder,
}

impl Default for BenfordAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl BenfordAnalyzer {
    /// Create an analyzer with default settings
    pub fn new() -> Self {
        Self::from_parts(AnalysisConfig::default())
    }

    /// Create an analyzer from a validated configuration
    pub fn with_config(config: AnalysisConfig) -> Result<Self, BenfordError> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    /// Create an analyzer from a JSON configuration document
    pub fn from_config_json(json: &str) -> Result<Self, BenfordError> {
        let config = AnalysisConfig::from_json(json)?;
        Ok(Self::from_parts(config))
    }

    fn from_parts(config: AnalysisConfig) -> Self {
        Self {
            ingestor: DatasetIngestor::new(config.ingest_policy),
            evaluator: ConformityEvaluator::new(config.thresholds),
            encoder: ReportEncoder::new().preview_limit(config.preview_limit),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn encoder(&self) -> &ReportEncoder {
        &self.encoder
    }

    /// Run the full analysis over `raw_values`.
    ///
    /// Stages:
    /// 1. DatasetIngestor - Parse, filter and extract leading digits
    /// 2. FrequencyAggregator - Count digits 1-9
    /// 3. ConformityEvaluator - Compare against the Benford reference
    pub fn analyze(&self, raw_values: &[RawValue]) -> AnalysisReport {
        let (observations, dropped) = self.ingestor.normalize_with_stats(raw_values);
        let (frequency, total) = FrequencyAggregator::aggregate_with_total(&observations);
        let conformity = self.evaluator.evaluate(&frequency, total);

        info!(
            "analyzed {} values ({} kept, {} dropped, {} valid): {}",
            raw_values.len(),
            observations.len(),
            dropped,
            total,
            conformity.conformity_level.as_str()
        );

        AnalysisReport {
            observations,
            dropped,
            frequency,
            conformity,
        }
    }

    /// Parse `input` in `format`, analyze it, and encode the payload to JSON
    pub fn analyze_text(
        &self,
        input: &str,
        format: InputFormat,
        field: Option<&str>,
        source: &str,
    ) -> Result<String, BenfordError> {
        let values = InputParser::parse(input, format, field)?;
        let report = self.analyze(&values);
        self.encoder.encode_to_json(&report, source)
    }
}
