//! Report encoding
//!
//! This module encodes an analysis report into a self-describing payload for
//! presentation layers: a conformity summary, per-digit comparison rows for
//! charting, and a bounded observation preview for tabular display.

use crate::config::DEFAULT_PREVIEW_LIMIT;
use crate::conformity::compute_deviations;
use crate::error::BenfordError;
use crate::reference::{BENFORD_PERCENTAGES, DIGITS};
use crate::types::{
    AnalysisReport, DigitRow, ObservationPreview, ReportPayload, ReportProducer,
    ReportProvenance, ReportSummary,
};
use crate::{CRATE_VERSION, PRODUCER_NAME};
use chrono::Utc;
use uuid::Uuid;

/// Current report payload version
pub const REPORT_VERSION: &str = "1.0.0";

/// Encoder for producing report payloads
pub struct ReportEncoder {
    instance_id: String,
    preview_limit: usize,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self {
            instance_id,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        }
    }

    /// Set how many observations the preview carries
    pub fn preview_limit(mut self, limit: usize) -> Self {
        self.preview_limit = limit;
        self
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Encode a report into a payload
    pub fn encode(&self, report: &AnalysisReport, source: &str) -> ReportPayload {
        let producer = ReportProducer {
            name: PRODUCER_NAME.to_string(),
            version: CRATE_VERSION.to_string(),
            instance_id: self.instance_id.clone(),
        };

        let provenance = ReportProvenance {
            source: source.to_string(),
            computed_at_utc: Utc::now().to_rfc3339(),
        };

        let level = report.conformity.conformity_level;
        let summary = ReportSummary {
            conformity: report.conformity.clone(),
            label: level.label().to_string(),
            interpretation: level.interpretation().to_string(),
            total_observations: report.observations.len(),
            dropped: report.dropped,
        };

        ReportPayload {
            report_version: REPORT_VERSION.to_string(),
            producer,
            provenance,
            summary,
            digits: self.build_digit_rows(report),
            preview: self.build_preview(report),
        }
    }

    /// Encode to compact JSON
    pub fn encode_to_json(
        &self,
        report: &AnalysisReport,
        source: &str,
    ) -> Result<String, BenfordError> {
        let payload = self.encode(report, source);
        serde_json::to_string(&payload).map_err(|e| BenfordError::EncodingError(e.to_string()))
    }

    /// Encode to pretty-printed JSON
    pub fn encode_to_json_pretty(
        &self,
        report: &AnalysisReport,
        source: &str,
    ) -> Result<String, BenfordError> {
        let payload = self.encode(report, source);
        serde_json::to_string_pretty(&payload)
            .map_err(|e| BenfordError::EncodingError(e.to_string()))
    }

    fn build_digit_rows(&self, report: &AnalysisReport) -> Vec<DigitRow> {
        let observed = &report.conformity.observed_percentages;
        let deviations = compute_deviations(observed);

        DIGITS
            .map(|digit| {
                let i = (digit - 1) as usize;
                DigitRow {
                    digit,
                    count: report.frequency.count(digit),
                    observed_pct: observed[i],
                    expected_pct: BENFORD_PERCENTAGES[i],
                    deviation: deviations[i],
                }
            })
            .collect()
    }

    fn build_preview(&self, report: &AnalysisReport) -> ObservationPreview {
        let shown = report.observations.len().min(self.preview_limit);
        ObservationPreview {
            rows: report.observations[..shown].to_vec(),
            remaining: report.observations.len() - shown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::analyze;
    use crate::types::{ConformityLevel, RawValue};
    use pretty_assertions::assert_eq;

    fn sample_report(n: usize) -> AnalysisReport {
        let values: Vec<RawValue> = (1..=n).map(|i| RawValue::from(i as f64 * 7.0)).collect();
        analyze(&values)
    }

    #[test]
    fn test_encode_payload() {
        let report = sample_report(30);
        let encoder = ReportEncoder::with_instance_id("test-instance".to_string());
        assert_eq!(encoder.instance_id(), "test-instance");
        let payload = encoder.encode(&report, "unit-test");

        assert_eq!(payload.report_version, REPORT_VERSION);
        assert_eq!(payload.producer.name, PRODUCER_NAME);
        assert_eq!(payload.producer.version, CRATE_VERSION);
        assert_eq!(payload.producer.instance_id, "test-instance");
        assert_eq!(payload.provenance.source, "unit-test");

        assert_eq!(payload.summary.total_observations, 30);
        assert_eq!(payload.summary.dropped, 0);
        assert_eq!(payload.summary.label, payload.summary.conformity.conformity_level.label());
    }

    #[test]
    fn test_digit_rows() {
        let report = sample_report(30);
        let payload = ReportEncoder::new().encode(&report, "unit-test");

        assert_eq!(payload.digits.len(), 9);
        let digits: Vec<u8> = payload.digits.iter().map(|r| r.digit).collect();
        assert_eq!(digits, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);

        let total: u64 = payload.digits.iter().map(|r| r.count).sum();
        assert_eq!(total, report.conformity.total_valid_observations);
        assert_eq!(payload.digits[0].expected_pct, 30.1);
        assert_eq!(payload.digits[8].expected_pct, 4.6);
    }

    #[test]
    fn test_preview_overflow() {
        let report = sample_report(30);
        let payload = ReportEncoder::new().encode(&report, "unit-test");

        assert_eq!(payload.preview.rows.len(), DEFAULT_PREVIEW_LIMIT);
        assert_eq!(payload.preview.remaining, 10);
        assert_eq!(payload.preview.rows[0], report.observations[0]);
    }

    #[test]
    fn test_preview_smaller_than_limit() {
        let report = sample_report(4);
        let payload = ReportEncoder::new().preview_limit(10).encode(&report, "unit-test");

        assert_eq!(payload.preview.rows.len(), 4);
        assert_eq!(payload.preview.remaining, 0);
    }

    #[test]
    fn test_encode_empty_report_json() {
        let report = analyze(&[]);
        let json = ReportEncoder::new().encode_to_json(&report, "empty").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["summary"]["conformity_level"], "insufficient_data");
        assert!(parsed["summary"]["chi_square"].is_null());
        assert_eq!(parsed["summary"]["total_valid_observations"], 0);
        assert_eq!(parsed["digits"].as_array().unwrap().len(), 9);
        assert_eq!(report.conformity.conformity_level, ConformityLevel::InsufficientData);
    }

    #[test]
    fn test_encode_to_json_pretty_is_valid() {
        let report = sample_report(12);
        let json = ReportEncoder::new()
            .encode_to_json_pretty(&report, "unit-test")
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(parsed.get("report_version").is_some());
        assert!(parsed.get("producer").is_some());
        assert!(parsed.get("provenance").is_some());
        assert!(parsed.get("summary").is_some());
        assert!(parsed.get("preview").is_some());
    }
}
