//! Analysis configuration
//!
//! Settings that shape an analysis run: which raw values are kept, where the
//! conformity bands sit, and how much of the dataset the report previews.
//! Everything has a default, so a partial JSON document is a valid config.

use crate::error::BenfordError;
use serde::{Deserialize, Serialize};

/// Default number of observations included in a report preview
pub const DEFAULT_PREVIEW_LIMIT: usize = 20;

/// Which raw values survive ingestion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestPolicy {
    /// Keep only finite values strictly greater than zero
    #[default]
    PositiveOnly,
    /// Keep every finite value; negatives are folded to their magnitude and
    /// zeros are kept with the sentinel digit 0
    Absolute,
}

/// Upper bounds (exclusive) on the mean absolute deviation for each band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConformityThresholds {
    /// MAD below this is high conformity
    pub high: f64,
    /// MAD below this (and not high) is moderate conformity
    pub moderate: f64,
}

impl Default for ConformityThresholds {
    fn default() -> Self {
        Self {
            high: 3.0,
            moderate: 6.0,
        }
    }
}

impl ConformityThresholds {
    pub fn validate(&self) -> Result<(), BenfordError> {
        if !self.high.is_finite() || !self.moderate.is_finite() {
            return Err(BenfordError::InvalidConfig(
                "conformity thresholds must be finite".to_string(),
            ));
        }
        if self.high <= 0.0 {
            return Err(BenfordError::InvalidConfig(format!(
                "high threshold must be positive, got {}",
                self.high
            )));
        }
        if self.high >= self.moderate {
            return Err(BenfordError::InvalidConfig(format!(
                "high threshold ({}) must be below moderate threshold ({})",
                self.high, self.moderate
            )));
        }
        Ok(())
    }
}

/// Full analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub ingest_policy: IngestPolicy,
    pub thresholds: ConformityThresholds,
    pub preview_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ingest_policy: IngestPolicy::default(),
            thresholds: ConformityThresholds::default(),
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a config from JSON
    pub fn from_json(json: &str) -> Result<Self, BenfordError> {
        let config: AnalysisConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize config to JSON
    pub fn to_json(&self) -> Result<String, BenfordError> {
        serde_json::to_string_pretty(self).map_err(BenfordError::JsonError)
    }

    pub fn validate(&self) -> Result<(), BenfordError> {
        self.thresholds.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.ingest_policy, IngestPolicy::PositiveOnly);
        assert_eq!(config.thresholds.high, 3.0);
        assert_eq!(config.thresholds.moderate, 6.0);
        assert_eq!(config.preview_limit, 20);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AnalysisConfig::from_json(r#"{"ingest_policy": "absolute"}"#).unwrap();
        assert_eq!(config.ingest_policy, IngestPolicy::Absolute);
        assert_eq!(config.thresholds, ConformityThresholds::default());
        assert_eq!(config.preview_limit, DEFAULT_PREVIEW_LIMIT);

        let config = AnalysisConfig::from_json(r#"{"thresholds": {"high": 2.0}}"#).unwrap();
        assert_eq!(config.thresholds.high, 2.0);
        assert_eq!(config.thresholds.moderate, 6.0);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = AnalysisConfig {
            ingest_policy: IngestPolicy::Absolute,
            thresholds: ConformityThresholds {
                high: 1.5,
                moderate: 4.0,
            },
            preview_limit: 5,
        };
        let json = config.to_json().unwrap();
        assert_eq!(AnalysisConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let result = AnalysisConfig::from_json(r#"{"thresholds": {"high": 6.0, "moderate": 3.0}}"#);
        assert!(matches!(result, Err(BenfordError::InvalidConfig(_))));

        let result = AnalysisConfig::from_json(r#"{"thresholds": {"high": 0.0}}"#);
        assert!(matches!(result, Err(BenfordError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            AnalysisConfig::from_json("not json"),
            Err(BenfordError::JsonError(_))
        ));
    }
}
