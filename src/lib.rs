//! Benford Conformity - leading-digit analysis against Benford's Law
//!
//! The crate turns a list of raw values into a conformity verdict through a
//! deterministic pipeline: ingestion → leading digit extraction → frequency
//! aggregation → conformity evaluation → report encoding.
//!
//! ## Modules
//!
//! - **Analysis core**: `digit`, `ingest`, `frequency`, `conformity`, `reference`
//! - **Boundary**: `input` parsing, `encoder` payloads, `config`, `ffi`
//! - **Demo data**: `synthetic` generators for trying the analysis without a source

pub mod config;
pub mod conformity;
pub mod digit;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod ingest;
pub mod input;
pub mod pipeline;
pub mod reference;
pub mod synthetic;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use config::{AnalysisConfig, ConformityThresholds, IngestPolicy};
pub use conformity::ConformityEvaluator;
pub use digit::DigitExtractor;
pub use error::BenfordError;
pub use frequency::FrequencyAggregator;
pub use ingest::DatasetIngestor;
pub use input::{InputFormat, InputParser};
pub use pipeline::{analyze, analyze_json, BenfordAnalyzer};
pub use reference::BENFORD_PERCENTAGES;
pub use types::{
    AnalysisReport, ConformityLevel, ConformityResult, DigitFrequency, Observation, RawValue,
};

/// Crate version embedded in all report payloads
pub const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report payloads
pub const PRODUCER_NAME: &str = "benford-conformity";
