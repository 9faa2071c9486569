//! Benford CLI - Command-line interface for Benford conformity analysis
//!
//! Commands:
//! - analyze: Analyze a list of values and report conformity
//! - generate: Emit a synthetic demo dataset as a JSON array
//! - reference: Print the Benford reference distribution
//! - doctor: Diagnose configuration and environment

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info, LevelFilter};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use benford_conformity::reference::BENFORD_PERCENTAGES;
use benford_conformity::synthetic::{DatasetKind, SyntheticGenerator};
use benford_conformity::types::ReportPayload;
use benford_conformity::{
    AnalysisConfig, BenfordAnalyzer, BenfordError, InputFormat, InputParser, IngestPolicy,
    CRATE_VERSION, PRODUCER_NAME,
};

/// Benford - Leading digit conformity analysis
#[derive(Parser)]
#[command(name = "benford")]
#[command(version = CRATE_VERSION)]
#[command(about = "Check how closely a dataset follows Benford's Law", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze values and report Benford conformity
    Analyze {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: CliInputFormat,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,

        /// JSON pointer selecting the value inside each record (e.g. /population)
        #[arg(long)]
        field: Option<String>,

        /// Load analysis settings from a JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Ingest policy (overrides the config file)
        #[arg(long)]
        policy: Option<CliIngestPolicy>,

        /// Number of observations in the preview (overrides the config file)
        #[arg(long)]
        preview_limit: Option<usize>,

        /// Source label recorded in the report provenance
        #[arg(long)]
        source: Option<String>,
    },

    /// Emit a synthetic demo dataset as a JSON array
    Generate {
        /// Dataset kind
        #[arg(long, default_value = "benford")]
        kind: CliDatasetKind,

        /// Number of values
        #[arg(short, long, default_value = "100")]
        count: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,
    },

    /// Print the Benford reference distribution
    Reference {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose configuration and environment
    Doctor {
        /// Check a config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CliInputFormat {
    /// JSON array of values or records
    Json,
    /// Newline-delimited JSON (one value or record per line)
    Ndjson,
    /// Plain text, one value per line
    Lines,
}

impl From<CliInputFormat> for InputFormat {
    fn from(format: CliInputFormat) -> Self {
        match format {
            CliInputFormat::Json => InputFormat::Json,
            CliInputFormat::Ndjson => InputFormat::Ndjson,
            CliInputFormat::Lines => InputFormat::Lines,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Compact JSON report
    Json,
    /// Pretty-printed JSON report
    JsonPretty,
    /// Human-readable summary
    Text,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliIngestPolicy {
    /// Keep only values greater than zero
    PositiveOnly,
    /// Keep negatives (as magnitudes) and zeros
    Absolute,
}

impl From<CliIngestPolicy> for IngestPolicy {
    fn from(policy: CliIngestPolicy) -> Self {
        match policy {
            CliIngestPolicy::PositiveOnly => IngestPolicy::PositiveOnly,
            CliIngestPolicy::Absolute => IngestPolicy::Absolute,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CliDatasetKind {
    /// Integers following Benford's Law
    Benford,
    /// Random-walk prices
    Prices,
    /// One-decimal magnitudes
    Magnitudes,
}

impl From<CliDatasetKind> for DatasetKind {
    fn from(kind: CliDatasetKind) -> Self {
        match kind {
            CliDatasetKind::Benford => DatasetKind::Benford,
            CliDatasetKind::Prices => DatasetKind::Prices,
            CliDatasetKind::Magnitudes => DatasetKind::Magnitudes,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> Result<(), BenfordCliError> {
    match cli.command {
        Commands::Analyze {
            input,
            output,
            input_format,
            output_format,
            field,
            config,
            policy,
            preview_limit,
            source,
        } => {
            let config = build_config(config.as_deref(), policy, preview_limit)?;
            let source = source.unwrap_or_else(|| input.to_string_lossy().into_owned());
            cmd_analyze(
                &input,
                &output,
                input_format.into(),
                output_format,
                field.as_deref(),
                config,
                &source,
            )
        }

        Commands::Generate {
            kind,
            count,
            seed,
            output,
        } => cmd_generate(kind.into(), count, seed, &output),

        Commands::Reference { json } => cmd_reference(json),

        Commands::Doctor { config, json } => cmd_doctor(config.as_deref(), json),
    }
}

fn build_config(
    path: Option<&Path>,
    policy: Option<CliIngestPolicy>,
    preview_limit: Option<usize>,
) -> Result<AnalysisConfig, BenfordCliError> {
    let mut config = match path {
        Some(path) => {
            debug!("loading config from {}", path.display());
            AnalysisConfig::from_json(&fs::read_to_string(path)?)?
        }
        None => AnalysisConfig::default(),
    };

    if let Some(policy) = policy {
        config.ingest_policy = policy.into();
    }
    if let Some(limit) = preview_limit {
        config.preview_limit = limit;
    }

    Ok(config)
}

fn cmd_analyze(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    field: Option<&str>,
    config: AnalysisConfig,
    source: &str,
) -> Result<(), BenfordCliError> {
    let input_data = read_input(input)?;
    let values = InputParser::parse(&input_data, input_format, field)?;

    let analyzer = BenfordAnalyzer::with_config(config)?;
    let report = analyzer.analyze(&values);
    let payload = analyzer.encoder().encode(&report, source);

    let output_data = match output_format {
        OutputFormat::Json => serde_json::to_string(&payload)? + "\n",
        OutputFormat::JsonPretty => serde_json::to_string_pretty(&payload)? + "\n",
        OutputFormat::Text => format_text_report(&payload),
    };

    write_output(output, &output_data)
}

fn cmd_generate(
    kind: DatasetKind,
    count: usize,
    seed: Option<u64>,
    output: &Path,
) -> Result<(), BenfordCliError> {
    let mut generator = match seed {
        Some(seed) => SyntheticGenerator::with_seed(seed),
        None => SyntheticGenerator::new(),
    };
    let values = generator.generate(kind, count);
    info!("generated {} {:?} values", values.len(), kind);

    write_output(output, &(serde_json::to_string(&values)? + "\n"))
}

fn cmd_reference(json: bool) -> Result<(), BenfordCliError> {
    let rows: Vec<ReferenceRow> = BENFORD_PERCENTAGES
        .iter()
        .enumerate()
        .map(|(i, &pct)| ReferenceRow {
            digit: i as u8 + 1,
            expected_pct: pct,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("Benford Reference Distribution");
        println!("==============================");
        for row in &rows {
            println!("  {}  {:>5.1}%  {}", row.digit, row.expected_pct, bar(row.expected_pct));
        }
    }

    Ok(())
}

fn cmd_doctor(config: Option<&Path>, json: bool) -> Result<(), BenfordCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "version".to_string(),
        status: CheckStatus::Ok,
        message: format!("{} version {}", PRODUCER_NAME, CRATE_VERSION),
    });

    let reference_sum: f64 = BENFORD_PERCENTAGES.iter().sum();
    checks.push(DoctorCheck {
        name: "reference".to_string(),
        status: if (reference_sum - 100.0).abs() < 1e-9 {
            CheckStatus::Ok
        } else {
            CheckStatus::Error
        },
        message: format!("Reference distribution sums to {:.1}%", reference_sum),
    });

    if let Some(config_path) = config {
        let check = if config_path.exists() {
            match fs::read_to_string(config_path) {
                Ok(content) => match AnalysisConfig::from_json(&content) {
                    Ok(config) => DoctorCheck {
                        name: "config".to_string(),
                        status: CheckStatus::Ok,
                        message: format!(
                            "Config valid (policy {:?}, high < {}, moderate < {}, preview {})",
                            config.ingest_policy,
                            config.thresholds.high,
                            config.thresholds.moderate,
                            config.preview_limit
                        ),
                    },
                    Err(e) => DoctorCheck {
                        name: "config".to_string(),
                        status: CheckStatus::Error,
                        message: format!("Invalid config: {}", e),
                    },
                },
                Err(e) => DoctorCheck {
                    name: "config".to_string(),
                    status: CheckStatus::Error,
                    message: format!("Cannot read config file: {}", e),
                },
            }
        } else {
            DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Warning,
                message: "Config file does not exist".to_string(),
            }
        };
        checks.push(check);
    }

    let stdin_message = if atty::is(atty::Stream::Stdin) {
        "stdin is a TTY (interactive mode)"
    } else {
        "stdin is a pipe (ready for --input -)"
    };
    checks.push(DoctorCheck {
        name: "stdin".to_string(),
        status: CheckStatus::Ok,
        message: stdin_message.to_string(),
    });

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: CRATE_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Benford Doctor Report");
        println!("=====================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(BenfordCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

// Helper functions

fn read_input(input: &Path) -> Result<String, BenfordCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn write_output(output: &Path, data: &str) -> Result<(), BenfordCliError> {
    if output.to_string_lossy() == "-" {
        print!("{}", data);
    } else {
        fs::write(output, data)?;
    }
    Ok(())
}

fn format_text_report(payload: &ReportPayload) -> String {
    let summary = &payload.summary;
    let conformity = &summary.conformity;
    let mut out = String::new();

    out.push_str("Benford Conformity Report\n");
    out.push_str("=========================\n");
    out.push_str(&format!("Source:        {}\n", payload.provenance.source));
    out.push_str(&format!(
        "Observations:  {} ({} valid, {} dropped)\n",
        summary.total_observations, conformity.total_valid_observations, summary.dropped
    ));
    out.push_str(&format!("Conformity:    {}\n", summary.label));

    if conformity.is_applicable() {
        let na = |v: Option<f64>, places: usize| {
            v.map(|v| format!("{v:.places$}"))
                .unwrap_or_else(|| "--".to_string())
        };
        out.push_str(&format!(
            "MAD:           {}%\n",
            na(conformity.mean_absolute_deviation, 2)
        ));
        out.push_str(&format!(
            "Max deviation: {}% (digit {})\n",
            na(conformity.max_deviation, 1),
            conformity.max_deviation_digit.unwrap_or_default()
        ));
        out.push_str(&format!("Chi-square:    {}\n", na(conformity.chi_square, 2)));
        out.push_str(&format!(
            "Most frequent: {}   Least frequent: {}\n",
            conformity.most_frequent_digit.unwrap_or_default(),
            conformity.least_frequent_digit.unwrap_or_default()
        ));
    }

    out.push_str("\nDigit  Count  Observed  Expected\n");
    for row in &payload.digits {
        out.push_str(&format!(
            "  {}  {:>7}  {:>6.1}%  {:>6.1}%  {}\n",
            row.digit,
            row.count,
            row.observed_pct,
            row.expected_pct,
            bar(row.observed_pct)
        ));
    }

    if !payload.preview.rows.is_empty() {
        out.push_str("\n  #  Value                 Digit\n");
        for (i, observation) in payload.preview.rows.iter().enumerate() {
            out.push_str(&format!(
                "{:>3}  {:<20}  {}\n",
                i + 1,
                observation.raw.to_string(),
                observation.first_digit
            ));
        }
        if payload.preview.remaining > 0 {
            out.push_str(&format!("... and {} more\n", payload.preview.remaining));
        }
    }

    out.push_str(&format!("\n{}\n", summary.interpretation));
    out
}

fn bar(pct: f64) -> String {
    "#".repeat((pct / 2.0).round().max(0.0) as usize)
}

// Error types

#[derive(Debug)]
enum BenfordCliError {
    Io(io::Error),
    Analysis(BenfordError),
    Json(serde_json::Error),
    DoctorFailed,
}

impl From<io::Error> for BenfordCliError {
    fn from(e: io::Error) -> Self {
        BenfordCliError::Io(e)
    }
}

impl From<BenfordError> for BenfordCliError {
    fn from(e: BenfordError) -> Self {
        BenfordCliError::Analysis(e)
    }
}

impl From<serde_json::Error> for BenfordCliError {
    fn from(e: serde_json::Error) -> Self {
        BenfordCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<BenfordCliError> for CliError {
    fn from(e: BenfordCliError) -> Self {
        match e {
            BenfordCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            BenfordCliError::Analysis(BenfordError::InvalidConfig(msg)) => CliError {
                code: "CONFIG_ERROR".to_string(),
                message: msg,
                hint: Some("Run 'benford doctor --config <file>' for details".to_string()),
            },
            BenfordCliError::Analysis(e) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check --input-format and --field".to_string()),
            },
            BenfordCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            BenfordCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ReferenceRow {
    digit: u8,
    expected_pct: f64,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
