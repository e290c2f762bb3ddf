//! Command-line parsing for the concrete maturity engine.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the maturity math.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cmm", version, about = "Concrete maturity and strength estimation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute TTF / equivalent age (and optional strength) for one pour.
    Compute(ComputeArgs),
    /// Compute several pours in parallel with the same request.
    Batch(BatchArgs),
    /// Evaluate a strength curve at a given maturity.
    Predict(PredictArgs),
}

/// Where temperature histories come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Deterministic 25-hour curing profile for any pour id.
    Synthetic,
    /// Readings CSV (`pour_id,ts,celsius`), see `--readings`.
    Csv,
    /// Remote time-series API at `MATURITY_READINGS_URL`.
    Http,
}

#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Temperature history source.
    #[arg(long, value_enum, default_value_t = SourceKind::Synthetic)]
    pub source: SourceKind,

    /// Readings CSV file (required for `--source csv`).
    #[arg(long, value_name = "CSV")]
    pub readings: Option<PathBuf>,
}

/// Strength-curve selection and parameters.
#[derive(Debug, Args, Clone, Default)]
pub struct CurveArgs {
    /// Curve family: `log` or `asymptotic`.
    #[arg(long)]
    pub curve: Option<String>,

    /// Log curve slope.
    #[arg(long, allow_hyphen_values = true)]
    pub a: Option<f64>,

    /// Log curve intercept.
    #[arg(long, allow_hyphen_values = true)]
    pub b: Option<f64>,

    /// Asymptotic curve upper strength (MPa).
    #[arg(long = "f-u", allow_hyphen_values = true)]
    pub f_u: Option<f64>,

    /// Asymptotic curve rate constant.
    #[arg(long, allow_hyphen_values = true)]
    pub k: Option<f64>,

    /// Strength standard deviation; enables the 95% interval.
    #[arg(long)]
    pub sigma: Option<f64>,

    /// Maturity floor for the log curve (default 1.0).
    #[arg(long, allow_hyphen_values = true)]
    pub min_maturity: Option<f64>,
}

impl CurveArgs {
    pub fn has_params(&self) -> bool {
        self.a.is_some()
            || self.b.is_some()
            || self.f_u.is_some()
            || self.k.is_some()
            || self.sigma.is_some()
            || self.min_maturity.is_some()
    }
}

/// Request construction: an optional JSON file, overridden by flags.
#[derive(Debug, Args, Clone, Default)]
pub struct RequestArgs {
    /// Request JSON (`curve_type`, `curve_params`, `T0_c`, `Ea`, `Tr_c`).
    #[arg(long, value_name = "JSON")]
    pub request: Option<PathBuf>,

    #[command(flatten)]
    pub curve: CurveArgs,

    /// Datum temperature override (°C).
    #[arg(long = "t0", allow_hyphen_values = true)]
    pub t0_c: Option<f64>,

    /// Activation energy override (J/mol).
    #[arg(long)]
    pub ea: Option<f64>,

    /// Reference temperature override (°C).
    #[arg(long = "tr", allow_hyphen_values = true)]
    pub tr_c: Option<f64>,
}

#[derive(Debug, Parser, Clone)]
pub struct ComputeArgs {
    /// Pour identifier.
    pub pour_id: String,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub request: RequestArgs,

    /// Print the response JSON instead of the text report.
    #[arg(long)]
    pub json: bool,

    /// Write the full run (result + parameters + stats) to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct BatchArgs {
    /// Pour identifiers. With `--source csv` and none given, every pour in the file.
    pub pour_ids: Vec<String>,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub request: RequestArgs,

    /// Print one response JSON per line instead of the table.
    #[arg(long)]
    pub json: bool,

    /// Write all successful runs to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct PredictArgs {
    /// Maturity value (°C·h for TTF curves, h for equivalent-age curves).
    #[arg(long, allow_hyphen_values = true)]
    pub maturity: f64,

    #[command(flatten)]
    pub curve: CurveArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_flags_parse() {
        let cli = Cli::try_parse_from([
            "cmm", "compute", "P-7", "--source", "csv", "--readings", "r.csv", "--curve", "log", "--a", "4.2",
            "--b", "-6", "--t0", "-5", "--json",
        ])
        .unwrap();
        let Command::Compute(args) = cli.command else {
            panic!("expected compute");
        };
        assert_eq!(args.pour_id, "P-7");
        assert_eq!(args.source.source, SourceKind::Csv);
        assert_eq!(args.request.curve.curve.as_deref(), Some("log"));
        assert_eq!(args.request.curve.b, Some(-6.0));
        assert_eq!(args.request.t0_c, Some(-5.0));
        assert!(args.request.curve.has_params());
        assert!(args.json);
    }

    #[test]
    fn batch_defaults_to_synthetic() {
        let cli = Cli::try_parse_from(["cmm", "batch", "A", "B"]).unwrap();
        let Command::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        assert_eq!(args.pour_ids, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(args.source.source, SourceKind::Synthetic);
        assert!(!args.request.curve.has_params());
    }
}
