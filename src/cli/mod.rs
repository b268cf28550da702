//! Command-line parsing for the traction-efficiency explorer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the model/search code.
//!
//! Every numeric option also reads a `TE_*` environment variable (a `.env` file
//! in the working directory is loaded first), so defaults can be set per project.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::curves::{DEFAULT_OFFSETS, DEFAULT_PLOT_SAMPLES};
use crate::search::DEFAULT_SEARCH_STEPS;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "te",
    version,
    about = "Traction efficiency vs. slip (Wismer–Luth 1974)"
)]
pub struct Cli {
    /// Verbose logging (debug level unless RUST_LOG is set).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a target TE, then (if reachable) print curves, commentary and plot.
    Run(RunArgs),
    /// Only check whether a target TE is reachable (exit code 3 if not).
    Check(CheckArgs),
    /// Print the maximum TE and its slip ratio for one coefficient.
    Max(MaxArgs),
    /// Build the comparison curves for a coefficient (no target needed).
    Curves(CurvesArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
    /// Print the model equations and symbols.
    Formulas,
}

/// Target TE and ground coefficient.
#[derive(Debug, Args, Clone)]
pub struct TargetArgs {
    /// Target traction efficiency, strictly between 0 and 1.
    #[arg(short = 't', long, env = "TE_TARGET", default_value = "0.60", value_parser = parse_decimal)]
    pub target: f64,

    #[command(flatten)]
    pub coefficient: CoefficientArgs,
}

/// Ground-bearing coefficient.
#[derive(Debug, Args, Clone)]
pub struct CoefficientArgs {
    /// Ground-bearing coefficient Cn (> 0).
    #[arg(short = 'c', long = "cn", env = "TE_CN", default_value = "40", value_parser = parse_decimal)]
    pub cn: f64,

    /// Grid points for the maximum search over slip [1e-6, 0.90].
    #[arg(long, env = "TE_SEARCH_STEPS", default_value_t = DEFAULT_SEARCH_STEPS)]
    pub steps: usize,
}

/// Curve sampling and output options.
#[derive(Debug, Args, Clone)]
pub struct CurveOutputArgs {
    /// Samples per curve over slip [0, 1].
    #[arg(long, env = "TE_PLOT_SAMPLES", default_value_t = DEFAULT_PLOT_SAMPLES)]
    pub samples: usize,

    /// Additive Cn offsets for the comparison curves (comma separated).
    #[arg(
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        default_values_t = DEFAULT_OFFSETS.to_vec()
    )]
    pub offsets: Vec<f64>,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 24)]
    pub height: usize,

    /// Export the curve set (and verdict/commentary) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Export all curve samples to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,

    /// Render the curves to an SVG chart.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,
}

/// Options for `te run`.
#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub output: CurveOutputArgs,
}

/// Options for `te check`.
#[derive(Debug, Args, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Options for `te max`.
#[derive(Debug, Args, Clone)]
pub struct MaxArgs {
    #[command(flatten)]
    pub coefficient: CoefficientArgs,
}

/// Options for `te curves`.
#[derive(Debug, Args, Clone)]
pub struct CurvesArgs {
    #[command(flatten)]
    pub coefficient: CoefficientArgs,

    #[command(flatten)]
    pub output: CurveOutputArgs,
}

/// Options for plotting a saved curve.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Curve JSON file produced by `te run --export-json`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 24)]
    pub height: usize,
}

/// Parse a decimal number, accepting `,` as the decimal separator (`0,60`).
pub fn parse_decimal(s: &str) -> Result<f64, String> {
    let normalized = s.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .map_err(|_| format!("'{s}' is not a number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_comma_is_accepted() {
        assert_eq!(parse_decimal("0,60"), Ok(0.6));
        assert_eq!(parse_decimal(" 40 "), Ok(40.0));
        assert!(parse_decimal("forty").is_err());
    }

    #[test]
    fn run_defaults() {
        let cli = Cli::try_parse_from(["te", "run"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.output.offsets, vec![10.0, 0.0, -10.0, -20.0]);
        assert_eq!(args.output.samples, DEFAULT_PLOT_SAMPLES);
        assert_eq!(args.target.coefficient.steps, DEFAULT_SEARCH_STEPS);
    }

    #[test]
    fn custom_offsets_allow_negatives() {
        let cli = Cli::try_parse_from(["te", "curves", "--cn", "12,5", "--offsets", "0,-5,5"]).unwrap();
        let Command::Curves(args) = cli.command else {
            panic!("expected curves");
        };
        assert_eq!(args.coefficient.cn, 12.5);
        assert_eq!(args.output.offsets, vec![0.0, -5.0, 5.0]);
    }
}
