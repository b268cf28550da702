//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - checks the target against the maximum TE
//! - prints the verdict, curve table, commentary and plot
//! - writes optional exports

use std::io;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{CheckArgs, Cli, Command, CoefficientArgs, CurveOutputArgs, CurvesArgs, MaxArgs, PlotArgs, RunArgs};
use crate::domain::{CurveSet, FeasibilityResult, GroundCoefficient, RunConfig, TargetEfficiency};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `te` binary.
pub fn run() -> Result<(), AppError> {
    // `TE_*` defaults may live in a local `.env`; a missing file is fine.
    dotenvy::dotenv().ok();

    // We want `te` and `te -t 0.6 -c 40` to behave like `te run ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    init_logging(cli.verbose);

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Check(args) => handle_check(args),
        Command::Max(args) => handle_max(args),
        Command::Curves(args) => handle_curves(args),
        Command::Plot(args) => handle_plot(args),
        Command::Formulas => {
            println!("{}", crate::report::format_formulas());
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args)?;
    let out = pipeline::run(&config)?;

    println!("{}", crate::report::format_feasibility(&out.feasibility));

    let Some(curve_set) = &out.curve_set else {
        // Locked: only the warning is shown, nothing is exported.
        return Ok(());
    };

    println!();
    print_curves(curve_set, &out.commentary, config.plot, config.plot_width, config.plot_height);
    write_exports(
        curve_set,
        Some(&out.feasibility),
        &out.commentary,
        &ExportPaths::from_config(&config),
    )
}

fn handle_check(args: CheckArgs) -> Result<(), AppError> {
    let target = TargetEfficiency::new(args.target.target)?;
    let cn = GroundCoefficient::new(args.target.coefficient.cn)?;
    let result =
        crate::search::check_feasibility_with_steps(target, cn, args.target.coefficient.steps)?;

    println!("{}", crate::report::format_feasibility(&result));
    if result.achievable {
        Ok(())
    } else {
        Err(AppError::new(3, unreachable_message(&result)))
    }
}

fn handle_max(args: MaxArgs) -> Result<(), AppError> {
    let cn = coefficient_from_args(&args.coefficient)?;
    let maximum = crate::search::find_maximum(cn, args.coefficient.steps)?;
    println!(
        "{}",
        crate::report::format_maximum(cn, &maximum, args.coefficient.steps)
    );
    Ok(())
}

fn handle_curves(args: CurvesArgs) -> Result<(), AppError> {
    let cn = coefficient_from_args(&args.coefficient)?;
    let (curve_set, commentary) = pipeline::build_curves(
        cn,
        &args.output.offsets,
        args.output.samples,
        args.coefficient.steps,
    )?;

    print_curves(
        &curve_set,
        &commentary,
        plot_enabled(&args.output),
        args.output.width,
        args.output.height,
    );
    write_exports(&curve_set, None, &commentary, &ExportPaths::from_args(&args.output))
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::read_curve_json(&args.curve)?;
    debug!(path = %args.curve.display(), curves = curve.curve_set.len(), "loaded curve JSON");

    if let Some(result) = &curve.feasibility {
        println!("{}", crate::report::format_feasibility(result));
        println!();
    }
    println!(
        "{}",
        crate::plot::render_ascii_plot(&curve.curve_set, args.width, args.height)
    );
    Ok(())
}

fn print_curves(set: &CurveSet, commentary: &[String], plot: bool, width: usize, height: usize) {
    println!("{}", crate::report::format_curve_table(set));
    println!("{}", crate::report::format_commentary(commentary));

    if plot {
        println!("{}", crate::plot::render_ascii_plot(set, width, height));
    }
}

struct ExportPaths<'a> {
    json: Option<&'a std::path::Path>,
    csv: Option<&'a std::path::Path>,
    svg: Option<&'a std::path::Path>,
}

impl<'a> ExportPaths<'a> {
    fn from_config(config: &'a RunConfig) -> Self {
        Self {
            json: config.export_json.as_deref(),
            csv: config.export_csv.as_deref(),
            svg: config.export_svg.as_deref(),
        }
    }

    fn from_args(args: &'a CurveOutputArgs) -> Self {
        Self {
            json: args.export_json.as_deref(),
            csv: args.export_csv.as_deref(),
            svg: args.svg.as_deref(),
        }
    }
}

fn write_exports(
    set: &CurveSet,
    feasibility: Option<&FeasibilityResult>,
    commentary: &[String],
    paths: &ExportPaths<'_>,
) -> Result<(), AppError> {
    if let Some(path) = paths.json {
        let file = crate::io::curve_file(set, feasibility, commentary);
        crate::io::write_curve_json(path, &file)?;
    }
    if let Some(path) = paths.csv {
        crate::io::write_samples_csv(path, set)?;
    }
    if let Some(path) = paths.svg {
        crate::plot::write_svg_chart(path, set)?;
    }
    Ok(())
}

fn unreachable_message(result: &FeasibilityResult) -> String {
    match result.te_max {
        Some(te_max) => format!(
            "Target TE {:.3} is not reachable with Cn = {} (TEmax ≈ {te_max:.3}).",
            result.target.get(),
            result.coefficient
        ),
        None => format!(
            "Target TE {:.3} is not reachable: Cn = {} has no usable optimum.",
            result.target.get(),
            result.coefficient
        ),
    }
}

fn coefficient_from_args(args: &CoefficientArgs) -> Result<GroundCoefficient, AppError> {
    Ok(GroundCoefficient::new(args.cn)?)
}

fn plot_enabled(args: &CurveOutputArgs) -> bool {
    args.plot && !args.no_plot
}

/// Validate CLI values into a pipeline configuration.
pub fn run_config_from_args(args: &RunArgs) -> Result<RunConfig, AppError> {
    Ok(RunConfig {
        target: TargetEfficiency::new(args.target.target)?,
        coefficient: coefficient_from_args(&args.target.coefficient)?,
        search_steps: args.target.coefficient.steps,
        plot_samples: args.output.samples,
        offsets: args.output.offsets.clone(),
        plot: plot_enabled(&args.output),
        plot_width: args.output.width,
        plot_height: args.output.height,
        export_json: args.output.export_json.clone(),
        export_csv: args.output.export_csv.clone(),
        export_svg: args.output.svg.clone(),
    })
}

/// Rewrite argv so `te` defaults to `te run`.
///
/// Rules:
/// - `te`                      -> `te run`
/// - `te -t 0.6 -c 40 ...`     -> `te run -t 0.6 -c 40 ...`
/// - `te --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    // If the first token is a flag, treat it as "run flags".
    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
    }

    argv
}
