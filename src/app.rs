//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - runs the bilinear fit
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, FitArgs, PlotArgs, SynthArgs};
use crate::data::{SampleConfig, generate_sample, write_dataset, write_threshold};
use crate::domain::FitConfig;
use crate::error::AppError;
use crate::plot::PlotStyle;

pub mod pipeline;

/// Entry point for the `bylin` binary.
pub fn run() -> Result<(), AppError> {
    // A missing `.env` is the normal case.
    dotenvy::dotenv().ok();

    // `bylin` and `bylin --dataset d.txt` behave like `bylin fit ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    init_logging(cli.verbose);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Plot(args) => handle_plot(args),
        Command::Synth(args) => handle_synth(args),
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args)?;
    let run = pipeline::run_fit(&config)?;

    println!("{}", crate::report::format_run_summary(&run, &config));

    if config.show_points {
        println!("{}", crate::report::format_points_table(&run));
    }

    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.dataset.samples,
            &run.grid,
            run.threshold,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    if let Some(path) = &config.svg_path {
        crate::plot::render_svg(path, &run.dataset.samples, &run.grid, &config.style)?;
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.dataset.samples, &run.evaluation, run.threshold)?;
    }
    if let Some(path) = &config.export_fit {
        let fit = crate::io::curve::build_fit_file(
            &run.coefficients,
            run.quality,
            run.method,
            run.threshold,
            &run.stats,
        );
        crate::io::curve::write_fit_json(path, &fit)?;
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let fit = crate::io::curve::read_fit_json(&args.fit)?;
    let plot = crate::plot::render_ascii_plot_from_fit_file(&fit, args.width, args.height);
    println!("{plot}");
    Ok(())
}

fn handle_synth(args: SynthArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        n: args.count,
        x_min: args.x_min,
        x_max: args.x_max,
        xth: args.xth,
        a1: args.a1,
        b1: args.b1,
        a2: args.a2,
        noise: args.noise,
        seed: args.seed,
    };
    let samples = generate_sample(&config)?;

    std::fs::create_dir_all(&args.out_dir).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create output directory '{}': {e}", args.out_dir.display()),
        )
    })?;
    let dataset_path = args.out_dir.join("dataset.txt");
    let threshold_path = args.out_dir.join("threshold.txt");
    write_dataset(&dataset_path, &samples)?;
    write_threshold(&threshold_path, config.xth)?;

    println!(
        "Wrote {} samples to {} and xth={} to {}",
        samples.len(),
        dataset_path.display(),
        config.xth,
        threshold_path.display()
    );
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> Result<FitConfig, AppError> {
    let style = match &args.style {
        Some(path) => PlotStyle::from_json_file(path)?,
        None => PlotStyle::default(),
    };

    Ok(FitConfig {
        dataset_path: args.dataset.clone(),
        threshold_path: args.threshold.clone(),
        method: args.method,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        show_points: args.points,
        svg_path: args.svg.clone(),
        style,
        export_results: args.export.clone(),
        export_fit: args.export_fit.clone(),
    })
}

/// Rewrite argv so `bylin` defaults to `bylin fit`.
///
/// Rules:
/// - `bylin`                        -> `bylin fit`
/// - `bylin --dataset d.txt ...`    -> `bylin fit --dataset d.txt ...`
/// - `bylin --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("fit".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "plot" | "synth");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "fit flags".
    if arg1.starts_with('-') {
        argv.insert(1, "fit".to_string());
        return argv;
    }

    argv
}
