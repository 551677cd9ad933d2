//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads or generates the dataset
//! - runs the GCV search + final fit
//! - prints reports/plots
//! - writes optional exports

use std::fs::File;
use std::io::Write as _;

use clap::Parser;

use crate::cli::{Cli, Command, FitArgs, PlotArgs, PredictArgs, SampleArgs};
use crate::domain::{CurveGrid, FitConfig, SearchBounds};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `psfit` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Predict(args) => handle_predict(args),
        Command::Sample(args) => handle_sample(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_fit(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.stats, &config.bounds, &run.optimum, config.degree)
    );

    let worst = crate::report::rank_worst(&run.residuals, config.top_n);
    println!("{}", crate::report::format_worst_table(&worst));

    if config.plot {
        let grid = crate::io::build_grid(&run.model, run.stats.t_min, run.stats.t_max, 201)?;
        let plot = crate::plot::render_ascii_plot(
            &run.residuals,
            &grid,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::write_results_csv(path, &run.residuals)?;
    }
    if let Some(path) = &config.export_model {
        crate::io::write_model_json(path, &run.model, Some(&run.optimum.quality), &run.stats)?;
    }

    Ok(())
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let file = crate::io::read_model_json(&args.model)?;

    let grid = if args.at.is_empty() {
        // Reuse the stored grid range, re-evaluated at the requested density.
        let (t_min, t_max) = grid_range(&file.grid)?;
        crate::io::build_grid(&file.model, t_min, t_max, args.grid)?
    } else {
        let y = file.model.predict(&args.at)?;
        CurveGrid { t: args.at, y }
    };

    match &args.output {
        Some(path) => crate::io::write_grid_csv(path, &grid),
        None => {
            let mut stdout = std::io::stdout().lock();
            crate::io::write_grid(&mut stdout, &grid)
        }
    }
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let dataset = crate::data::generate_sample(&crate::data::SampleConfig {
        count: args.count,
        seed: args.seed,
        t_min: args.t_min,
        t_max: args.t_max,
        noise_sigma: args.noise,
    })?;

    let mut file = File::create(&args.output).map_err(|e| {
        AppError::io(format!(
            "Failed to create sample CSV '{}': {e}",
            args.output.display()
        ))
    })?;
    writeln!(file, "t,y_observed")
        .map_err(|e| AppError::io(format!("Failed to write sample CSV: {e}")))?;
    for (&t, &y) in dataset.t.iter().zip(dataset.y.iter()) {
        writeln!(file, "{t:.10},{y:.10}")
            .map_err(|e| AppError::io(format!("Failed to write sample CSV: {e}")))?;
    }

    println!(
        "Wrote {} points to '{}'.",
        dataset.len(),
        args.output.display()
    );
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let file = crate::io::read_model_json(&args.model)?;
    let plot = crate::plot::render_ascii_plot_from_grid(&file.grid, args.width, args.height);
    println!("{plot}");

    if let Some(quality) = &file.quality {
        println!("{}", crate::report::format_quality(quality));
    }
    Ok(())
}

fn grid_range(grid: &CurveGrid) -> Result<(f64, f64), AppError> {
    let first = grid.t.first().copied();
    let last = grid.t.last().copied();
    match (first, last) {
        (Some(a), Some(b)) if a.is_finite() && b.is_finite() => Ok((a, b)),
        _ => Err(AppError::validation("Model JSON has an empty fitted grid.")),
    }
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        input: args.input.clone(),
        degree: args.degree,
        bounds: SearchBounds {
            lambda_min: args.lambda_min,
            lambda_max: args.lambda_max,
            basis_min: args.basis_min,
            basis_max: args.basis_max,
        },
        lambda: args.lambda,
        basis_count: args.basis_count,
        sample_count: args.sample_count,
        sample_seed: args.seed,
        noise_sigma: args.noise,
        t_min: args.t_min,
        t_max: args.t_max,
        top_n: args.top,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
        export_model: args.export_model.clone(),
    }
}
