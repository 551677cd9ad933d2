//! Command-line parsing for the penalized-spline fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "psfit", version, about = "Penalized B-spline curve fitter (GCV-tuned)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a curve to a CSV (or a synthetic sample), print diagnostics, and
    /// optionally plot/export.
    Fit(FitArgs),
    /// Predict from a previously exported model JSON.
    Predict(PredictArgs),
    /// Generate a synthetic dataset CSV.
    Sample(SampleArgs),
    /// Plot a previously exported model JSON.
    Plot(PlotArgs),
}

/// Options for fitting.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Input CSV with `t` and `y_observed` columns. Without it, a synthetic
    /// sample is generated (see the sample flags below).
    #[arg(short = 'i', long)]
    pub input: Option<PathBuf>,

    /// Spline degree (fixed for the lifetime of the model).
    #[arg(short = 'd', long, default_value_t = 3)]
    pub degree: usize,

    /// Fix the regularization strength instead of searching for it.
    /// Requires --basis-count.
    #[arg(long)]
    pub lambda: Option<f64>,

    /// Fix the basis count instead of searching for it. Requires --lambda.
    #[arg(long)]
    pub basis_count: Option<usize>,

    /// Minimum λ for the GCV search.
    #[arg(long, default_value_t = 0.0)]
    pub lambda_min: f64,

    /// Maximum λ for the GCV search.
    #[arg(long, default_value_t = 1.0)]
    pub lambda_max: f64,

    /// Minimum basis count for the GCV search.
    #[arg(long, default_value_t = 5)]
    pub basis_min: usize,

    /// Maximum basis count for the GCV search.
    #[arg(long, default_value_t = 15)]
    pub basis_max: usize,

    /// Number of synthetic points when no input CSV is given.
    #[arg(short = 'n', long, default_value_t = 100)]
    pub sample_count: usize,

    /// Random seed for synthetic sample generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Noise standard deviation for synthetic samples.
    #[arg(long, default_value_t = 0.3)]
    pub noise: f64,

    /// Minimum t for synthetic samples.
    #[arg(long, default_value_t = 0.0)]
    pub t_min: f64,

    /// Maximum t for synthetic samples.
    #[arg(long, default_value_t = 10.0)]
    pub t_max: f64,

    /// Show the top-N worst-fit points.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export per-point results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the fitted model (state + grid) to JSON.
    #[arg(long = "export-model")]
    pub export_model: Option<PathBuf>,
}

/// Options for predicting from a saved model.
#[derive(Debug, Parser)]
pub struct PredictArgs {
    /// Model JSON file produced by `psfit fit --export-model`.
    #[arg(short = 'm', long, value_name = "JSON")]
    pub model: PathBuf,

    /// Explicit query points (comma-separated), e.g. `--at 0.5,1.25,7`.
    #[arg(long, value_delimiter = ',')]
    pub at: Vec<f64>,

    /// Number of evenly spaced grid points when `--at` is not given.
    #[arg(long, default_value_t = 101)]
    pub grid: usize,

    /// Write the prediction CSV here instead of stdout.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Options for generating a synthetic dataset CSV.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(short = 'o', long, default_value = "simulated_data.csv")]
    pub output: PathBuf,

    /// Number of points.
    #[arg(short = 'n', long, default_value_t = 100)]
    pub count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Noise standard deviation.
    #[arg(long, default_value_t = 0.3)]
    pub noise: f64,

    /// Minimum t.
    #[arg(long, default_value_t = 0.0)]
    pub t_min: f64,

    /// Maximum t.
    #[arg(long, default_value_t = 10.0)]
    pub t_max: f64,
}

/// Options for plotting a saved model.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Model JSON file produced by `psfit fit --export-model`.
    #[arg(short = 'm', long, value_name = "JSON")]
    pub model: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
