//! Shared "fit pipeline" logic used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest (or sample) -> hyperparameter search -> final fit -> residuals
//!
//! The CLI can then focus on presentation (printing and exports).

use crate::data::{SampleConfig, generate_sample};
use crate::domain::{Dataset, DatasetStats, FitConfig, Optimum, PointResidual};
use crate::error::AppError;
use crate::io::ingest::read_dataset_csv;
use crate::model::SplineModel;

/// All computed outputs of a single `psfit fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: Dataset,
    pub stats: DatasetStats,
    pub optimum: Optimum,
    pub model: SplineModel,
    pub residuals: Vec<PointResidual>,
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    // 1) Load observations from CSV, or generate the synthetic sample.
    let dataset = match &config.input {
        Some(path) => read_dataset_csv(path)?.dataset,
        None => generate_sample(&SampleConfig {
            count: config.sample_count,
            seed: config.sample_seed,
            t_min: config.t_min,
            t_max: config.t_max,
            noise_sigma: config.noise_sigma,
        })?,
    };
    let stats = dataset.stats();

    let mut model = SplineModel::new(config.degree);

    // 2) Resolve hyperparameters: explicit (λ, c) skips the search entirely;
    //    otherwise minimize GCV over the configured box.
    let optimum = match (config.lambda, config.basis_count) {
        (Some(lambda), Some(basis_count)) => {
            model.fit(&dataset.t, &dataset.y, lambda, basis_count)?;
            let quality = model.gcv(&dataset.t, &dataset.y)?;
            Optimum {
                lambda,
                basis_count,
                quality,
            }
        }
        (None, None) => {
            let optimum = model.optimize_parameters(&dataset.t, &dataset.y, &config.bounds)?;
            // 3) One final fit at the optimum; this is the state we keep.
            model.fit(&dataset.t, &dataset.y, optimum.lambda, optimum.basis_count)?;
            optimum
        }
        _ => {
            return Err(AppError::validation(
                "--lambda and --basis-count must be given together (or neither).",
            ));
        }
    };

    // 4) Residuals for reporting and exports.
    let residuals = crate::report::compute_residuals(&dataset, &model)?;

    Ok(RunOutput {
        dataset,
        stats,
        optimum,
        model,
        residuals,
    })
}
