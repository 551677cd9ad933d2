//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the normalized observation set (`Dataset`, `DatasetStats`)
//! - hyperparameter search inputs/outputs (`SearchBounds`, `Optimum`)
//! - fit diagnostics (`FitQuality`, `PointResidual`)
//! - the portable model file schema (`ModelFile`, `CurveGrid`)
//! - the CLI-derived run configuration (`FitConfig`)

pub mod types;

pub use types::*;
