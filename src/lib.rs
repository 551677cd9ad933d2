//! Penalized B-spline curve fitting with GCV-tuned hyperparameters.
//!
//! The binary (`psfit`) is a thin wrapper around [`app::run`]; everything
//! else lives in the library so the fitting engine can be tested directly:
//!
//! - [`math`]: knot placement, the B-spline design matrix, the ridge solve
//! - [`fit`]: GCV scoring and the (c, λ) hyperparameter search
//! - [`model`]: the fit/predict/save/load model type
//! - [`data`], [`io`], [`report`], [`plot`]: the surrounding tooling

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod model;
pub mod plot;
pub mod report;
