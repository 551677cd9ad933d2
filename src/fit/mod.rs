//! Model scoring and hyperparameter search.
//!
//! Responsibilities:
//!
//! - score a fitted model's generalization quality (GCV)
//! - search the (λ, basis count) box for the GCV minimizer

pub mod gcv;
pub mod search;

pub use gcv::*;
pub use search::*;
