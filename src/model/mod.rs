//! The spline regression model facade.

pub mod spline;

pub use spline::*;
