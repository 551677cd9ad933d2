//! Mathematical core: knot vectors, the B-spline design matrix, and the
//! ridge-penalized least-squares solve.

pub mod basis;
pub mod knots;
pub mod ridge;

pub use basis::*;
pub use knots::*;
pub use ridge::*;
