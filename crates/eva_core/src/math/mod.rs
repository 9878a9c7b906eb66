//! Numerical building blocks.
//!
//! - `stats`: Descriptive statistics and empirical quantiles
//! - `grid`: Linear and logarithmic evaluation grids
//! - `solvers`: Bracketing root finders

pub mod grid;
pub mod solvers;
pub mod stats;
