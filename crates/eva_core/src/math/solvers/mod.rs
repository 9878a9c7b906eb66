//! Root-finding solvers.
//!
//! ## Available Solvers
//!
//! - [`BrentSolver`]: Robust bracketing method without derivative requirement,
//!   plus a grid scan that brackets and refines every sign change on an interval
//!
//! ## Configuration
//!
//! [`SolverConfig`] holds the tolerance (default 1e-10) and iteration budget
//! (default 100), with presets for likelihood roots and quantile inversion.
//!
//! ## Examples
//!
//! ```
//! use eva_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! let solver = BrentSolver::new(SolverConfig::default());
//!
//! // Solve x² - 2 = 0 (find √2)
//! let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod brent;
mod config;

// Re-export public types at module level
pub use brent::BrentSolver;
pub use config::SolverConfig;
