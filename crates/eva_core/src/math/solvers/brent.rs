//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Brent's method root finder.
///
/// Combines bisection, secant, and inverse quadratic interpolation for
/// robust root finding without requiring derivatives. Guaranteed to
/// converge for continuous functions with a valid bracket.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Example
///
/// ```
/// use eva_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!((f(root)).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    /// Find a root of `f` in the bracket [a, b].
    ///
    /// Requires that `f(a)` and `f(b)` have opposite signs (a valid bracket).
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root to within the configured tolerance
    /// * `Err(SolverError::NoBracket)` - `f(a)` and `f(b)` have same sign
    /// * `Err(SolverError::NumericalInstability)` - `f` returned a non-finite value
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    ///
    /// # Example
    ///
    /// ```
    /// use eva_core::math::solvers::{BrentSolver, SolverConfig};
    ///
    /// let solver = BrentSolver::new(SolverConfig::default());
    /// let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
    /// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
    /// ```
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let mut a = a;
        let mut b = b;
        let mut fa = f(a);
        let mut fb = f(b);

        if !fa.is_finite() || !fb.is_finite() {
            return Err(SolverError::NumericalInstability(
                "non-finite function value at bracket endpoint".to_string(),
            ));
        }
        if fa == T::zero() {
            return Ok(a);
        }
        if fb == T::zero() {
            return Ok(b);
        }
        if fa.signum() == fb.signum() {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }

        let zero = T::zero();
        let one = T::one();
        let two = one + one;
        let three = two + one;
        let half = one / two;

        let mut c = b;
        let mut fc = fb;
        let mut d = b - a;
        let mut e = d;

        for _iteration in 0..self.config.max_iterations {
            // Keep the root bracketed between b and c
            if fb.signum() == fc.signum() {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            // b is always the best estimate
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol1 = two * T::epsilon() * b.abs() + half * self.config.tolerance;
            let m = half * (c - b);

            if m.abs() <= tol1 || fb == zero || fb.abs() < self.config.tolerance {
                return Ok(b);
            }

            if e.abs() >= tol1 && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q);
                if a == c {
                    // Secant step
                    p = two * m * s;
                    q = one - s;
                } else {
                    // Inverse quadratic interpolation
                    let qq = fa / fc;
                    let r = fb / fc;
                    p = s * (two * m * qq * (qq - r) - (b - a) * (r - one));
                    q = (qq - one) * (r - one) * (s - one);
                }
                if p > zero {
                    q = -q;
                }
                p = p.abs();

                let min1 = three * m * q - (tol1 * q).abs();
                let min2 = (e * q).abs();
                if two * p < min1.min(min2) {
                    e = d;
                    d = p / q;
                } else {
                    d = m;
                    e = d;
                }
            } else {
                d = m;
                e = d;
            }

            a = b;
            fa = fb;
            b = if d.abs() > tol1 {
                b + d
            } else if m > zero {
                b + tol1
            } else {
                b - tol1
            };
            fb = f(b);

            if !fb.is_finite() {
                return Err(SolverError::NumericalInstability(format!(
                    "non-finite function value at x = {}",
                    b.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Finds every root of `f` bracketed by consecutive points of `grid`.
    ///
    /// `grid` must be sorted ascending. Each cell whose endpoints have
    /// opposite signs is refined with [`find_root`](Self::find_root); grid
    /// points where `f` is exactly zero are returned as-is. Cells touching a
    /// non-finite value are skipped. Two roots inside one cell are missed.
    ///
    /// # Example
    ///
    /// ```
    /// use eva_core::math::grid::linspace;
    /// use eva_core::math::solvers::BrentSolver;
    ///
    /// let solver: BrentSolver<f64> = BrentSolver::with_defaults();
    /// let grid = linspace(0.0, 4.0, 65);
    /// let roots = solver
    ///     .find_roots_on_grid(|x| (x - 1.1) * (x - 3.3), &grid)
    ///     .unwrap();
    /// assert_eq!(roots.len(), 2);
    /// assert!((roots[0] - 1.1).abs() < 1e-9);
    /// assert!((roots[1] - 3.3).abs() < 1e-9);
    /// ```
    pub fn find_roots_on_grid<F>(&self, f: F, grid: &[T]) -> Result<Vec<T>, SolverError>
    where
        F: Fn(T) -> T,
    {
        let values: Vec<T> = grid.iter().map(|&x| f(x)).collect();

        let mut roots = Vec::new();
        for i in 0..grid.len().saturating_sub(1) {
            let (fa, fb) = (values[i], values[i + 1]);
            if !fa.is_finite() || !fb.is_finite() {
                continue;
            }
            if fa == T::zero() {
                roots.push(grid[i]);
            } else if fb != T::zero() && fa.signum() != fb.signum() {
                roots.push(self.find_root(&f, grid[i], grid[i + 1])?);
            }
        }
        if let (Some(&x), Some(&fx)) = (grid.last(), values.last()) {
            if fx == T::zero() {
                roots.push(x);
            }
        }
        Ok(roots)
    }
}
