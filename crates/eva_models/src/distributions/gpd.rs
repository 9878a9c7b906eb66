//! Generalized Pareto Distribution (GPD).
//!
//! For location μ, scale σ > 0 and shape ξ, with `z = (x − μ)/σ`:
//!
//! - `F(x) = 1 − (1 + ξz)^(−1/ξ)` for ξ ≠ 0
//! - `F(x) = 1 − exp(−z)` for ξ = 0
//!
//! Support is `x ≥ μ`, additionally bounded above by `μ − σ/ξ` when ξ < 0.
//!
//! All functions are generic over `T: Float`. Expressions are written with
//! `ln_1p` and `exp_m1` so they stay accurate as ξ approaches 0.

use num_traits::Float;
use std::fmt;

/// Shapes with `|ξ|` below this are reported as exponential tails.
pub const SHAPE_TOLERANCE: f64 = 1e-9;

/// Tail classification by the sign of the shape parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TailKind {
    /// ξ > 0: polynomially decaying (Fréchet-type) tail.
    Heavy,
    /// ξ = 0: exponentially decaying (Gumbel-type) tail.
    Exponential,
    /// ξ < 0: finite upper endpoint (Weibull-type).
    Bounded,
}

impl TailKind {
    /// Classifies a shape parameter.
    pub fn from_shape(shape: f64) -> Self {
        if shape.abs() < SHAPE_TOLERANCE {
            TailKind::Exponential
        } else if shape > 0.0 {
            TailKind::Heavy
        } else {
            TailKind::Bounded
        }
    }

    /// One-line description for reports.
    pub fn description(&self) -> &'static str {
        match self {
            TailKind::Heavy => "heavy-tailed (Frechet-type): no upper bound, polynomial decay",
            TailKind::Exponential => "exponential tail (Gumbel-type): light, unbounded",
            TailKind::Bounded => "bounded tail (Weibull-type): finite upper endpoint",
        }
    }
}

impl fmt::Display for TailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TailKind::Heavy => "heavy",
            TailKind::Exponential => "exponential",
            TailKind::Bounded => "bounded",
        };
        write!(f, "{}", name)
    }
}

/// Generalized Pareto Distribution with location, scale and shape.
///
/// # Examples
///
/// ```
/// use eva_models::distributions::GeneralizedPareto;
///
/// let gpd = GeneralizedPareto::<f64>::new(160.0, 50.0, 0.2).unwrap();
///
/// // Inverse survival function at the median
/// let median = gpd.isf(0.5);
/// assert!((gpd.cdf(median) - 0.5).abs() < 1e-12);
/// assert!(gpd.cdf(150.0) == 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneralizedPareto<T: Float> {
    location: T,
    scale: T,
    shape: T,
}

impl<T: Float> GeneralizedPareto<T> {
    /// Creates a GPD; `None` unless `scale > 0` and all parameters are finite.
    pub fn new(location: T, scale: T, shape: T) -> Option<Self> {
        let finite = location.is_finite() && scale.is_finite() && shape.is_finite();
        if finite && scale > T::zero() {
            Some(Self {
                location,
                scale,
                shape,
            })
        } else {
            None
        }
    }

    /// Location μ (the threshold).
    #[inline]
    pub fn location(&self) -> T {
        self.location
    }

    /// Scale σ.
    #[inline]
    pub fn scale(&self) -> T {
        self.scale
    }

    /// Shape ξ.
    #[inline]
    pub fn shape(&self) -> T {
        self.shape
    }

    /// Finite upper end of the support when ξ < 0.
    pub fn upper_bound(&self) -> Option<T> {
        if self.shape < T::zero() {
            Some(self.location - self.scale / self.shape)
        } else {
            None
        }
    }

    /// `ln(1 + ξz)/ξ`, continuous at ξ = 0 where it equals `z`.
    ///
    /// Only meaningful where `1 + ξz > 0`.
    #[inline]
    fn log_term(&self, z: T) -> T {
        if self.shape == T::zero() {
            z
        } else {
            (self.shape * z).ln_1p() / self.shape
        }
    }

    /// Standardised excess, or `None` outside the support.
    #[inline]
    fn standardise(&self, x: T) -> Option<T> {
        let z = (x - self.location) / self.scale;
        if z < T::zero() || T::one() + self.shape * z <= T::zero() {
            None
        } else {
            Some(z)
        }
    }

    /// Survival function `P(X > x)`.
    pub fn sf(&self, x: T) -> T {
        let z = (x - self.location) / self.scale;
        if z <= T::zero() {
            return T::one();
        }
        if T::one() + self.shape * z <= T::zero() {
            return T::zero();
        }
        (-self.log_term(z)).exp()
    }

    /// Cumulative distribution function `P(X ≤ x)`.
    pub fn cdf(&self, x: T) -> T {
        let z = (x - self.location) / self.scale;
        if z <= T::zero() {
            return T::zero();
        }
        if T::one() + self.shape * z <= T::zero() {
            return T::one();
        }
        -(-self.log_term(z)).exp_m1()
    }

    /// Probability density function.
    pub fn pdf(&self, x: T) -> T {
        let ln = self.ln_pdf(x);
        if ln == T::neg_infinity() {
            T::zero()
        } else {
            ln.exp()
        }
    }

    /// Natural log of the density; `-inf` outside the support.
    ///
    /// `ln f(x) = −ln σ − (1 + ξ)·ln(1 + ξz)/ξ`
    pub fn ln_pdf(&self, x: T) -> T {
        match self.standardise(x) {
            Some(z) => -self.scale.ln() - (T::one() + self.shape) * self.log_term(z),
            None => T::neg_infinity(),
        }
    }

    /// Inverse survival function: the `x` with `P(X > x) = p`.
    ///
    /// `μ + σ·(p^(−ξ) − 1)/ξ`, or `μ − σ·ln p` when ξ = 0. Returns `NaN`
    /// for `p` outside `(0, 1]`.
    pub fn isf(&self, p: T) -> T {
        if !(p > T::zero() && p <= T::one()) {
            return T::nan();
        }
        let ln_p = p.ln();
        let factor = if self.shape == T::zero() {
            -ln_p
        } else {
            (-self.shape * ln_p).exp_m1() / self.shape
        };
        self.location + self.scale * factor
    }

    /// Quantile function: the `x` with `P(X ≤ x) = q`.
    pub fn ppf(&self, q: T) -> T {
        self.isf(T::one() - q)
    }

    /// Mean `μ + σ/(1 − ξ)`; `None` when ξ ≥ 1.
    pub fn mean(&self) -> Option<T> {
        if self.shape < T::one() {
            Some(self.location + self.scale / (T::one() - self.shape))
        } else {
            None
        }
    }

    /// Sum of log-densities over `data`; `-inf` if any point is outside the support.
    pub fn log_likelihood(&self, data: &[T]) -> T {
        data.iter()
            .fold(T::zero(), |acc, &x| acc + self.ln_pdf(x))
    }
}

impl GeneralizedPareto<f64> {
    /// Tail classification of this distribution.
    pub fn tail_kind(&self) -> TailKind {
        TailKind::from_shape(self.shape)
    }
}
