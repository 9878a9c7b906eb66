//! Evaluation grids.

use num_traits::Float;

/// `n` evenly spaced points from `lo` to `hi` inclusive.
///
/// Returns `[lo]` for `n == 1` and an empty vector for `n == 0`.
///
/// # Examples
///
/// ```
/// use eva_core::math::grid::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
pub fn linspace<T: Float>(lo: T, hi: T, n: usize) -> Vec<T> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let steps = T::from(n - 1).unwrap_or_else(T::one);
            let step = (hi - lo) / steps;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        hi
                    } else {
                        lo + step * T::from(i).unwrap_or_else(T::zero)
                    }
                })
                .collect()
        }
    }
}

/// `n` points from `lo` to `hi` inclusive, evenly spaced on a log scale.
///
/// Both endpoints must be positive; otherwise the result is empty.
///
/// # Examples
///
/// ```
/// use eva_core::math::grid::geomspace;
///
/// let xs = geomspace(1.0_f64, 1000.0, 4);
/// assert!((xs[1] - 10.0).abs() < 1e-9);
/// assert!((xs[2] - 100.0).abs() < 1e-9);
/// ```
pub fn geomspace<T: Float>(lo: T, hi: T, n: usize) -> Vec<T> {
    if lo <= T::zero() || hi <= T::zero() {
        return Vec::new();
    }
    let mut points: Vec<T> = linspace(lo.ln(), hi.ln(), n)
        .into_iter()
        .map(Float::exp)
        .collect();
    // Pin the endpoints exactly
    if let Some(first) = points.first_mut() {
        *first = lo;
    }
    if n > 1 {
        if let Some(last) = points.last_mut() {
            *last = hi;
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_edge_sizes() {
        assert_eq!(linspace(2.0_f64, 3.0, 1), vec![2.0]);
        assert!(linspace(2.0_f64, 3.0, 0).is_empty());
    }

    #[test]
    fn test_linspace_descending() {
        assert_eq!(linspace(1.0_f64, -1.0, 3), vec![1.0, 0.0, -1.0]);
    }

    #[test]
    fn test_geomspace_endpoints_exact() {
        let xs = geomspace(1e-9_f64, 3.7e5, 50);
        assert_eq!(xs.len(), 50);
        assert_eq!(xs[0], 1e-9);
        assert_eq!(xs[49], 3.7e5);
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_geomspace_rejects_non_positive() {
        assert!(geomspace(0.0_f64, 1.0, 10).is_empty());
        assert!(geomspace(-1.0_f64, 1.0, 10).is_empty());
    }
}
