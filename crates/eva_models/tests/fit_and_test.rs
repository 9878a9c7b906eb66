//! Fit-then-test workflow across the public API.

use approx::assert_relative_eq;
use eva_models::calibration::{CalibrationError, GpdMaximumLikelihood, KolmogorovSmirnov};
use eva_models::distributions::{GeneralizedPareto, TailKind};
use proptest::prelude::*;

fn mid_quantiles(gpd: &GeneralizedPareto<f64>, n: usize) -> Vec<f64> {
    (0..n).map(|i| gpd.ppf((i as f64 + 0.5) / n as f64)).collect()
}

#[test]
fn test_fitted_model_passes_ks_on_its_own_quantiles() {
    let truth = GeneralizedPareto::new(160.0, 50.0, 0.2).unwrap();
    let sample = mid_quantiles(&truth, 400);

    let fit = GpdMaximumLikelihood::default().fit(160.0, &sample).unwrap();
    let params = fit.params();
    assert_relative_eq!(params.shape, 0.2, epsilon = 0.05);
    assert_relative_eq!(params.scale, 50.0, max_relative = 0.05);
    assert_eq!(params.tail_kind(), TailKind::Heavy);

    let result = KolmogorovSmirnov::default()
        .test(&sample, &params.distribution().unwrap())
        .unwrap();
    assert!(result.follows_distribution());
    assert!(result.p_value > 0.5);
}

#[test]
fn test_bounded_quantiles_classified_bounded() {
    let truth = GeneralizedPareto::new(0.0, 10.0, -0.3).unwrap();
    let fit = GpdMaximumLikelihood::default()
        .fit(0.0, &mid_quantiles(&truth, 400))
        .unwrap();
    assert_eq!(fit.params().tail_kind(), TailKind::Bounded);
}

#[test]
fn test_single_extreme_cannot_be_fitted() {
    let err = GpdMaximumLikelihood::default().fit(160.0, &[200.0]).unwrap_err();
    assert_eq!(err, CalibrationError::insufficient_data(2, 1));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_fit_always_has_positive_scale(
        values in prop::collection::vec(160.5f64..2000.0, 2..40)
    ) {
        let fit = GpdMaximumLikelihood::default().fit(160.0, &values).unwrap();
        prop_assert!(fit.params().scale > 0.0);
        prop_assert!(fit.params().scale.is_finite());
        prop_assert!(fit.diagnostics().log_likelihood.is_finite());
        // Never worse than the exponential candidate
        let n = values.len() as f64;
        let mean = values.iter().map(|v| v - 160.0).sum::<f64>() / n;
        prop_assert!(fit.diagnostics().log_likelihood >= -n * (1.0 + mean.ln()) - 1e-9);
    }
}
