//! Property-based tests for gap filling.
//!
//! Observations are generated as distinct day offsets from a base date with
//! integer-valued counts, so sums compare exactly.

use eva_core::types::{Date, DailySeries, DuplicatePolicy, Observation};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn base_date() -> Date {
    Date::from_ymd(2015, 1, 1).unwrap()
}

/// Sparse observations: distinct offsets within ~3 years, counts 0..500.
fn observations_strategy() -> impl Strategy<Value = Vec<Observation>> {
    prop::collection::btree_map(0i64..1100, 0u32..500, 1..60).prop_map(|by_offset| {
        let mut obs: Vec<Observation> = by_offset
            .into_iter()
            .map(|(offset, count)| Observation::new(base_date().add_days(offset), count as f64))
            .collect();
        // Input order is arbitrary
        obs.reverse();
        obs
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_one_entry_per_calendar_day(obs in observations_strategy()) {
        let series = DailySeries::from_observations(&obs, DuplicatePolicy::Reject).unwrap();

        let min = obs.iter().map(|o| o.date).min().unwrap();
        let max = obs.iter().map(|o| o.date).max().unwrap();

        prop_assert_eq!(series.start(), min);
        prop_assert_eq!(series.end(), max);
        prop_assert_eq!(series.len() as i64, (max - min) + 1);

        let dates: Vec<Date> = series.iter().map(|(d, _)| d).collect();
        for pair in dates.windows(2) {
            prop_assert_eq!(pair[1] - pair[0], 1);
        }
    }

    #[test]
    fn test_sum_preserved(obs in observations_strategy()) {
        let series = DailySeries::from_observations(&obs, DuplicatePolicy::Reject).unwrap();
        let original: f64 = obs.iter().map(|o| o.value).sum();
        prop_assert_eq!(series.total(), original);
    }

    #[test]
    fn test_original_values_kept_and_gaps_zero(obs in observations_strategy()) {
        let series = DailySeries::from_observations(&obs, DuplicatePolicy::Reject).unwrap();
        let lookup: BTreeMap<Date, f64> = obs.iter().map(|o| (o.date, o.value)).collect();

        for (date, value) in series.iter() {
            let expected = lookup.get(&date).copied().unwrap_or(0.0);
            prop_assert_eq!(value, expected);
        }
    }

    #[test]
    fn test_summing_duplicates_preserves_total(
        obs in observations_strategy(),
        repeat in 0usize..10,
    ) {
        let mut doubled = obs.clone();
        doubled.extend(obs.iter().take(repeat).copied());

        let series = DailySeries::from_observations(&doubled, DuplicatePolicy::Sum).unwrap();
        let original: f64 = doubled.iter().map(|o| o.value).sum();
        prop_assert_eq!(series.total(), original);
    }
}
