//! Property-based and randomized tests for region masking and record computation.

use meshstats_engine::{
    ComputeError, SizeMismatchError, StatisticsConfig, StatisticsEngine, mask_values,
};
use meshstats_stats::percentiles::PercentileMethod;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Values paired with a mask of the same length; mask entries are mostly
/// 0.0 or 1.0 with some near-misses that must be excluded.
fn arb_values_and_mask() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    prop::collection::vec(
        (
            -1000.0f64..1000.0,
            prop_oneof![Just(0.0), Just(1.0), Just(0.999_999), Just(2.0)],
        ),
        0..200,
    )
    .prop_map(|pairs| pairs.into_iter().unzip())
}

// ---------------------------------------------------------------------------
// Masking
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn masking_keeps_exactly_included_points((values, mask) in arb_values_and_mask()) {
        let masked = mask_values(&values, Some(&mask)).unwrap();
        let expected = values
            .iter()
            .zip(&mask)
            .filter(|&(_, &m)| m == 1.0)
            .map(|(&v, _)| v)
            .collect::<Vec<_>>();
        prop_assert_eq!(masked.len(), mask.iter().filter(|&&m| m == 1.0).count());
        prop_assert_eq!(masked, expected);
    }

    #[test]
    fn masking_rejects_size_mismatch(
        values in prop::collection::vec(-10.0f64..10.0, 0..50),
        extra in 1usize..10,
        longer_mask in any::<bool>(),
    ) {
        let mask_len = if longer_mask {
            values.len() + extra
        } else {
            values.len().saturating_sub(extra)
        };
        prop_assume!(mask_len != values.len());
        let mask = vec![1.0; mask_len];
        prop_assert_eq!(
            mask_values(&values, Some(&mask)),
            Err(SizeMismatchError { values_len: values.len(), mask_len })
        );
    }
}

// ---------------------------------------------------------------------------
// Record computation
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn record_is_deterministic(values in prop::collection::vec(-1e6f64..1e6, 1..300)) {
        let engine = StatisticsEngine::default();
        let a = engine.compute(&values, None).unwrap();
        let b = engine.compute(&values, None).unwrap();
        prop_assert_eq!(a.values().map(f64::to_bits), b.values().map(f64::to_bits));
    }

    #[test]
    fn record_is_ordered(values in prop::collection::vec(-1e6f64..1e6, 1..300)) {
        let record = StatisticsEngine::default().compute(&values, None).unwrap();
        let values = record.values();
        let percentiles = &values[4..];
        prop_assert!(record.min <= percentiles[0]);
        prop_assert!(percentiles.is_sorted());
        prop_assert!(percentiles[6] <= record.max);
        prop_assert!(record.std >= 0.0);
    }

    #[test]
    fn nearest_rank_law(n in 1i32..2000, p in prop::sample::select(vec![5u8, 15, 25, 50, 75, 85, 95])) {
        let values = (1..=n).map(f64::from).collect::<Vec<_>>();
        let record = StatisticsEngine::default().compute(&values, None).unwrap();
        let index = [5u8, 15, 25, 50, 75, 85, 95].iter().position(|&q| q == p).unwrap();
        let n = u32::try_from(n).unwrap();
        let expected = (n * u32::from(p)).div_ceil(100);
        prop_assert_eq!(record.values()[4 + index], f64::from(expected));
    }

    #[test]
    fn nearest_rank_selects_sample_elements(values in prop::collection::vec(-100i32..100, 1..100)) {
        let values = values.into_iter().map(f64::from).collect::<Vec<_>>();
        let record = StatisticsEngine::default().compute(&values, None).unwrap();
        for p in &record.values()[4..] {
            prop_assert!(values.contains(p));
        }
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn masking_with_random_holes() {
    let mut rng = Pcg64Mcg::seed_from_u64(0x4d45_5348);

    // Pairs of equal values: 0, 0, 2, 2, 4, 4, ...
    let values = (0..1000).map(|i| f64::from(i / 2 * 2)).collect::<Vec<_>>();
    let mut mask = vec![0.0; values.len()];
    let mut selected = (0..250)
        .map(|_| rng.random_range(0..999))
        .collect::<Vec<usize>>();
    selected.sort_unstable();
    selected.dedup();
    for &i in &selected {
        mask[i] = 1.0;
    }

    let masked = mask_values(&values, Some(&mask)).unwrap();
    assert_eq!(masked.len(), selected.len());
    for (&value, &i) in masked.iter().zip(&selected) {
        assert_eq!(value, values[i], "index {i}");
    }
}

#[test]
fn all_zero_mask_is_empty_region() {
    let values = (0..100).map(f64::from).collect::<Vec<_>>();
    let engine = StatisticsEngine::default();
    assert_eq!(
        engine.compute(&values, Some(&vec![0.0; 100])),
        Err(ComputeError::EmptyRegion)
    );
}

#[test]
fn odd_length_percentiles() {
    let values = (0..=1000).map(f64::from).collect::<Vec<_>>();
    let mask = vec![1.0; values.len()];
    let record = StatisticsEngine::default()
        .compute(&values, Some(&mask))
        .unwrap();
    assert_eq!(record.percentile5, 50.0);
    assert_eq!(record.percentile50, 500.0);
    assert_eq!(record.percentile95, 950.0);
}

#[test]
fn linear_method_differs_on_boundaries() {
    let values = (1..=1000).map(f64::from).collect::<Vec<_>>();
    let nearest = StatisticsEngine::default().compute(&values, None).unwrap();
    let linear = StatisticsEngine::new(StatisticsConfig {
        percentile_method: PercentileMethod::Linear,
        ..StatisticsConfig::default()
    })
    .compute(&values, None)
    .unwrap();

    assert_eq!(nearest.percentile5, 50.0);
    assert_eq!(linear.percentile5, 50.95);
    // Moments do not depend on the percentile estimator
    assert_eq!(nearest.values()[..4], linear.values()[..4]);
}
