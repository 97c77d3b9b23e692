use super::*;

fn profile() -> ScoringProfile {
    ScoringProfile::default_v1()
}

/// One-dimension cohort: the value goes in influence, other axes stay zero.
fn cohort(values: &[f64]) -> Vec<RawScores> {
    values
        .iter()
        .map(|&v| {
            let mut row = [0.0; DIMENSION_COUNT];
            row[Dimension::Influence.index()] = v;
            row
        })
        .collect()
}

fn influence(out: &Stage3Output) -> Vec<f64> {
    out.radar
        .iter()
        .map(|r| r[Dimension::Influence.index()])
        .collect()
}

#[test]
fn test_erf_reference_values() {
    let cases = [
        (0.0, 0.0),
        (0.5, 0.5204998778130465),
        (1.0, 0.8427007929497149),
        (-2.3, -0.9988568234026434),
        (3.5, 0.9999992569016276),
        (7.0, 1.0),
        (-7.0, -1.0),
    ];
    for (x, expected) in cases {
        assert!((erf(x) - expected).abs() < 1e-13, "erf({x}) = {}", erf(x));
    }
}

#[test]
fn test_normal_cdf_symmetry() {
    assert_eq!(normal_cdf(2.0, 2.0, 1.0), 0.5);
    let hi = normal_cdf(3.0, 2.0, 0.5);
    let lo = normal_cdf(1.0, 2.0, 0.5);
    assert!((hi + lo - 1.0).abs() < 1e-12);
    assert_eq!(normal_cdf(5.0, 2.0, 0.0), 0.5);
}

#[test]
fn test_round_to_one_decimal() {
    assert_eq!(round_to(92.3649, 1), 92.4);
    assert_eq!(round_to(87.96, 1), 88.0);
    assert_eq!(round_to(50.04, 1), 50.0);
    assert_eq!(round_to(99.99999, 1), 100.0);
}

#[test]
fn test_reference_cohort_example() {
    // A: 0.6*100 + 0.4*15, B: nothing, C: 0.6*50.
    let out = run_stage3(&cohort(&[66.0, 0.0, 30.0]), &profile());
    let stats = out.stats[Dimension::Influence.index()];
    assert!((stats.mu - 1.7169936022425731).abs() < 1e-12);
    assert!((stats.sigma - 2.4281956387992825).abs() < 1e-12);
    assert_eq!(influence(&out), vec![92.4, 50.0, 88.0]);
}

#[test]
fn test_larger_cohort_matches_reference() {
    let out = run_stage3(&cohort(&[10.0, 20.0, 30.0, 1000.0, 0.0, 0.0]), &profile());
    let stats = out.stats[Dimension::Influence.index()];
    assert!((stats.mu - 1.775280983001388).abs() < 1e-12);
    assert!((stats.sigma - 1.6623156958476617).abs() < 1e-12);
    assert_eq!(influence(&out), vec![82.3, 88.9, 92.0, 99.9, 50.0, 50.0]);
}

#[test]
fn test_all_zero_user_gets_floor_everywhere() {
    let mut raw = cohort(&[66.0, 30.0, 0.0]);
    raw[0] = [5.0, 3.0, 2.0, 8.0, 1.0, 4.0];
    raw[1] = [1.0, 9.0, 4.0, 2.0, 6.0, 1.0];
    let out = run_stage3(&raw, &profile());
    assert_eq!(out.radar[2], [50.0; DIMENSION_COUNT]);
}

#[test]
fn test_scores_stay_in_range() {
    let values = [0.5, 1.0, 3.0, 7.0, 40.0, 0.0, 1e6, 12.0, 0.1];
    let out = run_stage3(&cohort(&values), &profile());
    for row in &out.radar {
        for &score in row {
            assert!((50.0..=100.0).contains(&score), "score {score} out of range");
        }
    }
}

#[test]
fn test_monotonic_in_raw_score() {
    let values = [3.0, 0.2, 55.0, 8.0, 8.5, 1200.0, 19.0];
    let out = run_stage3(&cohort(&values), &profile());
    let scores = influence(&out);
    for i in 0..values.len() {
        for j in 0..values.len() {
            if values[i] > values[j] {
                assert!(scores[i] >= scores[j], "{} vs {}", values[i], values[j]);
            }
        }
    }
}

#[test]
fn test_outlier_excluded_from_stats() {
    let with_outlier = dimension_stats(&[4.0, 6.0, 9.0, 1_000_000.0]);
    let without = dimension_stats(&[4.0, 6.0, 9.0]);
    let direct = [4.0f64, 6.0, 9.0].iter().map(|v| v.ln_1p()).sum::<f64>() / 3.0;
    assert!((with_outlier.mu - direct).abs() < 1e-12);
    // Dropping the top value of the smaller cohort changes its stats.
    assert!(without.mu < with_outlier.mu);
}

#[test]
fn test_outlier_keeps_others_ordering() {
    let out = run_stage3(&cohort(&[4.0, 6.0, 9.0, 1_000_000.0]), &profile());
    let scores = influence(&out);
    assert!(scores[0] <= scores[1] && scores[1] <= scores[2] && scores[2] <= scores[3]);
    assert_eq!(scores[3], 100.0);
}

#[test]
fn test_single_user_cohort() {
    let stats = dimension_stats(&[30.0]);
    assert_eq!(stats.sigma, 1.0);
    assert_eq!(stats.mu, 30f64.ln_1p());
    let out = run_stage3(&cohort(&[30.0]), &profile());
    assert_eq!(influence(&out), vec![75.0]);
}

#[test]
fn test_identical_values_floor_sigma() {
    let stats = dimension_stats(&[5.0, 5.0, 5.0]);
    assert_eq!(stats.sigma, 1.0);
    let out = run_stage3(&cohort(&[5.0, 5.0, 5.0]), &profile());
    assert_eq!(influence(&out), vec![75.0, 75.0, 75.0]);
}

#[test]
fn test_two_user_cohort_pool_of_one() {
    let out = run_stage3(&cohort(&[100.0, 1.0]), &profile());
    let stats = out.stats[Dimension::Influence.index()];
    assert_eq!(stats.mu, 1f64.ln_1p());
    assert_eq!(stats.sigma, 1.0);
    assert_eq!(influence(&out), vec![100.0, 75.0]);
}

#[test]
fn test_empty_cohort_does_not_panic() {
    let out = run_stage3(&[], &profile());
    assert!(out.radar.is_empty());
    assert_eq!(out.stats[0], DimensionStats { mu: 0.0, sigma: 1.0 });
}

#[test]
fn test_rerun_is_bit_identical() {
    let raw = cohort(&[3.0, 0.2, 55.0, 8.0, 0.0, 1200.0, 19.0]);
    let a = run_stage3(&raw, &profile());
    let b = run_stage3(&raw, &profile());
    assert_eq!(a.radar, b.radar);
    for (x, y) in a.stats.iter().zip(b.stats.iter()) {
        assert_eq!(x.mu.to_bits(), y.mu.to_bits());
        assert_eq!(x.sigma.to_bits(), y.sigma.to_bits());
    }
}
