use crate::model::dimension::{DIMENSION_COUNT, Dimension};
use crate::model::profile::ScoringProfile;
use crate::model::scores::{DimensionStats, RadarScore, RawScores};

#[derive(Debug, Clone)]
pub struct Stage3Output {
    pub stats: [DimensionStats; DIMENSION_COUNT],
    pub radar: Vec<RadarScore>,
}

/// Normalizes every dimension against the whole cohort.
///
/// `raw` must hold one entry per cohort member; statistics computed over a
/// partial cohort are meaningless.
pub fn run_stage3(raw: &[RawScores], profile: &ScoringProfile) -> Stage3Output {
    let mut stats = [DimensionStats::default(); DIMENSION_COUNT];
    let mut radar = vec![profile.unscored_radar(); raw.len()];

    for dim in Dimension::ALL {
        let d = dim.index();
        let values: Vec<f64> = raw.iter().map(|r| r[d]).collect();
        let s = dimension_stats(&values);
        for (user, &v) in values.iter().enumerate() {
            radar[user][d] = scale_score(v, &s, profile);
        }
        stats[d] = s;
    }

    Stage3Output { stats, radar }
}

/// Mean and sample standard deviation of `ln(1 + v)`, with the single largest
/// log value left out when there is more than one user.
pub fn dimension_stats(raw: &[f64]) -> DimensionStats {
    let mut logs: Vec<f64> = raw.iter().map(|v| v.ln_1p()).collect();
    if logs.is_empty() {
        return DimensionStats::default();
    }
    if logs.len() > 1 {
        if let Some(idx) = max_index(&logs) {
            logs.remove(idx);
        }
    }

    let first = logs[0];
    let (mu, sigma) = if logs.iter().all(|&v| v == first) {
        (first, 0.0)
    } else {
        let mu = compensated_sum(&logs) / logs.len() as f64;
        (mu, sample_stdev(&logs, mu))
    };

    DimensionStats {
        mu,
        sigma: if sigma == 0.0 { 1.0 } else { sigma },
    }
}

/// Maps one raw score into `[floor, floor + span]`. Zero never goes through the CDF.
pub fn scale_score(raw: f64, stats: &DimensionStats, profile: &ScoringProfile) -> f64 {
    if raw == 0.0 {
        return profile.floor_score;
    }
    let p = normal_cdf(raw.ln_1p(), stats.mu, stats.sigma);
    round_to(profile.floor_score + p * profile.score_span, profile.decimals)
}

pub fn normal_cdf(x: f64, mu: f64, sigma: f64) -> f64 {
    if sigma == 0.0 {
        return 0.5;
    }
    let z = (x - mu) / sigma;
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Error function via the series
/// `erf(x) = 2/sqrt(pi) * exp(-x^2) * sum_n 2^n x^(2n+1) / (1*3*...*(2n+1))`.
/// Every term is positive, so there is no cancellation.
pub fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    let ax = x.abs();
    if ax >= 6.0 {
        return x.signum();
    }
    let x2 = ax * ax;
    let mut term = ax;
    let mut sum = ax;
    let mut n = 0u32;
    while n < 500 {
        n += 1;
        term *= 2.0 * x2 / (2 * n + 1) as f64;
        sum += term;
        if term <= sum * f64::EPSILON {
            break;
        }
    }
    let y = (2.0 / std::f64::consts::PI.sqrt() * (-x2).exp() * sum).min(1.0);
    if x < 0.0 { -y } else { y }
}

/// Correctly rounded to `decimals` places, half-to-even on the exact binary value.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

fn max_index(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
}

// Neumaier summation.
fn compensated_sum(values: &[f64]) -> f64 {
    let mut sum = 0.0f64;
    let mut c = 0.0f64;
    for &v in values {
        let t = sum + v;
        if sum.abs() >= v.abs() {
            c += (sum - t) + v;
        } else {
            c += (v - t) + sum;
        }
        sum = t;
    }
    sum + c
}

fn sample_stdev(values: &[f64], mu: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sq: Vec<f64> = values.iter().map(|v| (v - mu) * (v - mu)).collect();
    (compensated_sum(&sq) / (values.len() - 1) as f64).sqrt()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_normalize.rs"]
mod tests;
