use crate::model::dimension::DIMENSION_COUNT;

/// Pre-normalization weighted scores, indexed by `Dimension::index`.
pub type RawScores = [f64; DIMENSION_COUNT];

/// Published 50..=100 profile, indexed by `Dimension::index`.
pub type RadarScore = [f64; DIMENSION_COUNT];

/// Distribution of `ln(1 + raw)` over the cohort, top value excluded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionStats {
    pub mu: f64,
    pub sigma: f64,
}

impl Default for DimensionStats {
    fn default() -> Self {
        Self { mu: 0.0, sigma: 1.0 }
    }
}
