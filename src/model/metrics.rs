use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer};

/// Envelope shared by every per-dimension metric file.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricFile<T> {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub raw_metrics: Option<T>,
}

/// Influence counts. Files store `total_*`; the short names are read when the
/// `total_*` key is missing or null.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "InfluenceFields")]
pub struct InfluenceMetrics {
    pub stars: f64,
    pub forks: f64,
    pub open_issues: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InfluenceFields {
    total_stars: Option<f64>,
    stars: Option<f64>,
    total_forks: Option<f64>,
    forks: Option<f64>,
    total_open_issues: Option<f64>,
    open_issues: Option<f64>,
}

impl From<InfluenceFields> for InfluenceMetrics {
    fn from(f: InfluenceFields) -> Self {
        Self {
            stars: f.total_stars.or(f.stars).unwrap_or(0.0),
            forks: f.total_forks.or(f.forks).unwrap_or(0.0),
            open_issues: f.total_open_issues.or(f.open_issues).unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContributionMetrics {
    #[serde(deserialize_with = "count")]
    pub accepted_external_prs: f64,
    #[serde(deserialize_with = "count")]
    pub created_issues: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MaintainershipMetrics {
    #[serde(deserialize_with = "count")]
    pub merged_external_pr_count_approx: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngagementMetrics {
    #[serde(deserialize_with = "count")]
    pub issue_comment_count: f64,
    #[serde(deserialize_with = "count")]
    pub pr_review_comment_count: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DiversityMetrics {
    #[serde(deserialize_with = "names")]
    pub distinct_languages: BTreeSet<String>,
    #[serde(deserialize_with = "names")]
    pub distinct_topics: BTreeSet<String>,
    pub language_count: Option<f64>,
    pub topic_count: Option<f64>,
}

impl DiversityMetrics {
    /// Falls back to the size of `distinct_languages` when no count was recorded.
    pub fn languages(&self) -> f64 {
        self.language_count
            .unwrap_or(self.distinct_languages.len() as f64)
    }

    pub fn topics(&self) -> f64 {
        self.topic_count.unwrap_or(self.distinct_topics.len() as f64)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CodeCapabilityMetrics {
    /// Star count of the target repository of each merged external PR.
    pub merged_prs_with_stars: Vec<f64>,
    #[serde(deserialize_with = "count")]
    pub total_closed_external_prs: f64,
}

/// Everything the aggregator reads for one user. Absent dimensions stay zeroed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMetrics {
    pub influence: InfluenceMetrics,
    pub contribution: ContributionMetrics,
    pub maintainership: MaintainershipMetrics,
    pub engagement: EngagementMetrics,
    pub diversity: DiversityMetrics,
    pub code_capability: CodeCapabilityMetrics,
}

// `null` counts read as zero.
fn count<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

fn names<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeSet<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/metrics.rs"]
mod tests;
