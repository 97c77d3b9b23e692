use crate::model::dimension::{DIMENSION_COUNT, Dimension};
use crate::model::metrics::RawMetrics;
use crate::model::profile::ScoringProfile;
use crate::model::scores::RawScores;
use crate::pipeline::stage1_load::Stage1Output;

pub fn raw_score(dimension: Dimension, m: &RawMetrics, profile: &ScoringProfile) -> f64 {
    let score = match dimension {
        Dimension::Influence => {
            profile.influence_stars_w * m.influence.stars
                + profile.influence_reach_w * (m.influence.forks + m.influence.open_issues)
        }
        Dimension::Contribution => {
            profile.contribution_prs_w * m.contribution.accepted_external_prs
                + profile.contribution_issues_w * m.contribution.created_issues
        }
        Dimension::Maintainership => {
            profile.maintainership_merged_w * m.maintainership.merged_external_pr_count_approx
                + profile.maintainership_reviews_w * m.engagement.pr_review_comment_count
        }
        Dimension::Engagement => {
            profile.engagement_issue_comments_w * m.engagement.issue_comment_count
                + profile.engagement_review_comments_w * m.engagement.pr_review_comment_count
        }
        Dimension::Diversity => {
            profile.diversity_languages_w * m.diversity.languages()
                + profile.diversity_topics_w * m.diversity.topics()
        }
        Dimension::CodeCapability => code_capability(m, profile),
    };
    score.max(0.0)
}

// Sum of ln(1 + stars) over merged external PRs. Users who tried (closed PRs)
// or reviewed but never landed anything get the fallback instead of zero.
fn code_capability(m: &RawMetrics, profile: &ScoringProfile) -> f64 {
    let core: f64 = m
        .code_capability
        .merged_prs_with_stars
        .iter()
        .map(|stars| stars.max(0.0).ln_1p())
        .sum();
    if core == 0.0
        && (m.code_capability.total_closed_external_prs > 0.0
            || m.engagement.pr_review_comment_count > 0.0)
    {
        return profile.code_capability_fallback;
    }
    core
}

pub fn raw_scores(m: &RawMetrics, profile: &ScoringProfile) -> RawScores {
    let mut out = [0.0; DIMENSION_COUNT];
    for dim in Dimension::ALL {
        out[dim.index()] = raw_score(dim, m, profile);
    }
    out
}

pub fn run_stage2(stage1: &Stage1Output, profile: &ScoringProfile) -> Vec<RawScores> {
    stage1
        .metrics
        .iter()
        .map(|m| raw_scores(m, profile))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_aggregate.rs"]
mod tests;
