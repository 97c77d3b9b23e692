use crate::model::scores::RadarScore;

#[derive(Debug, Clone)]
pub struct ScoringProfile {
    pub influence_stars_w: f64,
    pub influence_reach_w: f64,
    pub contribution_prs_w: f64,
    pub contribution_issues_w: f64,
    pub maintainership_merged_w: f64,
    pub maintainership_reviews_w: f64,
    pub engagement_issue_comments_w: f64,
    pub engagement_review_comments_w: f64,
    pub diversity_languages_w: f64,
    pub diversity_topics_w: f64,
    pub code_capability_fallback: f64,
    pub floor_score: f64,
    pub score_span: f64,
    pub decimals: usize,
}

impl ScoringProfile {
    pub fn default_v1() -> Self {
        Self {
            influence_stars_w: 0.6,
            influence_reach_w: 0.4,
            contribution_prs_w: 0.7,
            contribution_issues_w: 0.3,
            maintainership_merged_w: 1.0,
            maintainership_reviews_w: 0.3,
            engagement_issue_comments_w: 0.6,
            engagement_review_comments_w: 0.4,
            diversity_languages_w: 0.6,
            diversity_topics_w: 0.4,
            code_capability_fallback: 1.0,
            floor_score: 50.0,
            score_span: 50.0,
            decimals: 1,
        }
    }

    pub fn unscored_radar(&self) -> RadarScore {
        [self.floor_score; crate::model::dimension::DIMENSION_COUNT]
    }
}
