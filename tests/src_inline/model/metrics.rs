use super::*;

#[test]
fn test_influence_reads_total_fields() {
    let json = r#"{"username":"alice","raw_metrics":{"total_stars":120,"total_forks":7,"total_open_issues":3,"top_repos":[]}}"#;
    let file: MetricFile<InfluenceMetrics> = serde_json::from_str(json).unwrap();
    assert_eq!(file.username.as_deref(), Some("alice"));
    let m = file.raw_metrics.unwrap();
    assert_eq!(m.stars, 120.0);
    assert_eq!(m.forks, 7.0);
    assert_eq!(m.open_issues, 3.0);
}

#[test]
fn test_influence_accepts_short_aliases() {
    let m: InfluenceMetrics =
        serde_json::from_str(r#"{"stars":5,"forks":1.5,"open_issues":2}"#).unwrap();
    assert_eq!(m.stars, 5.0);
    assert_eq!(m.forks, 1.5);
    assert_eq!(m.open_issues, 2.0);
}

#[test]
fn test_influence_with_both_spellings_prefers_total() {
    let json = r#"{"username":"a","raw_metrics":{"total_stars":5,"stars":9,"total_forks":2,"open_issues":4}}"#;
    let file: MetricFile<InfluenceMetrics> = serde_json::from_str(json).unwrap();
    let m = file.raw_metrics.unwrap();
    assert_eq!(m.stars, 5.0);
    assert_eq!(m.forks, 2.0);
    assert_eq!(m.open_issues, 4.0);

    let m: InfluenceMetrics =
        serde_json::from_str(r#"{"total_stars":null,"stars":7}"#).unwrap();
    assert_eq!(m.stars, 7.0);
    assert_eq!(m.forks, 0.0);
}

#[test]
fn test_missing_and_null_counts_default_to_zero() {
    let m: EngagementMetrics =
        serde_json::from_str(r#"{"issue_comment_count":null}"#).unwrap();
    assert_eq!(m, EngagementMetrics::default());
}

#[test]
fn test_diversity_counts_fall_back_to_sets() {
    let m: DiversityMetrics = serde_json::from_str(
        r#"{"distinct_languages":["Rust","Go","Rust"],"distinct_topics":["cli"]}"#,
    )
    .unwrap();
    assert_eq!(m.languages(), 2.0);
    assert_eq!(m.topics(), 1.0);

    let explicit: DiversityMetrics = serde_json::from_str(
        r#"{"distinct_languages":["Rust"],"language_count":4,"topic_count":0}"#,
    )
    .unwrap();
    assert_eq!(explicit.languages(), 4.0);
    assert_eq!(explicit.topics(), 0.0);
}

#[test]
fn test_diversity_null_lists_read_empty() {
    let m: DiversityMetrics = serde_json::from_str(
        r#"{"distinct_languages":null,"distinct_topics":null,"language_count":3}"#,
    )
    .unwrap();
    assert!(m.distinct_languages.is_empty());
    assert_eq!(m.languages(), 3.0);
    assert_eq!(m.topics(), 0.0);
}

#[test]
fn test_code_capability_star_list() {
    let m: CodeCapabilityMetrics = serde_json::from_str(
        r#"{"merged_prs_with_stars":[100,0,9],"accepted_external_prs":3,"total_closed_external_prs":4}"#,
    )
    .unwrap();
    assert_eq!(m.merged_prs_with_stars, vec![100.0, 0.0, 9.0]);
    assert_eq!(m.total_closed_external_prs, 4.0);
}

#[test]
fn test_wrong_type_is_an_error() {
    let parsed = serde_json::from_str::<ContributionMetrics>(r#"{"created_issues":"many"}"#);
    assert!(parsed.is_err());
}
