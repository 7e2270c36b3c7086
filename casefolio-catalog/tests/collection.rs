use std::collections::HashSet;

use casefolio_catalog::source::{LegacyRecord, SourceRecord};
use casefolio_catalog::CaseStudyCollection;

fn legacy(title: &str, slug: Option<&str>) -> (String, SourceRecord) {
    (
        format!("{title}.yaml"),
        SourceRecord::Legacy(LegacyRecord {
            slug: slug.map(str::to_string),
            title: Some(title.to_string()),
            problem: Some("A problem".to_string()),
            ..Default::default()
        }),
    )
}

fn build(titles: &[&str], featured: usize) -> CaseStudyCollection {
    let report = CaseStudyCollection::build(titles.iter().map(|t| legacy(t, None)), featured);
    assert!(report.is_clean());
    report.collection
}

#[test]
fn slugs_are_unique_across_the_collection() {
    let report = CaseStudyCollection::build(
        vec![
            legacy("Design Systems", None),
            legacy("Design Systems", None),
            legacy("Anything", Some("design-systems")),
        ],
        3,
    );
    let slugs: Vec<&str> = report
        .collection
        .records()
        .iter()
        .map(|cs| cs.slug.as_str())
        .collect();
    assert_eq!(slugs, vec!["design-systems", "design-systems-2", "design-systems-3"]);
    let unique: HashSet<&str> = slugs.iter().copied().collect();
    assert_eq!(unique.len(), slugs.len());
}

#[test]
fn slugs_are_stable_across_rebuilds() {
    let a = build(&["Alpha", "Beta", "Alpha"], 3);
    let b = build(&["Alpha", "Beta", "Alpha"], 3);
    let sa: Vec<&str> = a.records().iter().map(|c| c.slug.as_str()).collect();
    let sb: Vec<&str> = b.records().iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(sa, sb);
}

#[test]
fn lookup_by_slug() {
    let c = build(&["Alpha", "Beta"], 3);
    assert_eq!(c.get("beta").map(|cs| cs.title()), Some("Beta"));
    assert!(c.get("gamma").is_none());
}

#[test]
fn featured_prefix_is_bounded() {
    let c = build(&["A", "B", "C", "D", "E"], 3);
    let featured: Vec<&str> = c.featured().iter().map(|cs| cs.slug.as_str()).collect();
    assert_eq!(featured, vec!["a", "b", "c"]);
    assert_eq!(c.featured_position("c"), Some(2));
    assert_eq!(c.featured_position("d"), None);

    let small = build(&["A"], 3);
    assert_eq!(small.featured().len(), 1);
}

#[test]
fn malformed_records_are_excluded_not_fatal() {
    let report = CaseStudyCollection::build(
        vec![
            legacy("Kept", None),
            ("empty.yaml".to_string(), SourceRecord::Legacy(LegacyRecord::default())),
        ],
        3,
    );
    assert_eq!(report.collection.len(), 1);
    assert_eq!(report.excluded.len(), 1);
    assert_eq!(report.excluded[0].origin, "empty.yaml");
}
