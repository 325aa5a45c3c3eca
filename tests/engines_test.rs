use tempfile::tempdir;

use verax::engines::pattern::{detect, PatternKind};
use verax::engines::{cross_domain, ethical, novel, pattern, Verdict};
use verax::store::{self, ops};

#[test]
fn arithmetic_progression_detected_with_full_confidence() {
    let hits = detect("2 4 6 8 10");
    let hit = hits
        .iter()
        .find(|h| h.kind == PatternKind::Arithmetic)
        .expect("arithmetic hit");
    assert_eq!(hit.confidence, 1.0);
}

#[test]
fn geometric_progression_detected() {
    let hits = detect("3 6 12 24 48");
    let hit = hits
        .iter()
        .find(|h| h.kind == PatternKind::Geometric)
        .expect("geometric hit");
    assert_eq!(hit.confidence, 1.0);
    assert!(hits.iter().all(|h| h.kind != PatternKind::Arithmetic));
}

#[test]
fn token_alternation_detected() {
    let hits = detect("ping pong ping pong ping pong");
    assert!(hits.iter().any(|h| h.kind == PatternKind::Alternation));
}

#[test]
fn repeated_token_detected() {
    let hits = detect("go go go go go");
    let hit = hits
        .iter()
        .find(|h| h.kind == PatternKind::Repetition)
        .expect("repetition hit");
    assert_eq!(hit.confidence, 1.0);
}

#[test]
fn noise_and_empty_input_record_nothing() {
    let dir = tempdir().unwrap();
    let conn = store::open(dir.path().join("v.db")).unwrap();

    assert!(pattern::evaluate(&conn, "").unwrap().is_empty());
    assert!(pattern::evaluate(&conn, "the weather was mild").unwrap().is_empty());
    assert_eq!(ops::count_patterns(&conn).unwrap(), 0);

    let a = ethical::evaluate(&conn, "").unwrap();
    assert_eq!(a.confidence, 0.0);
    assert_eq!(ops::count_insights(&conn).unwrap(), 0);
}

#[test]
fn ethical_bands_behave() {
    let bad = ethical::assess("deceive users and steal their data");
    assert_eq!(bad.verdict, Verdict::Reject);

    let good = ethical::assess("share benefits fairly and ask for consent first");
    assert_eq!(good.verdict, Verdict::Accept);

    // no strong cues either way: park it for review
    let vague = ethical::assess("the sky is blue today");
    assert_eq!(vague.verdict, Verdict::Review);

    assert!(good.clearance > vague.clearance);
    assert!(vague.clearance > bad.clearance);
}

#[test]
fn mitigation_language_softens_harm() {
    let raw = ethical::assess("this could harm bystanders");
    let softened = ethical::assess("this could harm bystanders, so we safeguard against it");
    assert!(softened.harm_risk < raw.harm_risk);
    assert!(softened.clearance > raw.clearance);
}

#[test]
fn analogy_strength_is_exactly_the_jaccard_index() {
    let r = cross_domain::map_terms("a", &["x", "y", "z"], "b", &["y", "z", "w"]).unwrap();
    assert_eq!(r.strength, 0.5); // 2 shared / 4 union, no adjustment
    assert_eq!(r.shared, vec!["y".to_string(), "z".to_string()]);
}

#[test]
fn self_analogy_and_unknown_domains_are_errors() {
    assert!(cross_domain::map_domains("physics", "physics").is_err());
    assert!(cross_domain::map_domains("physics", "astrology").is_err());
}

#[test]
fn cross_domain_evaluate_records_overlapping_mappings() {
    let dir = tempdir().unwrap();
    let conn = store::open(dir.path().join("v.db")).unwrap();

    let r = cross_domain::evaluate(&conn, "physics", "biology").unwrap();
    assert!(r.strength > 0.0);
    assert!(!r.shared.is_empty());
    assert_eq!(ops::count_analogies(&conn).unwrap(), 1);
}

#[test]
fn novel_strategy_matching() {
    let a = novel::assess("break the problem into smaller parts and invert the assumptions");
    assert_eq!(a.matched, vec!["decompose", "invert"]);
    assert_eq!(a.confidence, 0.5);
    assert_eq!(a.verdict, Verdict::Review);

    let none = novel::assess("nothing to see here");
    assert_eq!(none.confidence, 0.0);
    assert_eq!(none.verdict, Verdict::Reject);
}

#[test]
fn engine_events_feed_the_insight_table() {
    let dir = tempdir().unwrap();
    let conn = store::open(dir.path().join("v.db")).unwrap();

    ethical::evaluate(&conn, "share benefits fairly and ask for consent first").unwrap();
    novel::evaluate(&conn, "split the task into steps").unwrap();
    assert_eq!(ops::count_insights(&conn).unwrap(), 2);
    let avg = ops::avg_insight_confidence(&conn).unwrap().unwrap();
    assert!(avg > 0.0 && avg <= 1.0);
}
