use tempfile::tempdir;

use verax::store::types::{InsightWrite, KnowledgeWrite};
use verax::store::{self, ops, schema};
use verax::StoreError;

#[test]
fn migration_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("v.db");

    let conn = store::open(&path).unwrap();
    schema::apply_migration(&conn).unwrap();
    drop(conn);

    // reopening re-applies the migration against an existing schema
    let conn = store::open(&path).unwrap();
    ops::record_knowledge(
        &conn,
        KnowledgeWrite { content: "still works", source: "test", ts: 1 },
    )
    .unwrap();
    assert_eq!(ops::count_knowledge(&conn).unwrap(), 1);
}

#[test]
fn open_surfaces_data_dir_failures_as_io_errors() {
    let dir = tempdir().unwrap();
    // a plain file where the data dir should go
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"x").unwrap();

    let err = store::open(blocker.join("sub").join("v.db")).unwrap_err();
    assert!(matches!(err, StoreError::Io(_)), "got {err}");
}

#[test]
fn out_of_range_confidence_is_rejected_by_the_schema() {
    let dir = tempdir().unwrap();
    let conn = store::open(dir.path().join("v.db")).unwrap();

    let res = conn.execute(
        "INSERT INTO insight_events(engine,subject,verdict,confidence,ts)
         VALUES('ethical','x','accept',1.5,0)",
        [],
    );
    assert!(res.is_err());

    let res = conn.execute(
        "INSERT INTO recognized_patterns(pattern_type,snippet,confidence,detected_at)
         VALUES('arithmetic','1 2 3',-0.1,0)",
        [],
    );
    assert!(res.is_err());
}

#[test]
fn unknown_verdicts_are_rejected_by_the_schema() {
    let dir = tempdir().unwrap();
    let conn = store::open(dir.path().join("v.db")).unwrap();

    let res = ops::record_insight(
        &conn,
        InsightWrite { engine: "ethical", subject: "x", verdict: "maybe", confidence: 0.5, ts: 0 },
    );
    assert!(res.is_err());
}

#[test]
fn aggregates_track_typed_writes() {
    let dir = tempdir().unwrap();
    let conn = store::open(dir.path().join("v.db")).unwrap();

    assert_eq!(ops::count_insights(&conn).unwrap(), 0);
    assert!(ops::avg_insight_confidence(&conn).unwrap().is_none());

    ops::record_insight(
        &conn,
        InsightWrite { engine: "novel", subject: "a", verdict: "accept", confidence: 0.5, ts: 1 },
    )
    .unwrap();
    ops::record_insight(
        &conn,
        InsightWrite { engine: "novel", subject: "b", verdict: "review", confidence: 1.0, ts: 2 },
    )
    .unwrap();

    assert_eq!(ops::count_insights(&conn).unwrap(), 2);
    let avg = ops::avg_insight_confidence(&conn).unwrap().unwrap();
    assert!((avg - 0.75).abs() < 1e-9);
}

#[test]
fn latest_run_returns_the_newest_row() {
    let dir = tempdir().unwrap();
    let conn = store::open(dir.path().join("v.db")).unwrap();

    assert!(ops::latest_run(&conn).unwrap().is_none());
    ops::record_run(&conn, 10, 11, 42.0).unwrap();
    ops::record_run(&conn, 20, 21, 58.0).unwrap();

    let run = ops::latest_run(&conn).unwrap().unwrap();
    assert_eq!(run.started_at, 20);
    assert_eq!(run.overall, 58.0);
}
