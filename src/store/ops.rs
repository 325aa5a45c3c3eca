use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

use crate::store::types::{AnalogyWrite, InsightWrite, KnowledgeWrite, PatternWrite, RunRow};

// ---- writes -----------------------------------------------------------

pub fn record_pattern(conn: &Connection, w: PatternWrite<'_>) -> Result<i64> {
    conn.execute(
        "INSERT INTO recognized_patterns(pattern_type,snippet,confidence,detected_at)
         VALUES(?1,?2,?3,?4)",
        params![w.pattern_type, w.snippet, w.confidence, w.ts],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn record_knowledge(conn: &Connection, w: KnowledgeWrite<'_>) -> Result<i64> {
    conn.execute(
        "INSERT INTO knowledge_entries(content,source,added_at) VALUES(?1,?2,?3)",
        params![w.content, w.source, w.ts],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn record_insight(conn: &Connection, w: InsightWrite<'_>) -> Result<i64> {
    conn.execute(
        "INSERT INTO insight_events(engine,subject,verdict,confidence,ts)
         VALUES(?1,?2,?3,?4,?5)",
        params![w.engine, w.subject, w.verdict, w.confidence, w.ts],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn record_analogy(conn: &Connection, w: AnalogyWrite<'_>) -> Result<i64> {
    conn.execute(
        "INSERT INTO analogy_maps(source_domain,target_domain,shared_terms,strength,ts)
         VALUES(?1,?2,?3,?4,?5)",
        params![w.source_domain, w.target_domain, w.shared_terms, w.strength, w.ts],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn record_run(conn: &Connection, started_at: i64, finished_at: i64, overall: f64) -> Result<i64> {
    conn.execute(
        "INSERT INTO verification_runs(started_at,finished_at,overall) VALUES(?1,?2,?3)",
        params![started_at, finished_at, overall],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn record_metric_score(
    conn: &Connection,
    run_id: i64,
    metric: &str,
    raw_value: f64,
    score: f64,
    fallback_used: bool,
) -> Result<()> {
    conn.execute(
        "INSERT INTO metric_scores(run_id,metric,raw_value,score,fallback_used)
         VALUES(?1,?2,?3,?4,?5)",
        params![run_id, metric, raw_value, score, fallback_used as i64],
    )?;
    Ok(())
}

// ---- reads used by the scorer and /status -----------------------------

pub fn count_patterns(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM recognized_patterns", [], |r| r.get(0))?)
}

pub fn count_knowledge(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM knowledge_entries", [], |r| r.get(0))?)
}

pub fn count_insights(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM insight_events", [], |r| r.get(0))?)
}

pub fn count_analogies(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM analogy_maps", [], |r| r.get(0))?)
}

/// Mean confidence over all insight events; None when the table is empty.
pub fn avg_insight_confidence(conn: &Connection) -> Result<Option<f64>> {
    let v: Option<f64> =
        conn.query_row("SELECT AVG(confidence) FROM insight_events", [], |r| r.get(0))?;
    Ok(v)
}

pub fn latest_run(conn: &Connection) -> Result<Option<RunRow>> {
    let row = conn
        .prepare(
            "SELECT id, started_at, finished_at, overall
               FROM verification_runs
              ORDER BY id DESC
              LIMIT 1",
        )?
        .query_row([], |r| {
            Ok(RunRow {
                id: r.get(0)?,
                started_at: r.get(1)?,
                finished_at: r.get(2)?,
                overall: r.get(3)?,
            })
        })
        .optional()?;
    Ok(row)
}
