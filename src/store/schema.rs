use rusqlite::Connection;

// Confidence/strength columns carry CHECK constraints: a value outside
// [0,1] is a bug in the writer, not something we store and average later.
const MIGRATION: &str = r#"
PRAGMA foreign_keys = ON;
PRAGMA journal_mode = WAL;

BEGIN;

CREATE TABLE IF NOT EXISTS schema_migrations(
  id INTEGER PRIMARY KEY,
  name TEXT UNIQUE NOT NULL,
  applied_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS recognized_patterns(
  id INTEGER PRIMARY KEY,
  pattern_type TEXT NOT NULL,
  snippet TEXT NOT NULL,
  confidence REAL NOT NULL CHECK(confidence BETWEEN 0.0 AND 1.0),
  detected_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_patterns_type ON recognized_patterns(pattern_type);

CREATE TABLE IF NOT EXISTS knowledge_entries(
  id INTEGER PRIMARY KEY,
  content TEXT NOT NULL,
  source TEXT NOT NULL DEFAULT '',
  added_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_knowledge_ts ON knowledge_entries(added_at);

CREATE TABLE IF NOT EXISTS insight_events(
  id INTEGER PRIMARY KEY,
  engine TEXT NOT NULL,
  subject TEXT NOT NULL,
  verdict TEXT NOT NULL CHECK(verdict IN ('accept','review','reject')),
  confidence REAL NOT NULL CHECK(confidence BETWEEN 0.0 AND 1.0),
  ts INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_insight_engine ON insight_events(engine, ts);

CREATE TABLE IF NOT EXISTS analogy_maps(
  id INTEGER PRIMARY KEY,
  source_domain TEXT NOT NULL,
  target_domain TEXT NOT NULL,
  shared_terms TEXT NOT NULL,
  strength REAL NOT NULL CHECK(strength BETWEEN 0.0 AND 1.0),
  ts INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS verification_runs(
  id INTEGER PRIMARY KEY,
  started_at INTEGER NOT NULL,
  finished_at INTEGER NOT NULL,
  overall REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS metric_scores(
  id INTEGER PRIMARY KEY,
  run_id INTEGER NOT NULL,
  metric TEXT NOT NULL,
  raw_value REAL NOT NULL,
  score REAL NOT NULL,
  fallback_used INTEGER NOT NULL DEFAULT 0,
  FOREIGN KEY(run_id) REFERENCES verification_runs(id) ON DELETE CASCADE
);
CREATE INDEX IF NOT EXISTS idx_metric_run ON metric_scores(run_id);

INSERT OR IGNORE INTO schema_migrations(name, applied_at)
VALUES ('0001_core', strftime('%s','now'));

COMMIT;
"#;

pub fn apply_migration(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(MIGRATION)
}
