use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::scoring::ladder::ThresholdLadder;
use crate::store::ops;

/// The aggregates a metric may score. An enum rather than raw SQL from
/// callers: the store owns its schema and this module owns the queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricQuery {
    PatternCount,
    KnowledgeCount,
    InsightCount,
    /// Mean insight confidence scaled to 0..100. Empty table reads as 0.
    MeanInsightConfidencePct,
    AnalogyCount,
}

impl MetricQuery {
    pub fn value(&self, conn: &Connection) -> anyhow::Result<f64> {
        let v = match self {
            MetricQuery::PatternCount => ops::count_patterns(conn)? as f64,
            MetricQuery::KnowledgeCount => ops::count_knowledge(conn)? as f64,
            MetricQuery::InsightCount => ops::count_insights(conn)? as f64,
            MetricQuery::MeanInsightConfidencePct => {
                ops::avg_insight_confidence(conn)?.unwrap_or(0.0) * 100.0
            }
            MetricQuery::AnalogyCount => ops::count_analogies(conn)? as f64,
        };
        Ok(v)
    }
}

pub struct MetricSpec {
    pub name: &'static str,
    pub query: MetricQuery,
    pub ladder: ThresholdLadder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricScore {
    pub name: String,
    pub raw_value: f64,
    pub score: f64,
    pub fallback_used: bool,
}

impl MetricSpec {
    /// Collection never propagates errors: a metric that cannot be read
    /// degrades to the ladder's fallback and is flagged as such.
    pub fn collect(&self, conn: &Connection) -> MetricScore {
        match self.query.value(conn) {
            Ok(v) => MetricScore {
                name: self.name.to_string(),
                raw_value: v,
                score: self.ladder.score(v),
                fallback_used: false,
            },
            Err(e) => {
                eprintln!("[verify] metric '{}' failed: {e}", self.name);
                MetricScore {
                    name: self.name.to_string(),
                    raw_value: 0.0,
                    score: self.ladder.fallback(),
                    fallback_used: true,
                }
            }
        }
    }
}
