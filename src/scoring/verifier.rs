use anyhow::Result;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::scoring::ladder::ThresholdLadder;
use crate::scoring::metric::{MetricQuery, MetricScore, MetricSpec};
use crate::store::ops;

#[inline]
fn now_sec() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub started_at: i64,
    pub finished_at: i64,
    pub scores: Vec<MetricScore>,
    pub overall: f64,
}

/// Runs a suite of metrics against the store and averages their scores.
/// Scores only ever derive from rows the engines actually recorded;
/// there is no seeding path and no post-hoc adjustment of the mean.
pub struct Verifier {
    suite: Vec<MetricSpec>,
}

impl Default for Verifier {
    fn default() -> Self {
        Self {
            suite: vec![
                MetricSpec {
                    name: "pattern_recognition",
                    query: MetricQuery::PatternCount,
                    ladder: ThresholdLadder::count_default(),
                },
                MetricSpec {
                    name: "knowledge_base",
                    query: MetricQuery::KnowledgeCount,
                    ladder: ThresholdLadder::count_default(),
                },
                MetricSpec {
                    name: "insight_activity",
                    query: MetricQuery::InsightCount,
                    ladder: ThresholdLadder::count_default(),
                },
                MetricSpec {
                    name: "insight_confidence",
                    query: MetricQuery::MeanInsightConfidencePct,
                    ladder: ThresholdLadder::percent_default(),
                },
                MetricSpec {
                    name: "cross_domain",
                    query: MetricQuery::AnalogyCount,
                    ladder: ThresholdLadder::count_default(),
                },
            ],
        }
    }
}

impl Verifier {
    pub fn with_suite(suite: Vec<MetricSpec>) -> Self {
        Self { suite }
    }

    /// Collect every metric, average, and persist the run.
    pub fn run(&self, conn: &Connection) -> Result<VerificationReport> {
        let started_at = now_sec();
        let scores: Vec<MetricScore> = self.suite.iter().map(|m| m.collect(conn)).collect();
        let overall = if scores.is_empty() {
            0.0
        } else {
            scores.iter().map(|s| s.score).sum::<f64>() / scores.len() as f64
        };
        let finished_at = now_sec();

        // the run row and its metric rows land together or not at all
        let tx = conn.unchecked_transaction()?;
        let run_id = ops::record_run(&tx, started_at, finished_at, overall)?;
        for s in &scores {
            ops::record_metric_score(&tx, run_id, &s.name, s.raw_value, s.score, s.fallback_used)?;
        }
        tx.commit()?;

        Ok(VerificationReport { started_at, finished_at, scores, overall })
    }

    /// Collect without persisting. Used where the store is read-only
    /// (status endpoints, dry runs).
    pub fn collect_only(&self, conn: &Connection) -> VerificationReport {
        let started_at = now_sec();
        let scores: Vec<MetricScore> = self.suite.iter().map(|m| m.collect(conn)).collect();
        let overall = if scores.is_empty() {
            0.0
        } else {
            scores.iter().map(|s| s.score).sum::<f64>() / scores.len() as f64
        };
        VerificationReport { started_at, finished_at: now_sec(), scores, overall }
    }
}
