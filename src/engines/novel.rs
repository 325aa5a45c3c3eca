use anyhow::Result;
use rusqlite::Connection;

use crate::engines::{ContainsAny, Verdict};
use crate::store::ops;
use crate::store::types::InsightWrite;

#[inline]
fn now_sec() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

struct Strategy {
    name: &'static str,
    cues: &'static [&'static str],
}

// The four sub-strategies a workable problem statement can signal.
const STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "decompose",
        cues: &["decompose", "break", "split", "subproblem", "parts", "steps", "divide"],
    },
    Strategy {
        name: "analogize",
        cues: &["like", "similar", "analogy", "resembles", "borrow", "inspired"],
    },
    Strategy {
        name: "invert",
        cues: &["invert", "reverse", "backwards", "opposite", "flip"],
    },
    Strategy {
        name: "constrain_relax",
        cues: &["constraint", "relax", "assume", "simplify", "restrict", "bound"],
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct NovelAssessment {
    pub matched: Vec<&'static str>,
    /// Matched strategies over total strategies; no other factor enters.
    pub confidence: f32,
    pub verdict: Verdict,
}

pub fn assess(text: &str) -> NovelAssessment {
    let matched: Vec<&'static str> = STRATEGIES
        .iter()
        .filter(|s| text.contains_any_word(s.cues))
        .map(|s| s.name)
        .collect();
    let confidence = matched.len() as f32 / STRATEGIES.len() as f32;
    NovelAssessment {
        matched,
        confidence,
        verdict: Verdict::for_score(confidence),
    }
}

/// Assess and record. No matched strategy means nothing to claim and
/// nothing recorded.
pub fn evaluate(conn: &Connection, text: &str) -> Result<NovelAssessment> {
    let a = assess(text);
    if text.trim().is_empty() || a.matched.is_empty() {
        return Ok(a);
    }
    let subject: String = text.trim().chars().take(120).collect();
    ops::record_insight(
        conn,
        InsightWrite {
            engine: "novel",
            subject: &subject,
            verdict: a.verdict.as_str(),
            confidence: a.confidence,
            ts: now_sec(),
        },
    )?;
    Ok(a)
}
