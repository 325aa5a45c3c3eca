use anyhow::Result;
use regex::Regex;
use rusqlite::Connection;

use crate::store::ops;
use crate::store::types::PatternWrite;

#[inline]
fn now_sec() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PatternKind {
    Arithmetic,
    Geometric,
    Repetition,
    Alternation,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Arithmetic => "arithmetic",
            PatternKind::Geometric => "geometric",
            PatternKind::Repetition => "repetition",
            PatternKind::Alternation => "alternation",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternHit {
    pub kind: PatternKind,
    /// Fraction of adjacent element pairs consistent with the rule.
    /// Derived from the sequence itself; never adjusted afterward.
    pub confidence: f32,
    pub description: String,
}

// Hits below this are noise, not a pattern worth recording.
const MIN_CONFIDENCE: f32 = 0.60;

fn numbers(text: &str) -> Vec<f64> {
    let re = Regex::new(r"-?\d+(?:\.\d+)?").unwrap();
    re.find_iter(text)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Fraction of adjacent pairs whose delta matches the first delta.
fn step_consistency(xs: &[f64], delta: impl Fn(f64, f64) -> Option<f64>) -> Option<f32> {
    if xs.len() < 3 {
        return None;
    }
    let first = delta(xs[0], xs[1])?;
    let mut pairs = 0usize;
    let mut hits = 0usize;
    for w in xs.windows(2) {
        pairs += 1;
        if let Some(d) = delta(w[0], w[1]) {
            if (d - first).abs() < 1e-9 {
                hits += 1;
            }
        }
    }
    Some(hits as f32 / pairs as f32)
}

pub fn detect(text: &str) -> Vec<PatternHit> {
    let mut out = Vec::new();
    let nums = numbers(text);

    // A constant sequence satisfies both rules; difference wins.
    let arith = step_consistency(&nums, |a, b| Some(b - a)).filter(|c| *c >= MIN_CONFIDENCE);
    if let Some(c) = arith {
        out.push(PatternHit {
            kind: PatternKind::Arithmetic,
            confidence: c.clamp(0.0, 1.0),
            description: format!("constant difference over {} numbers", nums.len()),
        });
    } else if let Some(c) =
        step_consistency(&nums, |a, b| if a.abs() > 1e-12 { Some(b / a) } else { None })
            .filter(|c| *c >= MIN_CONFIDENCE)
    {
        out.push(PatternHit {
            kind: PatternKind::Geometric,
            confidence: c.clamp(0.0, 1.0),
            description: format!("constant ratio over {} numbers", nums.len()),
        });
    }

    let toks = tokens(text);
    if toks.len() >= 4 {
        // Repetition: one token dominating the stream
        let mut best = 0usize;
        for t in &toks {
            let n = toks.iter().filter(|x| *x == t).count();
            if n > best {
                best = n;
            }
        }
        let rep = best as f32 / toks.len() as f32;
        if rep >= MIN_CONFIDENCE {
            out.push(PatternHit {
                kind: PatternKind::Repetition,
                confidence: rep.clamp(0.0, 1.0),
                description: format!("dominant token covers {best}/{} positions", toks.len()),
            });
        }

        // Alternation: ABAB over the token stream
        if toks[0] != toks[1] {
            let mut pairs = 0usize;
            let mut hits = 0usize;
            for (i, w) in toks.windows(2).enumerate() {
                pairs += 1;
                let expect = if i % 2 == 0 { (&toks[0], &toks[1]) } else { (&toks[1], &toks[0]) };
                if (&w[0], &w[1]) == expect {
                    hits += 1;
                }
            }
            let alt = hits as f32 / pairs as f32;
            if alt >= MIN_CONFIDENCE {
                out.push(PatternHit {
                    kind: PatternKind::Alternation,
                    confidence: alt.clamp(0.0, 1.0),
                    description: format!("two-token alternation over {} tokens", toks.len()),
                });
            }
        }
    }

    out
}

/// Detect and record. Empty input records nothing.
pub fn evaluate(conn: &Connection, text: &str) -> Result<Vec<PatternHit>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let hits = detect(text);
    let ts = now_sec();
    for h in &hits {
        ops::record_pattern(
            conn,
            PatternWrite {
                pattern_type: h.kind.as_str(),
                snippet: text.trim(),
                confidence: h.confidence,
                ts,
            },
        )?;
    }
    Ok(hits)
}
