use anyhow::{bail, Result};
use rusqlite::Connection;
use std::collections::HashSet;

use crate::store::ops;
use crate::store::types::AnalogyWrite;

#[inline]
fn now_sec() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

pub struct DomainLexicon {
    pub name: &'static str,
    pub terms: &'static [&'static str],
}

pub fn builtin_domains() -> &'static [DomainLexicon] {
    &[
        DomainLexicon {
            name: "physics",
            terms: &[
                "energy", "flow", "force", "equilibrium", "wave", "resistance", "field",
                "momentum", "entropy", "feedback",
            ],
        },
        DomainLexicon {
            name: "biology",
            terms: &[
                "cell", "evolution", "adaptation", "flow", "network", "equilibrium", "signal",
                "mutation", "selection", "feedback",
            ],
        },
        DomainLexicon {
            name: "economics",
            terms: &[
                "market", "flow", "equilibrium", "incentive", "network", "exchange", "scarcity",
                "competition", "selection", "feedback",
            ],
        },
        DomainLexicon {
            name: "computing",
            terms: &[
                "network", "signal", "flow", "protocol", "cache", "state", "queue",
                "concurrency", "feedback", "resistance",
            ],
        },
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalogyResult {
    pub source: String,
    pub target: String,
    pub shared: Vec<String>,
    /// Jaccard index of the two term sets. Reported exactly as computed.
    pub strength: f32,
}

fn jaccard(a: &HashSet<&str>, b: &HashSet<&str>) -> f32 {
    let inter = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        0.0
    } else {
        inter as f32 / union as f32
    }
}

/// Map two named term sets onto each other by vocabulary overlap.
pub fn map_terms(
    source: &str,
    source_terms: &[&str],
    target: &str,
    target_terms: &[&str],
) -> Result<AnalogyResult> {
    if source == target {
        bail!("cannot map domain '{source}' onto itself");
    }
    let a: HashSet<&str> = source_terms.iter().copied().collect();
    let b: HashSet<&str> = target_terms.iter().copied().collect();
    let mut shared: Vec<String> = a.intersection(&b).map(|t| t.to_string()).collect();
    shared.sort();
    Ok(AnalogyResult {
        source: source.to_string(),
        target: target.to_string(),
        strength: jaccard(&a, &b),
        shared,
    })
}

fn lookup(name: &str) -> Result<&'static DomainLexicon> {
    builtin_domains()
        .iter()
        .find(|d| d.name == name)
        .ok_or_else(|| anyhow::anyhow!("unknown domain '{name}'"))
}

pub fn map_domains(source: &str, target: &str) -> Result<AnalogyResult> {
    let s = lookup(source)?;
    let t = lookup(target)?;
    map_terms(s.name, s.terms, t.name, t.terms)
}

/// Map and record. Zero-overlap mappings are returned but not stored;
/// an analogy row means shared vocabulary actually existed.
pub fn evaluate(conn: &Connection, source: &str, target: &str) -> Result<AnalogyResult> {
    let r = map_domains(source, target)?;
    if r.strength > 0.0 {
        ops::record_analogy(
            conn,
            AnalogyWrite {
                source_domain: &r.source,
                target_domain: &r.target,
                shared_terms: &r.shared.join(","),
                strength: r.strength,
                ts: now_sec(),
            },
        )?;
    }
    Ok(r)
}
