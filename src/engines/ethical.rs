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

// ---------- Tunables ----------
const W_HARM: f32 = 0.40;
const W_FAIRNESS: f32 = 0.25;
const W_AUTONOMY: f32 = 0.20;
const W_UTILITY: f32 = 0.15;

const HARM_CUES: &[&str] = &[
    "harm", "hurt", "damage", "kill", "injure", "endanger", "destroy", "deceive", "exploit",
    "steal",
];
const MITIGATION_CUES: &[&str] = &["prevent", "avoid", "protect", "reduce", "mitigate", "safeguard"];
const FAIRNESS_CUES: &[&str] = &["fair", "fairly", "equal", "equitable", "just", "impartial", "unbiased", "share"];
const AUTONOMY_CUES: &[&str] = &["consent", "choice", "choose", "freedom", "voluntary", "permission", "agree"];
const UTILITY_CUES: &[&str] = &["benefit", "benefits", "welfare", "wellbeing", "improve", "help", "save"];

#[derive(Debug, Clone, PartialEq)]
pub struct EthicalAssessment {
    pub harm_risk: f32,
    pub fairness: f32,
    pub autonomy: f32,
    pub utility: f32,
    /// Weighted clearance; verdict bands live in `engines::Verdict`.
    pub clearance: f32,
    /// Fraction of axes with any lexicon evidence. Low coverage means
    /// the clearance rests on defaults, and the value says so.
    pub confidence: f32,
    pub verdict: Verdict,
}

pub fn assess(text: &str) -> EthicalAssessment {
    // Harm: cue words, downshifted when mitigation language is present
    let harm_word = text.contains_any_word(HARM_CUES);
    let mitigated = text.contains_any_word(MITIGATION_CUES);
    let harm_risk = if harm_word && !mitigated {
        0.85
    } else if harm_word {
        0.45
    } else {
        0.20
    };

    let fairness_hit = text.contains_any_word(FAIRNESS_CUES);
    let autonomy_hit = text.contains_any_word(AUTONOMY_CUES);
    let utility_hit = text.contains_any_word(UTILITY_CUES);
    let fairness = if fairness_hit { 0.70 } else { 0.25 };
    let autonomy = if autonomy_hit { 0.70 } else { 0.25 };
    let utility = if utility_hit { 0.70 } else { 0.25 };

    let clearance = ((1.0 - harm_risk) * W_HARM
        + fairness * W_FAIRNESS
        + autonomy * W_AUTONOMY
        + utility * W_UTILITY)
        .clamp(0.0, 1.0);

    let hit_axes = [harm_word || mitigated, fairness_hit, autonomy_hit, utility_hit]
        .iter()
        .filter(|h| **h)
        .count();
    let confidence = hit_axes as f32 / 4.0;

    EthicalAssessment {
        harm_risk,
        fairness,
        autonomy,
        utility,
        clearance,
        confidence,
        verdict: Verdict::for_score(clearance),
    }
}

/// Assess and record. Inputs with no lexicon evidence at all are
/// returned but not recorded; an event row means real evidence existed.
pub fn evaluate(conn: &Connection, text: &str) -> Result<EthicalAssessment> {
    let a = assess(text);
    if text.trim().is_empty() || a.confidence == 0.0 {
        return Ok(a);
    }
    let subject: String = text.trim().chars().take(120).collect();
    ops::record_insight(
        conn,
        InsightWrite {
            engine: "ethical",
            subject: &subject,
            verdict: a.verdict.as_str(),
            confidence: a.confidence,
            ts: now_sec(),
        },
    )?;
    Ok(a)
}
