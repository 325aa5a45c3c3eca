pub mod cross_domain;
pub mod ethical;
pub mod novel;
pub mod pattern;

use std::collections::HashSet;

pub const ACCEPT_THRESH: f32 = 0.60;
pub const REVIEW_THRESH: f32 = 0.30;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Verdict {
    Accept,
    Review,
    Reject,
}

impl Verdict {
    pub fn for_score(score: f32) -> Self {
        if score >= ACCEPT_THRESH {
            Verdict::Accept
        } else if score >= REVIEW_THRESH {
            Verdict::Review
        } else {
            Verdict::Reject
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Accept => "accept",
            Verdict::Review => "review",
            Verdict::Reject => "reject",
        }
    }
}

// ---------- text helpers ----------

pub(crate) fn word_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect()
}

pub(crate) trait ContainsAny {
    fn contains_any_word(&self, terms: &[&str]) -> bool;
    fn count_word_hits(&self, terms: &[&str]) -> usize;
}

impl ContainsAny for str {
    fn contains_any_word(&self, terms: &[&str]) -> bool {
        self.count_word_hits(terms) > 0
    }

    fn count_word_hits(&self, terms: &[&str]) -> usize {
        let words = word_set(self);
        terms
            .iter()
            .filter(|t| words.contains(t.to_lowercase().as_str()))
            .count()
    }
}
