#[derive(Clone)]
pub struct PatternWrite<'a> {
    pub pattern_type: &'a str,      // 'arithmetic','geometric','repetition','alternation'
    pub snippet: &'a str,
    pub confidence: f32,            // 0..1, clamped by the engine before write
    pub ts: i64,                    // unix seconds
}

#[derive(Clone)]
pub struct KnowledgeWrite<'a> {
    pub content: &'a str,
    pub source: &'a str,            // 'api','cli','test'
    pub ts: i64,
}

#[derive(Clone)]
pub struct InsightWrite<'a> {
    pub engine: &'a str,            // 'ethical','novel'
    pub subject: &'a str,
    pub verdict: &'a str,           // 'accept','review','reject'
    pub confidence: f32,
    pub ts: i64,
}

#[derive(Clone)]
pub struct AnalogyWrite<'a> {
    pub source_domain: &'a str,
    pub target_domain: &'a str,
    pub shared_terms: &'a str,      // comma-joined overlap terms
    pub strength: f32,              // Jaccard index, never boosted
    pub ts: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct RunRow {
    pub id: i64,
    pub started_at: i64,
    pub finished_at: i64,
    pub overall: f64,
}
