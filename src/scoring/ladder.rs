use anyhow::{bail, Result};

/// One step of a ladder: any value at or above `threshold` earns `score`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rung {
    pub threshold: f64,
    pub score: f64,
}

/// Maps a scalar metric value to a 0..100 score.
///
/// Rungs are checked top-down (descending thresholds). Below the lowest
/// rung the value earns `value * per_unit`, clamped between `fallback`
/// and the lowest rung's score so the mapping stays monotone. Zero or
/// negative values, and collection errors upstream, earn `fallback`.
#[derive(Debug, Clone)]
pub struct ThresholdLadder {
    rungs: Vec<Rung>,
    per_unit: f64,
    fallback: f64,
}

impl ThresholdLadder {
    pub fn new(rungs: Vec<Rung>, per_unit: f64, fallback: f64) -> Result<Self> {
        if rungs.is_empty() {
            bail!("ladder needs at least one rung");
        }
        for w in rungs.windows(2) {
            if w[1].threshold >= w[0].threshold {
                bail!(
                    "ladder thresholds must strictly descend ({} then {})",
                    w[0].threshold, w[1].threshold
                );
            }
            if w[1].score > w[0].score {
                bail!(
                    "ladder scores must not increase downward ({} then {})",
                    w[0].score, w[1].score
                );
            }
        }
        let lowest = rungs.last().map(|r| r.score).unwrap_or(0.0);
        for r in &rungs {
            if r.threshold <= 0.0 {
                bail!("ladder thresholds must be positive (got {})", r.threshold);
            }
            if !(0.0..=100.0).contains(&r.score) {
                bail!("ladder scores must lie in 0..=100 (got {})", r.score);
            }
        }
        if per_unit < 0.0 {
            bail!("per_unit must be non-negative (got {per_unit})");
        }
        if !(0.0..=lowest).contains(&fallback) {
            bail!("fallback {fallback} must lie in 0..={lowest}");
        }
        Ok(Self { rungs, per_unit, fallback })
    }

    pub fn fallback(&self) -> f64 {
        self.fallback
    }

    pub fn score(&self, value: f64) -> f64 {
        if value <= 0.0 {
            return self.fallback;
        }
        for r in &self.rungs {
            if value >= r.threshold {
                return r.score;
            }
        }
        let lowest = self.rungs.last().map(|r| r.score).unwrap_or(self.fallback);
        (value * self.per_unit).clamp(self.fallback, lowest)
    }

    /// The recurring count ladder: >=50 -> 100, >=20 -> 80, else 2 per row.
    pub fn count_default() -> Self {
        Self::new(
            vec![
                Rung { threshold: 50.0, score: 100.0 },
                Rung { threshold: 20.0, score: 80.0 },
            ],
            2.0,
            0.0,
        )
        .unwrap()
    }

    /// Ladder for percentage-valued metrics (mean confidence x100):
    /// >=80 -> 100, >=60 -> 80, else the value itself, floored at 30.
    pub fn percent_default() -> Self {
        Self::new(
            vec![
                Rung { threshold: 80.0, score: 100.0 },
                Rung { threshold: 60.0, score: 80.0 },
            ],
            1.0,
            30.0,
        )
        .unwrap()
    }
}
