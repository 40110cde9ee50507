use serde::{Deserialize, Serialize};

/// One step of the open-ended word-count ladder: answers with at least
/// `min_words` words earn `credit` of the question's points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCountTier {
    pub min_words: usize,
    pub credit: f64,
}

/// One step of the work-shown ladder: explanations strictly longer than
/// `min_chars` characters earn `credit` of the question's points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthTier {
    pub min_chars: usize,
    pub credit: f64,
}

/// Rubric configuration for the deterministic fallback scorer.
///
/// Historical deployments of the grading worker never settled on one set of
/// thresholds, so every number lives here rather than in the rules. The
/// associated constructors capture the variants that shipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Word-count ladder for concept and essay answers, highest rung first.
    pub open_ended_tiers: Vec<WordCountTier>,
    /// Share of points a non-blank numeric result earns on calculations.
    pub numeric_part_credit: f64,
    /// Character-length ladder for calculation work-shown, highest rung first.
    pub work_shown_tiers: Vec<LengthTier>,
    /// Word count at or above which an answer counts as a detailed explanation.
    pub detailed_answer_words: usize,
    /// Word count below which an answer is flagged as too brief.
    pub brief_answer_words: usize,
    /// Substrings whose presence counts as citing concrete examples.
    pub example_keywords: Vec<String>,
    /// Substrings whose presence counts as technical vocabulary.
    pub technical_keywords: Vec<String>,
    /// Category name the technical-keyword checks apply to.
    pub technical_category: String,
}

impl ScoringConfig {
    /// Canonical scheme: 100/50/20-word rungs at 90/70/50/20 percent.
    pub fn standard() -> Self {
        Self {
            open_ended_tiers: vec![
                WordCountTier { min_words: 100, credit: 0.9 },
                WordCountTier { min_words: 50, credit: 0.7 },
                WordCountTier { min_words: 20, credit: 0.5 },
                WordCountTier { min_words: 0, credit: 0.2 },
            ],
            numeric_part_credit: 0.4,
            work_shown_tiers: vec![
                LengthTier { min_chars: 300, credit: 0.6 },
                LengthTier { min_chars: 150, credit: 0.45 },
                LengthTier { min_chars: 50, credit: 0.3 },
                LengthTier { min_chars: 0, credit: 0.15 },
            ],
            detailed_answer_words: 50,
            brief_answer_words: 30,
            example_keywords: keywords(&["example", "experience", "project"]),
            technical_keywords: keywords(&["api", "database", "framework", "library"]),
            technical_category: "Technical".to_string(),
        }
    }

    /// Thresholds of the first deployed grading worker: a flatter 50/20-word
    /// ladder at 80/60/30 percent.
    pub fn legacy_worker() -> Self {
        Self {
            open_ended_tiers: vec![
                WordCountTier { min_words: 50, credit: 0.8 },
                WordCountTier { min_words: 20, credit: 0.6 },
                WordCountTier { min_words: 0, credit: 0.3 },
            ],
            ..Self::standard()
        }
    }

    /// Credit for an open-ended answer with `words` words. Tiers are scanned
    /// top down; the trailing `min_words: 0` rung makes the ladder total.
    pub fn open_ended_credit(&self, words: usize) -> f64 {
        self.open_ended_tiers
            .iter()
            .find(|tier| words >= tier.min_words)
            .map(|tier| tier.credit)
            .unwrap_or(0.0)
    }

    /// Credit for a non-blank work-shown section of `chars` characters.
    pub fn work_shown_credit(&self, chars: usize) -> f64 {
        self.work_shown_tiers
            .iter()
            .find(|tier| chars > tier.min_chars || tier.min_chars == 0)
            .map(|tier| tier.credit)
            .unwrap_or(0.0)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::standard()
    }
}

fn keywords(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
