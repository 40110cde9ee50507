mod config;
mod rules;

pub use config::{LengthTier, ScoringConfig, WordCountTier};

use crate::grading::domain::{Answer, Question, QuestionResult};

/// Deterministic scorer applied when the remote grading path is unavailable.
///
/// Scoring is total: any question/answer pair produces a result, with missing
/// data defaulting to zero credit rather than an error. This is the last line
/// of defense after the primary path has already failed.
#[derive(Debug, Clone)]
pub struct FallbackScorer {
    config: ScoringConfig,
}

impl FallbackScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, question: &Question, answer: &Answer) -> QuestionResult {
        let scored = rules::score_answer(question, answer, &self.config);

        QuestionResult {
            question_id: question.id.clone(),
            score: scored.score.min(question.points),
            max_score: question.points,
            feedback: scored.feedback,
            strengths: rules::detect_strengths(question, answer, &self.config),
            improvements: rules::detect_improvements(question, answer, &self.config),
            category: question.category.clone(),
        }
    }

    /// Score a question nobody answered; equivalent to an empty response.
    pub fn score_unanswered(&self, question: &Question) -> QuestionResult {
        let blank = Answer {
            question_id: question.id.clone(),
            response: String::new(),
            work_shown: None,
            time_spent_seconds: 0,
        };
        self.score(question, &blank)
    }
}

impl Default for FallbackScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::standard())
    }
}
