use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use super::domain::{Answer, ExamSubmission, Question, QuestionResult};
use super::extract::{extract_grading, RemoteGrading, RemoteQuestionGrading};
use super::fallback::FallbackScorer;
use super::gateway::GraderGateway;
use super::prompt::build_grading_prompt;
use super::report::{self, ReportPolicy};
use super::repository::{GradingSource, ReportId, ReportRecord, ReportRepository, RepositoryError};

const TOP_FLAGS: usize = 3;

static REPORT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_report_id() -> ReportId {
    let id = REPORT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ReportId(format!("rpt-{id:06}"))
}

/// Service composing the remote gateway, fallback scorer, and report policy.
///
/// The remote path is strictly best-effort: credential, transport, and parse
/// failures all degrade to the deterministic scorer without surfacing to the
/// caller. Only malformed submissions and repository lookups report errors.
pub struct GradingService<R> {
    gateway: Option<Box<dyn GraderGateway>>,
    scorer: FallbackScorer,
    policy: ReportPolicy,
    repository: Arc<R>,
}

impl<R> GradingService<R>
where
    R: ReportRepository + 'static,
{
    pub fn new(repository: Arc<R>, scorer: FallbackScorer, policy: ReportPolicy) -> Self {
        Self {
            gateway: None,
            scorer,
            policy,
            repository,
        }
    }

    /// Attach the remote grading gateway; without one every request grades
    /// on the fallback scorer alone.
    pub fn with_gateway(mut self, gateway: Box<dyn GraderGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn grade(&self, submission: ExamSubmission) -> Result<ReportRecord, GradingServiceError> {
        self.grade_at(submission, Utc::now())
    }

    /// Grade with an injected timestamp so tests stay deterministic.
    pub fn grade_at(
        &self,
        submission: ExamSubmission,
        generated_at: DateTime<Utc>,
    ) -> Result<ReportRecord, GradingServiceError> {
        if submission.questions.is_empty() {
            return Err(ValidationError::NoQuestions.into());
        }
        if submission.answers.is_empty() {
            return Err(ValidationError::NoAnswers.into());
        }

        let remote = self.try_remote(&submission);
        let source = if remote.is_some() {
            GradingSource::Remote
        } else {
            GradingSource::Fallback
        };

        // Questions drive the result set: unanswered questions grade against
        // an empty response, answers for unknown question ids are skipped.
        let results: Vec<QuestionResult> = submission
            .questions
            .iter()
            .map(|question| {
                let fallback = match answer_for(&submission.answers, question) {
                    Some(answer) => self.scorer.score(question, answer),
                    None => self.scorer.score_unanswered(question),
                };

                match remote
                    .as_ref()
                    .and_then(|grading| grading.question_results.get(&question.id.0))
                {
                    Some(entry) => merge_remote(fallback, entry, question.points),
                    None => fallback,
                }
            })
            .collect();

        let mut metadata = submission.metadata.clone();
        if metadata.time_spent_seconds.is_none() {
            metadata.time_spent_seconds = Some(
                submission
                    .answers
                    .iter()
                    .map(|answer| answer.time_spent_seconds)
                    .sum(),
            );
        }

        let mut report = report::aggregate(
            results,
            submission.candidate,
            &metadata,
            &self.policy,
            generated_at,
        );

        if let Some(remote) = remote {
            report.overall_feedback = remote.feedback;
            if let Some(recommendation) = remote.recommendation {
                report.hiring_recommendation = recommendation;
            }
            if !remote.strengths.is_empty() {
                report.key_strengths = truncated(remote.strengths);
            }
            if !remote.improvements.is_empty() {
                report.areas_for_improvement = truncated(remote.improvements);
            }
        }

        let record = ReportRecord {
            id: next_report_id(),
            source,
            report,
        };

        // Persistence is a post-condition side effect; a failing store must
        // not cost the caller an already-computed report.
        match self.repository.insert(record.clone()) {
            Ok(stored) => Ok(stored),
            Err(err) => {
                warn!(error = %err, "report store failed; returning unstored report");
                Ok(record)
            }
        }
    }

    /// Fetch a stored report for API responses.
    pub fn report(&self, id: &ReportId) -> Result<ReportRecord, GradingServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn recent_reports(&self, limit: usize) -> Result<Vec<ReportRecord>, GradingServiceError> {
        Ok(self.repository.recent(limit)?)
    }

    fn try_remote(&self, submission: &ExamSubmission) -> Option<RemoteGrading> {
        let gateway = self.gateway.as_ref()?;
        let prompt = build_grading_prompt(
            &submission.questions,
            &submission.answers,
            &submission.candidate,
        );

        match gateway.grade(&prompt) {
            Ok(text) => match extract_grading(&text) {
                Ok(grading) => Some(grading),
                Err(err) => {
                    warn!(error = %err, "discarding unparseable grading response");
                    None
                }
            },
            Err(err) => {
                warn!(error = %err, "remote grading unavailable");
                None
            }
        }
    }
}

fn answer_for<'a>(answers: &'a [Answer], question: &Question) -> Option<&'a Answer> {
    answers
        .iter()
        .find(|answer| answer.question_id == question.id)
}

/// Overlay a remote per-question verdict onto the fallback result, keeping
/// the fallback's fields wherever the model left a gap. The remote score is
/// clamped into the question's point budget.
fn merge_remote(
    fallback: QuestionResult,
    remote: &RemoteQuestionGrading,
    points: u32,
) -> QuestionResult {
    let QuestionResult {
        question_id,
        score: _,
        max_score,
        feedback,
        strengths,
        improvements,
        category,
    } = fallback;

    QuestionResult {
        question_id,
        score: (remote.score.min(points as f64).round() as u32).min(points),
        max_score,
        feedback: remote
            .feedback
            .clone()
            .filter(|feedback| !feedback.trim().is_empty())
            .unwrap_or(feedback),
        strengths: if remote.strengths.is_empty() {
            strengths
        } else {
            remote.strengths.clone()
        },
        improvements: if remote.improvements.is_empty() {
            improvements
        } else {
            remote.improvements.clone()
        },
        category,
    }
}

fn truncated(mut values: Vec<String>) -> Vec<String> {
    values.truncate(TOP_FLAGS);
    values
}

/// Rejections for submissions the pipeline cannot meaningfully grade.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("submission contains no questions")]
    NoQuestions,
    #[error("submission contains no answers")]
    NoAnswers,
}

/// Error raised by the grading service.
#[derive(Debug, thiserror::Error)]
pub enum GradingServiceError {
    #[error("invalid submission: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
