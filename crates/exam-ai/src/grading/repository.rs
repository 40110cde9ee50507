use serde::{Deserialize, Serialize};

use crate::grading::domain::{ExamReport, QuestionId};

/// Identifier wrapper for stored reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub String);

/// Which path produced the report; surfaces in API responses so operators
/// can tell degraded grading apart from the AI-assisted kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradingSource {
    Remote,
    Fallback,
}

impl GradingSource {
    pub const fn label(self) -> &'static str {
        match self {
            GradingSource::Remote => "remote",
            GradingSource::Fallback => "fallback",
        }
    }
}

/// Repository record pairing a finished report with its provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: ReportId,
    pub source: GradingSource,
    pub report: ExamReport,
}

impl ReportRecord {
    /// Sanitized view for API responses.
    pub fn summary_view(&self) -> ReportSummaryView {
        ReportSummaryView {
            report_id: self.id.clone(),
            source: self.source.label(),
            candidate: self.report.candidate.full_name(),
            total_score: self.report.total_score,
            max_score: self.report.max_score,
            percentage: self.report.percentage,
            hiring_recommendation: self.report.hiring_recommendation.label(),
            weakest_question: weakest_question(&self.report),
        }
    }
}

fn weakest_question(report: &ExamReport) -> Option<QuestionId> {
    report
        .results
        .iter()
        .filter(|result| result.max_score > 0)
        .min_by(|a, b| {
            let left = a.score as f64 / a.max_score as f64;
            let right = b.score as f64 / b.max_score as f64;
            left.total_cmp(&right)
        })
        .map(|result| result.question_id.clone())
}

/// Storage abstraction so the grading service can be exercised in isolation.
pub trait ReportRepository: Send + Sync {
    fn insert(&self, record: ReportRecord) -> Result<ReportRecord, RepositoryError>;
    fn fetch(&self, id: &ReportId) -> Result<Option<ReportRecord>, RepositoryError>;
    fn recent(&self, limit: usize) -> Result<Vec<ReportRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Compact listing entry for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummaryView {
    pub report_id: ReportId,
    pub source: &'static str,
    pub candidate: String,
    pub total_score: u32,
    pub max_score: u32,
    pub percentage: f64,
    pub hiring_recommendation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weakest_question: Option<QuestionId>,
}
