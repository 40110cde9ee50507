//! Exam grading pipeline: prompt construction, remote-response extraction,
//! deterministic fallback scoring, and report aggregation.
//!
//! Every type here is request-scoped; nothing survives a grading pass except
//! what the caller hands to a [`repository::ReportRepository`].

pub mod domain;
pub mod extract;
pub mod fallback;
pub mod gateway;
pub mod prompt;
pub mod questionbank;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Answer, CandidateProfile, CategoryScore, ExamMetadata, ExamReport, ExamSubmission,
    HiringRecommendation, Question, QuestionId, QuestionKind, QuestionResult, RecommendedLevel,
};
pub use extract::{extract_grading, ExtractError, RemoteGrading, RemoteQuestionGrading};
pub use fallback::{FallbackScorer, LengthTier, ScoringConfig, WordCountTier};
pub use gateway::{GraderGateway, GraderGatewayError, HttpGraderClient};
pub use prompt::build_grading_prompt;
pub use questionbank::{QuestionBankImportError, QuestionBankImporter};
pub use report::{aggregate, FeedbackBand, HiringBand, LevelLadder, ReportPolicy};
pub use repository::{
    GradingSource, ReportId, ReportRecord, ReportRepository, ReportSummaryView, RepositoryError,
};
pub use router::grading_router;
pub use service::{GradingService, GradingServiceError, ValidationError};
