use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::grading::domain::{
    Answer, CandidateProfile, ExamMetadata, ExamSubmission, Question, QuestionId, QuestionKind,
};
use crate::grading::fallback::{FallbackScorer, ScoringConfig};
use crate::grading::gateway::{GraderGateway, GraderGatewayError};
use crate::grading::report::ReportPolicy;
use crate::grading::repository::{ReportId, ReportRecord, ReportRepository, RepositoryError};
use crate::grading::service::GradingService;

pub(super) fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
}

pub(super) fn mc_question(id: &str, points: u32, correct: &str) -> Question {
    Question {
        id: QuestionId::from(id),
        kind: QuestionKind::MultipleChoice,
        category: "Technical".to_string(),
        prompt: "Which option applies?".to_string(),
        points,
        correct_answer: Some(correct.to_string()),
        options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        difficulty: Some("Easy".to_string()),
    }
}

pub(super) fn concept_question(id: &str, points: u32) -> Question {
    Question {
        id: QuestionId::from(id),
        kind: QuestionKind::Concept,
        category: "Technical".to_string(),
        prompt: "Explain how a load balancer distributes traffic.".to_string(),
        points,
        correct_answer: None,
        options: Vec::new(),
        difficulty: Some("Medium".to_string()),
    }
}

pub(super) fn essay_question(id: &str, points: u32) -> Question {
    Question {
        id: QuestionId::from(id),
        kind: QuestionKind::Essay,
        category: "Communication".to_string(),
        prompt: "Describe your experience leading a migration.".to_string(),
        points,
        correct_answer: None,
        options: Vec::new(),
        difficulty: None,
    }
}

pub(super) fn calc_question(id: &str, points: u32) -> Question {
    Question {
        id: QuestionId::from(id),
        kind: QuestionKind::Calculation,
        category: "Technical".to_string(),
        prompt: "Calculate the stress in the beam in MPa.".to_string(),
        points,
        correct_answer: Some("1.0 MPa".to_string()),
        options: Vec::new(),
        difficulty: Some("Hard".to_string()),
    }
}

pub(super) fn answer(id: &str, response: &str) -> Answer {
    Answer {
        question_id: QuestionId::from(id),
        response: response.to_string(),
        work_shown: None,
        time_spent_seconds: 60,
    }
}

pub(super) fn calc_answer(id: &str, numeric: &str, work: &str) -> Answer {
    Answer {
        question_id: QuestionId::from(id),
        response: numeric.to_string(),
        work_shown: if work.is_empty() {
            None
        } else {
            Some(work.to_string())
        },
        time_spent_seconds: 120,
    }
}

/// An answer with exactly `count` whitespace-separated words.
pub(super) fn words(count: usize) -> String {
    vec!["word"; count].join(" ")
}

pub(super) fn candidate() -> CandidateProfile {
    CandidateProfile {
        first_name: Some("Dana".to_string()),
        last_name: Some("Rivers".to_string()),
        position: Some("Backend Engineer".to_string()),
        experience: Some("Mid-level (3-5 years)".to_string()),
        education: Some("BSc Computer Science".to_string()),
    }
}

pub(super) fn submission(questions: Vec<Question>, answers: Vec<Answer>) -> ExamSubmission {
    ExamSubmission {
        questions,
        answers,
        candidate: candidate(),
        metadata: ExamMetadata::default(),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<ReportId, ReportRecord>>>,
}

impl MemoryRepository {
    pub(super) fn stored(&self) -> Vec<ReportRecord> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .values()
            .cloned()
            .collect()
    }
}

impl ReportRepository for MemoryRepository {
    fn insert(&self, record: ReportRecord) -> Result<ReportRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ReportId) -> Result<Option<ReportRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<ReportRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<ReportRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.id.0.cmp(&a.id.0));
        records.truncate(limit);
        Ok(records)
    }
}

/// Repository whose writes always fail; lookups still work.
#[derive(Default)]
pub(super) struct UnavailableRepository;

impl ReportRepository for UnavailableRepository {
    fn insert(&self, _record: ReportRecord) -> Result<ReportRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &ReportId) -> Result<Option<ReportRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<ReportRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

/// Gateway canned with a fixed response body.
#[derive(Debug)]
pub(super) struct StaticGateway {
    pub(super) response: String,
}

impl GraderGateway for StaticGateway {
    fn grade(&self, _prompt: &str) -> Result<String, GraderGatewayError> {
        Ok(self.response.clone())
    }
}

/// Gateway that fails every call with a transport error.
#[derive(Debug)]
pub(super) struct FailingGateway;

impl GraderGateway for FailingGateway {
    fn grade(&self, _prompt: &str) -> Result<String, GraderGatewayError> {
        Err(GraderGatewayError::Transport(
            "connection refused".to_string(),
        ))
    }
}

pub(super) fn offline_service(repository: Arc<MemoryRepository>) -> GradingService<MemoryRepository> {
    GradingService::new(
        repository,
        FallbackScorer::new(ScoringConfig::standard()),
        ReportPolicy::standard(),
    )
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body reads");
    serde_json::from_slice(&body).expect("body is json")
}
