//! Integration specifications for the exam grading workflow.
//!
//! Scenarios run end-to-end through the public service facade so the remote
//! overlay, fallback degradation, and aggregation are validated without
//! reaching into private modules.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, TimeZone, Utc};

    use exam_ai::grading::{
        Answer, CandidateProfile, ExamMetadata, ExamSubmission, FallbackScorer, GraderGateway,
        GraderGatewayError, GradingService, Question, QuestionId, QuestionKind, ReportId,
        ReportPolicy, ReportRecord, ReportRepository, RepositoryError, ScoringConfig,
    };

    pub(super) fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    }

    pub(super) fn question(id: &str, kind: QuestionKind, points: u32) -> Question {
        Question {
            id: QuestionId(id.to_string()),
            kind,
            category: "Technical".to_string(),
            prompt: "Walk through your approach.".to_string(),
            points,
            correct_answer: match kind {
                QuestionKind::MultipleChoice => Some("B".to_string()),
                _ => None,
            },
            options: match kind {
                QuestionKind::MultipleChoice => {
                    vec!["A".to_string(), "B".to_string(), "C".to_string()]
                }
                _ => Vec::new(),
            },
            difficulty: None,
        }
    }

    pub(super) fn answer(id: &str, response: &str) -> Answer {
        Answer {
            question_id: QuestionId(id.to_string()),
            response: response.to_string(),
            work_shown: None,
            time_spent_seconds: 90,
        }
    }

    pub(super) fn words(count: usize) -> String {
        vec!["word"; count].join(" ")
    }

    pub(super) fn submission(questions: Vec<Question>, answers: Vec<Answer>) -> ExamSubmission {
        ExamSubmission {
            questions,
            answers,
            candidate: CandidateProfile {
                first_name: Some("Sam".to_string()),
                last_name: Some("Okafor".to_string()),
                position: Some("Platform Engineer".to_string()),
                experience: Some("Senior (8 years)".to_string()),
                education: Some("MSc".to_string()),
            },
            metadata: ExamMetadata::default(),
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryRepository {
        records: Arc<Mutex<HashMap<ReportId, ReportRecord>>>,
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

    #[derive(Debug)]
    pub(super) struct CannedGateway {
        pub(super) response: Result<String, &'static str>,
    }

    impl GraderGateway for CannedGateway {
        fn grade(&self, _prompt: &str) -> Result<String, GraderGatewayError> {
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(reason) => Err(GraderGatewayError::Transport(reason.to_string())),
            }
        }
    }

    pub(super) fn service() -> GradingService<MemoryRepository> {
        GradingService::new(
            Arc::new(MemoryRepository::default()),
            FallbackScorer::new(ScoringConfig::standard()),
            ReportPolicy::standard(),
        )
    }
}

use common::*;
use exam_ai::grading::{GradingSource, HiringRecommendation, QuestionKind};

#[test]
fn correct_multiple_choice_answer_scores_full_points_offline() {
    let record = service()
        .grade_at(
            submission(
                vec![question("mc-1", QuestionKind::MultipleChoice, 10)],
                vec![answer("mc-1", "B")],
            ),
            fixed_time(),
        )
        .expect("grading succeeds");

    assert_eq!(record.source, GradingSource::Fallback);
    assert_eq!(record.report.results[0].score, 10);
    assert_eq!(record.report.results[0].feedback, "Correct!");
    assert_eq!(record.report.percentage, 100.0);
}

#[test]
fn short_essay_earns_floor_tier_credit() {
    let record = service()
        .grade_at(
            submission(
                vec![question("e-1", QuestionKind::Essay, 20)],
                vec![answer("e-1", &words(12))],
            ),
            fixed_time(),
        )
        .expect("grading succeeds");

    assert_eq!(record.report.results[0].score, 4, "0.2 * 20 truncated");
}

#[test]
fn mixed_exam_aggregates_scores_and_percentage() {
    let record = service()
        .grade_at(
            submission(
                vec![
                    question("mc-1", QuestionKind::MultipleChoice, 10),
                    question("e-1", QuestionKind::Essay, 10),
                ],
                vec![answer("mc-1", "B")],
            ),
            fixed_time(),
        )
        .expect("grading succeeds");

    assert_eq!(record.report.total_score, 12);
    assert_eq!(record.report.max_score, 20);
    assert_eq!(record.report.percentage, 60.0);
    assert_eq!(
        record.report.hiring_recommendation,
        HiringRecommendation::NoHire
    );
    assert_eq!(record.report.generated_at, fixed_time());
}

#[test]
fn fenced_remote_response_is_extracted_and_applied() {
    let gateway = CannedGateway {
        response: Ok("```json\n{\"score\": 90, \"feedback\": \"excellent\", \"recommendation\": \"Strong Hire\"}\n```".to_string()),
    };

    let record = service()
        .with_gateway(Box::new(gateway))
        .grade_at(
            submission(
                vec![question("mc-1", QuestionKind::MultipleChoice, 10)],
                vec![answer("mc-1", "B")],
            ),
            fixed_time(),
        )
        .expect("grading succeeds");

    assert_eq!(record.source, GradingSource::Remote);
    assert_eq!(record.report.overall_feedback, "excellent");
    assert_eq!(
        record.report.hiring_recommendation,
        HiringRecommendation::StrongHire
    );
}

#[test]
fn transport_failure_never_reaches_the_caller() {
    let gateway = CannedGateway {
        response: Err("connection reset by peer"),
    };

    let record = service()
        .with_gateway(Box::new(gateway))
        .grade_at(
            submission(
                vec![question("mc-1", QuestionKind::MultipleChoice, 10)],
                vec![answer("mc-1", "B")],
            ),
            fixed_time(),
        )
        .expect("fallback covers the failure");

    assert_eq!(record.source, GradingSource::Fallback);
    assert_eq!(record.report.total_score, 10);
}

#[test]
fn graded_report_is_fetchable_by_id() {
    let service = service();
    let record = service
        .grade_at(
            submission(
                vec![question("mc-1", QuestionKind::MultipleChoice, 10)],
                vec![answer("mc-1", "B")],
            ),
            fixed_time(),
        )
        .expect("grading succeeds");

    let fetched = service.report(&record.id).expect("report found");
    assert_eq!(fetched.report.total_score, record.report.total_score);
}
