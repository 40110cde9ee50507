use crate::infra::{build_grading_service, InMemoryReportRepository};
use clap::Args;
use exam_ai::config::GraderConfig;
use exam_ai::error::AppError;
use exam_ai::grading::{
    Answer, CandidateProfile, ExamMetadata, ExamSubmission, QuestionBankImporter, ReportRecord,
};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const SAMPLE_BANK_CSV: &str = "\
ID,Question,Type,Category,Difficulty,Points,Options,Correct Answer
mc-1,Which HTTP method is idempotent by specification?,multipleChoice,Technical,Easy,10,GET|POST|PATCH,GET
c-1,Explain how a reverse proxy distributes load across replicas.,concepts,Technical,Medium,10,,
calc-1,A beam with a 0.5 m² cross-section carries 500 kN. Calculate the stress in MPa.,calculations,Technical,Hard,10,,1.0 MPa
e-1,Describe a production incident you resolved and what you changed afterwards.,essay,Behavioral,Medium,20,,
";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Emit the full report as pretty-printed JSON instead of the summary.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct GradeArgs {
    /// Question bank CSV export to grade against
    #[arg(long)]
    pub(crate) questions: PathBuf,
    /// Answer sheet JSON file (array of answers)
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Optional candidate profile JSON file
    #[arg(long)]
    pub(crate) candidate: Option<PathBuf>,
    /// Emit the full report as pretty-printed JSON instead of the summary.
    #[arg(long)]
    pub(crate) json: bool,
}

/// Grades happen offline in both CLI paths; the remote gateway stays
/// detached so demos run without credentials or network access.
fn offline_grader_config() -> GraderConfig {
    GraderConfig {
        api_key: None,
        endpoint: String::new(),
        model: String::new(),
        timeout_secs: 30,
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let questions = QuestionBankImporter::from_reader(Cursor::new(SAMPLE_BANK_CSV))?;

    let answers = vec![
        Answer {
            question_id: "mc-1".into(),
            response: "GET".to_string(),
            work_shown: None,
            time_spent_seconds: 40,
        },
        Answer {
            question_id: "c-1".into(),
            response: "A reverse proxy terminates the connection and forwards requests to \
healthy replicas, usually round-robin or least-connections. In a recent project we used \
one in front of three API replicas with health checks so a failing database connection \
on one node drained traffic to the others."
                .to_string(),
            work_shown: None,
            time_spent_seconds: 300,
        },
        Answer {
            question_id: "calc-1".into(),
            response: "1.0 MPa".to_string(),
            work_shown: Some(
                "Stress = Force / Area = 500,000 N / 0.5 m² = 1,000,000 Pa = 1.0 MPa".to_string(),
            ),
            time_spent_seconds: 240,
        },
    ];

    let submission = ExamSubmission {
        questions,
        answers,
        candidate: CandidateProfile {
            first_name: Some("Alex".to_string()),
            last_name: Some("Moreno".to_string()),
            position: Some("Backend Engineer".to_string()),
            experience: Some("Mid-level (4 years)".to_string()),
            education: Some("BSc Computer Engineering".to_string()),
        },
        metadata: ExamMetadata {
            exam_id: Some("demo-exam".to_string()),
            time_spent_seconds: None,
        },
    };

    println!("Exam grading demo (fallback scorer, no remote credential)");
    let record = grade_offline(submission)?;
    render_report(&record, args.json);
    Ok(())
}

pub(crate) fn run_grade(args: GradeArgs) -> Result<(), AppError> {
    let questions = QuestionBankImporter::from_path(&args.questions)?;
    let answers: Vec<Answer> = read_json(&args.answers)?;
    let candidate = match &args.candidate {
        Some(path) => read_json(path)?,
        None => CandidateProfile::default(),
    };

    let submission = ExamSubmission {
        questions,
        answers,
        candidate,
        metadata: ExamMetadata::default(),
    };

    let record = grade_offline(submission)?;
    render_report(&record, args.json);
    Ok(())
}

fn grade_offline(submission: ExamSubmission) -> Result<ReportRecord, AppError> {
    let repository = Arc::new(InMemoryReportRepository::default());
    let service = build_grading_service(repository, &offline_grader_config());
    Ok(service.grade(submission)?)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let file = std::fs::File::open(path)?;
    serde_json::from_reader(file).map_err(|err| {
        AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    })
}

fn render_report(record: &ReportRecord, as_json: bool) {
    if as_json {
        match serde_json::to_string_pretty(record) {
            Ok(rendered) => println!("{rendered}"),
            Err(err) => eprintln!("could not render report: {err}"),
        }
        return;
    }

    let report = &record.report;
    println!();
    println!("Report {} ({} grading)", record.id.0, record.source.label());
    println!("Candidate: {}", report.candidate.full_name());
    println!(
        "Score: {}/{} ({:.1}%)",
        report.total_score, report.max_score, report.percentage
    );
    for entry in &report.category_scores {
        println!("  {}: {}/{}", entry.category, entry.score, entry.max_score);
    }
    println!("Feedback: {}", report.overall_feedback);
    if !report.key_strengths.is_empty() {
        println!("Strengths:");
        for strength in &report.key_strengths {
            println!("  - {strength}");
        }
    }
    if !report.areas_for_improvement.is_empty() {
        println!("Areas for improvement:");
        for improvement in &report.areas_for_improvement {
            println!("  - {improvement}");
        }
    }
    println!(
        "Recommended level: {} | Hiring recommendation: {}",
        report.recommended_level.label(),
        report.hiring_recommendation.label()
    );
}
