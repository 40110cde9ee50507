use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for exam questions and the answers that reference them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub String);

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Question families the exam builder can mix within one assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "multiple-choice", alias = "multipleChoice", alias = "multiple_choice")]
    MultipleChoice,
    #[serde(rename = "concepts", alias = "concept")]
    Concept,
    #[serde(rename = "calculations", alias = "calculation")]
    Calculation,
    #[serde(rename = "essay")]
    Essay,
}

impl QuestionKind {
    pub const fn label(self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "multiple-choice",
            QuestionKind::Concept => "concepts",
            QuestionKind::Calculation => "calculations",
            QuestionKind::Essay => "essay",
        }
    }

    /// Open-ended kinds are graded on prose rather than an exact key.
    pub const fn is_open_ended(self) -> bool {
        matches!(self, QuestionKind::Concept | QuestionKind::Essay)
    }
}

/// A single exam question, immutable for the duration of a grading pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub category: String,
    pub prompt: String,
    pub points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

/// A candidate's response to one question.
///
/// Calculation questions split into a numeric result (`response`) and the
/// supporting work (`work_shown`); every other kind uses `response` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    #[serde(default)]
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_shown: Option<String>,
    #[serde(default)]
    pub time_spent_seconds: u32,
}

/// Candidate details rendered into the grading prompt and the final report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
}

impl CandidateProfile {
    /// Absent fields render as stable placeholders so the prompt shape never
    /// varies with missing metadata.
    pub fn full_name(&self) -> String {
        let first = self.first_name.as_deref().map(str::trim).unwrap_or("");
        let last = self.last_name.as_deref().map(str::trim).unwrap_or("");
        let joined = format!("{first} {last}");
        let joined = joined.trim();
        if joined.is_empty() {
            "Unknown".to_string()
        } else {
            joined.to_string()
        }
    }

    pub fn position_label(&self) -> &str {
        non_blank(self.position.as_deref()).unwrap_or("Unknown")
    }

    pub fn experience_label(&self) -> &str {
        non_blank(self.experience.as_deref()).unwrap_or("Not specified")
    }

    pub fn education_label(&self) -> &str {
        non_blank(self.education.as_deref()).unwrap_or("Not specified")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Request-scoped metadata attached to a grading pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent_seconds: Option<u32>,
}

/// The complete grading request: question set, answer sheet, and candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamSubmission {
    pub questions: Vec<Question>,
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub candidate: CandidateProfile,
    #[serde(default)]
    pub metadata: ExamMetadata,
}

/// Per-question grading outcome; `score` never exceeds `max_score`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question_id: QuestionId,
    pub score: u32,
    pub max_score: u32,
    pub feedback: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    pub category: String,
}

/// Score earned within one question category, in first-seen category order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: u32,
    pub max_score: u32,
}

/// Final aggregated report handed back to the caller and to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamReport {
    pub candidate: CandidateProfile,
    pub results: Vec<QuestionResult>,
    pub total_score: u32,
    pub max_score: u32,
    pub percentage: f64,
    pub category_scores: Vec<CategoryScore>,
    pub overall_feedback: String,
    pub key_strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub recommended_level: RecommendedLevel,
    pub hiring_recommendation: HiringRecommendation,
    pub questions_answered: usize,
    pub time_spent_seconds: u32,
    pub generated_at: DateTime<Utc>,
}

/// Seniority rung suggested by the aggregate performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendedLevel {
    Entry,
    Junior,
    MidLevel,
    Senior,
    Expert,
}

impl RecommendedLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RecommendedLevel::Entry => "Entry",
            RecommendedLevel::Junior => "Junior",
            RecommendedLevel::MidLevel => "Mid-Level",
            RecommendedLevel::Senior => "Senior",
            RecommendedLevel::Expert => "Expert",
        }
    }
}

/// Hiring verdict derived from the percentage bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HiringRecommendation {
    StrongHire,
    Hire,
    Maybe,
    NoHire,
}

impl HiringRecommendation {
    pub const fn label(self) -> &'static str {
        match self {
            HiringRecommendation::StrongHire => "Strong Hire",
            HiringRecommendation::Hire => "Hire",
            HiringRecommendation::Maybe => "Maybe",
            HiringRecommendation::NoHire => "No Hire",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strong hire" | "strong_hire" | "stronghire" => Some(Self::StrongHire),
            "hire" => Some(Self::Hire),
            "maybe" | "consider" => Some(Self::Maybe),
            "no hire" | "no_hire" | "nohire" | "reject" => Some(Self::NoHire),
            _ => None,
        }
    }
}
