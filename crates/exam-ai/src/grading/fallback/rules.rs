use super::config::ScoringConfig;
use crate::grading::domain::{Answer, Question, QuestionKind};

pub(crate) struct ScoredAnswer {
    pub score: u32,
    pub feedback: String,
}

pub(crate) fn score_answer(
    question: &Question,
    answer: &Answer,
    config: &ScoringConfig,
) -> ScoredAnswer {
    match question.kind {
        QuestionKind::MultipleChoice => score_multiple_choice(question, answer),
        QuestionKind::Concept | QuestionKind::Essay => score_open_ended(question, answer, config),
        QuestionKind::Calculation => score_calculation(question, answer, config),
    }
}

fn score_multiple_choice(question: &Question, answer: &Answer) -> ScoredAnswer {
    let Some(correct) = question.correct_answer.as_deref() else {
        return ScoredAnswer {
            score: 0,
            feedback: "No answer key available for this question.".to_string(),
        };
    };

    if answer.response.trim() == correct.trim() {
        ScoredAnswer {
            score: question.points,
            feedback: "Correct!".to_string(),
        }
    } else {
        ScoredAnswer {
            score: 0,
            feedback: format!("Incorrect. The correct answer was: {}", correct.trim()),
        }
    }
}

fn score_open_ended(question: &Question, answer: &Answer, config: &ScoringConfig) -> ScoredAnswer {
    let words = word_count(&answer.response);
    let credit = config.open_ended_credit(words);
    let score = scaled_points(question.points, credit);

    let detail = if words >= config.detailed_answer_words {
        "good"
    } else if words >= config.brief_answer_words {
        "adequate"
    } else {
        "limited"
    };

    ScoredAnswer {
        score,
        feedback: format!("Response shows {detail} detail ({words} words)."),
    }
}

fn score_calculation(question: &Question, answer: &Answer, config: &ScoringConfig) -> ScoredAnswer {
    let has_numeric = !answer.response.trim().is_empty();
    let work = answer.work_shown.as_deref().map(str::trim).unwrap_or("");

    let mut credit = 0.0;
    if has_numeric {
        credit += config.numeric_part_credit;
    }
    if !work.is_empty() {
        credit += config.work_shown_credit(work.chars().count());
    }

    let score = scaled_points(question.points, credit).min(question.points);

    let feedback = match (has_numeric, !work.is_empty()) {
        (true, true) => "Numeric result and supporting work provided.".to_string(),
        (true, false) => "Numeric result provided without supporting work.".to_string(),
        (false, true) => "Supporting work provided without a numeric result.".to_string(),
        (false, false) => "No numeric result or supporting work provided.".to_string(),
    };

    ScoredAnswer { score, feedback }
}

pub(crate) fn detect_strengths(
    question: &Question,
    answer: &Answer,
    config: &ScoringConfig,
) -> Vec<String> {
    let text = combined_text(answer);
    let lowered = text.to_lowercase();
    let mut strengths = Vec::new();

    if word_count(&text) >= config.detailed_answer_words {
        strengths.push("Provided detailed explanation".to_string());
    }

    if contains_any(&lowered, &config.example_keywords) {
        strengths.push("Included relevant examples".to_string());
    }

    if question.category == config.technical_category
        && contains_any(&lowered, &config.technical_keywords)
    {
        strengths.push("Demonstrated technical knowledge".to_string());
    }

    strengths
}

pub(crate) fn detect_improvements(
    question: &Question,
    answer: &Answer,
    config: &ScoringConfig,
) -> Vec<String> {
    if question.kind == QuestionKind::MultipleChoice {
        return Vec::new();
    }

    let text = combined_text(answer);
    let lowered = text.to_lowercase();
    let mut improvements = Vec::new();

    if word_count(&text) < config.brief_answer_words {
        improvements.push("Provide more detailed explanations".to_string());
    }

    if question.category == config.technical_category
        && !contains_any(&lowered, &config.technical_keywords)
    {
        improvements.push("Use more specific technical terminology".to_string());
    }

    if question.prompt.to_lowercase().contains("experience") && !lowered.contains("experience") {
        improvements.push("Relate answers to hands-on experience".to_string());
    }

    improvements
}

/// Whitespace-delimited word count; empty and blank answers count zero words.
pub(crate) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn combined_text(answer: &Answer) -> String {
    match answer.work_shown.as_deref() {
        Some(work) if !work.trim().is_empty() => format!("{} {}", answer.response, work),
        _ => answer.response.clone(),
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|needle| haystack.contains(needle.as_str()))
}

/// Integer truncation of `points * credit`, per the published rubric.
fn scaled_points(points: u32, credit: f64) -> u32 {
    (points as f64 * credit) as u32
}
