mod policy;

pub use policy::{FeedbackBand, HiringBand, LevelLadder, ReportPolicy};

use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::grading::domain::{
    CandidateProfile, CategoryScore, ExamMetadata, ExamReport, QuestionResult,
};

const TOP_FLAGS: usize = 3;

/// Merge per-question results into the final report.
///
/// Pure aside from the caller-supplied `generated_at`; the HTTP layer passes
/// `Utc::now()` while tests pin a fixed instant.
pub fn aggregate(
    results: Vec<QuestionResult>,
    candidate: CandidateProfile,
    metadata: &ExamMetadata,
    policy: &ReportPolicy,
    generated_at: DateTime<Utc>,
) -> ExamReport {
    let total_score: u32 = results.iter().map(|result| result.score).sum();
    let max_score: u32 = results.iter().map(|result| result.max_score).sum();
    let percentage = if max_score > 0 {
        total_score as f64 / max_score as f64 * 100.0
    } else {
        0.0
    };

    let category_scores = category_breakdown(&results);
    let key_strengths = top_by_frequency(
        results.iter().flat_map(|result| result.strengths.iter()),
        TOP_FLAGS,
    );
    let areas_for_improvement = top_by_frequency(
        results.iter().flat_map(|result| result.improvements.iter()),
        TOP_FLAGS,
    );

    let overall_feedback = format!(
        "Scored {total_score} out of {max_score} points ({percentage:.1}%). {}",
        policy.feedback_for(percentage)
    );
    let recommended_level = policy.level_for(percentage, candidate.experience_label());
    let hiring_recommendation = policy.hiring_for(percentage);

    let questions_answered = results.len();
    let time_spent_seconds = metadata.time_spent_seconds.unwrap_or(0);

    ExamReport {
        candidate,
        total_score,
        max_score,
        percentage: round_tenths(percentage),
        category_scores,
        overall_feedback,
        key_strengths,
        areas_for_improvement,
        recommended_level,
        hiring_recommendation,
        results,
        questions_answered,
        time_spent_seconds,
        generated_at,
    }
}

fn category_breakdown(results: &[QuestionResult]) -> Vec<CategoryScore> {
    let mut breakdown: Vec<CategoryScore> = Vec::new();

    for result in results {
        match breakdown
            .iter_mut()
            .find(|entry| entry.category == result.category)
        {
            Some(entry) => {
                entry.score += result.score;
                entry.max_score += result.max_score;
            }
            None => breakdown.push(CategoryScore {
                category: result.category.clone(),
                score: result.score,
                max_score: result.max_score,
            }),
        }
    }

    breakdown
}

/// Top `limit` flags by frequency. Candidates are kept in first-seen order
/// and the sort is stable, so equal counts tie-break deterministically.
fn top_by_frequency<'a>(values: impl Iterator<Item = &'a String>, limit: usize) -> Vec<String> {
    let mut order: Vec<&'a String> = Vec::new();
    let mut counts: HashMap<&'a String, usize> = HashMap::new();

    for value in values {
        if !counts.contains_key(value) {
            order.push(value);
        }
        *counts.entry(value).or_insert(0) += 1;
    }

    order.sort_by_key(|value| Reverse(counts[value]));
    order.truncate(limit);
    order.into_iter().cloned().collect()
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
