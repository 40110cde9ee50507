use std::collections::BTreeMap;

use serde_json::Value;

use crate::grading::domain::HiringRecommendation;

/// Why a model response could not be turned into a grading result.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("response text contains no parseable JSON object")]
    NotJson,
    #[error("grading response is missing required field `{0}`")]
    MissingField(&'static str),
}

/// Per-question verdict recovered from the model response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteQuestionGrading {
    pub score: f64,
    pub feedback: Option<String>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

/// Overall verdict recovered from the model response.
///
/// `overall_score` is clamped to [0, 100]; per-question scores are clamped
/// to non-negative here and capped to the question's points when merged,
/// since the extractor never sees the question set.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteGrading {
    pub overall_score: f64,
    pub feedback: String,
    pub question_results: BTreeMap<String, RemoteQuestionGrading>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub recommendation: Option<HiringRecommendation>,
}

/// Best-effort extraction of a grading object from free-form model text.
///
/// Models wrap their JSON in prose and code fences often enough that strict
/// parsing is useless. Fences are stripped first; then the span between the
/// first `{` and the last `}` is tried, then the whole trimmed text.
pub fn extract_grading(text: &str) -> Result<RemoteGrading, ExtractError> {
    let value = extract_json(text)?;

    let overall_score = find_score(&value).ok_or(ExtractError::MissingField("score"))?;
    let feedback = find_feedback(&value).ok_or(ExtractError::MissingField("feedback"))?;

    Ok(RemoteGrading {
        overall_score: overall_score.clamp(0.0, 100.0),
        feedback,
        question_results: question_results(&value),
        strengths: string_list(value.get("strengths")),
        improvements: string_list(value.get("improvements")),
        recommendation: find_recommendation(&value),
    })
}

fn extract_json(text: &str) -> Result<Value, ExtractError> {
    let stripped = strip_fences(text);

    if let (Some(start), Some(end)) = (stripped.find('{'), stripped.rfind('}')) {
        if end > start {
            if let Ok(value) = serde_json::from_str::<Value>(&stripped[start..=end]) {
                return Ok(value);
            }
        }
    }

    serde_json::from_str::<Value>(stripped).map_err(|_| ExtractError::NotJson)
}

fn strip_fences(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

fn find_score(value: &Value) -> Option<f64> {
    value
        .get("score")
        .or_else(|| value.get("overallScore"))
        .or_else(|| value.get("overallSummary").and_then(|s| s.get("overallScore")))
        .and_then(Value::as_f64)
}

fn find_feedback(value: &Value) -> Option<String> {
    value
        .get("feedback")
        .or_else(|| value.get("overallFeedback"))
        .or_else(|| {
            value
                .get("overallSummary")
                .and_then(|s| s.get("detailedAnalysis"))
        })
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn find_recommendation(value: &Value) -> Option<HiringRecommendation> {
    value
        .get("recommendation")
        .or_else(|| value.get("hiringRecommendation"))
        .or_else(|| {
            value
                .get("overallSummary")
                .and_then(|s| s.get("hiringRecommendation"))
        })
        .and_then(Value::as_str)
        .and_then(HiringRecommendation::parse)
}

/// Per-question entries arrive either as a `questions` array or a `details`
/// object keyed by question id, depending on which schema variant the model
/// followed. Entries without an id or a numeric score are dropped.
fn question_results(value: &Value) -> BTreeMap<String, RemoteQuestionGrading> {
    let mut results = BTreeMap::new();

    if let Some(entries) = value.get("questions").and_then(Value::as_array) {
        for entry in entries {
            let Some(id) = entry
                .get("id")
                .or_else(|| entry.get("questionId"))
                .and_then(Value::as_str)
            else {
                continue;
            };
            if let Some(grading) = question_grading(entry) {
                results.insert(id.to_string(), grading);
            }
        }
    } else if let Some(details) = value.get("details").and_then(Value::as_object) {
        for (id, entry) in details {
            if let Some(grading) = question_grading(entry) {
                results.insert(id.clone(), grading);
            }
        }
    }

    results
}

fn question_grading(entry: &Value) -> Option<RemoteQuestionGrading> {
    let score = entry.get("score").and_then(Value::as_f64)?;

    Some(RemoteQuestionGrading {
        score: score.max(0.0),
        feedback: entry
            .get("feedback")
            .and_then(Value::as_str)
            .map(str::to_string),
        strengths: string_list(entry.get("strengths")),
        improvements: string_list(entry.get("improvements")),
    })
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
