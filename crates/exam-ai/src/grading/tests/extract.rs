use crate::grading::domain::HiringRecommendation;
use crate::grading::extract::{extract_grading, ExtractError};

#[test]
fn recovers_json_embedded_in_prose() {
    let text = "Here is my assessment of the candidate:\n\
{\"score\": 72, \"feedback\": \"solid fundamentals\"}\n\
Let me know if you need more detail.";

    let grading = extract_grading(text).expect("extraction succeeds");
    assert_eq!(grading.overall_score, 72.0);
    assert_eq!(grading.feedback, "solid fundamentals");
}

#[test]
fn strips_json_code_fences() {
    let text = "```json\n{\"score\":5,\"feedback\":\"ok\"}\n```";

    let grading = extract_grading(text).expect("extraction succeeds");
    assert_eq!(grading.overall_score, 5.0);
    assert_eq!(grading.feedback, "ok");
}

#[test]
fn strips_bare_code_fences() {
    let text = "```\n{\"overallScore\": 88, \"feedback\": \"strong\"}\n```";

    let grading = extract_grading(text).expect("extraction succeeds");
    assert_eq!(grading.overall_score, 88.0);
}

#[test]
fn unbalanced_braces_fail_with_not_json() {
    assert_eq!(
        extract_grading("score: 10, feedback: none").unwrap_err(),
        ExtractError::NotJson
    );
    assert_eq!(
        extract_grading("{\"score\": 10, \"feedback\": ").unwrap_err(),
        ExtractError::NotJson
    );
    assert_eq!(extract_grading("").unwrap_err(), ExtractError::NotJson);
}

#[test]
fn missing_required_fields_are_reported() {
    assert_eq!(
        extract_grading("{\"feedback\": \"no score here\"}").unwrap_err(),
        ExtractError::MissingField("score")
    );
    assert_eq!(
        extract_grading("{\"score\": 55}").unwrap_err(),
        ExtractError::MissingField("feedback")
    );
}

#[test]
fn overall_score_is_clamped_to_percentage_range() {
    let high = extract_grading("{\"score\": 250, \"feedback\": \"generous\"}").unwrap();
    assert_eq!(high.overall_score, 100.0);

    let low = extract_grading("{\"score\": -5, \"feedback\": \"harsh\"}").unwrap();
    assert_eq!(low.overall_score, 0.0);
}

#[test]
fn accepts_overall_summary_schema_variant() {
    let text = r#"{
        "overallSummary": {
            "overallScore": 81,
            "detailedAnalysis": "well rounded",
            "hiringRecommendation": "Strong Hire"
        }
    }"#;

    let grading = extract_grading(text).expect("extraction succeeds");
    assert_eq!(grading.overall_score, 81.0);
    assert_eq!(grading.feedback, "well rounded");
    assert_eq!(
        grading.recommendation,
        Some(HiringRecommendation::StrongHire)
    );
}

#[test]
fn parses_per_question_entries_from_questions_array() {
    let text = r#"{
        "score": 70,
        "feedback": "fine",
        "questions": [
            {"id": "q-1", "score": 8, "feedback": "good", "strengths": ["clear"], "improvements": []},
            {"id": "q-2", "score": -3},
            {"score": 5}
        ]
    }"#;

    let grading = extract_grading(text).expect("extraction succeeds");
    assert_eq!(grading.question_results.len(), 2, "entry without id dropped");
    assert_eq!(grading.question_results["q-1"].score, 8.0);
    assert_eq!(
        grading.question_results["q-1"].feedback.as_deref(),
        Some("good")
    );
    assert_eq!(
        grading.question_results["q-2"].score, 0.0,
        "negative scores clamp to zero"
    );
}

#[test]
fn parses_per_question_entries_from_details_object() {
    let text = r#"{
        "score": 60,
        "feedback": "fine",
        "details": {
            "q-1": {"score": 4, "feedback": "terse"},
            "q-2": "answer provided"
        }
    }"#;

    let grading = extract_grading(text).expect("extraction succeeds");
    assert_eq!(grading.question_results.len(), 1, "non-object entry dropped");
    assert_eq!(grading.question_results["q-1"].score, 4.0);
}

#[test]
fn recommendation_parsing_tolerates_label_variants() {
    for (raw, expected) in [
        ("Strong Hire", HiringRecommendation::StrongHire),
        ("hire", HiringRecommendation::Hire),
        ("CONSIDER", HiringRecommendation::Maybe),
        ("REJECT", HiringRecommendation::NoHire),
        ("no_hire", HiringRecommendation::NoHire),
    ] {
        assert_eq!(HiringRecommendation::parse(raw), Some(expected), "{raw}");
    }
    assert_eq!(HiringRecommendation::parse("definitely"), None);
}

#[test]
fn top_level_lists_are_collected() {
    let text = r#"{
        "score": 77,
        "feedback": "fine",
        "strengths": ["depth", "clarity"],
        "improvements": ["pacing"]
    }"#;

    let grading = extract_grading(text).expect("extraction succeeds");
    assert_eq!(grading.strengths, vec!["depth", "clarity"]);
    assert_eq!(grading.improvements, vec!["pacing"]);
}
