use std::fmt::Write as _;

use crate::grading::domain::{Answer, CandidateProfile, Question, QuestionId, QuestionKind};

const NO_ANSWER: &str = "No answer provided";

/// Render the grading request as a single prompt for the remote model.
///
/// Deterministic in its inputs: candidate fields always render (placeholders
/// for absent values) and questions keep their submission order, so identical
/// requests produce byte-identical prompts. The stored correct answer is
/// included only for multiple-choice questions; open-ended and calculation
/// prompts must not leak an answer key the rubric does not define.
pub fn build_grading_prompt(
    questions: &[Question],
    answers: &[Answer],
    candidate: &CandidateProfile,
) -> String {
    let mut mc_section = String::new();
    let mut concept_section = String::new();
    let mut calculation_section = String::new();
    let mut essay_section = String::new();

    for (index, question) in questions.iter().enumerate() {
        let number = index + 1;
        let answer = answer_for(answers, &question.id);
        let section = match question.kind {
            QuestionKind::MultipleChoice => &mut mc_section,
            QuestionKind::Concept => &mut concept_section,
            QuestionKind::Calculation => &mut calculation_section,
            QuestionKind::Essay => &mut essay_section,
        };

        let _ = writeln!(section, "{number}. [{}] \"{}\"", question.id.0, question.prompt);
        let _ = writeln!(
            section,
            "   Category: {} | Points: {}{}",
            question.category,
            question.points,
            question
                .difficulty
                .as_deref()
                .map(|difficulty| format!(" | Difficulty: {difficulty}"))
                .unwrap_or_default()
        );

        if question.kind == QuestionKind::MultipleChoice && !question.options.is_empty() {
            let _ = writeln!(section, "   Options: {}", question.options.join(", "));
        }

        match question.kind {
            QuestionKind::Calculation => {
                let numeric = answer
                    .map(|answer| answer.response.trim())
                    .filter(|text| !text.is_empty())
                    .unwrap_or(NO_ANSWER);
                let work = answer
                    .and_then(|answer| answer.work_shown.as_deref())
                    .map(str::trim)
                    .filter(|text| !text.is_empty())
                    .unwrap_or(NO_ANSWER);
                let _ = writeln!(section, "   Numerical Answer: \"{numeric}\"");
                let _ = writeln!(section, "   Work Shown: \"{work}\"");
            }
            _ => {
                let response = answer
                    .map(|answer| answer.response.trim())
                    .filter(|text| !text.is_empty())
                    .unwrap_or(NO_ANSWER);
                let _ = writeln!(section, "   Candidate Answer: \"{response}\"");
            }
        }

        if question.kind == QuestionKind::MultipleChoice {
            if let Some(correct) = question.correct_answer.as_deref() {
                let _ = writeln!(section, "   Correct Answer: {correct}");
            }
        }

        let _ = writeln!(section);
    }

    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "You are an expert technical assessment evaluator. Grade this hiring exam \
objectively, awarding partial credit for sound reasoning even when a final \
answer is wrong."
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "CANDIDATE INFORMATION:");
    let _ = writeln!(prompt, "- Name: {}", candidate.full_name());
    let _ = writeln!(prompt, "- Position Applied: {}", candidate.position_label());
    let _ = writeln!(prompt, "- Experience Level: {}", candidate.experience_label());
    let _ = writeln!(prompt, "- Education: {}", candidate.education_label());
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "EXAM RESPONSES:");
    let _ = writeln!(prompt);

    for (title, section) in [
        ("MULTIPLE CHOICE QUESTIONS:", &mc_section),
        ("CONCEPT QUESTIONS:", &concept_section),
        ("CALCULATION QUESTIONS:", &calculation_section),
        ("ESSAY QUESTIONS:", &essay_section),
    ] {
        if !section.is_empty() {
            let _ = writeln!(prompt, "{title}");
            let _ = write!(prompt, "{section}");
        }
    }

    let _ = writeln!(
        prompt,
        "Respond with a single JSON object in exactly this format:"
    );
    let _ = writeln!(
        prompt,
        r#"{{
  "overallScore": 0-100,
  "feedback": "overall assessment",
  "questions": [
    {{
      "id": "question id",
      "score": "points earned, up to the question's points",
      "feedback": "brief feedback",
      "strengths": ["..."],
      "improvements": ["..."]
    }}
  ],
  "strengths": ["top candidate strengths"],
  "improvements": ["areas for improvement"],
  "recommendation": "Strong Hire|Hire|Maybe|No Hire"
}}"#
    );
    let _ = writeln!(
        prompt,
        "Score every question, stay within each question's point budget, and \
return only the JSON object with no surrounding prose."
    );

    prompt
}

fn answer_for<'a>(answers: &'a [Answer], id: &QuestionId) -> Option<&'a Answer> {
    answers.iter().find(|answer| &answer.question_id == id)
}
