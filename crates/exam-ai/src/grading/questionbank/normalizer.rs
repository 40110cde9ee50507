use crate::grading::domain::QuestionKind;

/// Normalize a question-type cell into a known kind.
///
/// Bank exports drift between camelCase, kebab-case, and shorthand labels,
/// and the first column of the first row may carry a UTF-8 BOM.
pub(crate) fn normalize_kind(raw: &str) -> Option<QuestionKind> {
    let cleaned: String = raw
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();

    match cleaned.as_str() {
        "multiplechoice" | "mc" | "choice" => Some(QuestionKind::MultipleChoice),
        "concept" | "concepts" => Some(QuestionKind::Concept),
        "calculation" | "calculations" => Some(QuestionKind::Calculation),
        "essay" => Some(QuestionKind::Essay),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(raw: &str) -> Option<QuestionKind> {
    normalize_kind(raw)
}
