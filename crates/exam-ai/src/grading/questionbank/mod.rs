mod normalizer;
mod parser;

use std::io::Read;
use std::path::Path;

use crate::grading::domain::{Question, QuestionId, QuestionKind};

#[derive(Debug)]
pub enum QuestionBankImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for QuestionBankImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionBankImportError::Io(err) => {
                write!(f, "failed to read question bank export: {}", err)
            }
            QuestionBankImportError::Csv(err) => {
                write!(f, "invalid question bank CSV data: {}", err)
            }
        }
    }
}

impl std::error::Error for QuestionBankImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuestionBankImportError::Io(err) => Some(err),
            QuestionBankImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for QuestionBankImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for QuestionBankImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Imports a question set from the exam builder's CSV export.
///
/// Rows with an unrecognized type or a missing/zero point value are skipped
/// rather than rejected; a partially usable bank still yields an exam.
pub struct QuestionBankImporter;

impl QuestionBankImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, QuestionBankImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Question>, QuestionBankImportError> {
        let mut questions = Vec::new();

        for record in parser::parse_records(reader)? {
            let Some(kind) = normalizer::normalize_kind(&record.kind) else {
                continue;
            };
            let Some(points) = record.points.filter(|points| *points > 0) else {
                continue;
            };

            // Open-ended kinds have no answer key regardless of what the
            // export carries in the cell.
            let correct_answer = if kind.is_open_ended() {
                None
            } else {
                record.correct_answer
            };

            questions.push(Question {
                id: QuestionId(record.id),
                kind,
                category: record.category,
                prompt: record.prompt,
                points,
                correct_answer,
                options: record.options,
                difficulty: record.difficulty,
            });
        }

        Ok(questions)
    }
}
