use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct BankRecord {
    pub(crate) id: String,
    pub(crate) prompt: String,
    pub(crate) kind: String,
    pub(crate) category: String,
    pub(crate) difficulty: Option<String>,
    pub(crate) points: Option<u32>,
    pub(crate) options: Vec<String>,
    pub(crate) correct_answer: Option<String>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<BankRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<BankRow>() {
        let row = record?;
        records.push(BankRecord {
            id: row.id,
            prompt: row.question,
            kind: row.kind,
            category: row.category.unwrap_or_else(|| "General".to_string()),
            difficulty: row.difficulty,
            points: row.points.as_deref().and_then(parse_points),
            options: row
                .options
                .as_deref()
                .map(split_options)
                .unwrap_or_default(),
            correct_answer: row.correct_answer,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct BankRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Question")]
    question: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Category", default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
    #[serde(
        rename = "Difficulty",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    difficulty: Option<String>,
    #[serde(rename = "Points", default, deserialize_with = "empty_string_as_none")]
    points: Option<String>,
    #[serde(rename = "Options", default, deserialize_with = "empty_string_as_none")]
    options: Option<String>,
    #[serde(
        rename = "Correct Answer",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    correct_answer: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_points(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

/// Options arrive pipe-separated in a single cell.
fn split_options(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(str::to_string)
        .collect()
}
