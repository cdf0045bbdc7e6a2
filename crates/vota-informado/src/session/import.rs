use super::{Answer, Importance, UserAnswers};
use crate::dataset::{PoliticalDataset, Stance};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum AnswerImportError {
    #[error("failed to read answers file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid answers CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("answer '{raw}' for question '{question_id}' is not a stance between -2 and 2")]
    InvalidAnswer { question_id: String, raw: String },
    #[error("question '{0}' is not part of the dataset")]
    UnknownQuestion(String),
}

/// Reads answers exported as `question_id,answer` rows.
///
/// The answer column holds an integer stance; `skip`, `null` or an empty cell
/// record an explicit "no opinion".
pub struct AnswerImporter<'a> {
    dataset: &'a PoliticalDataset,
}

impl<'a> AnswerImporter<'a> {
    pub fn new(dataset: &'a PoliticalDataset) -> Self {
        Self { dataset }
    }

    pub fn import_path<P: AsRef<Path>>(&self, path: P) -> Result<UserAnswers, AnswerImportError> {
        let file = std::fs::File::open(path)?;
        self.import_reader(file)
    }

    pub fn import_reader<R: Read>(&self, reader: R) -> Result<UserAnswers, AnswerImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);
        let mut answers = UserAnswers::new();

        for record in csv_reader.deserialize::<AnswerRow>() {
            let row = record?;
            if !self
                .dataset
                .questions()
                .any(|question| question.id == row.question_id)
            {
                return Err(AnswerImportError::UnknownQuestion(row.question_id));
            }

            let answer = row.parse_answer()?;
            if answers.get(&row.question_id).is_interacted() {
                warn!(question_id = %row.question_id, "duplicate answer row, keeping the last one");
            }
            answers.set(row.question_id, answer);
        }

        debug!(
            interacted = answers.interacted_count(),
            concrete = answers.concrete_count(),
            "imported questionnaire answers"
        );
        Ok(answers)
    }
}

#[derive(Debug, Deserialize)]
struct AnswerRow {
    question_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    answer: Option<String>,
}

impl AnswerRow {
    fn parse_answer(&self) -> Result<Answer, AnswerImportError> {
        let Some(raw) = self.answer.as_deref() else {
            return Ok(Answer::Skipped);
        };

        if matches!(
            raw.to_ascii_lowercase().as_str(),
            "skip" | "skipped" | "null" | "ns/nc"
        ) {
            return Ok(Answer::Skipped);
        }

        raw.trim_start_matches('+')
            .parse::<i8>()
            .ok()
            .and_then(|value| Stance::new(value).ok())
            .map(Answer::Answered)
            .ok_or_else(|| AnswerImportError::InvalidAnswer {
                question_id: self.question_id.clone(),
                raw: raw.to_string(),
            })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeightOverrideError {
    #[error("expected TOPIC=LEVEL, got '{0}'")]
    Malformed(String),
    #[error("importance level '{0}' must be an integer between 0 and 4")]
    InvalidLevel(String),
}

/// Parses a `topic=level` override as given on the command line.
pub fn parse_weight_override(raw: &str) -> Result<(String, Importance), WeightOverrideError> {
    let (topic, level) = raw
        .split_once('=')
        .ok_or_else(|| WeightOverrideError::Malformed(raw.to_string()))?;
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(WeightOverrideError::Malformed(raw.to_string()));
    }

    let level = level.trim();
    match level.parse::<u8>() {
        Ok(value) if value <= Importance::MAX => Ok((topic.to_string(), Importance::new(value))),
        _ => Err(WeightOverrideError::InvalidLevel(level.to_string())),
    }
}
