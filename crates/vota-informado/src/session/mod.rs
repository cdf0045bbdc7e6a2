//! In-memory questionnaire state for a single user session.

mod import;

pub use import::{parse_weight_override, AnswerImportError, AnswerImporter, WeightOverrideError};

use crate::dataset::{PoliticalDataset, Stance, Topic};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Answers required per topic before results are shown.
pub const MIN_ANSWERS_PER_TOPIC: usize = 2;

/// The user's position on a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "stance")]
pub enum Answer {
    /// The user has not interacted with the question yet.
    #[default]
    Unanswered,
    /// The user explicitly chose "no opinion".
    Skipped,
    Answered(Stance),
}

impl Answer {
    /// The stance that takes part in scoring, if any.
    pub const fn stance(self) -> Option<Stance> {
        match self {
            Self::Answered(stance) => Some(stance),
            Self::Unanswered | Self::Skipped => None,
        }
    }

    pub const fn is_interacted(self) -> bool {
        !matches!(self, Self::Unanswered)
    }
}

impl From<Option<Stance>> for Answer {
    fn from(value: Option<Stance>) -> Self {
        match value {
            Some(stance) => Self::Answered(stance),
            None => Self::Skipped,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserAnswers {
    entries: BTreeMap<String, Answer>,
}

impl UserAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Answer {
        self.entries
            .get(question_id)
            .copied()
            .unwrap_or(Answer::Unanswered)
    }

    pub fn stance(&self, question_id: &str) -> Option<Stance> {
        self.get(question_id).stance()
    }

    pub fn set(&mut self, question_id: impl Into<String>, answer: Answer) {
        let question_id = question_id.into();
        match answer {
            Answer::Unanswered => {
                self.entries.remove(&question_id);
            }
            other => {
                self.entries.insert(question_id, other);
            }
        }
    }

    pub fn answer(&mut self, question_id: impl Into<String>, stance: Stance) {
        self.set(question_id, Answer::Answered(stance));
    }

    pub fn skip(&mut self, question_id: impl Into<String>) {
        self.set(question_id, Answer::Skipped);
    }

    /// Number of questions with a concrete stance.
    pub fn concrete_count(&self) -> usize {
        self.entries
            .values()
            .filter(|answer| answer.stance().is_some())
            .count()
    }

    /// Number of questions the user has interacted with, skipped ones included.
    pub fn interacted_count(&self) -> usize {
        self.entries
            .values()
            .filter(|answer| answer.is_interacted())
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Answer)> {
        self.entries
            .iter()
            .map(|(question_id, answer)| (question_id.as_str(), *answer))
    }

    /// Answers every question with a uniformly drawn stance or a skip.
    pub fn random<R: Rng>(dataset: &PoliticalDataset, rng: &mut R) -> Self {
        let choices = Stance::all().map(Answer::Answered);
        dataset
            .questions()
            .map(|question| {
                let pick = rng.gen_range(0..=choices.len());
                let answer = choices.get(pick).copied().unwrap_or(Answer::Skipped);
                (question.id.clone(), answer)
            })
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, Answer)> for UserAnswers {
    fn from_iter<T: IntoIterator<Item = (K, Answer)>>(iter: T) -> Self {
        let mut answers = Self::new();
        for (question_id, answer) in iter {
            answers.set(question_id, answer);
        }
        answers
    }
}

/// Importance a user assigns to a topic, from 0 (least) to 4 (most).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Importance(u8);

impl Importance {
    pub const MAX: u8 = 4;
    pub const DEFAULT: Self = Self(2);

    /// Clamps out-of-range levels to the top of the scale.
    pub const fn new(level: u8) -> Self {
        if level > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(level)
        }
    }

    pub const fn level(self) -> u8 {
        self.0
    }

    /// Weight used for aggregation; shifted by one so that the least important
    /// topic still counts.
    pub fn effective_weight(self) -> f64 {
        f64::from(self.0 + 1)
    }

    pub const fn label(self) -> &'static str {
        match self.0 {
            0 => "Muy poco importante",
            1 => "Poco importante",
            2 => "Importante",
            3 => "Muy importante",
            _ => "Extremadamente importante",
        }
    }
}

impl Default for Importance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u8> for Importance {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Importance> for u8 {
    fn from(value: Importance) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserWeights {
    entries: BTreeMap<String, Importance>,
}

impl UserWeights {
    /// Every topic of the dataset starts at the default importance.
    pub fn for_dataset(dataset: &PoliticalDataset) -> Self {
        let entries = dataset
            .topics
            .iter()
            .map(|topic| (topic.id.clone(), Importance::DEFAULT))
            .collect();
        Self { entries }
    }

    /// Missing entries read as the default importance.
    pub fn get(&self, topic_id: &str) -> Importance {
        self.entries.get(topic_id).copied().unwrap_or_default()
    }

    pub fn set(&mut self, topic_id: impl Into<String>, importance: Importance) {
        self.entries.insert(topic_id.into(), importance);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Importance)> {
        self.entries
            .iter()
            .map(|(topic_id, importance)| (topic_id.as_str(), *importance))
    }
}

/// Questionnaire completion for gating the results view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub answered_questions: usize,
    pub scorable_questions: usize,
    pub total_questions: usize,
    pub completion_met: bool,
}

impl SessionProgress {
    pub fn measure(answers: &UserAnswers, dataset: &PoliticalDataset) -> Self {
        let interacted = |topic: &Topic| {
            topic
                .questions
                .iter()
                .filter(|question| answers.get(&question.id).is_interacted())
                .count()
        };

        let answered_questions = dataset
            .questions()
            .filter(|question| answers.get(&question.id).is_interacted())
            .count();
        let scorable_questions = dataset
            .questions()
            .filter(|question| answers.stance(&question.id).is_some())
            .count();
        let completion_met = dataset
            .topics
            .iter()
            .all(|topic| interacted(topic) >= MIN_ANSWERS_PER_TOPIC);

        Self {
            answered_questions,
            scorable_questions,
            total_questions: dataset.total_questions(),
            completion_met,
        }
    }
}
