//! Static political dataset: topics, questions, party stances and party metadata.
//!
//! The dataset is read-only input for every scoring component. It is loaded once
//! (from JSON or the bundled sample) and validated so that question ids are unique
//! across topics, which is what lets answers be keyed by question id alone.

pub mod domain;

pub use domain::{
    Axis, AxisSign, IdeologicalSign, InvalidAxisSign, InvalidStance, Party, PartyInfo,
    PartyStance, PartyTopicSummary, Question, Stance, Topic, UnknownParty,
};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const SAMPLE_DATASET: &str = include_str!("../../data/sample_dataset.json");

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("question id '{0}' appears more than once")]
    DuplicateQuestion(String),
    #[error("topic id '{0}' appears more than once")]
    DuplicateTopic(String),
    #[error("party {0} is listed more than once")]
    DuplicateParty(Party),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoliticalDataset {
    pub topics: Vec<Topic>,
    pub parties: Vec<PartyInfo>,
}

impl PoliticalDataset {
    pub fn new(topics: Vec<Topic>, parties: Vec<PartyInfo>) -> Result<Self, DatasetError> {
        let dataset = Self { topics, parties };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Illustrative dataset bundled with the crate, used when no dataset path is configured.
    pub fn sample() -> Result<Self, DatasetError> {
        Self::from_json_str(SAMPLE_DATASET)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading political dataset");
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let dataset: Self = serde_json::from_reader(reader)?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, DatasetError> {
        let dataset: Self = serde_json::from_str(raw)?;
        dataset.validate()?;
        Ok(dataset)
    }

    fn validate(&self) -> Result<(), DatasetError> {
        let mut topic_ids = HashSet::new();
        let mut question_ids = HashSet::new();
        for topic in &self.topics {
            if !topic_ids.insert(topic.id.as_str()) {
                return Err(DatasetError::DuplicateTopic(topic.id.clone()));
            }
            for question in &topic.questions {
                if !question_ids.insert(question.id.as_str()) {
                    return Err(DatasetError::DuplicateQuestion(question.id.clone()));
                }
            }
        }

        let mut parties = HashSet::new();
        for info in &self.parties {
            if !parties.insert(info.name) {
                return Err(DatasetError::DuplicateParty(info.name));
            }
        }

        debug!(
            topics = self.topics.len(),
            questions = question_ids.len(),
            parties = parties.len(),
            "political dataset validated"
        );
        Ok(())
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.topics.iter().flat_map(|topic| topic.questions.iter())
    }

    pub fn total_questions(&self) -> usize {
        self.topics.iter().map(|topic| topic.questions.len()).sum()
    }

    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.id == id)
    }

    pub fn party_info(&self, party: Party) -> Option<&PartyInfo> {
        self.parties.iter().find(|info| info.name == party)
    }

    pub fn party_color(&self, party: Party) -> &str {
        self.party_info(party)
            .map(|info| info.color.as_str())
            .unwrap_or("#6B7280")
    }
}
