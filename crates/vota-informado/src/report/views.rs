use crate::dataset::Party;
use crate::scoring::{CompassMarker, TopicAffinityRow};
use crate::session::SessionProgress;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub position: usize,
    pub party: Party,
    pub party_label: &'static str,
    pub color: String,
    /// Affinity percentage rounded to one decimal.
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicWeightEntry {
    pub topic_id: String,
    pub topic_title: String,
    pub level: u8,
    pub importance_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsSummary {
    pub generated_on: NaiveDate,
    pub progress: SessionProgress,
    pub weights: Vec<TopicWeightEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ranking: Vec<RankingEntry>,
    pub compass: Vec<CompassMarker>,
    pub radar_parties: Vec<Party>,
    pub radar: Vec<TopicAffinityRow>,
}

impl ResultsSummary {
    pub fn top_party(&self) -> Option<&RankingEntry> {
        self.ranking.first()
    }
}

/// One party's summary within a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicStanceEntry {
    pub party: Party,
    pub party_label: &'static str,
    pub color: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicStances {
    pub topic_id: String,
    pub topic_title: String,
    pub entries: Vec<TopicStanceEntry>,
}

/// A topic where the party has a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartyStanceEntry {
    pub topic_id: String,
    pub topic_title: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartyProfile {
    pub party: Party,
    pub party_label: &'static str,
    pub color: String,
    pub heading: String,
    pub entries: Vec<PartyStanceEntry>,
}
