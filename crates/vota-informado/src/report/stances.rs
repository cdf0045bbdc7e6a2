use super::views::{PartyProfile, PartyStanceEntry, TopicStanceEntry, TopicStances};
use crate::dataset::{Party, PoliticalDataset};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown topic '{0}'")]
pub struct UnknownTopic(pub String);

/// Every party's summary for one topic, in dataset order.
pub fn stances_by_topic(
    dataset: &PoliticalDataset,
    topic_id: &str,
) -> Result<TopicStances, UnknownTopic> {
    let topic = dataset
        .topic(topic_id)
        .ok_or_else(|| UnknownTopic(topic_id.to_string()))?;

    let entries = topic
        .party_topic_summaries
        .iter()
        .map(|summary| TopicStanceEntry {
            party: summary.party,
            party_label: summary.party.label(),
            color: dataset.party_color(summary.party).to_string(),
            summary: summary.summary.clone(),
        })
        .collect();

    Ok(TopicStances {
        topic_id: topic.id.clone(),
        topic_title: topic.title.clone(),
        entries,
    })
}

/// The party's summary in each topic. Topics without one are left out.
pub fn stances_by_party(dataset: &PoliticalDataset, party: Party) -> PartyProfile {
    let entries = dataset
        .topics
        .iter()
        .filter_map(|topic| {
            topic
                .party_topic_summaries
                .iter()
                .find(|summary| summary.party == party)
                .map(|summary| PartyStanceEntry {
                    topic_id: topic.id.clone(),
                    topic_title: topic.title.clone(),
                    summary: summary.summary.clone(),
                })
        })
        .collect();

    PartyProfile {
        party,
        party_label: party.label(),
        color: dataset.party_color(party).to_string(),
        heading: format!("Resumen Ideológico de {}", party.label()),
        entries,
    }
}
