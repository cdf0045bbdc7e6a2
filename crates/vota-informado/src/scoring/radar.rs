use super::affinity::tally_topic;
use crate::dataset::{Party, PoliticalDataset};
use crate::session::UserAnswers;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Parties that can be compared on the radar at the same time.
pub const MAX_RADAR_PARTIES: usize = 4;

/// One radar axis: the topic title plus the unweighted affinity of every selected party.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicAffinityRow {
    pub topic: String,
    pub scores: Vec<(Party, f64)>,
}

impl TopicAffinityRow {
    pub fn score(&self, party: Party) -> Option<f64> {
        self.scores
            .iter()
            .find(|(candidate, _)| *candidate == party)
            .map(|(_, score)| *score)
    }
}

// Flattened as `{"topic": ..., "<party>": score, ...}` for charting.
impl Serialize for TopicAffinityRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.scores.len() + 1))?;
        map.serialize_entry("topic", &self.topic)?;
        for (party, score) in &self.scores {
            map.serialize_entry(party.label(), score)?;
        }
        map.end()
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Per-topic affinity (0 to 100, one decimal) for each selected party, in dataset topic order.
///
/// Topics with no question both answered by the user and stanced by a party
/// score 0 for that party.
pub fn compute_topic_affinities(
    answers: &UserAnswers,
    selected: &[Party],
    dataset: &PoliticalDataset,
) -> Vec<TopicAffinityRow> {
    dataset
        .topics
        .iter()
        .map(|topic| TopicAffinityRow {
            topic: topic.title.clone(),
            scores: selected
                .iter()
                .map(|&party| {
                    let affinity = tally_topic(answers, topic, party)
                        .average()
                        .map(|average| average * 100.0)
                        .unwrap_or(0.0);
                    (party, round_one_decimal(affinity))
                })
                .collect(),
        })
        .collect()
}

/// Parties picked for the radar comparison, capped at [`MAX_RADAR_PARTIES`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RadarSelection {
    parties: Vec<Party>,
}

impl RadarSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the top-ranked party, as the results view does.
    pub fn seeded(party: Party) -> Self {
        Self {
            parties: vec![party],
        }
    }

    /// Removes a selected party, or adds an unselected one while below the cap.
    ///
    /// Returns whether the selection changed; adding past the cap is a no-op.
    pub fn toggle(&mut self, party: Party) -> bool {
        if let Some(index) = self.parties.iter().position(|p| *p == party) {
            self.parties.remove(index);
            true
        } else if self.parties.len() < MAX_RADAR_PARTIES {
            self.parties.push(party);
            true
        } else {
            false
        }
    }

    pub fn is_full(&self) -> bool {
        self.parties.len() >= MAX_RADAR_PARTIES
    }

    pub fn contains(&self, party: Party) -> bool {
        self.parties.contains(&party)
    }

    pub fn parties(&self) -> &[Party] {
        &self.parties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_caps_at_four_parties() {
        let mut selection = RadarSelection::seeded(Party::Pp);
        assert!(selection.toggle(Party::Psoe));
        assert!(selection.toggle(Party::Vox));
        assert!(selection.toggle(Party::Sumar));
        assert!(selection.is_full());

        assert!(!selection.toggle(Party::Pnv));
        assert!(!selection.contains(Party::Pnv));
        assert_eq!(selection.parties().len(), MAX_RADAR_PARTIES);

        assert!(selection.toggle(Party::Vox));
        assert!(selection.toggle(Party::Pnv));
        assert_eq!(
            selection.parties(),
            &[Party::Pp, Party::Psoe, Party::Sumar, Party::Pnv]
        );
    }

    #[test]
    fn rounding_keeps_one_decimal() {
        assert_eq!(round_one_decimal(66.666_666), 66.7);
        assert_eq!(round_one_decimal(83.333_333), 83.3);
        assert_eq!(round_one_decimal(0.0), 0.0);
    }

    #[test]
    fn rows_flatten_party_scores() {
        let row = TopicAffinityRow {
            topic: "Economía".to_string(),
            scores: vec![(Party::Pp, 75.0), (Party::EhBildu, 12.5)],
        };
        let json = serde_json::to_value(&row).expect("serializes");
        assert_eq!(json["topic"], "Economía");
        assert_eq!(json["PP"], 75.0);
        assert_eq!(json["EH Bildu"], 12.5);
    }
}
