use super::views::{RankingEntry, ResultsSummary, TopicWeightEntry};
use crate::dataset::PoliticalDataset;
use crate::scoring::{
    compass_view, compute_affinity, compute_topic_affinities, AffinityResult, CompassReference,
    RadarSelection,
};
use crate::session::{SessionProgress, UserAnswers, UserWeights};
use chrono::NaiveDate;
use tracing::debug;

/// Everything the results view shows, computed from one snapshot of the session.
#[derive(Debug, Clone)]
pub struct ResultsReport<'a> {
    dataset: &'a PoliticalDataset,
    answers: &'a UserAnswers,
    weights: &'a UserWeights,
    ranking: Vec<AffinityResult>,
}

impl<'a> ResultsReport<'a> {
    pub fn build(
        answers: &'a UserAnswers,
        weights: &'a UserWeights,
        dataset: &'a PoliticalDataset,
    ) -> Self {
        // With nothing concrete to compare there is no ranking to show.
        let ranking = if answers.concrete_count() == 0 {
            Vec::new()
        } else {
            compute_affinity(answers, weights, dataset)
        };
        debug!(parties = ranking.len(), "built affinity ranking");

        Self {
            dataset,
            answers,
            weights,
            ranking,
        }
    }

    pub fn ranking(&self) -> &[AffinityResult] {
        &self.ranking
    }

    /// Ranking rows with party colours and scores rounded to one decimal.
    pub fn ranking_entries(&self) -> Vec<RankingEntry> {
        self.ranking
            .iter()
            .enumerate()
            .map(|(index, result)| RankingEntry {
                position: index + 1,
                party: result.party,
                party_label: result.party.label(),
                color: self.dataset.party_color(result.party).to_string(),
                score: (result.score * 10.0).round() / 10.0,
            })
            .collect()
    }

    /// The radar starts on the best-matching party when nothing was picked.
    pub fn radar_selection(&self, requested: &RadarSelection) -> RadarSelection {
        if !requested.parties().is_empty() {
            return requested.clone();
        }
        self.ranking
            .first()
            .map(|top| RadarSelection::seeded(top.party))
            .unwrap_or_default()
    }

    pub fn summary(
        &self,
        reference: &CompassReference,
        selection: &RadarSelection,
        generated_on: NaiveDate,
    ) -> ResultsSummary {
        let weights = self
            .dataset
            .topics
            .iter()
            .map(|topic| {
                let importance = self.weights.get(&topic.id);
                TopicWeightEntry {
                    topic_id: topic.id.clone(),
                    topic_title: topic.title.clone(),
                    level: importance.level(),
                    importance_label: importance.label(),
                }
            })
            .collect();

        let radar_selection = self.radar_selection(selection);
        let radar =
            compute_topic_affinities(self.answers, radar_selection.parties(), self.dataset);

        ResultsSummary {
            generated_on,
            progress: SessionProgress::measure(self.answers, self.dataset),
            weights,
            ranking: self.ranking_entries(),
            compass: compass_view(self.answers, self.dataset, reference),
            radar_parties: radar_selection.parties().to_vec(),
            radar,
        }
    }
}
