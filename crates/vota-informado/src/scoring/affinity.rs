use crate::dataset::{Party, PoliticalDataset, Stance, Topic};
use crate::session::{UserAnswers, UserWeights};
use serde::{Deserialize, Serialize};

/// Largest possible distance between two stances (-2 against 2).
const MAX_STANCE_DISTANCE: f64 = 4.0;

/// Similarity between two stances on a single question, in `[0, 1]`.
///
/// Identical stances score 1, opposite ends of the scale score 0, linear in between.
pub fn question_affinity(user: Stance, party: Stance) -> f64 {
    (MAX_STANCE_DISTANCE - f64::from(user.distance(party))) / MAX_STANCE_DISTANCE
}

/// Running average of question affinities for one party over one topic.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct TopicTally {
    pub(crate) sum: f64,
    pub(crate) count: usize,
}

impl TopicTally {
    pub(crate) fn average(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Accumulates every question of `topic` the user answered and `party` took a stance on.
pub(crate) fn tally_topic(answers: &UserAnswers, topic: &Topic, party: Party) -> TopicTally {
    topic
        .questions
        .iter()
        .filter_map(|question| {
            let user = answers.stance(&question.id)?;
            let stance = question.stance_for(party)?;
            Some(question_affinity(user, stance))
        })
        .fold(TopicTally::default(), |tally, affinity| TopicTally {
            sum: tally.sum + affinity,
            count: tally.count + 1,
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffinityResult {
    pub party: Party,
    /// Weighted affinity percentage in `[0, 100]`.
    pub score: f64,
}

/// Contribution of a single topic to a party's weighted score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicContribution {
    pub topic_id: String,
    /// Average question affinity in `[0, 1]`.
    pub affinity: f64,
    pub effective_weight: f64,
    pub scored_questions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyAffinity {
    pub party: Party,
    pub score: f64,
    /// Only topics with at least one scorable question appear here.
    pub components: Vec<TopicContribution>,
}

impl PartyAffinity {
    pub fn result(&self) -> AffinityResult {
        AffinityResult {
            party: self.party,
            score: self.score,
        }
    }
}

/// Scores a single party; topics without scorable questions are left out of
/// both the numerator and the denominator.
pub fn score_party(
    answers: &UserAnswers,
    weights: &UserWeights,
    dataset: &PoliticalDataset,
    party: Party,
) -> PartyAffinity {
    let components: Vec<TopicContribution> = dataset
        .topics
        .iter()
        .filter_map(|topic| {
            let tally = tally_topic(answers, topic, party);
            let affinity = tally.average()?;
            Some(TopicContribution {
                topic_id: topic.id.clone(),
                affinity,
                effective_weight: weights.get(&topic.id).effective_weight(),
                scored_questions: tally.count,
            })
        })
        .collect();

    let (weighted, weight_sum) = components.iter().fold((0.0, 0.0), |(weighted, sum), c| {
        (weighted + c.affinity * c.effective_weight, sum + c.effective_weight)
    });

    let score = if weight_sum > 0.0 {
        (weighted / weight_sum * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    PartyAffinity {
        party,
        score,
        components,
    }
}

/// Per-party breakdown for every dataset party, ranked by descending score.
pub fn compute_affinity_breakdown(
    answers: &UserAnswers,
    weights: &UserWeights,
    dataset: &PoliticalDataset,
) -> Vec<PartyAffinity> {
    let mut ranking: Vec<PartyAffinity> = dataset
        .parties
        .iter()
        .map(|info| score_party(answers, weights, dataset, info.name))
        .collect();

    // `sort_by` is stable, so ties keep the dataset's party order.
    ranking.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranking
}

/// Weighted affinity ranking across every dataset party.
pub fn compute_affinity(
    answers: &UserAnswers,
    weights: &UserWeights,
    dataset: &PoliticalDataset,
) -> Vec<AffinityResult> {
    compute_affinity_breakdown(answers, weights, dataset)
        .iter()
        .map(PartyAffinity::result)
        .collect()
}
