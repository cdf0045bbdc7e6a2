mod stances;
mod summary;
mod views;

pub use stances::{stances_by_party, stances_by_topic, UnknownTopic};
pub use summary::ResultsReport;
pub use views::{
    PartyProfile, PartyStanceEntry, RankingEntry, ResultsSummary, TopicStanceEntry, TopicStances,
    TopicWeightEntry,
};
