//! Pure scoring functions over a dataset snapshot and the user's answers.
//!
//! Nothing here performs I/O or keeps state between calls; identical inputs
//! always yield identical outputs.

pub mod affinity;
pub mod compass;
pub mod radar;

pub use affinity::{
    compute_affinity, compute_affinity_breakdown, question_affinity, score_party,
    AffinityResult, PartyAffinity, TopicContribution,
};
pub use compass::{
    compass_view, compute_user_position, CompassMarker, CompassPosition, CompassReference,
    MarkerName,
};
pub use radar::{compute_topic_affinities, RadarSelection, TopicAffinityRow, MAX_RADAR_PARTIES};
