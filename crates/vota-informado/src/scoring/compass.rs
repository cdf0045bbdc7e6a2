use crate::dataset::{Axis, Party, PoliticalDataset};
use crate::session::UserAnswers;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maps an average per-question contribution (roughly `[-2, 2]`) onto the
/// `[-10, 10]` space the party reference coordinates are authored in.
pub const COMPASS_SCALE: f64 = 5.0;

pub const USER_MARKER_LABEL: &str = "Tú";
pub const USER_MARKER_COLOR: &str = "#EF4444";
pub const USER_MARKER_SIZE: u16 = 250;
pub const PARTY_MARKER_SIZE: u16 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompassPosition {
    pub economic: f64,
    pub social: f64,
}

impl CompassPosition {
    pub const fn new(economic: f64, social: f64) -> Self {
        Self { economic, social }
    }

    pub const fn on(self, axis: Axis) -> f64 {
        match axis {
            Axis::Economic => self.economic,
            Axis::Social => self.social,
        }
    }
}

/// User position on a single axis.
pub fn axis_score(answers: &UserAnswers, dataset: &PoliticalDataset, axis: Axis) -> f64 {
    let (sum, answered) = dataset
        .questions()
        .filter_map(|question| {
            let factor = question.ideological_sign.on(axis).factor();
            if factor == 0 {
                return None;
            }
            let stance = answers.stance(&question.id)?;
            Some(i32::from(stance.value()) * i32::from(factor))
        })
        .fold((0i32, 0usize), |(sum, count), contribution| {
            (sum + contribution, count + 1)
        });

    if answered == 0 {
        0.0
    } else {
        f64::from(sum) / answered as f64 * COMPASS_SCALE
    }
}

pub fn compute_user_position(answers: &UserAnswers, dataset: &PoliticalDataset) -> CompassPosition {
    CompassPosition {
        economic: axis_score(answers, dataset, Axis::Economic),
        social: axis_score(answers, dataset, Axis::Social),
    }
}

/// Hand-authored party coordinates; parties absent from the table are not drawn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompassReference {
    coordinates: BTreeMap<Party, CompassPosition>,
}

impl CompassReference {
    pub fn standard() -> Self {
        [
            (Party::Pp, 5.0, -4.0),
            (Party::Psoe, -5.0, 7.0),
            (Party::Vox, 7.0, -9.0),
            (Party::Sumar, -8.0, 9.0),
            (Party::Podemos, -9.0, 8.0),
            (Party::Erc, -6.0, 8.0),
            (Party::Junts, 3.0, 0.0),
            (Party::EhBildu, -7.0, 8.0),
            (Party::Pnv, 1.0, 2.0),
            (Party::Bng, -7.0, 7.0),
            (Party::Cc, 2.0, -2.0),
            (Party::Upn, 6.0, -5.0),
        ]
        .into_iter()
        .map(|(party, economic, social)| (party, CompassPosition::new(economic, social)))
        .collect()
    }

    pub fn position(&self, party: Party) -> Option<CompassPosition> {
        self.coordinates.get(&party).copied()
    }

    pub fn with_position(mut self, party: Party, position: CompassPosition) -> Self {
        self.coordinates.insert(party, position);
        self
    }

    pub fn without(mut self, party: Party) -> Self {
        self.coordinates.remove(&party);
        self
    }
}

impl FromIterator<(Party, CompassPosition)> for CompassReference {
    fn from_iter<T: IntoIterator<Item = (Party, CompassPosition)>>(iter: T) -> Self {
        Self {
            coordinates: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerName {
    User,
    Party(Party),
}

impl MarkerName {
    pub fn label(self) -> &'static str {
        match self {
            Self::User => USER_MARKER_LABEL,
            Self::Party(party) => party.label(),
        }
    }
}

impl Serialize for MarkerName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompassMarker {
    pub name: MarkerName,
    pub coords: CompassPosition,
    pub color: String,
    pub size: u16,
}

/// User marker first, then every dataset party that has a reference coordinate.
pub fn compass_view(
    answers: &UserAnswers,
    dataset: &PoliticalDataset,
    reference: &CompassReference,
) -> Vec<CompassMarker> {
    let user = CompassMarker {
        name: MarkerName::User,
        coords: compute_user_position(answers, dataset),
        color: USER_MARKER_COLOR.to_string(),
        size: USER_MARKER_SIZE,
    };

    std::iter::once(user)
        .chain(dataset.parties.iter().filter_map(|info| {
            reference.position(info.name).map(|coords| CompassMarker {
                name: MarkerName::Party(info.name),
                coords,
                color: info.color.clone(),
                size: PARTY_MARKER_SIZE,
            })
        }))
        .collect()
}
