use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Agreement intensity with a statement, from -2 (totally disagree) to 2 (totally agree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub struct Stance(i8);

impl Stance {
    pub const TOTALLY_DISAGREE: Self = Self(-2);
    pub const DISAGREE: Self = Self(-1);
    pub const NEUTRAL: Self = Self(0);
    pub const AGREE: Self = Self(1);
    pub const TOTALLY_AGREE: Self = Self(2);

    pub const fn all() -> [Self; 5] {
        [
            Self::TOTALLY_DISAGREE,
            Self::DISAGREE,
            Self::NEUTRAL,
            Self::AGREE,
            Self::TOTALLY_AGREE,
        ]
    }

    pub fn new(value: i8) -> Result<Self, InvalidStance> {
        if (-2..=2).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidStance(value))
        }
    }

    pub const fn value(self) -> i8 {
        self.0
    }

    /// Absolute distance between two stances, in `0..=4`.
    pub const fn distance(self, other: Self) -> u8 {
        (self.0 - other.0).unsigned_abs()
    }

    pub const fn label(self) -> &'static str {
        match self.0 {
            2 => "Totalmente de acuerdo",
            1 => "De acuerdo",
            0 => "Neutral",
            -1 => "En desacuerdo",
            _ => "Totalmente en desacuerdo",
        }
    }

    /// Wording used when a party, rather than the user, holds the stance.
    pub const fn party_label(self) -> &'static str {
        match self.0 {
            0 => "Neutral / Postura intermedia",
            _ => self.label(),
        }
    }
}

impl TryFrom<i8> for Stance {
    type Error = InvalidStance;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Stance> for i8 {
    fn from(value: Stance) -> Self {
        value.0
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("stance {0} is outside the -2..=2 range")]
pub struct InvalidStance(pub i8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Party {
    #[serde(rename = "PP")]
    Pp,
    #[serde(rename = "PSOE")]
    Psoe,
    Vox,
    Sumar,
    Podemos,
    #[serde(rename = "ERC")]
    Erc,
    Junts,
    #[serde(rename = "EH Bildu")]
    EhBildu,
    #[serde(rename = "PNV")]
    Pnv,
    #[serde(rename = "BNG")]
    Bng,
    #[serde(rename = "CC")]
    Cc,
    #[serde(rename = "UPN")]
    Upn,
}

impl Party {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::Pp,
            Self::Psoe,
            Self::Vox,
            Self::Sumar,
            Self::Podemos,
            Self::Erc,
            Self::Junts,
            Self::EhBildu,
            Self::Pnv,
            Self::Bng,
            Self::Cc,
            Self::Upn,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pp => "PP",
            Self::Psoe => "PSOE",
            Self::Vox => "Vox",
            Self::Sumar => "Sumar",
            Self::Podemos => "Podemos",
            Self::Erc => "ERC",
            Self::Junts => "Junts",
            Self::EhBildu => "EH Bildu",
            Self::Pnv => "PNV",
            Self::Bng => "BNG",
            Self::Cc => "CC",
            Self::Upn => "UPN",
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Party {
    type Err = UnknownParty;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        Party::ordered()
            .into_iter()
            .find(|party| party.label().replace(' ', "").to_ascii_lowercase() == wanted)
            .ok_or_else(|| UnknownParty(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown party '{0}'")]
pub struct UnknownParty(pub String);

/// Display metadata for a party taking part in the questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyInfo {
    pub name: Party,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Economic,
    Social,
}

impl Axis {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Economic => "Eje económico",
            Self::Social => "Eje social",
        }
    }
}

/// Direction in which agreeing with a question moves the user along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum AxisSign {
    Negative,
    Neutral,
    Positive,
}

impl AxisSign {
    pub const fn factor(self) -> i8 {
        match self {
            Self::Negative => -1,
            Self::Neutral => 0,
            Self::Positive => 1,
        }
    }
}

impl TryFrom<i8> for AxisSign {
    type Error = InvalidAxisSign;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Negative),
            0 => Ok(Self::Neutral),
            1 => Ok(Self::Positive),
            other => Err(InvalidAxisSign(other)),
        }
    }
}

impl From<AxisSign> for i8 {
    fn from(value: AxisSign) -> Self {
        value.factor()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("axis sign {0} must be -1, 0 or 1")]
pub struct InvalidAxisSign(pub i8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeologicalSign {
    pub economic: AxisSign,
    pub social: AxisSign,
}

impl IdeologicalSign {
    pub const fn on(self, axis: Axis) -> AxisSign {
        match axis {
            Axis::Economic => self.economic,
            Axis::Social => self.social,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyStance {
    pub party: Party,
    pub stance: Stance,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub justification: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    /// Statement the user and the parties position themselves against.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub party_stances: Vec<PartyStance>,
    pub ideological_sign: IdeologicalSign,
}

impl Question {
    pub fn stance_for(&self, party: Party) -> Option<Stance> {
        self.party_stances
            .iter()
            .find(|entry| entry.party == party)
            .map(|entry| entry.stance)
    }

    /// Statement used in prompts; falls back to the display text.
    pub fn statement(&self) -> &str {
        if self.description.trim().is_empty() {
            &self.text
        } else {
            &self.description
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyTopicSummary {
    pub party: Party,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub party_topic_summaries: Vec<PartyTopicSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stance_rejects_values_outside_scale() {
        assert!(Stance::new(3).is_err());
        assert!(Stance::new(-3).is_err());
        assert_eq!(Stance::new(-2), Ok(Stance::TOTALLY_DISAGREE));
    }

    #[test]
    fn stance_deserializes_from_integer() {
        let stance: Stance = serde_json::from_str("1").expect("valid stance");
        assert_eq!(stance, Stance::AGREE);
        assert!(serde_json::from_str::<Stance>("5").is_err());
    }

    #[test]
    fn party_parses_labels_and_codes() {
        assert_eq!("eh bildu".parse::<Party>(), Ok(Party::EhBildu));
        assert_eq!("EH-Bildu".parse::<Party>(), Ok(Party::EhBildu));
        assert_eq!("psoe".parse::<Party>(), Ok(Party::Psoe));
        assert!("Whigs".parse::<Party>().is_err());
    }

    #[test]
    fn party_serializes_with_display_name() {
        let json = serde_json::to_string(&Party::EhBildu).expect("serializes");
        assert_eq!(json, "\"EH Bildu\"");
    }

    #[test]
    fn neutral_party_stance_reads_as_intermediate() {
        assert_eq!(Stance::NEUTRAL.label(), "Neutral");
        assert_eq!(Stance::NEUTRAL.party_label(), "Neutral / Postura intermedia");
        assert_eq!(Stance::AGREE.party_label(), "De acuerdo");
    }
}
