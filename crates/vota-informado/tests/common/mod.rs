#![allow(dead_code)]

use vota_informado::dataset::{
    AxisSign, IdeologicalSign, Party, PartyInfo, PartyStance, PoliticalDataset, Question, Stance,
    Topic,
};

pub fn stance(value: i8) -> Stance {
    Stance::new(value).expect("valid stance")
}

pub fn sign(value: i8) -> AxisSign {
    AxisSign::try_from(value).expect("valid axis sign")
}

pub fn question(id: &str, stances: &[(Party, i8)], economic: i8, social: i8) -> Question {
    Question {
        id: id.to_string(),
        text: format!("Pregunta {id}"),
        description: String::new(),
        objective: String::new(),
        party_stances: stances
            .iter()
            .map(|&(party, value)| PartyStance {
                party,
                stance: stance(value),
                justification: String::new(),
            })
            .collect(),
        ideological_sign: IdeologicalSign {
            economic: sign(economic),
            social: sign(social),
        },
    }
}

pub fn topic(id: &str, questions: Vec<Question>) -> Topic {
    Topic {
        id: id.to_string(),
        title: format!("Tema {id}"),
        description: String::new(),
        questions,
        party_topic_summaries: Vec::new(),
    }
}

pub fn party(name: Party, color: &str) -> PartyInfo {
    PartyInfo {
        name,
        color: color.to_string(),
    }
}

/// One topic, two questions, one party holding stances 2 and -2.
pub fn single_party_dataset() -> PoliticalDataset {
    PoliticalDataset::new(
        vec![topic(
            "t1",
            vec![
                question("q1", &[(Party::Pp, 2)], 1, 0),
                question("q2", &[(Party::Pp, -2)], 1, 0),
            ],
        )],
        vec![party(Party::Pp, "#1D4ED8")],
    )
    .expect("valid dataset")
}

pub fn sample() -> PoliticalDataset {
    PoliticalDataset::sample().expect("bundled dataset is valid")
}
