//! Prompt payloads built from scoring output and questionnaire answers.

use std::fmt::Write as _;

use crate::dataset::{Party, PoliticalDataset};
use crate::scoring::AffinityResult;
use crate::session::{UserAnswers, UserWeights};

/// Parties quoted in the result explanation.
pub const EXPLAINED_PARTIES: usize = 3;

/// Topic importance and every concretely answered question, grouped by topic.
pub fn format_user_profile(
    answers: &UserAnswers,
    weights: &UserWeights,
    dataset: &PoliticalDataset,
) -> String {
    let mut profile = String::from("Preferencias y respuestas del usuario:\n");

    for topic in &dataset.topics {
        writeln!(
            &mut profile,
            "\nTema: {} (Importancia asignada: {})",
            topic.title,
            weights.get(&topic.id).label()
        )
        .expect("write topic header");

        for question in &topic.questions {
            if let Some(stance) = answers.stance(&question.id) {
                writeln!(
                    &mut profile,
                    "- Pregunta: \"{}\"\n  - Respuesta del usuario: {}",
                    question.statement(),
                    stance.label()
                )
                .expect("write answer");
            }
        }
    }

    profile
}

/// Stances of one party on every question it has a position on.
pub fn format_party_stances(party: Party, dataset: &PoliticalDataset) -> String {
    let mut stances = format!("Posturas del partido seleccionado ({party}):\n");

    for topic in &dataset.topics {
        writeln!(&mut stances, "\nTema: {}", topic.title).expect("write topic header");
        for question in &topic.questions {
            if let Some(stance) = question.stance_for(party) {
                writeln!(
                    &mut stances,
                    "- Pregunta: \"{}\"\n  - Postura del partido: {}",
                    question.statement(),
                    stance.party_label()
                )
                .expect("write party stance");
            }
        }
    }

    stances
}

/// `PARTY (SCORE%)` for the top of the ranking, scores to one decimal.
pub fn format_top_parties(ranking: &[AffinityResult]) -> String {
    ranking
        .iter()
        .take(EXPLAINED_PARTIES)
        .map(|result| format!("{} ({:.1}%)", result.party, result.score))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn explanation_prompt(
    ranking: &[AffinityResult],
    answers: &UserAnswers,
    weights: &UserWeights,
    dataset: &PoliticalDataset,
) -> String {
    let top_parties = format_top_parties(ranking);
    let profile = format_user_profile(answers, weights, dataset);

    format!(
        "Eres un analista político experto, neutral e imparcial. Explica de forma razonada \
por qué un usuario muestra afinidad con determinados partidos políticos españoles a partir \
de sus respuestas a un cuestionario.

Resultados de afinidad:
El usuario muestra la mayor afinidad con los siguientes partidos: {top_parties}.

{profile}
Análisis a realizar:
1. **Perfil ideológico:** describe brevemente el perfil general del usuario a partir del \
conjunto de sus respuestas.
2. **Partido con mayor afinidad:** explica la coincidencia citando 2-3 temas o preguntas \
en los que sus posturas son casi idénticas.
3. **Comparativa:** explica brevemente la afinidad con el segundo y el tercer partido e \
indica si procede de los mismos temas o de otros ejes.
4. **Conclusión neutral:** resume sin recomendar ningún voto.

Usa un tono claro, educativo y objetivo, con formato Markdown (títulos y listas).
"
    )
}

pub fn intention_prompt(
    party: Party,
    answers: &UserAnswers,
    weights: &UserWeights,
    dataset: &PoliticalDataset,
) -> String {
    let profile = format_user_profile(answers, weights, dataset);
    let stances = format_party_stances(party, dataset);

    format!(
        "Eres un analista político experto, neutral y objetivo. Compara las opiniones de un \
usuario con el programa del partido que ha indicado como intención de voto.

Partido seleccionado por el usuario: {party}

{profile}
{stances}
Análisis a realizar:
1. **Puntos de máximo alineamiento:** identifica 3-4 temas o preguntas en los que el \
usuario coincide con {party} y explica cada uno.
2. **Puntos de mayor divergencia:** identifica 2-3 temas o preguntas en los que el usuario \
difiere de {party} y explica cada fricción.
3. **Conclusión neutral:** resume el grado de alineamiento sin juicios de valor ni \
recomendaciones.

Usa un tono informativo y equilibrado, con formato Markdown (títulos y listas).
"
    )
}

/// Per-party topic summaries used to ground chat answers.
pub fn chat_context(dataset: &PoliticalDataset) -> String {
    dataset
        .topics
        .iter()
        .map(|topic| {
            let mut block = format!("**Tema: {}**", topic.title);
            for summary in &topic.party_topic_summaries {
                write!(&mut block, "\n- {}: {}", summary.party, summary.summary)
                    .expect("write summary");
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn chat_prompt(question: &str, context: &str) -> String {
    format!(
        "Eres \"Vota Informado\", un asistente de IA que actúa como analista político neutral \
y bien informado.

**Instrucciones:**
1. Responde de forma completa y objetiva sobre el panorama político español.
2. Usa el contexto siguiente como base principal y compleméntalo con tu conocimiento \
general cuando proceda.
3. Indica, siempre que sea posible, qué partidos se alinean con cada postura.
4. Mantén la neutralidad: no emitas opiniones.
5. Formatea la respuesta con Markdown.
6. Si la pregunta no trata sobre política española, declina responder amablemente.

**Contexto (posturas de los partidos en la aplicación):**
---
{context}
---

**Pregunta del usuario:**
{question}
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Stance;

    fn dataset() -> PoliticalDataset {
        PoliticalDataset::sample().expect("bundled dataset is valid")
    }

    #[test]
    fn profile_lists_only_concrete_answers() {
        let dataset = dataset();
        let weights = UserWeights::for_dataset(&dataset);
        let mut answers = UserAnswers::new();
        answers.answer("eco-impuestos", Stance::TOTALLY_AGREE);
        answers.skip("eco-alquiler");

        let profile = format_user_profile(&answers, &weights, &dataset);

        assert!(profile.contains("Respuesta del usuario: Totalmente de acuerdo"));
        assert!(profile.contains("(Importancia asignada: Importante)"));
        assert_eq!(profile.matches("- Pregunta:").count(), 1);
    }

    #[test]
    fn top_parties_use_one_decimal() {
        let ranking = vec![
            AffinityResult {
                party: Party::Psoe,
                score: 81.26,
            },
            AffinityResult {
                party: Party::Sumar,
                score: 77.0,
            },
            AffinityResult {
                party: Party::Pnv,
                score: 60.04,
            },
            AffinityResult {
                party: Party::Vox,
                score: 12.0,
            },
        ];

        assert_eq!(
            format_top_parties(&ranking),
            "PSOE (81.3%), Sumar (77.0%), PNV (60.0%)"
        );
    }

    #[test]
    fn party_stances_use_intermediate_wording_for_neutral() {
        let dataset = dataset();
        let stances = format_party_stances(Party::Pnv, &dataset);
        assert!(stances.starts_with("Posturas del partido seleccionado (PNV):"));
        assert!(stances.contains("Neutral / Postura intermedia"));
    }

    #[test]
    fn chat_context_includes_topic_summaries() {
        let dataset = dataset();
        let context = chat_context(&dataset);
        assert!(context.contains("**Tema: Economía y Fiscalidad**"));
        assert!(context.contains("- PP: "));
        let prompt = chat_prompt("¿Quién apoya el control del alquiler?", &context);
        assert!(prompt.ends_with("¿Quién apoya el control del alquiler?\n"));
    }
}
