use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tracing::{info, warn};

use super::generator::{GenerationError, TextGenerator};
use super::prompts;
use crate::dataset::{Party, PoliticalDataset};
use crate::scoring::AffinityResult;
use crate::session::{UserAnswers, UserWeights};

pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "El servicio de análisis por IA no está disponible. Falta la clave de API.";
pub const EXPLANATION_FAILED_MESSAGE: &str =
    "Hubo un error al generar la explicación. Por favor, inténtalo de nuevo más tarde.";
pub const INTENTION_FAILED_MESSAGE: &str =
    "Hubo un error al generar el análisis. Por favor, inténtalo de nuevo más tarde.";
pub const CHAT_FAILED_MESSAGE: &str =
    "Hubo un error al comunicarme con la IA. Por favor, inténtalo de nuevo más tarde.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    ResultExplanation,
    VoteIntention,
    Chat,
}

impl AnalysisKind {
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::ResultExplanation => EXPLANATION_FAILED_MESSAGE,
            Self::VoteIntention => INTENTION_FAILED_MESSAGE,
            Self::Chat => CHAT_FAILED_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Generated,
    Fallback,
}

/// Text shown to the user: either generated content or a fixed fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReply {
    pub kind: AnalysisKind,
    pub source: ReplySource,
    pub text: String,
}

impl AnalysisReply {
    pub fn is_generated(&self) -> bool {
        self.source == ReplySource::Generated
    }
}

/// Runs analyses through a [`TextGenerator`], one request at a time.
///
/// Submissions made while a request is in flight return `None`; failures are
/// never retried and surface as the fallback message for the analysis kind.
#[derive(Debug)]
pub struct AnalysisService<G> {
    generator: G,
    in_flight: AtomicBool,
}

impl<G: TextGenerator> AnalysisService<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn explain_results(
        &self,
        ranking: &[AffinityResult],
        answers: &UserAnswers,
        weights: &UserWeights,
        dataset: &PoliticalDataset,
    ) -> Option<AnalysisReply> {
        self.run(AnalysisKind::ResultExplanation, || {
            prompts::explanation_prompt(ranking, answers, weights, dataset)
        })
    }

    pub fn analyze_vote_intention(
        &self,
        party: Party,
        answers: &UserAnswers,
        weights: &UserWeights,
        dataset: &PoliticalDataset,
    ) -> Option<AnalysisReply> {
        self.run(AnalysisKind::VoteIntention, || {
            prompts::intention_prompt(party, answers, weights, dataset)
        })
    }

    pub fn chat(&self, question: &str, context: &str) -> Option<AnalysisReply> {
        self.run(AnalysisKind::Chat, || prompts::chat_prompt(question, context))
    }

    fn run(&self, kind: AnalysisKind, prompt: impl FnOnce() -> String) -> Option<AnalysisReply> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            info!(?kind, "analysis already in flight, ignoring submission");
            return None;
        };

        let prompt = prompt();
        let reply = match self.generator.generate(&prompt) {
            Ok(text) => AnalysisReply {
                kind,
                source: ReplySource::Generated,
                text,
            },
            Err(GenerationError::MissingCredential) => {
                warn!(?kind, "text generation credential missing");
                AnalysisReply {
                    kind,
                    source: ReplySource::Fallback,
                    text: MISSING_CREDENTIAL_MESSAGE.to_string(),
                }
            }
            Err(err) => {
                warn!(?kind, error = %err, "text generation failed");
                AnalysisReply {
                    kind,
                    source: ReplySource::Fallback,
                    text: kind.fallback_message().to_string(),
                }
            }
        };

        Some(reply)
    }
}

/// Holds the in-flight flag for the duration of one request.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
