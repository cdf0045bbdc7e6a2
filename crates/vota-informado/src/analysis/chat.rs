use serde::Serialize;

use super::generator::TextGenerator;
use super::prompts::chat_context;
use super::service::{AnalysisReply, AnalysisService};
use crate::dataset::PoliticalDataset;

pub const CHAT_GREETING: &str = "¡Hola! Soy tu asistente de IA. Puedes preguntarme sobre el \
panorama político español, temas de actualidad o las posturas de los partidos.\n\n\
Uso la información de esta aplicación como base, junto con mi conocimiento general.\n\n\
**Algunas ideas:**\n\
- *¿Qué partidos apoyan limitar el precio del alquiler?*\n\
- *Compara las propuestas fiscales del PP y el PSOE.*\n\
- *¿Qué posturas hay sobre el modelo territorial?*";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatSender {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub sender: ChatSender,
    pub text: String,
}

/// Conversation transcript grounded on the dataset's per-party topic summaries.
#[derive(Debug, Clone)]
pub struct ChatSession {
    context: String,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(dataset: &PoliticalDataset) -> Self {
        Self {
            context: chat_context(dataset),
            messages: vec![ChatMessage {
                sender: ChatSender::Model,
                text: CHAT_GREETING.to_string(),
            }],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    /// Sends a question and records both sides of the exchange.
    ///
    /// Blank input or a submission while the service is busy is ignored.
    pub fn send<G: TextGenerator>(
        &mut self,
        service: &AnalysisService<G>,
        input: &str,
    ) -> Option<AnalysisReply> {
        let question = input.trim();
        if question.is_empty() || service.is_busy() {
            return None;
        }

        let reply = service.chat(question, &self.context)?;
        self.messages.push(ChatMessage {
            sender: ChatSender::User,
            text: question.to_string(),
        });
        self.messages.push(ChatMessage {
            sender: ChatSender::Model,
            text: reply.text.clone(),
        });
        Some(reply)
    }
}
