//! Conversational test session
//!
//! Drives an assistant through a set of generated questions in one
//! multi-turn conversation, optionally grounding it with a knowledge
//! base embedded in the system preamble. The answers come back aligned
//! index-for-index with the questions.

use tracing::{info, instrument};

use crate::error::Result;
use crate::kb::QaSet;
use crate::llm::{ChatMessage, Client};

/// Default assistant instructions for a test session
const DEFAULT_INSTRUCTIONS: &str =
    "You are a helpful assistant. Answer each question clearly and concisely.";

/// A multi-turn QA session against an assistant
pub struct TestSession {
    client: Client,
    model: String,
    preamble: String,
}

impl TestSession {
    /// Create a session, optionally grounded with a knowledge base
    pub fn new(client: Client, model: impl Into<String>, knowledge_base: Option<&str>) -> Self {
        let preamble = match knowledge_base {
            Some(kb) => format!("{DEFAULT_INSTRUCTIONS}\n\n### Reference Material:\n{kb}"),
            None => DEFAULT_INSTRUCTIONS.to_string(),
        };
        Self {
            client,
            model: model.into(),
            preamble,
        }
    }

    /// Ask every question in order, growing the conversation turn by turn
    ///
    /// Earlier answers stay in the history so the assistant sees its own
    /// prior responses, as a real conversation would. Returns one answer
    /// per question, in question order.
    #[instrument(skip(self, qa_set), fields(model = %self.model, questions = qa_set.qas.len()))]
    pub async fn run(&self, qa_set: &QaSet) -> Result<Vec<String>> {
        let mut messages = vec![ChatMessage::system(&self.preamble)];
        let mut answers = Vec::with_capacity(qa_set.qas.len());

        for (i, qa) in qa_set.qas.iter().enumerate() {
            info!("Asking question {} of {}", i + 1, qa_set.qas.len());
            messages.push(ChatMessage::user(&qa.question));

            let answer = self.client.chat(&messages, &self.model, 0.0, None).await?;
            messages.push(ChatMessage::assistant(answer.clone()));
            answers.push(answer);
        }

        Ok(answers)
    }
}
