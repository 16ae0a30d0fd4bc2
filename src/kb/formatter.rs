//! Knowledge-base formatter
//!
//! Reformats raw crawled text into a clean Markdown knowledge base by
//! chunking it under a token budget and sending each chunk through the
//! completion client as one rolling conversation, so later chunks
//! continue the earlier ones without repetition.

use std::path::Path;
use tracing::{info, instrument};

use crate::error::Result;
use crate::kb::prompts;
use crate::llm::{ChatMessage, Client};
use crate::processor::{ChunkOptions, ModelTokenizer, chunk_text};

/// Formats raw extracted text into a Markdown knowledge base
pub struct KnowledgeBaseFormatter {
    client: Client,
    model: String,
    max_tokens: usize,
    temperature: f32,
    tokenizer: ModelTokenizer,
    messages: Vec<ChatMessage>,
}

impl KnowledgeBaseFormatter {
    /// Create a formatter for the configured model and chunk budget
    ///
    /// Fails when no tokenizer is known for the model name.
    pub fn new(client: Client, options: &ChunkOptions) -> Result<Self> {
        let tokenizer = ModelTokenizer::for_model(&options.model)?;
        Ok(Self {
            client,
            model: options.model.clone(),
            max_tokens: options.max_tokens,
            temperature: 0.0,
            tokenizer,
            messages: vec![ChatMessage::system(prompts::FORMAT_SYSTEM)],
        })
    }

    /// Format the full raw text, chunk by chunk
    ///
    /// Each chunk is appended to the conversation as a user turn and the
    /// model's reply as an assistant turn, keeping the rolling context
    /// well-formed. The formatted chunks are concatenated with blank
    /// lines between them.
    #[instrument(skip(self, raw_text), fields(model = %self.model))]
    pub async fn format_knowledge_base(&mut self, raw_text: &str) -> Result<String> {
        let chunks = chunk_text(raw_text, &self.tokenizer, self.max_tokens);
        info!("Formatting {} chunks", chunks.len());

        let mut result = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            info!("Formatting chunk {} of {}", i + 1, chunks.len());
            self.messages
                .push(ChatMessage::user(prompts::format_chunk(chunk)));

            let formatted = self
                .client
                .chat(
                    &self.messages,
                    &self.model,
                    self.temperature,
                    Some(self.max_tokens as u32),
                )
                .await?;

            self.messages.push(ChatMessage::assistant(formatted.clone()));
            result.push_str("\n\n");
            result.push_str(&formatted);
        }

        Ok(result)
    }

    /// Write formatted content to a file
    pub async fn save_to_file(&self, content: &str, path: &Path) -> Result<()> {
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}
