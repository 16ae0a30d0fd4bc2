//! Question-answer pair generation
//!
//! Generates QA pairs from a knowledge base, one completion call per
//! chunk with a fresh conversation so chunks cannot bleed into each
//! other. Each chunk's response parses into a typed outcome so callers
//! can tell an empty result apart from an unparseable one.

use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::kb::{QaPair, QaSet, prompts, strip_code_fences};
use crate::llm::{ChatMessage, Client};
use crate::processor::{ChunkOptions, ModelTokenizer, chunk_text};

/// Result of parsing one chunk's QA response
#[derive(Debug)]
pub enum ChunkQaOutcome {
    /// Valid JSON with the expected structure
    Parsed(Vec<QaPair>),

    /// The response could not be parsed; the raw text is kept for
    /// inspection
    ParseFailure { error: String, raw: String },
}

/// A parse failure attributed to its chunk
#[derive(Debug)]
pub struct ChunkParseFailure {
    /// 1-based chunk number
    pub chunk: usize,
    pub error: String,
    pub raw: String,
}

/// Aggregated generation result
#[derive(Debug)]
pub struct QaGeneration {
    /// All successfully parsed pairs, in chunk order
    pub set: QaSet,

    /// Chunks whose responses failed to parse
    pub failures: Vec<ChunkParseFailure>,
}

/// Generates QA pairs from knowledge-base text
pub struct QaGenerator {
    client: Client,
    model: String,
    max_tokens: usize,
    temperature: f32,
    pairs_per_chunk: usize,
    tokenizer: ModelTokenizer,
}

impl QaGenerator {
    /// Create a generator requesting `pairs_per_chunk` pairs per chunk
    pub fn new(client: Client, options: &ChunkOptions, pairs_per_chunk: usize) -> Result<Self> {
        let tokenizer = ModelTokenizer::for_model(&options.model)?;
        Ok(Self {
            client,
            model: options.model.clone(),
            max_tokens: options.max_tokens,
            temperature: 0.0,
            pairs_per_chunk,
            tokenizer,
        })
    }

    /// Generate QA pairs over the whole knowledge base
    ///
    /// A chunk whose response fails to parse is recorded as a failure
    /// and does not abort the remaining chunks.
    #[instrument(skip(self, knowledge_base), fields(model = %self.model))]
    pub async fn generate(&self, knowledge_base: &str) -> Result<QaGeneration> {
        let chunks = chunk_text(knowledge_base, &self.tokenizer, self.max_tokens);
        info!("Generating QA pairs over {} chunks", chunks.len());

        let mut set = QaSet::default();
        let mut failures = Vec::new();

        for (i, chunk) in chunks.iter().enumerate() {
            info!("Processing chunk {} of {}", i + 1, chunks.len());

            let messages = vec![
                ChatMessage::system(prompts::qa_system(self.pairs_per_chunk)),
                ChatMessage::user(prompts::qa_user(self.pairs_per_chunk, chunk)),
            ];
            let response = self
                .client
                .chat(
                    &messages,
                    &self.model,
                    self.temperature,
                    Some(self.max_tokens as u32),
                )
                .await?;

            match parse_qa_response(&response, self.pairs_per_chunk) {
                ChunkQaOutcome::Parsed(pairs) => {
                    if pairs.len() < self.pairs_per_chunk {
                        warn!(
                            "Received only {} pairs instead of {} in chunk {}",
                            pairs.len(),
                            self.pairs_per_chunk,
                            i + 1
                        );
                    }
                    set.qas.extend(pairs);
                }
                ChunkQaOutcome::ParseFailure { error, raw } => {
                    warn!("Failed to parse QA response for chunk {}: {}", i + 1, error);
                    failures.push(ChunkParseFailure {
                        chunk: i + 1,
                        error,
                        raw,
                    });
                }
            }
        }

        Ok(QaGeneration { set, failures })
    }
}

/// Parse one chunk's response into pairs, truncating oversupply
pub fn parse_qa_response(raw: &str, expected_pairs: usize) -> ChunkQaOutcome {
    let cleaned = strip_code_fences(raw);
    match serde_json::from_str::<QaSet>(&cleaned) {
        Ok(parsed) => {
            let mut pairs = parsed.qas;
            pairs.truncate(expected_pairs);
            ChunkQaOutcome::Parsed(pairs)
        }
        Err(e) => ChunkQaOutcome::ParseFailure {
            error: e.to_string(),
            raw: raw.to_string(),
        },
    }
}
