//! Token-bounded, paragraph-aligned text chunking
//!
//! Splits text on blank-line boundaries and greedily packs paragraphs
//! into chunks that stay within a token budget. The budget is a soft
//! guide for downstream LLM calls, not a hard wire limit: a single
//! paragraph larger than the budget is emitted whole rather than split
//! mid-paragraph.

use tracing::debug;

use crate::processor::tokenizer::TokenCounter;

/// Split text into token-bounded, paragraph-aligned chunks
///
/// Paragraphs are the segments produced by splitting on blank lines.
/// Each chunk holds as many consecutive paragraphs as fit within
/// `max_tokens` as measured by `counter`; a paragraph that alone exceeds
/// the budget becomes its own chunk. Chunks are emitted in source order,
/// and identical inputs always produce identical output.
pub fn chunk_text(text: &str, counter: &dyn TokenCounter, max_tokens: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for paragraph in text.split("\n\n") {
        let tentative = if current.is_empty() {
            paragraph.to_string()
        } else {
            format!("{}\n\n{}", current.join("\n\n"), paragraph)
        };

        if counter.count(&tentative) <= max_tokens {
            current.push(paragraph);
        } else {
            if !current.is_empty() {
                chunks.push(current.join("\n\n"));
            }
            current = vec![paragraph];
        }
    }

    if !current.is_empty() {
        chunks.push(current.join("\n\n"));
    }

    debug!("chunked {} chars into {} chunks", text.len(), chunks.len());
    chunks
}
