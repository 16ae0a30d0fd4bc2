//! Knowledge-base module
//!
//! This module turns crawled text into a curated knowledge base via
//! chunked LLM reformatting, and generates question/answer pairs from
//! the result. It also owns the QA-pair data model shared with the test
//! session and the evaluator.

mod formatter;
pub mod prompts;
mod qa;

pub use formatter::KnowledgeBaseFormatter;
pub use qa::{ChunkParseFailure, ChunkQaOutcome, QaGeneration, QaGenerator};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{Error, Result};

/// One question with its reference answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPair {
    /// The question posed to the assistant
    pub question: String,

    /// The reference answer the assistant is graded against
    pub answer: String,
}

/// A collection of QA pairs, the on-disk interchange format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QaSet {
    /// The pairs, in generation order
    pub qas: Vec<QaPair>,
}

/// Load and validate QA pairs from a JSON file
pub async fn load_qa_pairs(path: &Path) -> Result<QaSet> {
    let content = tokio::fs::read_to_string(path).await?;
    let set: QaSet = serde_json::from_str(&content)
        .map_err(|e| Error::InvalidRequest(format!("invalid QA pairs in {}: {}", path.display(), e)))?;

    for (i, pair) in set.qas.iter().enumerate() {
        if pair.question.trim().is_empty() || pair.answer.trim().is_empty() {
            return Err(Error::InvalidRequest(format!(
                "QA pair {} in {} has an empty question or answer",
                i + 1,
                path.display()
            )));
        }
    }

    Ok(set)
}

/// Save QA pairs to a JSON file, pretty-printed
pub async fn save_qa_pairs(path: &Path, set: &QaSet) -> Result<()> {
    let json = serde_json::to_string_pretty(set)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

/// Remove a Markdown code fence wrapped around a payload, if present
///
/// Models routinely wrap JSON output in ```` ```json ```` blocks even
/// when told not to; stripping the fence makes parsing safe.
pub(crate) fn strip_code_fences(text: &str) -> String {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    let fence = FENCE.get_or_init(|| {
        Regex::new(r"(?s)^\s*```(?:\w+)?\s*(.*?)\s*```\s*$").expect("valid fence regex")
    });

    match fence.captures(text.trim()) {
        Some(caps) => caps[1].to_string(),
        None => text.trim().to_string(),
    }
}
