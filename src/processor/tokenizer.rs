//! Token counting against a target model's tokenizer

use tiktoken_rs::CoreBPE;

use crate::processor::error::ProcessError;

/// Measures the token count of a piece of text
///
/// The chunker is generic over this seam so tests can supply a
/// deterministic counter while production code measures with the real
/// model tokenizer.
pub trait TokenCounter {
    /// Number of tokens in `text`
    fn count(&self, text: &str) -> usize;
}

/// Token counter backed by the BPE tokenizer of a specific model
pub struct ModelTokenizer {
    bpe: CoreBPE,
}

impl ModelTokenizer {
    /// Build the tokenizer for a model name (e.g. `gpt-4o`)
    pub fn for_model(model: &str) -> Result<Self, ProcessError> {
        let bpe = tiktoken_rs::get_bpe_from_model(model)
            .map_err(|e| ProcessError::Tokenizer(format!("no tokenizer for {}: {}", model, e)))?;
        Ok(Self { bpe })
    }
}

impl TokenCounter for ModelTokenizer {
    fn count(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_model_counts_tokens() {
        let tokenizer = ModelTokenizer::for_model("gpt-4o").unwrap();
        assert_eq!(tokenizer.count(""), 0);
        assert!(tokenizer.count("hello world") >= 2);
    }

    #[test]
    fn test_unknown_model_errors() {
        let result = ModelTokenizer::for_model("definitely-not-a-model");
        assert!(matches!(result, Err(ProcessError::Tokenizer(_))));
    }
}
