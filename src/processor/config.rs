//! Chunking configuration

/// Configuration for chunking text
#[derive(Debug, Clone)]
pub struct ChunkOptions {
    /// Maximum tokens per chunk, measured with the target model's tokenizer
    pub max_tokens: usize,

    /// Model whose tokenizer measures chunk sizes
    pub model: String,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            model: "gpt-4o".to_string(),
        }
    }
}
