//! Text processing module
//!
//! This module provides token-bounded text chunking and the tokenizer
//! seam used to measure chunk sizes against a target model.

mod chunking;
mod config;
mod error;
mod tokenizer;

pub use chunking::chunk_text;
pub use config::ChunkOptions;
pub use error::ProcessError;
pub use tokenizer::{ModelTokenizer, TokenCounter};
