//! # Assay - Knowledge-Base Assistant Testing for Rust
//!
//! This crate provides an end-to-end toolkit for building and grading
//! LLM-backed knowledge-base assistants. It crawls a bounded web domain
//! into cleaned text, reformats that text into a curated knowledge base
//! through chunked LLM calls, generates question/answer pairs from the
//! result, drives a conversational assistant through those questions,
//! and grades the answers against the references.
//!
//! ## Features
//!
//! - Domain-scoped, depth-bounded web crawling with URL normalization
//!   and content-type filtering
//! - Token-bounded, paragraph-aligned text chunking
//! - Chat-completion client with typed error handling
//! - Knowledge-base formatting and QA-pair generation
//! - Multi-turn assistant test sessions and LLM-based answer grading
//! - Async API with Tokio
//!
//! ## Example
//!
//! ```rust,no_run
//! use assay::crawler::crawl_site;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Crawl a site two levels deep and aggregate the page text
//!     let state = crawl_site("https://example.com", 2).await?;
//!     let knowledge_base = state.aggregate_text();
//!
//!     println!("{} pages crawled", state.len());
//!     println!("{}", knowledge_base);
//!     Ok(())
//! }
//! ```

mod error;

pub mod crawler;
pub mod evaluator;
pub mod kb;
pub mod llm;
pub mod processor;
pub mod session;

pub use error::Error;

/// Re-export of common types for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
}
