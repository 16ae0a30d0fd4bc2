//! Website crawler module
//!
//! This module provides functionality for crawling a single web domain,
//! extracting cleaned text from every reachable HTML page within a
//! configurable depth bound.

mod config;
mod content_extraction;
mod error;
mod links;
mod output;
mod traversal;
mod url_normalize;

pub use config::{CrawlerConfig, CrawlerConfigBuilder};
pub use content_extraction::{ExtractedContent, extract_content};
pub use error::CrawlError;
pub use links::extract_links;
pub use output::CrawlWriter;
pub use traversal::Crawler;
pub use url_normalize::normalize_url;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use url::Url;

/// A crawled page with its extracted content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// Normalized URL of the page
    pub url: String,

    /// Title of the page
    pub title: String,

    /// Extracted text, prefixed with a level-1 heading
    pub text: String,
}

/// State owned by a single crawl invocation
///
/// Tracks which normalized URLs have been visited and the pages recorded
/// so far, in discovery order. A URL appears at most once among the
/// records, and every recorded URL is also in the visited set.
#[derive(Debug, Default)]
pub struct CrawlState {
    visited: HashSet<String>,
    pages: Vec<PageRecord>,
}

impl CrawlState {
    /// Create an empty crawl state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a normalized URL as visited, returning false if it already was
    pub(crate) fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    pub(crate) fn record(&mut self, page: PageRecord) {
        self.pages.push(page);
    }

    /// Whether a normalized URL has been visited
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Recorded pages in discovery order
    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    /// Recorded URLs in discovery order
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|p| p.url.as_str())
    }

    /// Look up the text recorded for a normalized URL
    pub fn get(&self, url: &str) -> Option<&str> {
        self.pages
            .iter()
            .find(|p| p.url == url)
            .map(|p| p.text.as_str())
    }

    /// Number of pages recorded
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether no pages were recorded
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Join all recorded page text into one document, blank-line separated
    pub fn aggregate_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Crawl a website, restricting traversal to the start URL's host
///
/// Convenience entry point for downstream consumers: derives the domain
/// restriction from the starting URL and collects results in memory.
///
/// # Arguments
///
/// * `start_url` - The URL to start crawling from
/// * `max_depth` - Maximum link-following depth
///
/// # Returns
///
/// The crawl state holding every recorded page
pub async fn crawl_site(start_url: &str, max_depth: u32) -> Result<CrawlState, CrawlError> {
    let parsed = Url::parse(start_url)?;
    let domain = parsed
        .host_str()
        .ok_or_else(|| CrawlError::InvalidStartUrl(start_url.to_string()))?
        .to_string();

    let config = CrawlerConfig::builder()
        .domain(domain)
        .max_depth(max_depth)
        .build();

    let crawler = Crawler::new(config)?;
    crawler.crawl(start_url).await
}
