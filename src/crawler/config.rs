//! # Crawler Configuration Module
//!
//! Configuration options for the web crawler: domain restriction, depth
//! bounding, request timeout, and output destination. Uses a builder
//! pattern for flexible configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the crawler
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Host restriction; pages whose host does not contain this string
    /// are skipped. No restriction when `None`.
    pub domain: Option<String>,

    /// Maximum link-following depth
    pub max_depth: u32,

    /// Disable the depth bound entirely
    pub unlimited: bool,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// User agent to use for requests
    pub user_agent: String,

    /// Append results to this file instead of collecting them in memory
    pub output: Option<PathBuf>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            domain: None,
            max_depth: 3,
            unlimited: false,
            timeout_secs: 10,
            user_agent: format!("assay-crawler/{}", env!("CARGO_PKG_VERSION")),
            output: None,
        }
    }
}

/// Builder for CrawlerConfig
#[derive(Debug, Default)]
pub struct CrawlerConfigBuilder {
    config: CrawlerConfig,
}

impl CrawlerConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CrawlerConfig::default(),
        }
    }

    /// Restrict the crawl to hosts containing this domain
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.config.domain = Some(domain.into());
        self
    }

    /// Set the maximum link-following depth
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Disable the depth bound
    pub fn unlimited(mut self, unlimited: bool) -> Self {
        self.config.unlimited = unlimited;
        self
    }

    /// Set the per-request timeout in seconds
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// Set the user agent to use for requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Append crawl results to a file instead of collecting in memory
    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.config.output = Some(output.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> CrawlerConfig {
        self.config
    }
}

impl CrawlerConfig {
    /// Create a new builder
    pub fn builder() -> CrawlerConfigBuilder {
        CrawlerConfigBuilder::new()
    }

    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
