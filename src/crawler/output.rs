//! Append-only file output for crawl results

use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::crawler::error::CrawlError;

/// Header written when the output file is created
const FILE_HEADER: &str = "# Scraped Knowledge Base\n\n";

/// Writes crawled pages to a delimited, append-only text file
///
/// The file is truncated and given a one-line header at creation; each
/// page is appended as a `<!-- URL: ... -->` block followed by its text.
pub struct CrawlWriter {
    file: File,
}

impl CrawlWriter {
    /// Create the output file, truncating any existing content
    pub async fn create(path: &Path) -> Result<Self, CrawlError> {
        let mut file = File::create(path).await?;
        file.write_all(FILE_HEADER.as_bytes()).await?;
        Ok(Self { file })
    }

    /// Append one page's content as a delimited block
    pub async fn append(&mut self, url: &str, text: &str) -> Result<(), CrawlError> {
        let block = format!("\n\n<!-- URL: {} -->\n\n{}\n\n", url, text);
        self.file.write_all(block.as_bytes()).await?;
        Ok(())
    }

    /// Flush buffered writes to disk
    pub async fn flush(&mut self) -> Result<(), CrawlError> {
        self.file.flush().await?;
        Ok(())
    }
}
