//! Crawl traversal: depth-first, domain-scoped, dedup-guarded
//!
//! The traversal runs over an explicit work stack of `(url, depth)`
//! pairs rather than native recursion, so stack depth never bounds the
//! crawl and the state object stays the only mutable resource.

use reqwest::Client as ReqwestClient;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::crawler::content_extraction::extract_content;
use crate::crawler::error::CrawlError;
use crate::crawler::links::extract_links;
use crate::crawler::output::CrawlWriter;
use crate::crawler::url_normalize::normalize_url;
use crate::crawler::{CrawlState, CrawlerConfig, PageRecord};

/// Content types that are handed to the content extractor
const HTML_CONTENT_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];

/// Domain-scoped web crawler
pub struct Crawler {
    config: CrawlerConfig,
    client: ReqwestClient,
}

impl Crawler {
    /// Create a crawler with the given configuration
    pub fn new(config: CrawlerConfig) -> Result<Self, CrawlError> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }

    /// Crawl starting from `start_url`, producing the final crawl state
    ///
    /// Traversal is depth-first in document order. Every URL is fetched
    /// at most once per run: a normalized URL is marked visited before
    /// its fetch, which also breaks link cycles. A failed fetch abandons
    /// only its branch; the crawl itself never aborts because of one bad
    /// page. An invalid starting URL is fatal and surfaced before any
    /// fetching begins.
    #[instrument(skip(self), fields(domain = ?self.config.domain))]
    pub async fn crawl(&self, start_url: &str) -> Result<CrawlState, CrawlError> {
        // Fail fast on an unusable starting URL
        Url::parse(start_url)
            .map_err(|_| CrawlError::InvalidStartUrl(start_url.to_string()))?;

        if self.config.unlimited {
            warn!(
                "depth bound disabled: termination relies on the reachable link graph \
                 being finite; a site generating unbounded distinct URLs will never finish"
            );
        }

        let mut writer = match &self.config.output {
            Some(path) => Some(CrawlWriter::create(path).await?),
            None => None,
        };

        let mut state = CrawlState::new();
        let mut stack: Vec<(String, u32)> = vec![(start_url.to_string(), 0)];

        while let Some((url, depth)) = stack.pop() {
            let url = normalize_url(&url);

            // Mark before fetch: breaks cycles and prevents duplicate
            // fetches when two pages link the same target.
            if !state.mark_visited(&url) {
                continue;
            }

            let Ok(parsed) = Url::parse(&url) else {
                debug!("skipping unparseable URL: {}", url);
                continue;
            };

            if let Some(domain) = &self.config.domain {
                let in_domain = parsed.host_str().is_some_and(|h| h.contains(domain.as_str()));
                if !in_domain {
                    debug!("skipping off-domain URL: {}", url);
                    continue;
                }
            }

            info!("crawling {} at depth {}", url, depth);

            let response = match self
                .client
                .get(parsed.clone())
                .send()
                .await
                .and_then(|r| r.error_for_status())
            {
                Ok(response) => response,
                Err(e) => {
                    warn!("error fetching {}: {}", url, e);
                    continue;
                }
            };

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_ascii_lowercase();
            if !HTML_CONTENT_TYPES.iter().any(|t| content_type.contains(t)) {
                debug!("skipping non-HTML content at {} [{}]", url, content_type);
                continue;
            }

            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("error reading body of {}: {}", url, e);
                    continue;
                }
            };

            let content = extract_content(&body, &url);
            let record = PageRecord {
                url: url.clone(),
                title: content.title,
                text: content.text,
            };

            match writer.as_mut() {
                Some(writer) => writer.append(&record.url, &record.text).await?,
                None => state.record(record),
            }

            // The page itself is recorded either way; the depth bound
            // only stops link following.
            if !self.config.unlimited && depth >= self.config.max_depth {
                debug!("depth bound reached at {}", url);
                continue;
            }

            // Reverse so pop order matches document order (depth-first)
            for link in extract_links(&body, &parsed).into_iter().rev() {
                stack.push((link, depth + 1));
            }
        }

        if let Some(writer) = writer.as_mut() {
            writer.flush().await?;
        }

        info!("crawl finished: {} pages recorded", state.len());
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn page(links: &[&str], body: &str) -> String {
        let anchors = links
            .iter()
            .map(|l| format!("<a href=\"{}\">link</a>", l))
            .collect::<Vec<_>>()
            .join("\n");
        format!("<html><body><p>{}</p>{}</body></html>", body, anchors)
    }

    fn crawler_for(max_depth: u32, unlimited: bool) -> Crawler {
        let config = CrawlerConfig::builder()
            .domain("127.0.0.1")
            .max_depth(max_depth)
            .unlimited(unlimited)
            .build();
        Crawler::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_cycle_graph_fetches_each_page_once() {
        let mut server = Server::new_async().await;
        let base = server.url();

        // A -> B, A -> C; B -> C; C -> A
        let mock_a = server
            .mock("GET", "/a")
            .with_header("content-type", "text/html")
            .with_body(page(&[&format!("{base}/b"), &format!("{base}/c")], "page a"))
            .expect(1)
            .create_async()
            .await;
        let mock_b = server
            .mock("GET", "/b")
            .with_header("content-type", "text/html")
            .with_body(page(&[&format!("{base}/c")], "page b"))
            .expect(1)
            .create_async()
            .await;
        let mock_c = server
            .mock("GET", "/c")
            .with_header("content-type", "text/html")
            .with_body(page(&[&format!("{base}/a")], "page c"))
            .expect(1)
            .create_async()
            .await;

        let crawler = crawler_for(10, false);
        let state = crawler.crawl(&format!("{base}/a")).await.unwrap();

        mock_a.assert_async().await;
        mock_b.assert_async().await;
        mock_c.assert_async().await;

        // Depth-first discovery order: A, then A's first link B, then C via B
        let urls: Vec<&str> = state.urls().collect();
        assert_eq!(
            urls,
            vec![
                format!("{base}/a"),
                format!("{base}/b"),
                format!("{base}/c")
            ]
        );
    }

    #[tokio::test]
    async fn test_depth_bound_respected() {
        let mut server = Server::new_async().await;
        let base = server.url();

        // A -> B -> C with max_depth = 1: C is never fetched
        let _mock_a = server
            .mock("GET", "/a")
            .with_header("content-type", "text/html")
            .with_body(page(&[&format!("{base}/b")], "page a"))
            .expect(1)
            .create_async()
            .await;
        let _mock_b = server
            .mock("GET", "/b")
            .with_header("content-type", "text/html")
            .with_body(page(&[&format!("{base}/c")], "page b"))
            .expect(1)
            .create_async()
            .await;
        let mock_c = server
            .mock("GET", "/c")
            .with_header("content-type", "text/html")
            .with_body(page(&[], "page c"))
            .expect(0)
            .create_async()
            .await;

        let crawler = crawler_for(1, false);
        let state = crawler.crawl(&format!("{base}/a")).await.unwrap();

        mock_c.assert_async().await;
        let urls: Vec<&str> = state.urls().collect();
        assert_eq!(urls, vec![format!("{base}/a"), format!("{base}/b")]);
    }

    #[tokio::test]
    async fn test_unlimited_overrides_depth_bound() {
        let mut server = Server::new_async().await;
        let base = server.url();

        for (path, next) in [("/a", Some("/b")), ("/b", Some("/c")), ("/c", None)] {
            let links: Vec<String> = next.map(|n| format!("{base}{n}")).into_iter().collect();
            let links: Vec<&str> = links.iter().map(String::as_str).collect();
            server
                .mock("GET", path)
                .with_header("content-type", "text/html")
                .with_body(page(&links, path))
                .expect(1)
                .create_async()
                .await;
        }

        // Same chain, max_depth = 1 but unlimited = true: all three pages
        let crawler = crawler_for(1, true);
        let state = crawler.crawl(&format!("{base}/a")).await.unwrap();

        let urls: Vec<&str> = state.urls().collect();
        assert_eq!(
            urls,
            vec![
                format!("{base}/a"),
                format!("{base}/b"),
                format!("{base}/c")
            ]
        );
    }

    #[tokio::test]
    async fn test_off_domain_links_never_fetched() {
        let mut server = Server::new_async().await;
        let base = server.url();

        let _mock_a = server
            .mock("GET", "/a")
            .with_header("content-type", "text/html")
            .with_body(page(&["https://other.invalid/page"], "page a"))
            .expect(1)
            .create_async()
            .await;

        let crawler = crawler_for(3, false);
        let state = crawler.crawl(&format!("{base}/a")).await.unwrap();

        let urls: Vec<&str> = state.urls().collect();
        assert_eq!(urls, vec![format!("{base}/a")]);
    }

    #[tokio::test]
    async fn test_non_html_content_skipped() {
        let mut server = Server::new_async().await;
        let base = server.url();

        let _mock_a = server
            .mock("GET", "/a")
            .with_header("content-type", "text/html")
            .with_body(page(&[&format!("{base}/doc.pdf")], "page a"))
            .expect(1)
            .create_async()
            .await;
        let mock_pdf = server
            .mock("GET", "/doc.pdf")
            .with_header("content-type", "application/pdf")
            .with_body("%PDF-1.4 not html")
            .expect(1)
            .create_async()
            .await;

        let crawler = crawler_for(3, false);
        let state = crawler.crawl(&format!("{base}/a")).await.unwrap();

        // Fetched once, but neither recorded nor recursed into
        mock_pdf.assert_async().await;
        let urls: Vec<&str> = state.urls().collect();
        assert_eq!(urls, vec![format!("{base}/a")]);
    }

    #[tokio::test]
    async fn test_failed_fetch_aborts_only_its_branch() {
        let mut server = Server::new_async().await;
        let base = server.url();

        let _mock_a = server
            .mock("GET", "/a")
            .with_header("content-type", "text/html")
            .with_body(page(
                &[&format!("{base}/missing"), &format!("{base}/b")],
                "page a",
            ))
            .expect(1)
            .create_async()
            .await;
        let _mock_missing = server
            .mock("GET", "/missing")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;
        let _mock_b = server
            .mock("GET", "/b")
            .with_header("content-type", "text/html")
            .with_body(page(&[], "page b"))
            .expect(1)
            .create_async()
            .await;

        let crawler = crawler_for(3, false);
        let state = crawler.crawl(&format!("{base}/a")).await.unwrap();

        // The 404 branch is abandoned; the sibling is still crawled
        let urls: Vec<&str> = state.urls().collect();
        assert_eq!(urls, vec![format!("{base}/a"), format!("{base}/b")]);
    }

    #[tokio::test]
    async fn test_trailing_slash_and_fragment_dedup() {
        let mut server = Server::new_async().await;
        let base = server.url();

        let mock_a = server
            .mock("GET", "/a")
            .with_header("content-type", "text/html")
            .with_body(page(
                &[&format!("{base}/a/"), &format!("{base}/a#section")],
                "page a",
            ))
            .expect(1)
            .create_async()
            .await;

        let crawler = crawler_for(3, false);
        let state = crawler.crawl(&format!("{base}/a")).await.unwrap();

        mock_a.assert_async().await;
        assert_eq!(state.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_start_url_is_fatal() {
        let server = Server::new_async().await;
        let crawler = crawler_for(3, false);

        let result = crawler.crawl("not a url").await;
        assert!(matches!(result, Err(CrawlError::InvalidStartUrl(_))));
    }

    #[tokio::test]
    async fn test_output_file_mode() {
        use tempfile::tempdir;

        let mut server = Server::new_async().await;
        let base = server.url();

        let _mock_a = server
            .mock("GET", "/a")
            .with_header("content-type", "text/html")
            .with_body(page(&[], "page a text"))
            .expect(1)
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let config = CrawlerConfig::builder()
            .domain("127.0.0.1")
            .max_depth(1)
            .output(&path)
            .build();

        let crawler = Crawler::new(config).unwrap();
        let state = crawler.crawl(&format!("{base}/a")).await.unwrap();

        // File mode: results go to the file, not the in-memory map
        assert!(state.is_empty());
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("# Scraped Knowledge Base\n\n"));
        assert!(contents.contains(&format!("<!-- URL: {base}/a -->")));
        assert!(contents.contains("page a text"));
    }
}
