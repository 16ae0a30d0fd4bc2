//! Link extraction for the crawler module

use scraper::{Html, Selector};
use url::Url;

/// Extract candidate links from an HTML document, in document order
///
/// Scans anchor elements with an `href` attribute, skipping in-page
/// anchors, `mailto:` links, and `javascript:` pseudo-links, and
/// resolves the rest against `base` into absolute URLs. Duplicates are
/// permitted; deduplication is the crawler's job.
pub fn extract_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| {
            !href.starts_with('#') && !href.starts_with("mailto:") && !href.starts_with("javascript:")
        })
        .filter_map(|href| base.join(href).ok())
        .map(|url| url.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excludes_anchor_mailto_javascript() {
        let html = r##"<html><body>
            <a href="#top">Top</a>
            <a href="mailto:a@b.com">Mail</a>
            <a href="javascript:void(0)">JS</a>
            <a href="/page">Page</a>
        </body></html>"##;
        let base = Url::parse("https://example.com/").unwrap();

        let links = extract_links(html, &base);
        assert_eq!(links, vec!["https://example.com/page"]);
    }

    #[test]
    fn test_resolves_relative_against_base() {
        let html = r#"<a href="sub/page.html">rel</a> <a href="https://other.com/abs">abs</a>"#;
        let base = Url::parse("https://example.com/dir/").unwrap();

        let links = extract_links(html, &base);
        assert_eq!(
            links,
            vec![
                "https://example.com/dir/sub/page.html",
                "https://other.com/abs"
            ]
        );
    }

    #[test]
    fn test_document_order_with_duplicates() {
        let html = r#"
            <a href="/b">one</a>
            <a href="/a">two</a>
            <a href="/b">three</a>
        "#;
        let base = Url::parse("https://example.com").unwrap();

        let links = extract_links(html, &base);
        assert_eq!(
            links,
            vec![
                "https://example.com/b",
                "https://example.com/a",
                "https://example.com/b"
            ]
        );
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let html = r#"<a name="spot">no href</a><a href="/x">x</a>"#;
        let base = Url::parse("https://example.com").unwrap();

        let links = extract_links(html, &base);
        assert_eq!(links, vec!["https://example.com/x"]);
    }
}
