//! Content extraction functionality for the crawler module
//!
//! Converts raw HTML into cleaned, titled plain text by dropping
//! non-content elements and normalizing whitespace.

use scraper::{Html, Selector};

/// Elements whose subtrees carry no knowledge-base content
const EXCLUDED_TAGS: &[&str] = &[
    "script", "style", "img", "svg", "canvas", "noscript", "iframe", "header", "footer", "nav",
    "form", "link", "meta",
];

/// Title and cleaned text extracted from one HTML document
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedContent {
    /// Document title, or the caller-supplied fallback
    pub title: String,

    /// Cleaned visible text, prefixed with a level-1 heading
    pub text: String,
}

/// Extract cleaned, titled text from an HTML document
///
/// Uses the `<title>` element when present, else `fallback_title`
/// (typically the page URL). Visible text is collected depth-first with
/// one newline per text node, skipping scripts, styles, media, and
/// navigation chrome, then each line is trimmed and blank lines are
/// dropped. Malformed HTML degrades to whatever text remains.
pub fn extract_content(html: &str, fallback_title: &str) -> ExtractedContent {
    let document = Html::parse_document(html);

    let title = Selector::parse("title")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| fallback_title.to_string());

    let mut segments: Vec<String> = Vec::new();
    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let mut excluded = false;
        let mut current = node.parent();
        while let Some(parent) = current {
            if let Some(el) = parent.value().as_element() {
                if EXCLUDED_TAGS.contains(&el.name()) {
                    excluded = true;
                    break;
                }
            }
            current = parent.parent();
        }
        if excluded {
            continue;
        }

        segments.push(text.to_string());
    }

    let cleaned = segments
        .join("\n")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let text = format!("# {}\n\n{}", title, cleaned);

    ExtractedContent { title, text }
}
