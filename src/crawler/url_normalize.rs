//! URL normalization for crawl deduplication

use url::Url;

/// Normalize a URL into its canonical form for dedup purposes
///
/// Strips the fragment, strips trailing slashes from the path (an empty
/// path becomes `/`), and leaves scheme, host, port, and query untouched.
/// Malformed URLs are returned unchanged; the crawler filters them out
/// downstream via the domain check.
pub fn normalize_url(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return raw.to_string();
    };

    url.set_fragment(None);

    let path = url.path();
    if path.ends_with('/') && path != "/" {
        let trimmed = path.trim_end_matches('/').to_string();
        if trimmed.is_empty() {
            url.set_path("/");
        } else {
            url.set_path(&trimmed);
        }
    }

    url.to_string()
}
