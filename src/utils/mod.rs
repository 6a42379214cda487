//! Utility functions and helpers.

pub mod http;
pub mod text;

use url::Url;

/// Resolve a possibly relative link against the page it was found on.
///
/// Returns `None` for blank links and for links that do not resolve to an
/// http(s) address (`javascript:`, `mailto:` and the like).
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base.join(href)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
}
