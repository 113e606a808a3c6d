//! Table-of-contents extraction: anchors inside the manual's TOC container.

use super::error::CrawlError;
use scraper::{CaseSensitivity, Html, Selector};

/// Parse a CSS selector or return a selector error (avoids panics from Selector::parse).
fn parse_selector(sel: &str) -> Result<Selector, CrawlError> {
    Selector::parse(sel).map_err(|e| CrawlError::Selector {
        selector: sel.to_string(),
        reason: e.to_string(),
    })
}

/// Collect the hrefs of all anchors inside the first `div` carrying `container_class`,
/// in document order, with same-page sub-links removed.
///
/// Anchors without an `href` attribute are ignored. Fails with
/// [CrawlError::MissingContainer] when no such `div` exists.
pub fn extract_chapter_links(html: &str, container_class: &str) -> Result<Vec<String>, CrawlError> {
    let doc = Html::parse_document(html);
    let div_sel = parse_selector("div")?;
    let anchor_sel = parse_selector("a")?;
    // Matched by class attribute rather than a `div.<class>` selector, which would need
    // CSS escaping for names like "2col".
    let container = doc
        .select(&div_sel)
        .find(|d| {
            d.value()
                .has_class(container_class, CaseSensitivity::CaseSensitive)
        })
        .ok_or_else(|| CrawlError::MissingContainer {
            class: container_class.to_string(),
        })?;
    let hrefs = container
        .select(&anchor_sel)
        .filter_map(|a| a.value().attr("href"))
        .map(String::from)
        .collect();
    Ok(prune_subchapters(hrefs))
}

/// Drop every href containing `#`: those point into a page already in the list.
pub fn prune_subchapters(hrefs: Vec<String>) -> Vec<String> {
    hrefs.into_iter().filter(|h| !h.contains('#')).collect()
}
