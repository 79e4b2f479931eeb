//! Offer-link discovery on the listing page.
//!
//! The listing page links each offer through anchors whose `href` contains
//! the substring `proposition`. Some renderings of the page only emit
//! fully-qualified `adum.fr` URLs, so a second selector covers that case when
//! the first finds nothing.
//!
//! Anchors are processed in document order, resolved against the listing URL,
//! and deduplicated by resolved URL with the first occurrence keeping its
//! title.

use crate::utils::collapse_ws;
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

static PRIMARY: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"a[href*="proposition"]"#).expect("valid primary selector")
});

static FALLBACK: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"a[href*="adum.fr"][href*="proposition"]"#).expect("valid fallback selector")
});

/// Extract `(absolute_url, title_hint)` pairs for every offer linked from the
/// listing page, deduplicated by URL, in document order.
pub fn extract_links(base_url: &Url, html: &str) -> Vec<(String, String)> {
    let document = Html::parse_document(html);

    let mut anchors: Vec<ElementRef> = document.select(&PRIMARY).collect();
    if anchors.is_empty() {
        debug!("primary selector matched nothing; trying fully-qualified fallback");
        anchors = document.select(&FALLBACK).collect();
    }

    anchors
        .into_iter()
        .filter_map(|a| {
            let href = a.value().attr("href").unwrap_or("").trim();
            if href.is_empty() {
                return None;
            }
            let url = base_url.join(href).ok()?;
            Some((url.to_string(), anchor_title(a)))
        })
        .unique_by(|(url, _)| url.clone())
        .collect()
}

/// Visible text of the anchor, falling back to its immediate parent element
/// when the anchor itself is empty (image-only anchors, mostly).
fn anchor_title(a: ElementRef) -> String {
    let own = collapse_ws(&a.text().collect::<Vec<_>>().join(" "));
    if !own.is_empty() {
        return own;
    }
    a.parent()
        .and_then(ElementRef::wrap)
        .map(|p| collapse_ws(&p.text().collect::<Vec<_>>().join(" ")))
        .unwrap_or_default()
}
