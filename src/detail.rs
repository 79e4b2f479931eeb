//! Detail-page worker: one URL in, one [`Offer`] out, no exceptions.
//!
//! Failures never cross this boundary. A fetch that exhausts its retries, a
//! page with no marker phrase, a body that is not even HTML — all of them
//! degrade to an offer with the listing-page title hint and no date, so one
//! broken detail page never takes down the batch.

use crate::dates::extract_date;
use crate::fetch::Fetcher;
use crate::models::Offer;
use crate::utils::{collapse_ws, truncate_for_log};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument, warn};

static HEADINGS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3").expect("valid heading selector"));

/// Fetch one detail page and build its offer.
///
/// Infallible by contract: a fetch failure produces a degraded offer carrying
/// the title hint and no date.
#[instrument(level = "debug", skip(fetcher, title_hint))]
pub async fn process(fetcher: &Fetcher, url: &str, title_hint: &str) -> Offer {
    match fetcher.fetch(url).await {
        Ok(body) => offer_from_html(url, title_hint, &body),
        Err(e) => {
            warn!(%url, error = %e, "detail fetch failed; emitting degraded record");
            Offer::degraded(url.to_string(), collapse_ws(title_hint))
        }
    }
}

/// Build an offer from a fetched detail-page body.
///
/// Title policy: the first non-empty `h1`/`h2`/`h3` heading on the page wins;
/// the listing-page anchor text is only a fallback. The update date comes
/// from the page's full visible text.
pub fn offer_from_html(url: &str, title_hint: &str, html: &str) -> Offer {
    let document = Html::parse_document(html);

    let text = document
        .root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let posted_at = extract_date(&text);

    let title = document
        .select(&HEADINGS)
        .map(|h| collapse_ws(&h.text().collect::<Vec<_>>().join(" ")))
        .find(|t| !t.is_empty())
        .unwrap_or_else(|| collapse_ws(title_hint));

    debug!(
        %url,
        date = ?posted_at,
        title = %truncate_for_log(&title, 60),
        "parsed detail page"
    );

    Offer {
        title,
        url: url.to_string(),
        posted_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const URL: &str = "https://adum.fr/as/ed/voirproposition.pl?matricule=42";

    #[test]
    fn test_heading_preferred_over_hint() {
        let html = concat!(
            "<html><body><h1>Titre de la page</h1>",
            "<p>Dernière mise à jour le 14 mars 2023</p></body></html>",
        );
        let offer = offer_from_html(URL, "Titre du lien", html);
        assert_eq!(offer.title, "Titre de la page");
        assert_eq!(
            offer.posted_at,
            NaiveDate::from_ymd_opt(2023, 3, 14).unwrap().and_hms_opt(0, 0, 0)
        );
    }

    #[test]
    fn test_hint_used_when_no_heading() {
        let html = "<html><body><p>Dernière mise à jour le 2 juin 2022</p></body></html>";
        let offer = offer_from_html(URL, "  Titre  du  lien ", html);
        assert_eq!(offer.title, "Titre du lien");
    }

    #[test]
    fn test_empty_headings_skipped() {
        let html = concat!(
            "<html><body><h1>  </h1><h2>Vrai titre</h2>",
            "<p>texte</p></body></html>",
        );
        let offer = offer_from_html(URL, "hint", html);
        assert_eq!(offer.title, "Vrai titre");
    }

    #[test]
    fn test_markerless_page_has_no_date() {
        let html = "<html><body><h1>Offre</h1><p>aucune date de mise à jour</p></body></html>";
        let offer = offer_from_html(URL, "hint", html);
        assert!(offer.posted_at.is_none());
        assert_eq!(offer.url, URL);
    }

    #[test]
    fn test_marker_split_across_inline_elements() {
        // The marker survives tag boundaries as long as the visible text
        // around it keeps its spacing.
        let html = concat!(
            "<html><body><p>Dernière mise à jour le</p> <span>14 mars 2023</span>",
            "</body></html>",
        );
        let offer = offer_from_html(URL, "hint", html);
        assert_eq!(
            offer.posted_at,
            NaiveDate::from_ymd_opt(2023, 3, 14).unwrap().and_hms_opt(0, 0, 0)
        );
    }

    #[test]
    fn test_non_html_body_degrades() {
        let offer = offer_from_html(URL, "hint", "{\"not\": \"html\"}");
        assert!(offer.posted_at.is_none());
        assert_eq!(offer.title, "hint");
    }
}
