//! Static HTML table output.
//!
//! Renders a minimal standalone document: a bordered two-column table
//! (`Date (ISO)` / `Titre`) with one row per offer in final sort order, the
//! title linking to the offer's detail page. Every interpolated string is
//! escaped, titles included — they are scraped text and cannot be trusted.

use crate::error::ScrapeError;
use crate::models::Offer;
use crate::utils::escape_html;
use tokio::fs;
use tracing::{info, instrument};

/// Render the full HTML document for the sorted offers.
pub fn render(offers: &[Offer]) -> String {
    let rows = offers
        .iter()
        .map(|offer| {
            let date = escape_html(&offer.posted_at_iso());
            let title = escape_html(&offer.title);
            let url = if offer.url.is_empty() {
                "#".to_string()
            } else {
                escape_html(&offer.url)
            };
            format!(r#"<tr><td>{date}</td><td><a href="{url}">{title}</a></td></tr>"#)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<!DOCTYPE html>\n<html lang=\"fr\">\n<head>\n  \
         <meta charset=\"utf-8\" />\n  \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n  \
         <title>Offres ADUM</title>\n</head>\n<body>\n  \
         <h1>Offres ADUM</h1>\n  \
         <table border=\"1\" cellpadding=\"6\" cellspacing=\"0\">\n    \
         <thead><tr><th>Date (ISO)</th><th>Titre</th></tr></thead>\n    \
         <tbody>\n{rows}\n    </tbody>\n  </table>\n</body>\n</html>\n"
    )
}

/// Render and write the HTML table to a file.
#[instrument(level = "info", skip(offers))]
pub async fn write_html(path: &str, offers: &[Offer]) -> Result<(), ScrapeError> {
    fs::write(path, render(offers)).await?;
    info!(path, rows = offers.len(), "wrote HTML table");
    Ok(())
}
