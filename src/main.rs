//! # adum_offres
//!
//! One-shot crawler for the ADUM academic-offer portal. Fetches the single
//! listing page, discovers the offer-detail links, fetches each detail page
//! across a bounded worker pool, extracts the "Dernière mise à jour le" date
//! from the French page text, and emits a deduplicated, date-sorted catalog
//! as JSON (always on stdout) and optionally as JSON/HTML files.
//!
//! ## Pipeline
//!
//! 1. **Listing**: fetch the listing page (a failure here aborts the run)
//! 2. **Discovery**: extract and deduplicate offer links in document order
//! 3. **Details**: one worker task per link, `--workers` in flight at a time,
//!    each owning its own HTTP client; failures degrade to dateless records
//! 4. **Output**: sort by `(date rank, title)` descending and hand the
//!    sequence to the JSON and HTML writers

use clap::Parser;
use futures::stream::{self, StreamExt};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};
use url::Url;

mod cli;
mod dates;
mod detail;
mod error;
mod fetch;
mod links;
mod models;
mod outputs;
mod utils;

use cli::Cli;
use error::ScrapeError;
use fetch::Fetcher;
use models::{sort_offers, Offer};
use outputs::{html, json};

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // --- Tracing init ---
    // stderr only: stdout is reserved for the JSON payload.
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args).await {
        error!(error = %e, "run aborted");
        std::process::exit(1);
    }
}

async fn run(args: Cli) -> Result<(), ScrapeError> {
    let start_time = std::time::Instant::now();

    // Configuration is validated before any request goes out.
    if args.workers == 0 {
        return Err(ScrapeError::Config(
            "--workers must be at least 1".to_string(),
        ));
    }
    let base_url = Url::parse(&args.url)
        .map_err(|e| ScrapeError::Config(format!("invalid --url {:?}: {e}", args.url)))?;

    // A listing-page failure is fatal; there is nothing to crawl without it.
    let fetcher = Fetcher::new()?;
    let listing_html = fetcher.fetch(&args.url).await?;
    let links = links::extract_links(&base_url, &listing_html);
    info!(count = links.len(), url = %args.url, "discovered offer links");

    // One task per link, `--workers` in flight at a time. Each task owns its
    // own client, so nothing is shared between concurrent workers; results
    // arrive in completion order, which the final sort makes irrelevant.
    let mut offers: Vec<Offer> = stream::iter(links)
        .map(|(url, title_hint)| async move {
            match Fetcher::new() {
                Ok(fetcher) => detail::process(&fetcher, &url, &title_hint).await,
                Err(e) => {
                    warn!(%url, error = %e, "client construction failed; emitting degraded record");
                    Offer::degraded(url, title_hint)
                }
            }
        })
        .buffer_unordered(args.workers)
        .collect()
        .await;

    let dated = offers.iter().filter(|o| o.posted_at.is_some()).count();
    info!(
        total = offers.len(),
        dated,
        degraded = offers.len() - dated,
        "collected offers"
    );

    sort_offers(&mut offers);

    let payload = json::to_json_string(&offers)?;
    if let Some(path) = &args.out_json {
        json::write_json(path, &payload).await?;
    }
    if let Some(path) = &args.out_html {
        html::write_html(path, &offers).await?;
    }

    // stdout carries the catalog unconditionally, for piping.
    println!("{payload}");

    info!(elapsed = ?start_time.elapsed(), "done");
    Ok(())
}
