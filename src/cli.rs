//! Command-line interface definitions.
//!
//! # Examples
//!
//! ```sh
//! # Crawl the default listing and print the JSON catalog
//! adum_offres
//!
//! # Write both output files with 50 workers and verbose diagnostics
//! adum_offres --workers 50 --out-json offres.json --out-html index.html --debug
//! ```

use clap::Parser;

/// Default listing page. The portal's one-page French listing; overridable
/// for mirrors or test fixtures.
pub const DEFAULT_LISTING_URL: &str = "https://adum.fr/as/ed/propositionFR.pl";

/// Command-line arguments.
///
/// The JSON catalog is always printed to stdout; `--out-json` and
/// `--out-html` additionally write files. Diagnostics go to stderr so stdout
/// stays pipeable.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Listing page URL to crawl
    #[arg(long, default_value = DEFAULT_LISTING_URL)]
    pub url: String,

    /// Number of concurrent detail-page workers (at least 1)
    #[arg(long, default_value_t = 12)]
    pub workers: usize,

    /// Optional path for the JSON catalog file
    #[arg(long)]
    pub out_json: Option<String>,

    /// Optional path for the static HTML table
    #[arg(long)]
    pub out_html: Option<String>,

    /// Verbose diagnostics on stderr
    #[arg(long)]
    pub debug: bool,
}
