//! Extraction of the "Dernière mise à jour le" date from detail-page text.
//!
//! ADUM detail pages carry their update date in French prose, immediately
//! after a fixed marker phrase and usually right before the "MODALITÉS de
//! CANDIDATURE" section header. This module locates the marker, truncates the
//! candidate text at the section header, and parses what remains as a
//! day-first French date.
//!
//! A missing marker or an unparsable date is a normal outcome, not an error:
//! plenty of offer pages simply omit the line. Nothing here panics or returns
//! `Err`; the only signal out is `Option<NaiveDateTime>`.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Marker phrase preceding the update date.
const UPDATED_MARKER: &str = "Dernière mise à jour le";

/// Section header that follows the date line; candidate text is cut here so
/// the application-terms blurb cannot confuse the parser.
const TRAILING_MARKER: &str = "MODALITÉS de CANDIDATURE";

const MONTHS: &str = "janvier|f[ée]vrier|mars|avril|mai|juin|juillet|ao[ûu]t|septembre|octobre|novembre|d[ée]cembre";

/// `14 mars 2023`, `1er avril 2024`, optionally followed by `à 15h30`.
static DAY_MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})(?:er)?\s+({MONTHS})\s+(\d{{4}})\b(?:\s*à\s*(\d{{1,2}})\s*[h:]\s*(\d{{2}})?)?"
    ))
    .expect("valid day-month-year pattern")
});

/// `mars 2023` with no day of month; resolved to the first of the month.
static MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b({MONTHS})\s+(\d{{4}})\b")).expect("valid month-year pattern")
});

/// Numeric day-first fallback: `14/03/2023` or `14.03.2023`.
static NUMERIC_DMY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})[/.](\d{1,2})[/.](\d{4})\b").expect("valid numeric pattern"));

/// Extract the update date from the full visible text of a detail page.
///
/// Returns `None` when the marker phrase is absent or no date can be parsed
/// from the text that follows it.
pub fn extract_date(text: &str) -> Option<NaiveDateTime> {
    let pos = text.find(UPDATED_MARKER)?;
    let mut candidate = &text[pos + UPDATED_MARKER.len()..];
    if let Some(end) = candidate.find(TRAILING_MARKER) {
        candidate = &candidate[..end];
    }
    parse_fr_datetime(candidate)
}

/// Best-effort parse of free-form French date text, day-first.
///
/// Tries, in order: prose with a day of month, prose with month and year only
/// (day defaults to the first), numeric `d/m/Y`.
pub fn parse_fr_datetime(text: &str) -> Option<NaiveDateTime> {
    if let Some(c) = DAY_MONTH_YEAR.captures(text) {
        let day: u32 = c[1].parse().ok()?;
        let month = month_number(&c[2])?;
        let year: i32 = c[3].parse().ok()?;
        let hour: u32 = c.get(4).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
        let minute: u32 = c.get(5).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
        return NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0);
    }

    if let Some(c) = MONTH_YEAR.captures(text) {
        let month = month_number(&c[1])?;
        let year: i32 = c[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0);
    }

    if let Some(c) = NUMERIC_DMY.captures(text) {
        let day: u32 = c[1].parse().ok()?;
        let month: u32 = c[2].parse().ok()?;
        let year: i32 = c[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0);
    }

    None
}

fn month_number(name: &str) -> Option<u32> {
    match name.to_lowercase().as_str() {
        "janvier" => Some(1),
        "février" | "fevrier" => Some(2),
        "mars" => Some(3),
        "avril" => Some(4),
        "mai" => Some(5),
        "juin" => Some(6),
        "juillet" => Some(7),
        "août" | "aout" => Some(8),
        "septembre" => Some(9),
        "octobre" => Some(10),
        "novembre" => Some(11),
        "décembre" | "decembre" => Some(12),
        _ => None,
    }
}
