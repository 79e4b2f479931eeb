//! Data model for scraped offers.
//!
//! The whole pipeline produces exactly one entity: [`Offer`], constructed
//! once per discovered link by the detail worker and immutable from then on.
//! The orchestrator only reorders and serializes offers, never mutates them.
//!
//! # Serialization
//!
//! The JSON shape is exactly three keys — `title`, `url`, `posted_at` — with
//! `posted_at` rendered as an ISO-8601 string, or `""` when the update date
//! could not be determined. The numeric sort rank is derived on the fly and
//! never persisted.

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

/// Sentinel rank for offers with no extractable date; sorts below any real
/// timestamp.
const UNDATED_RANK: i64 = -1;

/// One offer discovered on the listing page.
///
/// A *degraded* offer is one whose detail page could not be fetched or whose
/// text carried no parsable update date: it keeps its listing-page title hint
/// and has `posted_at = None`. Degraded offers still appear in the output.
#[derive(Debug, Clone, Serialize)]
pub struct Offer {
    /// Best-effort display title (detail-page heading, or the listing anchor
    /// text as a fallback).
    pub title: String,
    /// Absolute URL of the detail page, as resolved for the GET.
    pub url: String,
    /// "Dernière mise à jour" timestamp, when one could be extracted.
    #[serde(serialize_with = "serialize_posted_at")]
    pub posted_at: Option<NaiveDateTime>,
}

impl Offer {
    /// Build a degraded offer for a link whose detail page is unusable.
    pub fn degraded(url: String, title_hint: String) -> Self {
        Self {
            title: title_hint,
            url,
            posted_at: None,
        }
    }

    /// Numeric sort key: epoch seconds of `posted_at`, or a sentinel below
    /// every real timestamp when the date is unknown. Ordering only.
    pub fn posted_at_rank(&self) -> i64 {
        self.posted_at
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or(UNDATED_RANK)
    }

    /// ISO-8601 rendering of `posted_at`, empty string when unknown.
    pub fn posted_at_iso(&self) -> String {
        self.posted_at
            .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
            .unwrap_or_default()
    }
}

fn serialize_posted_at<S>(value: &Option<NaiveDateTime>, ser: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(dt) => ser.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
        None => ser.serialize_str(""),
    }
}

/// Sort offers most-recently-updated first.
///
/// The composite key `(posted_at_rank, title)` is compared descending as a
/// whole, so titles tie-break in reverse lexicographic order among equal or
/// absent dates. That reversal is part of the established output format and
/// is kept as is.
pub fn sort_offers(offers: &mut [Offer]) {
    offers.sort_by(|a, b| {
        (b.posted_at_rank(), b.title.as_str()).cmp(&(a.posted_at_rank(), a.title.as_str()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dated(title: &str, y: i32, m: u32, d: u32) -> Offer {
        Offer {
            title: title.to_string(),
            url: format!("https://adum.fr/as/ed/voirproposition.pl?id={title}"),
            posted_at: NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0),
        }
    }

    fn undated(title: &str) -> Offer {
        Offer::degraded(format!("https://adum.fr/{title}"), title.to_string())
    }

    #[test]
    fn test_rank_of_dated_offer() {
        let o = dated("a", 2023, 3, 14);
        assert_eq!(o.posted_at_rank(), 1_678_752_000);
    }

    #[test]
    fn test_rank_sentinel_below_any_timestamp() {
        let o = undated("a");
        assert_eq!(o.posted_at_rank(), -1);
        assert!(o.posted_at_rank() < dated("b", 1970, 1, 1).posted_at_rank());
    }

    #[test]
    fn test_sort_most_recent_first() {
        let mut offers = vec![
            dated("old", 2022, 1, 1),
            dated("new", 2023, 6, 1),
            dated("mid", 2023, 1, 1),
        ];
        sort_offers(&mut offers);
        let titles: Vec<_> = offers.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, ["new", "mid", "old"]);
    }

    #[test]
    fn test_sort_undated_offers_last() {
        let mut offers = vec![undated("x"), dated("a", 2020, 1, 1), undated("y")];
        sort_offers(&mut offers);
        assert_eq!(offers[0].title, "a");
        assert!(offers[1].posted_at.is_none());
        assert!(offers[2].posted_at.is_none());
    }

    #[test]
    fn test_sort_equal_dates_reverse_title_order() {
        let mut offers = vec![
            dated("alpha", 2023, 3, 14),
            dated("gamma", 2023, 3, 14),
            dated("beta", 2023, 3, 14),
        ];
        sort_offers(&mut offers);
        let titles: Vec<_> = offers.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, ["gamma", "beta", "alpha"]);
    }

    #[test]
    fn test_sort_independent_of_arrival_order() {
        let a = vec![
            dated("a", 2023, 1, 1),
            dated("b", 2022, 5, 5),
            undated("c"),
            dated("d", 2023, 1, 1),
        ];
        let mut left = a.clone();
        let mut right: Vec<_> = a.into_iter().rev().collect();
        sort_offers(&mut left);
        sort_offers(&mut right);
        let l: Vec<_> = left.iter().map(|o| o.url.as_str()).collect();
        let r: Vec<_> = right.iter().map(|o| o.url.as_str()).collect();
        assert_eq!(l, r);
    }

    #[test]
    fn test_json_shape() {
        let o = dated("Offre", 2023, 3, 14);
        let json = serde_json::to_value(&o).unwrap();
        assert_eq!(json["title"], "Offre");
        assert_eq!(json["posted_at"], "2023-03-14T00:00:00");
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_json_empty_date() {
        let o = undated("x");
        let json = serde_json::to_value(&o).unwrap();
        assert_eq!(json["posted_at"], "");
    }

    #[test]
    fn test_posted_at_iso() {
        assert_eq!(dated("a", 2023, 3, 14).posted_at_iso(), "2023-03-14T00:00:00");
        assert_eq!(undated("a").posted_at_iso(), "");
    }
}
