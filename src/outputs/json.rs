//! JSON catalog output.
//!
//! The payload is a pretty-printed array of `{title, url, posted_at}`
//! objects in final sort order. The same text goes to stdout on every run and
//! to `--out-json` when a path is given, so it can be piped or archived
//! interchangeably.

use crate::error::ScrapeError;
use crate::models::Offer;
use tokio::fs;
use tracing::{info, instrument};

/// Serialize the sorted offers to the canonical pretty-printed payload.
pub fn to_json_string(offers: &[Offer]) -> Result<String, ScrapeError> {
    Ok(serde_json::to_string_pretty(offers)?)
}

/// Write an already-serialized payload to a file.
#[instrument(level = "info", skip(payload))]
pub async fn write_json(path: &str, payload: &str) -> Result<(), ScrapeError> {
    fs::write(path, payload).await?;
    info!(path, "wrote JSON catalog");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_payload_is_array_in_given_order() {
        let offers = vec![
            Offer {
                title: "B".to_string(),
                url: "https://adum.fr/b".to_string(),
                posted_at: NaiveDate::from_ymd_opt(2023, 3, 14).unwrap().and_hms_opt(0, 0, 0),
            },
            Offer::degraded("https://adum.fr/a".to_string(), "A".to_string()),
        ];
        let payload = to_json_string(&offers).unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["title"], "B");
        assert_eq!(arr[0]["posted_at"], "2023-03-14T00:00:00");
        assert_eq!(arr[1]["posted_at"], "");
    }

    #[test]
    fn test_empty_catalog() {
        assert_eq!(to_json_string(&[]).unwrap(), "[]");
    }
}
