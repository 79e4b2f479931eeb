//! String helpers shared by the link extractor, the detail worker, and the
//! HTML writer.

/// Collapse runs of whitespace to single spaces and trim the ends.
///
/// Anchor and heading text scraped from the portal is full of newlines and
/// indentation; every title that reaches an [`crate::models::Offer`] goes
/// through this first.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(collapse_ws("  Offre \n de   thèse "), "Offre de thèse");
/// ```
pub fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape a string for interpolation into HTML text or attribute values.
///
/// Covers the five characters that matter for both contexts. Offer titles are
/// arbitrary scraped text, so everything interpolated into the HTML table must
/// pass through here.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Truncate a string for logging purposes.
///
/// Long titles are cut to `max` bytes with an ellipsis appended, so debug
/// lines stay one line.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &s[..end])
    }
}
