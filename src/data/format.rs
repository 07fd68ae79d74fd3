//! Display transforms applied to raw Graph API values
//!
//! Budgets arrive in integer minor units, objectives as SCREAMING_SNAKE_CASE
//! and creative bodies as a single paragraph. These helpers turn them into the
//! strings the list and detail screens show.

use super::NOT_AVAILABLE;

/// Prefix for every formatted budget amount
pub const CURRENCY_PREFIX: &str = "$";

/// Delimiter used to break a creative body into sentences
const SENTENCE_DELIMITER: &str = ". ";

/// Formats a budget given in minor units (cents) as a currency string
///
/// # Arguments
/// * `raw` - The budget as returned by the API, e.g. `"10000"`
///
/// # Returns
/// * `"$100.00"` for `Some("10000")`
/// * `"N/A"` for `None`, an empty string, `"N/A"`, or a value that is not a number
pub fn format_budget(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim) else {
        return NOT_AVAILABLE.to_string();
    };
    if raw.is_empty() || raw == NOT_AVAILABLE {
        return NOT_AVAILABLE.to_string();
    }

    match raw.parse::<f64>().ok().filter(|v| v.is_finite()) {
        Some(minor_units) => format!("{}{:.2}", CURRENCY_PREFIX, minor_units / 100.0),
        None => {
            log::warn!("Ignoring budget value that is not a number: {:?}", raw);
            NOT_AVAILABLE.to_string()
        }
    }
}

/// Splits a creative body into trimmed, non-empty sentences
///
/// A sentence's closing period is dropped, so `"Buy now. Limited offer."`
/// becomes `["Buy now", "Limited offer"]`. Returns `["N/A"]` when there is no
/// body to split.
pub fn format_caption(body: Option<&str>) -> Vec<String> {
    let body = match body {
        Some(b) if !b.is_empty() && b != NOT_AVAILABLE => b,
        _ => return vec![NOT_AVAILABLE.to_string()],
    };

    body.split(SENTENCE_DELIMITER)
        .map(|s| {
            let s = s.trim();
            s.strip_suffix('.').unwrap_or(s).trim_end()
        })
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Turns an API objective such as `LINK_CLICKS` into `Link Clicks`
pub fn format_objective(raw: Option<&str>) -> String {
    match raw {
        Some(r) if !r.is_empty() && r != NOT_AVAILABLE => {
            r.split('_').map(capitalize).collect::<Vec<_>>().join(" ")
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Uppercases the first character and lowercases the rest
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_budget_placeholder_inputs() {
        assert_eq!(format_budget(Some("N/A")), "N/A");
        assert_eq!(format_budget(None), "N/A");
        assert_eq!(format_budget(Some("")), "N/A");
        assert_eq!(format_budget(Some("   ")), "N/A");
    }

    #[test]
    fn test_format_budget_converts_cents() {
        assert_eq!(format_budget(Some("10000")), "$100.00");
        assert_eq!(format_budget(Some("5000")), "$50.00");
        assert_eq!(format_budget(Some("1")), "$0.01");
        assert_eq!(format_budget(Some("123456")), "$1234.56");
    }

    #[test]
    fn test_format_budget_rejects_garbage() {
        assert_eq!(format_budget(Some("lots")), "N/A");
        assert_eq!(format_budget(Some("NaN")), "N/A");
        assert_eq!(format_budget(Some("inf")), "N/A");
        assert_eq!(format_budget(Some("-infinity")), "N/A");
    }

    #[test]
    fn test_format_caption_placeholder_inputs() {
        assert_eq!(format_caption(Some("")), vec!["N/A"]);
        assert_eq!(format_caption(Some("N/A")), vec!["N/A"]);
        assert_eq!(format_caption(None), vec!["N/A"]);
    }

    #[test]
    fn test_format_caption_splits_sentences() {
        assert_eq!(format_caption(Some("A. B. C")), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_format_caption_drops_empty_segments() {
        assert_eq!(
            format_caption(Some("Buy now. Limited offer.")),
            vec!["Buy now", "Limited offer"]
        );
        assert_eq!(format_caption(Some("One.  Two. ")), vec!["One", "Two"]);
        assert!(format_caption(Some(". . ")).is_empty());
    }

    #[test]
    fn test_format_caption_keeps_inner_periods() {
        assert_eq!(
            format_caption(Some("Visit shop.example.com today. Free shipping")),
            vec!["Visit shop.example.com today", "Free shipping"]
        );
    }

    #[test]
    fn test_format_objective_title_cases_words() {
        assert_eq!(format_objective(Some("LINK_CLICKS")), "Link Clicks");
        assert_eq!(format_objective(Some("REACH")), "Reach");
        assert_eq!(format_objective(Some("OUTCOME_APP_PROMOTION")), "Outcome App Promotion");
    }

    #[test]
    fn test_format_objective_missing() {
        assert_eq!(format_objective(None), "N/A");
        assert_eq!(format_objective(Some("")), "N/A");
    }
}
