//! Calendar date handling for incoming payloads.
//!
//! Dates travel as `YYYY-MM-DD` strings. Anything that does not parse is
//! treated as absent rather than rejected.

use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO calendar date, returning `None` for missing or malformed input
pub fn parse_lenient(value: Option<&str>) -> Option<NaiveDate> {
    value
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
}

/// Resolve a nullable date field of a partial update.
///
/// `None` means the field was not sent. `Some(None)` means it should be
/// cleared, which is also what a malformed value does.
pub fn parse_update(value: &Option<Option<String>>) -> Option<Option<NaiveDate>> {
    value.as_ref().map(|inner| parse_lenient(inner.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient() {
        assert_eq!(
            parse_lenient(Some("2024-06-20")),
            NaiveDate::from_ymd_opt(2024, 6, 20)
        );
        assert_eq!(parse_lenient(Some("20/06/2024")), None);
        assert_eq!(parse_lenient(Some("2024-02-30")), None);
        assert_eq!(parse_lenient(Some("")), None);
        assert_eq!(parse_lenient(None), None);
    }

    #[test]
    fn test_parse_update_distinguishes_missing_from_cleared() {
        assert_eq!(parse_update(&None), None);
        assert_eq!(parse_update(&Some(None)), Some(None));
        assert_eq!(parse_update(&Some(Some("garbage".into()))), Some(None));
        assert_eq!(
            parse_update(&Some(Some("2026-03-10".into()))),
            Some(NaiveDate::from_ymd_opt(2026, 3, 10))
        );
    }
}
