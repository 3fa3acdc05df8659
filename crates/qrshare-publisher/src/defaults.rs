//! Display metadata applied when the publisher leaves a field out.

use jiff::tz::TimeZone;
use jiff::Timestamp;

/// Number of characters of the text kept in a generated description.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// Appended to a generated description when the text was cut.
pub const ELLIPSIS: &str = "...";

/// `"QR Code - YYYY-MM-DD"`, dated in UTC.
pub fn default_title(now: Timestamp) -> String {
    format!("QR Code - {}", now.to_zoned(TimeZone::UTC).date())
}

/// The first [`DESCRIPTION_PREVIEW_CHARS`] characters of `text`, followed by
/// [`ELLIPSIS`] if anything was cut.
pub fn default_description(text: &str) -> String {
    match text.char_indices().nth(DESCRIPTION_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

/// Returns the supplied value unless it is missing or blank.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_carries_the_utc_date() {
        let now: Timestamp = "2026-10-18T23:30:00-05:00".parse().unwrap();
        assert_eq!(default_title(now), "QR Code - 2026-10-19");
    }

    #[test]
    fn short_text_is_kept_whole() {
        assert_eq!(default_description("hello"), "hello");
        let exact = "a".repeat(DESCRIPTION_PREVIEW_CHARS);
        assert_eq!(default_description(&exact), exact);
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        let description = default_description(&"y".repeat(150));
        assert_eq!(description.chars().count(), 103);
        assert!(description.ends_with(ELLIPSIS));
        assert!(description.starts_with(&"y".repeat(100)));
    }

    #[test]
    fn cut_respects_character_boundaries() {
        let text = "é".repeat(101);
        let description = default_description(&text);
        assert_eq!(description, format!("{}...", "é".repeat(100)));
    }

    #[test]
    fn blank_values_count_as_missing() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("x".to_string())), Some("x".to_string()));
    }
}
