//! US phone number extraction from raw page HTML.

use std::sync::LazyLock;

use regex::Regex;

/// `(612) 555-1234`, `612-555-1234`, `612.555.1234`, `612 555 1234`.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(?\d{3}\)?[\s.-]\d{3}[\s.-]\d{4}").expect("valid phone regex")
});

/// Returns the first US-formatted phone number in `html`, if any.
///
/// Matches against the raw markup, so a number split across tags is missed.
#[must_use]
pub fn extract_phone(html: &str) -> Option<String> {
    PHONE_RE.find(html).map(|m| m.as_str().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_parenthesized_area_code() {
        let html = r#"<span class="phone">(763) 755-4430</span>"#;
        assert_eq!(extract_phone(html).as_deref(), Some("(763) 755-4430"));
    }

    #[test]
    fn finds_dashed_and_dotted_forms() {
        assert_eq!(
            extract_phone("Call 612-555-1234 today").as_deref(),
            Some("612-555-1234")
        );
        assert_eq!(
            extract_phone("tel 612.555.1234").as_deref(),
            Some("612.555.1234")
        );
    }

    #[test]
    fn returns_first_match() {
        let html = "Bar: 763-555-0001, Kitchen: 763-555-0002";
        assert_eq!(extract_phone(html).as_deref(), Some("763-555-0001"));
    }

    #[test]
    fn ignores_unseparated_digit_runs() {
        assert_eq!(extract_phone("id=6125551234"), None);
    }

    #[test]
    fn none_when_absent() {
        assert_eq!(extract_phone("<html><body>No phone here</body></html>"), None);
        assert_eq!(extract_phone(""), None);
    }
}
