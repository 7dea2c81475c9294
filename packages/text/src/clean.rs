//! Input cleaning and output casing.
//!
//! Parsers run on a lowercased, whitespace-collapsed copy of their input so
//! that every recognition pattern can be written once in lowercase. Casing
//! is restored at normalization time with [`title_case`].

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Regex to collapse any run of whitespace into a single space.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Regex matching a single word for title casing.
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// Regex matching runs of characters that are not allowed in a field key.
static KEY_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Cleans raw input for tokenizing.
///
/// The pipeline:
/// 1. Lowercase
/// 2. Newlines become `", "` (a line break separates address parts)
/// 3. Trim and collapse whitespace
/// 4. Strip periods (`St.` and `St` are the same token)
#[must_use]
pub fn clean(raw: &str) -> String {
    let lower = raw.to_lowercase().replace("\r\n", "\n").replace('\n', ", ");
    let collapsed = WHITESPACE_RE.replace_all(lower.trim(), " ");
    let no_periods = collapsed.replace('.', "");
    WHITESPACE_RE
        .replace_all(no_periods.trim(), " ")
        .into_owned()
}

/// Capitalizes the first character of every word and lowercases the rest.
///
/// Words starting with a digit keep their digits (`"12th"` stays `"12th"`).
#[must_use]
pub fn title_case(text: &str) -> String {
    WORD_RE
        .replace_all(text, |caps: &Captures<'_>| capitalize(&caps[0]))
        .into_owned()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

/// Turns a free-form field label into a `snake_case` key.
///
/// `" Postal Code "` and `"postal-code"` both become `"postal_code"`.
#[must_use]
pub fn symbolize(key: &str) -> String {
    let lower = key.trim().to_lowercase();
    KEY_SEPARATOR_RE
        .replace_all(&lower, "_")
        .trim_matches('_')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_periods() {
        assert_eq!(
            clean("201 Varick St. floor 12th, New York, NY 10014"),
            "201 varick st floor 12th, new york, ny 10014"
        );
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(clean("  100   N \t STATE  ST "), "100 n state st");
    }

    #[test]
    fn converts_newlines_to_commas() {
        assert_eq!(
            clean("871 Washington Street\nNew York, NY"),
            "871 washington street, new york, ny"
        );
        assert_eq!(clean("a\r\nb"), "a, b");
    }

    #[test]
    fn cleans_empty_input() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   "), "");
    }

    #[test]
    fn strips_periods_between_spaces() {
        assert_eq!(clean("main st . apt 4"), "main st apt 4");
    }

    #[test]
    fn title_cases_words() {
        assert_eq!(title_case("new york"), "New York");
        assert_eq!(title_case("NEW YORK"), "New York");
        assert_eq!(title_case("o'brien"), "O'Brien");
    }

    #[test]
    fn title_case_leaves_ordinals_alone() {
        assert_eq!(title_case("12th"), "12th");
        assert_eq!(title_case("floor 12TH"), "Floor 12th");
    }

    #[test]
    fn title_case_is_idempotent() {
        assert_eq!(title_case(&title_case("west washington")), "West Washington");
    }

    #[test]
    fn symbolizes_keys() {
        assert_eq!(symbolize("Postal Code"), "postal_code");
        assert_eq!(symbolize(" postal-code "), "postal_code");
        assert_eq!(symbolize("ADDRESS_LINE1"), "address_line1");
        assert_eq!(symbolize(":city"), "city");
    }
}
