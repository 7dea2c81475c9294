//! String-cutting primitives.
//!
//! Address text has no fixed delimiters, so parsers peel tokens off the
//! ends (or out of the middle) of a working string one class at a time.
//! Every primitive here is total: a miss is a [`Cut`] with no token and the
//! text handed back unchanged, never an error.
//!
//! A word *boundary* below means a run of non-word characters, or the start
//! or end of the text. Boundaries around a matched token are consumed along
//! with it.

use regex::Regex;

/// Result of cutting a token out of a working string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cut {
    /// The captured token, or `None` when the pattern did not match.
    pub token: Option<String>,
    /// The working text with the token (and its boundaries) removed.
    pub rest: String,
}

impl Cut {
    fn miss(text: &str) -> Self {
        Self {
            token: None,
            rest: text.to_string(),
        }
    }

    fn hit(token: &str, rest: String) -> Self {
        Self {
            token: Some(token.to_string()),
            rest,
        }
    }
}

/// Non-destructive three-way partition produced by [`split_around`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    /// Text before the whole match (the entire input on a miss).
    pub before: String,
    /// The requested capture group, or `None` on a miss.
    pub token: Option<String>,
    /// Text after the whole match (empty on a miss).
    pub after: String,
}

/// A token pattern compiled into its leading, trailing and loose forms.
///
/// All forms are case-insensitive and capture the token itself in the
/// `token` group, so the boundary text never leaks into the result.
#[derive(Debug, Clone)]
pub struct TokenPattern {
    source: String,
    trailing: Regex,
    leading: Regex,
    loose: Regex,
}

impl TokenPattern {
    /// Compiles `source` (a bare regex with no anchors) into every form.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`regex::Error`] if `source` is not a valid
    /// pattern.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            trailing: Regex::new(&format!(r"(?i)(?:^|\W+)(?P<token>{source})$"))?,
            leading: Regex::new(&format!(r"(?i)^(?P<token>{source})(?:\W+|$)"))?,
            loose: Regex::new(&format!(r"(?i)(?:^|\W+)(?P<token>{source})(?:\W+|$)"))?,
            source: source.to_string(),
        })
    }

    /// The bare pattern this was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Removes `pattern` (and the boundary before it) when it matches at the
/// very end of `text`.
#[must_use]
pub fn extract_trailing(text: &str, pattern: &TokenPattern) -> Cut {
    pattern
        .trailing
        .captures(text)
        .and_then(|caps| {
            let whole = caps.get(0)?;
            let token = caps.name("token")?;
            Some(Cut::hit(token.as_str(), text[..whole.start()].to_string()))
        })
        .unwrap_or_else(|| Cut::miss(text))
}

/// Removes `phrase` (and the boundary before it) when `text` ends with it.
///
/// Words are compared case-insensitively and any whitespace run in `text`
/// separates them. Used for names only known at parse time, where compiling
/// a [`TokenPattern`] per call would be wasted work.
#[must_use]
pub fn extract_trailing_phrase(text: &str, phrase: &str) -> Cut {
    let mut head = text;
    let mut words = phrase.split_whitespace().rev().peekable();
    if words.peek().is_none() {
        return Cut::miss(text);
    }

    while let Some(word) = words.next() {
        let Some(start) = head.len().checked_sub(word.len()) else {
            return Cut::miss(text);
        };
        if !head.is_char_boundary(start) || head[start..].to_lowercase() != word.to_lowercase() {
            return Cut::miss(text);
        }
        head = &head[..start];

        if words.peek().is_some() {
            let trimmed = head.trim_end_matches(char::is_whitespace);
            if trimmed.len() == head.len() {
                return Cut::miss(text);
            }
            head = trimmed;
        }
    }

    let rest = head.trim_end_matches(|c: char| !is_word_char(c));
    if rest.len() == head.len() && !head.is_empty() {
        log::trace!("{phrase:?} ends {text:?} mid-word");
        return Cut::miss(text);
    }
    Cut::hit(&text[head.len()..], rest.to_string())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Removes `pattern` (and the boundary after it) when it matches at the
/// very start of `text`.
#[must_use]
pub fn extract_leading(text: &str, pattern: &TokenPattern) -> Cut {
    pattern
        .leading
        .captures(text)
        .and_then(|caps| {
            let whole = caps.get(0)?;
            let token = caps.name("token")?;
            Some(Cut::hit(token.as_str(), text[whole.end()..].to_string()))
        })
        .unwrap_or_else(|| Cut::miss(text))
}

/// Removes the first boundary-delimited occurrence of `pattern` anywhere in
/// `text`, together with the boundaries on both sides.
///
/// The text on either side is re-joined with a single space, so
/// `"4th street northeast"` minus `northeast` is `"4th street"` and
/// `"varick st floor 12th apt"` minus `floor 12th` is `"varick st apt"`.
#[must_use]
pub fn extract_trailing_loose(text: &str, pattern: &TokenPattern) -> Cut {
    pattern
        .loose
        .captures(text)
        .and_then(|caps| {
            let whole = caps.get(0)?;
            let token = caps.name("token")?;
            let before = &text[..whole.start()];
            let after = &text[whole.end()..];
            let rest = if before.is_empty() || after.is_empty() {
                format!("{before}{after}")
            } else {
                format!("{before} {after}")
            };
            Some(Cut::hit(token.as_str(), rest))
        })
        .unwrap_or_else(|| Cut::miss(text))
}

/// Partitions `text` around the first match of `regex`, returning capture
/// group `group` as the token. `text` itself is left alone.
#[must_use]
pub fn split_around(text: &str, regex: &Regex, group: usize) -> Split {
    regex
        .captures(text)
        .and_then(|caps| {
            let whole = caps.get(0)?;
            let token = caps.get(group)?;
            Some(Split {
                before: text[..whole.start()].to_string(),
                token: Some(token.as_str().to_string()),
                after: text[whole.end()..].to_string(),
            })
        })
        .unwrap_or_else(|| Split {
            before: text.to_string(),
            token: None,
            after: String::new(),
        })
}

/// Removes the first match of a raw `regex` and returns the matched text
/// verbatim.
///
/// Unlike the other primitives no boundaries are implied. This is the
/// primitive for inputs with fixed delimiters (`://`, `?`, `#`) where the
/// delimiter itself is part of the cut.
#[must_use]
pub fn cut(text: &str, regex: &Regex) -> Cut {
    regex.find(text).map_or_else(
        || Cut::miss(text),
        |m| {
            Cut::hit(
                m.as_str(),
                format!("{}{}", &text[..m.start()], &text[m.end()..]),
            )
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(source: &str) -> TokenPattern {
        TokenPattern::new(source).unwrap()
    }

    #[test]
    fn extracts_trailing_token_with_boundary() {
        let cut = extract_trailing("new york, ny 10014", &pattern(r"\d{5}"));
        assert_eq!(cut.token.as_deref(), Some("10014"));
        assert_eq!(cut.rest, "new york, ny");
    }

    #[test]
    fn extract_trailing_requires_end_anchor() {
        let cut = extract_trailing("10014 new york", &pattern(r"\d{5}"));
        assert_eq!(cut.token, None);
        assert_eq!(cut.rest, "10014 new york");
    }

    #[test]
    fn extract_trailing_requires_word_boundary() {
        let cut = extract_trailing("newyork", &pattern("york"));
        assert_eq!(cut.token, None);
        assert_eq!(cut.rest, "newyork");
    }

    #[test]
    fn extract_trailing_matches_whole_string() {
        let cut = extract_trailing("08848", &pattern(r"\d{5}"));
        assert_eq!(cut.token.as_deref(), Some("08848"));
        assert_eq!(cut.rest, "");
    }

    #[test]
    fn extract_trailing_prefers_earliest_start() {
        let cut = extract_trailing("main st, west virginia", &pattern("virginia|west virginia"));
        assert_eq!(cut.token.as_deref(), Some("west virginia"));
        assert_eq!(cut.rest, "main st");
    }

    #[test]
    fn extract_trailing_is_case_insensitive() {
        let cut = extract_trailing("Main St", &pattern("st"));
        assert_eq!(cut.token.as_deref(), Some("St"));
        assert_eq!(cut.rest, "Main");
    }

    #[test]
    fn extracts_leading_token() {
        let cut = extract_leading("201 varick st", &pattern(r"\d+"));
        assert_eq!(cut.token.as_deref(), Some("201"));
        assert_eq!(cut.rest, "varick st");
    }

    #[test]
    fn extract_leading_does_not_split_words() {
        let cut = extract_leading("4th street", &pattern(r"\d+"));
        assert_eq!(cut.token, None);
        assert_eq!(cut.rest, "4th street");
    }

    #[test]
    fn extract_leading_prefers_the_alternative_that_fits() {
        let cut = extract_leading("northeast 4th st", &pattern("n|north|northeast"));
        assert_eq!(cut.token.as_deref(), Some("northeast"));
        assert_eq!(cut.rest, "4th st");
    }

    #[test]
    fn extracts_loose_token_from_the_middle() {
        let cut = extract_trailing_loose("varick st floor 12th apt", &pattern(r"floor \w+"));
        assert_eq!(cut.token.as_deref(), Some("floor 12th"));
        assert_eq!(cut.rest, "varick st apt");
    }

    #[test]
    fn extracts_loose_token_at_the_end() {
        let cut = extract_trailing_loose("4th street northeast", &pattern("ne|northeast"));
        assert_eq!(cut.token.as_deref(), Some("northeast"));
        assert_eq!(cut.rest, "4th street");
    }

    #[test]
    fn loose_extraction_respects_word_boundaries() {
        let cut = extract_trailing_loose("avenue", &pattern("e"));
        assert_eq!(cut.token, None);
        assert_eq!(cut.rest, "avenue");
    }

    #[test]
    fn primitives_are_total_on_empty_input() {
        let p = pattern(r"\w+");
        assert_eq!(extract_trailing("", &p).token, None);
        assert_eq!(extract_leading("", &p).token, None);
        assert_eq!(extract_trailing_loose("", &p).token, None);
        let split = split_around("", &Regex::new(r"(\w+)").unwrap(), 1);
        assert_eq!(split.token, None);
        assert_eq!(split.before, "");
    }

    #[test]
    fn extracts_trailing_phrase() {
        let cut = extract_trailing_phrase("871 washington street, new  york", "New York");
        assert_eq!(cut.token.as_deref(), Some("new  york"));
        assert_eq!(cut.rest, "871 washington street");

        let cut = extract_trailing_phrase("st louis", "St Louis");
        assert_eq!(cut.token.as_deref(), Some("st louis"));
        assert_eq!(cut.rest, "");
    }

    #[test]
    fn trailing_phrase_requires_word_boundaries() {
        for text in ["main st, newyork", "main st, new york, newyork", "main, renew york"] {
            let cut = extract_trailing_phrase(text, "New York");
            assert_eq!(cut.token, None, "{text}");
            assert_eq!(cut.rest, text);
        }
        assert_eq!(extract_trailing_phrase("york", "new york").token, None);
        assert_eq!(extract_trailing_phrase("main st", "  ").token, None);
    }

    #[test]
    fn splits_around_a_capture_group() {
        let regex = Regex::new(r"(?i),\s*(\w+(?:\s\w+)*)\s*$").unwrap();
        let split = split_around("800 reynolds dr, kincardine", &regex, 1);
        assert_eq!(split.before, "800 reynolds dr");
        assert_eq!(split.token.as_deref(), Some("kincardine"));
        assert_eq!(split.after, "");
    }

    #[test]
    fn split_around_miss_returns_whole_text() {
        let regex = Regex::new(r"\W+(and|&)\W+").unwrap();
        let split = split_around("871 washington st", &regex, 1);
        assert_eq!(split.before, "871 washington st");
        assert_eq!(split.token, None);
        assert_eq!(split.after, "");
    }

    #[test]
    fn cuts_raw_match() {
        let regex = Regex::new(r"^\w+://").unwrap();
        let cut = cut("https://www.example.com", &regex);
        assert_eq!(cut.token.as_deref(), Some("https://"));
        assert_eq!(cut.rest, "www.example.com");
    }

    #[test]
    fn cut_miss_leaves_text() {
        let regex = Regex::new(r"#.*$").unwrap();
        let cut = cut("example.com/path", &regex);
        assert_eq!(cut.token, None);
        assert_eq!(cut.rest, "example.com/path");
    }
}
