//! Recognition patterns for each address token class.
//!
//! Patterns that depend on reference data (regions, street types,
//! directionals, unit designators) are built from the tables once, when a
//! parser is constructed. Table-driven alternations list longer spellings
//! first so that, at a given position, `"northeast"` wins over `"n"` and
//! `"west virginia"` wins over `"virginia"` regardless of table order.

use normalic_reference::ReferenceTables;
use normalic_text::TokenPattern;
use regex::Regex;
use thiserror::Error;

/// Country names stripped from the end of an address. Two-letter codes are
/// deliberately absent: `"ca"` is California.
const COUNTRY_MARKERS: &[&str] = &["usa", "united states", "united states of america", "canada"];

/// US ZIP (with optional +4) or Canadian postal code (optionally unspaced).
const POSTAL_CODE: &str = r"\d{5}(?:-\d{4})?|[a-z]\d[a-z]\s?\d[a-z]\d";

/// House number with an optional hyphenated suffix and fraction
/// (`"201"`, `"12-14"`, `"123 1/2"`).
const HOUSE_NUMBER: &str = r"\d+(?:-\d+)?(?:\s\d+/\d+)?";

/// Error building a pattern from reference data.
#[derive(Debug, Error)]
#[error("Invalid {class} pattern: {source}")]
pub struct PatternError {
    /// Token class whose pattern failed to compile.
    pub class: &'static str,
    /// The underlying regex error.
    pub source: regex::Error,
}

/// One compiled pattern per token class.
#[derive(Debug, Clone)]
pub struct Patterns {
    /// Trailing country marker.
    pub country: TokenPattern,
    /// Trailing postal code.
    pub postal_code: TokenPattern,
    /// Trailing state/province code or name.
    pub region: TokenPattern,
    /// `", city"` at the end of the text; the city is capture group 1.
    pub city_after_comma: Regex,
    /// Secondary unit: designator with identifier in either order, or a bare
    /// `#identifier`.
    pub unit: TokenPattern,
    /// Directional abbreviation or full word.
    pub directional: TokenPattern,
    /// Street type abbreviation or full word.
    pub street_type: TokenPattern,
    /// Leading house number.
    pub house_number: TokenPattern,
    /// `and` / `&` between two streets; the separator is capture group 1.
    pub intersection: Regex,
    /// Leftover street name: first word character through the last.
    pub street_name: Regex,
}

impl Patterns {
    /// Compiles every pattern from `tables`.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] naming the token class whose pattern
    /// failed to compile.
    pub fn new(tables: &ReferenceTables) -> Result<Self, PatternError> {
        let designators = alternation(tables.unit_designators().iter().copied());
        let unit = format!(
            r"#\w+|(?:{designators})(?:\W+\w+|\d\w*)|#?\d\w*\W+(?:{designators})"
        );

        Ok(Self {
            country: token("country", &alternation(COUNTRY_MARKERS.iter().copied()))?,
            postal_code: token("postal code", POSTAL_CODE)?,
            region: token("region", &alternation(tables.region_keys()))?,
            city_after_comma: regex("city", r"(?i)\W*,\W*(\w+(?:\s\w+)*)\W*$")?,
            unit: token("unit", &unit)?,
            directional: token("directional", &alternation(tables.directional_keys()))?,
            street_type: token("street type", &alternation(tables.street_type_keys()))?,
            house_number: token("house number", HOUSE_NUMBER)?,
            intersection: regex("intersection", r"(?i)\W+(and|&)\W+")?,
            street_name: regex("street name", r"\w(?:.*\w)?")?,
        })
    }
}

fn token(class: &'static str, source: &str) -> Result<TokenPattern, PatternError> {
    TokenPattern::new(source).map_err(|source| PatternError { class, source })
}

fn regex(class: &'static str, source: &str) -> Result<Regex, PatternError> {
    Regex::new(source).map_err(|source| PatternError { class, source })
}

/// Builds a regex alternation from table keys, longest first, then
/// alphabetical. Keys are escaped and their spaces accept any whitespace
/// run.
fn alternation<'a>(keys: impl IntoIterator<Item = &'a str>) -> String {
    let mut keys: Vec<&str> = keys.into_iter().collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    keys.dedup();

    keys.iter()
        .map(|key| {
            key.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|")
}
