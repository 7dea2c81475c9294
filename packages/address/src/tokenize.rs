//! Splits cleaned address text into raw, un-normalized tokens.
//!
//! Tokens are peeled off the ends of a working string, most reliable class
//! first: country, postal code, state, city. Whatever is left is the street
//! line, which is either an intersection of two streets or a single street
//! with optional house number and unit.

use normalic_address_models::AddressField;
use normalic_reference::ReferenceTables;
use normalic_text::{
    Cut, extract_leading, extract_trailing, extract_trailing_loose, extract_trailing_phrase,
    split_around,
};

use crate::normalize::normalize_postal_code;
use crate::patterns::Patterns;

/// Direction, name and type of one street, as found in the text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawStreet {
    pub direction: Option<String>,
    pub street: Option<String>,
    pub street_type: Option<String>,
}

/// A single street line, as found in the text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSingle {
    pub number: Option<String>,
    pub unit: Option<String>,
    pub street: RawStreet,
}

/// The street line, as found in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawLine {
    Single(RawSingle),
    Intersection([RawStreet; 2]),
}

impl Default for RawLine {
    fn default() -> Self {
        Self::Single(RawSingle::default())
    }
}

/// Every token recognized in one address, lowercase and un-normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTokens {
    pub postal_code: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub line: RawLine,
}

impl RawTokens {
    /// Stores a labeled value. Street fields are dropped when the line is an
    /// intersection, as is the intersection flag itself.
    pub fn assign(&mut self, field: AddressField, value: String) {
        let value = Some(value);
        match field {
            AddressField::Zipcode => self.postal_code = value,
            AddressField::State => self.state = value,
            AddressField::City => self.city = value,
            AddressField::Intersection => {}
            AddressField::Number
            | AddressField::Unit
            | AddressField::Direction
            | AddressField::Street
            | AddressField::Type => {
                let RawLine::Single(single) = &mut self.line else {
                    log::warn!("Ignoring {field} for an intersection");
                    return;
                };
                match field {
                    AddressField::Number => single.number = value,
                    AddressField::Unit => single.unit = value,
                    AddressField::Direction => single.street.direction = value,
                    AddressField::Street => single.street.street = value,
                    _ => single.street.street_type = value,
                }
            }
        }
    }
}

/// Which extractions a street fragment is eligible for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreetContext {
    /// A whole street line: house number and unit are looked for.
    Standalone,
    /// One side of an intersection: no house number, no unit.
    IntersectionSide,
}

/// Recognizes tokens in cleaned text.
pub struct Tokenizer<'a> {
    patterns: &'a Patterns,
    tables: &'a ReferenceTables,
}

impl<'a> Tokenizer<'a> {
    #[must_use]
    pub const fn new(patterns: &'a Patterns, tables: &'a ReferenceTables) -> Self {
        Self { patterns, tables }
    }

    /// Tokenizes a full address. `cleaned` must already have been through
    /// [`normalic_text::clean`].
    #[must_use]
    pub fn tokenize(&self, cleaned: &str) -> RawTokens {
        let Cut { token: country, rest } = extract_trailing(cleaned, &self.patterns.country);
        if let Some(country) = &country {
            log::trace!("Dropped country marker {country:?}");
        }

        let Cut {
            token: postal_code,
            rest,
        } = extract_trailing(&rest, &self.patterns.postal_code);
        let Cut { token: state, rest } = extract_trailing(&rest, &self.patterns.region);
        let (city, rest) = self.extract_city(&rest, postal_code.as_deref());
        let line = self.tokenize_line(&rest);

        log::debug!(
            "Tokenized {cleaned:?}: postal_code={postal_code:?} state={state:?} city={city:?}"
        );

        RawTokens {
            postal_code,
            state,
            city,
            line,
        }
    }

    /// Finds the city at the end of `text`.
    ///
    /// When the postal code resolves, the known city name is looked for
    /// first; otherwise (or when it is not in the text) the last
    /// comma-separated fragment is taken. A known city left just before that
    /// fragment (`"new york, newyork"`) is removed from the street line too.
    fn extract_city(&self, text: &str, postal_code: Option<&str>) -> (Option<String>, String) {
        let known_city = postal_code
            .and_then(normalize_postal_code)
            .and_then(|code| self.tables.locality(&code))
            .map(|locality| locality.city.as_str());

        if let Some(city) = known_city {
            let cut = extract_trailing_phrase(text, city);
            if cut.token.is_some() {
                return (cut.token, cut.rest);
            }
            log::trace!("Known city {city:?} not at the end of {text:?}");
        }

        let split = split_around(text, &self.patterns.city_after_comma, 1);
        let Some(city) = known_city else {
            return (split.token, split.before);
        };

        let cut = extract_trailing_phrase(&split.before, city);
        if cut.token.is_some() {
            log::trace!("Dropped known city {city:?} ahead of {:?}", split.token);
            return (split.token, cut.rest);
        }
        (split.token, split.before)
    }

    fn tokenize_line(&self, text: &str) -> RawLine {
        let split = split_around(text, &self.patterns.intersection, 1);
        if split.token.is_some() && has_word(&split.before) && has_word(&split.after) {
            log::trace!("Intersection of {:?} and {:?}", split.before, split.after);
            return RawLine::Intersection([
                self.tokenize_street(&split.before, StreetContext::IntersectionSide)
                    .street,
                self.tokenize_street(&split.after, StreetContext::IntersectionSide)
                    .street,
            ]);
        }

        RawLine::Single(self.tokenize_street(text, StreetContext::Standalone))
    }

    /// Tokenizes a street fragment (no city, state or postal code).
    ///
    /// Order matters: house number, then unit, then directional (leading
    /// first, then anywhere), then trailing street type. What remains is the
    /// street name.
    #[must_use]
    pub fn tokenize_street(&self, text: &str, context: StreetContext) -> RawSingle {
        let standalone = context == StreetContext::Standalone;
        let text = text.trim();

        let Cut { token: number, rest } = if standalone {
            extract_leading(text, &self.patterns.house_number)
        } else {
            unmatched(text)
        };
        let Cut { token: unit, rest } = if standalone {
            extract_trailing_loose(&rest, &self.patterns.unit)
        } else {
            unmatched(&rest)
        };

        let leading = extract_leading(&rest, &self.patterns.directional);
        let Cut {
            token: direction,
            rest,
        } = if leading.token.is_some() {
            leading
        } else {
            extract_trailing_loose(&rest, &self.patterns.directional)
        };

        let Cut {
            token: street_type,
            rest,
        } = extract_trailing(&rest, &self.patterns.street_type);
        let street = self
            .patterns
            .street_name
            .find(&rest)
            .map(|m| m.as_str().to_string());

        RawSingle {
            number,
            unit,
            street: RawStreet {
                direction,
                street,
                street_type,
            },
        }
    }
}

fn unmatched(text: &str) -> Cut {
    Cut {
        token: None,
        rest: text.to_string(),
    }
}

fn has_word(text: &str) -> bool {
    text.chars().any(char::is_alphanumeric)
}
