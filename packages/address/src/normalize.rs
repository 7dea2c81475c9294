//! Canonical forms for raw tokens.
//!
//! Every function here is idempotent: feeding a canonical value back in
//! yields the same value, so a rendered address re-parses to itself.

use normalic_address_models::{Address, AddressField, StreetFragment, StreetLine};
use normalic_reference::{Locality, ReferenceTables};
use normalic_text::title_case;

use crate::tokenize::{RawLine, RawStreet, RawTokens};

/// Canonical postal code: the first five digits of a US ZIP, or an
/// uppercase Canadian code with a single space after the third character.
///
/// Returns `None` for anything that is neither.
#[must_use]
pub fn normalize_postal_code(raw: &str) -> Option<String> {
    let compact: Vec<char> = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if let Some(zip) = compact
        .get(..5)
        .filter(|zip| zip.iter().all(char::is_ascii_digit))
    {
        return Some(zip.iter().collect());
    }

    match compact.as_slice() {
        [a, b, c, d, e, f]
            if [a, c, e].iter().all(|ch| ch.is_ascii_alphabetic())
                && [b, d, f].iter().all(|ch| ch.is_ascii_digit()) =>
        {
            Some(format!("{a}{b}{c} {d}{e}{f}"))
        }
        _ => {
            log::trace!("Not a postal code: {raw:?}");
            None
        }
    }
}

/// Applies the normalization rules for each token class against one set of
/// reference tables.
pub struct Normalizer<'a> {
    tables: &'a ReferenceTables,
}

impl<'a> Normalizer<'a> {
    #[must_use]
    pub const fn new(tables: &'a ReferenceTables) -> Self {
        Self { tables }
    }

    /// Builds the canonical [`Address`] for a set of raw tokens.
    ///
    /// A postal code found in the locality table decides city and state,
    /// whatever the text said.
    #[must_use]
    pub fn normalize(&self, tokens: &RawTokens) -> Address {
        let zipcode = present(tokens.postal_code.as_deref()).and_then(normalize_postal_code);
        let locality = zipcode.as_deref().and_then(|code| self.tables.locality(code));
        if let Some(locality) = locality {
            log::trace!(
                "Postal code {zipcode:?} resolves to {}, {}",
                locality.city,
                locality.state
            );
        }

        let line = match &tokens.line {
            RawLine::Single(single) => StreetLine::Single {
                number: self.field(AddressField::Number, single.number.as_deref(), None),
                street: self.street(&single.street),
                unit: self.field(AddressField::Unit, single.unit.as_deref(), None),
            },
            RawLine::Intersection([first, second]) => StreetLine::Intersection {
                streets: [self.street(first), self.street(second)],
            },
        };

        Address {
            line,
            city: normalize_city(tokens.city.as_deref(), locality),
            state: self.state(tokens.state.as_deref(), locality),
            zipcode,
        }
    }

    /// Normalizes a single raw value for `field`.
    ///
    /// `locality` is the resolved locality of the address's postal code, if
    /// any; it overrides city and state.
    #[must_use]
    pub fn field(
        &self,
        field: AddressField,
        raw: Option<&str>,
        locality: Option<&Locality>,
    ) -> Option<String> {
        match field {
            AddressField::Number => present(raw).map(str::to_uppercase),
            AddressField::Street | AddressField::Unit => present(raw).map(title_case),
            AddressField::Direction => self.direction(raw),
            AddressField::Type => self.street_type(raw),
            AddressField::City => normalize_city(raw, locality),
            AddressField::State => self.state(raw, locality),
            AddressField::Zipcode => present(raw).and_then(normalize_postal_code),
            AddressField::Intersection => None,
        }
    }

    fn street(&self, raw: &RawStreet) -> StreetFragment {
        StreetFragment {
            direction: self.direction(raw.direction.as_deref()),
            street: present(raw.street.as_deref()).map(title_case),
            street_type: self.street_type(raw.street_type.as_deref()),
        }
    }

    /// `"street"`, `"st"` and `"St."` all become `"St."`. Unknown spellings
    /// are title-cased and get the period too.
    fn street_type(&self, raw: Option<&str>) -> Option<String> {
        let raw = present(raw)?;
        let abbr = self
            .tables
            .street_type(raw)
            .unwrap_or_else(|| raw.trim_end_matches('.'));
        Some(format!("{}.", title_case(abbr)))
    }

    /// `"northeast"` and `"ne"` both become `"NE"`.
    fn direction(&self, raw: Option<&str>) -> Option<String> {
        let raw = present(raw)?;
        Some(
            self.tables
                .directional(raw)
                .unwrap_or(raw)
                .to_uppercase(),
        )
    }

    fn state(&self, raw: Option<&str>, locality: Option<&Locality>) -> Option<String> {
        if let Some(locality) = locality {
            return Some(locality.state.to_uppercase());
        }
        let raw = present(raw)?;
        Some(
            self.tables
                .region_code(raw)
                .map_or_else(|| raw.to_uppercase(), str::to_string),
        )
    }
}

fn normalize_city(raw: Option<&str>, locality: Option<&Locality>) -> Option<String> {
    locality
        .map(|locality| title_case(&locality.city))
        .or_else(|| present(raw).map(title_case))
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}
