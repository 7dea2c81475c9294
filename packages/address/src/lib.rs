#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Free-form US and Canadian postal address parsing.
//!
//! Parsing runs in three stages:
//!
//! 1. **Clean**: lowercase, flatten line breaks, strip periods
//! 2. **Tokenize**: peel country, postal code, state and city off the end,
//!    then split the street line ([`tokenize`])
//! 3. **Normalize**: map each raw token to its canonical form
//!    ([`normalize`])
//!
//! Parsing never fails. Unrecognized input produces an [`Address`] with
//! fewer fields set, possibly none.
//!
//! ```
//! let address = normalic_address::parse("201 Varick St. floor 12th, New York, NY 10014");
//! assert_eq!(address.to_string(), "201 Varick St., New York, NY 10014");
//! assert_eq!(address.unit(), Some("Floor 12th"));
//! ```

pub mod normalize;
pub mod patterns;
pub mod tokenize;

use std::sync::LazyLock;

use normalic_reference::ReferenceTables;
use normalic_text::{clean, symbolize};

pub use normalic_address_models::{
    Address, AddressField, FieldValue, StreetFragment, StreetLine,
};
pub use patterns::PatternError;

use crate::normalize::{Normalizer, normalize_postal_code};
use crate::patterns::Patterns;
use crate::tokenize::{RawLine, RawTokens, StreetContext, Tokenizer};

/// Field labels whose value is a whole street line rather than a single
/// component.
const STREET_LINE_KEYS: &[&str] = &["address", "address_line1", "line1", "street_address"];

static GLOBAL: LazyLock<AddressParser> = LazyLock::new(|| {
    AddressParser::new(ReferenceTables::default())
        .unwrap_or_else(|e| panic!("Failed to build built-in address patterns: {e}"))
});

/// An address parser bound to one set of reference tables.
#[derive(Debug, Clone)]
pub struct AddressParser {
    tables: ReferenceTables,
    patterns: Patterns,
}

impl AddressParser {
    /// Builds a parser, compiling its patterns from `tables`.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if a pattern built from the tables fails
    /// to compile.
    pub fn new(tables: ReferenceTables) -> Result<Self, PatternError> {
        let patterns = Patterns::new(&tables)?;
        log::debug!(
            "Built address parser with {} localities",
            tables.localities().len()
        );
        Ok(Self { tables, patterns })
    }

    /// The parser over the built-in reference tables.
    ///
    /// # Panics
    ///
    /// Panics on first use if the built-in patterns fail to compile, which
    /// the tests guard against.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// The reference tables this parser consults.
    #[must_use]
    pub const fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// Parses a free-form address.
    #[must_use]
    pub fn parse(&self, raw: &str) -> Address {
        let tokens = self.tokenize(raw);
        let address = self.normalizer().normalize(&tokens);
        log::debug!("Parsed {raw:?} as {address}");
        address
    }

    /// Cleans and tokenizes without normalizing.
    #[must_use]
    pub fn tokenize(&self, raw: &str) -> RawTokens {
        self.tokenizer().tokenize(&clean(raw))
    }

    /// Builds an address from labeled fields.
    ///
    /// Keys are matched loosely (`"Postal Code"`, `"postal-code"` and
    /// `"zip"` all name the postal code). A street line given as
    /// `address`, `address_line1`, `line1` or `street_address` is split into
    /// its components; explicitly labeled components override what the line
    /// produced. Unknown keys are ignored.
    #[must_use]
    pub fn from_fields<I, K, V>(&self, fields: I) -> Address
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut tokens = RawTokens::default();
        let mut labeled = Vec::new();

        for (key, value) in fields {
            let key = symbolize(key.as_ref());
            let value = clean(value.as_ref());
            if value.is_empty() {
                continue;
            }

            if STREET_LINE_KEYS.contains(&key.as_str()) {
                tokens.line = RawLine::Single(
                    self.tokenizer()
                        .tokenize_street(&value, StreetContext::Standalone),
                );
                continue;
            }

            match key.parse::<AddressField>() {
                Ok(AddressField::Intersection) | Err(_) => {
                    log::warn!("Ignoring unknown address field {key:?}");
                }
                Ok(field) => labeled.push((field, value)),
            }
        }

        for (field, value) in labeled {
            tokens.assign(field, value);
        }

        self.normalizer().normalize(&tokens)
    }

    /// Sets a field by name, normalizing `value` the way parsing would.
    ///
    /// A postal code that resolves also replaces city and state. Setting the
    /// city or state of an address whose postal code resolves keeps the
    /// resolved value.
    ///
    /// Returns `false` (and changes nothing) for unknown names, for fields
    /// that do not exist in the address's shape and for postal codes that
    /// are neither US nor Canadian.
    pub fn set_field(&self, address: &mut Address, name: &str, value: &str) -> bool {
        let Ok(field) = symbolize(name).parse::<AddressField>() else {
            log::warn!("Unknown address field {name:?}");
            return false;
        };

        let cleaned = clean(value);
        let raw = Some(cleaned.as_str());
        let normalizer = self.normalizer();

        if field == AddressField::Zipcode {
            let zipcode = normalizer.field(field, raw, None);
            if zipcode.is_none() && !cleaned.is_empty() {
                log::warn!("Not a postal code: {value:?}");
                return false;
            }
            if let Some(locality) = zipcode.as_deref().and_then(|z| self.tables.locality(z)) {
                address.city = normalizer.field(AddressField::City, None, Some(locality));
                address.state = normalizer.field(AddressField::State, None, Some(locality));
            }
            return address.set_field(field, zipcode);
        }

        let locality = address
            .zipcode
            .as_deref()
            .and_then(normalize_postal_code)
            .and_then(|z| self.tables.locality(&z));
        let value = normalizer.field(field, raw, locality);
        address.set_field(field, value)
    }

    fn tokenizer(&self) -> Tokenizer<'_> {
        Tokenizer::new(&self.patterns, &self.tables)
    }

    const fn normalizer(&self) -> Normalizer<'_> {
        Normalizer::new(&self.tables)
    }
}

/// By-name field writes on an [`Address`] that normalize the value the way
/// parsing would, using the built-in reference tables.
pub trait SetField {
    /// See [`AddressParser::set_field`].
    fn set(&mut self, name: &str, value: &str) -> bool;
}

impl SetField for Address {
    fn set(&mut self, name: &str, value: &str) -> bool {
        AddressParser::global().set_field(self, name, value)
    }
}

/// Parses a free-form address with the built-in reference tables.
#[must_use]
pub fn parse(raw: &str) -> Address {
    AddressParser::global().parse(raw)
}

/// Builds an address from labeled fields with the built-in reference
/// tables. See [`AddressParser::from_fields`].
#[must_use]
pub fn from_fields<I, K, V>(fields: I) -> Address
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    AddressParser::global().from_fields(fields)
}

#[cfg(test)]
mod tests {
    use normalic_reference::LocalityTable;

    use super::*;

    #[test]
    fn floor_unit_is_dropped_from_the_rendering() {
        let address = parse("201 Varick St. floor 12th, New York, NY 10014");
        assert_eq!(address.number(), Some("201"));
        assert_eq!(address.street(), Some("Varick"));
        assert_eq!(address.street_type(), Some("St."));
        assert_eq!(address.unit(), Some("Floor 12th"));
        assert!(address.unit().is_some_and(|u| u.contains("12th")));
        assert_eq!(address.city.as_deref(), Some("New York"));
        assert_eq!(address.state.as_deref(), Some("NY"));
        assert_eq!(address.zipcode.as_deref(), Some("10014"));
        assert_eq!(address.to_string(), "201 Varick St., New York, NY 10014");
    }

    #[test]
    fn trailing_directional() {
        let address = parse("167 4th Street Northeast, New York, NY 10014");
        assert_eq!(address.direction(), Some("NE"));
        assert_eq!(address.street(), Some("4th"));
        assert_eq!(address.street_type(), Some("St."));
        assert_eq!(address.to_string(), "167 NE 4th St., New York, NY 10014");
    }

    #[test]
    fn leading_directional() {
        let address = parse("416 W 13th Street, New York, NY 10014");
        assert_eq!(address.number(), Some("416"));
        assert_eq!(address.direction(), Some("W"));
        assert_eq!(address.street(), Some("13th"));
        assert_eq!(address.street_type(), Some("St."));
    }

    #[test]
    fn full_word_directional() {
        let address = parse("871 West Washington Street, New York, NY 10014");
        assert_eq!(address.direction(), Some("W"));
        assert_eq!(address.street(), Some("Washington"));
    }

    #[test]
    fn intersection() {
        let address = parse("9th Ave. and W 13th St., New York, NY 10014");
        assert!(address.is_intersection());
        let streets = address.streets();
        assert_eq!(
            streets.iter().map(|s| s.street.as_deref()).collect::<Vec<_>>(),
            [Some("9th"), Some("13th")]
        );
        assert_eq!(
            streets.iter().map(|s| s.direction.as_deref()).collect::<Vec<_>>(),
            [None, Some("W")]
        );
        assert_eq!(
            streets.iter().map(|s| s.street_type.as_deref()).collect::<Vec<_>>(),
            [Some("Ave."), Some("St.")]
        );
        assert_eq!(address.number(), None);
        assert_eq!(address.unit(), None);
        assert_eq!(
            address.to_string(),
            "9th Ave. and W 13th St., New York, NY 10014"
        );
    }

    #[test]
    fn west_fourth_street() {
        let address = parse("167 West 4th Street, New York, NY 10014");
        assert_eq!(address.number(), Some("167"));
        assert_eq!(address.direction(), Some("W"));
        assert_eq!(address.street(), Some("4th"));
        assert_eq!(address.street_type(), Some("St."));
        assert!(!address.is_intersection());
        assert_eq!(address.to_string(), "167 W 4th St., New York, NY 10014");
    }

    #[test]
    fn zip_plus_four_is_truncated() {
        let address = parse("201 Varick St., New York, NY 10014-1234");
        assert_eq!(address.zipcode.as_deref(), Some("10014"));
        assert_eq!(address.city.as_deref(), Some("New York"));
        assert_eq!(address.street(), Some("Varick"));
    }

    #[test]
    fn missing_state_comes_from_the_postal_code() {
        let address = parse("416 W 13th Street, New York, 10014");
        assert_eq!(address.number(), Some("416"));
        assert_eq!(address.direction(), Some("W"));
        assert_eq!(address.street(), Some("13th"));
        assert_eq!(address.city.as_deref(), Some("New York"));
        assert_eq!(address.state.as_deref(), Some("NY"));
    }

    #[test]
    fn street_only() {
        let address = parse("871 Washington Street");
        assert_eq!(address.number(), Some("871"));
        assert_eq!(address.street(), Some("Washington"));
        assert_eq!(address.street_type(), Some("St."));
        assert_eq!(address.city, None);
        assert_eq!(address.state, None);
        assert_eq!(address.zipcode, None);
    }

    #[test]
    fn floor_without_city() {
        let address = parse("201 Varick St. floor 12th");
        assert_eq!(address.number(), Some("201"));
        assert_eq!(address.street(), Some("Varick"));
        assert_eq!(address.street_type(), Some("St."));
        assert_eq!(address.city, None);
        assert_eq!(address.state, None);
    }

    #[test]
    fn direction_without_city() {
        let address = parse("871 West Washington Street");
        assert_eq!(address.direction(), Some("W"));
        assert_eq!(address.street(), Some("Washington"));
        assert_eq!(address.city, None);
        assert_eq!(address.line1(), "871 W Washington St.");
    }

    #[test]
    fn lowercase_input() {
        let address = parse("871 west washington street, new york, ny 10014");
        assert_eq!(address.get("number"), Some(FieldValue::Text("871")));
        assert_eq!(address.get("direction"), Some(FieldValue::Text("W")));
        assert_eq!(address.get("street"), Some(FieldValue::Text("Washington")));
        assert_eq!(address.get("type"), Some(FieldValue::Text("St.")));
        assert_eq!(address.get("city"), Some(FieldValue::Text("New York")));
        assert_eq!(address.get("state"), Some(FieldValue::Text("NY")));
        assert_eq!(address.get("zipcode"), Some(FieldValue::Text("10014")));
        assert_eq!(address.get("intersection"), Some(FieldValue::Flag(false)));
        assert_eq!(address.get("bad_name"), None);
    }

    #[test]
    fn ampersand_intersection() {
        let address = parse("5th Avenue & East 59th Street, New York, NY 10014");
        assert!(address.is_intersection());
        assert_eq!(address.streets()[1].direction.as_deref(), Some("E"));
    }

    #[test]
    fn postal_code_alone_resolves_locality() {
        let address = parse("08848");
        assert_eq!(address.city.as_deref(), Some("Milford"));
        assert_eq!(address.state.as_deref(), Some("NJ"));
        assert_eq!(address.zipcode.as_deref(), Some("08848"));
        assert_eq!(address.to_string(), "Milford, NJ 08848");
    }

    #[test]
    fn postal_code_overrides_city_and_state() {
        let address = parse("1 Main St, Trenton, NY 08848");
        assert_eq!(address.city.as_deref(), Some("Milford"));
        assert_eq!(address.state.as_deref(), Some("NJ"));
    }

    #[test]
    fn canadian_postal_code_is_respaced() {
        let address = parse("800 Reynolds Dr, Kincardine, ON N2Z3A5");
        assert_eq!(address.number(), Some("800"));
        assert_eq!(address.street(), Some("Reynolds"));
        assert_eq!(address.street_type(), Some("Dr."));
        assert_eq!(address.city.as_deref(), Some("Kincardine"));
        assert_eq!(address.state.as_deref(), Some("ON"));
        assert_eq!(address.zipcode.as_deref(), Some("N2Z 3A5"));
    }

    #[test]
    fn state_names_become_codes() {
        let address = parse("100 Main Street, Boise, Idaho");
        assert_eq!(address.city.as_deref(), Some("Boise"));
        assert_eq!(address.state.as_deref(), Some("ID"));
    }

    #[test]
    fn unknown_state_spelling_is_left_for_the_city() {
        let address = parse("871 Washington Street, New York, NewYork 10014");
        assert_eq!(address.number(), Some("871"));
        assert_eq!(address.street(), Some("Washington"));
        assert_eq!(address.street_type(), Some("St."));
        assert_eq!(address.city.as_deref(), Some("New York"));
        assert_eq!(address.state.as_deref(), Some("NY"));
        assert_eq!(address.to_string(), "871 Washington St., New York, NY 10014");
    }

    #[test]
    fn multi_line_input() {
        let address = parse("201 Varick St.\nNew York, NY 10014");
        assert_eq!(address.to_string(), "201 Varick St., New York, NY 10014");
    }

    #[test]
    fn country_marker_is_ignored() {
        let address = parse("201 Varick St, New York, NY 10014 USA");
        assert_eq!(address.to_string(), "201 Varick St., New York, NY 10014");
    }

    #[test]
    fn empty_and_garbage_input() {
        assert_eq!(parse("").to_string(), "");
        assert_eq!(parse("   ").to_string(), "");
        let address = parse("!!!");
        assert_eq!(address.zipcode, None);
        assert_eq!(address.street(), None);
    }

    #[test]
    fn rendering_reparses_to_itself() {
        for raw in [
            "201 Varick St. floor 12th, New York, NY 10014",
            "167 4th Street Northeast, New York, NY 10014",
            "9th Ave. and W 13th St., New York, NY 10014",
            "800 Reynolds Dr, Kincardine, ON N2Z3A5",
            "08848",
        ] {
            let once = parse(raw);
            let twice = parse(&once.to_string());
            assert_eq!(twice.to_string(), once.to_string(), "{raw}");
            assert_eq!(twice, once);
        }
    }

    #[test]
    fn essential_match_ignores_unit_and_missing_type() {
        let a = parse("201 Varick St. floor 12th, New York, NY 10014");
        let b = parse("201 Varick, New York, NY 10014");
        assert!(a.matches_essential(&b));
        assert!(!a.matches_essential(&parse("203 Varick St, New York, NY 10014")));
    }

    #[test]
    fn parsing_does_not_mutate_input() {
        let raw = String::from("201 Varick St. floor 12th, New York, NY 10014");
        let before = raw.clone();
        let _ = parse(&raw);
        assert_eq!(raw, before);
    }

    #[test]
    fn from_fields_splits_the_street_line() {
        let address = from_fields([
            ("Address", "201 Varick St."),
            ("City", "new york"),
            ("State", "new york"),
            ("Postal Code", "10014"),
        ]);
        assert_eq!(address.to_string(), "201 Varick St., New York, NY 10014");
    }

    #[test]
    fn from_fields_labeled_values_override_the_line() {
        let address = from_fields([
            ("street_type", "avenue"),
            ("line1", "201 Varick St."),
            ("unit", "ste 4"),
            ("nickname", "office"),
        ]);
        assert_eq!(address.street(), Some("Varick"));
        assert_eq!(address.street_type(), Some("Ave."));
        assert_eq!(address.unit(), Some("Ste 4"));
    }

    #[test]
    fn from_fields_keeps_unknown_street_types() {
        let address = from_fields([("street", "varick"), ("type", "xyz")]);
        assert_eq!(address.street_type(), Some("Xyz."));
        assert_eq!(address.line1(), "Varick Xyz.");
    }

    #[test]
    fn from_fields_drops_malformed_postal_codes() {
        let address = from_fields([("city", "new york"), ("zip", "1234")]);
        assert_eq!(address.zipcode, None);
        assert_eq!(address.city.as_deref(), Some("New York"));
    }

    #[test]
    fn from_fields_skips_blank_values() {
        let address = from_fields([("city", "  "), ("zip", "08848")]);
        assert_eq!(address.city.as_deref(), Some("Milford"));
    }

    #[test]
    fn set_field_normalizes() {
        let parser = AddressParser::global();
        let mut address = parse("201 Varick St, Kincardine, ON N2Z3A5");
        assert!(parser.set_field(&mut address, "type", "avenue"));
        assert_eq!(address.street_type(), Some("Ave."));
        assert!(parser.set_field(&mut address, "Direction", "north"));
        assert_eq!(address.direction(), Some("N"));
        assert!(parser.set_field(&mut address, "city", "port elgin"));
        assert_eq!(address.city.as_deref(), Some("Port Elgin"));
        assert!(!parser.set_field(&mut address, "nickname", "home"));
    }

    #[test]
    fn set_by_name_on_the_record() {
        let mut address = parse("871 Washington Street");
        assert!(address.set("zip", "08848"));
        assert_eq!(address.to_string(), "871 Washington St., Milford, NJ 08848");
        assert!(!address.set("bad_name", "x"));
    }

    #[test]
    fn set_field_zipcode_resolves_locality() {
        let parser = AddressParser::global();
        let mut address = parse("201 Varick St, Kincardine, ON N2Z3A5");
        assert!(parser.set_field(&mut address, "zip", "10014"));
        assert_eq!(address.city.as_deref(), Some("New York"));
        assert_eq!(address.state.as_deref(), Some("NY"));

        assert!(parser.set_field(&mut address, "city", "Boston"));
        assert_eq!(address.city.as_deref(), Some("New York"));

        assert!(!parser.set_field(&mut address, "zip", "1234"));
        assert_eq!(address.zipcode.as_deref(), Some("10014"));
    }

    #[test]
    fn set_field_rejects_street_fields_on_intersections() {
        let parser = AddressParser::global();
        let mut address = parse("9th Ave. and W 13th St., New York, NY 10014");
        assert!(!parser.set_field(&mut address, "number", "12"));
        assert!(!parser.set_field(&mut address, "intersection", "false"));
    }

    #[test]
    fn custom_localities() {
        let localities = LocalityTable::from_toml_str(
            r#"
            [[locality]]
            postal_code = "N2Z 3A5"
            city = "Kincardine"
            state = "Ontario"
            "#,
        )
        .unwrap();
        let parser =
            AddressParser::new(ReferenceTables::default().with_localities(localities)).unwrap();

        let address = parser.parse("N2Z 3A5");
        assert_eq!(address.to_string(), "Kincardine, ON N2Z 3A5");
        assert_eq!(parser.parse("08848").city, None);
    }

    #[test]
    fn custom_locality_cities_are_title_cased() {
        let localities = LocalityTable::from_toml_str(
            r#"
            [[locality]]
            postal_code = "62701"
            city = "springfield"
            state = "il"
            "#,
        )
        .unwrap();
        let parser =
            AddressParser::new(ReferenceTables::default().with_localities(localities)).unwrap();

        let address = parser.parse("62701");
        assert_eq!(address.city.as_deref(), Some("Springfield"));
        assert_eq!(address.to_string(), "Springfield, IL 62701");

        let address = parser.parse("1 Main St, springfield, IL 62701");
        assert_eq!(address.street(), Some("Main"));
        assert_eq!(address.to_string(), "1 Main St., Springfield, IL 62701");
    }

    #[test]
    fn tokenize_exposes_raw_tokens() {
        let tokens = AddressParser::global().tokenize("201 Varick St., New York, NY 10014");
        assert_eq!(tokens.state.as_deref(), Some("ny"));
    }
}
