#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Parsed postal address types.
//!
//! This crate contains only the [`Address`] record, its rendering and its
//! comparisons. It has no parsing logic and no reference data; see
//! `normalic_address` for the parser that produces these values.
//!
//! An address is either a single street (optional house number and unit)
//! or an intersection of two streets. [`StreetLine`] makes the two shapes
//! distinct types, so a record can never mix them.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Direction, street name and street type of one street.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetFragment {
    /// Directional abbreviation (e.g. "W", "NE").
    pub direction: Option<String>,
    /// Street name (e.g. "Varick", "4th").
    pub street: Option<String>,
    /// Street type abbreviation with trailing period (e.g. "St.").
    #[serde(rename = "type")]
    pub street_type: Option<String>,
}

impl StreetFragment {
    /// Renders the present parts as `direction street type`.
    #[must_use]
    pub fn render(&self) -> String {
        join_present(
            [&self.direction, &self.street, &self.street_type],
            " ",
        )
    }

    fn matches_essential(&self, other: &Self) -> bool {
        self.street == other.street
            && loosely_equal(self.street_type.as_ref(), other.street_type.as_ref())
            && loosely_equal(self.direction.as_ref(), other.direction.as_ref())
    }
}

/// The street portion of an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StreetLine {
    /// A single street, optionally with a house number and unit.
    Single {
        /// House number (e.g. "201", "12-14").
        number: Option<String>,
        /// The street itself.
        street: StreetFragment,
        /// Secondary unit (e.g. "Floor 12th", "Apt 4b").
        unit: Option<String>,
    },
    /// The crossing of two streets. Never has a house number or unit.
    Intersection {
        /// Both streets, in the order they were given.
        streets: [StreetFragment; 2],
    },
}

impl Default for StreetLine {
    fn default() -> Self {
        Self::Single {
            number: None,
            street: StreetFragment::default(),
            unit: None,
        }
    }
}

/// Names of the fields of an [`Address`], for callers that address fields
/// generically.
///
/// Parsing accepts a few common aliases (`zip`, `postal_code`, `province`,
/// `street_type`, ...) in any ASCII case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum AddressField {
    /// House number.
    #[strum(to_string = "number", serialize = "house_number")]
    Number,
    /// Directional.
    #[strum(to_string = "direction", serialize = "directional")]
    Direction,
    /// Street name.
    #[strum(to_string = "street", serialize = "street_name")]
    Street,
    /// Street type.
    #[strum(to_string = "type", serialize = "street_type")]
    Type,
    /// Secondary unit.
    #[strum(to_string = "unit", serialize = "secondary_unit")]
    Unit,
    /// City.
    #[strum(to_string = "city", serialize = "locality")]
    City,
    /// State or province.
    #[strum(to_string = "state", serialize = "province", serialize = "region")]
    State,
    /// Postal code.
    #[strum(
        to_string = "zipcode",
        serialize = "zip",
        serialize = "postal_code",
        serialize = "postcode"
    )]
    Zipcode,
    /// Whether the address is an intersection.
    #[strum(to_string = "intersection")]
    Intersection,
}

/// The value of one field, as returned by [`Address::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue<'a> {
    /// A scalar text field.
    Text(&'a str),
    /// A per-street field of an intersection.
    Pair([Option<&'a str>; 2]),
    /// The intersection flag.
    Flag(bool),
}

impl<'a> FieldValue<'a> {
    /// The text of a scalar field.
    #[must_use]
    pub const fn as_text(self) -> Option<&'a str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Pair(_) | Self::Flag(_) => None,
        }
    }

    /// Both values of an intersection field.
    #[must_use]
    pub const fn as_pair(self) -> Option<[Option<&'a str>; 2]> {
        match self {
            Self::Pair(pair) => Some(pair),
            Self::Text(_) | Self::Flag(_) => None,
        }
    }

    /// The intersection flag.
    #[must_use]
    pub const fn as_flag(self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(flag),
            Self::Text(_) | Self::Pair(_) => None,
        }
    }
}

/// A normalized postal address.
///
/// Every present text field is canonical: proper nouns are title-cased,
/// codes are upper-cased, street types and directionals are abbreviated.
/// Two addresses are equal when they render identically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    /// Street portion (single street or intersection).
    pub line: StreetLine,
    /// City name.
    pub city: Option<String>,
    /// Two-letter state or province code.
    pub state: Option<String>,
    /// Five-digit ZIP code or `A1A 1A1` Canadian postal code.
    pub zipcode: Option<String>,
}

impl Address {
    /// Whether this address names an intersection of two streets.
    #[must_use]
    pub const fn is_intersection(&self) -> bool {
        matches!(self.line, StreetLine::Intersection { .. })
    }

    /// House number of a single-street address.
    #[must_use]
    pub fn number(&self) -> Option<&str> {
        match &self.line {
            StreetLine::Single { number, .. } => number.as_deref(),
            StreetLine::Intersection { .. } => None,
        }
    }

    /// Secondary unit of a single-street address.
    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        match &self.line {
            StreetLine::Single { unit, .. } => unit.as_deref(),
            StreetLine::Intersection { .. } => None,
        }
    }

    /// Directional of a single-street address.
    #[must_use]
    pub fn direction(&self) -> Option<&str> {
        self.single_street().and_then(|s| s.direction.as_deref())
    }

    /// Street name of a single-street address.
    #[must_use]
    pub fn street(&self) -> Option<&str> {
        self.single_street().and_then(|s| s.street.as_deref())
    }

    /// Street type of a single-street address.
    #[must_use]
    pub fn street_type(&self) -> Option<&str> {
        self.single_street().and_then(|s| s.street_type.as_deref())
    }

    /// Every street fragment: one for a single street, two for an
    /// intersection.
    #[must_use]
    pub fn streets(&self) -> &[StreetFragment] {
        match &self.line {
            StreetLine::Single { street, .. } => std::slice::from_ref(street),
            StreetLine::Intersection { streets } => streets,
        }
    }

    const fn single_street(&self) -> Option<&StreetFragment> {
        match &self.line {
            StreetLine::Single { street, .. } => Some(street),
            StreetLine::Intersection { .. } => None,
        }
    }

    /// First line of the address: `number direction street type`, or both
    /// streets of an intersection joined by `" and "`.
    #[must_use]
    pub fn line1(&self) -> String {
        match &self.line {
            StreetLine::Single { number, street, .. } => join_present(
                [
                    number,
                    &street.direction,
                    &street.street,
                    &street.street_type,
                ],
                " ",
            ),
            StreetLine::Intersection { streets: [first, second] } => {
                format!("{} and {}", first.render(), second.render())
            }
        }
    }

    /// Renders the address on one line, e.g.
    /// `"201 Varick St., New York, NY 10014"`.
    ///
    /// Absent fields are skipped entirely.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Looser equality for de-duplicating against less complete records.
    ///
    /// Postal code, state, city, street name and house number must be
    /// equal. Street type, directional and unit only have to agree when
    /// both sides have them.
    #[must_use]
    pub fn matches_essential(&self, other: &Self) -> bool {
        if self.zipcode != other.zipcode || self.state != other.state || self.city != other.city
        {
            return false;
        }

        match (&self.line, &other.line) {
            (
                StreetLine::Single {
                    number,
                    street,
                    unit,
                },
                StreetLine::Single {
                    number: other_number,
                    street: other_street,
                    unit: other_unit,
                },
            ) => {
                number == other_number
                    && street.matches_essential(other_street)
                    && loosely_equal(unit.as_ref(), other_unit.as_ref())
            }
            (
                StreetLine::Intersection { streets },
                StreetLine::Intersection {
                    streets: other_streets,
                },
            ) => streets
                .iter()
                .zip(other_streets)
                .all(|(a, b)| a.matches_essential(b)),
            _ => false,
        }
    }

    /// Reads a field.
    ///
    /// Scalar street fields of an intersection come back as
    /// [`FieldValue::Pair`]. Absent fields are `None`.
    #[must_use]
    pub fn field(&self, field: AddressField) -> Option<FieldValue<'_>> {
        match field {
            AddressField::Number => self.number().map(FieldValue::Text),
            AddressField::Unit => self.unit().map(FieldValue::Text),
            AddressField::Direction => self.street_field(|s| s.direction.as_deref()),
            AddressField::Street => self.street_field(|s| s.street.as_deref()),
            AddressField::Type => self.street_field(|s| s.street_type.as_deref()),
            AddressField::City => self.city.as_deref().map(FieldValue::Text),
            AddressField::State => self.state.as_deref().map(FieldValue::Text),
            AddressField::Zipcode => self.zipcode.as_deref().map(FieldValue::Text),
            AddressField::Intersection => Some(FieldValue::Flag(self.is_intersection())),
        }
    }

    fn street_field(
        &self,
        pick: impl Fn(&StreetFragment) -> Option<&str>,
    ) -> Option<FieldValue<'_>> {
        match &self.line {
            StreetLine::Single { street, .. } => pick(street).map(FieldValue::Text),
            StreetLine::Intersection {
                streets: [first, second],
            } => Some(FieldValue::Pair([pick(first), pick(second)])),
        }
    }

    /// Reads a field by name. Unknown names yield `None`, never an error.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<FieldValue<'_>> {
        name.parse::<AddressField>()
            .ok()
            .and_then(|field| self.field(field))
    }

    /// Writes a scalar field verbatim. The caller is responsible for the
    /// value already being canonical.
    ///
    /// Returns `false` (and changes nothing) when the field does not exist
    /// in this shape: street fields of an intersection, or the intersection
    /// flag itself.
    pub fn set_field(&mut self, field: AddressField, value: Option<String>) -> bool {
        match field {
            AddressField::City => self.city = value,
            AddressField::State => self.state = value,
            AddressField::Zipcode => self.zipcode = value,
            AddressField::Intersection => return false,
            AddressField::Number
            | AddressField::Unit
            | AddressField::Direction
            | AddressField::Street
            | AddressField::Type => {
                let StreetLine::Single {
                    number,
                    street,
                    unit,
                } = &mut self.line
                else {
                    return false;
                };
                let slot = match field {
                    AddressField::Number => number,
                    AddressField::Unit => unit,
                    AddressField::Direction => &mut street.direction,
                    AddressField::Street => &mut street.street,
                    _ => &mut street.street_type,
                };
                *slot = value;
            }
        }
        true
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line1 = self.line1();
        let line1 = (!line1.is_empty()).then_some(line1);
        let parts = join_present([&line1, &self.city, &self.state], ", ");

        match (&self.zipcode, parts.is_empty()) {
            (Some(zipcode), true) => write!(f, "{zipcode}"),
            (Some(zipcode), false) => write!(f, "{parts} {zipcode}"),
            (None, _) => write!(f, "{parts}"),
        }
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Address {}

fn join_present<const N: usize>(parts: [&Option<String>; N], separator: &str) -> String {
    parts
        .iter()
        .filter_map(|part| part.as_deref())
        .collect::<Vec<_>>()
        .join(separator)
}

fn loosely_equal(a: Option<&String>, b: Option<&String>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}
