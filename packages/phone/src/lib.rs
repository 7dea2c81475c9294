#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! North American phone number normalization.
//!
//! Only the ten-digit NANP form is understood: area code (NPA), exchange
//! (NXX) and subscriber line (SLID). Punctuation, a leading trunk or
//! country prefix and any trailing extension are discarded.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Names of the fields of a [`PhoneNumber`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum PhoneField {
    #[strum(to_string = "npa", serialize = "area_code")]
    Npa,
    #[strum(to_string = "nxx", serialize = "exchange")]
    Nxx,
    #[strum(to_string = "slid", serialize = "line", serialize = "line_number")]
    Slid,
}

/// A ten-digit North American phone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber {
    /// Three-digit area code.
    pub npa: String,
    /// Three-digit exchange.
    pub nxx: String,
    /// Four-digit subscriber line.
    pub slid: String,
}

impl PhoneNumber {
    /// Parses free-form phone text.
    ///
    /// Every non-digit is dropped, then leading `0`s and `1`s are stripped
    /// until the first digit is neither. Returns `None` when fewer than ten
    /// digits remain; digits past the tenth are ignored.
    ///
    /// ```
    /// use normalic_phone::PhoneNumber;
    ///
    /// let phone = PhoneNumber::parse("+1 (212) 555-0123 x42").unwrap();
    /// assert_eq!(phone.to_string(), "212 555 0123");
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        let digits = digits.trim_start_matches(['0', '1']);

        if digits.len() < 10 {
            log::trace!("Not a phone number: {raw:?}");
            return None;
        }

        Some(Self {
            npa: digits[0..3].to_string(),
            nxx: digits[3..6].to_string(),
            slid: digits[6..10].to_string(),
        })
    }

    /// Reads a field.
    #[must_use]
    pub fn field(&self, field: PhoneField) -> &str {
        match field {
            PhoneField::Npa => &self.npa,
            PhoneField::Nxx => &self.nxx,
            PhoneField::Slid => &self.slid,
        }
    }

    /// Reads a field by name; `None` for unknown names.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        name.parse().ok().map(|field| self.field(field))
    }

    /// Writes a field by name. Returns `false` for unknown names.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        let Ok(field) = name.parse::<PhoneField>() else {
            return false;
        };
        let slot = match field {
            PhoneField::Npa => &mut self.npa,
            PhoneField::Nxx => &mut self.nxx,
            PhoneField::Slid => &mut self.slid,
        };
        *slot = value.into();
        true
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.npa, self.nxx, self.slid)
    }
}

/// Parses free-form phone text. See [`PhoneNumber::parse`].
#[must_use]
pub fn parse(raw: &str) -> Option<PhoneNumber> {
    PhoneNumber::parse(raw)
}
