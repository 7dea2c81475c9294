//! Postal code → locality table.
//!
//! A resolvable postal code is authoritative for city and state, so this
//! table is only ever queried by exact canonical code (`"10014"`,
//! `"M5V 3L9"`), never by range or prefix.
//!
//! A small table is embedded at compile time from `data/localities.toml`.
//! Callers with a complete data set load their own with
//! [`LocalityTable::from_toml_str`] or [`LocalityTable::from_path`].

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ReferenceError;
use crate::regions::{Country, region_code, region_country};

/// Canonical US (5 digits) or Canadian (`A1A 1A1`) postal code.
static CANONICAL_POSTAL_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{5}|[A-Z]\d[A-Z] \d[A-Z]\d)$").expect("valid regex")
});

const BUILTIN_LOCALITIES: &str = include_str!("../data/localities.toml");

static BUILTIN: LazyLock<LocalityTable> = LazyLock::new(|| {
    LocalityTable::from_toml_str(BUILTIN_LOCALITIES)
        .unwrap_or_else(|e| panic!("Failed to parse built-in locality table: {e}"))
});

/// The city and region a postal code belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locality {
    /// City name as it should be displayed (e.g. "New York").
    pub city: String,
    /// Two-letter region code (e.g. "NY", "ON").
    pub state: String,
}

/// On-disk shape of a locality table.
#[derive(Debug, Deserialize)]
struct LocalityFile {
    #[serde(default, rename = "locality")]
    localities: Vec<LocalityEntry>,
}

#[derive(Debug, Deserialize)]
struct LocalityEntry {
    postal_code: String,
    city: String,
    state: String,
}

/// Exact-match postal code lookup table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalityTable {
    entries: BTreeMap<String, Locality>,
}

impl LocalityTable {
    /// The table embedded in this crate.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed (this is a compile-time
    /// guarantee since the file is embedded and covered by tests).
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Parses a table from TOML made of `[[locality]]` entries with
    /// `postal_code`, `city` and `state` keys.
    ///
    /// # Errors
    ///
    /// * [`ReferenceError::Toml`] if the document does not parse
    /// * [`ReferenceError::InvalidPostalCode`] / [`ReferenceError::UnknownRegion`]
    ///   if an entry is not canonical
    pub fn from_toml_str(contents: &str) -> Result<Self, ReferenceError> {
        let file: LocalityFile = toml::de::from_str(contents)?;
        let mut table = Self::default();

        for entry in file.localities {
            let locality = Locality {
                city: entry.city,
                state: entry.state,
            };
            if let Some(previous) = table.insert(&entry.postal_code, locality)? {
                log::warn!(
                    "Duplicate locality for postal code {}: replacing {}, {}",
                    entry.postal_code,
                    previous.city,
                    previous.state
                );
            }
        }

        log::debug!("Loaded {} localities", table.len());
        Ok(table)
    }

    /// Reads and parses a TOML table from disk.
    ///
    /// # Errors
    ///
    /// * [`ReferenceError::Io`] if the file cannot be read
    /// * any error from [`Self::from_toml_str`]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReferenceError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Adds an entry, returning the locality it replaced.
    ///
    /// The region may be given as a code or a full name; it is stored as
    /// the two-letter code.
    ///
    /// # Errors
    ///
    /// * [`ReferenceError::InvalidPostalCode`] if `postal_code` is not in
    ///   canonical form
    /// * [`ReferenceError::UnknownRegion`] if the region does not resolve
    /// * [`ReferenceError::CountryMismatch`] if the region is in the other
    ///   country
    pub fn insert(
        &mut self,
        postal_code: &str,
        locality: Locality,
    ) -> Result<Option<Locality>, ReferenceError> {
        if !CANONICAL_POSTAL_CODE_RE.is_match(postal_code) {
            return Err(ReferenceError::InvalidPostalCode {
                postal_code: postal_code.to_string(),
            });
        }
        let state = region_code(&locality.state).ok_or_else(|| ReferenceError::UnknownRegion {
            postal_code: postal_code.to_string(),
            region: locality.state.clone(),
        })?;

        let country = if postal_code.starts_with(|c: char| c.is_ascii_digit()) {
            Country::UnitedStates
        } else {
            Country::Canada
        };
        if region_country(state) != Some(country) {
            return Err(ReferenceError::CountryMismatch {
                postal_code: postal_code.to_string(),
                region: state.to_string(),
            });
        }

        Ok(self.entries.insert(
            postal_code.to_string(),
            Locality {
                city: locality.city,
                state: state.to_string(),
            },
        ))
    }

    /// Looks up a canonical postal code.
    #[must_use]
    pub fn get(&self, postal_code: &str) -> Option<&Locality> {
        self.entries.get(postal_code)
    }

    /// Number of postal codes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(postal_code, locality)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Locality)> {
        self.entries.iter().map(|(code, locality)| (code.as_str(), locality))
    }
}
