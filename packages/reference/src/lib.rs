#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reference tables for postal address parsing.
//!
//! Everything here is immutable lookup data:
//!
//! - [`regions`]: US state and Canadian province codes and names
//! - [`synonyms`]: street type and directional spellings
//! - [`units`]: secondary unit designators
//! - [`localities`]: postal code → city/state
//!
//! The static tables are built once on first use. Only the locality table
//! is replaceable, through [`ReferenceTables::with_localities`].

pub mod localities;
pub mod regions;
pub mod synonyms;
pub mod units;

use std::sync::Arc;

use thiserror::Error;

pub use localities::{Locality, LocalityTable};

/// Errors from loading reference data.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// Reading a table from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML table did not parse.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A postal code was not in canonical form.
    #[error("Invalid postal code '{postal_code}': expected 5 digits or 'A1A 1A1'")]
    InvalidPostalCode {
        /// The rejected postal code.
        postal_code: String,
    },

    /// A locality's region is in a different country than its postal code
    /// (a US ZIP with a Canadian province, or the reverse).
    #[error("Region '{region}' does not match the country of postal code '{postal_code}'")]
    CountryMismatch {
        /// The postal code of the rejected entry.
        postal_code: String,
        /// The resolved region code.
        region: String,
    },

    /// A locality named a region that is not a US state or Canadian
    /// province.
    #[error("Unknown region '{region}' for postal code '{postal_code}'")]
    UnknownRegion {
        /// The postal code of the rejected entry.
        postal_code: String,
        /// The region that failed to resolve.
        region: String,
    },
}

/// The full set of reference tables a parser consults.
///
/// Cloning is cheap: the locality table is shared.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    localities: Arc<LocalityTable>,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self {
            localities: Arc::new(LocalityTable::builtin().clone()),
        }
    }
}

#[allow(clippy::unused_self)]
impl ReferenceTables {
    /// Replaces the postal code locality table.
    #[must_use]
    pub fn with_localities(self, localities: LocalityTable) -> Self {
        Self {
            localities: Arc::new(localities),
        }
    }

    /// Looks up a canonical postal code.
    #[must_use]
    pub fn locality(&self, postal_code: &str) -> Option<&Locality> {
        self.localities.get(postal_code)
    }

    /// The locality table in use.
    #[must_use]
    pub fn localities(&self) -> &LocalityTable {
        &self.localities
    }

    /// Resolves a region code or name to its two-letter code.
    #[must_use]
    pub fn region_code(&self, token: &str) -> Option<&'static str> {
        regions::region_code(token)
    }

    /// Resolves a street type spelling to its USPS abbreviation.
    #[must_use]
    pub fn street_type(&self, token: &str) -> Option<&'static str> {
        synonyms::street_type_abbr(token)
    }

    /// Resolves a directional spelling to its abbreviation.
    #[must_use]
    pub fn directional(&self, token: &str) -> Option<&'static str> {
        synonyms::directional_abbr(token)
    }

    /// Every region key (codes, names, aliases), lowercased.
    pub fn region_keys(&self) -> impl Iterator<Item = &'static str> {
        regions::region_keys()
    }

    /// Every street type spelling, lowercased.
    pub fn street_type_keys(&self) -> impl Iterator<Item = &'static str> {
        synonyms::street_type_keys()
    }

    /// Every directional spelling, lowercased.
    pub fn directional_keys(&self) -> impl Iterator<Item = &'static str> {
        synonyms::directional_keys()
    }

    /// Every unit designator keyword, lowercased.
    #[must_use]
    pub const fn unit_designators(&self) -> &'static [&'static str] {
        units::UNIT_DESIGNATORS
    }
}
