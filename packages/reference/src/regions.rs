//! US state and Canadian province/territory tables.
//!
//! Provides mappings between two-letter region codes and full region names
//! for the 50 US states, DC, the inhabited US territories, and the 13
//! Canadian provinces and territories.

use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Country a region belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Country {
    /// United States (states, DC and territories).
    UnitedStates,
    /// Canada (provinces and territories).
    Canada,
}

/// Every supported two-letter region code.
pub const REGION_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM",
    "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY", "AS", "GU", "MP", "PR", "VI", "AB", "BC", "MB", "NB", "NL", "NS", "NT", "NU",
    "ON", "PE", "QC", "SK", "YT",
];

/// Alternate spellings accepted in addition to the official names.
const REGION_ALIASES: &[(&str, &str)] = &[
    ("washington dc", "DC"),
    ("washington d c", "DC"),
    ("newfoundland", "NL"),
    ("labrador", "NL"),
    ("pei", "PE"),
    ("québec", "QC"),
    ("yukon territory", "YT"),
    ("nwt", "NT"),
];

/// Maps a two-letter region code to its full name.
///
/// Returns `None` for unrecognized codes.
#[must_use]
pub fn region_name(code: &str) -> Option<&'static str> {
    let name = match code.to_uppercase().as_str() {
        "AL" => "Alabama",
        "AK" => "Alaska",
        "AZ" => "Arizona",
        "AR" => "Arkansas",
        "CA" => "California",
        "CO" => "Colorado",
        "CT" => "Connecticut",
        "DE" => "Delaware",
        "DC" => "District of Columbia",
        "FL" => "Florida",
        "GA" => "Georgia",
        "HI" => "Hawaii",
        "ID" => "Idaho",
        "IL" => "Illinois",
        "IN" => "Indiana",
        "IA" => "Iowa",
        "KS" => "Kansas",
        "KY" => "Kentucky",
        "LA" => "Louisiana",
        "ME" => "Maine",
        "MD" => "Maryland",
        "MA" => "Massachusetts",
        "MI" => "Michigan",
        "MN" => "Minnesota",
        "MS" => "Mississippi",
        "MO" => "Missouri",
        "MT" => "Montana",
        "NE" => "Nebraska",
        "NV" => "Nevada",
        "NH" => "New Hampshire",
        "NJ" => "New Jersey",
        "NM" => "New Mexico",
        "NY" => "New York",
        "NC" => "North Carolina",
        "ND" => "North Dakota",
        "OH" => "Ohio",
        "OK" => "Oklahoma",
        "OR" => "Oregon",
        "PA" => "Pennsylvania",
        "RI" => "Rhode Island",
        "SC" => "South Carolina",
        "SD" => "South Dakota",
        "TN" => "Tennessee",
        "TX" => "Texas",
        "UT" => "Utah",
        "VT" => "Vermont",
        "VA" => "Virginia",
        "WA" => "Washington",
        "WV" => "West Virginia",
        "WI" => "Wisconsin",
        "WY" => "Wyoming",
        "AS" => "American Samoa",
        "GU" => "Guam",
        "MP" => "Northern Mariana Islands",
        "PR" => "Puerto Rico",
        "VI" => "Virgin Islands",
        "AB" => "Alberta",
        "BC" => "British Columbia",
        "MB" => "Manitoba",
        "NB" => "New Brunswick",
        "NL" => "Newfoundland and Labrador",
        "NS" => "Nova Scotia",
        "NT" => "Northwest Territories",
        "NU" => "Nunavut",
        "ON" => "Ontario",
        "PE" => "Prince Edward Island",
        "QC" => "Quebec",
        "SK" => "Saskatchewan",
        "YT" => "Yukon",
        _ => return None,
    };
    Some(name)
}

/// Returns the country a region code belongs to.
#[must_use]
pub fn region_country(code: &str) -> Option<Country> {
    match code.to_uppercase().as_str() {
        "AB" | "BC" | "MB" | "NB" | "NL" | "NS" | "NT" | "NU" | "ON" | "PE" | "QC" | "SK"
        | "YT" => Some(Country::Canada),
        other if REGION_CODES.contains(&other) => Some(Country::UnitedStates),
        _ => None,
    }
}

/// Lowercased codes, names and aliases mapped to their region code.
static REGION_LOOKUP: LazyLock<BTreeMap<String, &'static str>> = LazyLock::new(|| {
    let mut lookup = BTreeMap::new();
    for code in REGION_CODES {
        lookup.insert(code.to_lowercase(), *code);
        if let Some(name) = region_name(code) {
            lookup.insert(name.to_lowercase(), *code);
        }
    }
    for (alias, code) in REGION_ALIASES {
        lookup.insert((*alias).to_string(), *code);
    }
    lookup
});

/// Resolves a region code, full name or alias (any case) to its
/// two-letter code.
#[must_use]
pub fn region_code(token: &str) -> Option<&'static str> {
    REGION_LOOKUP.get(&token.trim().to_lowercase()).copied()
}

/// Every lowercased key [`region_code`] recognizes.
pub fn region_keys() -> impl Iterator<Item = &'static str> {
    REGION_LOOKUP.keys().map(String::as_str)
}
