//! Secondary unit designators (apartment, suite, floor, ...).

/// Keywords that introduce a secondary address unit.
///
/// Spellings are lowercased with periods already stripped, the way the
/// tokenizer sees them. Multi-word designators use single spaces.
pub const UNIT_DESIGNATORS: &[&str] = &[
    "apartment",
    "apt",
    "basement",
    "bsmt",
    "box",
    "bldg",
    "building",
    "department",
    "dept",
    "fl",
    "floor",
    "lot",
    "ofc",
    "office",
    "p o box",
    "penthouse",
    "ph",
    "po box",
    "pobox",
    "rm",
    "room",
    "ste",
    "suite",
    "unit",
];
