#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Text utilities shared by the normalic parsers.
//!
//! Two halves:
//!
//! - [`clean`] prepares free-form input for pattern matching and
//!   [`title_case`] restores proper-noun casing on the way out.
//! - [`cut`] holds the string-cutting primitives. Each one takes the
//!   current working text and returns a [`Cut`]: the token it found (if any)
//!   plus the text that remains. The caller's string is never modified.

pub mod clean;
pub mod cut;

pub use clean::{clean, symbolize, title_case};
pub use cut::{
    Cut, Split, TokenPattern, cut, extract_leading, extract_trailing, extract_trailing_loose,
    extract_trailing_phrase, split_around,
};
