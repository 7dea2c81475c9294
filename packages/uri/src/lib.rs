#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Lenient URI splitting.
//!
//! Input is often a bare host (`"example.com"`) or a host with a path, not
//! a well-formed absolute URL, so this is a best-effort decomposition rather
//! than an RFC 3986 parser. The host is split into subdomain, domain and
//! top-level domain, which is what de-duplicating records needs.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use normalic_text::{Cut, cut};
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use url::form_urlencoded;

const DEFAULT_SCHEME: &str = "http";
const DEFAULT_SUBDOMAIN: &str = "www";

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+://").expect("valid regex"));
static FRAGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)#.*$").expect("valid regex"));
static QUERY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\?.*$").expect("valid regex"));
static PATH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/.*$").expect("valid regex"));
static USER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^.+@").expect("valid regex"));
static PORT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":\d+$").expect("valid regex"));
static TLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.\w+$").expect("valid regex"));
static DOMAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\.|^)\w+$").expect("valid regex"));

/// Names of the fields of a [`Uri`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UriField {
    Scheme,
    User,
    Subdomain,
    Domain,
    Tld,
    Port,
    Path,
    Query,
    Fragment,
}

/// A URI split into the parts record matching cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Uri {
    /// Lowercase scheme, `"http"` when the input had none.
    pub scheme: String,
    /// Everything before the `@` of the authority.
    pub user: Option<String>,
    /// Host labels left of the domain (`"www"`, `"api.eu"`).
    pub subdomain: Option<String>,
    /// The registrable label (`"example"` in `www.example.com`).
    pub domain: String,
    /// The last host label (`"com"`).
    pub tld: String,
    /// Port digits, without the colon.
    pub port: Option<String>,
    /// Normalized absolute path; `"/"` at minimum.
    pub path: String,
    /// Decoded query parameters in first-seen order. A repeated key keeps
    /// its first position and its last value.
    pub query: Vec<(String, String)>,
    /// Fragment, without the `#`.
    pub fragment: Option<String>,
}

impl Uri {
    /// Splits a URI.
    ///
    /// Parts are cut from the outside in: scheme from the front, then
    /// fragment, query and path from the back, then user, port, top-level
    /// domain and domain out of the authority. Whatever remains of the host
    /// is the subdomain.
    ///
    /// Returns `None` unless both a domain and a top-level domain are found.
    ///
    /// ```
    /// use normalic_uri::Uri;
    ///
    /// let uri = Uri::parse("example.com/a/./b/../c?q=1").unwrap();
    /// assert_eq!(uri.to_string(), "http://www.example.com/a/c?q=1");
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let Cut { token: scheme, rest } = cut(raw.trim(), &SCHEME_RE);
        let scheme = delimited(scheme, "://")
            .map_or_else(|| DEFAULT_SCHEME.to_string(), |s| s.to_lowercase());

        let Cut {
            token: fragment,
            rest,
        } = cut(&rest, &FRAGMENT_RE);
        let Cut { token: query, rest } = cut(&rest, &QUERY_RE);
        let Cut { token: path, rest } = cut(&rest, &PATH_RE);

        let Cut { token: user, rest } = cut(&rest, &USER_RE);
        let Cut { token: port, rest } = cut(&rest, &PORT_RE);
        let Cut { token: tld, rest } = cut(&rest, &TLD_RE);
        let Cut { token: domain, rest } = cut(&rest, &DOMAIN_RE);

        let (Some(tld), Some(domain)) = (delimited(tld, "."), delimited(domain, ".")) else {
            log::trace!("No domain and top-level domain in {raw:?}");
            return None;
        };

        let subdomain = if rest.is_empty() {
            DEFAULT_SUBDOMAIN.to_string()
        } else {
            rest.to_lowercase()
        };

        Some(Self {
            scheme,
            user: delimited(user, "@"),
            subdomain: Some(subdomain),
            domain: domain.to_lowercase(),
            tld: tld.to_lowercase(),
            port: delimited(port, ":"),
            path: normalize_path(path.as_deref().unwrap_or_default()),
            query: delimited(query, "?").map_or_else(Vec::new, |q| parse_query(&q)),
            fragment: delimited(fragment, "#"),
        })
    }

    /// `host` as it renders: the present labels joined by `.`.
    #[must_use]
    pub fn host(&self) -> String {
        [
            self.subdomain.as_deref(),
            Some(self.domain.as_str()),
            Some(self.tld.as_str()),
        ]
        .into_iter()
        .flatten()
        .filter(|label| !label.is_empty())
        .collect::<Vec<_>>()
        .join(".")
    }

    /// The encoded query string, without the `?`.
    #[must_use]
    pub fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// The decoded value of one query parameter.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_str())
    }

    /// Same site: equal top-level domain, domain and subdomain, where `www`
    /// and no subdomain count as equal. Scheme, user, port, path, query and
    /// fragment are ignored.
    #[must_use]
    pub fn matches_essential(&self, other: &Self) -> bool {
        self.tld == other.tld
            && self.domain == other.domain
            && essential_subdomain(self.subdomain.as_deref())
                == essential_subdomain(other.subdomain.as_deref())
    }

    /// Reads a field.
    #[must_use]
    pub fn field(&self, field: UriField) -> Option<Cow<'_, str>> {
        match field {
            UriField::Scheme => Some(Cow::Borrowed(self.scheme.as_str())),
            UriField::User => self.user.as_deref().map(Cow::Borrowed),
            UriField::Subdomain => self.subdomain.as_deref().map(Cow::Borrowed),
            UriField::Domain => Some(Cow::Borrowed(self.domain.as_str())),
            UriField::Tld => Some(Cow::Borrowed(self.tld.as_str())),
            UriField::Port => self.port.as_deref().map(Cow::Borrowed),
            UriField::Path => Some(Cow::Borrowed(self.path.as_str())),
            UriField::Query => (!self.query.is_empty()).then(|| Cow::Owned(self.query_string())),
            UriField::Fragment => self.fragment.as_deref().map(Cow::Borrowed),
        }
    }

    /// Reads a field by name; `None` for unknown names.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Cow<'_, str>> {
        name.parse().ok().and_then(|field| self.field(field))
    }

    /// Writes a field by name. Paths are normalized and queries decoded the
    /// way [`Self::parse`] would. An empty value clears an optional field.
    ///
    /// Returns `false` for unknown names.
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        let Ok(field) = name.parse::<UriField>() else {
            return false;
        };
        let optional = (!value.is_empty()).then(|| value.to_string());

        match field {
            UriField::Scheme => self.scheme = value.to_lowercase(),
            UriField::User => self.user = optional,
            UriField::Subdomain => self.subdomain = optional.map(|s| s.to_lowercase()),
            UriField::Domain => self.domain = value.to_lowercase(),
            UriField::Tld => self.tld = value.to_lowercase(),
            UriField::Port => self.port = optional,
            UriField::Path => self.path = normalize_path(value),
            UriField::Query => self.query = parse_query(value.trim_start_matches('?')),
            UriField::Fragment => self.fragment = optional,
        }
        true
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://", self.scheme)?;
        if let Some(user) = &self.user {
            write!(f, "{user}@")?;
        }
        f.write_str(&self.host())?;
        if let Some(port) = &self.port {
            write!(f, ":{port}")?;
        }
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query_string())?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

impl PartialEq for Uri {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Uri {}

/// Splits a URI. See [`Uri::parse`].
#[must_use]
pub fn parse(raw: &str) -> Option<Uri> {
    Uri::parse(raw)
}

/// Strips one `delimiter` from the front or, failing that, the back of a
/// cut token.
fn delimited(token: Option<String>, delimiter: &str) -> Option<String> {
    token.map(|token| {
        token
            .strip_prefix(delimiter)
            .or_else(|| token.strip_suffix(delimiter))
            .unwrap_or(&token)
            .to_string()
    })
}

/// Resolves `.` and `..` segments and drops empty ones. The result is
/// always rooted.
fn normalize_path(raw: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }
    format!("/{}", segments.join("/"))
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value.into_owned(),
            None => pairs.push((key.into_owned(), value.into_owned())),
        }
    }
    pairs
}

fn encode(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

fn essential_subdomain(subdomain: Option<&str>) -> Option<&str> {
    subdomain.filter(|s| *s != DEFAULT_SUBDOMAIN)
}
