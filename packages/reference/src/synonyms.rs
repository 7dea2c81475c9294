#![allow(clippy::too_many_lines)]
//! Street type and directional synonym tables.
//!
//! Both tables map every accepted spelling of a token (abbreviation, full
//! word, common misspelling) to its canonical USPS abbreviation, so that
//! "STREET", "STR" and "ST" all canonicalize to "st".

use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Street types as `(USPS abbreviation, full name, other accepted spellings)`.
///
/// Source: USPS Publication 28 (Appendix C) street suffix abbreviations.
const STREET_TYPES: &[(&str, &str, &[&str])] = &[
    ("aly", "alley", &["allee", "ally"]),
    ("anx", "annex", &["anex", "annx"]),
    ("arc", "arcade", &[]),
    ("ave", "avenue", &["av", "aven", "avenu", "avn", "avnue"]),
    ("byu", "bayou", &["bayoo"]),
    ("bch", "beach", &[]),
    ("bnd", "bend", &[]),
    ("blf", "bluff", &["bluf"]),
    ("blfs", "bluffs", &[]),
    ("btm", "bottom", &["bot", "bottm"]),
    ("blvd", "boulevard", &["blv", "boul", "boulv"]),
    ("br", "branch", &["brnch"]),
    ("brg", "bridge", &["brdge"]),
    ("brk", "brook", &[]),
    ("brks", "brooks", &[]),
    ("bg", "burg", &[]),
    ("bgs", "burgs", &[]),
    ("byp", "bypass", &["bypa", "bypas", "byps"]),
    ("cp", "camp", &["cmp"]),
    ("cyn", "canyon", &["canyn", "cnyn"]),
    ("cpe", "cape", &[]),
    ("cswy", "causeway", &["causwa"]),
    ("ctr", "center", &["cen", "cent", "centr", "centre", "cnter", "cntr"]),
    ("ctrs", "centers", &[]),
    ("cir", "circle", &["circ", "circl", "crcl", "crcle"]),
    ("cirs", "circles", &[]),
    ("clf", "cliff", &[]),
    ("clfs", "cliffs", &[]),
    ("clb", "club", &[]),
    ("cmn", "common", &[]),
    ("cmns", "commons", &[]),
    ("cor", "corner", &[]),
    ("cors", "corners", &[]),
    ("crse", "course", &[]),
    ("ct", "court", &[]),
    ("cts", "courts", &[]),
    ("cv", "cove", &[]),
    ("cvs", "coves", &[]),
    ("crk", "creek", &[]),
    ("cres", "crescent", &["crsent", "crsnt"]),
    ("crst", "crest", &[]),
    ("xing", "crossing", &["crssng"]),
    ("xrd", "crossroad", &[]),
    ("xrds", "crossroads", &[]),
    ("curv", "curve", &[]),
    ("dl", "dale", &[]),
    ("dm", "dam", &[]),
    ("dv", "divide", &["div", "dvd"]),
    ("dr", "drive", &["driv", "drv"]),
    ("drs", "drives", &[]),
    ("est", "estate", &[]),
    ("ests", "estates", &[]),
    ("expy", "expressway", &["exp", "expr", "express", "expw"]),
    ("ext", "extension", &["extn", "extnsn"]),
    ("exts", "extensions", &[]),
    ("fls", "falls", &[]),
    ("fry", "ferry", &["frry"]),
    ("fld", "field", &[]),
    ("flds", "fields", &[]),
    ("flt", "flat", &[]),
    ("flts", "flats", &[]),
    ("frd", "ford", &[]),
    ("frds", "fords", &[]),
    ("frst", "forest", &["forests"]),
    ("frg", "forge", &["forg"]),
    ("frgs", "forges", &[]),
    ("frk", "fork", &[]),
    ("frks", "forks", &[]),
    ("ft", "fort", &["frt"]),
    ("fwy", "freeway", &["freewy", "frway", "frwy"]),
    ("gdn", "garden", &["gardn", "grden", "grdn"]),
    ("gdns", "gardens", &["grdns"]),
    ("gtwy", "gateway", &["gatewy", "gatway", "gtway"]),
    ("gln", "glen", &[]),
    ("glns", "glens", &[]),
    ("grn", "green", &[]),
    ("grns", "greens", &[]),
    ("grv", "grove", &["grov"]),
    ("grvs", "groves", &[]),
    ("hbr", "harbor", &["harb", "harbr", "hrbor"]),
    ("hbrs", "harbors", &[]),
    ("hvn", "haven", &[]),
    ("hts", "heights", &["ht"]),
    ("hwy", "highway", &["highwy", "hiway", "hiwy", "hway"]),
    ("hl", "hill", &[]),
    ("hls", "hills", &[]),
    ("holw", "hollow", &["hllw", "hollows", "holws"]),
    ("inlt", "inlet", &[]),
    ("is", "island", &["islnd"]),
    ("iss", "islands", &["islnds"]),
    ("isle", "isle", &["isles"]),
    ("jct", "junction", &["jction", "jctn", "junctn", "juncton"]),
    ("jcts", "junctions", &["jctns"]),
    ("ky", "key", &[]),
    ("kys", "keys", &[]),
    ("knl", "knoll", &["knol"]),
    ("knls", "knolls", &[]),
    ("lk", "lake", &[]),
    ("lks", "lakes", &[]),
    ("land", "land", &[]),
    ("lndg", "landing", &["lndng"]),
    ("ln", "lane", &[]),
    ("lgt", "light", &[]),
    ("lgts", "lights", &[]),
    ("lf", "loaf", &[]),
    ("lck", "lock", &[]),
    ("lcks", "locks", &[]),
    ("ldg", "lodge", &["ldge", "lodg"]),
    ("loop", "loop", &["loops"]),
    ("mall", "mall", &[]),
    ("mnr", "manor", &[]),
    ("mnrs", "manors", &[]),
    ("mdw", "meadow", &[]),
    ("mdws", "meadows", &["medows"]),
    ("mews", "mews", &[]),
    ("ml", "mill", &[]),
    ("mls", "mills", &[]),
    ("msn", "mission", &["missn", "mssn"]),
    ("mtwy", "motorway", &[]),
    ("mt", "mount", &["mnt"]),
    ("mtn", "mountain", &["mntain", "mntn", "mountin", "mtin"]),
    ("mtns", "mountains", &["mntns"]),
    ("nck", "neck", &[]),
    ("orch", "orchard", &["orchrd"]),
    ("oval", "oval", &["ovl"]),
    ("opas", "overpass", &[]),
    ("park", "park", &["prk", "parks"]),
    ("pkwy", "parkway", &["parkwy", "pkway", "pky", "parkways", "pkwys"]),
    ("pass", "pass", &[]),
    ("psge", "passage", &[]),
    ("path", "path", &["paths"]),
    ("pike", "pike", &["pikes"]),
    ("pne", "pine", &[]),
    ("pnes", "pines", &[]),
    ("pl", "place", &[]),
    ("pln", "plain", &[]),
    ("plns", "plains", &[]),
    ("plz", "plaza", &["plza"]),
    ("pt", "point", &[]),
    ("pts", "points", &[]),
    ("prt", "port", &[]),
    ("prts", "ports", &[]),
    ("pr", "prairie", &["prr"]),
    ("radl", "radial", &["rad", "radiel"]),
    ("ramp", "ramp", &[]),
    ("rnch", "ranch", &["ranches", "rnchs"]),
    ("rpd", "rapid", &[]),
    ("rpds", "rapids", &[]),
    ("rst", "rest", &[]),
    ("rdg", "ridge", &["rdge"]),
    ("rdgs", "ridges", &[]),
    ("riv", "river", &["rvr", "rivr"]),
    ("rd", "road", &[]),
    ("rds", "roads", &[]),
    ("rte", "route", &[]),
    ("row", "row", &[]),
    ("rue", "rue", &[]),
    ("run", "run", &[]),
    ("shl", "shoal", &[]),
    ("shls", "shoals", &[]),
    ("shr", "shore", &["shoar"]),
    ("shrs", "shores", &["shoars"]),
    ("skwy", "skyway", &[]),
    ("spg", "spring", &["spng", "sprng"]),
    ("spgs", "springs", &["spngs", "sprngs"]),
    ("spur", "spur", &["spurs"]),
    ("sq", "square", &["sqr", "sqre", "squ"]),
    ("sqs", "squares", &["sqrs"]),
    ("sta", "station", &["statn", "stn"]),
    ("stra", "stravenue", &["strav", "straven", "stravn", "strvn", "strvnue"]),
    ("strm", "stream", &["streme"]),
    ("st", "street", &["str", "strt"]),
    ("sts", "streets", &[]),
    ("smt", "summit", &["sumit", "sumitt"]),
    ("ter", "terrace", &["terr"]),
    ("trwy", "throughway", &[]),
    ("trce", "trace", &["traces"]),
    ("trak", "track", &["tracks", "trk", "trks"]),
    ("trfy", "trafficway", &[]),
    ("trl", "trail", &["trails", "trls"]),
    ("trlr", "trailer", &["trlrs"]),
    ("tunl", "tunnel", &["tunel", "tunls", "tunnels", "tunnl"]),
    ("tpke", "turnpike", &["trnpk", "turnpk"]),
    ("upas", "underpass", &[]),
    ("un", "union", &[]),
    ("uns", "unions", &[]),
    ("vly", "valley", &["vally", "vlly"]),
    ("vlys", "valleys", &[]),
    ("via", "viaduct", &["vdct", "viadct"]),
    ("vw", "view", &[]),
    ("vws", "views", &[]),
    ("vlg", "village", &["vill", "villag", "villg", "villiage"]),
    ("vlgs", "villages", &[]),
    ("vl", "ville", &[]),
    ("vis", "vista", &["vist", "vst", "vsta"]),
    ("walk", "walk", &["walks"]),
    ("wall", "wall", &[]),
    ("way", "way", &["wy"]),
    ("ways", "ways", &[]),
    ("wl", "well", &[]),
    ("wls", "wells", &[]),
];

/// Directionals as `(abbreviation, full name)`.
const DIRECTIONALS: &[(&str, &str)] = &[
    ("n", "north"),
    ("s", "south"),
    ("e", "east"),
    ("w", "west"),
    ("ne", "northeast"),
    ("nw", "northwest"),
    ("se", "southeast"),
    ("sw", "southwest"),
];

/// Every street type spelling mapped to its USPS abbreviation.
static STREET_TYPE_LOOKUP: LazyLock<BTreeMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        let mut lookup = BTreeMap::new();
        for (abbr, full, others) in STREET_TYPES {
            lookup.insert(*abbr, *abbr);
            lookup.insert(*full, *abbr);
            for other in *others {
                lookup.insert(*other, *abbr);
            }
        }
        lookup
    });

/// Every directional spelling mapped to its abbreviation.
static DIRECTIONAL_LOOKUP: LazyLock<BTreeMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        let mut lookup = BTreeMap::new();
        for (abbr, full) in DIRECTIONALS {
            lookup.insert(*abbr, *abbr);
            lookup.insert(*full, *abbr);
        }
        lookup
    });

/// Resolves any spelling of a street type to its USPS abbreviation.
///
/// Lookup is case-insensitive and ignores trailing periods, so `"St."`,
/// `"street"` and `"STR"` all return `Some("st")`.
#[must_use]
pub fn street_type_abbr(token: &str) -> Option<&'static str> {
    let key = token.trim().trim_end_matches('.').to_lowercase();
    STREET_TYPE_LOOKUP.get(key.as_str()).copied()
}

/// Resolves any spelling of a directional to its abbreviation.
#[must_use]
pub fn directional_abbr(token: &str) -> Option<&'static str> {
    let key = token.trim().trim_end_matches('.').to_lowercase();
    DIRECTIONAL_LOOKUP.get(key.as_str()).copied()
}

/// The flattened list of every street type spelling, for building the
/// street type recognition pattern.
pub fn street_type_keys() -> impl Iterator<Item = &'static str> {
    STREET_TYPE_LOOKUP.keys().copied()
}

/// Every directional spelling, abbreviations and full names.
pub fn directional_keys() -> impl Iterator<Item = &'static str> {
    DIRECTIONAL_LOOKUP.keys().copied()
}
