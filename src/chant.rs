//! Chant record types deserialized from the source JSON collection.

use serde::Deserialize;
use std::fmt;

/// Chant identifier as it appears in the source data.
///
/// GregoBase exports use numeric ids, but other collections use strings;
/// both are accepted and both render the same way into file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum ChantId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ChantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChantId::Number(n) => write!(f, "{}", n),
            ChantId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for ChantId {
    fn from(n: u64) -> Self {
        ChantId::Number(n)
    }
}

impl From<&str> for ChantId {
    fn from(s: &str) -> Self {
        ChantId::Text(s.to_string())
    }
}

/// One chant record from the source collection.
///
/// Every field is optional at the type level: a record missing its `id` must
/// still deserialize so it can be rejected per-record instead of aborting the
/// whole load. The `gabc` field holds a JSON-encoded array of `[tag, value]`
/// pairs; the entry tagged `"gabc"` carries the score text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Chant {
    #[serde(default)]
    pub id: Option<ChantId>,
    #[serde(default)]
    pub incipit: Option<String>,
    #[serde(rename = "office-part", default)]
    pub office_part: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub transcriber: Option<String>,
    #[serde(default)]
    pub gabc: Option<String>,
}

impl Chant {
    /// Display text for diagnostics: the incipit, or a placeholder.
    pub fn display_incipit(&self) -> &str {
        self.incipit.as_deref().unwrap_or("N/A")
    }
}
