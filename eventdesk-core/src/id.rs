//! Opaque identifiers.
//!
//! The Event Store hands out numeric ids for seeded records, but string ids
//! show up too (older clients posted category ids as strings). An `Id`
//! keeps whichever JSON form it arrived in and compares by its text, so
//! `1` and `"1"` name the same record.

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Number(i64),
    Text(String),
}

impl Id {
    /// Textual form used for comparison, hashing and URL paths.
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            Id::Number(n) => Cow::Owned(n.to_string()),
            Id::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Id::Number(_) => false,
            Id::Text(s) => s.trim().is_empty(),
        }
    }
}

impl PartialEq for Id {
    fn eq(&self, other: &Self) -> bool {
        self.as_key() == other.as_key()
    }
}

impl Eq for Id {}

impl Hash for Id {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_key().hash(state);
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.as_key())
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or_else(|never: Infallible| match never {})
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::from(s.as_str())
    }
}

/// Canonical integers become `Id::Number`, anything else stays text, so
/// "007" or "+7" never turn into a different record's id.
impl FromStr for Id {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.parse::<i64>() {
            Ok(n) if n.to_string() == trimmed => Id::Number(n),
            _ => Id::Text(trimmed.to_string()),
        })
    }
}
