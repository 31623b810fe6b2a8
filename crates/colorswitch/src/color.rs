//! Hex colour validation and colour mapping construction.
//!
//! A colour mapping pairs the colours to look for in a stylesheet with the
//! colours that replace them. Both sides must be CSS hex colours:
//!
//! - 3 digit shorthand: `"#fff"`
//! - 6 digit: `"#ff6b35"`
//!
//! Letter case is accepted either way and kept as written, since the
//! substitution that consumes the mapping is a literal text replace.
//!
//! # Validation Policy
//!
//! A mapping is all or nothing. The first pair with an invalid key or value
//! discards every pair, including the valid ones already seen:
//!
//! ```rust
//! use colorswitch::ColorMapping;
//!
//! let raw = vec![
//!     ("#fff".to_string(), "#000".to_string()),
//!     ("#123456".to_string(), "notacolor".to_string()),
//! ];
//! let (mapping, error) = ColorMapping::build(&raw);
//! assert!(mapping.is_empty());
//! assert!(error.is_some());
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::MappingError;

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^#[0-9a-f]{3}([0-9a-f]{3})?$").expect("hex colour pattern is valid")
});

/// A CSS hex colour, stored exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Parses a hex colour, returning `None` if `s` is not `#` followed by
    /// 3 or 6 hex digits.
    pub fn parse(s: &str) -> Option<Self> {
        if Self::is_valid(s) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    /// Returns true if `s` is a 3 or 6 digit hex colour.
    pub fn is_valid(s: &str) -> bool {
        HEX_COLOR.is_match(s)
    }

    /// The colour text as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Index-aligned colour pairs: `from[i]` is replaced by `to[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColorMapping {
    from: Vec<HexColor>,
    to: Vec<HexColor>,
}

impl ColorMapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates raw `(from, to)` pairs and builds a mapping in the same order.
    ///
    /// On the first pair where either side is not a hex colour, returns an
    /// empty mapping together with the error naming that pair. Pairs after
    /// the offending one are not inspected.
    pub fn build<K, V>(raw: &[(K, V)]) -> (Self, Option<MappingError>)
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        match Self::try_build(raw) {
            Ok(mapping) => (mapping, None),
            Err(e) => (Self::new(), Some(e)),
        }
    }

    /// Like [`build`](Self::build), but returns the error instead of an
    /// empty mapping.
    pub fn try_build<K, V>(raw: &[(K, V)]) -> Result<Self, MappingError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut mapping = Self::new();
        for (key, value) in raw {
            let (key, value) = (key.as_ref(), value.as_ref());
            match (HexColor::parse(key), HexColor::parse(value)) {
                (Some(from), Some(to)) => {
                    mapping.from.push(from);
                    mapping.to.push(to);
                }
                _ => {
                    return Err(MappingError::InvalidColor {
                        key: key.to_string(),
                        value: value.to_string(),
                    })
                }
            }
        }
        Ok(mapping)
    }

    /// Colours to search for.
    pub fn from(&self) -> &[HexColor] {
        &self.from
    }

    /// Replacement colours, aligned with [`from`](Self::from).
    pub fn to(&self) -> &[HexColor] {
        &self.to
    }

    /// Iterates over `(from, to)` pairs in mapping order.
    pub fn pairs(&self) -> impl Iterator<Item = (&HexColor, &HexColor)> {
        self.from.iter().zip(self.to.iter())
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.from.len()
    }

    /// Returns true if the mapping has no pairs.
    pub fn is_empty(&self) -> bool {
        self.from.is_empty()
    }
}
