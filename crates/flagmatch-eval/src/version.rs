//! Dotted numeric version parsing and ordering.
//!
//! Targeting rules compare app/SDK versions like `"2.3.0"`. The accepted
//! grammar is one to three dot-separated non-negative integers, optionally
//! followed by a `-` or `+` qualifier that is ignored by comparison
//! (`"1.2.3-beta"` orders the same as `"1.2.3"`). Omitted components default
//! to zero, so `"1"`, `"1.0"` and `"1.0.0"` are all equal.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::value::Value;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:[-+].*)?$").expect("version pattern is valid")
});

/// The input did not match the version grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version string: {input:?}")]
pub struct VersionParseError {
    input: String,
}

/// A parsed version, ordered componentwise by (major, minor, patch).
///
/// The derived `Ord` gives exactly the componentwise precedence the
/// targeting operators need; qualifiers are dropped at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Coerce a runtime value to a version.
    ///
    /// Only string values are accepted: an integer attribute never
    /// implicitly becomes a version, even when its string form would parse
    /// (`1` does not match a `VERSION`-typed rule listing `"1"`).
    pub fn from_value(value: &Value) -> Option<Version> {
        match value {
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Version, VersionParseError> {
        let caps = VERSION_RE.captures(s).ok_or_else(|| VersionParseError {
            input: s.to_string(),
        })?;
        let component = |i: usize| -> Result<u64, VersionParseError> {
            match caps.get(i) {
                Some(m) => m.as_str().parse().map_err(|_| VersionParseError {
                    input: s.to_string(),
                }),
                None => Ok(0),
            }
        };
        Ok(Version {
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
