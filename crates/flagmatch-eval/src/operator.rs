//! Operator comparison strategies and their registry.
//!
//! Every operator implements all four typed comparisons. Pairings with no
//! meaningful semantics (e.g. `CONTAINS` on a boolean) are a literal
//! `false`, which keeps the table exhaustive and compiler-checked instead of
//! relying on a panicking default.

use std::collections::HashMap;

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

use crate::version::Version;

// =============================================================================
// Operator tokens
// =============================================================================

/// Operator identifier as carried in the targeting payload.
///
/// Tokens are exact and case-sensitive. Anything else decodes to
/// [`Operator::Unknown`], which is never registered and therefore fails
/// closed at lookup instead of erroring the whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    In,
    Contains,
    StartsWith,
    EndsWith,
    Gt,
    Gte,
    Lt,
    Lte,
    /// An operator this engine version does not recognize.
    Unknown,
}

impl Operator {
    /// Map a wire token to an operator. Unrecognized tokens (including any
    /// case variation) map to [`Operator::Unknown`].
    pub fn from_token(token: &str) -> Operator {
        match token {
            "IN" => Operator::In,
            "CONTAINS" => Operator::Contains,
            "STARTS_WITH" => Operator::StartsWith,
            "ENDS_WITH" => Operator::EndsWith,
            "GT" => Operator::Gt,
            "GTE" => Operator::Gte,
            "LT" => Operator::Lt,
            "LTE" => Operator::Lte,
            _ => Operator::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D>(deserializer: D) -> Result<Operator, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Ok(Operator::from_token(&token))
    }
}

// =============================================================================
// Operator strategies
// =============================================================================

/// A single operator's comparison semantics across the four value kinds.
///
/// Implementations are stateless; one boxed instance per operator lives in
/// the registry for the process lifetime and is shared across threads.
pub trait OperatorMatcher: Send + Sync {
    /// Compare two strings.
    fn string_matches(&self, value: &str, target: &str) -> bool;
    /// Compare two numbers.
    fn number_matches(&self, value: f64, target: f64) -> bool;
    /// Compare two booleans.
    fn bool_matches(&self, value: bool, target: bool) -> bool;
    /// Compare two versions.
    fn version_matches(&self, value: Version, target: Version) -> bool;
}

/// `IN`: equality under every kind.
struct InMatcher;

impl OperatorMatcher for InMatcher {
    fn string_matches(&self, value: &str, target: &str) -> bool {
        value == target
    }

    fn number_matches(&self, value: f64, target: f64) -> bool {
        // Exact f64 equality: both sides have already been normalized to the
        // same representation, so 42 and 42.0 compare equal.
        value == target
    }

    fn bool_matches(&self, value: bool, target: bool) -> bool {
        value == target
    }

    fn version_matches(&self, value: Version, target: Version) -> bool {
        value == target
    }
}

/// `CONTAINS`: substring containment; strings only.
struct ContainsMatcher;

impl OperatorMatcher for ContainsMatcher {
    fn string_matches(&self, value: &str, target: &str) -> bool {
        value.contains(target)
    }

    fn number_matches(&self, _value: f64, _target: f64) -> bool {
        false
    }

    fn bool_matches(&self, _value: bool, _target: bool) -> bool {
        false
    }

    fn version_matches(&self, _value: Version, _target: Version) -> bool {
        false
    }
}

/// `STARTS_WITH`: prefix; strings only.
struct StartsWithMatcher;

impl OperatorMatcher for StartsWithMatcher {
    fn string_matches(&self, value: &str, target: &str) -> bool {
        value.starts_with(target)
    }

    fn number_matches(&self, _value: f64, _target: f64) -> bool {
        false
    }

    fn bool_matches(&self, _value: bool, _target: bool) -> bool {
        false
    }

    fn version_matches(&self, _value: Version, _target: Version) -> bool {
        false
    }
}

/// `ENDS_WITH`: suffix; strings only.
struct EndsWithMatcher;

impl OperatorMatcher for EndsWithMatcher {
    fn string_matches(&self, value: &str, target: &str) -> bool {
        value.ends_with(target)
    }

    fn number_matches(&self, _value: f64, _target: f64) -> bool {
        false
    }

    fn bool_matches(&self, _value: bool, _target: bool) -> bool {
        false
    }

    fn version_matches(&self, _value: Version, _target: Version) -> bool {
        false
    }
}

/// `GT`: strict ordering; never meaningful for booleans.
///
/// String ordering is byte-wise code-point comparison, case-sensitive —
/// `"a" > "A"` and `"9" > "10"`. No locale or numeric awareness.
struct GreaterThanMatcher;

impl OperatorMatcher for GreaterThanMatcher {
    fn string_matches(&self, value: &str, target: &str) -> bool {
        value > target
    }

    fn number_matches(&self, value: f64, target: f64) -> bool {
        value > target
    }

    fn bool_matches(&self, _value: bool, _target: bool) -> bool {
        false
    }

    fn version_matches(&self, value: Version, target: Version) -> bool {
        value > target
    }
}

/// `GTE`: ordering or equality; never meaningful for booleans.
struct GreaterThanOrEqualMatcher;

impl OperatorMatcher for GreaterThanOrEqualMatcher {
    fn string_matches(&self, value: &str, target: &str) -> bool {
        value >= target
    }

    fn number_matches(&self, value: f64, target: f64) -> bool {
        value >= target
    }

    fn bool_matches(&self, _value: bool, _target: bool) -> bool {
        false
    }

    fn version_matches(&self, value: Version, target: Version) -> bool {
        value >= target
    }
}

/// `LT`: strict ordering; never meaningful for booleans.
struct LessThanMatcher;

impl OperatorMatcher for LessThanMatcher {
    fn string_matches(&self, value: &str, target: &str) -> bool {
        value < target
    }

    fn number_matches(&self, value: f64, target: f64) -> bool {
        value < target
    }

    fn bool_matches(&self, _value: bool, _target: bool) -> bool {
        false
    }

    fn version_matches(&self, value: Version, target: Version) -> bool {
        value < target
    }
}

/// `LTE`: ordering or equality; never meaningful for booleans.
struct LessThanOrEqualMatcher;

impl OperatorMatcher for LessThanOrEqualMatcher {
    fn string_matches(&self, value: &str, target: &str) -> bool {
        value <= target
    }

    fn number_matches(&self, value: f64, target: f64) -> bool {
        value <= target
    }

    fn bool_matches(&self, _value: bool, _target: bool) -> bool {
        false
    }

    fn version_matches(&self, value: Version, target: Version) -> bool {
        value <= target
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Immutable operator-to-strategy table, built once at SDK startup.
///
/// Lookup misses ([`Operator::Unknown`]) are how unrecognized operators fail
/// closed: the evaluator treats a missing entry as "never matches".
pub struct OperatorMatcherRegistry {
    matchers: HashMap<Operator, Box<dyn OperatorMatcher>>,
}

impl OperatorMatcherRegistry {
    /// Build the registry with all eight operator strategies.
    pub fn new() -> Self {
        let mut matchers: HashMap<Operator, Box<dyn OperatorMatcher>> = HashMap::new();
        matchers.insert(Operator::In, Box::new(InMatcher));
        matchers.insert(Operator::Contains, Box::new(ContainsMatcher));
        matchers.insert(Operator::StartsWith, Box::new(StartsWithMatcher));
        matchers.insert(Operator::EndsWith, Box::new(EndsWithMatcher));
        matchers.insert(Operator::Gt, Box::new(GreaterThanMatcher));
        matchers.insert(Operator::Gte, Box::new(GreaterThanOrEqualMatcher));
        matchers.insert(Operator::Lt, Box::new(LessThanMatcher));
        matchers.insert(Operator::Lte, Box::new(LessThanOrEqualMatcher));
        OperatorMatcherRegistry { matchers }
    }

    /// Look up the strategy for an operator, if registered.
    pub fn get(&self, operator: Operator) -> Option<&dyn OperatorMatcher> {
        self.matchers.get(&operator).map(|m| m.as_ref())
    }
}

impl Default for OperatorMatcherRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ver(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn test_operator_tokens() {
        assert_eq!(Operator::from_token("IN"), Operator::In);
        assert_eq!(Operator::from_token("STARTS_WITH"), Operator::StartsWith);
        assert_eq!(Operator::from_token("GTE"), Operator::Gte);
        // Exact, case-sensitive
        assert_eq!(Operator::from_token("in"), Operator::Unknown);
        assert_eq!(Operator::from_token("MATCHES"), Operator::Unknown);
        assert_eq!(Operator::from_token(""), Operator::Unknown);
    }

    #[test]
    fn test_in_is_equality() {
        let m = InMatcher;
        assert!(m.string_matches("abc", "abc"));
        assert!(!m.string_matches("abc", "ABC"));
        assert!(m.number_matches(42.0, 42.0));
        assert!(!m.number_matches(42.0, 42.1));
        assert!(m.bool_matches(true, true));
        assert!(!m.bool_matches(true, false));
        assert!(m.version_matches(ver("1"), ver("1.0.0")));
        assert!(!m.version_matches(ver("1.0.0"), ver("2.0.0")));
    }

    #[test]
    fn test_contains_strings_only() {
        let m = ContainsMatcher;
        assert!(m.string_matches("superadmin", "admin"));
        assert!(!m.string_matches("user", "admin"));
        assert!(!m.number_matches(123.0, 2.0));
        assert!(!m.bool_matches(true, true));
        assert!(!m.version_matches(ver("1.2.3"), ver("1.2.3")));
    }

    #[test]
    fn test_starts_with_strings_only() {
        let m = StartsWithMatcher;
        assert!(m.string_matches("cmd.exe", "cmd"));
        assert!(!m.string_matches("xcmd", "cmd"));
        assert!(!m.number_matches(12.0, 1.0));
        assert!(!m.bool_matches(true, true));
        assert!(!m.version_matches(ver("1.2.0"), ver("1.2.0")));
    }

    #[test]
    fn test_ends_with_strings_only() {
        let m = EndsWithMatcher;
        assert!(m.string_matches("cmd.exe", ".exe"));
        assert!(!m.string_matches("cmd.bat", ".exe"));
        assert!(!m.number_matches(12.0, 2.0));
        assert!(!m.bool_matches(false, false));
        assert!(!m.version_matches(ver("1.2.0"), ver("1.2.0")));
    }

    #[test]
    fn test_string_ordering_is_byte_wise() {
        let gt = GreaterThanMatcher;
        // Uppercase sorts before lowercase
        assert!(gt.string_matches("a", "A"));
        // No numeric awareness of digit substrings
        assert!(gt.string_matches("9", "10"));
        assert!(gt.string_matches("43", "42"));
    }

    #[test]
    fn test_ordering_operators() {
        let gt = GreaterThanMatcher;
        let gte = GreaterThanOrEqualMatcher;
        let lt = LessThanMatcher;
        let lte = LessThanOrEqualMatcher;

        assert!(gt.number_matches(2.0, 1.0));
        assert!(!gt.number_matches(2.0, 2.0));
        assert!(gte.number_matches(2.0, 2.0));
        assert!(!gte.number_matches(1.0, 2.0));
        assert!(lt.number_matches(1.0, 2.0));
        assert!(!lt.number_matches(2.0, 2.0));
        assert!(lte.number_matches(2.0, 2.0));
        assert!(!lte.number_matches(3.0, 2.0));

        assert!(gt.version_matches(ver("3.0.0"), ver("2.0.0")));
        assert!(gte.version_matches(ver("2.0.0"), ver("2.0")));
        assert!(lt.version_matches(ver("2.0.0"), ver("2.0.1")));
        assert!(lte.version_matches(ver("2.0.0"), ver("2")));

        // Booleans never order
        assert!(!gt.bool_matches(true, false));
        assert!(!gte.bool_matches(true, true));
        assert!(!lt.bool_matches(false, true));
        assert!(!lte.bool_matches(false, false));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = OperatorMatcherRegistry::new();
        for op in [
            Operator::In,
            Operator::Contains,
            Operator::StartsWith,
            Operator::EndsWith,
            Operator::Gt,
            Operator::Gte,
            Operator::Lt,
            Operator::Lte,
        ] {
            assert!(registry.get(op).is_some(), "{op:?} should be registered");
        }
        assert!(registry.get(Operator::Unknown).is_none());
    }

    #[test]
    fn test_serde_tokens() {
        let op: Operator = serde_json::from_value(serde_json::json!("ENDS_WITH")).unwrap();
        assert_eq!(op, Operator::EndsWith);
        let unknown: Operator = serde_json::from_value(serde_json::json!("REGEX")).unwrap();
        assert_eq!(unknown, Operator::Unknown);
        assert_eq!(
            serde_json::to_value(Operator::StartsWith).unwrap(),
            serde_json::json!("STARTS_WITH")
        );
    }
}
