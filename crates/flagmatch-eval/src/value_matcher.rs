//! Value-type coercion strategies and their registry.
//!
//! A value matcher owns the coercion rules for one declared value type:
//! it converts both the runtime value and one candidate value to that kind,
//! then delegates the typed comparison to the supplied operator strategy.
//! If either side fails to coerce the pair is no-match — the operator is
//! never consulted.

use std::collections::HashMap;

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

use crate::operator::OperatorMatcher;
use crate::value::Value;
use crate::version::Version;

// =============================================================================
// Value-type tokens
// =============================================================================

/// Declared semantic type of a targeting comparison.
///
/// Tokens are exact and case-sensitive. Anything else decodes to
/// [`ValueType::Unknown`], which is never registered and fails closed at
/// lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Version,
    Json,
    /// A value type this engine version does not recognize.
    Unknown,
}

impl ValueType {
    /// Map a wire token to a value type. Unrecognized tokens map to
    /// [`ValueType::Unknown`].
    pub fn from_token(token: &str) -> ValueType {
        match token {
            "STRING" => ValueType::String,
            "NUMBER" => ValueType::Number,
            "BOOLEAN" => ValueType::Boolean,
            "VERSION" => ValueType::Version,
            "JSON" => ValueType::Json,
            _ => ValueType::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for ValueType {
    fn deserialize<D>(deserializer: D) -> Result<ValueType, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Ok(ValueType::from_token(&token))
    }
}

// =============================================================================
// Value matcher strategies
// =============================================================================

/// Coerce-then-compare strategy for one declared value type.
pub trait ValueMatcher: Send + Sync {
    /// `true` iff both sides coerce to this kind and the operator's typed
    /// comparison holds.
    fn matches(&self, operator: &dyn OperatorMatcher, value: &Value, target: &Value) -> bool;
}

struct StringValueMatcher;

impl ValueMatcher for StringValueMatcher {
    fn matches(&self, operator: &dyn OperatorMatcher, value: &Value, target: &Value) -> bool {
        match (value.as_string(), target.as_string()) {
            (Some(v), Some(t)) => operator.string_matches(&v, &t),
            _ => false,
        }
    }
}

struct NumberValueMatcher;

impl ValueMatcher for NumberValueMatcher {
    fn matches(&self, operator: &dyn OperatorMatcher, value: &Value, target: &Value) -> bool {
        match (value.as_number(), target.as_number()) {
            (Some(v), Some(t)) => operator.number_matches(v, t),
            _ => false,
        }
    }
}

struct BoolValueMatcher;

impl ValueMatcher for BoolValueMatcher {
    fn matches(&self, operator: &dyn OperatorMatcher, value: &Value, target: &Value) -> bool {
        match (value.as_bool(), target.as_bool()) {
            (Some(v), Some(t)) => operator.bool_matches(v, t),
            _ => false,
        }
    }
}

struct VersionValueMatcher;

impl ValueMatcher for VersionValueMatcher {
    fn matches(&self, operator: &dyn OperatorMatcher, value: &Value, target: &Value) -> bool {
        match (Version::from_value(value), Version::from_value(target)) {
            (Some(v), Some(t)) => operator.version_matches(v, t),
            _ => false,
        }
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Immutable value-type-to-strategy table, built once at SDK startup.
pub struct ValueMatcherRegistry {
    matchers: HashMap<ValueType, Box<dyn ValueMatcher>>,
}

impl ValueMatcherRegistry {
    /// Build the registry with all declared value types.
    ///
    /// `JSON` registers the string strategy: JSON-typed comparisons operate
    /// on the string form of the value, never on parsed structure.
    pub fn new() -> Self {
        let mut matchers: HashMap<ValueType, Box<dyn ValueMatcher>> = HashMap::new();
        matchers.insert(ValueType::String, Box::new(StringValueMatcher));
        matchers.insert(ValueType::Number, Box::new(NumberValueMatcher));
        matchers.insert(ValueType::Boolean, Box::new(BoolValueMatcher));
        matchers.insert(ValueType::Version, Box::new(VersionValueMatcher));
        matchers.insert(ValueType::Json, Box::new(StringValueMatcher));
        ValueMatcherRegistry { matchers }
    }

    /// Look up the strategy for a value type, if registered.
    pub fn get(&self, value_type: ValueType) -> Option<&dyn ValueMatcher> {
        self.matchers.get(&value_type).map(|m| m.as_ref())
    }
}

impl Default for ValueMatcherRegistry {
    fn default() -> Self {
        Self::new()
    }
}
