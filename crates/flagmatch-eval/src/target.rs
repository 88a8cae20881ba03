//! Targeting rule data model.
//!
//! A [`TargetMatch`] is one declarative condition from the remote targeting
//! configuration, already decoded by the host SDK. The engine never retains
//! it beyond a single evaluation call.

use serde::{Deserialize, Serialize};

use crate::operator::Operator;
use crate::value::Value;
use crate::value_matcher::ValueType;

/// Whether a positive comparison result is returned as-is or negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    Match,
    NotMatch,
}

/// A single targeting condition: operator, declared value type, and the
/// ordered candidate values to compare against.
///
/// An empty `values` list is legal and never matches (before negation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetMatch {
    /// MATCH returns the comparison result as-is; NOT_MATCH negates it.
    #[serde(rename = "type")]
    pub match_type: MatchType,
    /// The comparison semantics to apply.
    pub operator: Operator,
    /// The declared semantic kind both sides are coerced to.
    #[serde(rename = "valueType")]
    pub value_type: ValueType,
    /// Candidate values; a runtime value matching ANY of them matches.
    pub values: Vec<Value>,
}

impl TargetMatch {
    /// Convenience constructor for building rules in code.
    pub fn new(
        match_type: MatchType,
        operator: Operator,
        value_type: ValueType,
        values: Vec<Value>,
    ) -> Self {
        TargetMatch {
            match_type,
            operator,
            value_type,
            values,
        }
    }
}
