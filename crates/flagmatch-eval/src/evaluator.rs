//! Top-level match evaluation.
//!
//! The evaluator resolves the two strategy registries, fans out over
//! sequence-valued attributes and over candidate values (logical OR in both
//! directions), and applies MATCH/NOT_MATCH negation last. Every failure
//! mode — unknown operator, unknown value type, coercion failure, empty
//! inputs — collapses to `false` before negation: malformed targeting data
//! must never grant a match.

use log::debug;

use crate::operator::{OperatorMatcher, OperatorMatcherRegistry};
use crate::target::{MatchType, TargetMatch};
use crate::value::Value;
use crate::value_matcher::{ValueMatcher, ValueMatcherRegistry};

/// The targeting match engine.
///
/// Holds the two build-once registries and nothing else; [`evaluate`] is a
/// pure function of its inputs, so a single `Evaluator` can be shared across
/// any number of threads without locking.
///
/// [`evaluate`]: Evaluator::evaluate
///
/// # Example
///
/// ```rust
/// use flagmatch_eval::{Evaluator, TargetMatch, Value};
/// use serde_json::json;
///
/// let evaluator = Evaluator::new();
/// let target: TargetMatch = serde_json::from_value(json!({
///     "type": "MATCH",
///     "operator": "IN",
///     "valueType": "STRING",
///     "values": ["US", "KR"]
/// }))
/// .unwrap();
///
/// assert!(evaluator.evaluate(&Value::from("KR"), &target));
/// assert!(!evaluator.evaluate(&Value::from("JP"), &target));
/// ```
pub struct Evaluator {
    value_matchers: ValueMatcherRegistry,
    operator_matchers: OperatorMatcherRegistry,
}

impl Evaluator {
    /// Build an evaluator with the default registries.
    pub fn new() -> Self {
        Evaluator {
            value_matchers: ValueMatcherRegistry::new(),
            operator_matchers: OperatorMatcherRegistry::new(),
        }
    }

    /// Build an evaluator from explicit registries.
    ///
    /// Registries are immutable after construction; build them before any
    /// concurrent use and no synchronization is needed.
    pub fn with_registries(
        value_matchers: ValueMatcherRegistry,
        operator_matchers: OperatorMatcherRegistry,
    ) -> Self {
        Evaluator {
            value_matchers,
            operator_matchers,
        }
    }

    /// Evaluate a runtime value against one targeting condition.
    ///
    /// A sequence value matches if ANY of its elements matches; a scalar
    /// matches if it satisfies ANY candidate in `target.values`. The result
    /// is negated iff `target.match_type` is [`MatchType::NotMatch`].
    pub fn evaluate(&self, value: &Value, target: &TargetMatch) -> bool {
        let matched = self.any_match(value, target);
        match target.match_type {
            MatchType::Match => matched,
            MatchType::NotMatch => !matched,
        }
    }

    /// The pre-negation comparison result.
    fn any_match(&self, value: &Value, target: &TargetMatch) -> bool {
        let Some(value_matcher) = self.value_matchers.get(target.value_type) else {
            debug!(
                "no value matcher registered for {:?}; treating as no-match",
                target.value_type
            );
            return false;
        };
        let Some(operator_matcher) = self.operator_matchers.get(target.operator) else {
            debug!(
                "no operator matcher registered for {:?}; treating as no-match",
                target.operator
            );
            return false;
        };

        match value.as_sequence() {
            Some(elements) => elements
                .iter()
                .any(|e| any_candidate(value_matcher, operator_matcher, e, &target.values)),
            None => any_candidate(value_matcher, operator_matcher, value, &target.values),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// OR over the candidate values for a single scalar runtime value.
fn any_candidate(
    value_matcher: &dyn ValueMatcher,
    operator_matcher: &dyn OperatorMatcher,
    value: &Value,
    candidates: &[Value],
) -> bool {
    candidates
        .iter()
        .any(|candidate| value_matcher.matches(operator_matcher, value, candidate))
}
