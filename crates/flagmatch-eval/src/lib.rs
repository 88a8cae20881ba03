//! # flagmatch-eval
//!
//! Targeting match engine for feature-flag and experiment evaluation.
//!
//! Given a runtime attribute value and one declarative targeting condition
//! ([`TargetMatch`]), the engine decides whether the condition applies. It is
//! the evaluation core of a flag/experiment SDK: the host fetches and decodes
//! the remote targeting configuration, then calls [`Evaluator::evaluate`] on
//! every flag decision.
//!
//! ## Architecture
//!
//! - **[`Value`]**: tagged dynamic value produced once at the decode boundary.
//! - **[`Version`]**: dotted numeric versions with componentwise ordering.
//! - **Operator matchers**: one strategy per operator (`IN`, `CONTAINS`,
//!   `STARTS_WITH`, `ENDS_WITH`, `GT`, `GTE`, `LT`, `LTE`), each implementing
//!   the four typed comparisons.
//! - **Value matchers**: one coercion strategy per declared value type
//!   (`STRING`, `NUMBER`, `BOOLEAN`, `VERSION`; `JSON` aliases `STRING`).
//! - **[`Evaluator`]**: registry lookup, sequence/candidate fan-out (OR),
//!   and MATCH/NOT_MATCH negation.
//!
//! Everything fails closed: unknown operators or value types, coercion
//! failures and empty inputs all evaluate to "not matched" rather than an
//! error, so partially-unsupported configuration can never grant a match.
//!
//! ## Quick Start
//!
//! ```rust
//! use flagmatch_eval::{Evaluator, TargetMatch, Value};
//! use serde_json::json;
//!
//! // Built once at SDK startup, shared across threads.
//! let evaluator = Evaluator::new();
//!
//! // Decoded from the remote targeting payload by the host SDK.
//! let target: TargetMatch = serde_json::from_value(json!({
//!     "type": "MATCH",
//!     "operator": "GTE",
//!     "valueType": "VERSION",
//!     "values": ["2.3.0"]
//! }))
//! .unwrap();
//!
//! assert!(evaluator.evaluate(&Value::from("2.4.1"), &target));
//! assert!(!evaluator.evaluate(&Value::from("2.2.0"), &target));
//! ```

pub mod evaluator;
pub mod operator;
pub mod target;
pub mod value;
pub mod value_matcher;
pub mod version;

// Re-export the most commonly used types at crate root
pub use evaluator::Evaluator;
pub use operator::{Operator, OperatorMatcher, OperatorMatcherRegistry};
pub use target::{MatchType, TargetMatch};
pub use value::Value;
pub use value_matcher::{ValueMatcher, ValueMatcherRegistry, ValueType};
pub use version::{Version, VersionParseError};
