use crate::value::Value;
use thiserror::Error as ThisError;

///
/// PredicateError
///
/// Failure raised while building, combining, or evaluating predicates.
///
/// Only `TypeIndeterminate` is ever recovered locally: connectives defer it
/// while looking for a dominant sibling outcome. Every other kind propagates
/// to the caller unchanged and is never retried here.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PredicateError {
    #[error("{kind} requires at least two child predicates: {count}")]
    Construction { kind: &'static str, count: usize },

    #[error("only predicates can be combined with {operation}; found {found}")]
    TypeMismatch {
        operation: &'static str,
        found: &'static str,
    },

    #[error("{predicate} is symbolic and must be reduced before it can be tested")]
    UnsupportedEvaluation { predicate: String },

    #[error("{relation} cannot compare {left} ({left_kind}) with {right} ({right_kind})")]
    TypeIndeterminate {
        relation: &'static str,
        left: Value,
        left_kind: &'static str,
        right: Value,
        right_kind: &'static str,
    },
}

impl PredicateError {
    /// Construct an indeterminate-comparison error for two operands.
    pub(crate) fn indeterminate(relation: &'static str, left: &Value, right: &Value) -> Self {
        Self::TypeIndeterminate {
            relation,
            left: left.clone(),
            left_kind: left.kind(),
            right: right.clone(),
            right_kind: right.kind(),
        }
    }

    /// True for the one kind connectives may defer.
    #[must_use]
    pub const fn is_indeterminate(&self) -> bool {
        matches!(self, Self::TypeIndeterminate { .. })
    }
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid predicate config: {0}")]
    Parse(#[from] toml::de::Error),
}
