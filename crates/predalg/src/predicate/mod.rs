//! Module: predicate
//! Responsibility: the predicate family (concrete, symbolic, connective) and
//! its shared operations.
//! Does not own: value comparison rules (see `coercion`) or holder plumbing.
//! Boundary: traversal steps build predicates here and call `test` only
//! after any symbolic leaves have been bound and reduced.

mod builder;
mod coercion;
mod concrete;
mod connective;
mod fingerprint;
mod relation;
mod symbolic;

#[cfg(test)]
mod tests;

pub use builder::{Argument, PredicateBuilder};
pub use coercion::{CoercionId, compare_eq, compare_order, contains};
pub use concrete::ConcretePredicate;
pub use connective::{Connective, ConnectiveKind};
pub use relation::{CompareFn, CustomRelation, Relation};
pub use symbolic::{CollectionShape, Slots, SymbolicPredicate};

use crate::{error::PredicateError, placeholder::Placeholder, value::Value};
use derive_more::From;
use std::{collections::HashSet, fmt};

///
/// Predicate
///
/// One node of a filter expression.
///
/// - `Concrete`: evaluable relation over a fixed value
/// - `Symbolic`: relation over placeholders; must be reduced before testing
/// - `Connective`: ordered AND/OR over two or more children
///
/// Parameterization is derived on demand from the live slots, so it never
/// drifts after rebinding.
///

#[derive(Clone, Debug, Eq, From, Hash, PartialEq)]
pub enum Predicate {
    Concrete(ConcretePredicate),
    Symbolic(SymbolicPredicate),
    Connective(Connective),
}

impl Predicate {
    /// Evaluate the predicate against one value.
    ///
    /// Fails with `UnsupportedEvaluation` on a symbolic predicate and with
    /// `TypeIndeterminate` when an undominated comparison had no answer.
    pub fn test(&self, value: &Value) -> Result<bool, PredicateError> {
        match self {
            Self::Concrete(p) => p.test(value),
            Self::Symbolic(p) => p.test(value),
            Self::Connective(p) => p.test(value),
        }
    }

    /// Logical complement; connectives swap kind per De Morgan.
    #[must_use]
    pub fn negate(&self) -> Self {
        match self {
            Self::Concrete(p) => Self::Concrete(p.negate()),
            Self::Symbolic(p) => Self::Symbolic(p.negate()),
            Self::Connective(p) => Self::Connective(p.negate()),
        }
    }

    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(predicate: &Self) -> Self {
        predicate.negate()
    }

    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::Connective(Connective::combine(ConnectiveKind::And, self, other))
    }

    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::Connective(Connective::combine(ConnectiveKind::Or, self, other))
    }

    /// AND with a dynamically-typed operand.
    pub fn try_and(self, other: impl Into<Operand>) -> Result<Self, PredicateError> {
        other.into().into_predicate("and").map(|other| self.and(other))
    }

    /// OR with a dynamically-typed operand.
    pub fn try_or(self, other: impl Into<Operand>) -> Result<Self, PredicateError> {
        other.into().into_predicate("or").map(|other| self.or(other))
    }

    /// Name of the relation, or of the connective kind.
    #[must_use]
    pub const fn predicate_name(&self) -> &'static str {
        match self {
            Self::Concrete(p) => p.relation().name(),
            Self::Symbolic(p) => p.relation().name(),
            Self::Connective(p) => p.kind().name(),
        }
    }

    #[must_use]
    pub const fn relation(&self) -> Option<Relation> {
        match self {
            Self::Concrete(p) => Some(p.relation()),
            Self::Symbolic(p) => Some(p.relation()),
            Self::Connective(_) => None,
        }
    }

    /// Current comparison value. Connectives carry none.
    #[must_use]
    pub fn value(&self) -> Option<Value> {
        match self {
            Self::Concrete(p) => Some(p.value().clone()),
            Self::Symbolic(p) => Some(p.value()),
            Self::Connective(_) => None,
        }
    }

    /// Construction-time comparison value. Connectives carry none.
    #[must_use]
    pub fn original_value(&self) -> Option<Value> {
        match self {
            Self::Concrete(p) => Some(p.original_value().clone()),
            Self::Symbolic(p) => Some(p.original_value()),
            Self::Connective(_) => None,
        }
    }

    /// Replace the comparison value of a leaf. Connectives ignore it.
    pub fn set_value(&mut self, value: Value) {
        match self {
            Self::Concrete(p) => p.set_value(value),
            Self::Symbolic(p) => p.set_value(value),
            Self::Connective(_) => {}
        }
    }

    /// Adopt a placeholder as the comparison value of a leaf.
    ///
    /// A symbolic leaf takes the slot directly, so an unbound placeholder
    /// parameterizes it again. A concrete leaf has no slots and takes the
    /// placeholder's projected value. Connectives ignore it.
    pub fn set_placeholder(&mut self, slot: Placeholder) {
        match self {
            Self::Concrete(p) => p.set_value(slot.get()),
            Self::Symbolic(p) => p.set_placeholder(slot),
            Self::Connective(_) => {}
        }
    }

    /// Child predicates of a connective.
    #[must_use]
    pub fn children(&self) -> Option<&[Self]> {
        match self {
            Self::Connective(p) => Some(p.children()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_symbolic(&self) -> bool {
        matches!(self, Self::Symbolic(_))
    }

    /// True while any placeholder reachable from this predicate is unbound.
    #[must_use]
    pub fn is_parameterized(&self) -> bool {
        match self {
            Self::Concrete(_) => false,
            Self::Symbolic(p) => p.is_parameterized(),
            Self::Connective(p) => p.is_parameterized(),
        }
    }

    /// Bind every unbound placeholder named `name`. Returns the slot count bound.
    pub fn update_variable(&mut self, name: &str, value: &Value) -> usize {
        match self {
            Self::Concrete(_) => 0,
            Self::Symbolic(p) => p.update_variable(name, value),
            Self::Connective(p) => p.update_variable(name, value),
        }
    }

    /// Every unbound placeholder reachable from this predicate.
    #[must_use]
    pub fn placeholders(&self) -> HashSet<Placeholder> {
        match self {
            Self::Concrete(_) => HashSet::new(),
            Self::Symbolic(p) => p.placeholders(),
            Self::Connective(p) => p.placeholders(),
        }
    }

    /// Collapse symbolic leaves into concrete ones. Idempotent on concrete trees.
    #[must_use]
    pub fn reduce(&self) -> Self {
        match self {
            Self::Concrete(p) => Self::Concrete(p.clone()),
            Self::Symbolic(p) => Self::Concrete(p.reduce()),
            Self::Connective(p) => Self::Connective(p.reduce()),
        }
    }

    /// Stable SHA-256 structural fingerprint, consistent with `Eq`.
    #[must_use]
    pub fn fingerprint(&self) -> [u8; 32] {
        fingerprint::fingerprint(self)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(p) => fmt::Display::fmt(p, f),
            Self::Symbolic(p) => fmt::Display::fmt(p, f),
            Self::Connective(p) => fmt::Display::fmt(p, f),
        }
    }
}

///
/// Operand
///
/// Dynamically-typed right-hand side for `try_and` / `try_or`, as produced
/// by callers that only know they hold "some argument".
///

#[derive(Clone, Debug, From)]
pub enum Operand {
    Predicate(Predicate),
    Value(Value),
    Placeholder(Placeholder),
}

impl Operand {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Predicate(_) => "predicate",
            Self::Value(_) => "value",
            Self::Placeholder(_) => "placeholder",
        }
    }

    fn into_predicate(self, operation: &'static str) -> Result<Predicate, PredicateError> {
        match self {
            Self::Predicate(predicate) => Ok(predicate),
            other => Err(PredicateError::TypeMismatch {
                operation,
                found: other.kind(),
            }),
        }
    }
}
