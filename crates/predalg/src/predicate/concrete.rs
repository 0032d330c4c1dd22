use crate::{
    error::PredicateError,
    predicate::{coercion::CoercionId, relation::Relation},
    value::Value,
};
use std::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

///
/// ConcretePredicate
///
/// A relation bound to one fixed comparison value.
///
/// `original` is fixed at construction and, with the relation and coercion
/// policy, is the identity witness for equality and hashing. `current` is the value actually tested and may be
/// swapped by `set_value` without touching identity.
///

#[derive(Clone, Debug)]
pub struct ConcretePredicate {
    relation: Relation,
    original: Value,
    current: Value,
    coercion: CoercionId,
}

impl ConcretePredicate {
    #[must_use]
    pub fn new(relation: Relation, value: impl Into<Value>) -> Self {
        Self::with_coercion(relation, value, CoercionId::default())
    }

    #[must_use]
    pub fn with_coercion(relation: Relation, value: impl Into<Value>, coercion: CoercionId) -> Self {
        let value = value.into();

        Self {
            relation,
            original: value.clone(),
            current: value,
            coercion,
        }
    }

    #[must_use]
    pub const fn relation(&self) -> Relation {
        self.relation
    }

    #[must_use]
    pub const fn coercion(&self) -> CoercionId {
        self.coercion
    }

    /// Value currently used by `test`.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.current
    }

    /// Value supplied at construction.
    #[must_use]
    pub const fn original_value(&self) -> &Value {
        &self.original
    }

    /// Replace the tested value; the original stays untouched.
    pub fn set_value(&mut self, value: Value) {
        self.current = value;
    }

    /// Evaluate `value <relation> current`.
    pub fn test(&self, value: &Value) -> Result<bool, PredicateError> {
        self.relation.compare(value, &self.current, self.coercion)
    }

    /// Complement over the original value.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self::with_coercion(self.relation.negate(), self.original.clone(), self.coercion)
    }
}

impl PartialEq for ConcretePredicate {
    fn eq(&self, other: &Self) -> bool {
        self.relation == other.relation
            && self.coercion == other.coercion
            && self.original == other.original
    }
}

impl Eq for ConcretePredicate {}

impl Hash for ConcretePredicate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.relation.hash(state);
        self.coercion.hash(state);
        self.original.hash(state);
    }
}

impl Display for ConcretePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.relation, self.original)
    }
}
