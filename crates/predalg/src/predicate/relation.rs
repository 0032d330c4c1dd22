use crate::{
    error::PredicateError,
    predicate::coercion::{CoercionId, compare_eq, compare_order, contains},
    value::Value,
};
use std::{
    cmp::Ordering,
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

///
/// CompareFn
///
/// Signature of a user-supplied relation body. The first operand is the
/// value under test, the second the predicate's bound value.
///

pub type CompareFn = fn(&Value, &Value, CoercionId) -> Result<bool, PredicateError>;

///
/// Relation
///
/// Named binary comparison with a defined logical negation.
///
/// Identity is the relation name: two relations are equal, and hash
/// equally, exactly when their names match. `negate().negate()` always
/// returns a relation equal to the original.
///

#[derive(Clone, Copy, Debug)]
pub enum Relation {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    Within,
    Without,
    Custom(CustomRelation),
}

impl Relation {
    /// Build a caller-defined relation with its own negation partner.
    #[must_use]
    pub const fn custom(
        name: &'static str,
        negated_name: &'static str,
        compare: CompareFn,
    ) -> Self {
        Self::Custom(CustomRelation {
            name,
            negated_name,
            compare,
            negated: false,
        })
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Within => "within",
            Self::Without => "without",
            Self::Custom(custom) => custom.name(),
        }
    }

    /// Logical complement of this relation.
    #[must_use]
    pub const fn negate(self) -> Self {
        match self {
            Self::Eq => Self::Neq,
            Self::Neq => Self::Eq,
            Self::Lt => Self::Gte,
            Self::Gte => Self::Lt,
            Self::Lte => Self::Gt,
            Self::Gt => Self::Lte,
            Self::Within => Self::Without,
            Self::Without => Self::Within,
            Self::Custom(custom) => Self::Custom(CustomRelation {
                negated: !custom.negated,
                ..custom
            }),
        }
    }

    /// Evaluate `left <relation> right` under a coercion policy.
    ///
    /// Ordering relations raise `TypeIndeterminate` when the operands have no
    /// defined order; equality and membership never do.
    pub fn compare(
        &self,
        left: &Value,
        right: &Value,
        coercion: CoercionId,
    ) -> Result<bool, PredicateError> {
        match self {
            Self::Eq => Ok(compare_eq(left, right, coercion)),
            Self::Neq => Ok(!compare_eq(left, right, coercion)),
            Self::Lt => self.ordered(left, right, coercion, Ordering::is_lt),
            Self::Lte => self.ordered(left, right, coercion, Ordering::is_le),
            Self::Gt => self.ordered(left, right, coercion, Ordering::is_gt),
            Self::Gte => self.ordered(left, right, coercion, Ordering::is_ge),
            Self::Within => Ok(contains(left, right, coercion)),
            Self::Without => Ok(!contains(left, right, coercion)),
            Self::Custom(custom) => {
                (custom.compare)(left, right, coercion).map(|matched| matched != custom.negated)
            }
        }
    }

    fn ordered(
        &self,
        left: &Value,
        right: &Value,
        coercion: CoercionId,
        accept: fn(Ordering) -> bool,
    ) -> Result<bool, PredicateError> {
        compare_order(left, right, coercion)
            .map(accept)
            .ok_or_else(|| PredicateError::indeterminate(self.name(), left, right))
    }
}

impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Relation {}

impl Hash for Relation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

///
/// CustomRelation
///
/// Caller-defined relation body plus the name pair used for negation.
/// The negated form inverts the body's boolean result; errors pass through.
///

#[derive(Clone, Copy)]
pub struct CustomRelation {
    name: &'static str,
    negated_name: &'static str,
    compare: CompareFn,
    negated: bool,
}

impl CustomRelation {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        if self.negated {
            self.negated_name
        } else {
            self.name
        }
    }
}

impl fmt::Debug for CustomRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRelation")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUILTINS: [Relation; 8] = [
        Relation::Eq,
        Relation::Neq,
        Relation::Lt,
        Relation::Lte,
        Relation::Gt,
        Relation::Gte,
        Relation::Within,
        Relation::Without,
    ];

    fn starts_with(left: &Value, right: &Value, _: CoercionId) -> Result<bool, PredicateError> {
        match (left, right) {
            (Value::Text(l), Value::Text(r)) => Ok(l.starts_with(r.as_str())),
            _ => Err(PredicateError::indeterminate("startingWith", left, right)),
        }
    }

    #[test]
    fn double_negation_is_identity() {
        for relation in BUILTINS {
            assert_eq!(relation.negate().negate(), relation);
            assert_ne!(relation.negate(), relation);
        }
    }

    #[test]
    fn negation_complements_determinate_results() {
        let coercion = CoercionId::default();
        let right = Value::Int(3);

        for relation in BUILTINS {
            for left in [Value::Int(1), Value::Int(3), Value::Float(4.5)] {
                let direct = relation.compare(&left, &right, coercion).unwrap();
                let negated = relation.negate().compare(&left, &right, coercion).unwrap();
                assert_eq!(direct, !negated, "{relation} on {left}");
            }
        }
    }

    #[test]
    fn ordering_mismatch_is_indeterminate() {
        let err = Relation::Lt
            .compare(&Value::text("a"), &Value::Int(1), CoercionId::default())
            .unwrap_err();

        assert!(err.is_indeterminate());
        assert!(
            Relation::Eq
                .compare(&Value::text("a"), &Value::Int(1), CoercionId::default())
                .is_ok()
        );
    }

    #[test]
    fn custom_relation_negates_by_name_and_result() {
        let relation = Relation::custom("startingWith", "notStartingWith", starts_with);
        let negated = relation.negate();
        let coercion = CoercionId::default();

        assert_eq!(negated.name(), "notStartingWith");
        assert_eq!(negated.negate(), relation);
        assert!(
            relation
                .compare(&Value::text("marko"), &Value::text("ma"), coercion)
                .unwrap()
        );
        assert!(
            !negated
                .compare(&Value::text("marko"), &Value::text("ma"), coercion)
                .unwrap()
        );
        assert!(
            negated
                .compare(&Value::Int(1), &Value::text("ma"), coercion)
                .unwrap_err()
                .is_indeterminate()
        );
    }
}
