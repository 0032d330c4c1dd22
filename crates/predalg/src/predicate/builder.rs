use crate::{
    config::PredicateConfig,
    placeholder::Placeholder,
    predicate::{
        CollectionShape, ConcretePredicate, Connective, ConnectiveKind, Predicate, Relation,
        SymbolicPredicate, coercion::CoercionId,
    },
    value::Value,
};
use derive_more::From;

///
/// Argument
///
/// Builder input: either a plain value or a placeholder. A placeholder
/// argument produces a symbolic predicate, a value a concrete one.
///

#[derive(Clone, Debug, Eq, From, PartialEq)]
pub enum Argument {
    Value(Value),
    Placeholder(Placeholder),
}

impl Argument {
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    fn into_placeholder(self) -> Placeholder {
        match self {
            Self::Value(value) => Placeholder::of(value),
            Self::Placeholder(slot) => slot,
        }
    }
}

macro_rules! argument_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Argument {
                fn from(value: $ty) -> Self {
                    Self::Value(Value::from(value))
                }
            }
        )*
    };
}

argument_from_value!(bool, i32, i64, f64, &str, String);

///
/// PredicateBuilder
///
/// Construction surface for leaf, range, and membership predicates under
/// one coercion policy.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PredicateBuilder {
    coercion: CoercionId,
}

impl PredicateBuilder {
    #[must_use]
    pub const fn new(coercion: CoercionId) -> Self {
        Self { coercion }
    }

    #[must_use]
    pub const fn from_config(config: &PredicateConfig) -> Self {
        Self::new(config.coercion)
    }

    #[must_use]
    pub const fn coercion(&self) -> CoercionId {
        self.coercion
    }

    /// Leaf predicate for any relation, symbolic when `arg` is a placeholder.
    #[must_use]
    pub fn with_relation(self, relation: Relation, arg: impl Into<Argument>) -> Predicate {
        match arg.into() {
            Argument::Value(value) => {
                ConcretePredicate::with_coercion(relation, value, self.coercion).into()
            }
            Argument::Placeholder(slot) => {
                SymbolicPredicate::single(relation, slot, self.coercion).into()
            }
        }
    }

    #[must_use]
    pub fn eq(self, arg: impl Into<Argument>) -> Predicate {
        self.with_relation(Relation::Eq, arg)
    }

    #[must_use]
    pub fn neq(self, arg: impl Into<Argument>) -> Predicate {
        self.with_relation(Relation::Neq, arg)
    }

    #[must_use]
    pub fn lt(self, arg: impl Into<Argument>) -> Predicate {
        self.with_relation(Relation::Lt, arg)
    }

    #[must_use]
    pub fn lte(self, arg: impl Into<Argument>) -> Predicate {
        self.with_relation(Relation::Lte, arg)
    }

    #[must_use]
    pub fn gt(self, arg: impl Into<Argument>) -> Predicate {
        self.with_relation(Relation::Gt, arg)
    }

    #[must_use]
    pub fn gte(self, arg: impl Into<Argument>) -> Predicate {
        self.with_relation(Relation::Gte, arg)
    }

    /// Exclusive range: `gt(first) AND lt(second)`.
    #[must_use]
    pub fn inside(self, first: impl Into<Argument>, second: impl Into<Argument>) -> Predicate {
        self.range(
            ConnectiveKind::And,
            (Relation::Gt, first.into()),
            (Relation::Lt, second.into()),
        )
    }

    /// Outside the exclusive range: `lt(first) OR gt(second)`.
    #[must_use]
    pub fn outside(self, first: impl Into<Argument>, second: impl Into<Argument>) -> Predicate {
        self.range(
            ConnectiveKind::Or,
            (Relation::Lt, first.into()),
            (Relation::Gt, second.into()),
        )
    }

    /// Lower-inclusive range: `gte(first) AND lt(second)`.
    #[must_use]
    pub fn between(self, first: impl Into<Argument>, second: impl Into<Argument>) -> Predicate {
        self.range(
            ConnectiveKind::And,
            (Relation::Gte, first.into()),
            (Relation::Lt, second.into()),
        )
    }

    #[must_use]
    pub fn within<A: Into<Argument>>(self, items: impl IntoIterator<Item = A>) -> Predicate {
        self.membership(Relation::Within, CollectionShape::List, items)
    }

    #[must_use]
    pub fn without<A: Into<Argument>>(self, items: impl IntoIterator<Item = A>) -> Predicate {
        self.membership(Relation::Without, CollectionShape::List, items)
    }

    #[must_use]
    pub fn within_set<A: Into<Argument>>(self, items: impl IntoIterator<Item = A>) -> Predicate {
        self.membership(Relation::Within, CollectionShape::Set, items)
    }

    #[must_use]
    pub fn without_set<A: Into<Argument>>(self, items: impl IntoIterator<Item = A>) -> Predicate {
        self.membership(Relation::Without, CollectionShape::Set, items)
    }

    // Both bounds go symbolic when either one is a placeholder.
    fn range(
        self,
        kind: ConnectiveKind,
        (first_relation, first): (Relation, Argument),
        (second_relation, second): (Relation, Argument),
    ) -> Predicate {
        let (left, right) = if first.is_placeholder() || second.is_placeholder() {
            (
                Predicate::from(SymbolicPredicate::single(
                    first_relation,
                    first.into_placeholder(),
                    self.coercion,
                )),
                Predicate::from(SymbolicPredicate::single(
                    second_relation,
                    second.into_placeholder(),
                    self.coercion,
                )),
            )
        } else {
            (
                self.with_relation(first_relation, first),
                self.with_relation(second_relation, second),
            )
        };

        Connective::combine(kind, left, right).into()
    }

    // Any placeholder element makes the whole collection symbolic.
    fn membership<A: Into<Argument>>(
        self,
        relation: Relation,
        shape: CollectionShape,
        items: impl IntoIterator<Item = A>,
    ) -> Predicate {
        let args: Vec<Argument> = items.into_iter().map(Into::into).collect();

        if args.iter().any(Argument::is_placeholder) {
            let slots = args.into_iter().map(Argument::into_placeholder).collect();
            return SymbolicPredicate::many(relation, shape, slots, self.coercion).into();
        }

        let values = args.into_iter().map(|arg| match arg {
            Argument::Value(value) => value,
            Argument::Placeholder(slot) => slot.get(),
        });
        let collection = match shape {
            CollectionShape::List => Value::List(values.collect()),
            CollectionShape::Set => Value::set(values),
        };

        ConcretePredicate::with_coercion(relation, collection, self.coercion).into()
    }
}

///
/// Default-policy constructors
///

impl Predicate {
    #[must_use]
    pub fn with_relation(relation: Relation, arg: impl Into<Argument>) -> Self {
        PredicateBuilder::default().with_relation(relation, arg)
    }

    #[must_use]
    pub fn eq(arg: impl Into<Argument>) -> Self {
        PredicateBuilder::default().eq(arg)
    }

    #[must_use]
    pub fn neq(arg: impl Into<Argument>) -> Self {
        PredicateBuilder::default().neq(arg)
    }

    #[must_use]
    pub fn lt(arg: impl Into<Argument>) -> Self {
        PredicateBuilder::default().lt(arg)
    }

    #[must_use]
    pub fn lte(arg: impl Into<Argument>) -> Self {
        PredicateBuilder::default().lte(arg)
    }

    #[must_use]
    pub fn gt(arg: impl Into<Argument>) -> Self {
        PredicateBuilder::default().gt(arg)
    }

    #[must_use]
    pub fn gte(arg: impl Into<Argument>) -> Self {
        PredicateBuilder::default().gte(arg)
    }

    #[must_use]
    pub fn inside(first: impl Into<Argument>, second: impl Into<Argument>) -> Self {
        PredicateBuilder::default().inside(first, second)
    }

    #[must_use]
    pub fn outside(first: impl Into<Argument>, second: impl Into<Argument>) -> Self {
        PredicateBuilder::default().outside(first, second)
    }

    #[must_use]
    pub fn between(first: impl Into<Argument>, second: impl Into<Argument>) -> Self {
        PredicateBuilder::default().between(first, second)
    }

    #[must_use]
    pub fn within<A: Into<Argument>>(items: impl IntoIterator<Item = A>) -> Self {
        PredicateBuilder::default().within(items)
    }

    #[must_use]
    pub fn without<A: Into<Argument>>(items: impl IntoIterator<Item = A>) -> Self {
        PredicateBuilder::default().without(items)
    }

    #[must_use]
    pub fn within_set<A: Into<Argument>>(items: impl IntoIterator<Item = A>) -> Self {
        PredicateBuilder::default().within_set(items)
    }

    #[must_use]
    pub fn without_set<A: Into<Argument>>(items: impl IntoIterator<Item = A>) -> Self {
        PredicateBuilder::default().without_set(items)
    }
}
