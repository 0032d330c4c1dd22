use crate::{
    error::PredicateError,
    placeholder::Placeholder,
    predicate::{coercion::CoercionId, concrete::ConcretePredicate, relation::Relation},
    value::{Value, write_joined},
};
use std::{
    collections::HashSet,
    fmt::{self, Display},
    hash::{Hash, Hasher},
};
use tracing::debug;

///
/// CollectionShape
///
/// Container kind remembered by multi-slot predicates so that projection
/// rebuilds the same shape the caller supplied.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CollectionShape {
    List,
    Set,
}

impl CollectionShape {
    fn build(self, items: Vec<Value>) -> Value {
        match self {
            Self::List => Value::List(items),
            Self::Set => Value::set(items),
        }
    }
}

///
/// Slots
///
/// The placeholder(s) a symbolic predicate compares against. Exactly one
/// form is populated at any time.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Slots {
    Single(Placeholder),
    Many {
        shape: CollectionShape,
        items: Vec<Placeholder>,
    },
}

impl Slots {
    /// Wrap a plain value, spreading collections into one slot per element.
    fn from_value(value: Value) -> Self {
        match value {
            Value::List(items) => Self::wrap_all(CollectionShape::List, items),
            Value::Set(items) => Self::wrap_all(CollectionShape::Set, items),
            scalar => Self::Single(Placeholder::of(scalar)),
        }
    }

    fn wrap_all(shape: CollectionShape, items: Vec<Value>) -> Self {
        Self::Many {
            shape,
            items: items.into_iter().map(Placeholder::of).collect(),
        }
    }

    fn iter(&self) -> std::slice::Iter<'_, Placeholder> {
        match self {
            Self::Single(slot) => std::slice::from_ref(slot).iter(),
            Self::Many { items, .. } => items.iter(),
        }
    }

    fn any_variable(&self) -> bool {
        self.iter().any(Placeholder::is_variable)
    }

    fn any_named(&self, name: &str) -> bool {
        self.iter().any(|slot| slot.is_named(name))
    }

    /// Strip placeholders down to their carried values.
    #[must_use]
    pub fn project(&self) -> Value {
        match self {
            Self::Single(slot) => slot.get(),
            Self::Many { shape, items } => shape.build(items.iter().map(Placeholder::get).collect()),
        }
    }
}

impl Display for Slots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(slot) => write!(f, "{slot}"),
            Self::Many { shape, items } => {
                let (open, close) = match shape {
                    CollectionShape::List => ("[", "]"),
                    CollectionShape::Set => ("{", "}"),
                };
                f.write_str(open)?;
                write_joined(f, items)?;
                f.write_str(close)
            }
        }
    }
}

///
/// SymbolicPredicate
///
/// A relation bound to one or more placeholders. Not directly testable:
/// it must be reduced to a `ConcretePredicate` first.
///
/// `original` mirrors `slots` at construction and only changes through
/// `update_variable`, so the pre-binding form stays available for
/// explanation and reuse after `set_value`. Identity covers the relation,
/// the coercion policy and the live slots.
///

#[derive(Clone, Debug)]
pub struct SymbolicPredicate {
    relation: Relation,
    slots: Slots,
    original: Slots,
    coercion: CoercionId,
}

impl SymbolicPredicate {
    #[must_use]
    pub fn single(relation: Relation, slot: Placeholder, coercion: CoercionId) -> Self {
        Self::from_slots(relation, Slots::Single(slot), coercion)
    }

    #[must_use]
    pub fn many(
        relation: Relation,
        shape: CollectionShape,
        items: Vec<Placeholder>,
        coercion: CoercionId,
    ) -> Self {
        Self::from_slots(relation, Slots::Many { shape, items }, coercion)
    }

    fn from_slots(relation: Relation, slots: Slots, coercion: CoercionId) -> Self {
        Self {
            relation,
            original: slots.clone(),
            slots,
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

    /// Live slot form, placeholders included.
    #[must_use]
    pub const fn slots(&self) -> &Slots {
        &self.slots
    }

    #[must_use]
    pub const fn original_slots(&self) -> &Slots {
        &self.original
    }

    /// True while any live slot is unbound.
    #[must_use]
    pub fn is_parameterized(&self) -> bool {
        self.slots.any_variable()
    }

    /// Projection of the live slots.
    #[must_use]
    pub fn value(&self) -> Value {
        self.slots.project()
    }

    /// Projection of the construction-time slots.
    #[must_use]
    pub fn original_value(&self) -> Value {
        self.original.project()
    }

    /// Symbolic predicates are never evaluable.
    pub fn test(&self, _value: &Value) -> Result<bool, PredicateError> {
        Err(PredicateError::UnsupportedEvaluation {
            predicate: self.to_string(),
        })
    }

    /// Replace the live slots with plain-value wrappers.
    ///
    /// A collection switches to multi-slot form keeping its shape; anything
    /// else switches to single-slot form.
    pub fn set_value(&mut self, value: Value) {
        self.slots = Slots::from_value(value);
    }

    /// Adopt a placeholder directly as the single live slot.
    pub fn set_placeholder(&mut self, slot: Placeholder) {
        self.slots = Slots::Single(slot);
    }

    /// Bind every slot declared as `name`, live and original alike.
    ///
    /// Slots keep their declared name once bound, so a name can be rebound
    /// any number of times regardless of the order other names are bound
    /// in. Slot order is preserved. Returns the number of live slots rebound.
    pub fn update_variable(&mut self, name: &str, value: &Value) -> usize {
        if !self.slots.any_named(name) {
            return 0;
        }

        let bound = || Placeholder::bound(name, value.clone());
        let mut rebound = 0;

        match (&mut self.slots, &mut self.original) {
            (Slots::Single(slot), original) => {
                if slot.is_named(name) {
                    *slot = bound();
                    *original = Slots::Single(bound());
                    rebound = 1;
                }
            }
            (Slots::Many { items, .. }, original) => {
                for (idx, slot) in items.iter_mut().enumerate() {
                    if !slot.is_named(name) {
                        continue;
                    }
                    *slot = bound();
                    rebound += 1;

                    if let Slots::Many { items: originals, .. } = &mut *original {
                        if let Some(orig) = originals.get_mut(idx) {
                            *orig = bound();
                        }
                    }
                }
            }
        }

        if rebound > 0 {
            debug!(
                relation = self.relation.name(),
                variable = name,
                %value,
                rebound,
                "bound symbolic predicate variable"
            );
        }

        rebound
    }

    /// Collapse into a concrete predicate over the projected value.
    ///
    /// Unbound slots project as-is; callers must bind before reducing if they
    /// need a fully resolved result.
    #[must_use]
    pub fn reduce(&self) -> ConcretePredicate {
        debug!(predicate = %self, "reducing symbolic predicate");

        ConcretePredicate::with_coercion(self.relation, self.value(), self.coercion)
    }

    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            relation: self.relation.negate(),
            slots: self.slots.clone(),
            original: self.original.clone(),
            coercion: self.coercion,
        }
    }

    /// Unbound placeholders among the live slots.
    #[must_use]
    pub fn placeholders(&self) -> HashSet<Placeholder> {
        self.slots
            .iter()
            .filter(|slot| slot.is_variable())
            .cloned()
            .collect()
    }
}

impl PartialEq for SymbolicPredicate {
    fn eq(&self, other: &Self) -> bool {
        self.relation == other.relation
            && self.coercion == other.coercion
            && self.slots == other.slots
    }
}

impl Eq for SymbolicPredicate {}

impl Hash for SymbolicPredicate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.relation.hash(state);
        self.coercion.hash(state);
        self.slots.hash(state);
    }
}

impl Display for SymbolicPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.relation, self.slots)
    }
}
