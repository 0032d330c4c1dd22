use crate::{
    error::PredicateError,
    placeholder::Placeholder,
    predicate::Predicate,
    value::{Value, write_joined},
};
use derive_more::Display;
use std::{
    cell::OnceCell,
    collections::HashSet,
    fmt,
    hash::{Hash, Hasher},
};
use tracing::{debug, trace};

///
/// ConnectiveKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ConnectiveKind {
    #[display("and")]
    And,

    #[display("or")]
    Or,
}

impl ConnectiveKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// De Morgan dual.
    #[must_use]
    pub const fn dual(self) -> Self {
        match self {
            Self::And => Self::Or,
            Self::Or => Self::And,
        }
    }

    /// Child outcome that decides the whole connective on its own.
    const fn dominant(self) -> bool {
        match self {
            Self::And => false,
            Self::Or => true,
        }
    }
}

///
/// Connective
///
/// Ordered conjunction or disjunction over at least two child predicates.
///
/// Evaluation is three-valued: a child returning the dominant outcome
/// (`false` for AND, `true` for OR) decides immediately, while indeterminate
/// comparisons are deferred and only re-raised when nothing dominated.
///
/// Symbolic children are reduced once on first evaluation and the reduced
/// form is memoized in `reduced`. Rebinding invalidates the memo, and
/// clones start without one.
///
/// The memo is a `OnceCell`, so a connective (and any `Predicate` holding
/// one) is `Send` but not `Sync`. Share a compiled template across threads
/// by cloning it per thread rather than behind an `Arc`.
///

pub struct Connective {
    kind: ConnectiveKind,
    children: Vec<Predicate>,
    reduced: OnceCell<Vec<Predicate>>,
}

impl Connective {
    /// Build a connective, flattening children of the same kind.
    pub fn new(kind: ConnectiveKind, children: Vec<Predicate>) -> Result<Self, PredicateError> {
        if children.len() < 2 {
            return Err(PredicateError::Construction {
                kind: kind.name(),
                count: children.len(),
            });
        }

        let mut connective = Self::from_children(kind, Vec::with_capacity(children.len()));
        for child in children {
            connective.push_flat(child);
        }

        Ok(connective)
    }

    /// Combine two predicates, flattening either side when it already has
    /// this kind.
    #[must_use]
    pub fn combine(kind: ConnectiveKind, left: Predicate, right: Predicate) -> Self {
        let mut connective = Self::from_children(kind, Vec::new());
        connective.push_flat(left);
        connective.push_flat(right);

        connective
    }

    const fn from_children(kind: ConnectiveKind, children: Vec<Predicate>) -> Self {
        Self {
            kind,
            children,
            reduced: OnceCell::new(),
        }
    }

    fn push_flat(&mut self, child: Predicate) {
        match child {
            Predicate::Connective(inner) if inner.kind == self.kind => {
                self.children.extend(inner.children);
            }
            other => self.children.push(other),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ConnectiveKind {
        self.kind
    }

    #[must_use]
    pub fn children(&self) -> &[Predicate] {
        &self.children
    }

    #[must_use]
    pub fn is_parameterized(&self) -> bool {
        self.children.iter().any(Predicate::is_parameterized)
    }

    /// Evaluate the connective against one value.
    pub fn test(&self, value: &Value) -> Result<bool, PredicateError> {
        evaluate(self.kind, self.evaluable_children(), value)
    }

    // Children as they should be evaluated: reduced and memoized when any
    // direct child is still symbolic.
    fn evaluable_children(&self) -> &[Predicate] {
        if !self.children.iter().any(Predicate::is_symbolic) {
            return &self.children;
        }

        self.reduced.get_or_init(|| {
            debug!(
                connective = self.kind.name(),
                children = self.children.len(),
                "memoizing reduced connective children"
            );
            self.children.iter().map(Predicate::reduce).collect()
        })
    }

    /// De Morgan complement: dual kind over negated copies of the children.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self::from_children(
            self.kind.dual(),
            self.children.iter().map(Predicate::negate).collect(),
        )
    }

    /// Same kind over reduced children.
    #[must_use]
    pub fn reduce(&self) -> Self {
        Self::from_children(
            self.kind,
            self.children.iter().map(Predicate::reduce).collect(),
        )
    }

    /// Propagate a binding to every child. Returns the number of slots bound.
    pub fn update_variable(&mut self, name: &str, value: &Value) -> usize {
        self.reduced.take();

        self.children
            .iter_mut()
            .map(|child| child.update_variable(name, value))
            .sum()
    }

    /// Union of every child's unbound placeholders.
    #[must_use]
    pub fn placeholders(&self) -> HashSet<Placeholder> {
        self.children
            .iter()
            .flat_map(Predicate::placeholders)
            .collect()
    }
}

// Three-valued AND/OR over an ordered child list.
fn evaluate(
    kind: ConnectiveKind,
    children: &[Predicate],
    value: &Value,
) -> Result<bool, PredicateError> {
    let dominant = kind.dominant();
    let mut deferred: Option<PredicateError> = None;

    for child in children {
        match child.test(value) {
            Ok(outcome) if outcome == dominant => return Ok(dominant),
            Ok(_) => {}
            Err(err) if err.is_indeterminate() => {
                trace!(connective = kind.name(), error = %err, "deferring indeterminate child");
                deferred.get_or_insert(err);
            }
            Err(err) => return Err(err),
        }
    }

    match deferred {
        Some(err) => Err(err),
        None => Ok(!dominant),
    }
}

impl Clone for Connective {
    fn clone(&self) -> Self {
        Self::from_children(self.kind, self.children.clone())
    }
}

impl fmt::Debug for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connective")
            .field("kind", &self.kind)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Connective {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.children == other.children
    }
}

impl Eq for Connective {}

impl Hash for Connective {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.children.hash(state);
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind)?;
        write_joined(f, &self.children)?;
        f.write_str(")")
    }
}
