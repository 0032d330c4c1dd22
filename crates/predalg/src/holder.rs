use crate::{placeholder::Placeholder, predicate::Predicate, value::Value};
use std::collections::HashSet;
use tracing::debug;

///
/// PredicateHolder
///
/// Capability trait for anything that owns a collection of predicates,
/// such as a filter step. Implementors expose the collection; parameter
/// binding and reduction are provided on top of it.
///

pub trait PredicateHolder {
    fn predicates(&self) -> &[Predicate];

    fn predicates_mut(&mut self) -> &mut [Predicate];

    /// True while any held predicate has an unbound placeholder.
    fn is_parameterized(&self) -> bool {
        self.predicates().iter().any(Predicate::is_parameterized)
    }

    /// Bind `name` across every held predicate. Returns the slot count bound.
    fn update_variable(&mut self, name: &str, value: &Value) -> usize {
        self.predicates_mut()
            .iter_mut()
            .map(|predicate| predicate.update_variable(name, value))
            .sum()
    }

    /// Union of the unbound placeholders of every held predicate.
    fn placeholders(&self) -> HashSet<Placeholder> {
        self.predicates()
            .iter()
            .flat_map(Predicate::placeholders)
            .collect()
    }

    /// Replace every held predicate with its reduced form.
    fn reduce(&mut self) {
        let predicates = self.predicates_mut();
        debug!(count = predicates.len(), "reducing held predicates");

        for predicate in predicates {
            *predicate = predicate.reduce();
        }
    }
}

impl PredicateHolder for Vec<Predicate> {
    fn predicates(&self) -> &[Predicate] {
        self
    }

    fn predicates_mut(&mut self) -> &mut [Predicate] {
        self
    }
}
