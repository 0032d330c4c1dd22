//! Predicate algebra for graph-traversal filters: relations, concrete and
//! symbolic predicates, AND/OR connectives with three-valued evaluation, and
//! deferred parameters that let one compiled filter be rebound many times.
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod holder;
pub mod placeholder;
pub mod predicate;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, configs, or holder plumbing are re-exported here.
///

pub mod prelude {
    pub use crate::{
        placeholder::Placeholder,
        predicate::{Argument, Predicate, PredicateBuilder, Relation},
        value::Value,
    };
}
