//! Module: predicate::coercion
//! Responsibility: value comparison semantics under explicit coercion policies.
//! Does not own: relation identity or three-valued combination.
//! Boundary: relations delegate every equality/ordering decision here.

use crate::value::Value;
use derive_more::Display;
use serde::Deserialize;
use std::cmp::Ordering;

///
/// CoercionId
///
/// Identifier for an explicit coercion policy.
///
/// Coercions express *how* two values may be compared. Equality never fails
/// under any policy; ordering is undefined (`None`) for operands the policy
/// cannot relate, which relations surface as an indeterminate comparison.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum CoercionId {
    #[display("strict")]
    Strict,

    #[default]
    #[display("numeric_widen")]
    NumericWiden,

    #[display("text_casefold")]
    TextCasefold,
}

impl CoercionId {
    const fn widens_numbers(self) -> bool {
        matches!(self, Self::NumericWiden)
    }

    const fn folds_case(self) -> bool {
        matches!(self, Self::TextCasefold)
    }
}

/// Perform equality comparison under an explicit coercion policy.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn compare_eq(left: &Value, right: &Value, coercion: CoercionId) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a))
            if coercion.widens_numbers() =>
        {
            cmp_int_float(*a, *b) == Some(Ordering::Equal)
        }
        (Value::Text(a), Value::Text(b)) => {
            if coercion.folds_case() {
                casefold(a) == casefold(b)
            } else {
                a == b
            }
        }
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b.iter())
                    .all(|(l, r)| compare_eq(l, r, coercion))
        }
        (Value::Set(a), Value::Set(b)) => {
            a.iter()
                .all(|l| b.iter().any(|r| compare_eq(l, r, coercion)))
                && b.iter()
                    .all(|r| a.iter().any(|l| compare_eq(l, r, coercion)))
        }
        _ => false,
    }
}

/// Perform ordering comparison under an explicit coercion policy.
///
/// Returns `None` when the operands have no defined order: mismatched
/// families, `Null`, NaN, and collections.
#[must_use]
pub fn compare_order(left: &Value, right: &Value, coercion: CoercionId) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Int(a), Value::Float(b)) if coercion.widens_numbers() => cmp_int_float(*a, *b),
        (Value::Float(a), Value::Int(b)) if coercion.widens_numbers() => {
            cmp_int_float(*b, *a).map(Ordering::reverse)
        }
        (Value::Text(a), Value::Text(b)) => {
            if coercion.folds_case() {
                Some(casefold(a).cmp(&casefold(b)))
            } else {
                Some(a.cmp(b))
            }
        }
        _ => None,
    }
}

/// Check whether `needle` equals any member of `haystack`.
///
/// A scalar haystack is treated as a one-element collection.
#[must_use]
pub fn contains(needle: &Value, haystack: &Value, coercion: CoercionId) -> bool {
    match haystack.as_collection() {
        Some(items) => items.iter().any(|item| compare_eq(needle, item, coercion)),
        None => compare_eq(needle, haystack, coercion),
    }
}

#[allow(clippy::cast_precision_loss)]
fn cmp_int_float(int: i64, float: f64) -> Option<Ordering> {
    (int as f64).partial_cmp(&float)
}

fn casefold(input: &str) -> String {
    if input.is_ascii() {
        return input.to_ascii_lowercase();
    }

    input.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_equality_is_symmetric_with_repeats() {
        let coercion = CoercionId::default();
        let repeated = Value::Set(vec![Value::Int(1), Value::Int(1)]);
        let pair = Value::Set(vec![Value::Int(1), Value::Int(2)]);

        assert!(!compare_eq(&repeated, &pair, coercion));
        assert!(!compare_eq(&pair, &repeated, coercion));
        assert!(compare_eq(&repeated, &Value::set(vec![Value::Float(1.0)]), coercion));
    }

    #[test]
    fn numeric_widen_relates_int_and_float() {
        let coercion = CoercionId::NumericWiden;

        assert!(compare_eq(&Value::Int(1), &Value::Float(1.0), coercion));
        assert_eq!(
            compare_order(&Value::Float(2.5), &Value::Int(2), coercion),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn strict_keeps_numeric_families_apart() {
        let coercion = CoercionId::Strict;

        assert!(!compare_eq(&Value::Int(1), &Value::Float(1.0), coercion));
        assert_eq!(
            compare_order(&Value::Int(1), &Value::Float(1.0), coercion),
            None
        );
    }

    #[test]
    fn casefold_applies_to_equality_and_order() {
        let coercion = CoercionId::TextCasefold;

        assert!(compare_eq(&Value::text("Marko"), &Value::text("MARKO"), coercion));
        assert_eq!(
            compare_order(&Value::text("alpha"), &Value::text("BETA"), coercion),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn null_and_nan_have_no_order() {
        let coercion = CoercionId::default();

        assert_eq!(compare_order(&Value::Null, &Value::Int(1), coercion), None);
        assert_eq!(
            compare_order(&Value::Float(f64::NAN), &Value::Float(1.0), coercion),
            None
        );
        assert!(!compare_eq(
            &Value::Float(f64::NAN),
            &Value::Float(f64::NAN),
            coercion
        ));
    }

    #[test]
    fn contains_accepts_scalar_haystack() {
        let coercion = CoercionId::default();

        assert!(contains(&Value::Int(2), &Value::from(vec![1, 2, 3]), coercion));
        assert!(contains(&Value::Int(2), &Value::Int(2), coercion));
        assert!(!contains(&Value::Int(5), &Value::set(vec![Value::Int(1)]), coercion));
    }
}
