use crate::{
    error::PredicateError,
    placeholder::Placeholder,
    predicate::{Connective, ConnectiveKind, Predicate},
    value::Value,
};

// Ordering an int bound against text never resolves.
fn indeterminate() -> Predicate {
    Predicate::lt(5)
}

#[test]
fn new_requires_two_children() {
    let err = Connective::new(ConnectiveKind::And, vec![Predicate::eq(1)]).unwrap_err();

    assert_eq!(
        err,
        PredicateError::Construction {
            kind: "and",
            count: 1,
        }
    );
    assert!(Connective::new(ConnectiveKind::Or, Vec::new()).is_err());
}

#[test]
fn new_flattens_same_kind_children() {
    let inner = Predicate::eq(1).or(Predicate::eq(2));
    let connective =
        Connective::new(ConnectiveKind::Or, vec![inner, Predicate::eq(3)]).unwrap();

    assert_eq!(connective.children().len(), 3);
    assert_eq!(connective.to_string(), "or(eq(1), eq(2), eq(3))");
}

#[test]
fn chained_and_is_flat() {
    let predicate = Predicate::eq(1).and(Predicate::eq(2)).and(Predicate::eq(3));

    assert_eq!(predicate.children().map(<[_]>::len), Some(3));
}

#[test]
fn mixed_kinds_nest() {
    let predicate = Predicate::eq(1).and(Predicate::eq(2)).or(Predicate::eq(3));
    let children = predicate.children().unwrap();

    assert_eq!(children.len(), 2);
    assert_eq!(children[0].predicate_name(), "and");
}

#[test]
fn and_false_dominates_indeterminate() {
    let value = Value::text("y");
    let predicate = indeterminate().and(Predicate::eq("z"));

    assert!(!predicate.test(&value).unwrap());
}

#[test]
fn or_true_dominates_indeterminate() {
    let value = Value::text("y");
    let predicate = indeterminate().or(Predicate::eq("y"));

    assert!(predicate.test(&value).unwrap());
}

#[test]
fn undominated_indeterminate_is_raised() {
    let value = Value::text("y");

    let and = indeterminate().and(Predicate::eq("y"));
    let or = indeterminate().or(Predicate::eq("z"));
    let pure = indeterminate().and(Predicate::gt(1));

    assert!(and.test(&value).unwrap_err().is_indeterminate());
    assert!(or.test(&value).unwrap_err().is_indeterminate());
    assert!(matches!(
        pure.test(&value),
        Err(PredicateError::TypeIndeterminate { relation: "lt", .. })
    ));
}

#[test]
fn symbolic_children_are_reduced_before_evaluation() {
    let predicate = Predicate::eq(Placeholder::variable("x"));
    let symbolic_child = Connective::combine(ConnectiveKind::Or, predicate, Predicate::eq(1));

    assert!(symbolic_child.test(&Value::Int(1)).unwrap());
}

#[test]
fn equality_is_order_sensitive() {
    let left = Predicate::eq(1).and(Predicate::eq(2));
    let right = Predicate::eq(2).and(Predicate::eq(1));

    assert_ne!(left, right);
    assert_eq!(left, Predicate::eq(1).and(Predicate::eq(2)));
}

#[test]
fn negate_applies_de_morgan() {
    let predicate = Predicate::eq(1).and(Predicate::lt(5));
    let negated = predicate.negate();

    assert_eq!(negated, Predicate::neq(1).or(Predicate::gte(5)));
    assert_eq!(predicate.to_string(), "and(eq(1), lt(5))");
}

#[test]
fn set_value_is_ignored() {
    let mut predicate = Predicate::eq(1).and(Predicate::eq(2));
    let before = predicate.clone();
    predicate.set_value(Value::Int(9));

    assert_eq!(predicate, before);
    assert_eq!(predicate.value(), None);
}

#[test]
fn memo_is_invalidated_by_rebinding() {
    let mut predicate = Predicate::eq(Placeholder::variable("x")).and(Predicate::gt(0));

    // Unbound slots project to null, which equals nothing.
    assert!(!predicate.test(&Value::Int(1)).unwrap());

    assert_eq!(predicate.update_variable("x", &Value::Int(1)), 1);
    assert!(predicate.test(&Value::Int(1)).unwrap());
    assert!(!predicate.test(&Value::Int(2)).unwrap());
}
