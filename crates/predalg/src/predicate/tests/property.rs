use crate::{
    placeholder::Placeholder,
    predicate::{Argument, ConnectiveKind, Predicate},
    value::Value,
};
use proptest::prelude::*;

fn arb_leaf() -> impl Strategy<Value = Predicate> {
    let bound = -20i64..20;

    prop_oneof![
        bound.clone().prop_map(Predicate::eq),
        bound.clone().prop_map(Predicate::neq),
        bound.clone().prop_map(Predicate::lt),
        bound.clone().prop_map(Predicate::lte),
        bound.clone().prop_map(Predicate::gt),
        bound.clone().prop_map(Predicate::gte),
        prop::collection::vec(bound.clone(), 0..4).prop_map(Predicate::within),
        prop::collection::vec(bound.clone(), 0..4).prop_map(Predicate::without_set),
        (bound.clone(), bound.clone()).prop_map(|(a, b)| Predicate::between(a, b)),
        (bound.clone(), bound).prop_map(|(a, b)| Predicate::outside(a, b)),
    ]
}

fn arb_predicate() -> impl Strategy<Value = Predicate> {
    arb_leaf().prop_recursive(3, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a.and(b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a.or(b)),
            inner.prop_map(|p| p.negate()),
        ]
    })
}

proptest! {
    #[test]
    fn negation_is_complement(predicate in arb_predicate(), x in -25i64..25) {
        let value = Value::Int(x);
        let positive = predicate.test(&value).unwrap();
        let negative = predicate.negate().test(&value).unwrap();

        prop_assert_eq!(negative, !positive);
    }

    #[test]
    fn double_negation_is_identity(predicate in arb_predicate()) {
        let twice = predicate.negate().negate();

        prop_assert_eq!(twice.fingerprint(), predicate.fingerprint());
        prop_assert_eq!(twice, predicate);
    }

    #[test]
    fn chained_and_flattens(leaves in prop::collection::vec(arb_leaf(), 2..8)) {
        // Leaves that are themselves conjunctions contribute all their children.
        let expected: usize = leaves
            .iter()
            .map(|leaf| match leaf {
                Predicate::Connective(c) if c.kind() == ConnectiveKind::And => c.children().len(),
                _ => 1,
            })
            .sum();

        let mut iter = leaves.into_iter();
        let first = iter.next().unwrap();
        let chained = iter.fold(first, Predicate::and);

        prop_assert_eq!(chained.children().map(<[_]>::len), Some(expected));
    }

    #[test]
    fn dominant_child_masks_indeterminate(position in 0usize..4, filler in 0usize..3) {
        let value = Value::text("y");
        let mut and_children = vec![Predicate::eq("y"); filler];
        let mut or_children = vec![Predicate::eq("z"); filler];
        and_children.insert(position.min(filler), Predicate::lt(5));
        or_children.insert(position.min(filler), Predicate::lt(5));

        let and = and_children
            .into_iter()
            .fold(Predicate::eq("z"), Predicate::and);
        let or = or_children
            .into_iter()
            .fold(Predicate::eq("y"), Predicate::or);

        prop_assert!(!and.test(&value).unwrap());
        prop_assert!(or.test(&value).unwrap());
    }

    #[test]
    fn rebinding_is_order_independent(a in any::<i64>(), b in any::<i64>(), c in any::<i64>()) {
        let template = Predicate::within([
            Argument::from(Placeholder::variable("x")),
            Argument::from(Placeholder::variable("y")),
        ]);
        let mut early = template.clone();
        let mut late = template;

        early.update_variable("x", &Value::Int(a));
        early.update_variable("x", &Value::Int(c));
        early.update_variable("y", &Value::Int(b));

        late.update_variable("x", &Value::Int(a));
        late.update_variable("y", &Value::Int(b));
        late.update_variable("x", &Value::Int(c));

        prop_assert_eq!(late.value(), Some(Value::from(vec![c, b])));
        prop_assert_eq!(late, early);
    }

    #[test]
    fn rebinding_round_trip(x in any::<i64>(), other in any::<i64>()) {
        let mut predicate = Predicate::within([
            Argument::from(Placeholder::variable("a")),
            Argument::from(other),
        ]);
        predicate.update_variable("a", &Value::Int(x));

        let reduced = predicate.reduce();
        prop_assert!(!reduced.is_parameterized());
        prop_assert_eq!(&reduced, &Predicate::within([x, other]));
        prop_assert!(reduced.test(&Value::Int(x)).unwrap());
        prop_assert!(reduced.test(&Value::Int(other)).unwrap());
    }
}
