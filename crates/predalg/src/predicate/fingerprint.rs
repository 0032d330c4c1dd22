use crate::{
    placeholder::Placeholder,
    predicate::{CoercionId, CollectionShape, Predicate, Slots},
    value::{Value, float_bits},
};
use sha2::{Digest, Sha256};

/// Hash predicate structure into a 32-byte digest.
pub(super) fn fingerprint(predicate: &Predicate) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hash_predicate(&mut hasher, predicate);

    hasher.finalize().into()
}

fn hash_predicate(hasher: &mut Sha256, predicate: &Predicate) {
    match predicate {
        Predicate::Concrete(concrete) => {
            write_tag(hasher, 0x21);
            write_str(hasher, concrete.relation().name());
            write_coercion(hasher, concrete.coercion());
            write_value(hasher, concrete.original_value());
        }
        Predicate::Symbolic(symbolic) => {
            write_tag(hasher, 0x22);
            write_str(hasher, symbolic.relation().name());
            write_coercion(hasher, symbolic.coercion());
            write_slots(hasher, symbolic.slots());
        }
        Predicate::Connective(connective) => {
            write_tag(hasher, 0x23);
            write_str(hasher, connective.kind().name());
            write_len_u32(hasher, connective.children().len());
            for child in connective.children() {
                hash_predicate(hasher, child);
            }
        }
    }
}

fn write_coercion(hasher: &mut Sha256, coercion: CoercionId) {
    write_tag(
        hasher,
        match coercion {
            CoercionId::Strict => 0x50,
            CoercionId::NumericWiden => 0x51,
            CoercionId::TextCasefold => 0x52,
        },
    );
}

fn write_slots(hasher: &mut Sha256, slots: &Slots) {
    match slots {
        Slots::Single(slot) => {
            write_tag(hasher, 0x31);
            write_placeholder(hasher, slot);
        }
        Slots::Many { shape, items } => {
            write_tag(
                hasher,
                match shape {
                    CollectionShape::List => 0x32,
                    CollectionShape::Set => 0x33,
                },
            );
            write_len_u32(hasher, items.len());
            for item in items {
                write_placeholder(hasher, item);
            }
        }
    }
}

fn write_placeholder(hasher: &mut Sha256, slot: &Placeholder) {
    match slot.name() {
        Some(name) => {
            write_tag(hasher, 0x01);
            write_str(hasher, name);
        }
        None => write_tag(hasher, 0x00),
    }

    match slot.value() {
        Some(value) => {
            write_tag(hasher, 0x01);
            write_value(hasher, value);
        }
        None => write_tag(hasher, 0x00),
    }
}

///
/// Encode one value structurally into the hash stream.
///

fn write_value(hasher: &mut Sha256, value: &Value) {
    match value {
        Value::Null => write_tag(hasher, 0x40),
        Value::Bool(b) => {
            write_tag(hasher, 0x41);
            write_tag(hasher, u8::from(*b));
        }
        Value::Int(n) => {
            write_tag(hasher, 0x42);
            hasher.update(n.to_be_bytes());
        }
        Value::Float(x) => {
            write_tag(hasher, 0x43);
            hasher.update(float_bits(*x).to_be_bytes());
        }
        Value::Text(s) => {
            write_tag(hasher, 0x44);
            write_str(hasher, s);
        }
        Value::List(items) => {
            write_tag(hasher, 0x45);
            write_len_u32(hasher, items.len());
            for item in items {
                write_value(hasher, item);
            }
        }
        Value::Set(items) => {
            // Distinct element digests, sorted, so equal sets hash equally.
            let mut digests: Vec<[u8; 32]> = items
                .iter()
                .map(|item| {
                    let mut inner = Sha256::new();
                    write_value(&mut inner, item);
                    inner.finalize().into()
                })
                .collect();
            digests.sort_unstable();
            digests.dedup();

            write_tag(hasher, 0x46);
            write_len_u32(hasher, digests.len());
            for digest in digests {
                hasher.update(digest);
            }
        }
    }
}

///
/// Encode one string with length prefix into the hash stream.
///

fn write_str(hasher: &mut Sha256, value: &str) {
    write_len_u32(hasher, value.len());
    hasher.update(value.as_bytes());
}

/// Encode a platform-sized length as u32 with deterministic saturation.
fn write_len_u32(hasher: &mut Sha256, len: usize) {
    let len = u32::try_from(len).unwrap_or(u32::MAX);
    hasher.update(len.to_be_bytes());
}

fn write_tag(hasher: &mut Sha256, tag: u8) {
    hasher.update([tag]);
}

#[cfg(test)]
mod tests {
    use crate::{
        placeholder::Placeholder,
        predicate::{CoercionId, Predicate, PredicateBuilder},
        value::Value,
    };

    #[test]
    fn fingerprint_matches_equality() {
        let mut drifted = Predicate::eq(5);
        drifted.set_value(Value::Int(9));

        assert_eq!(Predicate::eq(5).fingerprint(), drifted.fingerprint());
        assert_ne!(Predicate::eq(5).fingerprint(), Predicate::neq(5).fingerprint());
    }

    #[test]
    fn fingerprint_is_order_sensitive_for_connectives() {
        let ab = Predicate::gt(1).and(Predicate::lt(5));
        let ba = Predicate::lt(5).and(Predicate::gt(1));

        assert_ne!(ab.fingerprint(), ba.fingerprint());
    }

    #[test]
    fn fingerprint_ignores_set_order() {
        let left = Predicate::within_set([1, 2, 3]);
        let right = Predicate::within_set([3, 1, 2]);

        assert_eq!(left, right);
        assert_eq!(left.fingerprint(), right.fingerprint());
    }

    #[test]
    fn fingerprint_distinguishes_bound_and_unbound_slots() {
        let template = Predicate::eq(Placeholder::variable("x"));
        let mut bound = template.clone();
        bound.update_variable("x", &Value::Int(1));

        assert_ne!(template.fingerprint(), bound.fingerprint());
    }

    #[test]
    fn fingerprint_distinguishes_coercion_policies() {
        let strict = PredicateBuilder::new(CoercionId::Strict).eq("Marko");
        let casefold = PredicateBuilder::new(CoercionId::TextCasefold).eq("Marko");

        assert!(!strict.test(&Value::text("marko")).unwrap());
        assert!(casefold.test(&Value::text("marko")).unwrap());
        assert_ne!(strict, casefold);
        assert_ne!(strict.fingerprint(), casefold.fingerprint());
    }

    #[test]
    fn fingerprint_treats_set_duplicates_as_one() {
        let compact = Predicate::eq(Value::Set(vec![Value::Int(1), Value::Int(2)]));
        let repeated = Predicate::eq(Value::Set(vec![
            Value::Int(1),
            Value::Int(2),
            Value::Int(2),
        ]));

        assert_eq!(compact, repeated);
        assert_eq!(compact.fingerprint(), repeated.fingerprint());
    }
}
