//! Property-based tests for the non-blocking space operations.

use linda_core::{Linda, SharedSpace};
use linda_types::{Field, Template, Tuple, Value};
use proptest::prelude::*;

fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-50i64..50).prop_map(Value::Integer),
        any::<bool>().prop_map(Value::Boolean),
        "[a-c]{0,2}".prop_map(Value::String),
    ]
}

fn tuple() -> impl Strategy<Value = Tuple> {
    prop::collection::vec(value(), 0..4).prop_map(Tuple::new)
}

/// A tuple and a template it matches, with a random subset of
/// positions turned into wildcards
fn tuple_and_template() -> impl Strategy<Value = (Tuple, Template)> {
    tuple().prop_flat_map(|t| {
        let arity = t.arity();
        (Just(t), prop::collection::vec(any::<bool>(), arity)).prop_map(|(t, mask)| {
            let template: Template = t
                .fields()
                .iter()
                .zip(&mask)
                .map(|(value, wild)| {
                    if *wild {
                        Field::wildcard(value.field_type())
                    } else {
                        Field::Bound(value.clone())
                    }
                })
                .collect();
            (t, template)
        })
    })
}

proptest! {
    #[test]
    fn written_tuple_can_be_read_without_removal(
        (t, template) in tuple_and_template(),
        background in prop::collection::vec(tuple(), 0..5),
    ) {
        let space = SharedSpace::new();
        for other in background {
            space.write(other);
        }
        space.write(t.clone());
        let size = space.size();

        let read = space.try_read(&template);
        prop_assert!(read.is_some());
        prop_assert!(read.unwrap().matches(&template));
        prop_assert_eq!(space.size(), size);
    }

    #[test]
    fn exact_template_take_succeeds_once((t, _) in tuple_and_template()) {
        let space = SharedSpace::new();
        space.write(t.clone());
        let exact = Template::from(&t);

        prop_assert_eq!(space.try_take(&exact), Some(t));
        prop_assert_eq!(space.try_take(&exact), None);
        prop_assert_eq!(space.size(), 0);
    }

    #[test]
    fn read_all_matches_filter_of_resident_tuples(
        tuples in prop::collection::vec(tuple(), 0..12),
        (_, template) in tuple_and_template(),
    ) {
        let space = SharedSpace::new();
        for t in &tuples {
            space.write(t.clone());
        }

        let expected: Vec<Tuple> = tuples.iter().filter(|t| t.matches(&template)).cloned().collect();
        prop_assert_eq!(space.read_all(&template), expected.clone());
        prop_assert_eq!(space.take_all(&template), expected.clone());
        prop_assert_eq!(space.size(), tuples.len() - expected.len());
        prop_assert!(space.try_read(&template).is_none());
    }
}
