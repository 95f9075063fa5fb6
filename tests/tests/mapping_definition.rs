use pretty_assertions::assert_eq;
use rowbind::{field, MappingDefinition, Value};
use tests::{dec, dt, uid, TestRows};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Default, PartialEq)]
struct Person {
    name: Option<String>,
    age: i32,
    balance: Decimal,
    joined: Option<NaiveDateTime>,
    id: Option<Uuid>,
}

#[test]
fn default_with_nulls_forbidden_fails_and_leaves_the_table_unchanged() {
    let mut definition = MappingDefinition::<Person>::new();
    definition.map(field!(Person, name)).unwrap();
    let before = definition.len();

    let err = definition
        .map_with(field!(Person, age), false, Some(Value::I32(-1)))
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(definition.len(), before);
}

#[test]
fn default_of_the_wrong_type_fails_validation() {
    let mut definition = MappingDefinition::<Person>::new();
    let err = definition
        .map_with(field!(Person, age), true, Some(Value::from("not an int")))
        .unwrap_err();

    assert!(err.is_validation());
    assert!(definition.is_empty());
}

#[test]
fn decimal_date_time_and_uuid_defaults_are_rejected() {
    let mut definition = MappingDefinition::<Person>::new();

    let err = definition
        .map_with(
            field!(Person, balance),
            true,
            Some(Value::Decimal(dec("1.00"))),
        )
        .unwrap_err();
    assert!(err.is_validation());

    let err = definition
        .map_with(
            field!(Person, joined),
            true,
            Some(Value::DateTime(dt("2020-01-01T00:00:00"))),
        )
        .unwrap_err();
    assert!(err.is_validation());

    let err = definition
        .map_with(
            field!(Person, id),
            true,
            Some(Value::Uuid(uid("6f1ed002-ab5a-4e09-9f9b-7c52ed0aef11"))),
        )
        .unwrap_err();
    assert!(err.is_validation());

    assert!(definition.is_empty());
}

#[test]
fn an_explicit_null_default_means_no_default() {
    let mut definition = MappingDefinition::<Person>::new();
    // Null is not a default value, so nullability is not required either.
    definition
        .map_with(field!(Person, age), false, Some(Value::Null))
        .unwrap();
    assert_eq!(definition.len(), 1);
}

#[test]
fn remapping_a_field_replaces_the_binding_and_compiles_the_latest() {
    let mut definition = MappingDefinition::<Person>::new();
    definition.map(field!(Person, age)).unwrap();
    definition
        .map_column(field!(Person, age), "Years", false, None)
        .unwrap();
    assert_eq!(definition.len(), 1);

    let rows = TestRows::new(&["Years"]).row(vec![Value::I32(52)]).positioned();

    let mut binding = definition.produce_binding();
    binding.resolve_ordinals(&rows).unwrap();

    let mut person = Person::default();
    binding.load(&mut person, &rows).unwrap();
    assert_eq!(person.age, 52);
}

#[test]
fn produce_binding_memoizes_the_compiled_program() {
    let mut definition = MappingDefinition::<Person>::new();
    definition.map(field!(Person, name)).unwrap();

    let first = definition.produce_binding();
    let second = definition.produce_binding();
    assert!(first.shares_artifact(&second));
}

#[test]
fn concurrent_first_produce_calls_converge_on_one_program() {
    let mut definition = MappingDefinition::<Person>::new();
    definition.map(field!(Person, name)).unwrap();
    definition.map(field!(Person, age)).unwrap();
    let definition = Arc::new(definition);

    let bindings: Vec<_> = std::thread::scope(|scope| {
        (0..8)
            .map(|_| {
                let definition = definition.clone();
                scope.spawn(move || definition.produce_binding())
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    for binding in &bindings[1..] {
        assert!(bindings[0].shares_artifact(binding));
    }
}

#[test]
fn definitions_for_the_same_type_have_distinct_ids() {
    let first = MappingDefinition::<Person>::new();
    let second = MappingDefinition::<Person>::new();
    assert_ne!(first.unique_id(), second.unique_id());
}
