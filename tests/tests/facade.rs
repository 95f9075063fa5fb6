use pretty_assertions::assert_eq;
use rowbind::load::{load_all_extended, load_one_extended};
use rowbind::{field, load_all, load_grouped, load_one, MappingDefinition, Value};
use tests::{dto, TestRows};

use chrono::{DateTime, FixedOffset};

#[derive(Debug, Default, PartialEq)]
struct Person {
    name: Option<String>,
    age: i32,
}

fn person_definition() -> MappingDefinition<Person> {
    let mut definition = MappingDefinition::new();
    definition.map(field!(Person, name)).unwrap();
    definition
        .map_with(field!(Person, age), true, Some(Value::I32(-1)))
        .unwrap();
    definition
}

#[tokio::test]
async fn load_one_returns_the_first_row() {
    let definition = person_definition();
    let mut rows = TestRows::new(&["name", "age"])
        .row(vec![Value::from("Ann"), Value::I32(30)])
        .row(vec![Value::from("Bea"), Value::I32(25)]);

    let person = load_one(&mut rows, &definition).await.unwrap();
    assert_eq!(
        person,
        Some(Person {
            name: Some("Ann".to_string()),
            age: 30,
        })
    );
}

#[tokio::test]
async fn load_one_returns_none_for_an_empty_stream() {
    let definition = person_definition();
    let mut rows = TestRows::new(&["name", "age"]);

    let person = load_one(&mut rows, &definition).await.unwrap();
    assert_eq!(person, None);
}

#[tokio::test]
async fn load_all_drains_the_stream_in_order() {
    let definition = person_definition();
    let mut rows = TestRows::new(&["name", "age"])
        .row(vec![Value::from("Ann"), Value::I32(30)])
        .row(vec![Value::from("Bea"), Value::Null])
        .row(vec![Value::Null, Value::I32(19)]);

    let people = load_all(&mut rows, &definition).await.unwrap();
    assert_eq!(
        people,
        vec![
            Person {
                name: Some("Ann".to_string()),
                age: 30,
            },
            Person {
                name: Some("Bea".to_string()),
                age: -1,
            },
            Person {
                name: None,
                age: 19,
            },
        ]
    );
}

#[tokio::test]
async fn load_all_on_an_empty_stream_skips_ordinal_resolution() {
    let definition = person_definition();
    let mut rows = TestRows::new(&["name", "age"]);

    let people = load_all(&mut rows, &definition).await.unwrap();
    assert!(people.is_empty());
    assert_eq!(rows.ordinal_lookups(), 0);
}

#[derive(Debug, Default, PartialEq)]
struct Item {
    val: String,
}

#[tokio::test]
async fn load_grouped_preserves_group_order() {
    let mut definition = MappingDefinition::<Item>::new();
    definition.map(field!(Item, val)).unwrap();

    let mut rows = TestRows::new(&["key", "val"])
        .row(vec![Value::I32(1), Value::from("A")])
        .row(vec![Value::I32(1), Value::from("B")])
        .row(vec![Value::I32(2), Value::from("C")]);

    let groups = load_grouped::<Item, i32, _>(&mut rows, &definition, "key")
        .await
        .unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(
        groups[&1],
        vec![
            Item {
                val: "A".to_string()
            },
            Item {
                val: "B".to_string()
            },
        ]
    );
    assert_eq!(
        groups[&2],
        vec![Item {
            val: "C".to_string()
        }]
    );

    let keys: Vec<_> = groups.keys().copied().collect();
    assert_eq!(keys, vec![1, 2]);
}

#[tokio::test]
async fn load_grouped_on_an_empty_stream_returns_no_groups() {
    let mut definition = MappingDefinition::<Item>::new();
    definition.map(field!(Item, val)).unwrap();

    let mut rows = TestRows::new(&["key", "val"]);
    let groups = load_grouped::<Item, i32, _>(&mut rows, &definition, "key")
        .await
        .unwrap();
    assert!(groups.is_empty());
    assert_eq!(rows.ordinal_lookups(), 0);
}

#[tokio::test]
async fn name_and_age_scenario_round_trips() {
    let definition = person_definition();

    let mut first = TestRows::new(&["name", "age"])
        .row(vec![Value::from("Ann"), Value::Null]);
    let ann = load_one(&mut first, &definition).await.unwrap().unwrap();
    assert_eq!(ann.name, Some("Ann".to_string()));
    assert_eq!(ann.age, -1);

    let mut second = TestRows::new(&["name", "age"])
        .row(vec![Value::Null, Value::I32(30)]);
    let anon = load_one(&mut second, &definition).await.unwrap().unwrap();
    assert_eq!(anon.name, None);
    assert_eq!(anon.age, 30);
}

#[derive(Debug, Default, PartialEq)]
struct Audit {
    actor: Option<String>,
    at: Option<DateTime<FixedOffset>>,
}

fn audit_definition() -> MappingDefinition<Audit> {
    let mut definition = MappingDefinition::new();
    definition.map(field!(Audit, actor)).unwrap();
    definition.map(field!(Audit, at)).unwrap();
    definition
}

#[tokio::test]
async fn extended_loaders_populate_extended_fields() {
    let definition = audit_definition();
    let mut rows = TestRows::new(&["actor", "at"])
        .row(vec![
            Value::from("root"),
            Value::DateTimeOffset(dto("2022-03-04T05:06:07+01:00")),
        ])
        .row(vec![Value::from("ann"), Value::Null]);

    let audits = load_all_extended(&mut rows, &definition).await.unwrap();
    assert_eq!(
        audits,
        vec![
            Audit {
                actor: Some("root".to_string()),
                at: Some(dto("2022-03-04T05:06:07+01:00")),
            },
            Audit {
                actor: Some("ann".to_string()),
                at: None,
            },
        ]
    );
}

#[tokio::test]
async fn load_one_extended_returns_none_for_an_empty_stream() {
    let definition = audit_definition();
    let mut rows = TestRows::new(&["actor", "at"]);

    let audit = load_one_extended(&mut rows, &definition).await.unwrap();
    assert_eq!(audit, None);
}

#[tokio::test]
async fn plain_loaders_reject_extended_definitions() {
    let definition = audit_definition();
    let mut rows = TestRows::new(&["actor", "at"]).row(vec![
        Value::from("root"),
        Value::DateTimeOffset(dto("2022-03-04T05:06:07+01:00")),
    ]);

    let err = load_all(&mut rows, &definition).await.unwrap_err();
    assert!(err.is_capability());
}
