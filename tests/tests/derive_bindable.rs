use pretty_assertions::assert_eq;
use rowbind::{field, load_all, Bindable, MappingDefinition, Value};
use tests::TestRows;

#[derive(Debug, Default, PartialEq, Bindable)]
struct Account {
    name: Option<String>,
    label: String,
    visits: i32,
    score: Option<i32>,
}

#[test]
fn map_all_binds_every_named_field() {
    let mut definition = MappingDefinition::<Account>::new();
    definition.map_all().unwrap();
    assert_eq!(definition.len(), 4);
}

#[tokio::test]
async fn derived_bindings_use_the_inference_rule() {
    let mut definition = MappingDefinition::<Account>::new();
    definition.map_all().unwrap();

    let mut rows = TestRows::new(&["name", "label", "visits", "score"])
        .row(vec![
            Value::Null,
            Value::from("first"),
            Value::I32(3),
            Value::Null,
        ]);

    let accounts = load_all(&mut rows, &definition).await.unwrap();
    assert_eq!(
        accounts,
        vec![Account {
            name: None,
            label: "first".to_string(),
            visits: 3,
            score: None,
        }]
    );
}

#[test]
fn derived_bindings_forbid_absence_for_plain_integers() {
    let mut definition = MappingDefinition::<Account>::new();
    definition.map_all().unwrap();

    let rows = TestRows::new(&["name", "label", "visits", "score"])
        .row(vec![
            Value::from("ann"),
            Value::from("x"),
            Value::Null,
            Value::I32(1),
        ])
        .positioned();

    let mut binding = definition.produce_binding();
    binding.resolve_ordinals(&rows).unwrap();

    let mut account = Account::default();
    let err = binding.load(&mut account, &rows).unwrap_err();
    assert!(err.is_row_access());
}

#[test]
fn map_all_can_be_refined_by_remapping() {
    let mut definition = MappingDefinition::<Account>::new();
    definition.map_all().unwrap();
    definition
        .map_column(field!(Account, visits), "VisitCount", false, None)
        .unwrap();

    // Refinement replaces the auto-binding instead of adding a second one.
    assert_eq!(definition.len(), 4);

    let rows = TestRows::new(&["name", "label", "VisitCount", "score"])
        .row(vec![
            Value::from("ann"),
            Value::from("x"),
            Value::I32(9),
            Value::Null,
        ])
        .positioned();

    let mut binding = definition.produce_binding();
    binding.resolve_ordinals(&rows).unwrap();

    let mut account = Account::default();
    binding.load(&mut account, &rows).unwrap();
    assert_eq!(account.visits, 9);
}
