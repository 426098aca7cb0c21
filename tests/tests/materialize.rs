use pretty_assertions::assert_eq;
use rowbind::{
    driver::BufferedCursor,
    stmt::{Type, Value},
    Table, TableExt,
};
use tests::*;

#[derive(Debug, Default, Clone, PartialEq, rowbind::Entity)]
#[entity(table = "Users")]
struct User {
    #[column("Id")]
    id: i64,

    #[column("Name")]
    name: String,

    #[column("Age")]
    age: Option<i32>,

    #[nested]
    address: Address,
}

#[derive(Debug, Default, Clone, PartialEq, rowbind::Entity)]
#[entity]
struct Address {
    #[column("City")]
    city: String,
}

fn users() -> Table {
    let mut table = Table::new("Users");
    table.add_column("Id", Type::I64);
    table.add_column("Name", Type::String);
    table.add_column("Age", Type::I32);
    table.add_column("City", Type::String);

    table
        .push_row(vec![
            Value::I64(1),
            Value::from("ann"),
            Value::I32(31),
            Value::from("Oslo"),
        ])
        .unwrap();
    table
        .push_row(vec![Value::I64(2), Value::from("bob"), Value::Null, Value::Null])
        .unwrap();
    table
}

#[test]
fn table_round_trip() {
    let original = users();
    let entities: Vec<User> = original.to_entities().unwrap();

    assert_eq!(entities.len(), 2);
    assert_eq!(entities[0].address.city, "Oslo");
    assert_eq!(entities[1].age, None);
    assert_eq!(entities[1].address.city, "");

    let table = Table::from_entities(&entities).unwrap();
    assert_eq!(table.name(), "Users");
    assert_eq!(table.len(), original.len());

    for column in ["Id", "Name", "Age"] {
        for index in 0..original.len() {
            assert_eq!(table.get(index, column), original.get(index, column));
        }
    }
}

#[test]
fn empty_entity_list_keeps_columns() {
    let table = rowbind::entities_to_table::<User>(&[]).unwrap();
    assert!(table.is_empty());

    let columns: Vec<_> = table.columns().map(|c| c.name.as_str()).collect();
    assert_eq!(columns, ["Id", "Name", "Age"]);
}

#[test]
fn missing_or_empty_table_yields_nothing() {
    assert!(rowbind::entities_from_table::<User>(None).unwrap().is_empty());
    assert!(rowbind::entities_from_table::<User>(Some(&Table::new("Users")))
        .unwrap()
        .is_empty());
}

#[test]
fn missing_cursor_is_invalid_argument() {
    let err = rowbind::entities_from_cursor::<User>(None).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn cursor_rows_become_entities() {
    let mut cursor = BufferedCursor::new([users()]);
    let entities: Vec<User> = rowbind::entities_from_cursor(Some(&mut cursor)).unwrap();

    assert_eq!(
        entities[0],
        User {
            id: 1,
            name: "ann".to_string(),
            age: Some(31),
            address: Address {
                city: "Oslo".to_string()
            },
        }
    );
}

#[derive(Debug, Default, PartialEq, rowbind::Entity)]
#[entity(table = "Orders")]
struct Order {
    #[column("Id")]
    id: i64,

    #[nested]
    customer: Customer,
}

#[derive(Debug, Default, PartialEq, rowbind::Entity)]
#[entity]
struct Customer {
    #[column("Name")]
    name: String,

    #[nested]
    address: Address,
}

#[test]
fn nesting_stops_after_one_level() {
    let mut table = Table::new("Orders");
    table.add_column("Id", Type::I64);
    table.add_column("Name", Type::String);
    table.add_column("City", Type::String);
    table
        .push_row(vec![Value::I64(7), Value::from("ann"), Value::from("Oslo")])
        .unwrap();

    let expected = Order {
        id: 7,
        customer: Customer {
            name: "ann".to_string(),
            address: Address::default(),
        },
    };

    let from_table: Vec<Order> = rowbind::entities_from_table(Some(&table)).unwrap();
    assert_eq!(from_table, [expected]);

    let mut cursor = BufferedCursor::new([table]);
    let from_cursor: Vec<Order> = rowbind::entities_from_cursor(Some(&mut cursor)).unwrap();
    assert_eq!(from_cursor[0].customer.address, Address::default());
    assert_eq!(from_cursor[0].customer.name, "ann");
}

#[test]
fn missing_column_is_invalid_result() {
    let mut table = Table::new("Users");
    table.add_column("Id", Type::I64);
    table.push_row(vec![Value::I64(1)]).unwrap();

    let err = table.to_entities::<User>().unwrap_err();
    assert!(err.is_invalid_result());
}

#[test]
fn unconvertible_value_names_the_column() {
    let mut table = users();
    table
        .push_row(vec![
            Value::from("three"),
            Value::from("cy"),
            Value::Null,
            Value::Null,
        ])
        .unwrap();

    let err = table.to_entities::<User>().unwrap_err();
    assert!(err.is_type_conversion());
    assert!(err.to_string().contains("`Id`"), "{err}");
}

#[test]
fn stub_results_materialize() {
    let (db, stub) = stub();
    stub.push_result([users()]);

    let found: Option<User> = db.single_or_default("SELECT * FROM Users").unwrap();
    assert_eq!(found.unwrap().name, "ann");

    let none: Option<User> = db.single_or_default("SELECT * FROM Users").unwrap();
    assert_eq!(none, None);
}

#[test]
fn data_set_names_tables() {
    let (db, stub) = stub();
    stub.push_result([users(), users(), users()]);

    let data_set = db.execute_data_set("SELECT 1; SELECT 2; SELECT 3").unwrap();
    let names: Vec<_> = data_set.into_iter().map(|t| t.name().to_string()).collect();
    assert_eq!(names, ["Table", "Table1", "Table2"]);
}
