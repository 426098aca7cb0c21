use pretty_assertions::assert_eq;
use rowbind::{params, stmt::Value, CommandType, Direction, Parameter};
use rowbind::driver::Command as _;
use tests::*;

fn names(command: &dyn rowbind::driver::Command) -> Vec<&str> {
    command.parameters().iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn collection_expands_in_place() {
    let (db, _stub) = stub();

    let command = db
        .command((
            "SELECT * FROM Users WHERE Id IN (@ids) AND Active = @active",
            params!(ids = [1i32, 2, 3], active = true),
        ))
        .unwrap();

    assert_eq!(
        command.text(),
        "SELECT * FROM Users WHERE Id IN (@ids_0, @ids_1, @ids_2) AND Active = @active"
    );
    assert!(!command.text().contains("@ids)"));
    assert_eq!(names(&*command), ["@ids_0", "@ids_1", "@ids_2", "@active"]);
    assert_eq!(command.parameter("@ids_2").unwrap().value, Value::I32(3));
}

#[test]
fn byte_and_string_values_are_scalars() {
    let (db, _stub) = stub();
    let sql = "UPDATE Files SET Data = @data WHERE Name = @name";

    let command = db
        .command((sql, params!(data = vec![0u8, 1, 2], name = "a.txt")))
        .unwrap();

    assert_eq!(command.text(), sql);
    assert_eq!(names(&*command), ["@data", "@name"]);
    assert_eq!(
        command.parameter("@data").unwrap().value,
        Value::Bytes(vec![0, 1, 2])
    );
}

#[test]
fn none_binds_database_null() {
    let (db, _stub) = stub();

    let command = db
        .command(("SELECT @x", params!(x = None::<i32>)))
        .unwrap();

    assert_eq!(command.parameters().len(), 1);
    assert!(command.parameter("@x").unwrap().value.is_null());
}

#[test]
fn empty_collection_binds_null() {
    let (db, _stub) = stub();

    let command = db
        .command(("SELECT * FROM T WHERE Id IN (@ids)", params!(ids = Vec::<i64>::new())))
        .unwrap();

    assert_eq!(command.text(), "SELECT * FROM T WHERE Id IN (NULL)");
    assert!(command.parameters().is_empty());
    assert!(command.parameter("@ids").is_none());
}

#[test]
fn duplicate_names_are_rejected() {
    let (db, _stub) = stub();

    let err = db
        .command(("SELECT @a", vec![("a", Value::I32(1)), ("@a", Value::I32(2))]))
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

#[derive(rowbind::Params)]
struct Search<'a> {
    name: &'a str,

    #[params(rename = "ids")]
    user_ids: Vec<i64>,

    #[params(skip)]
    #[allow(dead_code)]
    page: usize,
}

#[test]
fn derived_params() {
    let (db, _stub) = stub();

    let search = Search {
        name: "ann",
        user_ids: vec![7, 8],
        page: 3,
    };

    let command = db
        .command(("SELECT * FROM U WHERE Name = @name AND Id IN (@ids)", &search))
        .unwrap();

    assert_eq!(names(&*command), ["@name", "@ids_0", "@ids_1"]);
    assert_eq!(
        command.text(),
        "SELECT * FROM U WHERE Name = @name AND Id IN (@ids_0, @ids_1)"
    );
}

#[test]
fn explicit_parameters_are_added_as_given() {
    let (db, _stub) = stub();

    let parameters = [
        Parameter::new("@id", 5i64),
        Parameter::output("@count", rowbind::DbType::Int32),
    ];
    let command = db
        .command((CommandType::StoredProcedure, "dbo.CountOrders", &parameters[..]))
        .unwrap();

    assert_eq!(command.command_type(), CommandType::StoredProcedure);
    assert_eq!(command.parameters(), &parameters[..]);
    assert_eq!(command.parameters()[1].direction, Direction::Output);
}

#[test]
fn configured_prefix_and_timeout() {
    let mut builder = rowbind::Db::builder();
    builder
        .parameter_prefix(':')
        .command_timeout(std::time::Duration::from_secs(5));
    let (db, _stub) = stub_with(builder);

    let command = db
        .command(("SELECT * FROM T WHERE Id IN (:ids)", params!(ids = [1u32, 2])))
        .unwrap();

    assert_eq!(command.text(), "SELECT * FROM T WHERE Id IN (:ids_0, :ids_1)");
    assert_eq!(command.state().timeout, std::time::Duration::from_secs(5));
}

#[test]
fn render_lists_parameters() {
    let (db, _stub) = stub();

    let command = db
        .command(("SELECT @id", params!(id = 42i64)))
        .unwrap();

    assert_eq!(
        rowbind::db::render_command(&*command),
        "Text: SELECT @id\n  @id = 42 (Int64, Input)"
    );
}
