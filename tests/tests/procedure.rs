use pretty_assertions::assert_eq;
use rowbind::{
    driver::Command as _,
    stmt::{DbType, ProviderType, Value},
    CommandType, Direction,
};
use tests::*;

#[derive(rowbind::Procedure)]
#[procedure(schema = "dbo", name = "GetOrders")]
struct GetOrders {
    #[param]
    customer_id: i64,

    #[param(name = "@Since", db_type = DateTime)]
    since: Option<chrono::NaiveDateTime>,

    #[param(name = "Total", direction = Output, db_type = Int32)]
    total: i32,

    #[param(db_type = "TEXT")]
    note: String,

    #[allow(dead_code)]
    unmapped: u8,
}

#[derive(rowbind::Procedure)]
struct NotDeclared {
    #[param]
    #[allow(dead_code)]
    id: i64,
}

#[derive(rowbind::Procedure)]
#[procedure(name = "Users", command_type = TableDirect)]
struct AllUsers {}

fn get_orders() -> GetOrders {
    GetOrders {
        customer_id: 7,
        since: None,
        total: 0,
        note: "x".to_string(),
        unmapped: 1,
    }
}

#[test]
fn procedure_command_shape() {
    let (db, _stub) = stub();

    let command = db.create_procedure_command(&get_orders()).unwrap();

    assert_eq!(command.command_type(), CommandType::StoredProcedure);
    assert_eq!(command.text(), "dbo.GetOrders");

    let names: Vec<_> = command.parameters().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["@customer_id", "@Since", "@Total", "@note"]);

    let since = command.parameter("@Since").unwrap();
    assert_eq!(since.value, Value::Null);
    assert_eq!(since.db_type, Some(DbType::DateTime));

    let total = command.parameter("@Total").unwrap();
    assert_eq!(total.direction, Direction::Output);
    assert_eq!(total.db_type, Some(DbType::Int32));

    // the stub has no provider types
    let note = command.parameter("@note").unwrap();
    assert_eq!(note.db_type, None);
    assert_eq!(note.provider_type, None::<ProviderType>);
}

#[test]
fn missing_declaration_fails_before_execution() {
    let (db, stub) = stub();

    let err = db
        .exec_procedure_non_query(&NotDeclared { id: 1 })
        .unwrap_err();

    assert!(err.is_missing_declaration());
    assert_eq!(stub.last_execute(), None);
}

#[test]
fn executes_through_the_driver() {
    let (db, stub) = stub();

    db.exec_procedure_non_query(&get_orders()).unwrap();
    db.exec_procedure_reader(&AllUsers {}).unwrap();

    let Some(Event::Execute {
        command_type, text, ..
    }) = stub.last_execute()
    else {
        panic!("nothing executed");
    };
    assert_eq!(command_type, CommandType::TableDirect);
    assert_eq!(text, "Users");
    assert_eq!(stub.count(|e| matches!(e, Event::Execute { .. })), 2);
}
