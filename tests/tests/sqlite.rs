use pretty_assertions::assert_eq;
use rowbind::{
    driver::{Command as _, IsolationLevel},
    params,
    stmt::Value,
    Db,
};
use tests::*;

#[derive(Debug, Default, PartialEq, rowbind::Entity)]
#[entity(table = "Users", key = "Id")]
struct User {
    #[column("Id")]
    id: i32,

    #[column("Name")]
    name: String,

    #[column("Score")]
    score: Option<f64>,

    #[column("Token")]
    token: Option<uuid::Uuid>,
}

#[derive(rowbind::Procedure)]
#[procedure(name = "SELECT COUNT(*) FROM Users WHERE Id >= @min_id", command_type = Text)]
struct CountFrom {
    #[param(db_type = "integer")]
    min_id: i64,
}

fn seeded() -> Db {
    let db = sqlite();
    db.execute_non_query(
        "CREATE TABLE Users (Id INTEGER PRIMARY KEY, Name TEXT NOT NULL, Score REAL, Token TEXT)",
    )
    .unwrap();

    for (id, name, score) in [(1, "ann", Some(1.5)), (2, "bob", None), (3, "cy", Some(3.0))] {
        db.execute_non_query((
            "INSERT INTO Users (Id, Name, Score) VALUES (@id, @name, @score)",
            params!(id = id, name = name, score = score),
        ))
        .unwrap();
    }

    db
}

#[test]
fn query_with_in_list() {
    let db = seeded();

    let users: Vec<User> = db
        .query((
            "SELECT * FROM Users WHERE Id IN (@ids) ORDER BY Id",
            params!(ids = [1i64, 3]),
        ))
        .unwrap();

    let names: Vec<_> = users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["ann", "cy"]);
    assert_eq!(users[0].score, Some(1.5));
}

#[test]
fn empty_in_list_matches_nothing() {
    let db = seeded();

    let users: Vec<User> = db
        .query((
            "SELECT * FROM Users WHERE Id IN (@ids)",
            params!(ids = Vec::<i64>::new()),
        ))
        .unwrap();
    assert!(users.is_empty());
}

#[test]
fn nulls_become_defaults() {
    let db = seeded();

    let bob: User = db
        .single_or_default(("SELECT * FROM Users WHERE Id = @id", params!(id = 2)))
        .unwrap()
        .unwrap();

    assert_eq!(bob.score, None);
    assert_eq!(bob.token, None);
}

#[test]
fn uuid_round_trips_as_text() {
    let db = seeded();
    let token = uuid::Uuid::new_v4();

    db.execute_non_query((
        "UPDATE Users SET Token = @token WHERE Id = 1",
        params!(token = token),
    ))
    .unwrap();

    let ann: Option<User> = db
        .single_or_default("SELECT * FROM Users WHERE Id = 1")
        .unwrap();
    assert_eq!(ann.unwrap().token, Some(token));
}

#[test]
fn scalar_and_table() {
    let db = seeded();

    assert_eq!(
        db.execute_scalar("SELECT COUNT(*) FROM Users").unwrap(),
        Value::I64(3)
    );
    assert_eq!(
        db.execute_scalar("SELECT Name FROM Users WHERE Id = 99").unwrap(),
        Value::Null
    );

    let table = db.execute_table("SELECT Id, Name FROM Users ORDER BY Id").unwrap();
    assert_eq!(table.name(), "Table");
    assert_eq!(table.len(), 3);
    assert_eq!(table.get(1, "Name"), Some(&Value::from("bob")));
}

#[test]
fn join_keeps_columns_with_the_same_name() {
    let db = seeded();
    db.execute_non_query("CREATE TABLE Orders (Id INTEGER PRIMARY KEY, UserId INTEGER NOT NULL)")
        .unwrap();
    db.execute_non_query("INSERT INTO Orders (Id, UserId) VALUES (10, 1), (11, 3)")
        .unwrap();

    let table = db
        .execute_table(
            "SELECT u.Id, o.Id FROM Users u JOIN Orders o ON o.UserId = u.Id ORDER BY o.Id",
        )
        .unwrap();
    let names: Vec<_> = table.columns().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Id", "Id1"]);
    assert_eq!(table.get(1, "Id"), Some(&Value::I64(3)));
    assert_eq!(table.get(1, "Id1"), Some(&Value::I64(11)));

    // The first `Id` binds to the entity.
    let users: Vec<User> = db
        .query("SELECT u.*, o.Id FROM Users u JOIN Orders o ON o.UserId = u.Id ORDER BY o.Id")
        .unwrap();
    let ids: Vec<_> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, [1, 3]);
    assert_eq!(users[1].name, "cy");
}

#[test]
fn text_procedure() {
    let db = seeded();

    let count = db
        .exec_procedure_scalar(&CountFrom { min_id: 2 })
        .unwrap();
    assert_eq!(count, Value::I64(2));

    let command = db.create_procedure_command(&CountFrom { min_id: 2 }).unwrap();
    assert_eq!(
        command.parameters()[0].provider_type,
        Some(rowbind::stmt::ProviderType::new("INTEGER"))
    );
}

#[test]
fn stored_procedures_are_unsupported() {
    #[derive(rowbind::Procedure)]
    #[procedure(name = "GetUsers")]
    struct GetUsers {}

    let db = seeded();
    let err = db.exec_procedure_reader(&GetUsers {}).unwrap_err();
    assert!(err.is_unsupported_feature());
}

#[test]
fn rollback_discards_and_commit_keeps() {
    let db = seeded();

    db.begin_transaction(IsolationLevel::ReadCommitted).unwrap();
    db.execute_non_query("DELETE FROM Users").unwrap();
    db.rollback().unwrap();
    assert_eq!(db.execute_scalar("SELECT COUNT(*) FROM Users").unwrap(), Value::I64(3));

    db.begin_transaction(IsolationLevel::Serializable).unwrap();
    let deleted = db
        .execute_non_query(("DELETE FROM Users WHERE Id = @id", params!(id = 1)))
        .unwrap();
    db.commit().unwrap();

    assert_eq!(deleted, 1);
    assert_eq!(db.execute_scalar("SELECT COUNT(*) FROM Users").unwrap(), Value::I64(2));
}

#[test]
fn dispose_rolls_back_file_database() {
    let path = std::env::temp_dir().join(format!("rowbind-{}.db", std::process::id()));
    let _ = std::fs::remove_file(&path);
    let url = format!("sqlite:{}", path.display());

    let db = Db::connect(&url).unwrap();
    db.execute_non_query("CREATE TABLE T (Id INTEGER)").unwrap();
    db.begin_transaction(IsolationLevel::ReadCommitted).unwrap();
    db.execute_non_query("INSERT INTO T VALUES (1)").unwrap();
    db.dispose();

    let db = Db::connect(&url).unwrap();
    assert_eq!(db.execute_scalar("SELECT COUNT(*) FROM T").unwrap(), Value::I64(0));
    db.dispose();

    let _ = std::fs::remove_file(&path);
}

#[test]
fn unknown_scheme() {
    let err = Db::connect("oracle://localhost/xe").unwrap_err();
    assert!(err.is_unsupported_feature());
}
