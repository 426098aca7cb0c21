use pretty_assertions::assert_eq;
use rowbind::{driver::IsolationLevel, ConnectionState, Db};
use tests::*;

#[test]
fn built_db_starts_closed() {
    init_tracing();
    let stub = Stub::default();
    let db = Db::builder().build(stub.clone()).unwrap();

    assert_eq!(db.state(), ConnectionState::Closed);
    assert_eq!(stub.events(), [Event::Connect]);

    let err = db.execute_non_query("DELETE FROM T").unwrap_err();
    assert!(err.is_connection_not_open());

    let err = db.begin_transaction(IsolationLevel::default()).unwrap_err();
    assert!(err.is_connection_not_open());

    db.open().unwrap();
    db.open().unwrap();
    assert_eq!(db.state(), ConnectionState::Open);
    assert_eq!(stub.count(|e| *e == Event::Open), 1);
}

#[test]
fn second_begin_fails() {
    let (db, stub) = stub();

    db.begin_transaction(IsolationLevel::Serializable).unwrap();
    let err = db.begin_transaction(IsolationLevel::Serializable).unwrap_err();

    assert!(err.is_transaction_already_active());
    assert!(db.in_transaction());
    assert_eq!(stub.count(|e| matches!(e, Event::Begin(_))), 1);
}

#[test]
fn commit_and_rollback_need_a_transaction() {
    let (db, _stub) = stub();

    assert!(db.commit().unwrap_err().is_no_active_transaction());
    assert!(db.rollback().unwrap_err().is_no_active_transaction());

    db.begin_transaction(IsolationLevel::ReadCommitted).unwrap();
    db.commit().unwrap();
    assert!(db.commit().unwrap_err().is_no_active_transaction());
}

#[test]
fn commands_enlist_in_the_active_transaction() {
    let (db, stub) = stub();

    db.execute_non_query("INSERT INTO T VALUES (1)").unwrap();
    db.begin_transaction(IsolationLevel::ReadCommitted).unwrap();
    db.execute_non_query("INSERT INTO T VALUES (2)").unwrap();
    db.rollback().unwrap();
    db.execute_non_query("INSERT INTO T VALUES (3)").unwrap();

    let enlisted: Vec<bool> = stub
        .events()
        .into_iter()
        .filter_map(|event| match event {
            Event::Execute { in_transaction, .. } => Some(in_transaction),
            _ => None,
        })
        .collect();
    assert_eq!(enlisted, [false, true, false]);
    assert!(!db.in_transaction());
}

#[test]
fn dispose_tears_down_once() {
    let (db, stub) = stub();
    db.begin_transaction(IsolationLevel::ReadCommitted).unwrap();

    db.dispose();
    db.dispose();

    assert!(db.is_disposed());
    assert_eq!(stub.count(|e| *e == Event::Rollback), 1);
    assert_eq!(stub.count(|e| *e == Event::Close), 1);
    assert_eq!(db.state(), ConnectionState::Closed);

    drop(db);
    assert_eq!(stub.count(|e| *e == Event::Close), 1);
}

#[test]
fn dispose_without_transaction_is_silent() {
    let (db, stub) = stub();

    db.dispose();

    assert_eq!(stub.count(|e| *e == Event::Rollback), 0);
    assert_eq!(stub.count(|e| *e == Event::Close), 1);
}

#[test]
fn dispose_continues_past_failures() {
    let (db, stub) = stub();
    stub.behave(|b| {
        b.fail_rollback = true;
        b.fail_close = true;
    });
    db.begin_transaction(IsolationLevel::ReadCommitted).unwrap();

    db.dispose();

    assert!(db.is_disposed());
    assert_eq!(stub.count(|e| *e == Event::Rollback), 1);
    assert_eq!(stub.count(|e| *e == Event::Close), 1);
}

#[test]
fn disposed_db_rejects_everything() {
    let (db, _stub) = stub();
    db.dispose();

    assert!(db.open().unwrap_err().is_disposed());
    assert!(db.close().unwrap_err().is_disposed());
    assert!(db.commit().unwrap_err().is_disposed());
    assert!(db.execute_scalar("SELECT 1").unwrap_err().is_disposed());
    assert!(db
        .begin_transaction(IsolationLevel::ReadCommitted)
        .unwrap_err()
        .is_disposed());
}

#[test]
fn dropping_rolls_back() {
    let (db, stub) = stub();
    db.begin_transaction(IsolationLevel::ReadCommitted).unwrap();

    drop(db);

    assert_eq!(stub.count(|e| *e == Event::Rollback), 1);
    assert_eq!(stub.count(|e| *e == Event::Close), 1);
}

#[test]
fn close_then_reopen() {
    let (db, stub) = stub();

    db.close().unwrap();
    assert_eq!(db.state(), ConnectionState::Closed);
    db.close().unwrap();
    db.open().unwrap();

    assert_eq!(stub.count(|e| *e == Event::Close), 1);
    assert_eq!(stub.count(|e| *e == Event::Open), 2);
}

#[test]
fn close_rolls_back_the_active_transaction() {
    let (db, stub) = stub();
    db.begin_transaction(IsolationLevel::ReadCommitted).unwrap();

    db.close().unwrap();

    assert!(!db.in_transaction());
    assert_eq!(stub.count(|e| *e == Event::Rollback), 1);
    assert_eq!(stub.count(|e| *e == Event::Close), 1);

    db.open().unwrap();
    db.begin_transaction(IsolationLevel::ReadCommitted).unwrap();
    assert!(db.in_transaction());
}

#[test]
fn close_releases_the_transaction_when_rollback_fails() {
    let (db, stub) = stub();
    stub.behave(|b| b.fail_rollback = true);
    db.begin_transaction(IsolationLevel::ReadCommitted).unwrap();

    db.close().unwrap();

    assert!(!db.in_transaction());
    assert_eq!(db.state(), ConnectionState::Closed);

    db.open().unwrap();
    db.begin_transaction(IsolationLevel::ReadCommitted).unwrap();
    assert_eq!(stub.count(|e| matches!(e, Event::Begin(_))), 2);
}
