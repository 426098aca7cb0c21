mod stub;
pub use stub::{Behavior, Event, Stub};

use rowbind::Db;

/// Installs a `tracing` subscriber that writes to the test output. Filtered
/// with `RUST_LOG`; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// An open connection to a fresh in-memory SQLite database.
pub fn sqlite() -> Db {
    init_tracing();
    Db::connect("sqlite::memory:").unwrap()
}

/// A `Db` over a recording stub, with its connection open.
pub fn stub() -> (Db, Stub) {
    stub_with(Db::builder())
}

pub fn stub_with(mut builder: rowbind::db::Builder) -> (Db, Stub) {
    init_tracing();

    let stub = Stub::default();
    let db = builder.build(stub.clone()).unwrap();
    db.open().unwrap();
    (db, stub)
}
