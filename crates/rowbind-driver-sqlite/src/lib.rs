mod value;
pub(crate) use value::Value;

use parking_lot::Mutex;
use rowbind_core::{
    driver::{self, BufferedCursor, CommandState, Cursor, IsolationLevel},
    stmt::{CommandType, ProviderType, Type},
    Error, Result, Table,
};
use rusqlite::Connection as RusqliteConnection;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use url::Url;

/// Storage types SQLite accepts in `#[param(db_type = ..)]`.
const PROVIDER_TYPES: &[&str] = &["INTEGER", "REAL", "TEXT", "BLOB", "NUMERIC"];

#[derive(Debug, Clone)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver from a `sqlite:` connection URL. The path
    /// `:memory:` selects an in-memory database.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str)
            .map_err(|err| Error::invalid_argument("url", err.to_string()))?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_argument(
                "url",
                format!("connection URL does not have a `sqlite` scheme; url={url_str}"),
            ));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

impl driver::Driver for Sqlite {
    fn connect(&self) -> Result<Box<dyn driver::Connection>> {
        Ok(Box::new(Connection::new(self.clone())))
    }
}

type Handle = Arc<Mutex<Option<RusqliteConnection>>>;

/// A SQLite connection. Commands and transactions share the underlying
/// handle, so they fail once the connection is closed.
///
/// Closing an in-memory connection discards its database.
#[derive(Debug)]
pub struct Connection {
    target: Sqlite,
    handle: Handle,
}

impl Connection {
    pub fn new(target: Sqlite) -> Self {
        Self {
            target,
            handle: Arc::new(Mutex::new(None)),
        }
    }
}

impl driver::Connection for Connection {
    fn is_open(&self) -> bool {
        self.handle.lock().is_some()
    }

    fn open(&mut self) -> Result<()> {
        let mut handle = self.handle.lock();
        if handle.is_some() {
            return Ok(());
        }

        let connection = match &self.target {
            Sqlite::File(path) => RusqliteConnection::open(path),
            Sqlite::InMemory => RusqliteConnection::open_in_memory(),
        }
        .map_err(Error::driver)?;

        tracing::trace!(db = ?self.target, "sqlite connection opened");
        *handle = Some(connection);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let Some(connection) = self.handle.lock().take() else {
            return Ok(());
        };

        connection.close().map_err(|(_, err)| Error::driver(err))
    }

    fn create_command(&mut self) -> Result<Box<dyn driver::Command>> {
        Ok(Box::new(Command {
            handle: self.handle.clone(),
            state: CommandState::default(),
            in_transaction: false,
        }))
    }

    fn begin_transaction(
        &mut self,
        isolation: IsolationLevel,
    ) -> Result<Box<dyn driver::Transaction>> {
        let begin = match isolation {
            IsolationLevel::Serializable => "BEGIN IMMEDIATE",
            _ => "BEGIN DEFERRED",
        };

        execute_batch(&self.handle, begin)?;

        Ok(Box::new(Transaction {
            handle: self.handle.clone(),
            isolation,
        }))
    }
}

fn execute_batch(handle: &Handle, sql: &str) -> Result<()> {
    let guard = handle.lock();
    let connection = guard.as_ref().ok_or_else(Error::connection_not_open)?;
    connection.execute_batch(sql).map_err(Error::driver)
}

#[derive(Debug)]
pub struct Transaction {
    handle: Handle,
    isolation: IsolationLevel,
}

impl driver::Transaction for Transaction {
    fn isolation_level(&self) -> IsolationLevel {
        self.isolation
    }

    fn commit(self: Box<Self>) -> Result<()> {
        execute_batch(&self.handle, "COMMIT")
    }

    fn rollback(self: Box<Self>) -> Result<()> {
        execute_batch(&self.handle, "ROLLBACK")
    }
}

/// A single SQLite statement. Multi-statement text is not supported; only
/// the first statement is prepared.
#[derive(Debug)]
pub struct Command {
    handle: Handle,
    state: CommandState,
    in_transaction: bool,
}

impl Command {
    fn sql(&self) -> Result<String> {
        match self.state.command_type {
            CommandType::Text => Ok(self.state.text.clone()),
            CommandType::TableDirect => Ok(format!("SELECT * FROM {}", self.state.text)),
            CommandType::StoredProcedure => Err(Error::unsupported_feature(
                "SQLite does not support stored procedures",
            )),
        }
    }

    /// Prepares the statement, binds the input parameters it references and
    /// hands it to `f`.
    fn with_statement<R>(
        &self,
        f: impl FnOnce(&RusqliteConnection, &mut rusqlite::Statement<'_>) -> Result<R>,
    ) -> Result<R> {
        let sql = self.sql()?;

        let guard = self.handle.lock();
        let connection = guard.as_ref().ok_or_else(Error::connection_not_open)?;
        connection
            .busy_timeout(self.state.timeout)
            .map_err(Error::driver)?;

        let mut stmt = connection.prepare(&sql).map_err(Error::driver)?;

        for parameter in &self.state.parameters {
            if !parameter.direction.is_input() {
                continue;
            }

            let Some(index) = stmt
                .parameter_index(&parameter.name)
                .map_err(Error::driver)?
            else {
                continue;
            };

            stmt.raw_bind_parameter(index, Value::from(&parameter.value))
                .map_err(|err| {
                    Error::driver(err).context(rowbind_core::err!(
                        "failed to bind parameter `{}`",
                        parameter.name
                    ))
                })?;
        }

        f(connection, &mut stmt)
    }
}

impl driver::Command for Command {
    fn state(&self) -> &CommandState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CommandState {
        &mut self.state
    }

    fn set_transaction(&mut self, transaction: Option<&dyn driver::Transaction>) {
        self.in_transaction = transaction.is_some();
    }

    fn has_transaction(&self) -> bool {
        self.in_transaction
    }

    fn resolve_provider_type(&self, name: &str) -> Option<ProviderType> {
        PROVIDER_TYPES
            .iter()
            .find(|ty| ty.eq_ignore_ascii_case(name))
            .map(|ty| ProviderType::new(*ty))
    }

    fn execute_reader(&mut self) -> Result<Box<dyn Cursor>> {
        let table = self.with_statement(|_, stmt| {
            let width = stmt.column_count();
            let names: Vec<String> = stmt
                .column_names()
                .into_iter()
                .map(String::from)
                .collect();

            let mut values = vec![];
            let mut rows = stmt.raw_query();
            while let Some(row) = rows.next().map_err(Error::driver)? {
                let mut record = Vec::with_capacity(width);
                for ordinal in 0..width {
                    record.push(value::from_sql(row.get_ref(ordinal).map_err(Error::driver)?));
                }
                values.push(record);
            }

            let mut table = Table::new("Table");
            for (ordinal, name) in names.into_iter().enumerate() {
                let ty = values
                    .iter()
                    .map(|record: &Vec<_>| &record[ordinal])
                    .find(|value| !value.is_null())
                    .map(|value| value.infer_ty())
                    .unwrap_or(Type::Null);
                table.push_column(&name, ty);
            }

            for record in values {
                table.push_row(record)?;
            }

            Ok(table)
        })?;

        Ok(Box::new(BufferedCursor::new([table])))
    }

    fn execute_non_query(&mut self) -> Result<u64> {
        self.with_statement(|connection, stmt| {
            if stmt.column_count() == 0 {
                let count = stmt.raw_execute().map_err(Error::driver)?;
                return Ok(count as u64);
            }

            let mut rows = stmt.raw_query();
            while rows.next().map_err(Error::driver)?.is_some() {}
            Ok(connection.changes() as u64)
        })
    }
}
