mod builder;
pub use builder::Builder;
pub(crate) use builder::Config;

mod command;
pub use command::{render_command, Call, IntoCommand};

mod connect;
pub use connect::Connect;

mod exec;

mod exec_async;

use crate::{
    driver::{Connection, Driver, IsolationLevel, Transaction},
    Error, Result,
};

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// State of a [`Db`]'s connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Open,
    Closed,
}

/// A database handle: one provider connection, at most one active
/// transaction, and the operations that run commands against them.
///
/// The connection and the transaction are each guarded by their own mutex.
/// When both are needed, the connection is locked first.
pub struct Db {
    driver: Box<dyn Driver>,
    config: Config,

    /// `None` once disposed
    connection: Mutex<Option<Box<dyn Connection>>>,

    transaction: Mutex<Option<Box<dyn Transaction>>>,

    disposed: AtomicBool,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Connects using a built-in driver chosen by the URL scheme, with
    /// default settings, and opens the connection.
    pub fn connect(url: &str) -> Result<Db> {
        Db::builder().connect(url)
    }

    pub(crate) fn new(driver: Box<dyn Driver>, config: Config) -> Result<Db> {
        let connection = driver.connect()?;

        Ok(Db {
            driver,
            config,
            connection: Mutex::new(Some(connection)),
            transaction: Mutex::new(None),
            disposed: AtomicBool::new(false),
        })
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.driver
    }

    pub fn state(&self) -> ConnectionState {
        match &*self.connection.lock() {
            Some(connection) if connection.is_open() => ConnectionState::Open,
            _ => ConnectionState::Closed,
        }
    }

    pub fn in_transaction(&self) -> bool {
        self.transaction.lock().is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Opens the connection. Does nothing if it is already open.
    pub fn open(&self) -> Result<()> {
        self.check_disposed()?;

        let mut connection = self.connection.lock();
        let connection = connection.as_mut().ok_or_else(Error::disposed)?;

        if !connection.is_open() {
            connection.open()?;
            tracing::debug!(target: "rowbind::db", "connection opened");
        }

        Ok(())
    }

    /// Closes the connection. Does nothing if it is already closed.
    ///
    /// An active transaction is rolled back first and its handle released
    /// even if the rollback fails, so a reopened connection starts clean.
    pub fn close(&self) -> Result<()> {
        self.check_disposed()?;

        match self.rollback_transaction() {
            Ok(true) => {
                tracing::warn!(target: "rowbind::db", "close rolled back the active transaction");
            }
            Ok(false) => {}
            Err(err) => {
                tracing::warn!(target: "rowbind::db", error = %err, "rollback failed during close");
            }
        }

        self.close_connection()
    }

    /// Starts a transaction that every command created afterwards enlists
    /// in, until it is committed or rolled back.
    pub fn begin_transaction(&self, isolation: IsolationLevel) -> Result<()> {
        self.check_disposed()?;

        let mut connection = self.connection.lock();
        let mut transaction = self.transaction.lock();

        if transaction.is_some() {
            return Err(Error::transaction_already_active());
        }

        let connection = connection.as_mut().ok_or_else(Error::disposed)?;
        if !connection.is_open() {
            return Err(Error::connection_not_open());
        }

        *transaction = Some(connection.begin_transaction(isolation)?);
        tracing::debug!(target: "rowbind::txn", ?isolation, "transaction started");
        Ok(())
    }

    /// Commits the active transaction. The handle is released even if the
    /// commit fails.
    pub fn commit(&self) -> Result<()> {
        self.check_disposed()?;

        let mut transaction = self.transaction.lock();
        let Some(active) = transaction.take() else {
            return Err(Error::no_active_transaction().context(crate::err!("commit")));
        };

        active.commit()?;
        tracing::debug!(target: "rowbind::txn", "transaction committed");
        Ok(())
    }

    /// Rolls back the active transaction. The handle is released even if the
    /// rollback fails.
    pub fn rollback(&self) -> Result<()> {
        self.check_disposed()?;

        if !self.rollback_transaction()? {
            return Err(Error::no_active_transaction().context(crate::err!("rollback")));
        }

        Ok(())
    }

    /// Rolls back any active transaction, closes the connection and releases
    /// it. Later calls do nothing.
    ///
    /// Teardown failures are logged and not returned; one failing step does
    /// not skip the others. Every other operation fails once disposed.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }

        if let Err(err) = self.rollback_transaction() {
            tracing::warn!(target: "rowbind::db", error = %err, "rollback failed during dispose");
        }

        if let Err(err) = self.close_connection() {
            tracing::warn!(target: "rowbind::db", error = %err, "close failed during dispose");
        }

        drop(self.connection.lock().take());
        tracing::debug!(target: "rowbind::db", "disposed");
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    fn check_disposed(&self) -> Result<()> {
        if self.is_disposed() {
            Err(Error::disposed())
        } else {
            Ok(())
        }
    }

    /// Returns `false` when there was no transaction to roll back.
    fn rollback_transaction(&self) -> Result<bool> {
        let mut transaction = self.transaction.lock();
        let Some(active) = transaction.take() else {
            return Ok(false);
        };

        active.rollback()?;
        tracing::debug!(target: "rowbind::txn", "transaction rolled back");
        Ok(true)
    }

    fn close_connection(&self) -> Result<()> {
        let mut connection = self.connection.lock();
        let Some(connection) = connection.as_mut() else {
            return Ok(());
        };

        if connection.is_open() {
            connection.close()?;
            tracing::debug!(target: "rowbind::db", "connection closed");
        }

        Ok(())
    }
}

impl Drop for Db {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("driver", &self.driver)
            .field("state", &self.state())
            .field("in_transaction", &self.in_transaction())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
