mod command;
pub use command::{Command, CommandState};

mod cursor;
pub use cursor::{BufferedCursor, Cursor};

mod transaction;
pub use transaction::{IsolationLevel, Transaction};

use crate::Result;

use std::fmt::Debug;

/// Creates provider connections.
pub trait Driver: Debug + Send + Sync + 'static {
    /// Returns a new connection handle. The connection starts closed.
    fn connect(&self) -> Result<Box<dyn Connection>>;
}

/// A provider connection.
///
/// Implementations do not need to be thread-safe; `Db` serializes every call
/// behind its connection mutex.
pub trait Connection: Debug + Send {
    fn is_open(&self) -> bool;

    fn open(&mut self) -> Result<()>;

    fn close(&mut self) -> Result<()>;

    /// Creates an empty command bound to this connection.
    fn create_command(&mut self) -> Result<Box<dyn Command>>;

    fn begin_transaction(&mut self, isolation: IsolationLevel) -> Result<Box<dyn Transaction>>;
}
