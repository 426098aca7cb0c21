pub mod driver;
pub use driver::{Command, Connection, Cursor, Driver, Transaction};

mod error;
pub use error::{Error, IntoError, Lifecycle};

pub mod stmt;

pub mod table;
pub use table::{DataSet, Table};

/// A Result type alias that uses rowbind's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
