use super::Error;

/// The lifecycle rule that an operation broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// The `Db` has been disposed
    Disposed,

    /// The connection is closed
    ConnectionNotOpen,

    /// `begin_transaction` while a transaction is active
    TransactionAlreadyActive,

    /// `commit`/`rollback` with no active transaction
    NoActiveTransaction,
}

#[derive(Debug)]
pub(super) struct LifecycleViolation {
    violation: Lifecycle,
}

impl std::error::Error for LifecycleViolation {}

impl core::fmt::Display for LifecycleViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let message = match self.violation {
            Lifecycle::Disposed => "the database handle has been disposed",
            Lifecycle::ConnectionNotOpen => "the connection is not open",
            Lifecycle::TransactionAlreadyActive => "a transaction is already active",
            Lifecycle::NoActiveTransaction => "no transaction is active",
        };
        write!(f, "lifecycle violation: {message}")
    }
}

impl Error {
    pub fn lifecycle(violation: Lifecycle) -> Error {
        Error::from(super::ErrorKind::Lifecycle(LifecycleViolation { violation }))
    }

    /// Operation attempted on a disposed `Db`.
    pub fn disposed() -> Error {
        Error::lifecycle(Lifecycle::Disposed)
    }

    pub fn connection_not_open() -> Error {
        Error::lifecycle(Lifecycle::ConnectionNotOpen)
    }

    pub fn transaction_already_active() -> Error {
        Error::lifecycle(Lifecycle::TransactionAlreadyActive)
    }

    pub fn no_active_transaction() -> Error {
        Error::lifecycle(Lifecycle::NoActiveTransaction)
    }

    /// Returns the violated rule, if this is a lifecycle error.
    pub fn lifecycle_violation(&self) -> Option<Lifecycle> {
        self.chain().find_map(|err| match err.kind() {
            super::ErrorKind::Lifecycle(err) => Some(err.violation),
            _ => None,
        })
    }

    /// Returns `true` if this error is any lifecycle violation.
    pub fn is_lifecycle(&self) -> bool {
        self.lifecycle_violation().is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.lifecycle_violation() == Some(Lifecycle::Disposed)
    }

    pub fn is_connection_not_open(&self) -> bool {
        self.lifecycle_violation() == Some(Lifecycle::ConnectionNotOpen)
    }

    pub fn is_transaction_already_active(&self) -> bool {
        self.lifecycle_violation() == Some(Lifecycle::TransactionAlreadyActive)
    }

    pub fn is_no_active_transaction(&self) -> bool {
        self.lifecycle_violation() == Some(Lifecycle::NoActiveTransaction)
    }
}
