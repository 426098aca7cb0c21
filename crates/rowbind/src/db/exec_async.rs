use super::{Db, IntoCommand};
use crate::{
    driver::{Command, Cursor},
    materialize,
    schema::Entity,
    stmt::Value,
    DataSet, Error, Result, Table,
};

use tokio_util::sync::CancellationToken;

/// Which execution method to run.
#[derive(Debug, Clone, Copy)]
enum Execute {
    Reader,
    NonQuery,
    Scalar,
}

enum Executed {
    Reader(Box<dyn Cursor>),
    NonQuery(u64),
    Scalar(Value),
}

impl Execute {
    fn run(self, command: &mut dyn Command) -> Result<Executed> {
        Ok(match self {
            Execute::Reader => Executed::Reader(command.execute_reader()?),
            Execute::NonQuery => Executed::NonQuery(command.execute_non_query()?),
            Execute::Scalar => Executed::Scalar(command.execute_scalar()?),
        })
    }

    async fn run_async(self, command: &mut dyn Command) -> Result<Executed> {
        Ok(match self {
            Execute::Reader => Executed::Reader(command.execute_reader_async().await?),
            Execute::NonQuery => Executed::NonQuery(command.execute_non_query_async().await?),
            Execute::Scalar => Executed::Scalar(command.execute_scalar_async().await?),
        })
    }
}

/// Runs `command`, racing it against `cancel`.
///
/// Natively asynchronous commands are awaited in place. Others run on the
/// blocking pool; when cancellation wins the race the blocking call runs to
/// completion in the background and its result is dropped.
async fn execute(
    mut command: Box<dyn Command>,
    what: Execute,
    cancel: &CancellationToken,
) -> Result<Executed> {
    if cancel.is_cancelled() {
        return Err(Error::cancelled());
    }

    if command.is_async() {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::cancelled()),
            res = what.run_async(&mut *command) => res,
        }
    } else {
        let task = tokio::task::spawn_blocking(move || what.run(&mut *command));

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::cancelled()),
            res = task => match res {
                Ok(res) => res,
                Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                Err(_) => Err(Error::cancelled()),
            },
        }
    }
}

impl Db {
    /// Like [`execute_reader`](Db::execute_reader), observing `cancel`.
    ///
    /// A token that is already cancelled fails with a cancellation error
    /// before the command is created.
    pub async fn execute_reader_async(
        &self,
        statement: impl IntoCommand,
        cancel: &CancellationToken,
    ) -> Result<Box<dyn Cursor>> {
        match self.execute_async(statement, Execute::Reader, cancel).await? {
            Executed::Reader(cursor) => Ok(cursor),
            _ => unreachable!(),
        }
    }

    pub async fn execute_scalar_async(
        &self,
        statement: impl IntoCommand,
        cancel: &CancellationToken,
    ) -> Result<Value> {
        match self.execute_async(statement, Execute::Scalar, cancel).await? {
            Executed::Scalar(value) => Ok(value),
            _ => unreachable!(),
        }
    }

    pub async fn execute_non_query_async(
        &self,
        statement: impl IntoCommand,
        cancel: &CancellationToken,
    ) -> Result<u64> {
        match self.execute_async(statement, Execute::NonQuery, cancel).await? {
            Executed::NonQuery(count) => Ok(count),
            _ => unreachable!(),
        }
    }

    pub async fn execute_table_async(
        &self,
        statement: impl IntoCommand,
        cancel: &CancellationToken,
    ) -> Result<Table> {
        let mut cursor = self.execute_reader_async(statement, cancel).await?;
        materialize::table_from_cursor(&mut *cursor, "Table")
    }

    pub async fn execute_data_set_async(
        &self,
        statement: impl IntoCommand,
        cancel: &CancellationToken,
    ) -> Result<DataSet> {
        let mut cursor = self.execute_reader_async(statement, cancel).await?;
        materialize::data_set_from_cursor(&mut *cursor)
    }

    pub async fn query_async<T: Entity>(
        &self,
        statement: impl IntoCommand,
        cancel: &CancellationToken,
    ) -> Result<Vec<T>> {
        let mut cursor = self.execute_reader_async(statement, cancel).await?;
        materialize::entities_from_cursor(Some(&mut *cursor))
    }

    pub async fn single_or_default_async<T: Entity>(
        &self,
        statement: impl IntoCommand,
        cancel: &CancellationToken,
    ) -> Result<Option<T>> {
        let mut cursor = self.execute_reader_async(statement, cancel).await?;
        materialize::next_entity_from_cursor(&mut *cursor)
    }

    async fn execute_async(
        &self,
        statement: impl IntoCommand,
        what: Execute,
        cancel: &CancellationToken,
    ) -> Result<Executed> {
        if cancel.is_cancelled() {
            return Err(Error::cancelled());
        }

        let command = statement.into_command(self)?;
        execute(command, what, cancel).await
    }
}
