use super::{Call, Db, IntoCommand};
use crate::{
    driver::{Command, Cursor},
    materialize,
    schema::{Entity, Procedure},
    stmt::Value,
    DataSet, Result, Table,
};

impl Db {
    /// Creates a ready, unexecuted command.
    pub fn command(&self, statement: impl IntoCommand) -> Result<Box<dyn Command>> {
        statement.into_command(self)
    }

    /// Executes `statement` and returns a cursor over its results.
    pub fn execute_reader(&self, statement: impl IntoCommand) -> Result<Box<dyn Cursor>> {
        statement.into_command(self)?.execute_reader()
    }

    /// Returns the first column of the first row, or `Value::Null` when the
    /// result is empty.
    pub fn execute_scalar(&self, statement: impl IntoCommand) -> Result<Value> {
        statement.into_command(self)?.execute_scalar()
    }

    /// Returns the number of rows affected.
    pub fn execute_non_query(&self, statement: impl IntoCommand) -> Result<u64> {
        statement.into_command(self)?.execute_non_query()
    }

    /// Buffers the first result set.
    pub fn execute_table(&self, statement: impl IntoCommand) -> Result<Table> {
        let mut cursor = self.execute_reader(statement)?;
        materialize::table_from_cursor(&mut *cursor, "Table")
    }

    /// Buffers every result set.
    pub fn execute_data_set(&self, statement: impl IntoCommand) -> Result<DataSet> {
        let mut cursor = self.execute_reader(statement)?;
        materialize::data_set_from_cursor(&mut *cursor)
    }

    /// Maps each row of the first result set to a `T`.
    pub fn query<T: Entity>(&self, statement: impl IntoCommand) -> Result<Vec<T>> {
        let mut cursor = self.execute_reader(statement)?;
        materialize::entities_from_cursor(Some(&mut *cursor))
    }

    /// Maps the first row to a `T`, or returns `None` when there are no rows.
    pub fn single_or_default<T: Entity>(&self, statement: impl IntoCommand) -> Result<Option<T>> {
        let mut cursor = self.execute_reader(statement)?;
        materialize::next_entity_from_cursor(&mut *cursor)
    }

    pub fn exec_procedure_reader<P: Procedure>(&self, args: &P) -> Result<Box<dyn Cursor>> {
        self.execute_reader(Call(args))
    }

    pub fn exec_procedure_scalar<P: Procedure>(&self, args: &P) -> Result<Value> {
        self.execute_scalar(Call(args))
    }

    pub fn exec_procedure_non_query<P: Procedure>(&self, args: &P) -> Result<u64> {
        self.execute_non_query(Call(args))
    }

    pub fn exec_procedure_table<P: Procedure>(&self, args: &P) -> Result<Table> {
        self.execute_table(Call(args))
    }

    pub fn exec_procedure_query<T: Entity, P: Procedure>(&self, args: &P) -> Result<Vec<T>> {
        self.query(Call(args))
    }

    pub fn exec_procedure_single_or_default<T: Entity, P: Procedure>(
        &self,
        args: &P,
    ) -> Result<Option<T>> {
        self.single_or_default(Call(args))
    }
}
