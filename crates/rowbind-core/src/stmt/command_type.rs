/// How a provider interprets a command's text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandType {
    /// Literal SQL text
    #[default]
    Text,

    /// The text names a stored procedure
    StoredProcedure,

    /// The text names a table whose rows are returned in full
    TableDirect,
}
