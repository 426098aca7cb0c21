use super::{Cursor, Transaction};
use crate::{
    async_trait,
    stmt::{CommandType, Parameter, ProviderType, Value},
    Result,
};

use std::{fmt::Debug, time::Duration};

/// Text, type, timeout and parameters of a command. Providers embed one and
/// expose it through [`Command::state`].
#[derive(Debug, Clone, PartialEq)]
pub struct CommandState {
    pub text: String,
    pub command_type: CommandType,
    pub timeout: Duration,
    pub parameters: Vec<Parameter>,
}

impl Default for CommandState {
    fn default() -> Self {
        CommandState {
            text: String::new(),
            command_type: CommandType::Text,
            timeout: Duration::from_secs(30),
            parameters: vec![],
        }
    }
}

/// A provider command. Created unexecuted by [`Connection::create_command`];
/// the caller owns it and disposes it by dropping.
///
/// [`Connection::create_command`]: super::Connection::create_command
#[async_trait]
pub trait Command: Debug + Send {
    fn state(&self) -> &CommandState;

    fn state_mut(&mut self) -> &mut CommandState;

    /// Enlists the command in `transaction`, or in none.
    fn set_transaction(&mut self, transaction: Option<&dyn Transaction>);

    fn has_transaction(&self) -> bool;

    /// Looks up a provider-specific type code by name. Returns `None` when
    /// the provider has no such type.
    fn resolve_provider_type(&self, _name: &str) -> Option<ProviderType> {
        None
    }

    fn execute_reader(&mut self) -> Result<Box<dyn Cursor>>;

    /// Returns the number of rows affected.
    fn execute_non_query(&mut self) -> Result<u64>;

    /// Returns the first column of the first row, or `Value::Null`.
    fn execute_scalar(&mut self) -> Result<Value> {
        let mut cursor = self.execute_reader()?;
        if cursor.read()? && cursor.field_count() > 0 {
            cursor.get(0)
        } else {
            Ok(Value::Null)
        }
    }

    /// Returns `true` if the `*_async` methods are natively asynchronous.
    /// When `false`, callers run the synchronous methods on a blocking task.
    fn is_async(&self) -> bool {
        false
    }

    async fn execute_reader_async(&mut self) -> Result<Box<dyn Cursor>> {
        self.execute_reader()
    }

    async fn execute_non_query_async(&mut self) -> Result<u64> {
        self.execute_non_query()
    }

    async fn execute_scalar_async(&mut self) -> Result<Value> {
        self.execute_scalar()
    }

    fn text(&self) -> &str {
        &self.state().text
    }

    fn set_text(&mut self, text: String) {
        self.state_mut().text = text;
    }

    fn command_type(&self) -> CommandType {
        self.state().command_type
    }

    fn parameters(&self) -> &[Parameter] {
        &self.state().parameters
    }

    fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters().iter().find(|p| p.name == name)
    }

    fn add_parameter(&mut self, parameter: Parameter) {
        self.state_mut().parameters.push(parameter);
    }
}
