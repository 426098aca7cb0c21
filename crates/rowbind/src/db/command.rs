use super::Db;
use crate::{
    bind::{Binder, Params},
    driver::{Command, Transaction},
    schema::{self, Procedure},
    stmt::{CommandType, Parameter},
    Error, Result,
};

use std::fmt::Write;

/// Something [`Db`] can turn into a ready command.
///
/// Implemented for the three ways of specifying a command:
///
/// * `&str`, or `(&str, params)` with any [`Params`]: SQL text with named
///   arguments, expanded as needed.
/// * `(CommandType, &str, &[Parameter])`: text of any command type with
///   explicit parameters, added as given.
/// * [`Call`]: a `#[derive(Procedure)]` argument object.
pub trait IntoCommand {
    fn into_command(self, db: &Db) -> Result<Box<dyn Command>>;
}

/// Calls the stored procedure declared on `P`.
#[derive(Debug, Clone, Copy)]
pub struct Call<'a, P>(pub &'a P);

impl IntoCommand for &str {
    fn into_command(self, db: &Db) -> Result<Box<dyn Command>> {
        db.create_command(self, ())
    }
}

impl IntoCommand for &String {
    fn into_command(self, db: &Db) -> Result<Box<dyn Command>> {
        db.create_command(self, ())
    }
}

impl<P: Params> IntoCommand for (&str, P) {
    fn into_command(self, db: &Db) -> Result<Box<dyn Command>> {
        db.create_command(self.0, self.1)
    }
}

impl IntoCommand for (CommandType, &str, &[Parameter]) {
    fn into_command(self, db: &Db) -> Result<Box<dyn Command>> {
        db.create_command_with_parameters(self.0, self.1, self.2)
    }
}

impl<P: Procedure> IntoCommand for Call<'_, P> {
    fn into_command(self, db: &Db) -> Result<Box<dyn Command>> {
        db.create_procedure_command(self.0)
    }
}

impl Db {
    /// Creates a ready, unexecuted command.
    ///
    /// Sets the text, type and configured timeout, enlists the command in
    /// `transaction` (or else the active transaction, if any), then runs
    /// `bind` against it. Fails if the `Db` is disposed or the connection is
    /// not open.
    pub fn create_command_with(
        &self,
        command_type: CommandType,
        text: &str,
        transaction: Option<&dyn Transaction>,
        bind: impl FnOnce(&mut Binder<'_>) -> Result<()>,
    ) -> Result<Box<dyn Command>> {
        if self.is_disposed() {
            return Err(Error::disposed());
        }

        let mut command = {
            let mut connection = self.connection.lock();
            let connection = connection.as_mut().ok_or_else(Error::disposed)?;

            if !connection.is_open() {
                return Err(Error::connection_not_open());
            }

            let mut command = connection.create_command()?;
            {
                let state = command.state_mut();
                state.text = text.to_string();
                state.command_type = command_type;
                state.timeout = self.config().command_timeout;
            }

            match transaction {
                Some(transaction) => command.set_transaction(Some(transaction)),
                None => command.set_transaction(self.transaction.lock().as_deref()),
            }

            command
        };

        bind(&mut Binder::new(&mut *command, self.config().parameter_prefix))?;

        if self.config().trace_commands {
            tracing::debug!(
                target: "rowbind::command",
                command = %render_command(&*command),
                "command created"
            );
        }

        Ok(command)
    }

    /// Creates a text command, binding each named value of `params`.
    pub fn create_command(&self, sql: &str, params: impl Params) -> Result<Box<dyn Command>> {
        self.create_command_with(CommandType::Text, sql, None, |binder| {
            binder.bind_params(&params)
        })
    }

    /// Creates a command of `command_type` with `parameters` added as given.
    pub fn create_command_with_parameters(
        &self,
        command_type: CommandType,
        text: &str,
        parameters: &[Parameter],
    ) -> Result<Box<dyn Command>> {
        self.create_command_with(command_type, text, None, |binder| {
            binder.bind_params(parameters)
        })
    }

    /// Creates a command for the procedure declared on `P`, with a parameter
    /// for each `#[param]` field of `args`.
    ///
    /// Fails with a missing-declaration error if `P` has no
    /// `#[procedure(..)]` attribute.
    pub fn create_procedure_command<P: Procedure>(&self, args: &P) -> Result<Box<dyn Command>> {
        let descriptor = schema::procedure_descriptor::<P>();
        let Some(declaration) = descriptor.declaration() else {
            return Err(Error::missing_declaration(
                descriptor.type_name(),
                "#[procedure]",
            ));
        };

        self.create_command_with(
            declaration.command_type,
            &declaration.command_text(),
            None,
            |binder| binder.bind_procedure(args),
        )
    }
}

/// Renders a command's text and parameters for diagnostics. The output is
/// not executable SQL.
pub fn render_command(command: &dyn Command) -> String {
    let mut out = format!("{:?}: {}", command.command_type(), command.text());

    for parameter in command.parameters() {
        let _ = write!(
            out,
            "\n  {} = {} ({}, {:?})",
            parameter.name,
            parameter.value,
            parameter.display_type(),
            parameter.direction
        );
    }

    out
}
