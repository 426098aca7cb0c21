use super::Db;
use crate::{driver::Driver, Result};

use std::time::Duration;

/// Settings applied to every command a [`Db`] creates.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) command_timeout: Duration,
    pub(crate) parameter_prefix: char,
    pub(crate) trace_commands: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            command_timeout: Duration::from_secs(30),
            parameter_prefix: '@',
            trace_commands: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Timeout set on every command. Defaults to 30 seconds.
    pub fn command_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.config.command_timeout = timeout;
        self
    }

    /// Character that starts a parameter placeholder in command text.
    /// Defaults to `@`.
    pub fn parameter_prefix(&mut self, prefix: char) -> &mut Self {
        self.config.parameter_prefix = prefix;
        self
    }

    /// Emits each created command, with its parameters, as a `DEBUG` event
    /// on the `rowbind::command` target.
    pub fn trace_commands(&mut self, enabled: bool) -> &mut Self {
        self.config.trace_commands = enabled;
        self
    }

    /// Connects using a built-in driver chosen by the URL scheme and opens
    /// the connection.
    pub fn connect(&mut self, url: &str) -> Result<Db> {
        let db = self.build(super::Connect::new(url)?)?;
        db.open()?;
        Ok(db)
    }

    /// Creates a `Db` around `driver`. The connection starts closed.
    pub fn build(&mut self, driver: impl Driver) -> Result<Db> {
        Db::new(Box::new(driver), self.config.clone())
    }
}
