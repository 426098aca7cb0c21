use super::{DbType, ProviderType, Value};

/// Which way a parameter's value flows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Input,
    Output,
    InputOutput,
    ReturnValue,
}

impl Direction {
    /// Returns `true` if the parameter carries a value into the command.
    pub fn is_input(self) -> bool {
        matches!(self, Direction::Input | Direction::InputOutput)
    }

    /// Returns `true` if the provider writes a value back after execution.
    pub fn is_output(self) -> bool {
        !matches!(self, Direction::Input)
    }
}

/// A named, typed value attached to a command prior to execution.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter name, including its placeholder prefix (`@id`)
    pub name: String,

    /// Bound value; absent values are [`Value::Null`], never a missing entry
    pub value: Value,

    pub direction: Direction,

    /// Provider-neutral type code. `None` lets the provider infer it.
    pub db_type: Option<DbType>,

    /// Provider-specific type code, set only when `db_type` could not be
    /// expressed with [`DbType`].
    pub provider_type: Option<ProviderType>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Parameter {
        Parameter {
            name: name.into(),
            value: value.into(),
            direction: Direction::Input,
            db_type: None,
            provider_type: None,
        }
    }

    pub fn output(name: impl Into<String>, db_type: DbType) -> Parameter {
        Parameter {
            name: name.into(),
            value: Value::Null,
            direction: Direction::Output,
            db_type: Some(db_type),
            provider_type: None,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Parameter {
        self.direction = direction;
        self
    }

    pub fn with_db_type(mut self, db_type: DbType) -> Parameter {
        self.db_type = Some(db_type);
        self
    }

    /// The type code shown in diagnostics: declared, provider-specific, or
    /// inferred from the value.
    pub fn display_type(&self) -> String {
        if let Some(db_type) = self.db_type {
            db_type.to_string()
        } else if let Some(provider_type) = &self.provider_type {
            provider_type.to_string()
        } else {
            DbType::infer(&self.value.infer_ty()).to_string()
        }
    }
}
