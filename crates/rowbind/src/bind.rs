//! Turns arguments into command parameters.

mod params;
pub use params::Params;

mod placeholder;

mod to_value;
pub use to_value::{ListItem, ToValue};

use crate::{
    schema::{self, Procedure},
    Error, Result,
};

use rowbind_core::{
    stmt::{DbType, Parameter, Value},
    Command,
};
use std::collections::HashSet;

/// Binds parameters onto a single command.
///
/// Scalar and collection binds track the names they generate, so every
/// generated name is unique within the command and each placeholder is
/// rewritten at most once. [`add_parameter`](Binder::add_parameter) bypasses
/// that bookkeeping.
pub struct Binder<'a> {
    command: &'a mut dyn Command,

    /// Placeholder prefix added to names that lack it
    prefix: char,

    bound: HashSet<String>,
}

impl<'a> Binder<'a> {
    pub fn new(command: &'a mut dyn Command, prefix: char) -> Binder<'a> {
        Binder {
            command,
            prefix,
            bound: HashSet::new(),
        }
    }

    pub fn prefix(&self) -> char {
        self.prefix
    }

    pub fn command(&self) -> &dyn Command {
        &*self.command
    }

    /// Binds `value` under `name`: a [`Value::List`] goes through
    /// [`bind_collection`](Binder::bind_collection), anything else through
    /// [`bind_scalar`](Binder::bind_scalar).
    pub fn bind(&mut self, name: &str, value: Value) -> Result<()> {
        match value {
            Value::List(items) => self.bind_collection(name, items),
            value => self.bind_scalar(name, value),
        }
    }

    /// Adds one input parameter. The command text is not changed.
    pub fn bind_scalar(&mut self, name: &str, value: Value) -> Result<()> {
        if value.is_list() {
            return Err(Error::invalid_argument(
                "value",
                format!("parameter `{name}` holds a list; bind it as a collection"),
            ));
        }

        let name = self.qualify(name);
        self.claim(&name)?;
        self.command.add_parameter(Parameter::new(name, value));
        Ok(())
    }

    /// Adds one input parameter per item, named `{name}_{i}`, then replaces
    /// the `name` placeholder in the command text with the generated names.
    ///
    /// An empty collection replaces the placeholder with `NULL`, so
    /// `x in (@ids)` matches no rows.
    pub fn bind_collection(&mut self, name: &str, items: Vec<Value>) -> Result<()> {
        let name = self.qualify(name);
        self.claim(&name)?;

        let mut generated = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            if item.is_list() {
                return Err(Error::invalid_argument(
                    "items",
                    format!("collection `{name}` holds a nested list at index {i}"),
                ));
            }

            let item_name = format!("{name}_{i}");
            self.claim(&item_name)?;
            self.command
                .add_parameter(Parameter::new(item_name.clone(), item));
            generated.push(item_name);
        }

        let replacement = if generated.is_empty() {
            "NULL".to_string()
        } else {
            generated.join(", ")
        };

        let text = placeholder::replace(self.command.text(), &name, &replacement);
        self.command.set_text(text);
        Ok(())
    }

    /// Adds `parameter` exactly as given.
    pub fn add_parameter(&mut self, parameter: Parameter) {
        self.command.add_parameter(parameter);
    }

    /// Binds every named value of `params`.
    pub fn bind_params<P: Params + ?Sized>(&mut self, params: &P) -> Result<()> {
        params.bind(self)
    }

    /// Binds the `#[param]` fields of a procedure argument object.
    ///
    /// Each declared type code is tried as a [`DbType`] first, then as a
    /// provider-specific type name; when neither matches the type is left
    /// for the provider to infer. Values are not expanded.
    pub fn bind_procedure<T: Procedure>(&mut self, args: &T) -> Result<()> {
        let descriptor = schema::procedure_descriptor::<T>();

        if descriptor.declaration().is_none() {
            return Err(Error::missing_declaration(
                descriptor.type_name(),
                "#[procedure]",
            ));
        }

        for param in descriptor.params() {
            let mut parameter =
                Parameter::new(self.qualify(param.name), param.get(args))
                    .with_direction(param.direction);

            if let Some(type_name) = param.db_type {
                match DbType::from_name(type_name) {
                    Some(db_type) => parameter.db_type = Some(db_type),
                    None => {
                        parameter.provider_type = self.command.resolve_provider_type(type_name)
                    }
                }
            }

            self.command.add_parameter(parameter);
        }

        Ok(())
    }

    fn qualify(&self, name: &str) -> String {
        if name.starts_with(self.prefix) {
            name.to_string()
        } else {
            format!("{}{name}", self.prefix)
        }
    }

    fn claim(&mut self, name: &str) -> Result<()> {
        if self.bound.insert(name.to_string()) {
            Ok(())
        } else {
            Err(Error::invalid_argument(
                "name",
                format!("parameter `{name}` is bound more than once"),
            ))
        }
    }
}

impl core::fmt::Debug for Binder<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Binder")
            .field("command", &self.command)
            .field("prefix", &self.prefix)
            .finish()
    }
}
