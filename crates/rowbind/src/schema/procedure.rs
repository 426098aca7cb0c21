use rowbind_core::stmt::{CommandType, Direction, Value};

/// An argument object for a stored procedure.
///
/// Implemented with `#[derive(Procedure)]`. A type derived without a
/// `#[procedure(..)]` declaration compiles, but cannot be used to create a
/// command.
pub trait Procedure: Sized + 'static {
    fn declaration() -> Option<ProcedureDeclaration>;

    fn build_descriptor() -> ProcedureDescriptor<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcedureDeclaration {
    pub schema: Option<&'static str>,
    pub name: &'static str,
    pub command_type: CommandType,
}

impl ProcedureDeclaration {
    /// The command text: `schema.name`, or `name` without a schema.
    pub fn command_text(&self) -> String {
        match self.schema {
            Some(schema) => format!("{schema}.{}", self.name),
            None => self.name.to_string(),
        }
    }
}

pub struct ProcedureDescriptor<T> {
    type_name: &'static str,
    declaration: Option<ProcedureDeclaration>,
    params: Vec<ProcedureParam<T>>,
}

/// A `#[param(..)]` member.
pub struct ProcedureParam<T> {
    pub member: &'static str,

    /// Declared parameter name. The binder adds the placeholder prefix when
    /// it is missing.
    pub name: &'static str,

    pub direction: Direction,

    /// Declared type code name. Either a `DbType` variant or a
    /// provider-specific type name.
    pub db_type: Option<&'static str>,

    get: fn(&T) -> Value,
}

impl<T: Procedure> ProcedureDescriptor<T> {
    pub fn new(params: Vec<ProcedureParam<T>>) -> Self {
        ProcedureDescriptor {
            type_name: std::any::type_name::<T>(),
            declaration: T::declaration(),
            params,
        }
    }
}

impl<T> ProcedureDescriptor<T> {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn declaration(&self) -> Option<&ProcedureDeclaration> {
        self.declaration.as_ref()
    }

    pub fn params(&self) -> &[ProcedureParam<T>] {
        &self.params
    }
}

impl<T> ProcedureParam<T> {
    pub fn new(
        member: &'static str,
        name: &'static str,
        direction: Direction,
        db_type: Option<&'static str>,
        get: fn(&T) -> Value,
    ) -> Self {
        ProcedureParam {
            member,
            name,
            direction,
            db_type,
            get,
        }
    }

    pub fn get(&self, target: &T) -> Value {
        (self.get)(target)
    }
}

impl<T> core::fmt::Debug for ProcedureDescriptor<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("ProcedureDescriptor")
            .field("type_name", &self.type_name)
            .field("declaration", &self.declaration)
            .field("params", &self.params)
            .finish()
    }
}

impl<T> core::fmt::Debug for ProcedureParam<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("ProcedureParam")
            .field("member", &self.member)
            .field("name", &self.name)
            .field("direction", &self.direction)
            .field("db_type", &self.db_type)
            .finish()
    }
}
