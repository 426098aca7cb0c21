use crate::{materialize::Record, Result};

use rowbind_core::stmt::{Type, Value};

/// A type whose fields map to the columns of a result set.
///
/// Implemented with `#[derive(Entity)]`. The `Default` impl is the factory
/// used to construct each row's instance.
pub trait Entity: Default + 'static {
    /// The type-level `#[entity(..)]` declaration, or `None` when the type
    /// does not carry one.
    fn declaration() -> Option<EntityDeclaration>;

    /// Scans the type's mapping declarations. Called at most once per type;
    /// use [`descriptor`](crate::schema::descriptor) to get the cached result.
    fn build_descriptor() -> EntityDescriptor<Self>;
}

/// Where an entity lives in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDeclaration {
    pub schema: Option<&'static str>,
    pub table: Option<&'static str>,

    /// Primary key column
    pub key: Option<&'static str>,
}

/// How a type's members correspond to columns. Immutable once built.
pub struct EntityDescriptor<T> {
    type_name: &'static str,
    declaration: Option<EntityDeclaration>,
    fields: Vec<FieldMapping<T>>,
    nested: Vec<NestedMapping<T>>,
}

/// One scalar member and the column it maps to.
pub struct FieldMapping<T> {
    /// Rust field name
    pub member: &'static str,

    /// Column name
    pub column: &'static str,

    /// Target type, with any `Option` wrapper removed
    pub ty: Type,

    /// `true` when the field is declared as `Option<_>`
    pub nullable: bool,

    set: fn(&mut T, Value) -> Result<()>,
    get: fn(&T) -> Value,
}

/// One member whose type is itself an entity.
pub struct NestedMapping<T> {
    pub member: &'static str,

    /// Type name of the nested entity
    pub target: &'static str,

    load: Box<dyn Fn(&mut T, &dyn Record) -> Result<()> + Send + Sync>,
}

impl<T: Entity> EntityDescriptor<T> {
    pub fn new(fields: Vec<FieldMapping<T>>, nested: Vec<NestedMapping<T>>) -> Self {
        EntityDescriptor {
            type_name: std::any::type_name::<T>(),
            declaration: T::declaration(),
            fields,
            nested,
        }
    }
}

impl<T> EntityDescriptor<T> {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn declaration(&self) -> Option<&EntityDeclaration> {
        self.declaration.as_ref()
    }

    pub fn fields(&self) -> &[FieldMapping<T>] {
        &self.fields
    }

    pub fn nested(&self) -> &[NestedMapping<T>] {
        &self.nested
    }

    /// Looks up a field mapping by column name.
    pub fn field(&self, column: &str) -> Option<&FieldMapping<T>> {
        self.fields.iter().find(|field| field.column == column)
    }

    /// Table name: the declared one, or the type's own name.
    pub fn table_name(&self) -> &'static str {
        self.declaration
            .and_then(|declaration| declaration.table)
            .unwrap_or_else(|| {
                self.type_name
                    .rsplit("::")
                    .next()
                    .unwrap_or(self.type_name)
            })
    }
}

impl<T> core::fmt::Debug for EntityDescriptor<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("EntityDescriptor")
            .field("type_name", &self.type_name)
            .field("declaration", &self.declaration)
            .field("fields", &self.fields)
            .field("nested", &self.nested)
            .finish()
    }
}

impl<T> FieldMapping<T> {
    pub fn new(
        member: &'static str,
        column: &'static str,
        ty: Type,
        nullable: bool,
        set: fn(&mut T, Value) -> Result<()>,
        get: fn(&T) -> Value,
    ) -> Self {
        FieldMapping {
            member,
            column,
            ty,
            nullable,
            set,
            get,
        }
    }

    /// Stores a raw column value into the field. Null becomes the field's
    /// default value.
    pub fn set(&self, target: &mut T, value: Value) -> Result<()> {
        (self.set)(target, value)
    }

    pub fn get(&self, target: &T) -> Value {
        (self.get)(target)
    }
}

impl<T> core::fmt::Debug for FieldMapping<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("FieldMapping")
            .field("member", &self.member)
            .field("column", &self.column)
            .field("ty", &self.ty)
            .field("nullable", &self.nullable)
            .finish()
    }
}

impl<T: 'static> NestedMapping<T> {
    /// Maps `member` to nested entity `U`. On load, a default `U` is
    /// populated from the same row using `U`'s own field mappings, then
    /// handed to `set`. `U`'s nested mappings are not followed.
    pub fn new<U: Entity>(member: &'static str, set: fn(&mut T, U)) -> Self {
        NestedMapping {
            member,
            target: std::any::type_name::<U>(),
            load: Box::new(move |target, record| {
                let mut nested = U::default();
                crate::materialize::populate_fields(
                    &crate::schema::descriptor::<U>(),
                    &mut nested,
                    record,
                )?;
                set(target, nested);
                Ok(())
            }),
        }
    }

    pub fn load(&self, target: &mut T, record: &dyn Record) -> Result<()> {
        (self.load)(target, record)
    }
}

impl<T> core::fmt::Debug for NestedMapping<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("NestedMapping")
            .field("member", &self.member)
            .field("target", &self.target)
            .finish()
    }
}
