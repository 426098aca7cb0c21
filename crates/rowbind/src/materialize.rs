//! Conversions between result sets and mapped entities.

use crate::{
    schema::{self, Entity, EntityDescriptor},
    Error, Result,
};

use rowbind_core::{
    stmt::{Type, Value},
    table::Row,
    Cursor, DataSet, Table,
};

/// A single row that column values can be read from by name.
pub trait Record {
    /// Raw value of `column`. Fails if the row has no such column.
    fn value(&self, column: &str) -> Result<Value>;
}

/// The row a cursor is currently positioned on.
struct CursorRow<'a> {
    cursor: &'a dyn Cursor,
}

impl Record for CursorRow<'_> {
    fn value(&self, column: &str) -> Result<Value> {
        let Some(ordinal) = self.cursor.ordinal(column) else {
            return Err(missing_column(column));
        };
        self.cursor.get(ordinal)
    }
}

impl Record for Row<'_> {
    fn value(&self, column: &str) -> Result<Value> {
        self.get(column).cloned().ok_or_else(|| missing_column(column))
    }
}

fn missing_column(column: &str) -> Error {
    Error::invalid_result(format!("result set has no column named `{column}`"))
}

/// Reads every remaining row of `cursor` into a new `T`.
///
/// Fails with an invalid-argument error if `cursor` is `None`. Only the
/// current result set is consumed.
pub fn entities_from_cursor<T: Entity>(cursor: Option<&mut dyn Cursor>) -> Result<Vec<T>> {
    let Some(cursor) = cursor else {
        return Err(Error::invalid_argument("cursor", "no cursor was supplied"));
    };

    let descriptor = schema::descriptor::<T>();
    let mut entities = vec![];

    while cursor.read()? {
        let row = CursorRow { cursor: &*cursor };
        entities.push(materialize(&descriptor, &row)?);
    }

    Ok(entities)
}

/// Reads the next row of `cursor` into a new `T`, or returns `None` if the
/// result set is exhausted.
pub(crate) fn next_entity_from_cursor<T: Entity>(cursor: &mut dyn Cursor) -> Result<Option<T>> {
    if !cursor.read()? {
        return Ok(None);
    }

    let descriptor = schema::descriptor::<T>();
    let row = CursorRow { cursor: &*cursor };
    materialize(&descriptor, &row).map(Some)
}

/// Buffers the remaining rows of the cursor's current result set.
///
/// Column types come from the provider when it reports them, otherwise from
/// the first non-null value in the column. Unnamed columns are called
/// `Column1`, `Column2`, ...; a repeated name gets a numeric suffix.
pub fn table_from_cursor(cursor: &mut dyn Cursor, name: &str) -> Result<Table> {
    let width = cursor.field_count();

    let mut rows = vec![];
    while cursor.read()? {
        let row = (0..width)
            .map(|ordinal| cursor.get(ordinal))
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }

    let mut table = Table::new(name);
    for ordinal in 0..width {
        let ty = cursor
            .column_type(ordinal)
            .filter(|ty| *ty != Type::Null)
            .or_else(|| {
                rows.iter()
                    .map(|row| &row[ordinal])
                    .find(|value| !value.is_null())
                    .map(Value::infer_ty)
            })
            .unwrap_or(Type::Null);

        table.push_column(cursor.name(ordinal).unwrap_or_default(), ty);
    }

    for row in rows {
        table.push_row(row)?;
    }

    Ok(table)
}

/// Buffers every result set of `cursor`, one table each. Tables are named
/// `Table`, `Table1`, `Table2`, ...
pub fn data_set_from_cursor(cursor: &mut dyn Cursor) -> Result<DataSet> {
    let mut data_set = DataSet::new();

    loop {
        let name = match data_set.len() {
            0 => "Table".to_string(),
            n => format!("Table{n}"),
        };
        data_set.push(table_from_cursor(cursor, &name)?);

        if !cursor.next_result()? {
            break;
        }
    }

    Ok(data_set)
}

/// Converts each row of `table` into a new `T`. A missing or empty table
/// yields no entities.
pub fn entities_from_table<T: Entity>(table: Option<&Table>) -> Result<Vec<T>> {
    let Some(table) = table else {
        return Ok(vec![]);
    };

    let descriptor = schema::descriptor::<T>();
    table
        .rows()
        .map(|row| materialize(&descriptor, &row))
        .collect()
}

/// Builds a table with one column per field mapping of `T` and one row per
/// entity. The columns are present even when `entities` is empty.
pub fn entities_to_table<T: Entity>(entities: &[T]) -> Result<Table> {
    let descriptor = schema::descriptor::<T>();
    let mut table = Table::new(descriptor.table_name());

    let ordinals: Vec<usize> = descriptor
        .fields()
        .iter()
        .map(|field| table.add_column(field.column, field.ty.clone()))
        .collect();
    let width = table.columns().len();

    for entity in entities {
        let mut values = vec![Value::Null; width];
        for (field, &ordinal) in descriptor.fields().iter().zip(&ordinals) {
            values[ordinal] = field.get(entity);
        }
        table.push_row(values)?;
    }

    Ok(table)
}

/// Returns `true` if `T` maps at least one field.
///
/// Fails if `T` carries no `#[entity]` declaration at all, which separates a
/// mapped type with no fields from a type that was never meant to be mapped.
pub fn is_valid_entity<T: Entity>() -> Result<bool> {
    let descriptor = schema::descriptor::<T>();

    if descriptor.declaration().is_none() {
        return Err(Error::missing_declaration(
            descriptor.type_name(),
            "#[entity]",
        ));
    }

    Ok(!descriptor.fields().is_empty())
}

/// Entity conversions as methods on [`Table`].
pub trait TableExt: Sized {
    fn to_entities<T: Entity>(&self) -> Result<Vec<T>>;

    fn from_entities<T: Entity>(entities: &[T]) -> Result<Self>;
}

impl TableExt for Table {
    fn to_entities<T: Entity>(&self) -> Result<Vec<T>> {
        entities_from_table(Some(self))
    }

    fn from_entities<T: Entity>(entities: &[T]) -> Result<Table> {
        entities_to_table(entities)
    }
}

fn materialize<T: Entity>(descriptor: &EntityDescriptor<T>, record: &dyn Record) -> Result<T> {
    let mut entity = T::default();
    populate_fields(descriptor, &mut entity, record)?;

    for nested in descriptor.nested() {
        nested.load(&mut entity, record)?;
    }

    Ok(entity)
}

/// Runs the field-mapping pass of `descriptor` against `record`. Nested
/// mappings are left alone.
pub(crate) fn populate_fields<T>(
    descriptor: &EntityDescriptor<T>,
    target: &mut T,
    record: &dyn Record,
) -> Result<()> {
    for field in descriptor.fields() {
        let value = record.value(field.column)?;
        field.set(target, value).map_err(|err| {
            err.context(crate::err!(
                "failed to load column `{}` into `{}::{}`",
                field.column,
                descriptor.type_name(),
                field.member
            ))
        })?;
    }

    Ok(())
}
