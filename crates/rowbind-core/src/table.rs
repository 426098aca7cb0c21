use crate::{
    stmt::{Type, Value},
    Error, Result,
};

use indexmap::IndexMap;

/// An in-memory tabular buffer: ordered, named, typed columns and a list of
/// rows.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: IndexMap<String, Column>,
    rows: Vec<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub ty: Type,
}

/// A borrowed row of a [`Table`].
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    values: &'a [Value],
}

/// A collection of tables, one per result set.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DataSet {
    pub tables: Vec<Table>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Table {
        Table {
            name: name.into(),
            ..Table::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a column and returns its ordinal. Adding a name twice keeps the
    /// first column.
    pub fn add_column(&mut self, name: impl Into<String>, ty: Type) -> usize {
        let name = name.into();
        let entry = self.columns.entry(name.clone());
        let ordinal = entry.index();
        entry.or_insert(Column { name, ty });

        // Existing rows get a null cell for the new column
        let width = self.columns.len();
        for row in &mut self.rows {
            row.resize(width, Value::Null);
        }

        ordinal
    }

    /// Appends a column for a result set field, always at a new ordinal.
    ///
    /// An empty name becomes `Column{ordinal + 1}`. A name already present
    /// gets the first free numeric suffix (`id`, `id1`, `id2`, ...).
    pub fn push_column(&mut self, name: &str, ty: Type) -> usize {
        let base = match name {
            "" => format!("Column{}", self.columns.len() + 1),
            name => name.to_string(),
        };

        let mut column = base.clone();
        let mut suffix = 1;
        while self.columns.contains_key(&column) {
            column = format!("{base}{suffix}");
            suffix += 1;
        }

        self.add_column(column, ty)
    }

    pub fn columns(&self) -> impl ExactSizeIterator<Item = &Column> {
        self.columns.values()
    }

    pub fn column(&self, ordinal: usize) -> Option<&Column> {
        self.columns.get_index(ordinal).map(|(_, column)| column)
    }

    /// Resolves a column name to its ordinal. An exact match wins over a
    /// case-insensitive one.
    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name).or_else(|| {
            self.columns
                .keys()
                .position(|column| column.eq_ignore_ascii_case(name))
        })
    }

    pub fn push_row(&mut self, values: Vec<Value>) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(Error::invalid_argument(
                "values",
                format!(
                    "row has {} values but table `{}` has {} columns",
                    values.len(),
                    self.name,
                    self.columns.len()
                ),
            ));
        }

        self.rows.push(values);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.row_values(index).map(|values| Row {
            table: self,
            values,
        })
    }

    pub fn row_values(&self, index: usize) -> Option<&[Value]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = Row<'_>> {
        self.rows.iter().map(move |values| Row {
            table: self,
            values,
        })
    }

    /// Value of `column` in row `index`.
    pub fn get(&self, index: usize, column: &str) -> Option<&Value> {
        self.row(index)?.get(column)
    }
}

impl<'a> Row<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.table
            .ordinal(column)
            .and_then(|ordinal| self.values.get(ordinal))
    }

    pub fn get_by_ordinal(&self, ordinal: usize) -> Option<&'a Value> {
        self.values.get(ordinal)
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }
}

impl DataSet {
    pub fn new() -> DataSet {
        DataSet::default()
    }

    pub fn push(&mut self, table: Table) {
        self.tables.push(table);
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn table(&self, index: usize) -> Option<&Table> {
        self.tables.get(index)
    }
}

impl core::ops::Index<usize> for DataSet {
    type Output = Table;

    fn index(&self, index: usize) -> &Table {
        &self.tables[index]
    }
}

impl IntoIterator for DataSet {
    type Item = Table;
    type IntoIter = std::vec::IntoIter<Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.into_iter()
    }
}
