use crate::{
    stmt::{Type, Value},
    Error, Result, Table,
};

use std::{collections::VecDeque, fmt::Debug};

/// A forward-only, read-once handle over one or more result sets.
///
/// A fresh cursor is positioned before the first row; call [`read`] to
/// advance.
///
/// [`read`]: Cursor::read
pub trait Cursor: Debug + Send {
    /// Number of columns in the current result set.
    fn field_count(&self) -> usize;

    /// Column name at `ordinal`.
    fn name(&self, ordinal: usize) -> Option<&str>;

    /// Declared column type, when the provider knows it.
    fn column_type(&self, _ordinal: usize) -> Option<Type> {
        None
    }

    /// Resolves a column name to its ordinal. An exact match wins over a
    /// case-insensitive one.
    fn ordinal(&self, name: &str) -> Option<usize> {
        let count = self.field_count();
        (0..count)
            .find(|&i| self.name(i) == Some(name))
            .or_else(|| {
                (0..count).find(|&i| {
                    self.name(i)
                        .is_some_and(|column| column.eq_ignore_ascii_case(name))
                })
            })
    }

    /// Advances to the next row. Returns `false` once the result set is
    /// exhausted.
    fn read(&mut self) -> Result<bool>;

    /// Raw value of column `ordinal` in the current row.
    fn get(&self, ordinal: usize) -> Result<Value>;

    fn is_null(&self, ordinal: usize) -> Result<bool> {
        Ok(self.get(ordinal)?.is_null())
    }

    /// Advances to the next result set. Returns `false` when there is none.
    fn next_result(&mut self) -> Result<bool> {
        Ok(false)
    }
}

/// A cursor over result sets that are already in memory.
#[derive(Debug, Default)]
pub struct BufferedCursor {
    current: Table,
    pending: VecDeque<Table>,
    position: Option<usize>,
}

impl BufferedCursor {
    pub fn new(result_sets: impl IntoIterator<Item = Table>) -> BufferedCursor {
        let mut pending: VecDeque<_> = result_sets.into_iter().collect();
        let current = pending.pop_front().unwrap_or_default();

        BufferedCursor {
            current,
            pending,
            position: None,
        }
    }

    fn row(&self) -> Result<&[Value]> {
        self.position
            .and_then(|index| self.current.row_values(index))
            .ok_or_else(|| Error::invalid_result("cursor is not positioned on a row"))
    }
}

impl Cursor for BufferedCursor {
    fn field_count(&self) -> usize {
        self.current.columns().len()
    }

    fn name(&self, ordinal: usize) -> Option<&str> {
        self.current.column(ordinal).map(|column| column.name.as_str())
    }

    fn column_type(&self, ordinal: usize) -> Option<Type> {
        self.current.column(ordinal).map(|column| column.ty.clone())
    }

    fn read(&mut self) -> Result<bool> {
        let next = self.position.map_or(0, |index| index + 1);
        self.position = Some(next.min(self.current.len()));
        Ok(next < self.current.len())
    }

    fn get(&self, ordinal: usize) -> Result<Value> {
        self.row()?.get(ordinal).cloned().ok_or_else(|| {
            Error::invalid_result(format!(
                "column ordinal {ordinal} out of range; field_count={}",
                self.field_count()
            ))
        })
    }

    fn next_result(&mut self) -> Result<bool> {
        match self.pending.pop_front() {
            Some(next) => {
                self.current = next;
                self.position = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
