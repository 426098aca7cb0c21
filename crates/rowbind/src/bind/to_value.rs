use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexSet;
use rowbind_core::stmt::Value;
use std::collections::{BTreeSet, HashSet};
use uuid::Uuid;

/// Converts a Rust value into a bindable [`Value`].
///
/// Strings, byte sequences and character sequences convert to a single
/// scalar. Other sequences convert to [`Value::List`] and are expanded into
/// one parameter per item when bound.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// A type that can be an item of a bound collection.
///
/// Not implemented for `u8` or `char`, so `Vec<u8>` and `Vec<char>` stay
/// scalars.
pub trait ListItem: ToValue {}

macro_rules! impl_scalar {
    ( $( $ty:ty => $variant:ident, )* ) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::$variant(self.clone())
                }
            }
        )*
    };
}

impl_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
    Uuid => Uuid,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => DateTime,
    Vec<u8> => Bytes,
}

macro_rules! impl_list_item {
    ( $( $ty:ty ),* ) => {
        $( impl ListItem for $ty {} )*
    };
}

impl_list_item!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u16,
    u32,
    u64,
    f32,
    f64,
    String,
    str,
    Uuid,
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
    Value
);

impl ToValue for char {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for [u8] {
    fn to_value(&self) -> Value {
        Value::Bytes(self.to_vec())
    }
}

impl ToValue for [char] {
    fn to_value(&self) -> Value {
        Value::String(self.iter().collect())
    }
}

impl ToValue for Vec<char> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ListItem> ListItem for Option<T> {}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ListItem + ?Sized> ListItem for &T {}

fn list<'a, T: ListItem + 'a>(items: impl IntoIterator<Item = &'a T>) -> Value {
    Value::List(items.into_iter().map(ToValue::to_value).collect())
}

impl<T: ListItem> ToValue for [T] {
    fn to_value(&self) -> Value {
        list(self)
    }
}

impl<T: ListItem> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        list(self)
    }
}

impl<T: ListItem, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value {
        list(self)
    }
}

impl<T: ListItem, S> ToValue for HashSet<T, S> {
    fn to_value(&self) -> Value {
        list(self)
    }
}

impl<T: ListItem> ToValue for BTreeSet<T> {
    fn to_value(&self) -> Value {
        list(self)
    }
}

impl<T: ListItem, S> ToValue for IndexSet<T, S> {
    fn to_value(&self) -> Value {
        list(self)
    }
}
