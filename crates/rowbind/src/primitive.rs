use crate::{Error, Result};

use rowbind_core::stmt::{Type, Value};
use uuid::Uuid;

/// A Rust type that maps to a single column.
///
/// `Option<T>` reports `T`'s [`TYPE`](Primitive::TYPE) with
/// [`NULLABLE`](Primitive::NULLABLE) set, so a mapping's target type is
/// always the unwrapped type.
pub trait Primitive: Sized + Default {
    const TYPE: Type;
    const NULLABLE: bool = false;

    /// Converts a raw, non-null column value.
    fn load(value: Value) -> Result<Self>;

    fn to_value(&self) -> Value;
}

/// Loads a column value into a field. A database null becomes the field
/// type's default value.
pub fn load<T: Primitive>(value: Value) -> Result<T> {
    if value.is_null() {
        Ok(T::default())
    } else {
        T::load(value)
    }
}

macro_rules! impl_integer {
    ( $( $ty:ident => $variant:ident, )* ) => {
        $(
            impl Primitive for $ty {
                const TYPE: Type = Type::$variant;

                fn load(value: Value) -> Result<Self> {
                    if let Some(v) = value.as_i128() {
                        return $ty::try_from(v)
                            .map_err(|_| Error::type_conversion(value, stringify!($ty)));
                    }

                    let parsed = match &value {
                        Value::F32(_) | Value::F64(_) => value
                            .as_f64()
                            .filter(|v| {
                                v.fract() == 0.0 && *v >= $ty::MIN as f64 && *v <= $ty::MAX as f64
                            })
                            .map(|v| v as $ty),
                        Value::String(s) => s.trim().parse::<$ty>().ok(),
                        _ => None,
                    };

                    parsed.ok_or_else(|| Error::type_conversion(value, stringify!($ty)))
                }

                fn to_value(&self) -> Value {
                    Value::$variant(*self)
                }
            }
        )*
    };
}

impl_integer! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
}

macro_rules! impl_float {
    ( $( $ty:ident => $variant:ident, )* ) => {
        $(
            impl Primitive for $ty {
                const TYPE: Type = Type::$variant;

                fn load(value: Value) -> Result<Self> {
                    if let Some(v) = value.as_f64() {
                        return Ok(v as $ty);
                    }

                    let parsed = match &value {
                        Value::String(s) => s.trim().parse::<$ty>().ok(),
                        _ => None,
                    };

                    parsed.ok_or_else(|| Error::type_conversion(value, stringify!($ty)))
                }

                fn to_value(&self) -> Value {
                    Value::$variant(*self)
                }
            }
        )*
    };
}

impl_float! {
    f32 => F32,
    f64 => F64,
}

impl Primitive for bool {
    const TYPE: Type = Type::Bool;

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            _ => match value.as_i128() {
                Some(v) => Ok(v != 0),
                None => Err(Error::type_conversion(value, "bool")),
            },
        }
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Primitive for String {
    const TYPE: Type = Type::String;

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            Value::Bytes(_) | Value::List(_) | Value::Null => {
                Err(Error::type_conversion(value, "String"))
            }
            // Remaining scalars have an unambiguous textual form
            Value::Uuid(v) => Ok(v.to_string()),
            Value::Date(v) => Ok(v.to_string()),
            Value::Time(v) => Ok(v.to_string()),
            Value::DateTime(v) => Ok(v.to_string()),
            other => Ok(other.to_string()),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Primitive for Vec<u8> {
    const TYPE: Type = Type::Bytes;

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(v) => Ok(v),
            _ => Err(Error::type_conversion(value, "Vec<u8>")),
        }
    }

    fn to_value(&self) -> Value {
        Value::Bytes(self.clone())
    }
}

impl Primitive for Uuid {
    const TYPE: Type = Type::Uuid;

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Uuid(v) => Ok(v),
            Value::String(ref s) => Ok(s.parse()?),
            Value::Bytes(ref bytes) => Ok(Uuid::from_slice(bytes)?),
            _ => Err(Error::type_conversion(value, "Uuid")),
        }
    }

    fn to_value(&self) -> Value {
        Value::Uuid(*self)
    }
}

impl<T: Primitive> Primitive for Option<T> {
    const TYPE: Type = T::TYPE;
    const NULLABLE: bool = true;

    fn load(value: Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            Ok(Some(T::load(value)?))
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }
}
