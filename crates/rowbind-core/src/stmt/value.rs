use super::Type;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// The database-null sentinel
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed 8-bit integer
    I8(i8),

    /// Signed 16-bit integer
    I16(i16),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// Unsigned 8-bit integer
    U8(u8),

    /// Unsigned 16-bit integer
    U16(u16),

    /// Unsigned 32-bit integer
    U32(u32),

    /// Unsigned 64-bit integer
    U64(u64),

    /// 32-bit floating point
    F32(f32),

    /// 64-bit floating point
    F64(f64),

    /// String value
    String(String),

    /// Opaque byte sequence. Bound as a single scalar, never expanded.
    Bytes(Vec<u8>),

    /// UUID value
    Uuid(Uuid),

    /// Calendar date
    Date(NaiveDate),

    /// Time of day
    Time(NaiveTime),

    /// Date and time
    DateTime(NaiveDateTime),

    /// A collection of values. Parameters holding a list are expanded into
    /// one generated parameter per item.
    List(Vec<Value>),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn list_from_vec(items: Vec<Self>) -> Self {
        Self::List(items)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Widens any integer variant to `i128`, used by numeric conversions.
    pub fn as_i128(&self) -> Option<i128> {
        Some(match *self {
            Self::Bool(v) => v as i128,
            Self::I8(v) => v as i128,
            Self::I16(v) => v as i128,
            Self::I32(v) => v as i128,
            Self::I64(v) => v as i128,
            Self::U8(v) => v as i128,
            Self::U16(v) => v as i128,
            Self::U32(v) => v as i128,
            Self::U64(v) => v as i128,
            _ => return None,
        })
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::F32(v) => Some(v as f64),
            Self::F64(v) => Some(v),
            _ => self.as_i128().map(|v| v as f64),
        }
    }

    /// Returns the type of this value. Lists report the type of their first
    /// item, or `Null` when empty.
    pub fn infer_ty(&self) -> Type {
        match self {
            Self::Null => Type::Null,
            Self::Bool(_) => Type::Bool,
            Self::I8(_) => Type::I8,
            Self::I16(_) => Type::I16,
            Self::I32(_) => Type::I32,
            Self::I64(_) => Type::I64,
            Self::U8(_) => Type::U8,
            Self::U16(_) => Type::U16,
            Self::U32(_) => Type::U32,
            Self::U64(_) => Type::U64,
            Self::F32(_) => Type::F32,
            Self::F64(_) => Type::F64,
            Self::String(_) => Type::String,
            Self::Bytes(_) => Type::Bytes,
            Self::Uuid(_) => Type::Uuid,
            Self::Date(_) => Type::Date,
            Self::Time(_) => Type::Time,
            Self::DateTime(_) => Type::DateTime,
            Self::List(items) => Type::list(
                items
                    .first()
                    .map(Value::infer_ty)
                    .unwrap_or(Type::Null),
            ),
        }
    }
}

/// Renders the value the way a diagnostic trace shows it. The output is never
/// used to build executable SQL.
impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Self::Bytes(v) => {
                f.write_str("0x")?;
                for byte in v.iter().take(32) {
                    write!(f, "{byte:02X}")?;
                }
                if v.len() > 32 {
                    write!(f, "... ({} bytes)", v.len())?;
                }
                Ok(())
            }
            Self::Uuid(v) => write!(f, "'{v}'"),
            Self::Date(v) => write!(f, "'{v}'"),
            Self::Time(v) => write!(f, "'{v}'"),
            Self::DateTime(v) => write!(f, "'{v}'"),
            Self::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    core::fmt::Display::fmt(item, f)?;
                }
                f.write_str(")")
            }
        }
    }
}

macro_rules! impl_from {
    ( $( $ty:ty => $variant:ident, )* ) => {
        $(
            impl From<$ty> for Value {
                fn from(src: $ty) -> Self {
                    Self::$variant(src)
                }
            }
        )*
    };
}

impl_from! {
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
    Vec<u8> => Bytes,
    Uuid => Uuid,
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Self {
        match src {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}
