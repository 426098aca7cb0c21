/// The Rust-side type of a mapped field or column.
///
/// Optional wrappers never appear here: a field declared as `Option<i32>`
/// has type [`Type::I32`] and is marked nullable on its mapping instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Boolean value
    Bool,

    /// Signed 8-bit integer
    I8,

    /// Signed 16-bit integer
    I16,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// Unsigned 8-bit integer
    U8,

    /// Unsigned 16-bit integer
    U16,

    /// Unsigned 32-bit integer
    U32,

    /// Unsigned 64-bit integer
    U64,

    /// 32-bit floating point
    F32,

    /// 64-bit floating point
    F64,

    /// String type
    String,

    /// Opaque byte sequence
    Bytes,

    /// 128-bit universally unique identifier
    Uuid,

    /// Calendar date without a time zone
    Date,

    /// Time of day without a time zone
    Time,

    /// Date and time without a time zone
    DateTime,

    /// A list of a single type
    List(Box<Type>),

    /// The type of the null value; it can be cast to any type.
    Null,
}

impl Type {
    pub fn list(ty: impl Into<Self>) -> Self {
        Self::List(Box::new(ty.into()))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
                | Self::F32
                | Self::F64
        )
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Short name used when rendering diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "String",
            Self::Bytes => "bytes",
            Self::Uuid => "Uuid",
            Self::Date => "Date",
            Self::Time => "Time",
            Self::DateTime => "DateTime",
            Self::List(_) => "List",
            Self::Null => "Null",
        }
    }
}

impl core::fmt::Display for Type {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::List(item) => write!(f, "List<{item}>"),
            _ => f.write_str(self.name()),
        }
    }
}
