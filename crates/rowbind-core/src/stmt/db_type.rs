use super::Type;

/// Provider-neutral parameter type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbType {
    AnsiString,
    Binary,
    Boolean,
    Byte,
    Date,
    DateTime,
    Decimal,
    Double,
    Guid,
    Int16,
    Int32,
    Int64,
    Object,
    SByte,
    Single,
    String,
    Time,
    UInt16,
    UInt32,
    UInt64,
}

impl DbType {
    /// Parses the name of a variant, as written in a `#[param(db_type = ..)]`
    /// attribute. Returns `None` for anything that is not a member of this
    /// enumeration.
    pub fn from_name(name: &str) -> Option<DbType> {
        Some(match name {
            "AnsiString" => DbType::AnsiString,
            "Binary" => DbType::Binary,
            "Boolean" => DbType::Boolean,
            "Byte" => DbType::Byte,
            "Date" => DbType::Date,
            "DateTime" => DbType::DateTime,
            "Decimal" => DbType::Decimal,
            "Double" => DbType::Double,
            "Guid" => DbType::Guid,
            "Int16" => DbType::Int16,
            "Int32" => DbType::Int32,
            "Int64" => DbType::Int64,
            "Object" => DbType::Object,
            "SByte" => DbType::SByte,
            "Single" => DbType::Single,
            "String" => DbType::String,
            "Time" => DbType::Time,
            "UInt16" => DbType::UInt16,
            "UInt32" => DbType::UInt32,
            "UInt64" => DbType::UInt64,
            _ => return None,
        })
    }

    /// The type code a provider would infer for a value of type `ty`.
    pub fn infer(ty: &Type) -> DbType {
        match ty {
            Type::Bool => DbType::Boolean,
            Type::I8 => DbType::SByte,
            Type::I16 => DbType::Int16,
            Type::I32 => DbType::Int32,
            Type::I64 => DbType::Int64,
            Type::U8 => DbType::Byte,
            Type::U16 => DbType::UInt16,
            Type::U32 => DbType::UInt32,
            Type::U64 => DbType::UInt64,
            Type::F32 => DbType::Single,
            Type::F64 => DbType::Double,
            Type::String => DbType::String,
            Type::Bytes => DbType::Binary,
            Type::Uuid => DbType::Guid,
            Type::Date => DbType::Date,
            Type::Time => DbType::Time,
            Type::DateTime => DbType::DateTime,
            Type::List(_) | Type::Null => DbType::Object,
        }
    }
}

impl core::fmt::Display for DbType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

/// A provider-specific type code, used when a declared type is not a member
/// of [`DbType`] and the provider recognizes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderType {
    pub name: String,
}

impl ProviderType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl core::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.name)
    }
}
