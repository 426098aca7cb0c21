use rowbind_core::{stmt::Value as CoreValue, Error};
use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};

#[derive(Debug)]
pub(crate) struct Value<'a>(&'a CoreValue);

impl<'a> From<&'a CoreValue> for Value<'a> {
    fn from(value: &'a CoreValue) -> Self {
        Self(value)
    }
}

/// Converts a SQLite value to a core value. Integers load as `I64` and reals
/// as `F64`; narrowing happens when the value is loaded into a field. Text
/// that is not valid UTF-8 loads as `Bytes`.
pub(crate) fn from_sql(value: ValueRef<'_>) -> CoreValue {
    match value {
        ValueRef::Null => CoreValue::Null,
        ValueRef::Integer(v) => CoreValue::I64(v),
        ValueRef::Real(v) => CoreValue::F64(v),
        ValueRef::Text(v) => match std::str::from_utf8(v) {
            Ok(text) => CoreValue::String(text.to_owned()),
            Err(_) => CoreValue::Bytes(v.to_vec()),
        },
        ValueRef::Blob(v) => CoreValue::Bytes(v.to_vec()),
    }
}

fn conversion_failure(err: Error) -> rusqlite::Error {
    rusqlite::Error::ToSqlConversionFailure(Box::new(err))
}

impl ToSql for Value<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use CoreValue::*;

        Ok(match self.0 {
            Null => ToSqlOutput::Owned(SqlValue::Null),
            Bool(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            I8(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            I16(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            I32(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            I64(v) => ToSqlOutput::Owned(SqlValue::Integer(*v)),
            U8(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            U16(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            U32(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            U64(v) => {
                let v = i64::try_from(*v)
                    .map_err(|_| conversion_failure(Error::type_conversion(U64(*v), "i64")))?;
                ToSqlOutput::Owned(SqlValue::Integer(v))
            }
            F32(v) => ToSqlOutput::Owned(SqlValue::Real(*v as f64)),
            F64(v) => ToSqlOutput::Owned(SqlValue::Real(*v)),
            String(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            Bytes(v) => ToSqlOutput::Borrowed(ValueRef::Blob(&v[..])),
            Uuid(v) => ToSqlOutput::Owned(SqlValue::Text(v.to_string())),
            Date(v) => ToSqlOutput::Owned(SqlValue::Text(v.format("%Y-%m-%d").to_string())),
            Time(v) => ToSqlOutput::Owned(SqlValue::Text(v.format("%H:%M:%S%.f").to_string())),
            DateTime(v) => ToSqlOutput::Owned(SqlValue::Text(
                v.format("%Y-%m-%d %H:%M:%S%.f").to_string(),
            )),
            List(_) => {
                return Err(conversion_failure(Error::unsupported_feature(
                    "list values cannot be bound directly; bind them as a collection",
                )))
            }
        })
    }
}
