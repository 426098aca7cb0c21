use crate::{primitive::Primitive, Error, Result};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rowbind_core::stmt::{Type, Value};

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

impl Primitive for NaiveDate {
    const TYPE: Type = Type::Date;

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Date(v) => Ok(v),
            Value::DateTime(v) => Ok(v.date()),
            Value::String(ref s) => Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?),
            _ => Err(Error::type_conversion(value, "NaiveDate")),
        }
    }

    fn to_value(&self) -> Value {
        Value::Date(*self)
    }
}

impl Primitive for NaiveTime {
    const TYPE: Type = Type::Time;

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Time(v) => Ok(v),
            Value::DateTime(v) => Ok(v.time()),
            Value::String(ref s) => Ok(NaiveTime::parse_from_str(s.trim(), "%H:%M:%S%.f")?),
            _ => Err(Error::type_conversion(value, "NaiveTime")),
        }
    }

    fn to_value(&self) -> Value {
        Value::Time(*self)
    }
}

impl Primitive for NaiveDateTime {
    const TYPE: Type = Type::DateTime;

    fn load(value: Value) -> Result<Self> {
        match value {
            Value::DateTime(v) => Ok(v),
            Value::Date(v) => Ok(v.and_time(NaiveTime::default())),
            Value::String(ref s) => {
                let s = s.trim();
                let mut parsed = NaiveDateTime::parse_from_str(s, DATE_TIME_FORMATS[0]);
                for format in &DATE_TIME_FORMATS[1..] {
                    if parsed.is_ok() {
                        break;
                    }
                    parsed = NaiveDateTime::parse_from_str(s, format);
                }
                Ok(parsed?)
            }
            _ => Err(Error::type_conversion(value, "NaiveDateTime")),
        }
    }

    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }
}
