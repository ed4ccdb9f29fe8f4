use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};
use sqlbridge_core::{stmt::Value as CoreValue, Error, Result};

/// Binds a core value as a SQLite parameter.
#[derive(Debug)]
pub(crate) struct Value<'a>(pub(crate) &'a CoreValue);

impl Value<'_> {
    /// Reads one column of a result row.
    pub(crate) fn from_sql(value: ValueRef<'_>) -> Result<CoreValue> {
        Ok(match value {
            ValueRef::Null => CoreValue::Null,
            ValueRef::Integer(value) => CoreValue::I64(value),
            ValueRef::Real(value) => CoreValue::F64(value),
            ValueRef::Text(value) => CoreValue::String(
                std::str::from_utf8(value)
                    .map_err(Error::driver)?
                    .to_string(),
            ),
            ValueRef::Blob(value) => CoreValue::Bytes(value.to_vec()),
        })
    }
}

impl ToSql for Value<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self.0 {
            CoreValue::Bool(true) => ToSqlOutput::Owned(SqlValue::Integer(1)),
            CoreValue::Bool(false) => ToSqlOutput::Owned(SqlValue::Integer(0)),
            CoreValue::I32(v) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*v))),
            CoreValue::I64(v) => ToSqlOutput::Owned(SqlValue::Integer(*v)),
            CoreValue::F64(v) => ToSqlOutput::Owned(SqlValue::Real(*v)),
            CoreValue::String(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            CoreValue::Bytes(v) => ToSqlOutput::Borrowed(ValueRef::Blob(&v[..])),
            CoreValue::Null => ToSqlOutput::Owned(SqlValue::Null),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_read_back_as_i64() {
        assert_eq!(
            Value::from_sql(ValueRef::Integer(7)).unwrap(),
            CoreValue::I64(7)
        );
        assert_eq!(
            Value::from_sql(ValueRef::Text(b"hi")).unwrap(),
            CoreValue::from("hi")
        );
    }

    #[test]
    fn invalid_text_is_a_driver_error() {
        let err = Value::from_sql(ValueRef::Text(&[0xff, 0xfe])).unwrap_err();
        assert!(err.is_driver());
    }
}
