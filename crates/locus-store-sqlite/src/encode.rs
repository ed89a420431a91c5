//! Conversions between Locus values and SQLite values.

use locus_core::store::Value;
use rusqlite::types::Value as SqlValue;

use crate::{Error, Result};

pub fn encode_param(v: &Value) -> SqlValue {
  match v {
    Value::Null => SqlValue::Null,
    Value::Integer(i) => SqlValue::Integer(*i),
    Value::Real(r) => SqlValue::Real(*r),
    Value::Text(s) => SqlValue::Text(s.clone()),
  }
}

pub fn decode_cell(column: &str, v: SqlValue) -> Result<Value> {
  match v {
    SqlValue::Null => Ok(Value::Null),
    SqlValue::Integer(i) => Ok(Value::Integer(i)),
    SqlValue::Real(r) => Ok(Value::Real(r)),
    SqlValue::Text(s) => Ok(Value::Text(s)),
    SqlValue::Blob(_) => Err(Error::UnsupportedValue(column.to_owned())),
  }
}
