use chrono::{DateTime, FixedOffset};

use crate::error::DecodeError;

/// Intermediate value produced by the hydration engine.
///
/// Strategy by kind:
/// - Scalars: eager parse into the exact field width.
/// - Timestamp: eager parse, offset preserved.
/// - List, Record: recursive, elements hydrated individually.
///
/// `Null` marks a field or sequence slot nothing was supplied for. It
/// materializes as the target type's default value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    String(String),
    Timestamp(DateTime<FixedOffset>),

    List(Vec<Value>),
    Record(Record),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub(crate) fn variant_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::I8(_) => "I8",
            Value::I16(_) => "I16",
            Value::I32(_) => "I32",
            Value::I64(_) => "I64",
            Value::Isize(_) => "Isize",
            Value::U8(_) => "U8",
            Value::U16(_) => "U16",
            Value::U32(_) => "U32",
            Value::U64(_) => "U64",
            Value::Usize(_) => "Usize",
            Value::F32(_) => "F32",
            Value::F64(_) => "F64",
            Value::String(_) => "String",
            Value::Timestamp(_) => "Timestamp",
            Value::List(_) => "List",
            Value::Record(_) => "Record",
        }
    }
}

/// Positional field values of one hydrated record. Order matches
/// `Schema::fields`.
///
/// Values only, no names or kinds. All metadata lives in the `Schema`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record(Vec<Value>);

impl Record {
    pub fn new(fields: Vec<Value>) -> Self {
        Self(fields)
    }

    /// Unwrap a record value. `Null` yields an empty record, so every field
    /// of it reads as unset.
    pub fn from_value(value: Value, key: &str) -> Result<Self, DecodeError> {
        match value {
            Value::Record(record) => Ok(record),
            Value::Null => Ok(Self::default()),
            other => Err(DecodeError::unexpected_type(key, "Record", &other)),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Move the value at `index` out, leaving `Null` behind.
    pub fn take(&mut self, index: usize) -> Value {
        self.0.get_mut(index).map(std::mem::take).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Key of field `key` inside the record at `prefix` (`""` at top level).
#[doc(hidden)]
pub fn field_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}[{key}]")
    }
}
