use chrono::{DateTime, FixedOffset, Utc};

use crate::coerce::zero_timestamp;
use crate::error::DecodeError;
use crate::schema::{FieldKind, ScalarKind, Schema};
use crate::value::Value;

/// A Rust type that can be the target of one schema field.
///
/// `kind()` tells the engine how to hydrate the field; `from_value()` turns
/// the hydrated value back into `Self`. `Value::Null` (nothing supplied)
/// always materializes as the type's zero value.
pub trait QueryField: Sized {
    fn kind() -> FieldKind;

    /// `key` is the parameter key the value was read from, for errors only.
    fn from_value(value: Value, key: &str) -> Result<Self, DecodeError>;
}

/// A record type: a struct whose decoded fields are all [`QueryField`]s.
///
/// Implemented by `#[derive(QueryRecord)]`. The schema is built on first use
/// and cached for the life of the process.
pub trait QueryRecord: QueryField {
    fn schema() -> &'static Schema;
}

macro_rules! scalar_field {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl QueryField for $ty {
                fn kind() -> FieldKind {
                    FieldKind::Scalar(ScalarKind::$kind)
                }

                fn from_value(value: Value, key: &str) -> Result<Self, DecodeError> {
                    match value {
                        Value::$kind(v) => Ok(v),
                        Value::Null => Ok(<$ty>::default()),
                        other => Err(DecodeError::unexpected_type(key, stringify!($kind), &other)),
                    }
                }
            }
        )*
    };
}

scalar_field! {
    String => String,
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

impl QueryField for DateTime<FixedOffset> {
    fn kind() -> FieldKind {
        FieldKind::Timestamp
    }

    fn from_value(value: Value, key: &str) -> Result<Self, DecodeError> {
        match value {
            Value::Timestamp(ts) => Ok(ts),
            Value::Null => Ok(zero_timestamp()),
            other => Err(DecodeError::unexpected_type(key, "Timestamp", &other)),
        }
    }
}

impl QueryField for DateTime<Utc> {
    fn kind() -> FieldKind {
        FieldKind::Timestamp
    }

    fn from_value(value: Value, key: &str) -> Result<Self, DecodeError> {
        DateTime::<FixedOffset>::from_value(value, key).map(|ts| ts.with_timezone(&Utc))
    }
}

impl<T: QueryField> QueryField for Vec<T> {
    fn kind() -> FieldKind {
        FieldKind::Sequence(Box::new(T::kind()))
    }

    fn from_value(value: Value, key: &str) -> Result<Self, DecodeError> {
        match value {
            Value::List(elements) => elements
                .into_iter()
                .enumerate()
                .map(|(i, element)| T::from_value(element, &format!("{key}[{i}]")))
                .collect(),
            Value::Null => Ok(Vec::new()),
            other => Err(DecodeError::unexpected_type(key, "List", &other)),
        }
    }
}

/// Unset reads as `None` instead of the zero value.
impl<T: QueryField> QueryField for Option<T> {
    fn kind() -> FieldKind {
        T::kind()
    }

    fn from_value(value: Value, key: &str) -> Result<Self, DecodeError> {
        match value {
            Value::Null => Ok(None),
            value => T::from_value(value, key).map(Some),
        }
    }
}

impl<T: QueryField> QueryField for Box<T> {
    fn kind() -> FieldKind {
        T::kind()
    }

    fn from_value(value: Value, key: &str) -> Result<Self, DecodeError> {
        T::from_value(value, key).map(Box::new)
    }
}
