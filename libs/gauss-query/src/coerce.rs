use std::num::{ParseFloatError, ParseIntError};

use chrono::format::ParseErrorKind;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

use crate::schema::{FieldKind, ScalarKind};
use crate::value::Value;

/// Why a raw string could not be coerced.
#[derive(Debug, thiserror::Error)]
pub enum CoerceError {
    #[error("invalid boolean literal '{0}'")]
    Bool(String),

    #[error(transparent)]
    Int(#[from] ParseIntError),

    #[error(transparent)]
    Float(#[from] ParseFloatError),

    #[error(transparent)]
    Timestamp(#[from] chrono::ParseError),

    /// Sequence and record kinds are not leaves.
    #[error("{0} is not a leaf kind")]
    Unsupported(&'static str),
}

/// Coerce one raw string into a leaf value of `kind`.
///
/// `format` only applies to timestamps; `None` means RFC 3339.
pub fn coerce(kind: &FieldKind, format: Option<&str>, raw: &str) -> Result<Value, CoerceError> {
    match kind {
        FieldKind::Scalar(scalar) => coerce_scalar(*scalar, raw),
        FieldKind::Timestamp => parse_timestamp(format, raw).map(Value::Timestamp),
        other => Err(CoerceError::Unsupported(other.name())),
    }
}

fn coerce_scalar(kind: ScalarKind, raw: &str) -> Result<Value, CoerceError> {
    Ok(match kind {
        ScalarKind::String => Value::String(raw.to_string()),
        ScalarKind::Bool => Value::Bool(parse_bool(raw)?),
        ScalarKind::I8 => Value::I8(raw.parse()?),
        ScalarKind::I16 => Value::I16(raw.parse()?),
        ScalarKind::I32 => Value::I32(raw.parse()?),
        ScalarKind::I64 => Value::I64(raw.parse()?),
        ScalarKind::Isize => Value::Isize(raw.parse()?),
        ScalarKind::U8 => Value::U8(raw.parse()?),
        ScalarKind::U16 => Value::U16(raw.parse()?),
        ScalarKind::U32 => Value::U32(raw.parse()?),
        ScalarKind::U64 => Value::U64(raw.parse()?),
        ScalarKind::Usize => Value::Usize(raw.parse()?),
        ScalarKind::F32 => Value::F32(raw.parse()?),
        ScalarKind::F64 => Value::F64(raw.parse()?),
    })
}

fn parse_bool(raw: &str) -> Result<bool, CoerceError> {
    match raw {
        "1" | "t" | "T" | "true" | "True" | "TRUE" => Ok(true),
        "0" | "f" | "F" | "false" | "False" | "FALSE" => Ok(false),
        _ => Err(CoerceError::Bool(raw.to_string())),
    }
}

/// Parse a timestamp with a chrono format string, or RFC 3339 without one.
///
/// Formats that carry no offset are read as UTC; date-only formats as
/// midnight UTC.
fn parse_timestamp(format: Option<&str>, raw: &str) -> Result<DateTime<FixedOffset>, CoerceError> {
    let Some(format) = format else {
        return Ok(DateTime::parse_from_rfc3339(raw)?);
    };

    match DateTime::parse_from_str(raw, format) {
        Ok(ts) => Ok(ts),
        Err(e) if e.kind() == ParseErrorKind::NotEnough => {
            let naive = match NaiveDateTime::parse_from_str(raw, format) {
                Ok(naive) => naive,
                Err(e) if e.kind() == ParseErrorKind::NotEnough => {
                    NaiveDate::parse_from_str(raw, format)?.and_time(Default::default())
                }
                Err(e) => return Err(e.into()),
            };
            Ok(naive.and_utc().fixed_offset())
        }
        Err(e) => Err(e.into()),
    }
}

/// Zero timestamp used for unset timestamp fields.
pub(crate) fn zero_timestamp() -> DateTime<FixedOffset> {
    DateTime::<Utc>::default().fixed_offset()
}
