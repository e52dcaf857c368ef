use crate::coerce::CoerceError;
use crate::value::Value;

/// Error returned by [`Decoder::decode`](crate::Decoder::decode).
///
/// Every variant carries the parameter key it was raised for, so a failure
/// deep inside a nested sequence can be located from the message alone.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The target (or an intermediate value) does not have the expected shape.
    #[error("unexpected type at '{key}': expected {expected}, found {found}")]
    UnexpectedType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A raw value could not be coerced to the field's declared kind.
    #[error("unexpected value '{value}' for '{key}': {source}")]
    UnexpectedValue {
        key: String,
        value: String,
        #[source]
        source: CoerceError,
    },

    /// A required field had neither a supplied value nor a default.
    #[error("required field '{field}' is missing (key '{key}')")]
    RequiredFieldMissing { field: String, key: String },

    /// The index capture of a sequence key was not an empty or numeric token.
    #[error("index in key '{key}' matched unexpected values")]
    SliceIndexMatch { key: String },

    /// The sequence addressed by `key` would exceed the configured length.
    #[error("sequence '{key}' has {len} elements, limit is {max}")]
    SequenceTooLong { key: String, len: usize, max: usize },
}

impl DecodeError {
    pub(crate) fn unexpected_type(key: &str, expected: &'static str, found: &Value) -> Self {
        Self::UnexpectedType {
            key: key.to_string(),
            expected,
            found: found.variant_name(),
        }
    }

    pub(crate) fn unexpected_value(key: &str, value: &str, source: CoerceError) -> Self {
        Self::UnexpectedValue {
            key: key.to_string(),
            value: value.to_string(),
            source,
        }
    }

    /// Parameter key the error was raised for.
    pub fn key(&self) -> &str {
        match self {
            DecodeError::UnexpectedType { key, .. }
            | DecodeError::UnexpectedValue { key, .. }
            | DecodeError::RequiredFieldMissing { key, .. }
            | DecodeError::SliceIndexMatch { key }
            | DecodeError::SequenceTooLong { key, .. } => key,
        }
    }
}
