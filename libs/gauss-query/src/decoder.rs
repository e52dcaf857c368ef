use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::field::QueryField;
use crate::hydrate::hydrate_record;
use crate::params::ParamMap;
use crate::schema::{FieldKind, Schema};
use crate::value::{Record, Value};

/// Decodes parameter maps into record types.
///
/// Holds no per-call state; one decoder can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode `params` into `T`.
    ///
    /// `T` must be a record type; anything else fails with
    /// `UnexpectedType` before any parameter is read. Either every field
    /// decodes or the first error in field order is returned.
    pub fn decode<T: QueryField>(&self, params: &ParamMap) -> Result<T, DecodeError> {
        let schema = match T::kind() {
            FieldKind::Nested(schema) => schema(),
            other => {
                return Err(DecodeError::UnexpectedType {
                    key: String::new(),
                    expected: "Record",
                    found: other.name(),
                });
            }
        };

        let record = self.decode_record(schema, params)?;
        T::from_value(Value::Record(record), "")
    }

    /// Decode `params` against a schema without a Rust type behind it.
    ///
    /// Values come back positionally, in `schema.fields()` order, with
    /// `Value::Null` for unset fields.
    pub fn decode_record(&self, schema: &Schema, params: &ParamMap) -> Result<Record, DecodeError> {
        tracing::debug!(schema = %schema.name(), keys = params.len(), "decoding parameters");
        hydrate_record(&self.config, schema, params, None).inspect_err(|e| {
            tracing::debug!(schema = %schema.name(), error = %e, "decode failed");
        })
    }
}

/// Decode `params` into `T` with the default [`DecoderConfig`].
pub fn from_params<T: QueryField>(params: &ParamMap) -> Result<T, DecodeError> {
    Decoder::default().decode(params)
}
