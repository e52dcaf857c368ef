use crate::coerce::coerce;
use crate::collection::hydrate_collection;
use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::params::ParamMap;
use crate::schema::{FieldDescriptor, FieldKind, Schema};
use crate::value::{Record, Value};

/// Hydrate one record of `schema` from `params`.
///
/// `prefix` is `None` at the top level and the record's own key when
/// nested, so field `name` reads `prefix[name]`.
///
/// For each declared field:
/// - Ignored: left unset, never validated.
/// - Sequence / nested record: always counts as set, even when empty.
///   A nested record without any `key[...]` parameter is not hydrated.
/// - Present in `params`: first value, coerced.
/// - Absent with default: default literal, coerced.
/// - Absent and required: error.
pub(crate) fn hydrate_record(
    config: &DecoderConfig,
    schema: &Schema,
    params: &ParamMap,
    prefix: Option<&str>,
) -> Result<Record, DecodeError> {
    let mut fields = Vec::with_capacity(schema.fields().len());

    for field in schema.fields() {
        if field.ignored {
            fields.push(Value::Null);
            continue;
        }

        let key = field.lookup_key(prefix);
        let value = hydrate_field(config, field, &key, params)?;

        if field.required && value.is_none() {
            tracing::debug!(
                schema = %schema.name(),
                field = %field.name,
                %key,
                "required field missing"
            );
            return Err(DecodeError::RequiredFieldMissing {
                field: field.name.clone(),
                key,
            });
        }

        fields.push(value.unwrap_or_default());
    }

    Ok(Record::new(fields))
}

/// `None` when the field ended unset.
fn hydrate_field(
    config: &DecoderConfig,
    field: &FieldDescriptor,
    key: &str,
    params: &ParamMap,
) -> Result<Option<Value>, DecodeError> {
    let format = field
        .time_format
        .as_deref()
        .or(config.time_format.as_deref());

    match &field.kind {
        FieldKind::Sequence(element) => {
            hydrate_collection(config, key, params, element, field.time_format.as_deref())
                .map(|elements| Some(Value::List(elements)))
        }
        FieldKind::Nested(schema) => {
            // Nothing under `key[`: the record stays unset, which also ends
            // recursion through self-referential types.
            if !params.has_prefix(&format!("{key}[")) {
                return Ok(Some(Value::Null));
            }
            hydrate_record(config, schema(), params, Some(key)).map(|r| Some(Value::Record(r)))
        }
        FieldKind::Scalar(_) | FieldKind::Timestamp => {
            let raw = match (params.first(key), field.default_raw.as_deref()) {
                (Some(raw), _) => raw,
                (None, Some(default)) => {
                    tracing::trace!(field = %field.name, %key, "using default value");
                    default
                }
                (None, None) => return Ok(None),
            };
            coerce(&field.kind, format, raw)
                .map(Some)
                .map_err(|e| DecodeError::unexpected_value(key, raw, e))
        }
    }
}
