//! Sequence reconstruction from bracket-indexed keys.
//!
//! A sequence field `list` binds every key of the shape `list[<digits>]...`,
//! `list[]...` or the bare `list`. Explicit indices pin their position; the
//! other entries are appended after the highest explicit index, in the order
//! their keys were first seen and, within one key, in value order.

use indexmap::IndexMap;
use regex::Regex;

use crate::coerce::coerce;
use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::hydrate::hydrate_record;
use crate::params::ParamMap;
use crate::schema::FieldKind;
use crate::value::Value;

/// Index token captured from one matching key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IndexToken {
    /// `base[]` or bare `base`: positionally appended.
    Append,
    /// `base[n]`: pinned to position `n`.
    At(usize),
}

/// One key matched against a sequence base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IndexMatch<'a> {
    pub token: IndexToken,
    /// `base[token]` (or `base` for a bare key), the namespace of the element.
    pub target_key: &'a str,
}

/// `^base\[([0-9]*)\]` for one sequence base, compiled once per sequence.
///
/// Anchored at the start only: anything after the closing bracket is left to
/// the element's own hydration.
#[derive(Debug)]
pub(crate) struct IndexPattern<'b> {
    base: &'b str,
    regex: Regex,
}

impl<'b> IndexPattern<'b> {
    pub(crate) fn new(base: &'b str) -> Result<Self, DecodeError> {
        let pattern = format!(r"^{}\[([0-9]*)\]", regex::escape(base));
        let regex = Regex::new(&pattern).map_err(|e| {
            tracing::debug!(%base, error = %e, "index pattern rejected");
            DecodeError::SliceIndexMatch {
                key: base.to_string(),
            }
        })?;
        Ok(Self { base, regex })
    }

    /// `Ok(None)` when the key belongs to something else.
    pub(crate) fn match_key<'a>(
        &self,
        key: &'a str,
    ) -> Result<Option<IndexMatch<'a>>, DecodeError> {
        if key == self.base {
            return Ok(Some(IndexMatch {
                token: IndexToken::Append,
                target_key: key,
            }));
        }

        let Some(captures) = self.regex.captures(key) else {
            return Ok(None);
        };
        let slice_index_match = || DecodeError::SliceIndexMatch {
            key: key.to_string(),
        };
        if captures.len() != 2 {
            return Err(slice_index_match());
        }
        let (Some(whole), Some(token)) = (captures.get(0), captures.get(1)) else {
            return Err(slice_index_match());
        };

        let token = match token.as_str() {
            "" => IndexToken::Append,
            digits => IndexToken::At(digits.parse().map_err(|_| slice_index_match())?),
        };

        Ok(Some(IndexMatch {
            token,
            target_key: &key[..whole.end()],
        }))
    }
}

/// Hydrate the sequence bound to `base` from `params`.
///
/// One pass over `params` buckets every indexed key under its element, so
/// each entry is matched and copied once.
pub(crate) fn hydrate_collection(
    config: &DecoderConfig,
    base: &str,
    params: &ParamMap,
    element: &FieldKind,
    format: Option<&str>,
) -> Result<Vec<Value>, DecodeError> {
    let pattern = IndexPattern::new(base)?;

    let mut highest: Option<usize> = None;
    let mut indexed: IndexMap<&str, (usize, ParamMap)> = IndexMap::new();
    let mut appends: Vec<(&str, &str, &[String])> = Vec::new();
    let mut appended = 0usize;

    for (key, values) in params.iter() {
        let Some(found) = pattern.match_key(key)? else {
            continue;
        };
        match found.token {
            IndexToken::Append => {
                appended += values.len();
                appends.push((key, found.target_key, values));
            }
            IndexToken::At(position) => {
                highest = Some(highest.map_or(position, |h| h.max(position)));
                indexed
                    .entry(found.target_key)
                    .or_insert_with(|| (position, ParamMap::new()))
                    .1
                    .insert(key, values.to_vec());
            }
        }
    }

    let start = highest.map_or(0, |h| h.saturating_add(1));
    let len = start.saturating_add(appended);
    if len > config.max_sequence_len {
        return Err(DecodeError::SequenceTooLong {
            key: base.to_string(),
            len,
            max: config.max_sequence_len,
        });
    }

    let mut elements = vec![Value::Null; len];

    for (target_key, (position, scoped)) in &indexed {
        elements[*position] = hydrate_element(config, target_key, scoped, element, format)?;
    }

    let mut position = start;
    for (key, target_key, values) in appends {
        for value in values {
            let single = ParamMap::single(key, value.as_str());
            elements[position] = hydrate_element(config, target_key, &single, element, format)?;
            position += 1;
        }
    }

    tracing::trace!(key = %base, len, appended, "hydrated sequence");
    Ok(elements)
}

/// Hydrate one element living under `target_key`.
fn hydrate_element(
    config: &DecoderConfig,
    target_key: &str,
    params: &ParamMap,
    element: &FieldKind,
    format: Option<&str>,
) -> Result<Value, DecodeError> {
    match element {
        FieldKind::Scalar(_) | FieldKind::Timestamp => match params.first(target_key) {
            Some(raw) => coerce(element, format.or(config.time_format.as_deref()), raw)
                .map_err(|e| DecodeError::unexpected_value(target_key, raw, e)),
            None => Ok(Value::Null),
        },
        FieldKind::Sequence(inner) => {
            hydrate_collection(config, target_key, params, inner, format).map(Value::List)
        }
        FieldKind::Nested(schema) => {
            hydrate_record(config, schema(), params, Some(target_key)).map(Value::Record)
        }
    }
}
