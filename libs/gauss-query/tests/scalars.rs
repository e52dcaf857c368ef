use chrono::{DateTime, FixedOffset, Utc};
use gauss_query::coerce::CoerceError;
use gauss_query::{DecodeError, ParamMap, QueryRecord, from_params};

fn params(pairs: &[(&str, &str)]) -> ParamMap {
    pairs.iter().copied().collect()
}

#[derive(Debug, PartialEq, QueryRecord)]
struct IntField {
    value: i64,
}

#[derive(Debug, PartialEq, QueryRecord)]
struct IntWithDefault {
    #[query(default = "12")]
    value: i32,
}

#[derive(Debug, PartialEq, QueryRecord)]
struct BadIntDefault {
    #[query(default = "abc")]
    value: i32,
}

#[derive(Debug, PartialEq, QueryRecord)]
struct UintField {
    value: u64,
}

#[derive(Debug, PartialEq, QueryRecord)]
struct NarrowFields {
    small: i8,
    byte: u8,
    size: usize,
}

#[derive(Debug, PartialEq, QueryRecord)]
struct StringField {
    #[query(default = "my value")]
    value: String,
}

#[derive(Debug, PartialEq, QueryRecord)]
struct FloatField {
    value: f32,
}

#[derive(Debug, PartialEq, QueryRecord)]
struct BoolField {
    value: bool,
}

#[derive(Debug, PartialEq, QueryRecord)]
struct TimeField {
    value: DateTime<FixedOffset>,
}

#[derive(Debug, PartialEq, QueryRecord)]
struct TimeWithDefault {
    #[query(default = "2000-12-31T00:00:00Z")]
    value: DateTime<Utc>,
}

#[derive(Debug, PartialEq, QueryRecord)]
struct CustomTime {
    #[query(format = "%a, %d %b %Y %H:%M:%S %z")]
    value: DateTime<FixedOffset>,
}

#[derive(Debug, PartialEq, QueryRecord)]
struct CustomTimeDefault {
    #[query(
        default = "Sun, 31 Dec 2000 00:00:00 +0000",
        format = "%a, %d %b %Y %H:%M:%S %z"
    )]
    value: DateTime<FixedOffset>,
}

fn rfc2822(raw: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc2822(raw).unwrap()
}

#[test]
fn int_from_given_value() {
    let res: IntField = from_params(&params(&[("value", "12")])).unwrap();
    assert_eq!(res, IntField { value: 12 });
}

#[test]
fn int_from_default() {
    let res: IntWithDefault = from_params(&params(&[])).unwrap();
    assert_eq!(res, IntWithDefault { value: 12 });
}

#[test]
fn supplied_value_beats_default() {
    let res: IntWithDefault = from_params(&params(&[("value", "7")])).unwrap();
    assert_eq!(res, IntWithDefault { value: 7 });
}

#[test]
fn default_behaves_like_supplied_literal() {
    let from_default: IntWithDefault = from_params(&params(&[])).unwrap();
    let from_given: IntWithDefault = from_params(&params(&[("value", "12")])).unwrap();
    assert_eq!(from_default, from_given);
}

#[test]
fn int_rejects_non_numeric_value() {
    let err = from_params::<IntField>(&params(&[("value", "abc")])).unwrap_err();
    match err {
        DecodeError::UnexpectedValue { key, value, source } => {
            assert_eq!(key, "value");
            assert_eq!(value, "abc");
            assert!(matches!(source, CoerceError::Int(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn int_rejects_bad_default() {
    let err = from_params::<BadIntDefault>(&params(&[])).unwrap_err();
    assert!(matches!(err, DecodeError::UnexpectedValue { .. }));
}

#[test]
fn uint_from_given_value() {
    let res: UintField = from_params(&params(&[("value", "12")])).unwrap();
    assert_eq!(res, UintField { value: 12 });
}

#[test]
fn uint_rejects_negative_value() {
    let err = from_params::<UintField>(&params(&[("value", "-12")])).unwrap_err();
    assert!(matches!(err, DecodeError::UnexpectedValue { .. }));
}

#[test]
fn narrow_integers_reject_overflow() {
    let ok: NarrowFields =
        from_params(&params(&[("small", "-128"), ("byte", "255"), ("size", "42")])).unwrap();
    assert_eq!(
        ok,
        NarrowFields {
            small: -128,
            byte: 255,
            size: 42,
        }
    );

    let err = from_params::<NarrowFields>(&params(&[("byte", "256")])).unwrap_err();
    assert_eq!(err.key(), "byte");
}

#[test]
fn string_from_given_value_and_default() {
    let res: StringField = from_params(&params(&[("value", "other")])).unwrap();
    assert_eq!(res.value, "other");

    let res: StringField = from_params(&params(&[])).unwrap();
    assert_eq!(res.value, "my value");
}

#[test]
fn float_parses_and_rejects() {
    let res: FloatField = from_params(&params(&[("value", "12.12")])).unwrap();
    assert_eq!(res, FloatField { value: 12.12 });

    let err = from_params::<FloatField>(&params(&[("value", "abc")])).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::UnexpectedValue { source: CoerceError::Float(_), .. }
    ));
}

#[test]
fn bool_accepts_words_and_digits() {
    for (raw, expected) in [("true", true), ("1", true), ("false", false), ("0", false)] {
        let res: BoolField = from_params(&params(&[("value", raw)])).unwrap();
        assert_eq!(res.value, expected, "{raw}");
    }

    let err = from_params::<BoolField>(&params(&[("value", "abc")])).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::UnexpectedValue { source: CoerceError::Bool(_), .. }
    ));
}

#[test]
fn timestamp_default_format_is_rfc3339() {
    let res: TimeField = from_params(&params(&[("value", "2000-12-31T00:00:00Z")])).unwrap();
    assert_eq!(res.value, rfc2822("Sun, 31 Dec 2000 00:00:00 +0000"));

    let err = from_params::<TimeField>(&params(&[("value", "abc")])).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::UnexpectedValue { source: CoerceError::Timestamp(_), .. }
    ));
}

#[test]
fn timestamp_default_literal_into_utc() {
    let res: TimeWithDefault = from_params(&params(&[])).unwrap();
    assert_eq!(res.value, rfc2822("Sun, 31 Dec 2000 00:00:00 +0000"));
}

#[test]
fn timestamp_custom_format() {
    let res: CustomTime =
        from_params(&params(&[("value", "Sun, 31 Dec 2000 00:00:00 +0000")])).unwrap();
    assert_eq!(res.value, rfc2822("Sun, 31 Dec 2000 00:00:00 +0000"));

    let res: CustomTimeDefault = from_params(&params(&[])).unwrap();
    assert_eq!(res.value, rfc2822("Sun, 31 Dec 2000 00:00:00 +0000"));

    let err = from_params::<CustomTime>(&params(&[("value", "2000-12-31T00:00:00Z")])).unwrap_err();
    assert!(matches!(err, DecodeError::UnexpectedValue { .. }));
}

#[test]
fn unset_fields_take_zero_values() {
    let res: IntField = from_params(&params(&[])).unwrap();
    assert_eq!(res, IntField { value: 0 });

    let res: BoolField = from_params(&params(&[("other", "1")])).unwrap();
    assert!(!res.value);
}

#[test]
fn extra_values_after_the_first_are_ignored_for_scalars() {
    let res: IntField = from_params(&params(&[("value", "1"), ("value", "2")])).unwrap();
    assert_eq!(res.value, 1);
}
