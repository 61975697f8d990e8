//! Reftrack JSON Boundary
//!
//! Encodes any tuple's attribute projection as a JSON object and decodes
//! a JSON object back through the tuple type registry. This crate never
//! matches on tuple variants: it works entirely against the generic
//! field mapping and the registry's declared field contracts, so adding
//! a variant to the domain never touches the codec.
//!
//! Wire conventions: Ruis are canonical UUID strings, temporal
//! references are `{"instant": millis}` or `{"ref": uuid}` objects,
//! taxonomy members travel as their stable numeric codes, and the
//! `tuple_type` entry carries the variant tag used to re-resolve the
//! object on decode. Decoding is total over all ten variants, including
//! the DI/DC metadata shapes, so persisted provenance records round-trip.

#![warn(missing_docs)]

use serde_json::{json, Map, Number, Value};
use thiserror::Error;

use reftrack_domain::registry::{self, fields_of};
use reftrack_domain::{
    AttrValue, ConstructError, Field, FieldKind, FieldMap, PorType, Relationship, RtChangeReason,
    RtTuple, Rui, RuiStatus, TempRef, TupleEventType, TupleType,
};

/// Errors that can occur while encoding or decoding tuples
#[derive(Debug, Error)]
pub enum CodecError {
    /// Malformed JSON text
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The decoded field mapping was rejected by the registry
    #[error(transparent)]
    Construct(#[from] ConstructError),

    /// A JSON value that does not fit the field's declared shape
    #[error("invalid value for field {field}: {detail}")]
    InvalidValue {
        /// The wire name of the offending field
        field: String,
        /// What was wrong with it
        detail: String,
    },

    /// The object carries no `tuple_type` entry to resolve the variant
    #[error("missing tuple_type entry")]
    MissingTupleType,
}

fn invalid(field: &str, detail: impl Into<String>) -> CodecError {
    CodecError::InvalidValue {
        field: field.to_string(),
        detail: detail.into(),
    }
}

fn temp_ref_to_json(tr: TempRef) -> Value {
    match tr {
        TempRef::Instant(ms) => json!({ "instant": ms }),
        TempRef::Ref(rui) => json!({ "ref": rui.to_string() }),
    }
}

fn attr_to_json(field: Field, value: &AttrValue) -> Result<Value, CodecError> {
    Ok(match value {
        AttrValue::Rui(rui) => Value::String(rui.to_string()),
        AttrValue::RuiList(list) => {
            Value::Array(list.iter().map(|r| Value::String(r.to_string())).collect())
        }
        AttrValue::TempRef(tr) => temp_ref_to_json(*tr),
        AttrValue::Relationship(r) => Value::String(r.uri.clone()),
        AttrValue::RuiStatus(s) => Value::String(s.as_str().to_string()),
        AttrValue::PorType(p) => Value::String(p.as_str().to_string()),
        AttrValue::Event(e) => Value::Number(e.code().into()),
        AttrValue::Reason(r) => Value::Number(r.code().into()),
        AttrValue::TupleType(t) => Value::String(t.as_str().to_string()),
        AttrValue::Bool(b) => Value::Bool(*b),
        AttrValue::Float(f) => Value::Number(
            Number::from_f64(*f).ok_or(ConstructError::ProjectionFailure { field })?,
        ),
        AttrValue::Text(s) => Value::String(s.clone()),
    })
}

/// Encode a tuple's attribute projection as a JSON object
pub fn to_json(tuple: &RtTuple) -> Result<Value, CodecError> {
    let mut out = Map::new();
    for (field, value) in tuple.attributes() {
        out.insert(field.as_str().to_string(), attr_to_json(field, &value)?);
    }
    Ok(Value::Object(out))
}

/// Encode a tuple as JSON text
pub fn to_json_string(tuple: &RtTuple) -> Result<String, CodecError> {
    Ok(to_json(tuple)?.to_string())
}

fn rui_from_json(field: &str, value: &Value) -> Result<Rui, CodecError> {
    let s = value
        .as_str()
        .ok_or_else(|| invalid(field, "expected a UUID string"))?;
    Rui::from_string(s).map_err(|e| invalid(field, e))
}

fn temp_ref_from_json(field: &str, value: &Value) -> Result<TempRef, CodecError> {
    let obj = value
        .as_object()
        .ok_or_else(|| invalid(field, "expected an object"))?;
    match (obj.get("instant"), obj.get("ref")) {
        (Some(ms), None) => {
            let ms = ms
                .as_u64()
                .ok_or_else(|| invalid(field, "instant must be unsigned milliseconds"))?;
            Ok(TempRef::Instant(ms))
        }
        (None, Some(r)) => Ok(TempRef::Ref(rui_from_json(field, r)?)),
        _ => Err(invalid(field, "expected exactly one of instant/ref")),
    }
}

fn attr_from_json(field: Field, kind: FieldKind, value: &Value) -> Result<AttrValue, CodecError> {
    let name = field.as_str();
    Ok(match kind {
        FieldKind::Rui => AttrValue::Rui(rui_from_json(name, value)?),
        FieldKind::RuiList => {
            let items = value
                .as_array()
                .ok_or_else(|| invalid(name, "expected an array of UUID strings"))?;
            let list = items
                .iter()
                .map(|v| rui_from_json(name, v))
                .collect::<Result<Vec<_>, _>>()?;
            AttrValue::RuiList(list)
        }
        FieldKind::TempRef => AttrValue::TempRef(temp_ref_from_json(name, value)?),
        FieldKind::Relationship => {
            let uri = value
                .as_str()
                .ok_or_else(|| invalid(name, "expected a URI string"))?;
            AttrValue::Relationship(Relationship::new(uri))
        }
        FieldKind::RuiStatus => {
            let s = value
                .as_str()
                .ok_or_else(|| invalid(name, "expected an assignment status code"))?;
            AttrValue::RuiStatus(
                RuiStatus::parse(s).ok_or_else(|| invalid(name, "unknown assignment status"))?,
            )
        }
        FieldKind::PorType => {
            let s = value
                .as_str()
                .ok_or_else(|| invalid(name, "expected a PoR type code"))?;
            AttrValue::PorType(
                PorType::parse(s).ok_or_else(|| invalid(name, "unknown PoR type"))?,
            )
        }
        FieldKind::Event => {
            let code = value
                .as_u64()
                .and_then(|c| u8::try_from(c).ok())
                .ok_or_else(|| invalid(name, "expected a numeric event code"))?;
            AttrValue::Event(
                TupleEventType::from_code(code)
                    .ok_or_else(|| invalid(name, "unknown event code"))?,
            )
        }
        FieldKind::Reason => {
            let code = value
                .as_u64()
                .and_then(|c| u8::try_from(c).ok())
                .ok_or_else(|| invalid(name, "expected a numeric reason code"))?;
            AttrValue::Reason(
                RtChangeReason::from_code(code)
                    .ok_or_else(|| invalid(name, "unknown change reason code"))?,
            )
        }
        FieldKind::TupleType => {
            let s = value
                .as_str()
                .ok_or_else(|| invalid(name, "expected a tuple type tag"))?;
            AttrValue::TupleType(s.parse::<TupleType>()?)
        }
        FieldKind::Bool => AttrValue::Bool(
            value
                .as_bool()
                .ok_or_else(|| invalid(name, "expected a boolean"))?,
        ),
        FieldKind::Float => AttrValue::Float(
            value
                .as_f64()
                .ok_or_else(|| invalid(name, "expected a number"))?,
        ),
        FieldKind::Text => AttrValue::Text(
            value
                .as_str()
                .ok_or_else(|| invalid(name, "expected a string"))?
                .to_string(),
        ),
    })
}

/// Decode a JSON object back into a tuple through the registry
///
/// The `tuple_type` entry selects the variant; every other entry is
/// re-typed against the variant's declared field contract and the
/// resulting mapping is handed to the registry, which applies the same
/// validation as any other construction.
pub fn from_json(value: &Value) -> Result<RtTuple, CodecError> {
    let obj = value
        .as_object()
        .ok_or_else(|| invalid("tuple", "expected a JSON object"))?;
    let tag = obj
        .get(Field::TupleType.as_str())
        .ok_or(CodecError::MissingTupleType)?
        .as_str()
        .ok_or_else(|| invalid(Field::TupleType.as_str(), "expected a tuple type tag"))?;
    let tuple_type = tag.parse::<TupleType>()?;

    let contract = fields_of(tuple_type);
    let mut fields = FieldMap::new();
    for (key, json_value) in obj {
        let field = Field::parse(key)
            .ok_or_else(|| invalid(key, "unknown attribute"))?;
        let kind = contract
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, k)| *k)
            .ok_or_else(|| invalid(key, "attribute is not part of this tuple type"))?;
        fields.insert(field, attr_from_json(field, kind, json_value)?);
    }

    Ok(registry::build(tuple_type, fields)?)
}

/// Decode a tuple from JSON text
pub fn from_json_str(text: &str) -> Result<RtTuple, CodecError> {
    let value: Value = serde_json::from_str(text)?;
    from_json(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reftrack_domain::factory::{self, FFields, NtoDeFields, NtoNFields, Provenance};
    use reftrack_domain::tuple::{DcTuple, DiTuple, FTuple};

    fn roundtrip(tuple: &RtTuple) -> RtTuple {
        let text = to_json_string(tuple).unwrap();
        from_json_str(&text).unwrap()
    }

    #[test]
    fn test_ntode_roundtrip() {
        let pair = factory::create(
            NtoDeFields::new(Rui::new(), "hello", Rui::new()),
            Provenance::insert(Rui::new()),
        )
        .unwrap();

        let decoded = roundtrip(&pair.tuple);
        assert_eq!(decoded, pair.tuple);
        match decoded {
            RtTuple::NtoDe(t) => {
                assert_eq!(t.data, "hello");
                assert!(t.polarity);
            }
            other => panic!("expected NtoDE, got {:?}", other.tuple_type()),
        }
    }

    #[test]
    fn test_metadata_companions_roundtrip() {
        // Persisted DI/DC records must decode, even though the factory
        // refuses to create them directly
        let di = factory::create(
            FFields::new(Rui::new()),
            Provenance::insert(Rui::new()),
        )
        .unwrap()
        .metadata;
        assert_eq!(roundtrip(&di), di);

        let dc = factory::create(
            FFields::new(Rui::new()),
            Provenance::new(
                TupleEventType::Invalidate,
                RtChangeReason::Reality,
                Rui::new(),
            )
            .with_replacements(vec![Rui::new(), Rui::new()]),
        )
        .unwrap()
        .metadata;
        assert_eq!(roundtrip(&dc), dc);
    }

    #[test]
    fn test_all_constructed_pairs_roundtrip() {
        let a = Rui::new();
        let part_of = Relationship::new("http://example.org/part-of");
        let pairs = vec![
            factory::create(
                NtoNFields::new(part_of, vec![Rui::new(), Rui::new()]).with_polarity(false),
                Provenance::insert(a),
            )
            .unwrap(),
            factory::create(
                FFields::new(Rui::new()).with_confidence(0.3),
                Provenance::insert(a),
            )
            .unwrap(),
        ];
        for pair in pairs {
            assert_eq!(roundtrip(&pair.tuple), pair.tuple);
            assert_eq!(roundtrip(&pair.metadata), pair.metadata);
        }
    }

    #[test]
    fn test_wire_shape() {
        let tuple = RtTuple::Di(DiTuple {
            rui: Rui::new(),
            ruit: Rui::new(),
            ruid: Rui::new(),
            t: TempRef::Instant(1_700_000_000_000),
            event_reason: RtChangeReason::Belief,
            ruia: Rui::new(),
            ta: TempRef::Ref(Rui::new()),
        });
        let value = to_json(&tuple).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj["tuple_type"], "DI");
        assert_eq!(obj["event_reason"], 4);
        assert_eq!(obj["t"]["instant"], 1_700_000_000_000u64);
        assert!(obj["ta"]["ref"].is_string());
        assert_eq!(obj["rui"].as_str().unwrap().len(), 36);
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = from_json_str(r#"{"tuple_type": "NtoX"}"#).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Construct(ConstructError::UnknownTupleType { .. })
        ));
    }

    #[test]
    fn test_missing_tuple_type_is_rejected() {
        let err = from_json_str(r#"{"data": "hello"}"#).unwrap_err();
        assert!(matches!(err, CodecError::MissingTupleType));
    }

    #[test]
    fn test_bare_string_is_not_an_identifier() {
        let err = from_json_str(r#"{"tuple_type": "AN", "ruin": "not-a-uuid"}"#).unwrap_err();
        assert!(matches!(err, CodecError::InvalidValue { ref field, .. } if field == "ruin"));
    }

    #[test]
    fn test_field_foreign_to_variant_is_rejected() {
        let dc = RtTuple::Dc(DcTuple {
            rui: Rui::new(),
            ruit: Rui::new(),
            ruid: Rui::new(),
            t: TempRef::Instant(0),
            event: TupleEventType::Invalidate,
            event_reason: RtChangeReason::Reality,
            replacements: vec![],
        });
        let mut value = to_json(&dc).unwrap();
        // Splice an F-only attribute into a DC object
        value
            .as_object_mut()
            .unwrap()
            .insert("C".to_string(), serde_json::json!(0.5));
        let err = from_json(&value).unwrap_err();
        assert!(matches!(err, CodecError::InvalidValue { ref field, .. } if field == "C"));
    }

    #[test]
    fn test_out_of_range_confidence_rejected_on_decode() {
        let rui = Rui::new();
        let text = format!(
            r#"{{"tuple_type": "F", "ruitn": "{}", "C": 1.5}}"#,
            rui
        );
        let err = from_json_str(&text).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Construct(ConstructError::InvalidFields { field: Field::C, .. })
        ));
    }

    #[test]
    fn test_non_finite_confidence_cannot_be_encoded() {
        // Unreachable through the factory; only a hand-built instance can
        // carry a non-finite float
        let tuple = RtTuple::F(FTuple {
            rui: Rui::new(),
            ruitn: Rui::new(),
            c: f64::NAN,
        });
        let err = to_json(&tuple).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Construct(ConstructError::ProjectionFailure { field: Field::C })
        ));
    }

    #[test]
    fn test_malformed_json_is_a_json_error() {
        assert!(matches!(
            from_json_str("{not json").unwrap_err(),
            CodecError::Json(_)
        ));
    }
}
