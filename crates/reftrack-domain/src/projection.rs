//! Attribute projection: the single polymorphic flattening of any tuple
//! variant into a generic field mapping.
//!
//! This is the only place that knows how to take a variant apart field by
//! field; serializers consume the mapping and never match on variants.
//! The projection is total over all ten variants, deterministic, and
//! round-trips through [`crate::registry::build`] to a structurally equal
//! tuple.

use crate::registry::{AttrValue, Field, FieldMap};
use crate::tuple::RtTuple;

impl RtTuple {
    /// Flatten this tuple into a field-name-to-value mapping
    ///
    /// The mapping carries every instance field plus the variant's
    /// `tuple_type` constant. The same tuple always yields the same
    /// mapping.
    pub fn attributes(&self) -> FieldMap {
        let mut out = FieldMap::new();
        out.insert(Field::Rui, AttrValue::Rui(self.rui()));
        out.insert(Field::TupleType, AttrValue::TupleType(self.tuple_type()));
        match self {
            RtTuple::An(t) => {
                out.insert(Field::Ruin, AttrValue::Rui(t.ruin));
                out.insert(Field::Ar, AttrValue::RuiStatus(t.ar));
                out.insert(Field::Unique, AttrValue::PorType(t.unique));
            }
            RtTuple::Ar(t) => {
                out.insert(Field::Ruir, AttrValue::Rui(t.ruir));
                out.insert(Field::Ruio, AttrValue::Rui(t.ruio));
                out.insert(Field::Ar, AttrValue::RuiStatus(t.ar));
                out.insert(Field::Unique, AttrValue::PorType(t.unique));
            }
            RtTuple::Di(t) => {
                out.insert(Field::Ruit, AttrValue::Rui(t.ruit));
                out.insert(Field::Ruid, AttrValue::Rui(t.ruid));
                out.insert(Field::T, AttrValue::TempRef(t.t));
                out.insert(Field::EventReason, AttrValue::Reason(t.event_reason));
                out.insert(Field::Ruia, AttrValue::Rui(t.ruia));
                out.insert(Field::Ta, AttrValue::TempRef(t.ta));
            }
            RtTuple::Dc(t) => {
                out.insert(Field::Ruit, AttrValue::Rui(t.ruit));
                out.insert(Field::Ruid, AttrValue::Rui(t.ruid));
                out.insert(Field::T, AttrValue::TempRef(t.t));
                out.insert(Field::Event, AttrValue::Event(t.event));
                out.insert(Field::EventReason, AttrValue::Reason(t.event_reason));
                out.insert(
                    Field::Replacements,
                    AttrValue::RuiList(t.replacements.clone()),
                );
            }
            RtTuple::F(t) => {
                out.insert(Field::Ruitn, AttrValue::Rui(t.ruitn));
                out.insert(Field::C, AttrValue::Float(t.c));
            }
            RtTuple::NtoN(t) => {
                out.insert(Field::Polarity, AttrValue::Bool(t.polarity));
                out.insert(Field::R, AttrValue::Relationship(t.r.clone()));
                out.insert(Field::P, AttrValue::RuiList(t.p.clone()));
                out.insert(Field::Tr, AttrValue::TempRef(t.tr));
            }
            RtTuple::NtoR(t) => {
                out.insert(Field::Polarity, AttrValue::Bool(t.polarity));
                out.insert(Field::R, AttrValue::Rui(t.r));
                out.insert(Field::Ruin, AttrValue::Rui(t.ruin));
                out.insert(Field::Ruir, AttrValue::Rui(t.ruir));
                out.insert(Field::Tr, AttrValue::TempRef(t.tr));
            }
            RtTuple::NtoC(t) => {
                out.insert(Field::Polarity, AttrValue::Bool(t.polarity));
                out.insert(Field::R, AttrValue::Relationship(t.r.clone()));
                out.insert(Field::Ruics, AttrValue::Rui(t.ruics));
                out.insert(Field::Ruin, AttrValue::Rui(t.ruin));
                out.insert(Field::Code, AttrValue::Text(t.code.clone()));
                out.insert(Field::Tr, AttrValue::TempRef(t.tr));
            }
            RtTuple::NtoDe(t) => {
                out.insert(Field::Polarity, AttrValue::Bool(t.polarity));
                out.insert(Field::Ruin, AttrValue::Rui(t.ruin));
                out.insert(Field::Data, AttrValue::Text(t.data.clone()));
                out.insert(Field::Ruidt, AttrValue::Rui(t.ruidt));
            }
            RtTuple::NtoLackR(t) => {
                out.insert(Field::R, AttrValue::Relationship(t.r.clone()));
                out.insert(Field::Ruin, AttrValue::Rui(t.ruin));
                out.insert(Field::Ruir, AttrValue::Rui(t.ruir));
                out.insert(Field::Tr, AttrValue::TempRef(t.tr));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{RtChangeReason, TupleEventType};
    use crate::registry::{self, fields_of};
    use crate::rui::{Relationship, Rui, TempRef};
    use crate::tuple::{
        AnTuple, ArTuple, DcTuple, DiTuple, FTuple, NtoCTuple, NtoDeTuple, NtoLackRTuple,
        NtoNTuple, NtoRTuple, PorType, RuiStatus,
    };

    /// One instance of every variant, with no field left at its default
    fn sample_tuples() -> Vec<RtTuple> {
        let tr = TempRef::Instant(1_700_000_000_000);
        let part_of = Relationship::new("http://example.org/part-of");
        vec![
            RtTuple::An(AnTuple {
                rui: Rui::new(),
                ruin: Rui::new(),
                ar: RuiStatus::Reserved,
                unique: PorType::NonSingular,
            }),
            RtTuple::Ar(ArTuple {
                rui: Rui::new(),
                ruir: Rui::new(),
                ruio: Rui::new(),
                ar: RuiStatus::Assigned,
                unique: PorType::Singular,
            }),
            RtTuple::Di(DiTuple {
                rui: Rui::new(),
                ruit: Rui::new(),
                ruid: Rui::new(),
                t: tr,
                event_reason: RtChangeReason::Belief,
                ruia: Rui::new(),
                ta: TempRef::Ref(Rui::new()),
            }),
            RtTuple::Dc(DcTuple {
                rui: Rui::new(),
                ruit: Rui::new(),
                ruid: Rui::new(),
                t: tr,
                event: TupleEventType::Invalidate,
                event_reason: RtChangeReason::A1,
                replacements: vec![Rui::new(), Rui::new()],
            }),
            RtTuple::F(FTuple {
                rui: Rui::new(),
                ruitn: Rui::new(),
                c: 0.25,
            }),
            RtTuple::NtoN(NtoNTuple {
                rui: Rui::new(),
                polarity: false,
                r: part_of.clone(),
                p: vec![Rui::new(), Rui::new(), Rui::new()],
                tr,
            }),
            RtTuple::NtoR(NtoRTuple {
                rui: Rui::new(),
                polarity: true,
                r: Rui::new(),
                ruin: Rui::new(),
                ruir: Rui::new(),
                tr,
            }),
            RtTuple::NtoC(NtoCTuple {
                rui: Rui::new(),
                polarity: true,
                r: part_of.clone(),
                ruics: Rui::new(),
                ruin: Rui::new(),
                code: "C0011849".to_string(),
                tr,
            }),
            RtTuple::NtoDe(NtoDeTuple {
                rui: Rui::new(),
                polarity: true,
                ruin: Rui::new(),
                data: "hello".to_string(),
                ruidt: Rui::new(),
            }),
            RtTuple::NtoLackR(NtoLackRTuple {
                rui: Rui::new(),
                r: part_of,
                ruin: Rui::new(),
                ruir: Rui::new(),
                tr,
            }),
        ]
    }

    #[test]
    fn test_projection_matches_declared_contract() {
        for tuple in sample_tuples() {
            let attrs = tuple.attributes();
            let declared = fields_of(tuple.tuple_type());
            assert_eq!(attrs.len(), declared.len(), "{}", tuple.tuple_type());
            for (field, kind) in declared {
                let value = attrs
                    .get(field)
                    .unwrap_or_else(|| panic!("{}: missing {}", tuple.tuple_type(), field));
                assert_eq!(value.kind(), *kind, "{}: {}", tuple.tuple_type(), field);
            }
        }
    }

    #[test]
    fn test_projection_is_deterministic() {
        for tuple in sample_tuples() {
            assert_eq!(tuple.attributes(), tuple.attributes());
        }
    }

    #[test]
    fn test_projection_roundtrips_through_registry() {
        for tuple in sample_tuples() {
            let rebuilt = registry::build(tuple.tuple_type(), tuple.attributes()).unwrap();
            assert_eq!(rebuilt, tuple, "{} did not round-trip", tuple.tuple_type());
        }
    }

    #[test]
    fn test_projection_includes_type_constant_and_rui() {
        for tuple in sample_tuples() {
            let attrs = tuple.attributes();
            assert_eq!(
                attrs.get(&Field::TupleType),
                Some(&AttrValue::TupleType(tuple.tuple_type()))
            );
            assert_eq!(attrs.get(&Field::Rui), Some(&AttrValue::Rui(tuple.rui())));
        }
    }
}
