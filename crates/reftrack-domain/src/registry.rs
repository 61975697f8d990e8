//! Tuple type registry: the attribute vocabulary, per-variant field
//! contracts, and the single constructor dispatch over all ten tags.
//!
//! [`build`] is total over the registry, including DI/DC, so that
//! decoders can re-resolve persisted metadata tuples; the rule that
//! metadata tuples are never created directly belongs to the factory.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::ConstructError;
use crate::metadata::{RtChangeReason, TupleEventType};
use crate::rui::{Relationship, Rui, TempRef};
use crate::tuple::{
    AnTuple, ArTuple, DcTuple, DiTuple, FTuple, NtoCTuple, NtoDeTuple, NtoLackRTuple, NtoNTuple,
    NtoRTuple, PorType, RtTuple, RuiStatus, TupleType,
};

/// The closed vocabulary of attribute names across all tuple variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Field {
    Rui,
    TupleType,
    Ruin,
    Ruir,
    Ruio,
    Ruit,
    Ruid,
    Ruia,
    Ruitn,
    Ruics,
    Ruidt,
    Ar,
    Unique,
    T,
    Ta,
    Event,
    EventReason,
    Replacements,
    C,
    Polarity,
    R,
    P,
    Tr,
    Code,
    Data,
}

impl Field {
    /// The stable wire name of the attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Rui => "rui",
            Field::TupleType => "tuple_type",
            Field::Ruin => "ruin",
            Field::Ruir => "ruir",
            Field::Ruio => "ruio",
            Field::Ruit => "ruit",
            Field::Ruid => "ruid",
            Field::Ruia => "ruia",
            Field::Ruitn => "ruitn",
            Field::Ruics => "ruics",
            Field::Ruidt => "ruidt",
            Field::Ar => "ar",
            Field::Unique => "unique",
            Field::T => "t",
            Field::Ta => "ta",
            Field::Event => "event",
            Field::EventReason => "event_reason",
            Field::Replacements => "replacements",
            Field::C => "C",
            Field::Polarity => "polarity",
            Field::R => "r",
            Field::P => "p",
            Field::Tr => "tr",
            Field::Code => "code",
            Field::Data => "data",
        }
    }

    /// Resolve a wire name back to an attribute
    pub fn parse(s: &str) -> Option<Self> {
        const ALL: [Field; 25] = [
            Field::Rui,
            Field::TupleType,
            Field::Ruin,
            Field::Ruir,
            Field::Ruio,
            Field::Ruit,
            Field::Ruid,
            Field::Ruia,
            Field::Ruitn,
            Field::Ruics,
            Field::Ruidt,
            Field::Ar,
            Field::Unique,
            Field::T,
            Field::Ta,
            Field::Event,
            Field::EventReason,
            Field::Replacements,
            Field::C,
            Field::Polarity,
            Field::R,
            Field::P,
            Field::Tr,
            Field::Code,
            Field::Data,
        ];
        ALL.iter().copied().find(|f| f.as_str() == s)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The value shape an attribute carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum FieldKind {
    Rui,
    RuiList,
    TempRef,
    Relationship,
    RuiStatus,
    PorType,
    Event,
    Reason,
    TupleType,
    Bool,
    Float,
    Text,
}

/// A typed attribute value
///
/// Identifier-valued fields can only ever hold a [`Rui`], never a bare
/// string; the shape system is what enforces that invariant at the
/// generic entry point.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum AttrValue {
    Rui(Rui),
    RuiList(Vec<Rui>),
    TempRef(TempRef),
    Relationship(Relationship),
    RuiStatus(RuiStatus),
    PorType(PorType),
    Event(TupleEventType),
    Reason(RtChangeReason),
    TupleType(TupleType),
    Bool(bool),
    Float(f64),
    Text(String),
}

impl AttrValue {
    /// The shape of this value
    pub fn kind(&self) -> FieldKind {
        match self {
            AttrValue::Rui(_) => FieldKind::Rui,
            AttrValue::RuiList(_) => FieldKind::RuiList,
            AttrValue::TempRef(_) => FieldKind::TempRef,
            AttrValue::Relationship(_) => FieldKind::Relationship,
            AttrValue::RuiStatus(_) => FieldKind::RuiStatus,
            AttrValue::PorType(_) => FieldKind::PorType,
            AttrValue::Event(_) => FieldKind::Event,
            AttrValue::Reason(_) => FieldKind::Reason,
            AttrValue::TupleType(_) => FieldKind::TupleType,
            AttrValue::Bool(_) => FieldKind::Bool,
            AttrValue::Float(_) => FieldKind::Float,
            AttrValue::Text(_) => FieldKind::Text,
        }
    }
}

/// A mapping from attribute name to typed value
///
/// `BTreeMap` keeps iteration deterministic, which makes attribute
/// projection stable.
pub type FieldMap = BTreeMap<Field, AttrValue>;

/// The declared attributes of a variant, with their shapes
///
/// Includes the `rui` instance field and the `tuple_type` constant, so
/// the table covers exactly what attribute projection emits.
pub fn fields_of(tuple_type: TupleType) -> &'static [(Field, FieldKind)] {
    use self::{Field as F, FieldKind as K};
    match tuple_type {
        TupleType::An => &[
            (F::Rui, K::Rui),
            (F::TupleType, K::TupleType),
            (F::Ruin, K::Rui),
            (F::Ar, K::RuiStatus),
            (F::Unique, K::PorType),
        ],
        TupleType::Ar => &[
            (F::Rui, K::Rui),
            (F::TupleType, K::TupleType),
            (F::Ruir, K::Rui),
            (F::Ruio, K::Rui),
            (F::Ar, K::RuiStatus),
            (F::Unique, K::PorType),
        ],
        TupleType::Di => &[
            (F::Rui, K::Rui),
            (F::TupleType, K::TupleType),
            (F::Ruit, K::Rui),
            (F::Ruid, K::Rui),
            (F::T, K::TempRef),
            (F::EventReason, K::Reason),
            (F::Ruia, K::Rui),
            (F::Ta, K::TempRef),
        ],
        TupleType::Dc => &[
            (F::Rui, K::Rui),
            (F::TupleType, K::TupleType),
            (F::Ruit, K::Rui),
            (F::Ruid, K::Rui),
            (F::T, K::TempRef),
            (F::Event, K::Event),
            (F::EventReason, K::Reason),
            (F::Replacements, K::RuiList),
        ],
        TupleType::F => &[
            (F::Rui, K::Rui),
            (F::TupleType, K::TupleType),
            (F::Ruitn, K::Rui),
            (F::C, K::Float),
        ],
        TupleType::NtoN => &[
            (F::Rui, K::Rui),
            (F::TupleType, K::TupleType),
            (F::Polarity, K::Bool),
            (F::R, K::Relationship),
            (F::P, K::RuiList),
            (F::Tr, K::TempRef),
        ],
        TupleType::NtoR => &[
            (F::Rui, K::Rui),
            (F::TupleType, K::TupleType),
            (F::Polarity, K::Bool),
            (F::R, K::Rui),
            (F::Ruin, K::Rui),
            (F::Ruir, K::Rui),
            (F::Tr, K::TempRef),
        ],
        TupleType::NtoC => &[
            (F::Rui, K::Rui),
            (F::TupleType, K::TupleType),
            (F::Polarity, K::Bool),
            (F::R, K::Relationship),
            (F::Ruics, K::Rui),
            (F::Ruin, K::Rui),
            (F::Code, K::Text),
            (F::Tr, K::TempRef),
        ],
        TupleType::NtoDe => &[
            (F::Rui, K::Rui),
            (F::TupleType, K::TupleType),
            (F::Polarity, K::Bool),
            (F::Ruin, K::Rui),
            (F::Data, K::Text),
            (F::Ruidt, K::Rui),
        ],
        TupleType::NtoLackR => &[
            (F::Rui, K::Rui),
            (F::TupleType, K::TupleType),
            (F::R, K::Relationship),
            (F::Ruin, K::Rui),
            (F::Ruir, K::Rui),
            (F::Tr, K::TempRef),
        ],
    }
}

/// Consumes a [`FieldMap`] with typed, defaulted accessors, tracking the
/// variant under construction for error reporting.
struct Reader {
    tuple_type: TupleType,
    fields: FieldMap,
}

impl Reader {
    fn new(tuple_type: TupleType, mut fields: FieldMap) -> Result<Self, ConstructError> {
        // A projection-borne tuple_type entry must agree with the tag
        match fields.remove(&Field::TupleType) {
            None => {}
            Some(AttrValue::TupleType(t)) if t == tuple_type => {}
            Some(_) => {
                return Err(ConstructError::InvalidFields {
                    tuple_type,
                    field: Field::TupleType,
                    problem: "does not match the requested tuple type".to_string(),
                })
            }
        }
        Ok(Self { tuple_type, fields })
    }

    fn invalid(&self, field: Field, problem: &str) -> ConstructError {
        ConstructError::InvalidFields {
            tuple_type: self.tuple_type,
            field,
            problem: problem.to_string(),
        }
    }

    fn missing(&self, field: Field) -> ConstructError {
        self.invalid(field, "missing required field")
    }

    /// The tuple's own rui: fresh when absent
    fn rui(&mut self) -> Result<Rui, ConstructError> {
        match self.fields.remove(&Field::Rui) {
            None => Ok(Rui::new()),
            Some(AttrValue::Rui(rui)) => Ok(rui),
            Some(_) => Err(self.invalid(Field::Rui, "expected an identifier")),
        }
    }

    fn require_rui(&mut self, field: Field) -> Result<Rui, ConstructError> {
        match self.fields.remove(&field) {
            None => Err(self.missing(field)),
            Some(AttrValue::Rui(rui)) => Ok(rui),
            Some(_) => Err(self.invalid(field, "expected an identifier")),
        }
    }

    fn require_rui_list(&mut self, field: Field) -> Result<Vec<Rui>, ConstructError> {
        match self.fields.remove(&field) {
            None => Err(self.missing(field)),
            Some(AttrValue::RuiList(list)) => Ok(list),
            Some(_) => Err(self.invalid(field, "expected a list of identifiers")),
        }
    }

    fn rui_list_or_empty(&mut self, field: Field) -> Result<Vec<Rui>, ConstructError> {
        match self.fields.remove(&field) {
            None => Ok(Vec::new()),
            Some(AttrValue::RuiList(list)) => Ok(list),
            Some(_) => Err(self.invalid(field, "expected a list of identifiers")),
        }
    }

    fn require_relationship(&mut self, field: Field) -> Result<Relationship, ConstructError> {
        match self.fields.remove(&field) {
            None => Err(self.missing(field)),
            Some(AttrValue::Relationship(r)) => Ok(r),
            Some(_) => Err(self.invalid(field, "expected a relationship")),
        }
    }

    fn require_text(&mut self, field: Field) -> Result<String, ConstructError> {
        match self.fields.remove(&field) {
            None => Err(self.missing(field)),
            Some(AttrValue::Text(s)) => Ok(s),
            Some(_) => Err(self.invalid(field, "expected a string")),
        }
    }

    fn require_event(&mut self, field: Field) -> Result<TupleEventType, ConstructError> {
        match self.fields.remove(&field) {
            None => Err(self.missing(field)),
            Some(AttrValue::Event(e)) => Ok(e),
            Some(_) => Err(self.invalid(field, "expected a tuple event type")),
        }
    }

    fn require_reason(&mut self, field: Field) -> Result<RtChangeReason, ConstructError> {
        match self.fields.remove(&field) {
            None => Err(self.missing(field)),
            Some(AttrValue::Reason(r)) => Ok(r),
            Some(_) => Err(self.invalid(field, "expected a change reason")),
        }
    }

    /// Default: assigned
    fn status_or_default(&mut self) -> Result<RuiStatus, ConstructError> {
        match self.fields.remove(&Field::Ar) {
            None => Ok(RuiStatus::default()),
            Some(AttrValue::RuiStatus(s)) => Ok(s),
            Some(_) => Err(self.invalid(Field::Ar, "expected an assignment status")),
        }
    }

    /// Default: singular
    fn por_or_default(&mut self) -> Result<PorType, ConstructError> {
        match self.fields.remove(&Field::Unique) {
            None => Ok(PorType::default()),
            Some(AttrValue::PorType(p)) => Ok(p),
            Some(_) => Err(self.invalid(Field::Unique, "expected a portion-of-reality type")),
        }
    }

    /// Default: true (the relation holds as stated)
    fn polarity_or_true(&mut self) -> Result<bool, ConstructError> {
        match self.fields.remove(&Field::Polarity) {
            None => Ok(true),
            Some(AttrValue::Bool(b)) => Ok(b),
            Some(_) => Err(self.invalid(Field::Polarity, "expected a boolean")),
        }
    }

    /// Default: the current instant
    fn temp_or_now(&mut self, field: Field) -> Result<TempRef, ConstructError> {
        match self.fields.remove(&field) {
            None => Ok(TempRef::now()),
            Some(AttrValue::TempRef(t)) => Ok(t),
            Some(_) => Err(self.invalid(field, "expected a temporal reference")),
        }
    }

    /// Confidence: defaults to 1.0, must be finite and within [0.0, 1.0]
    fn confidence(&mut self) -> Result<f64, ConstructError> {
        let c = match self.fields.remove(&Field::C) {
            None => 1.0,
            Some(AttrValue::Float(c)) => c,
            Some(_) => return Err(self.invalid(Field::C, "expected a number")),
        };
        if !c.is_finite() || !(0.0..=1.0).contains(&c) {
            return Err(self.invalid(Field::C, "confidence must lie in [0.0, 1.0]"));
        }
        Ok(c)
    }

    /// Unknown and extra fields are rejected, never silently dropped
    fn finish(self) -> Result<(), ConstructError> {
        match self.fields.into_iter().next() {
            None => Ok(()),
            Some((field, _)) => Err(ConstructError::InvalidFields {
                tuple_type: self.tuple_type,
                field,
                problem: "field is not part of this tuple type".to_string(),
            }),
        }
    }
}

/// Build the concrete variant for `tuple_type` from a field mapping
///
/// Enforces each variant's field contract: required fields must be
/// present with the right shape, documented defaults fill the optional
/// ones, and anything left over is rejected. On failure nothing is
/// constructed.
pub fn build(tuple_type: TupleType, fields: FieldMap) -> Result<RtTuple, ConstructError> {
    let mut r = Reader::new(tuple_type, fields)?;
    let tuple = match tuple_type {
        TupleType::An => RtTuple::An(AnTuple {
            rui: r.rui()?,
            ruin: r.require_rui(Field::Ruin)?,
            ar: r.status_or_default()?,
            unique: r.por_or_default()?,
        }),
        TupleType::Ar => RtTuple::Ar(ArTuple {
            rui: r.rui()?,
            ruir: r.require_rui(Field::Ruir)?,
            ruio: r.require_rui(Field::Ruio)?,
            ar: r.status_or_default()?,
            unique: r.por_or_default()?,
        }),
        TupleType::Di => RtTuple::Di(DiTuple {
            rui: r.rui()?,
            ruit: r.require_rui(Field::Ruit)?,
            ruid: r.require_rui(Field::Ruid)?,
            t: r.temp_or_now(Field::T)?,
            event_reason: r.require_reason(Field::EventReason)?,
            ruia: r.require_rui(Field::Ruia)?,
            ta: r.temp_or_now(Field::Ta)?,
        }),
        TupleType::Dc => RtTuple::Dc(DcTuple {
            rui: r.rui()?,
            ruit: r.require_rui(Field::Ruit)?,
            ruid: r.require_rui(Field::Ruid)?,
            t: r.temp_or_now(Field::T)?,
            event: r.require_event(Field::Event)?,
            event_reason: r.require_reason(Field::EventReason)?,
            replacements: r.rui_list_or_empty(Field::Replacements)?,
        }),
        TupleType::F => RtTuple::F(FTuple {
            rui: r.rui()?,
            ruitn: r.require_rui(Field::Ruitn)?,
            c: r.confidence()?,
        }),
        TupleType::NtoN => RtTuple::NtoN(NtoNTuple {
            rui: r.rui()?,
            polarity: r.polarity_or_true()?,
            r: r.require_relationship(Field::R)?,
            p: r.require_rui_list(Field::P)?,
            tr: r.temp_or_now(Field::Tr)?,
        }),
        TupleType::NtoR => RtTuple::NtoR(NtoRTuple {
            rui: r.rui()?,
            polarity: r.polarity_or_true()?,
            r: r.require_rui(Field::R)?,
            ruin: r.require_rui(Field::Ruin)?,
            ruir: r.require_rui(Field::Ruir)?,
            tr: r.temp_or_now(Field::Tr)?,
        }),
        TupleType::NtoC => RtTuple::NtoC(NtoCTuple {
            rui: r.rui()?,
            polarity: r.polarity_or_true()?,
            r: r.require_relationship(Field::R)?,
            ruics: r.require_rui(Field::Ruics)?,
            ruin: r.require_rui(Field::Ruin)?,
            code: r.require_text(Field::Code)?,
            tr: r.temp_or_now(Field::Tr)?,
        }),
        TupleType::NtoDe => RtTuple::NtoDe(NtoDeTuple {
            rui: r.rui()?,
            polarity: r.polarity_or_true()?,
            ruin: r.require_rui(Field::Ruin)?,
            data: r.require_text(Field::Data)?,
            ruidt: r.require_rui(Field::Ruidt)?,
        }),
        TupleType::NtoLackR => RtTuple::NtoLackR(NtoLackRTuple {
            rui: r.rui()?,
            r: r.require_relationship(Field::R)?,
            ruin: r.require_rui(Field::Ruin)?,
            ruir: r.require_rui(Field::Ruir)?,
            tr: r.temp_or_now(Field::Tr)?,
        }),
    };
    r.finish()?;
    Ok(tuple)
}
