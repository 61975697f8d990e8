//! Validating factory: type-directed construction of a concrete tuple
//! together with its mandatory provenance companion.
//!
//! Every substantive assertion enters the ledger through here. A call
//! either yields a [`TuplePair`] — the concrete tuple plus exactly one
//! DI/DC metadata tuple whose `ruit` names it — or a typed error with
//! nothing constructed. There is no way to observe a half-built pair.

use crate::error::ConstructError;
use crate::metadata::{RtChangeReason, TupleEventType};
use crate::registry::{self, AttrValue, Field, FieldMap};
use crate::rui::{Relationship, Rui, TempRef};
use crate::tuple::{DcTuple, DiTuple, PorType, RtTuple, RuiStatus, TupleType};

/// Provenance parameters for a construction event
///
/// Carried into the metadata companion: who asserted (`author`), who
/// committed the record (`registrar`), when, what kind of event, why,
/// and which tuples the target supersedes.
#[derive(Debug, Clone, PartialEq)]
pub struct Provenance {
    /// The kind of ledger event
    pub event: TupleEventType,
    /// Why the event happened
    pub event_reason: RtChangeReason,
    /// Tuples superseded by the one being constructed
    pub replacements: Vec<Rui>,
    /// The author of the assertion
    pub author: Rui,
    /// The registrar committing the record; defaults to the author
    pub registrar: Rui,
    /// When the event happened
    pub when: TempRef,
}

impl Provenance {
    /// Provenance for an event of the given kind and reason, authored now
    pub fn new(event: TupleEventType, event_reason: RtChangeReason, author: Rui) -> Self {
        Self {
            event,
            event_reason,
            replacements: Vec::new(),
            author,
            registrar: author,
            when: TempRef::now(),
        }
    }

    /// The common case: a plain insertion out of belief
    pub fn insert(author: Rui) -> Self {
        Self::new(TupleEventType::Insert, RtChangeReason::Belief, author)
    }

    /// Record the tuples the new one supersedes
    pub fn with_replacements(mut self, replacements: Vec<Rui>) -> Self {
        self.replacements = replacements;
        self
    }

    /// Record a registrar distinct from the author
    pub fn with_registrar(mut self, registrar: Rui) -> Self {
        self.registrar = registrar;
        self
    }

    /// Pin the event time instead of using the current instant
    pub fn at(mut self, when: TempRef) -> Self {
        self.when = when;
        self
    }
}

/// The atomic result of a successful construction
#[derive(Debug, Clone, PartialEq)]
pub struct TuplePair {
    /// The concrete tuple that was requested
    pub tuple: RtTuple,
    /// Its provenance companion; `ruit` equals `tuple.rui()`
    pub metadata: RtTuple,
}

/// Build the metadata companion for a freshly constructed tuple
///
/// A plain insert gets a DI record; anything carrying a different event
/// kind or replacements needs the DC shape.
fn companion(ruit: Rui, provenance: Provenance) -> RtTuple {
    if provenance.event == TupleEventType::Insert && provenance.replacements.is_empty() {
        RtTuple::Di(DiTuple {
            rui: Rui::new(),
            ruit,
            ruid: provenance.registrar,
            t: provenance.when,
            event_reason: provenance.event_reason,
            ruia: provenance.author,
            ta: provenance.when,
        })
    } else {
        RtTuple::Dc(DcTuple {
            rui: Rui::new(),
            ruit,
            ruid: provenance.registrar,
            t: provenance.when,
            event: provenance.event,
            event_reason: provenance.event_reason,
            replacements: provenance.replacements,
        })
    }
}

/// The generic construction entry point
///
/// For tuple types chosen dynamically, e.g. from decoded data. Rejects
/// the DI/DC tags before building anything; otherwise validates `fields`
/// against the variant's contract and returns the concrete tuple paired
/// with its metadata companion.
pub fn construct(
    tuple_type: TupleType,
    fields: FieldMap,
    provenance: Provenance,
) -> Result<TuplePair, ConstructError> {
    if tuple_type.is_metadata() {
        return Err(ConstructError::DirectMetadataConstruction { tuple_type });
    }
    let tuple = registry::build(tuple_type, fields)?;
    let metadata = companion(tuple.rui(), provenance);
    Ok(TuplePair { tuple, metadata })
}

/// Typed parameters for one tuple variant
///
/// Each implementor fixes the tuple-type tag and lowers its named,
/// defaulted parameters to the generic field mapping, so [`create`]
/// inherits every guarantee of [`construct`].
pub trait TupleFields {
    /// The tag this parameter set builds
    const TUPLE_TYPE: TupleType;

    /// Lower to the generic field mapping
    fn into_fields(self) -> FieldMap;
}

/// Construct a tuple from typed per-variant parameters
///
/// The statically-typed convenience counterpart of [`construct`].
pub fn create<F: TupleFields>(
    fields: F,
    provenance: Provenance,
) -> Result<TuplePair, ConstructError> {
    construct(F::TUPLE_TYPE, fields.into_fields(), provenance)
}

/// Parameters for an AN tuple: first assignment of an identifier
///
/// Defaults: `ar` assigned, `unique` singular.
#[derive(Debug, Clone, PartialEq)]
pub struct AnFields {
    /// The identifier being assigned
    pub ruin: Rui,
    /// Assignment status
    pub ar: RuiStatus,
    /// Singular or repeatable
    pub unique: PorType,
}

impl AnFields {
    /// Assign `ruin` with the documented defaults
    pub fn new(ruin: Rui) -> Self {
        Self {
            ruin,
            ar: RuiStatus::default(),
            unique: PorType::default(),
        }
    }

    /// Override the assignment status
    pub fn with_status(mut self, ar: RuiStatus) -> Self {
        self.ar = ar;
        self
    }

    /// Override the singular/repeatable characterization
    pub fn with_por_type(mut self, unique: PorType) -> Self {
        self.unique = unique;
        self
    }
}

impl TupleFields for AnFields {
    const TUPLE_TYPE: TupleType = TupleType::An;

    fn into_fields(self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert(Field::Ruin, AttrValue::Rui(self.ruin));
        fields.insert(Field::Ar, AttrValue::RuiStatus(self.ar));
        fields.insert(Field::Unique, AttrValue::PorType(self.unique));
        fields
    }
}

/// Parameters for an AR tuple: assignment tied to a repeatable referent
///
/// Defaults: `ar` assigned, `unique` singular.
#[derive(Debug, Clone, PartialEq)]
pub struct ArFields {
    /// The repeatable referent
    pub ruir: Rui,
    /// The occurrence being registered
    pub ruio: Rui,
    /// Assignment status
    pub ar: RuiStatus,
    /// Singular or repeatable
    pub unique: PorType,
}

impl ArFields {
    /// Register an occurrence of `ruir` with the documented defaults
    pub fn new(ruir: Rui, ruio: Rui) -> Self {
        Self {
            ruir,
            ruio,
            ar: RuiStatus::default(),
            unique: PorType::default(),
        }
    }

    /// Override the assignment status
    pub fn with_status(mut self, ar: RuiStatus) -> Self {
        self.ar = ar;
        self
    }

    /// Override the singular/repeatable characterization
    pub fn with_por_type(mut self, unique: PorType) -> Self {
        self.unique = unique;
        self
    }
}

impl TupleFields for ArFields {
    const TUPLE_TYPE: TupleType = TupleType::Ar;

    fn into_fields(self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert(Field::Ruir, AttrValue::Rui(self.ruir));
        fields.insert(Field::Ruio, AttrValue::Rui(self.ruio));
        fields.insert(Field::Ar, AttrValue::RuiStatus(self.ar));
        fields.insert(Field::Unique, AttrValue::PorType(self.unique));
        fields
    }
}

/// Parameters for an F tuple: confidence in another tuple
///
/// Default: `c` 1.0 (full confidence).
#[derive(Debug, Clone, PartialEq)]
pub struct FFields {
    /// The tuple the confidence applies to
    pub ruitn: Rui,
    /// Confidence level, validated against [0.0, 1.0] on construction
    pub c: f64,
}

impl FFields {
    /// Full confidence in the tuple named by `ruitn`
    pub fn new(ruitn: Rui) -> Self {
        Self { ruitn, c: 1.0 }
    }

    /// Override the confidence level
    pub fn with_confidence(mut self, c: f64) -> Self {
        self.c = c;
        self
    }
}

impl TupleFields for FFields {
    const TUPLE_TYPE: TupleType = TupleType::F;

    fn into_fields(self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert(Field::Ruitn, AttrValue::Rui(self.ruitn));
        fields.insert(Field::C, AttrValue::Float(self.c));
        fields
    }
}

/// Parameters for an NtoN tuple: a relation among non-repeatable referents
///
/// Defaults: `polarity` true, `tr` now.
#[derive(Debug, Clone, PartialEq)]
pub struct NtoNFields {
    /// The relation
    pub r: Relationship,
    /// The participating referents
    pub p: Vec<Rui>,
    /// Holds as stated, or negated
    pub polarity: bool,
    /// When the relation holds
    pub tr: TempRef,
}

impl NtoNFields {
    /// Relate the referents in `p` by `r`, holding now
    pub fn new(r: Relationship, p: Vec<Rui>) -> Self {
        Self {
            r,
            p,
            polarity: true,
            tr: TempRef::now(),
        }
    }

    /// Override the polarity
    pub fn with_polarity(mut self, polarity: bool) -> Self {
        self.polarity = polarity;
        self
    }

    /// Pin the temporal reference
    pub fn at(mut self, tr: TempRef) -> Self {
        self.tr = tr;
        self
    }
}

impl TupleFields for NtoNFields {
    const TUPLE_TYPE: TupleType = TupleType::NtoN;

    fn into_fields(self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert(Field::R, AttrValue::Relationship(self.r));
        fields.insert(Field::P, AttrValue::RuiList(self.p));
        fields.insert(Field::Polarity, AttrValue::Bool(self.polarity));
        fields.insert(Field::Tr, AttrValue::TempRef(self.tr));
        fields
    }
}

/// Parameters for an NtoR tuple: links a non-repeatable referent to a
/// repeatable one
///
/// Defaults: `polarity` true, `tr` now.
#[derive(Debug, Clone, PartialEq)]
pub struct NtoRFields {
    /// Identifier of the relation instance
    pub r: Rui,
    /// The non-repeatable referent
    pub ruin: Rui,
    /// The repeatable referent
    pub ruir: Rui,
    /// Holds as stated, or negated
    pub polarity: bool,
    /// When the relation holds
    pub tr: TempRef,
}

impl NtoRFields {
    /// Link `ruin` to `ruir` through the relation instance `r`
    pub fn new(r: Rui, ruin: Rui, ruir: Rui) -> Self {
        Self {
            r,
            ruin,
            ruir,
            polarity: true,
            tr: TempRef::now(),
        }
    }

    /// Override the polarity
    pub fn with_polarity(mut self, polarity: bool) -> Self {
        self.polarity = polarity;
        self
    }

    /// Pin the temporal reference
    pub fn at(mut self, tr: TempRef) -> Self {
        self.tr = tr;
        self
    }
}

impl TupleFields for NtoRFields {
    const TUPLE_TYPE: TupleType = TupleType::NtoR;

    fn into_fields(self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert(Field::R, AttrValue::Rui(self.r));
        fields.insert(Field::Ruin, AttrValue::Rui(self.ruin));
        fields.insert(Field::Ruir, AttrValue::Rui(self.ruir));
        fields.insert(Field::Polarity, AttrValue::Bool(self.polarity));
        fields.insert(Field::Tr, AttrValue::TempRef(self.tr));
        fields
    }
}

/// Parameters for an NtoC tuple: a coded concept annotation
///
/// Defaults: `polarity` true, `tr` now.
#[derive(Debug, Clone, PartialEq)]
pub struct NtoCFields {
    /// The relation between referent and concept
    pub r: Relationship,
    /// The concept system
    pub ruics: Rui,
    /// The annotated referent
    pub ruin: Rui,
    /// The concept code
    pub code: String,
    /// Holds as stated, or negated
    pub polarity: bool,
    /// When the annotation holds
    pub tr: TempRef,
}

impl NtoCFields {
    /// Annotate `ruin` with `code` from the concept system `ruics`
    pub fn new(r: Relationship, ruics: Rui, ruin: Rui, code: impl Into<String>) -> Self {
        Self {
            r,
            ruics,
            ruin,
            code: code.into(),
            polarity: true,
            tr: TempRef::now(),
        }
    }

    /// Override the polarity
    pub fn with_polarity(mut self, polarity: bool) -> Self {
        self.polarity = polarity;
        self
    }

    /// Pin the temporal reference
    pub fn at(mut self, tr: TempRef) -> Self {
        self.tr = tr;
        self
    }
}

impl TupleFields for NtoCFields {
    const TUPLE_TYPE: TupleType = TupleType::NtoC;

    fn into_fields(self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert(Field::R, AttrValue::Relationship(self.r));
        fields.insert(Field::Ruics, AttrValue::Rui(self.ruics));
        fields.insert(Field::Ruin, AttrValue::Rui(self.ruin));
        fields.insert(Field::Code, AttrValue::Text(self.code));
        fields.insert(Field::Polarity, AttrValue::Bool(self.polarity));
        fields.insert(Field::Tr, AttrValue::TempRef(self.tr));
        fields
    }
}

/// Parameters for an NtoDE tuple: literal data attached to a referent
///
/// Default: `polarity` true.
#[derive(Debug, Clone, PartialEq)]
pub struct NtoDeFields {
    /// The referent the data is attributed to
    pub ruin: Rui,
    /// The literal payload
    pub data: String,
    /// Identifier of the payload's data type
    pub ruidt: Rui,
    /// Holds as stated, or negated
    pub polarity: bool,
}

impl NtoDeFields {
    /// Attach `data` of type `ruidt` to `ruin`
    pub fn new(ruin: Rui, data: impl Into<String>, ruidt: Rui) -> Self {
        Self {
            ruin,
            data: data.into(),
            ruidt,
            polarity: true,
        }
    }

    /// Override the polarity
    pub fn with_polarity(mut self, polarity: bool) -> Self {
        self.polarity = polarity;
        self
    }
}

impl TupleFields for NtoDeFields {
    const TUPLE_TYPE: TupleType = TupleType::NtoDe;

    fn into_fields(self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert(Field::Ruin, AttrValue::Rui(self.ruin));
        fields.insert(Field::Data, AttrValue::Text(self.data));
        fields.insert(Field::Ruidt, AttrValue::Rui(self.ruidt));
        fields.insert(Field::Polarity, AttrValue::Bool(self.polarity));
        fields
    }
}

/// Parameters for an NtoLackR tuple: asserted absence of a relation
///
/// Default: `tr` now.
#[derive(Debug, Clone, PartialEq)]
pub struct NtoLackRFields {
    /// The relation that does not hold
    pub r: Relationship,
    /// The non-repeatable referent
    pub ruin: Rui,
    /// The repeatable referent
    pub ruir: Rui,
    /// When the relation fails to hold
    pub tr: TempRef,
}

impl NtoLackRFields {
    /// Assert that `ruin` lacks relation `r` to `ruir`
    pub fn new(r: Relationship, ruin: Rui, ruir: Rui) -> Self {
        Self {
            r,
            ruin,
            ruir,
            tr: TempRef::now(),
        }
    }

    /// Pin the temporal reference
    pub fn at(mut self, tr: TempRef) -> Self {
        self.tr = tr;
        self
    }
}

impl TupleFields for NtoLackRFields {
    const TUPLE_TYPE: TupleType = TupleType::NtoLackR;

    fn into_fields(self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert(Field::R, AttrValue::Relationship(self.r));
        fields.insert(Field::Ruin, AttrValue::Rui(self.ruin));
        fields.insert(Field::Ruir, AttrValue::Rui(self.ruir));
        fields.insert(Field::Tr, AttrValue::TempRef(self.tr));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> Rui {
        Rui::new()
    }

    /// The metadata companion of a pair, as a DI tuple
    fn as_di(pair: &TuplePair) -> &DiTuple {
        match &pair.metadata {
            RtTuple::Di(di) => di,
            other => panic!("expected DI companion, got {:?}", other.tuple_type()),
        }
    }

    #[test]
    fn test_every_concrete_type_pairs_with_metadata() {
        let a = author();
        let part_of = Relationship::new("http://example.org/part-of");
        let pairs: Vec<TuplePair> = vec![
            create(AnFields::new(Rui::new()), Provenance::insert(a)).unwrap(),
            create(ArFields::new(Rui::new(), Rui::new()), Provenance::insert(a)).unwrap(),
            create(FFields::new(Rui::new()), Provenance::insert(a)).unwrap(),
            create(
                NtoNFields::new(part_of.clone(), vec![Rui::new(), Rui::new()]),
                Provenance::insert(a),
            )
            .unwrap(),
            create(
                NtoRFields::new(Rui::new(), Rui::new(), Rui::new()),
                Provenance::insert(a),
            )
            .unwrap(),
            create(
                NtoCFields::new(part_of.clone(), Rui::new(), Rui::new(), "C34556"),
                Provenance::insert(a),
            )
            .unwrap(),
            create(
                NtoDeFields::new(Rui::new(), "hello", Rui::new()),
                Provenance::insert(a),
            )
            .unwrap(),
            create(
                NtoLackRFields::new(part_of, Rui::new(), Rui::new()),
                Provenance::insert(a),
            )
            .unwrap(),
        ];

        for pair in &pairs {
            assert!(!pair.tuple.is_metadata());
            assert!(pair.metadata.is_metadata());
            let di = as_di(pair);
            assert_eq!(di.ruit, pair.tuple.rui());
            assert_eq!(di.ruia, a);
        }
    }

    #[test]
    fn test_direct_metadata_construction_is_rejected() {
        for tag in [TupleType::Di, TupleType::Dc] {
            let err = construct(tag, FieldMap::new(), Provenance::insert(author())).unwrap_err();
            assert_eq!(
                err,
                ConstructError::DirectMetadataConstruction { tuple_type: tag }
            );
        }
    }

    #[test]
    fn test_an_example_fresh_rui_and_di_companion() {
        let ruin = Rui::new();
        let pair = create(AnFields::new(ruin), Provenance::insert(author())).unwrap();

        match &pair.tuple {
            RtTuple::An(an) => {
                assert_eq!(an.ruin, ruin);
                assert_eq!(an.ar, RuiStatus::Assigned);
                assert_eq!(an.unique, PorType::Singular);
                assert_ne!(an.rui, ruin);
            }
            other => panic!("expected AN, got {:?}", other.tuple_type()),
        }
        let di = as_di(&pair);
        assert_eq!(di.ruit, pair.tuple.rui());
        assert_eq!(di.event_reason, RtChangeReason::Belief);
    }

    #[test]
    fn test_out_of_range_confidence_produces_no_pair() {
        let result = create(
            FFields::new(Rui::new()).with_confidence(1.5),
            Provenance::insert(author()),
        );
        assert!(matches!(
            result,
            Err(ConstructError::InvalidFields { field: Field::C, .. })
        ));
    }

    #[test]
    fn test_confidence_is_stored_exactly() {
        let pair = create(
            FFields::new(Rui::new()).with_confidence(0.85),
            Provenance::insert(author()),
        )
        .unwrap();
        match &pair.tuple {
            RtTuple::F(f) => assert_eq!(f.c, 0.85),
            other => panic!("expected F, got {:?}", other.tuple_type()),
        }
    }

    #[test]
    fn test_replacements_switch_companion_to_dc() {
        let superseded = Rui::new();
        let a = author();
        let provenance = Provenance::new(
            TupleEventType::Invalidate,
            RtChangeReason::Reality,
            a,
        )
        .with_replacements(vec![superseded]);

        let pair = create(AnFields::new(Rui::new()), provenance).unwrap();
        match &pair.metadata {
            RtTuple::Dc(dc) => {
                assert_eq!(dc.ruit, pair.tuple.rui());
                assert_eq!(dc.event, TupleEventType::Invalidate);
                assert_eq!(dc.event_reason, RtChangeReason::Reality);
                assert_eq!(dc.replacements, vec![superseded]);
            }
            other => panic!("expected DC companion, got {:?}", other.tuple_type()),
        }
    }

    #[test]
    fn test_insert_with_replacements_is_dc() {
        // Replacements force the change-shaped companion even on insert
        let provenance = Provenance::insert(author()).with_replacements(vec![Rui::new()]);
        let pair = create(AnFields::new(Rui::new()), provenance).unwrap();
        assert_eq!(pair.metadata.tuple_type(), TupleType::Dc);
    }

    #[test]
    fn test_registrar_defaults_to_author() {
        let a = author();
        let pair = create(AnFields::new(Rui::new()), Provenance::insert(a)).unwrap();
        assert_eq!(as_di(&pair).ruid, a);

        let registrar = Rui::new();
        let pair = create(
            AnFields::new(Rui::new()),
            Provenance::insert(a).with_registrar(registrar),
        )
        .unwrap();
        assert_eq!(as_di(&pair).ruid, registrar);
    }

    #[test]
    fn test_provenance_when_is_carried() {
        let when = TempRef::Instant(1_700_000_000_000);
        let pair = create(
            AnFields::new(Rui::new()),
            Provenance::insert(author()).at(when),
        )
        .unwrap();
        let di = as_di(&pair);
        assert_eq!(di.t, when);
        assert_eq!(di.ta, when);
    }

    #[test]
    fn test_generic_entry_point_matches_typed_one() {
        let ruin = Rui::new();
        let rui = Rui::new();
        let a = author();
        let when = TempRef::Instant(42);

        let mut fields = AnFields::new(ruin).into_fields();
        fields.insert(Field::Rui, AttrValue::Rui(rui));
        let generic = construct(TupleType::An, fields, Provenance::insert(a).at(when)).unwrap();

        match &generic.tuple {
            RtTuple::An(an) => {
                assert_eq!(an.rui, rui);
                assert_eq!(an.ruin, ruin);
            }
            other => panic!("expected AN, got {:?}", other.tuple_type()),
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: confidence inside [0, 1] is stored exactly, outside fails
        #[test]
        fn test_confidence_construction(c in -1.0f64..2.0) {
            let result = create(
                FFields::new(Rui::new()).with_confidence(c),
                Provenance::insert(Rui::new()),
            );
            if (0.0..=1.0).contains(&c) {
                let pair = result.unwrap();
                match pair.tuple {
                    RtTuple::F(f) => prop_assert_eq!(f.c, c),
                    _ => return Err(TestCaseError::fail("not an F tuple")),
                }
            } else {
                prop_assert!(result.is_err());
            }
        }

        /// Property: the companion always names the concrete tuple
        #[test]
        fn test_companion_always_pairs(polarity: bool, data in "[a-z]{0,16}") {
            let pair = create(
                NtoDeFields::new(Rui::new(), data, Rui::new()).with_polarity(polarity),
                Provenance::insert(Rui::new()),
            )
            .unwrap();
            let ruit = match &pair.metadata {
                RtTuple::Di(di) => di.ruit,
                RtTuple::Dc(dc) => dc.ruit,
                _ => return Err(TestCaseError::fail("companion is not metadata")),
            };
            prop_assert_eq!(ruit, pair.tuple.rui());
        }
    }
}
