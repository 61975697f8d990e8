//! The closed set of referent-tracking tuple variants.
//!
//! Every entry in the ledger is one of the ten shapes below, modeled as a
//! single tagged union ([`RtTuple`]) rather than a trait hierarchy, so
//! that attribute flattening and registry dispatch can match exhaustively.
//! Tuples are immutable value records: a logical change is a new tuple
//! plus a DC metadata tuple naming the old one in `replacements`.

use std::fmt;
use std::str::FromStr;

use crate::error::ConstructError;
use crate::metadata::{RtChangeReason, TupleEventType};
use crate::rui::{Relationship, Rui, TempRef};

/// The tag identifying a tuple variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TupleType {
    /// First assignment of an identifier to a referent
    An,
    /// Assignment tied to a repeatable portion of reality
    Ar,
    /// Instantiation/invalidation provenance (metadata)
    Di,
    /// Change provenance with replacements (metadata)
    Dc,
    /// Confidence annotation on another tuple
    F,
    /// Relation among non-repeatable referents
    NtoN,
    /// Link between a non-repeatable and a repeatable referent
    NtoR,
    /// Concept-code annotation on a referent
    NtoC,
    /// Literal data attached to a referent
    NtoDe,
    /// Asserted absence of a relation
    NtoLackR,
}

impl TupleType {
    /// All tags, in a fixed order
    pub const ALL: [TupleType; 10] = [
        TupleType::An,
        TupleType::Ar,
        TupleType::Di,
        TupleType::Dc,
        TupleType::F,
        TupleType::NtoN,
        TupleType::NtoR,
        TupleType::NtoC,
        TupleType::NtoDe,
        TupleType::NtoLackR,
    ];

    /// The stable wire name of the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            TupleType::An => "AN",
            TupleType::Ar => "AR",
            TupleType::Di => "DI",
            TupleType::Dc => "DC",
            TupleType::F => "F",
            TupleType::NtoN => "NtoN",
            TupleType::NtoR => "NtoR",
            TupleType::NtoC => "NtoC",
            TupleType::NtoDe => "NtoDE",
            TupleType::NtoLackR => "NtoLackR",
        }
    }

    /// Resolve a wire name back to a tag
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }

    /// Whether this tag names a provenance (DI/DC) variant
    ///
    /// Metadata tuples only exist in tandem with another tuple; the
    /// factory refuses to build them directly.
    pub fn is_metadata(&self) -> bool {
        matches!(self, TupleType::Di | TupleType::Dc)
    }
}

impl FromStr for TupleType {
    type Err = ConstructError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ConstructError::UnknownTupleType { tag: s.to_string() })
    }
}

impl fmt::Display for TupleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of an identifier assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RuiStatus {
    /// The identifier is in use for a referent
    #[default]
    Assigned,
    /// The identifier is reserved but not yet in use
    Reserved,
}

impl RuiStatus {
    /// The stable wire code
    pub fn as_str(&self) -> &'static str {
        match self {
            RuiStatus::Assigned => "A",
            RuiStatus::Reserved => "R",
        }
    }

    /// Resolve a wire code back to a status
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "A" => Some(RuiStatus::Assigned),
            "R" => Some(RuiStatus::Reserved),
            _ => None,
        }
    }
}

/// Whether a portion of reality is singular or a repeatable kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PorType {
    /// A singular, non-repeatable portion of reality
    #[default]
    Singular,
    /// A repeatable kind or class
    NonSingular,
}

impl PorType {
    /// The stable wire code
    pub fn as_str(&self) -> &'static str {
        match self {
            PorType::Singular => "+SU",
            PorType::NonSingular => "-SU",
        }
    }

    /// Resolve a wire code back to a PoR type
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "+SU" => Some(PorType::Singular),
            "-SU" => Some(PorType::NonSingular),
            _ => None,
        }
    }
}

/// AN: first assignment of an identifier to a portion of reality
#[derive(Debug, Clone, PartialEq)]
pub struct AnTuple {
    /// This tuple's own identifier
    pub rui: Rui,
    /// The identifier being assigned for the first time
    pub ruin: Rui,
    /// Assignment status of `ruin`
    pub ar: RuiStatus,
    /// Whether the referent is singular or repeatable
    pub unique: PorType,
}

/// AR: assignment tied to a repeatable portion of reality
#[derive(Debug, Clone, PartialEq)]
pub struct ArTuple {
    /// This tuple's own identifier
    pub rui: Rui,
    /// The repeatable referent
    pub ruir: Rui,
    /// The occurrence being registered
    pub ruio: Rui,
    /// Assignment status
    pub ar: RuiStatus,
    /// Whether the referent is singular or repeatable
    pub unique: PorType,
}

/// DI: provenance of a tuple's instantiation or invalidation
#[derive(Debug, Clone, PartialEq)]
pub struct DiTuple {
    /// This tuple's own identifier
    pub rui: Rui,
    /// The tuple this record describes
    pub ruit: Rui,
    /// The registrar who committed the record
    pub ruid: Rui,
    /// When the described event happened
    pub t: TempRef,
    /// Why the event happened
    pub event_reason: RtChangeReason,
    /// The author of the described assertion
    pub ruia: Rui,
    /// When the assertion itself was made
    pub ta: TempRef,
}

/// DC: provenance of a change, with the superseding tuples
#[derive(Debug, Clone, PartialEq)]
pub struct DcTuple {
    /// This tuple's own identifier
    pub rui: Rui,
    /// The tuple this record describes
    pub ruit: Rui,
    /// The registrar who committed the record
    pub ruid: Rui,
    /// When the described event happened
    pub t: TempRef,
    /// The kind of event
    pub event: TupleEventType,
    /// Why the event happened
    pub event_reason: RtChangeReason,
    /// Identifiers of the tuples superseding `ruit` (owned copies)
    pub replacements: Vec<Rui>,
}

/// F: confidence in another tuple's assertion
#[derive(Debug, Clone, PartialEq)]
pub struct FTuple {
    /// This tuple's own identifier
    pub rui: Rui,
    /// The tuple the confidence applies to
    pub ruitn: Rui,
    /// Confidence level, in [0.0, 1.0]
    pub c: f64,
}

/// NtoN: a relation among non-repeatable portions of reality
#[derive(Debug, Clone, PartialEq)]
pub struct NtoNTuple {
    /// This tuple's own identifier
    pub rui: Rui,
    /// Whether the relation holds as stated or is negated
    pub polarity: bool,
    /// The relation
    pub r: Relationship,
    /// The participating referents (owned copies)
    pub p: Vec<Rui>,
    /// When the relation holds
    pub tr: TempRef,
}

/// NtoR: links a non-repeatable referent to a repeatable one
#[derive(Debug, Clone, PartialEq)]
pub struct NtoRTuple {
    /// This tuple's own identifier
    pub rui: Rui,
    /// Whether the relation holds as stated or is negated
    pub polarity: bool,
    /// Identifier of the relation instance
    pub r: Rui,
    /// The non-repeatable referent
    pub ruin: Rui,
    /// The repeatable referent
    pub ruir: Rui,
    /// When the relation holds
    pub tr: TempRef,
}

/// NtoC: annotates a referent with a coded concept
#[derive(Debug, Clone, PartialEq)]
pub struct NtoCTuple {
    /// This tuple's own identifier
    pub rui: Rui,
    /// Whether the annotation holds as stated or is negated
    pub polarity: bool,
    /// The relation between referent and concept
    pub r: Relationship,
    /// The concept system the code is drawn from
    pub ruics: Rui,
    /// The annotated referent
    pub ruin: Rui,
    /// The concept code within the concept system
    pub code: String,
    /// When the annotation holds
    pub tr: TempRef,
}

/// NtoDE: attaches literal data to a referent
#[derive(Debug, Clone, PartialEq)]
pub struct NtoDeTuple {
    /// This tuple's own identifier
    pub rui: Rui,
    /// Whether the attachment holds as stated or is negated
    pub polarity: bool,
    /// The referent the data is attributed to
    pub ruin: Rui,
    /// The literal payload
    pub data: String,
    /// Identifier of the payload's data type
    pub ruidt: Rui,
}

/// NtoLackR: asserts the absence of a relation
#[derive(Debug, Clone, PartialEq)]
pub struct NtoLackRTuple {
    /// This tuple's own identifier
    pub rui: Rui,
    /// The relation that does not hold
    pub r: Relationship,
    /// The non-repeatable referent
    pub ruin: Rui,
    /// The repeatable referent
    pub ruir: Rui,
    /// When the relation fails to hold
    pub tr: TempRef,
}

/// Any entry in the ledger: the closed sum over the ten variants
#[derive(Debug, Clone, PartialEq)]
pub enum RtTuple {
    /// First assignment of an identifier
    An(AnTuple),
    /// Assignment tied to a repeatable referent
    Ar(ArTuple),
    /// Instantiation/invalidation provenance
    Di(DiTuple),
    /// Change provenance with replacements
    Dc(DcTuple),
    /// Confidence annotation
    F(FTuple),
    /// Relation among non-repeatable referents
    NtoN(NtoNTuple),
    /// Non-repeatable to repeatable link
    NtoR(NtoRTuple),
    /// Concept-code annotation
    NtoC(NtoCTuple),
    /// Literal data attachment
    NtoDe(NtoDeTuple),
    /// Asserted absence of a relation
    NtoLackR(NtoLackRTuple),
}

impl RtTuple {
    /// The per-variant constant tag
    pub fn tuple_type(&self) -> TupleType {
        match self {
            RtTuple::An(_) => TupleType::An,
            RtTuple::Ar(_) => TupleType::Ar,
            RtTuple::Di(_) => TupleType::Di,
            RtTuple::Dc(_) => TupleType::Dc,
            RtTuple::F(_) => TupleType::F,
            RtTuple::NtoN(_) => TupleType::NtoN,
            RtTuple::NtoR(_) => TupleType::NtoR,
            RtTuple::NtoC(_) => TupleType::NtoC,
            RtTuple::NtoDe(_) => TupleType::NtoDe,
            RtTuple::NtoLackR(_) => TupleType::NtoLackR,
        }
    }

    /// This tuple's own identifier
    pub fn rui(&self) -> Rui {
        match self {
            RtTuple::An(t) => t.rui,
            RtTuple::Ar(t) => t.rui,
            RtTuple::Di(t) => t.rui,
            RtTuple::Dc(t) => t.rui,
            RtTuple::F(t) => t.rui,
            RtTuple::NtoN(t) => t.rui,
            RtTuple::NtoR(t) => t.rui,
            RtTuple::NtoC(t) => t.rui,
            RtTuple::NtoDe(t) => t.rui,
            RtTuple::NtoLackR(t) => t.rui,
        }
    }

    /// Whether this is a DI/DC provenance tuple
    pub fn is_metadata(&self) -> bool {
        self.tuple_type().is_metadata()
    }
}
