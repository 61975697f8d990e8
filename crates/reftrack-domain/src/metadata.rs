//! Metadata taxonomy: the closed, numeric-coded enumerations recorded by
//! DI/DC provenance tuples, plus their presentation lookup tables.
//!
//! The numeric codes are stable and machine-facing; `label()` and
//! `description()` are the read-only tables consumed by presentation
//! layers. Every member has a non-empty entry in both.

use std::fmt;

/// The category of ledger event a metadata tuple records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TupleEventType {
    /// A tuple was inserted into the ledger
    Insert = 1,

    /// A tuple was marked as superseded
    Invalidate = 2,

    /// A previously invalidated tuple was restored
    Revalidate = 3,
}

impl TupleEventType {
    /// All members, in code order
    pub const ALL: [TupleEventType; 3] = [
        TupleEventType::Insert,
        TupleEventType::Invalidate,
        TupleEventType::Revalidate,
    ];

    /// The stable numeric code
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Resolve a numeric code back to a member
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.code() == code)
    }

    /// Short human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            TupleEventType::Insert => "Insert",
            TupleEventType::Invalidate => "Invalidate",
            TupleEventType::Revalidate => "Revalidate",
        }
    }

    /// Longer human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            TupleEventType::Insert => "A tuple was asserted and appended to the ledger.",
            TupleEventType::Invalidate => {
                "A tuple was marked as no longer current, superseded by the listed replacements."
            }
            TupleEventType::Revalidate => {
                "A tuple that had been invalidated was restored as current."
            }
        }
    }
}

impl fmt::Display for TupleEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Why a tuple was asserted, changed, or invalidated
///
/// Codes 4-6 are the three fundamental change categories; A1-A4 are
/// identifier-assignment errors, R01-R10 relation errors, P1-P3
/// portion-of-reality errors, and the `*M*` members record deliberate
/// modifications rather than corrections.
///
/// The numbering is contiguous, 4 through 29. The upstream data this
/// taxonomy was transcribed from showed PM2 as 39; that reading is
/// treated as a transcription slip and the contiguous code 29 is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum RtChangeReason {
    Belief = 4,
    Reality = 5,
    Relevance = 6,
    A1 = 7,
    A2 = 8,
    A3 = 9,
    A4 = 10,
    R01 = 11,
    R02 = 12,
    R03 = 13,
    R04 = 14,
    R05 = 15,
    R06 = 16,
    R07 = 17,
    R08 = 18,
    R09 = 19,
    R10 = 20,
    P1 = 21,
    P2 = 22,
    P3 = 23,
    AM1 = 24,
    AM2 = 25,
    RM1 = 26,
    RM2 = 27,
    PM1 = 28,
    PM2 = 29,
}

impl RtChangeReason {
    /// All members, in code order
    pub const ALL: [RtChangeReason; 26] = [
        RtChangeReason::Belief,
        RtChangeReason::Reality,
        RtChangeReason::Relevance,
        RtChangeReason::A1,
        RtChangeReason::A2,
        RtChangeReason::A3,
        RtChangeReason::A4,
        RtChangeReason::R01,
        RtChangeReason::R02,
        RtChangeReason::R03,
        RtChangeReason::R04,
        RtChangeReason::R05,
        RtChangeReason::R06,
        RtChangeReason::R07,
        RtChangeReason::R08,
        RtChangeReason::R09,
        RtChangeReason::R10,
        RtChangeReason::P1,
        RtChangeReason::P2,
        RtChangeReason::P3,
        RtChangeReason::AM1,
        RtChangeReason::AM2,
        RtChangeReason::RM1,
        RtChangeReason::RM2,
        RtChangeReason::PM1,
        RtChangeReason::PM2,
    ];

    /// The stable numeric code
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Resolve a numeric code back to a member
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.code() == code)
    }

    /// Short human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            RtChangeReason::Belief => "Change in belief",
            RtChangeReason::Reality => "Change in reality",
            RtChangeReason::Relevance => "Change in relevance",
            RtChangeReason::A1 => "A1: RUI assigned to wrong referent",
            RtChangeReason::A2 => "A2: duplicate RUI assignment",
            RtChangeReason::A3 => "A3: RUI assigned to nonexistent referent",
            RtChangeReason::A4 => "A4: wrong assignment status",
            RtChangeReason::R01 => "R01: wrong relation asserted",
            RtChangeReason::R02 => "R02: relation asserted in reverse",
            RtChangeReason::R03 => "R03: wrong first relatum",
            RtChangeReason::R04 => "R04: wrong second relatum",
            RtChangeReason::R05 => "R05: missing relatum",
            RtChangeReason::R06 => "R06: extraneous relatum",
            RtChangeReason::R07 => "R07: wrong temporal reference",
            RtChangeReason::R08 => "R08: wrong polarity",
            RtChangeReason::R09 => "R09: wrong concept code",
            RtChangeReason::R10 => "R10: wrong data value",
            RtChangeReason::P1 => "P1: PoR wrongly taken as singular",
            RtChangeReason::P2 => "P2: PoR wrongly taken as repeatable",
            RtChangeReason::P3 => "P3: PoR never existed",
            RtChangeReason::AM1 => "AM1: reserved RUI put into use",
            RtChangeReason::AM2 => "AM2: assignment uniqueness revised",
            RtChangeReason::RM1 => "RM1: relation period extended",
            RtChangeReason::RM2 => "RM2: relation participants revised",
            RtChangeReason::PM1 => "PM1: PoR merged",
            RtChangeReason::PM2 => "PM2: PoR split",
        }
    }

    /// Longer human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            RtChangeReason::Belief => {
                "The author's beliefs about the portion of reality changed; the world itself did not."
            }
            RtChangeReason::Reality => {
                "The portion of reality itself changed, requiring the ledger to follow."
            }
            RtChangeReason::Relevance => {
                "The assertion became relevant or irrelevant to the purpose of the ledger."
            }
            RtChangeReason::A1 => {
                "An identifier was assigned to a different portion of reality than the one intended."
            }
            RtChangeReason::A2 => {
                "An identifier was assigned to a referent that already carried an identifier."
            }
            RtChangeReason::A3 => {
                "An identifier was assigned to a portion of reality that turned out not to exist."
            }
            RtChangeReason::A4 => {
                "An identifier was recorded as assigned while merely reserved, or the reverse."
            }
            RtChangeReason::R01 => {
                "The asserted relation does not hold between the named referents; a different relation does."
            }
            RtChangeReason::R02 => {
                "The relation holds, but in the opposite direction to the one asserted."
            }
            RtChangeReason::R03 => {
                "The first participant of the relation was misidentified."
            }
            RtChangeReason::R04 => {
                "The second participant of the relation was misidentified."
            }
            RtChangeReason::R05 => {
                "A participant required for the relation to hold was omitted from the assertion."
            }
            RtChangeReason::R06 => {
                "A referent that does not participate in the relation was included in the assertion."
            }
            RtChangeReason::R07 => {
                "The temporal reference attached to the relation does not cover the time it actually held."
            }
            RtChangeReason::R08 => {
                "The assertion was recorded with the wrong polarity: affirmed where negated, or the reverse."
            }
            RtChangeReason::R09 => {
                "The concept code annotating the referent was drawn from the wrong entry of its concept system."
            }
            RtChangeReason::R10 => {
                "The literal data payload attached to the referent was incorrect."
            }
            RtChangeReason::P1 => {
                "A repeatable portion of reality was mischaracterized as a singular one."
            }
            RtChangeReason::P2 => {
                "A singular portion of reality was mischaracterized as a repeatable one."
            }
            RtChangeReason::P3 => {
                "The portion of reality the assertion concerned never existed."
            }
            RtChangeReason::AM1 => {
                "A reserved identifier was deliberately put into use for a referent."
            }
            RtChangeReason::AM2 => {
                "The singular/repeatable characterization of an assignment was deliberately revised."
            }
            RtChangeReason::RM1 => {
                "The period over which a relation holds was deliberately extended or shortened."
            }
            RtChangeReason::RM2 => {
                "The participant list of a relation was deliberately revised."
            }
            RtChangeReason::PM1 => {
                "Two portions of reality were recognized as one and their records merged."
            }
            RtChangeReason::PM2 => {
                "One portion of reality was recognized as two and its records split."
            }
        }
    }
}

impl fmt::Display for RtChangeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
