//! Reftrack Domain Layer
//!
//! This crate is the core of a referent-tracking assertion ledger: an
//! append-only model of typed, immutable tuples encoding facts about
//! identified portions of reality, each paired with the provenance
//! record required to audit it.
//!
//! ## Key Concepts
//!
//! - **Rui**: a UUIDv7-based identifier naming a referent, author, tuple,
//!   or concept system
//! - **Tuple**: an immutable assertion record of one of ten fixed shapes
//! - **Metadata tuple**: a DI/DC record capturing who asserted what, when,
//!   and why; never exists on its own
//! - **Factory**: validates a field set and constructs the concrete tuple
//!   together with its metadata companion, atomically
//! - **Attribute projection**: flattens any tuple into a generic field
//!   mapping, the single contact point for serializers
//!
//! ## Architecture
//!
//! The ten tuple shapes form one closed tagged union; the registry owns
//! the per-variant field contracts and the only constructor dispatch.
//! Construction is a pure, synchronous transformation: a call either
//! returns a validated [`factory::TuplePair`] or a [`ConstructError`],
//! never partial state. Persistence, formatting, and CLI concerns live
//! in other crates and reach the model only through the factory and the
//! projection.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod factory;
pub mod metadata;
pub mod projection;
pub mod registry;
pub mod rui;
pub mod tuple;

// Re-exports for convenience
pub use error::ConstructError;
pub use factory::{construct, create, Provenance, TupleFields, TuplePair};
pub use metadata::{RtChangeReason, TupleEventType};
pub use registry::{AttrValue, Field, FieldKind, FieldMap};
pub use rui::{Relationship, Rui, TempRef};
pub use tuple::{PorType, RtTuple, RuiStatus, TupleType};
