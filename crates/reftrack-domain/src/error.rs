//! Typed construction errors returned at the factory boundary.

use thiserror::Error;

use crate::registry::Field;
use crate::tuple::TupleType;

/// Errors that can occur while constructing or projecting tuples
///
/// All construction failures are returned as values; no tuple, concrete
/// or metadata, exists after a failed call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructError {
    /// A tag not present in the tuple type registry
    #[error("unknown tuple type: {tag}")]
    UnknownTupleType {
        /// The unrecognized wire name
        tag: String,
    },

    /// Attempt to build a DI/DC tuple through the general entry point
    ///
    /// Metadata tuples only exist in tandem with the tuple they describe.
    #[error("metadata tuples cannot be created directly: {tuple_type}")]
    DirectMetadataConstruction {
        /// The metadata tag that was requested
        tuple_type: TupleType,
    },

    /// Missing required field, wrong semantic type, or out-of-range value
    #[error("construction failed: invalid fields for type {tuple_type}: {field}: {problem}")]
    InvalidFields {
        /// The variant being constructed
        tuple_type: TupleType,
        /// The offending field
        field: Field,
        /// What was wrong with it
        problem: String,
    },

    /// A field value a serializer cannot classify
    ///
    /// Unreachable for valid tuple instances; surfaces only for values no
    /// wire format can carry, such as a non-finite float.
    #[error("attribute projection failed on field {field}")]
    ProjectionFailure {
        /// The unclassifiable field
        field: Field,
    },
}
