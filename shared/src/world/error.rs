use thiserror::Error;

use crate::{
    types::{EntityId, Version},
    world::value::ValueKind,
};

/// Errors that can occur when validating a mutation against the schema.
///
/// These surface to the caller (command feedback, API result) — the mutation
/// is rejected and authoritative state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutateError {
    /// The entity id is not present in the authoritative store
    #[error("Entity {entity} does not exist")]
    UnknownEntity { entity: EntityId },

    /// The attribute name is not declared in the schema
    #[error("Attribute '{attribute}' is not declared in the schema")]
    UnknownAttribute { attribute: String },

    /// The value's type does not match the schema declaration
    #[error("Attribute '{attribute}' expects {expected}, got {actual}")]
    WrongValueKind {
        attribute: String,
        expected: ValueKind,
        actual: ValueKind,
    },

    /// A mutation carried no attribute changes
    #[error("Mutation of entity {entity} carried no changes")]
    EmptyMutation { entity: EntityId },
}

/// A delta whose base version does not line up with the replica's current
/// version. Expected under retransmission and reordering: callers discard the
/// delta and log at debug, they never treat this as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Delta base {base} does not match version {current} of entity {entity}")]
pub struct VersionConflict {
    pub entity: EntityId,
    pub base: Version,
    pub current: Version,
}
