use boostlink_serde::{ByteReader, ByteWriter, DecodeError, Serde};

use crate::{
    types::{EntityId, Version},
    world::value::Value,
};

/// A versioned, minimal description of one state change to one entity.
///
/// Two forms exist:
/// - a step: `target == base + 1`, carrying only the changed attributes;
/// - a snapshot: `base == 0`, carrying the complete attribute set at
///   `target` (used to answer reconciliation requests and to baseline a
///   replica that has never seen the entity).
///
/// Multi-step changes are always a sequence of step deltas; a version gap is
/// never encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Delta {
    pub entity: EntityId,
    pub base: Version,
    pub target: Version,
    pub changes: Vec<(String, Value)>,
}

impl Delta {
    /// Builds a step delta advancing `base` by exactly one version.
    pub fn step(entity: EntityId, base: Version, changes: Vec<(String, Value)>) -> Self {
        Self {
            entity,
            base,
            target: base + 1,
            changes,
        }
    }

    /// Builds a synthetic full-state delta.
    pub fn snapshot(entity: EntityId, target: Version, changes: Vec<(String, Value)>) -> Self {
        Self {
            entity,
            base: 0,
            target,
            changes,
        }
    }

    pub fn is_snapshot(&self) -> bool {
        self.base == 0
    }
}

impl Serde for Delta {
    fn ser(&self, writer: &mut ByteWriter) {
        self.entity.ser(writer);
        self.base.ser(writer);
        self.target.ser(writer);
        self.changes.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity: EntityId::de(reader)?,
            base: Version::de(reader)?,
            target: Version::de(reader)?,
            changes: Vec::<(String, Value)>::de(reader)?,
        })
    }
}
