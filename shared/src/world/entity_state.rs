use std::collections::BTreeMap;

use crate::{
    types::{EntityId, Version},
    world::{delta::Delta, error::VersionConflict, value::Value},
};

/// The synchronized state of one entity: a stable id, a monotonically
/// increasing version counter and an ordered attribute map.
///
/// The ordered map keeps snapshot encoding deterministic: the same logical
/// state always walks its attributes in the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityState {
    id: EntityId,
    version: Version,
    attributes: BTreeMap<String, Value>,
}

impl EntityState {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            version: 0,
            attributes: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.attributes.iter()
    }

    /// Sets initial attributes without moving the version counter. Used when
    /// spawning: an entity starts at version 0, so its first mutation
    /// produces a `base == 0` delta.
    pub fn seed(&mut self, initial: &[(String, Value)]) {
        for (attribute, value) in initial {
            self.attributes.insert(attribute.clone(), value.clone());
        }
    }

    /// Builds a replica state directly from a snapshot delta, for entities
    /// the replica has never seen. The caller has already checked
    /// `delta.is_snapshot()`.
    pub fn from_snapshot(delta: &Delta) -> Self {
        let mut state = Self::new(delta.entity);
        state.seed(&delta.changes);
        state.version = delta.target;
        state
    }

    /// Applies validated changes directly and bumps the version. Only the
    /// authoritative side calls this; replicas go through [`try_apply`].
    ///
    /// [`try_apply`]: EntityState::try_apply
    pub fn commit(&mut self, changes: &[(String, Value)]) -> Version {
        for (attribute, value) in changes {
            self.attributes.insert(attribute.clone(), value.clone());
        }
        self.version += 1;
        self.version
    }

    /// Applies an inbound delta if and only if its versions line up:
    ///
    /// - a delta continuing exactly where this state is (`base == version`,
    ///   `target == version + 1`) applies as a merge of its changes;
    /// - a snapshot from further ahead (`base == 0`, `target > version + 1`)
    ///   replaces the attribute set wholesale.
    ///
    /// A snapshot whose target is `version + 1` takes the first branch, which
    /// is equivalent: snapshots carry the complete attribute set and
    /// attributes are never removed, so merging one is the same as replacing.
    ///
    /// Anything else is a [`VersionConflict`]: duplicates and stale
    /// retransmissions land here and the state is left untouched, which makes
    /// application idempotent.
    pub fn try_apply(&mut self, delta: &Delta) -> Result<(), VersionConflict> {
        if delta.base == self.version && delta.target == self.version + 1 {
            for (attribute, value) in &delta.changes {
                self.attributes.insert(attribute.clone(), value.clone());
            }
            self.version = delta.target;
            return Ok(());
        }

        if delta.is_snapshot() && delta.target > self.version {
            self.attributes.clear();
            for (attribute, value) in &delta.changes {
                self.attributes.insert(attribute.clone(), value.clone());
            }
            self.version = delta.target;
            return Ok(());
        }

        Err(VersionConflict {
            entity: self.id,
            base: delta.base,
            current: self.version,
        })
    }

    /// Captures the complete current state as a synthetic delta.
    pub fn to_snapshot(&self) -> Delta {
        let changes = self
            .attributes
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Delta::snapshot(self.id, self.version, changes)
    }
}
