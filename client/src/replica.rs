use std::collections::HashMap;

use boostlink_shared::{Delta, EntityId, EntityState, Version, VersionConflict};

/// The client's cached copy of the synchronized world.
///
/// Never authoritative: it only ever changes by applying deltas the server
/// produced. An entity first seen through a delta starts as a fresh version-0
/// state, so a `base == 0` step or any snapshot baselines it cleanly.
#[derive(Default)]
pub struct ReplicaWorld {
    entities: HashMap<EntityId, EntityState>,
}

impl ReplicaWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity(&self, id: EntityId) -> Option<&EntityState> {
        self.entities.get(&id)
    }

    pub fn version_of(&self, id: EntityId) -> Version {
        self.entities
            .get(&id)
            .map(|state| state.version())
            .unwrap_or(0)
    }

    pub fn known_entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Applies a delta if its versions line up, returning the new version.
    /// Conflicts leave the replica untouched.
    ///
    /// A snapshot of an entity the replica has never seen baselines it
    /// directly, whatever its target version — including version 0, which is
    /// what a freshly spawned, never-mutated entity snapshots as.
    pub fn apply(&mut self, delta: &Delta) -> Result<Version, VersionConflict> {
        if let Some(state) = self.entities.get_mut(&delta.entity) {
            state.try_apply(delta)?;
            return Ok(state.version());
        }
        if delta.is_snapshot() {
            let state = EntityState::from_snapshot(delta);
            let version = state.version();
            self.entities.insert(delta.entity, state);
            return Ok(version);
        }
        let mut state = EntityState::new(delta.entity);
        state.try_apply(delta)?;
        let version = state.version();
        self.entities.insert(delta.entity, state);
        Ok(version)
    }

    pub fn forget(&mut self, id: EntityId) -> bool {
        self.entities.remove(&id).is_some()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}
