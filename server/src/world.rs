use std::collections::HashMap;

use boostlink_shared::{Delta, EntityId, EntityState, MutateError, PlayerId, Schema, Value};

struct HostEntity {
    state: EntityState,
    owner: Option<PlayerId>,
}

/// The canonical, server-owned entity store. Every client-side copy is a
/// cache; only mutations made here are authoritative.
///
/// No internal locking: the host guarantees serialized tick execution, so the
/// world is never called concurrently with itself.
pub struct HostWorld {
    schema: Schema,
    entities: HashMap<EntityId, HostEntity>,
    next_id: u64,
}

impl HostWorld {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            entities: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn entity(&self, id: EntityId) -> Option<&EntityState> {
        self.entities.get(&id).map(|entry| &entry.state)
    }

    pub fn owner(&self, id: EntityId) -> Option<PlayerId> {
        self.entities.get(&id).and_then(|entry| entry.owner)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Creates an entity, optionally owned by a player session. Initial
    /// attributes are validated against the schema and seeded at version 0,
    /// so the first mutation produces a `base == 0` delta.
    pub fn spawn(
        &mut self,
        owner: Option<PlayerId>,
        initial: Vec<(String, Value)>,
    ) -> Result<EntityId, MutateError> {
        for (attribute, value) in &initial {
            self.schema.check(attribute, value)?;
        }

        let id = EntityId(self.next_id);
        self.next_id += 1;

        let mut state = EntityState::new(id);
        state.seed(&initial);
        self.entities.insert(id, HostEntity { state, owner });
        Ok(id)
    }

    pub fn despawn(&mut self, id: EntityId) -> bool {
        self.entities.remove(&id).is_some()
    }

    /// Validates and applies a mutation, returning the delta to broadcast.
    ///
    /// Validation is all-or-nothing: if any change fails the schema check,
    /// nothing is applied and the version counter does not move.
    pub fn mutate(
        &mut self,
        id: EntityId,
        changes: Vec<(String, Value)>,
    ) -> Result<Delta, MutateError> {
        if changes.is_empty() {
            return Err(MutateError::EmptyMutation { entity: id });
        }
        for (attribute, value) in &changes {
            self.schema.check(attribute, value)?;
        }
        let entry = self
            .entities
            .get_mut(&id)
            .ok_or(MutateError::UnknownEntity { entity: id })?;

        let base = entry.state.version();
        entry.state.commit(&changes);
        Ok(Delta::step(id, base, changes))
    }

    /// Captures the complete current state of an entity as a synthetic
    /// `base == 0` delta, used to answer reconciliation requests.
    pub fn snapshot(&self, id: EntityId) -> Option<Delta> {
        self.entities.get(&id).map(|entry| entry.state.to_snapshot())
    }

    /// Despawns every entity owned solely by the given player session.
    /// Called when the session is destroyed.
    pub fn release_owned_by(&mut self, player: PlayerId) -> Vec<EntityId> {
        let released: Vec<EntityId> = self
            .entities
            .iter()
            .filter(|(_, entry)| entry.owner == Some(player))
            .map(|(id, _)| *id)
            .collect();
        for id in &released {
            self.entities.remove(id);
        }
        released
    }
}
