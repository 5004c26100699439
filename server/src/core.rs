use std::collections::{HashMap, VecDeque};

use log::debug;

use boostlink_shared::{
    encode_envelope, Delta, EntityId, Event, EventBus, HudToggle, MessageKind, MutateError,
    PlayerId, Schema, Value,
};

use crate::{session::SessionMap, world::HostWorld};

/// The mutable server state message handlers and command executors operate
/// on: the authoritative world, the sessions, the per-player outbound queues
/// and the event bus.
///
/// Kept separate from [`SyncServer`](crate::SyncServer) so the channel
/// registry can dispatch into it without borrowing itself.
pub struct ServerCore {
    pub world: HostWorld,
    pub sessions: SessionMap,
    pub bus: EventBus,
    outbound: HashMap<PlayerId, VecDeque<Vec<u8>>>,
}

impl ServerCore {
    pub fn new(schema: Schema) -> Self {
        Self {
            world: HostWorld::new(schema),
            sessions: SessionMap::new(),
            bus: EventBus::new(),
            outbound: HashMap::new(),
        }
    }

    /// Queues an already-encoded envelope for one player, if their session is
    /// live. Sending never blocks; the transport drains the queue.
    pub fn queue_to(&mut self, player: PlayerId, bytes: Vec<u8>) {
        let connected = self
            .sessions
            .get(player)
            .map(|session| session.is_connected())
            .unwrap_or(false);
        if !connected {
            debug!("Not queueing message for {player}: no connected session");
            return;
        }
        self.outbound.entry(player).or_default().push_back(bytes);
    }

    /// Applies a validated mutation to the authoritative world, queues the
    /// resulting delta for every connected player who can see the entity, and
    /// publishes `StateChanged` locally.
    pub fn mutate_and_broadcast(
        &mut self,
        entity: EntityId,
        changes: Vec<(String, Value)>,
    ) -> Result<Delta, MutateError> {
        let delta = self.world.mutate(entity, changes)?;
        self.broadcast_delta(&delta);
        self.bus.publish(Event::StateChanged {
            entity,
            version: delta.target,
        });
        Ok(delta)
    }

    fn broadcast_delta(&mut self, delta: &Delta) {
        let raw = encode_envelope(MessageKind::EntityDelta, delta);
        let recipients: Vec<PlayerId> = self
            .sessions
            .iter()
            .filter(|session| session.is_connected() && session.sees(delta.entity))
            .map(|session| session.player())
            .collect();
        for player in recipients {
            self.outbound
                .entry(player)
                .or_default()
                .push_back(raw.clone());
        }
    }

    /// Answers a reconciliation request (or baselines a newly revealed
    /// entity) with a full snapshot. Returns false if the entity is gone.
    pub fn send_snapshot(&mut self, player: PlayerId, entity: EntityId) -> bool {
        let Some(snapshot) = self.world.snapshot(entity) else {
            debug!("Snapshot of {entity} requested by {player}, but it does not exist");
            return false;
        };
        let raw = encode_envelope(MessageKind::EntityDelta, &snapshot);
        self.queue_to(player, raw);
        true
    }

    /// Flips the player's HUD flag server-side and tells their client.
    pub fn set_hud(&mut self, player: PlayerId, enabled: bool) {
        if let Some(session) = self.sessions.get_mut(player) {
            session.hud_enabled = enabled;
        }
        let raw = encode_envelope(MessageKind::HudToggle, &HudToggle { enabled });
        self.queue_to(player, raw);
    }

    /// Drains everything queued for one player, in queue order.
    pub fn outgoing_for(&mut self, player: PlayerId) -> Vec<Vec<u8>> {
        match self.outbound.get_mut(&player) {
            Some(queue) => queue.drain(..).collect(),
            None => Vec::new(),
        }
    }

    pub fn pending_for(&self, player: PlayerId) -> usize {
        self.outbound
            .get(&player)
            .map(|queue| queue.len())
            .unwrap_or(0)
    }

    /// Cancels every pending message addressed to this player. Other
    /// players' queues are untouched.
    pub fn clear_queue(&mut self, player: PlayerId) {
        if let Some(queue) = self.outbound.get_mut(&player) {
            queue.clear();
        }
    }

    pub fn clear_all_queues(&mut self) {
        self.outbound.clear();
    }
}
