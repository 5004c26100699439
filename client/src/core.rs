use std::collections::{HashMap, HashSet, VecDeque};

use log::debug;

use boostlink_shared::{
    encode_envelope, Delta, EntityId, Event, EventBus, MessageKind, SnapshotRequest,
};

use crate::replica::ReplicaWorld;

/// The mutable client state message handlers operate on: the replica, the
/// local event bus, the outbound queue and the reconciliation bookkeeping.
pub struct ClientCore {
    pub replica: ReplicaWorld,
    pub bus: EventBus,
    outbound: VecDeque<Vec<u8>>,
    pub hud_enabled: bool,
    snapshot_retry_threshold: u32,
    behind_counts: HashMap<EntityId, u32>,
    awaiting_snapshot: HashSet<EntityId>,
}

impl ClientCore {
    pub fn new(snapshot_retry_threshold: u32) -> Self {
        Self {
            replica: ReplicaWorld::new(),
            bus: EventBus::new(),
            outbound: VecDeque::new(),
            hud_enabled: true,
            snapshot_retry_threshold,
            behind_counts: HashMap::new(),
            awaiting_snapshot: HashSet::new(),
        }
    }

    /// Applies an inbound delta to the replica.
    ///
    /// - On success: bookkeeping resets and `StateChanged` is published.
    /// - A stale duplicate (target at or behind the replica) is the expected
    ///   face of retransmission: a silent no-op.
    /// - A delta from ahead of the replica means steps were lost; after
    ///   `snapshot_retry_threshold` of those in a row the client stops
    ///   waiting for the stream to realign and requests a full snapshot.
    pub fn apply_delta(&mut self, delta: &Delta) {
        let entity = delta.entity;
        // any snapshot settles the in-flight request, even one that turns
        // out to be a no-op because the replica was already current —
        // otherwise the dedup flag would suppress every future request
        if delta.is_snapshot() {
            self.awaiting_snapshot.remove(&entity);
        }
        match self.replica.apply(delta) {
            Ok(version) => {
                self.behind_counts.remove(&entity);
                self.awaiting_snapshot.remove(&entity);
                self.bus.publish(Event::StateChanged { entity, version });
            }
            Err(conflict) => {
                if delta.target <= conflict.current {
                    debug!("Ignoring retransmitted delta for {entity}: {conflict}");
                    return;
                }
                debug!("Replica of {entity} is behind: {conflict}");
                let behind = self.behind_counts.entry(entity).or_insert(0);
                *behind += 1;
                if *behind >= self.snapshot_retry_threshold {
                    self.behind_counts.remove(&entity);
                    self.request_snapshot(entity);
                }
            }
        }
    }

    /// Queues a snapshot request unless one is already in flight.
    pub fn request_snapshot(&mut self, entity: EntityId) {
        if !self.awaiting_snapshot.insert(entity) {
            return;
        }
        let request = SnapshotRequest {
            entity,
            last_known: self.replica.version_of(entity),
        };
        let raw = encode_envelope(MessageKind::SnapshotRequest, &request);
        self.outbound.push_back(raw);
    }

    pub fn outgoing(&mut self) -> Vec<Vec<u8>> {
        self.outbound.drain(..).collect()
    }

    pub fn pending_outgoing(&self) -> usize {
        self.outbound.len()
    }
}
