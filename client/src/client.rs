use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use log::{error, info};

use boostlink_shared::{
    ChannelRegistry, Delta, Direction, EntityId, EntityState, EventBus, HostType, HudToggle,
    MessageKind, Protocol, SenderContext, Serde, Tick,
};

use crate::core::ClientCore;

/// Buffer between the transport's receive thread and the client tick.
#[derive(Clone, Default)]
pub struct ClientInbound {
    queue: Arc<Mutex<VecDeque<Vec<u8>>>>,
}

impl ClientInbound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, bytes: Vec<u8>) {
        match self.queue.lock() {
            Ok(mut queue) => queue.push_back(bytes),
            Err(_) => error!("Client inbound buffer lock poisoned; dropping message"),
        }
    }

    fn drain(&self) -> Vec<Vec<u8>> {
        match self.queue.lock() {
            Ok(mut queue) => queue.drain(..).collect(),
            Err(_) => {
                error!("Client inbound buffer lock poisoned; dropping pending messages");
                Vec::new()
            }
        }
    }
}

/// The replica end of the synchronization layer.
///
/// Holds the cached world, applies server deltas idempotently and falls back
/// to snapshot reconciliation when the delta stream gets away from it. All
/// application happens on the client tick; the transport only feeds the
/// inbound buffer.
pub struct SyncClient {
    core: ClientCore,
    registry: ChannelRegistry<ClientCore>,
    inbound: ClientInbound,
    tick: Tick,
}

impl SyncClient {
    pub fn new(mut protocol: Protocol) -> Self {
        let mut registry = ChannelRegistry::new(HostType::Client);
        registry
            .register(
                MessageKind::EntityDelta,
                Direction::ServerToClient,
                Box::new(|core: &mut ClientCore, reader, _ctx| {
                    let delta = Delta::de(reader)?;
                    core.apply_delta(&delta);
                    Ok(())
                }),
            )
            .expect("message kinds are registered exactly once at startup");
        registry
            .register(
                MessageKind::HudToggle,
                Direction::ServerToClient,
                Box::new(|core: &mut ClientCore, reader, _ctx| {
                    let toggle = HudToggle::de(reader)?;
                    info!("HUD toggled {}", if toggle.enabled { "on" } else { "off" });
                    core.hud_enabled = toggle.enabled;
                    Ok(())
                }),
            )
            .expect("message kinds are registered exactly once at startup");
        registry.lock();

        let snapshot_retry_threshold = protocol.snapshot_retry_threshold;
        protocol.lock();

        Self {
            core: ClientCore::new(snapshot_retry_threshold),
            registry,
            inbound: ClientInbound::new(),
            tick: 0,
        }
    }

    /// One client tick: drain and dispatch everything the transport buffered.
    pub fn on_tick(&mut self) {
        self.tick += 1;
        let ctx = SenderContext::from_server();
        for bytes in self.inbound.drain() {
            self.registry.dispatch(&bytes, &ctx, &mut self.core);
        }
    }

    /// After a reconnect the replica's versions cannot be trusted; request a
    /// fresh snapshot of everything it knows about.
    pub fn on_reconnect(&mut self) {
        info!("Reconnected; requesting snapshots for all known entities");
        let known: Vec<EntityId> = self.core.replica.known_entities().collect();
        for entity in known {
            self.core.request_snapshot(entity);
        }
    }

    /// Explicit reconciliation request, e.g. when host code learns about an
    /// entity id through a side channel before any delta arrived.
    pub fn request_snapshot(&mut self, entity: EntityId) {
        self.core.request_snapshot(entity);
    }

    // Transport surface

    pub fn inbound_buffer(&self) -> ClientInbound {
        self.inbound.clone()
    }

    pub fn receive(&mut self, bytes: Vec<u8>) {
        self.inbound.push(bytes);
    }

    pub fn outgoing(&mut self) -> Vec<Vec<u8>> {
        self.core.outgoing()
    }

    pub fn pending_outgoing(&self) -> usize {
        self.core.pending_outgoing()
    }

    // Replica access

    pub fn entity(&self, entity: EntityId) -> Option<&EntityState> {
        self.core.replica.entity(entity)
    }

    pub fn hud_enabled(&self) -> bool {
        self.core.hud_enabled
    }

    pub fn events(&mut self) -> &mut EventBus {
        &mut self.core.bus
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }
}
