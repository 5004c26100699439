use log::{debug, info};

use boostlink_shared::{
    ChannelRegistry, Delta, Direction, EntityId, EntityState, Event, EventBus, HostType,
    MessageKind, MutateError, PlayerId, Protocol, SenderContext, Serde, SnapshotRequest, Tick,
    Value,
};

use crate::{
    command::{
        dispatcher::{CommandDispatcher, CommandInvocation, CommandSpec},
        error::{CommandError, CommandSetupError},
    },
    core::ServerCore,
    inbound::InboundBuffer,
    session::ConnectionStatus,
};

/// The authoritative end of the synchronization layer.
///
/// Owns the canonical world, the live sessions, the channel registry and the
/// command dispatcher. The host drives it through three lifecycle entry
/// points (`on_server_starting`, `on_tick`, `on_server_stopping`) and two
/// transport surfaces (`receive`, `outgoing_for`). Everything runs on the
/// host's tick thread; the only cross-thread piece is the inbound buffer.
pub struct SyncServer {
    core: ServerCore,
    registry: ChannelRegistry<ServerCore>,
    commands: CommandDispatcher,
    inbound: InboundBuffer,
    hud_push_interval: Tick,
    tick: Tick,
    running: bool,
}

impl SyncServer {
    pub fn new(mut protocol: Protocol) -> Self {
        let mut registry = ChannelRegistry::new(HostType::Server);
        registry
            .register(
                MessageKind::SnapshotRequest,
                Direction::ClientToServer,
                Box::new(|core: &mut ServerCore, reader, ctx: &SenderContext| {
                    let request = SnapshotRequest::de(reader)?;
                    let Some(player) = ctx.player else {
                        debug!("Snapshot request without a sending player; dropped");
                        return Ok(());
                    };
                    debug!(
                        "{player} requested snapshot of {} (knows version {})",
                        request.entity, request.last_known
                    );
                    core.send_snapshot(player, request.entity);
                    Ok(())
                }),
            )
            .expect("message kinds are registered exactly once at startup");

        let schema = protocol.schema.clone();
        let hud_push_interval = protocol.hud_push_interval;
        protocol.lock();

        Self {
            core: ServerCore::new(schema),
            registry,
            commands: CommandDispatcher::new(),
            inbound: InboundBuffer::new(),
            hud_push_interval,
            tick: 0,
            running: false,
        }
    }

    // Lifecycle, driven by the host's hooks

    pub fn on_server_starting(&mut self) {
        self.registry.lock();
        self.running = true;
        info!("Sync server starting");
        self.core.bus.publish(Event::ServerStarting);
    }

    pub fn on_server_stopping(&mut self) {
        info!("Sync server stopping");
        self.core.bus.publish(Event::ServerStopping);
        self.core.clear_all_queues();
        self.core.sessions.clear();
        self.running = false;
    }

    /// One simulation step. Inbound messages queued by the transport are
    /// drained first so network-triggered mutations and tick-local mutations
    /// share a single ordering.
    pub fn on_tick(&mut self) {
        if !self.running {
            return;
        }
        self.tick += 1;

        for (player, bytes) in self.inbound.drain() {
            let ctx = SenderContext::from_player(player);
            self.registry.dispatch(&bytes, &ctx, &mut self.core);
        }

        self.core.bus.publish(Event::Tick(self.tick));

        if self.hud_push_interval > 0 && self.tick % self.hud_push_interval == 0 {
            self.push_hud_snapshots();
        }
    }

    /// The periodic keep-fresh push: every interval, each connected player
    /// with the HUD enabled gets a snapshot of every entity in their scope.
    fn push_hud_snapshots(&mut self) {
        let targets: Vec<(PlayerId, Vec<EntityId>)> = self
            .core
            .sessions
            .iter()
            .filter(|session| session.is_connected() && session.hud_enabled)
            .map(|session| (session.player(), session.visible().collect()))
            .collect();
        for (player, entities) in targets {
            for entity in entities {
                self.core.send_snapshot(player, entity);
            }
        }
    }

    // Session lifecycle

    pub fn player_join(&mut self, player: PlayerId) {
        info!("{player} joined");
        self.core.sessions.insert(player);
        self.core.bus.publish(Event::PlayerJoined(player));
    }

    /// Destroys the session: pending messages are cancelled and entities
    /// owned solely by this player are released.
    pub fn player_leave(&mut self, player: PlayerId) {
        info!("{player} left");
        self.core.clear_queue(player);
        self.core.sessions.remove(player);
        for entity in self.core.world.release_owned_by(player) {
            debug!("Released {entity} owned by departing {player}");
        }
        self.core.bus.publish(Event::PlayerLeft(player));
    }

    /// Connection dropped but the session survives (the player may return).
    /// Pending deltas addressed to this player have no recipient and are
    /// cancelled; other sessions' queues are unaffected.
    pub fn disconnect(&mut self, player: PlayerId) {
        if let Some(session) = self.core.sessions.get_mut(player) {
            session.status = ConnectionStatus::Disconnected;
        }
        self.core.clear_queue(player);
    }

    pub fn reconnect(&mut self, player: PlayerId) {
        if let Some(session) = self.core.sessions.get_mut(player) {
            session.status = ConnectionStatus::Connected;
        }
    }

    // Scope control

    /// Puts an entity in a player's scope and immediately baselines their
    /// replica with a snapshot. A nonexistent entity never enters the scope
    /// set, so the periodic HUD push will not keep probing it.
    pub fn reveal(&mut self, player: PlayerId, entity: EntityId) -> bool {
        if self.core.world.entity(entity).is_none() {
            debug!("Not revealing {entity} to {player}: it does not exist");
            return false;
        }
        let Some(session) = self.core.sessions.get_mut(player) else {
            return false;
        };
        if !session.reveal(entity) {
            return false;
        }
        self.core.send_snapshot(player, entity)
    }

    pub fn conceal(&mut self, player: PlayerId, entity: EntityId) -> bool {
        self.core
            .sessions
            .get_mut(player)
            .map(|session| session.conceal(entity))
            .unwrap_or(false)
    }

    // Authoritative state

    pub fn spawn(
        &mut self,
        owner: Option<PlayerId>,
        initial: Vec<(String, Value)>,
    ) -> Result<EntityId, MutateError> {
        self.core.world.spawn(owner, initial)
    }

    pub fn despawn(&mut self, entity: EntityId) -> bool {
        self.core.world.despawn(entity)
    }

    pub fn mutate(
        &mut self,
        entity: EntityId,
        changes: Vec<(String, Value)>,
    ) -> Result<Delta, MutateError> {
        self.core.mutate_and_broadcast(entity, changes)
    }

    pub fn entity(&self, entity: EntityId) -> Option<&EntityState> {
        self.core.world.entity(entity)
    }

    pub fn set_hud(&mut self, player: PlayerId, enabled: bool) {
        self.core.set_hud(player, enabled);
    }

    // Commands

    pub fn register_command(&mut self, spec: CommandSpec) -> Result<(), CommandSetupError> {
        self.commands.register(spec)
    }

    pub fn dispatch_command(
        &mut self,
        invocation: &CommandInvocation,
    ) -> Result<String, CommandError> {
        self.commands.dispatch(invocation, &mut self.core)
    }

    // Transport surface

    /// Hands a copy of the inbound buffer to transport code; it may be pushed
    /// to from any thread.
    pub fn inbound_buffer(&self) -> InboundBuffer {
        self.inbound.clone()
    }

    /// Delivers raw bytes received from a player. Decoding and dispatch are
    /// deferred to the next tick.
    pub fn receive(&mut self, player: PlayerId, bytes: Vec<u8>) {
        self.inbound.push(player, bytes);
    }

    /// Drains the envelopes queued for one player; the transport sends them.
    pub fn outgoing_for(&mut self, player: PlayerId) -> Vec<Vec<u8>> {
        self.core.outgoing_for(player)
    }

    pub fn pending_for(&self, player: PlayerId) -> usize {
        self.core.pending_for(player)
    }

    /// The event bus, for host glue and listeners.
    pub fn events(&mut self) -> &mut EventBus {
        &mut self.core.bus
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }
}
