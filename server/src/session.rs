use std::collections::{HashMap, HashSet};

use boostlink_shared::{EntityId, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

/// One player's server-side session: connection status and the set of
/// entities currently in scope for them.
///
/// Created on join, destroyed on leave. A disconnected session sticks around
/// until leave so a quick reconnect keeps its scope.
pub struct PlayerSession {
    player: PlayerId,
    pub status: ConnectionStatus,
    visible: HashSet<EntityId>,
    pub hud_enabled: bool,
}

impl PlayerSession {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            status: ConnectionStatus::Connected,
            visible: HashSet::new(),
            hud_enabled: true,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    pub fn sees(&self, entity: EntityId) -> bool {
        self.visible.contains(&entity)
    }

    pub fn reveal(&mut self, entity: EntityId) -> bool {
        self.visible.insert(entity)
    }

    pub fn conceal(&mut self, entity: EntityId) -> bool {
        self.visible.remove(&entity)
    }

    pub fn visible(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.visible.iter().copied()
    }
}

/// All live sessions, keyed by player.
#[derive(Default)]
pub struct SessionMap {
    map: HashMap<PlayerId, PlayerSession>,
}

impl SessionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, player: PlayerId) -> &mut PlayerSession {
        self.map
            .entry(player)
            .or_insert_with(|| PlayerSession::new(player))
    }

    pub fn remove(&mut self, player: PlayerId) -> Option<PlayerSession> {
        self.map.remove(&player)
    }

    pub fn get(&self, player: PlayerId) -> Option<&PlayerSession> {
        self.map.get(&player)
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut PlayerSession> {
        self.map.get_mut(&player)
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.map.contains_key(&player)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerSession> {
        self.map.values()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
