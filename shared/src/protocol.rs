use crate::{types::Tick, world::schema::Schema};

/// Configuration collected during mod initialization and then locked before
/// the server or client starts running.
///
/// The schema is the integrating mod's attribute contract; the tunables cover
/// the periodic HUD push and the replica's snapshot fallback.
pub struct Protocol {
    pub schema: Schema,
    /// How many ticks between HUD snapshot pushes to each player.
    pub hud_push_interval: Tick,
    /// How many consecutive version conflicts a replica tolerates on one
    /// entity before it gives up on the delta stream and requests a snapshot.
    pub snapshot_retry_threshold: u32,
    locked: bool,
}

impl Default for Protocol {
    fn default() -> Self {
        Self {
            schema: Schema::new(),
            hud_push_interval: 40,
            snapshot_retry_threshold: 3,
            locked: false,
        }
    }
}

impl Protocol {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn schema(mut self, schema: Schema) -> Self {
        self.check_lock();
        self.schema = schema;
        self
    }

    pub fn hud_push_interval(mut self, ticks: Tick) -> Self {
        self.check_lock();
        self.hud_push_interval = ticks;
        self
    }

    pub fn snapshot_retry_threshold(mut self, conflicts: u32) -> Self {
        self.check_lock();
        self.snapshot_retry_threshold = conflicts;
        self
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    fn check_lock(&self) {
        if self.locked {
            panic!("Protocol is locked and cannot be changed after startup");
        }
    }
}
