use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use log::error;

use boostlink_shared::PlayerId;

/// Buffer between the transport's receive threads and the tick thread.
///
/// Transport code pushes raw envelopes as they arrive; the server drains the
/// whole buffer at the start of the next tick, which gives total ordering
/// between network-triggered mutations and tick-local mutations.
#[derive(Clone)]
pub struct InboundBuffer {
    queue: Arc<Mutex<VecDeque<(PlayerId, Vec<u8>)>>>,
}

impl InboundBuffer {
    pub fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Callable from any thread.
    pub fn push(&self, player: PlayerId, bytes: Vec<u8>) {
        match self.queue.lock() {
            Ok(mut queue) => queue.push_back((player, bytes)),
            Err(_) => error!("Inbound buffer lock poisoned; dropping message from {player}"),
        }
    }

    /// Takes everything received since the last drain, in arrival order.
    pub fn drain(&self) -> Vec<(PlayerId, Vec<u8>)> {
        match self.queue.lock() {
            Ok(mut queue) => queue.drain(..).collect(),
            Err(_) => {
                error!("Inbound buffer lock poisoned; dropping pending messages");
                Vec::new()
            }
        }
    }
}

impl Default for InboundBuffer {
    fn default() -> Self {
        Self::new()
    }
}
