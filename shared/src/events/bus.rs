use std::collections::{HashMap, VecDeque};

use log::warn;

use crate::{
    events::error::ListenerError,
    types::{EntityId, PlayerId, Tick, Version},
};

/// Lifecycle and domain events dispatched in-process.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ServerStarting,
    ServerStopping,
    Tick(Tick),
    PlayerJoined(PlayerId),
    PlayerLeft(PlayerId),
    StateChanged { entity: EntityId, version: Version },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::ServerStarting => EventKind::ServerStarting,
            Event::ServerStopping => EventKind::ServerStopping,
            Event::Tick(_) => EventKind::Tick,
            Event::PlayerJoined(_) => EventKind::PlayerJoined,
            Event::PlayerLeft(_) => EventKind::PlayerLeft,
            Event::StateChanged { .. } => EventKind::StateChanged,
        }
    }
}

/// Subscription key: which event variants a listener wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ServerStarting,
    ServerStopping,
    Tick,
    PlayerJoined,
    PlayerLeft,
    StateChanged,
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Handed to listeners so they can publish follow-up events. Emitted events
/// are queued and drained after the current publish completes, which keeps
/// per-tick ordering coherent and recursion bounded.
#[derive(Default)]
pub struct Emitter {
    queued: Vec<Event>,
}

impl Emitter {
    pub fn emit(&mut self, event: Event) {
        self.queued.push(event);
    }
}

pub type Listener = Box<dyn FnMut(&Event, &mut Emitter) -> Result<(), ListenerError>>;

/// In-process publish/subscribe dispatcher for lifecycle and domain events.
///
/// Listeners for a given kind run synchronously in subscription order. A
/// failing listener is logged and skipped; it never blocks the rest.
pub struct EventBus {
    listeners: HashMap<EventKind, Vec<(SubscriptionId, Listener)>>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn subscribe(&mut self, kind: EventKind, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.entry(kind).or_default().push((id, listener));
        id
    }

    /// Removes a listener. Returns whether the handle was still registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for entries in self.listeners.values_mut() {
            if let Some(index) = entries.iter().position(|(entry_id, _)| *entry_id == id) {
                entries.remove(index);
                return true;
            }
        }
        false
    }

    /// Dispatches the event, then drains any events listeners emitted while
    /// handling it, in publish order.
    pub fn publish(&mut self, event: Event) {
        let mut queue = VecDeque::new();
        queue.push_back(event);

        while let Some(event) = queue.pop_front() {
            let mut emitter = Emitter::default();
            if let Some(entries) = self.listeners.get_mut(&event.kind()) {
                for (id, listener) in entries.iter_mut() {
                    if let Err(error) = listener(&event, &mut emitter) {
                        warn!("Listener {id:?} failed on {:?}: {error}", event.kind());
                    }
                }
            }
            queue.extend(emitter.queued);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
