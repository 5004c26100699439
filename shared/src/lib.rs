//! # Boostlink Shared
//! Common functionality shared between the boostlink-server & boostlink-client
//! crates: wire messages, the channel registry, the event bus and the
//! versioned entity-state core.

pub use boostlink_serde::{
    de_varint, de_zigzag, ser_varint, ser_zigzag, ByteReader, ByteWriter, DecodeError, Serde,
};

mod events;
mod messages;
mod protocol;
mod types;
mod world;

pub use events::{
    bus::{Emitter, Event, EventBus, EventKind, Listener, SubscriptionId},
    error::ListenerError,
};
pub use messages::{
    envelope::{encode_envelope, open_envelope},
    error::RegistryError,
    hud_toggle::HudToggle,
    message_kind::MessageKind,
    registry::{ChannelRegistry, Direction, DispatchOutcome, MessageHandler, SenderContext},
    snapshot_request::SnapshotRequest,
};
pub use protocol::Protocol;
pub use types::{EntityId, HostType, PermissionLevel, PlayerId, Tick, Version};
pub use world::{
    delta::Delta,
    entity_state::EntityState,
    error::{MutateError, VersionConflict},
    schema::Schema,
    value::{Value, ValueKind},
};
