use std::fmt;

use boostlink_serde::{ByteReader, ByteWriter, DecodeError, Serde};

/// One discrete simulation step supplied by the host lifecycle.
pub type Tick = u64;

/// Monotonically increasing per-entity mutation counter. Version 0 means
/// "never mutated"; a snapshot delta always uses base 0.
pub type Version = u64;

/// Identifies the end of the connection a piece of code runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostType {
    Server,
    Client,
}

/// Stable identifier for a synchronized entity, unique within a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl Serde for EntityId {
    fn ser(&self, writer: &mut ByteWriter) {
        self.0.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, DecodeError> {
        Ok(Self(u64::de(reader)?))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// Identifies a connected (or recently connected) player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u64);

impl Serde for PlayerId {
    fn ser(&self, writer: &mut ByteWriter) {
        self.0.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, DecodeError> {
        Ok(Self(u64::de(reader)?))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Numeric permission level carried by a command invoker, compared against
/// the level a command requires. Matches the host's operator-level model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PermissionLevel(pub u8);

impl PermissionLevel {
    pub const EVERYONE: PermissionLevel = PermissionLevel(0);
    pub const OPERATOR: PermissionLevel = PermissionLevel(2);

    pub fn permits(&self, required: PermissionLevel) -> bool {
        *self >= required
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {}", self.0)
    }
}
