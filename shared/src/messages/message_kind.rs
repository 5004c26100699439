use boostlink_serde::{ByteReader, ByteWriter, DecodeError, Serde};

/// Every message type the protocol can carry, with its fixed-width wire tag.
///
/// Tags are part of the wire contract: new kinds get new tags, existing tags
/// are never reused. A peer that receives a tag it does not know drops the
/// message and keeps the connection (protocol-version skew is expected).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum MessageKind {
    /// Server → client: one versioned state change (or a full snapshot)
    EntityDelta = 1,
    /// Client → server: replica is stale or unknown, asking for a snapshot
    SnapshotRequest = 2,
    /// Server → client: flip the client-side HUD on or off
    HudToggle = 3,
}

impl MessageKind {
    pub fn tag(&self) -> u16 {
        *self as u16
    }

    pub fn from_tag(tag: u16) -> Option<Self> {
        match tag {
            1 => Some(MessageKind::EntityDelta),
            2 => Some(MessageKind::SnapshotRequest),
            3 => Some(MessageKind::HudToggle),
            _ => None,
        }
    }
}

impl Serde for MessageKind {
    fn ser(&self, writer: &mut ByteWriter) {
        self.tag().ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, DecodeError> {
        let tag = u16::de(reader)?;
        MessageKind::from_tag(tag).ok_or(DecodeError::InvalidTag { tag })
    }
}
