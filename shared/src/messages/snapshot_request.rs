use boostlink_serde::{ByteReader, ByteWriter, DecodeError, Serde};

use crate::types::{EntityId, Version};

/// Client → server: the replica for `entity` is unknown or has fallen out of
/// step, please answer with a full snapshot delta (`base == 0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotRequest {
    pub entity: EntityId,
    /// The replica's last applied version, 0 if the entity was never seen.
    pub last_known: Version,
}

impl Serde for SnapshotRequest {
    fn ser(&self, writer: &mut ByteWriter) {
        self.entity.ser(writer);
        self.last_known.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, DecodeError> {
        Ok(Self {
            entity: EntityId::de(reader)?,
            last_known: Version::de(reader)?,
        })
    }
}
